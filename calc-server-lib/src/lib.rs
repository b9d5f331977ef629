//! A line-oriented TCP calculator server.
//!
//! The [`engine`] module evaluates infix arithmetic expressions through a
//! tokenize → shunting-yard → postfix-evaluation pipeline, and the
//! [`session`] module speaks the newline-framed request/response protocol
//! for one connection, including the periodic liveness announcement.

pub mod engine;
pub mod session;
