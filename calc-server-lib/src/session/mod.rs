//! The per-connection request/response protocol.
//!
//! One session owns one connection. Three things happen concurrently: the
//! request loop reads newline-framed expressions and answers them, a
//! liveness task announces `Server is alive` on a fixed interval, and a
//! dedicated writer task is the only place that touches the outbound
//! stream. Funnelling every outbound line through one writer keeps
//! responses and liveness announcements from interleaving mid-line; they
//! may still interleave between lines, which the protocol allows.

use crate::engine;
use log::{info, warn};
use std::fmt;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::{self, Duration};

/// The unsolicited liveness announcement.
pub const ALIVE_MESSAGE: &str = "Server is alive";

/// The reply to any request that fails to evaluate.
pub const INVALID_EXPRESSION_MESSAGE: &str = "Invalid Expression";

/// The request line that closes the connection, with no reply.
pub const EXIT_COMMAND: &str = "exit";

/// Drives one connection from accept to teardown.
///
/// Reads request lines until the peer sends [`EXIT_COMMAND`], disconnects,
/// or an I/O error occurs. Evaluation errors never end the session; they
/// are answered with [`INVALID_EXPRESSION_MESSAGE`] and the loop carries
/// on. The first liveness announcement is written immediately on connect
/// and then once per `alive_interval`.
///
/// # Arguments
///
/// * `reader`: Buffered read half of the connection.
/// * `writer`: Write half of the connection.
/// * `peer`: How the remote end is named in log messages.
/// * `alive_interval`: How often to announce liveness. Must be non-zero.
pub async fn run_session<R, W>(
    reader: R,
    writer: W,
    peer: impl fmt::Display,
    alive_interval: Duration,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let peer = peer.to_string();
    let (line_tx, line_rx) = mpsc::channel::<String>(16);
    let writer_task = tokio::spawn(write_lines(writer, line_rx));
    let alive_task = tokio::spawn(send_alive_periodic(line_tx.clone(), alive_interval));

    let mut lines = reader.lines();
    let outcome = loop {
        let read = tokio::select! {
            read = lines.next_line() => read,
            // The writer failing means the connection is unusable, so the
            // read loop stops too.
            _ = line_tx.closed() => break Ok(()),
        };
        match read {
            Ok(Some(request)) if request == EXIT_COMMAND => {
                info!("client {peer} sends exit, closing this connection");
                break Ok(());
            }
            Ok(Some(request)) => {
                let response = respond(&peer, &request);
                if line_tx.send(response).await.is_err() {
                    break Ok(());
                }
            }
            Ok(None) => {
                info!("client {peer} disconnected");
                break Ok(());
            }
            Err(error) => break Err(error),
        }
    };

    alive_task.abort();
    drop(line_tx);
    // Let the writer drain anything still queued before the connection is
    // dropped. Its own failure already ended the session above.
    let _ = writer_task.await;

    outcome
}

fn respond(peer: &str, request: &str) -> String {
    match engine::evaluate_text(request) {
        Ok(result) => {
            let response = engine::format_result(result);
            info!("client {peer} request: {request}, result: {response}");
            response
        }
        Err(error) => {
            warn!("client {peer} request: {request} is {error}");
            INVALID_EXPRESSION_MESSAGE.to_string()
        }
    }
}

/// The sole writer for a session. Each message becomes exactly one
/// newline-terminated line, flushed before the next is taken.
async fn write_lines<W>(mut writer: W, mut lines: mpsc::Receiver<String>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = lines.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}

/// Announces liveness on a fixed schedule, starting immediately on
/// connect. Stops once the session's writer is gone.
async fn send_alive_periodic(line_tx: mpsc::Sender<String>, every: Duration) {
    let mut timer = time::interval(every);
    loop {
        timer.tick().await;
        if line_tx.send(ALIVE_MESSAGE.to_string()).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::io::{duplex, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};
    use tokio::task::JoinHandle;

    const QUIET_INTERVAL: Duration = Duration::from_secs(3600);

    struct TestClient {
        lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
        writer: WriteHalf<DuplexStream>,
        session: JoinHandle<io::Result<()>>,
    }

    fn connect(alive_interval: Duration) -> TestClient {
        let (client, server) = duplex(1024);
        let (server_reader, server_writer) = tokio::io::split(server);
        let session = tokio::spawn(run_session(
            BufReader::new(server_reader),
            server_writer,
            "test-client",
            alive_interval,
        ));
        let (client_reader, client_writer) = tokio::io::split(client);
        TestClient {
            lines: BufReader::new(client_reader).lines(),
            writer: client_writer,
            session,
        }
    }

    impl TestClient {
        async fn send(&mut self, request: &str) {
            self.writer
                .write_all(format!("{request}\n").as_bytes())
                .await
                .unwrap();
        }

        async fn next_line(&mut self) -> Option<String> {
            self.lines.next_line().await.unwrap()
        }

        /// Skips liveness announcements, which may land between responses.
        async fn next_response(&mut self) -> Option<String> {
            loop {
                match self.next_line().await {
                    Some(line) if line == ALIVE_MESSAGE => continue,
                    line => return line,
                }
            }
        }
    }

    #[tokio::test]
    async fn request_lines_get_framed_responses() {
        let mut client = connect(QUIET_INTERVAL);

        client.send("2+3*4").await;
        assert_eq!(client.next_response().await, Some("14".to_string()));

        client.send("1/4").await;
        assert_eq!(client.next_response().await, Some("0.25".to_string()));
    }

    #[tokio::test]
    async fn evaluation_errors_do_not_end_the_session() {
        let mut client = connect(QUIET_INTERVAL);

        client.send("1/0").await;
        assert_eq!(
            client.next_response().await,
            Some(INVALID_EXPRESSION_MESSAGE.to_string())
        );

        client.send("a+1").await;
        assert_eq!(
            client.next_response().await,
            Some(INVALID_EXPRESSION_MESSAGE.to_string())
        );

        client.send("4/2").await;
        assert_eq!(client.next_response().await, Some("2".to_string()));
    }

    #[tokio::test]
    async fn alive_messages_arrive_without_any_request() {
        let mut client = connect(Duration::from_millis(10));

        for _ in 0..3 {
            assert_eq!(client.next_line().await, Some(ALIVE_MESSAGE.to_string()));
        }
    }

    #[tokio::test]
    async fn exit_closes_the_connection_without_a_response() {
        let mut client = connect(QUIET_INTERVAL);

        // The announcement written on connect arrives first.
        assert_eq!(client.next_line().await, Some(ALIVE_MESSAGE.to_string()));

        client.send(EXIT_COMMAND).await;
        (&mut client.session).await.unwrap().unwrap();
        assert_eq!(client.next_line().await, None);
    }

    #[tokio::test]
    async fn severed_connection_tears_the_session_down() {
        let client = connect(QUIET_INTERVAL);

        drop(client.lines);
        drop(client.writer);

        client.session.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn concurrent_sessions_do_not_interfere() {
        let mut first = connect(QUIET_INTERVAL);
        let mut second = connect(QUIET_INTERVAL);

        first.send("(8-3-2)*7").await;
        second.send("(8-3-2)*7").await;

        assert_eq!(first.next_response().await, Some("21".to_string()));
        assert_eq!(second.next_response().await, Some("21".to_string()));
    }
}
