use anyhow::Result;
use calc_server::session;
use clap::Parser;
use log::{info, warn};
use std::time::Duration;
use tokio::io::BufReader;
use tokio::net::TcpListener;

/// Serves line-oriented arithmetic requests over TCP
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The port to listen on
    #[clap(short, long, default_value_t = 12000)]
    port: u16,

    /// How often to announce liveness to each client, in milliseconds
    #[clap(long, default_value_t = 60_000)]
    alive_interval_ms: u64,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let alive_interval = Duration::from_millis(args.alive_interval_ms);
    let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!("server is listening on port {}", args.port);

    loop {
        let (stream, peer) = listener.accept().await?;
        info!("a new client has connected: {peer}");
        tokio::spawn(async move {
            let (read_half, write_half) = stream.into_split();
            let reader = BufReader::new(read_half);
            if let Err(error) = session::run_session(reader, write_half, peer, alive_interval).await
            {
                warn!("client {peer} session ended with an error: {error}");
            }
        });
    }
}
