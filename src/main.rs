use anyhow::Result;
use clap::Parser;
use tracing::error;
use ts_notify::cli;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args) {
        // No-op if dispatch already installed the real subscriber; covers
        // failures before logging init (e.g. missing config).
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .try_init();
        error!("{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
