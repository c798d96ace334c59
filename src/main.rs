use clap::Parser;
use tokio::runtime::Runtime;

use next_close::{Cli, ServerConfig, build_context, run_server};

fn main() -> anyhow::Result<()> {
    // A. Init Logging
    // Info unless RUST_LOG says otherwise
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Model + market data (fatal on failure, nothing is served without a model)
    let ctx = build_context(&args).inspect_err(|e| log::error!("Startup failed: {:#}", e))?;

    // D. Serve
    let rt = Runtime::new()?;
    rt.block_on(run_server(ServerConfig::from(&args), ctx))
}
