use homework_bot::{config, logging, panic_hook, poller::PollLoop};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_dir = config::log_dir_from_env();
    let _log_guard = logging::init_logging(&log_dir)?;
    panic_hook::install(&log_dir);

    let config = config::BotConfig::from_env().inspect_err(|e| error!("{e}, exiting"))?;
    info!(?config, "homework-bot starting");

    let poll_loop = PollLoop::new(&config)?;
    match poll_loop.run().await {}
}
