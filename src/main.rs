#[tokio::main]
async fn main() -> grokgram::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("grokgram=info,teloxide=warn"),
    )
    .init();
    log::info!("Starting grokgram Telegram bot");

    match grokgram::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {}", e);
            Err(e)
        }
    }
}
