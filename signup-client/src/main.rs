// signup-client/src/main.rs
use std::sync::Arc;
use std::time::Duration;

use common::{setup_tracing, Config};
use signup_client::commands::HELP;
use signup_client::{
    ActivityRepository, ApiUrls, AuthGateway, Command, FileStorage, ReqwestTransport,
    SessionStore, ViewController,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    // Setup tracing
    setup_tracing();

    // Load configuration
    let config = Config::from_env();

    let urls = ApiUrls::new(&config.api_base_url)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    tracing::info!("Using backend at {}", config.api_base_url);

    let transport = Arc::new(ReqwestTransport::new());
    let storage = Arc::new(FileStorage::new(&config.storage.path));
    let store = SessionStore::new(storage, config.storage.token_key.clone());

    let mut controller = ViewController::new(
        store,
        AuthGateway::new(transport.clone(), urls.clone()),
        ActivityRepository::new(transport, urls),
        Duration::from_secs(config.notice_ttl_secs),
    );

    println!("{}", controller.startup().await);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                continue;
            }
            "" => continue,
            _ => {}
        }

        match line.parse::<Command>() {
            Ok(command) => println!("{}", controller.dispatch(command).await),
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}
