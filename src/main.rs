// account-client entry point.
// Wires configuration, the response cache and the account service, runs one
// fetch or save, and prints the resulting state.

use std::process::ExitCode;

use account_client::{
    ApiClient, App, Config, HttpUserAccountService, Storage, configure_cache,
    fetch_user_account, logging, save_user_account,
};
use tokio::sync::mpsc;
use tracing::error;

const USAGE: &str = "usage: account-client <fetch|save> <username>";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, username) = match args.as_slice() {
        [command, username] if command == "fetch" || command == "save" => (command, username),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(command, username).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: &str, username: &str) -> account_client::Result<()> {
    let config = Config::from_env()?;

    let storage = Storage::new(config.cache_dir.as_deref());
    let cache = configure_cache(&storage).await?;
    let client = ApiClient::from_config(&config)?.with_cache(cache);
    let service = HttpUserAccountService::new(client);

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new();

    match command {
        "save" => save_user_account(&service, username, &tx).await,
        _ => fetch_user_account(&service, username, &tx).await,
    }
    drop(tx);
    app.run(rx).await;

    let state = &app.user_account;
    if let Some(account) = state.account.data() {
        println!("{}", serde_json::to_string_pretty(account)?);
    }
    if let Some(error) = state.account.error().or(state.saving.error()) {
        eprintln!("{}", error);
    }

    Ok(())
}
