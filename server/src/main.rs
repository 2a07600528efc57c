use clap::Parser;
use common::config::ConfigManager;
use common::{GameId, log, logger};
use tictactoe_server::server_config::DEFAULT_CONFIG_PATH;
use tictactoe_server::{GameStore, ServerConfig, StatusTask};

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager: ConfigManager<_, ServerConfig> = ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_config()?;

    let prefix = match (&config.log_prefix, args.use_log_prefix) {
        (Some(prefix), _) => Some(prefix.clone()),
        (None, true) => Some("Server".to_string()),
        (None, false) => None,
    };
    logger::init_logger(prefix);

    let store = GameStore::from_config(&config);
    store
        .subscribe(|game_id: &GameId| log!("[game:{}] State changed", game_id))
        .await;

    let status_task = StatusTask::new(store.clone(), config.status_interval());
    let status_handle = tokio::spawn(async move {
        status_task.run().await;
    });

    log!(
        "Tic-tac-toe game store ready (config: {}, auto notify: {})",
        args.config,
        store.auto_notify_on_update()
    );

    tokio::signal::ctrl_c().await?;
    log!("Shutdown signal received");

    status_handle.abort();
    log!("Game store shut down with {} game(s)", store.game_count().await);

    Ok(())
}
