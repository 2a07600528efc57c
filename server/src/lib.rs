pub mod game_store;
pub mod server_config;
pub mod state_notifier;
pub mod status_task;

pub use game_store::GameStore;
pub use server_config::ServerConfig;
pub use state_notifier::{StateChangeHandler, StateNotifier};
pub use status_task::StatusTask;
