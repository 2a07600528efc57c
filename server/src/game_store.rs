use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use common::{GameId, Player, SubscriptionId, TicTacToeGame, UpdateResponse, log};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::{Mutex, RwLock};

use crate::server_config::ServerConfig;
use crate::state_notifier::StateNotifier;

/// Each game sits behind its own mutex so the turn check and the
/// replacement in `update_game` happen under one guard. The map lock is only
/// held long enough to find or insert a slot.
type GameSlot = Arc<Mutex<TicTacToeGame>>;

#[derive(Debug, Clone)]
pub struct GameStore {
    games: Arc<RwLock<HashMap<GameId, GameSlot>>>,
    notifier: StateNotifier,
    auto_notify_on_update: bool,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
            notifier: StateNotifier::new(),
            auto_notify_on_update: false,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new().with_auto_notify(config.auto_notify_on_update)
    }

    /// When enabled, an accepted update notifies subscribers before
    /// `update_game` returns. Off by default: callers notify explicitly.
    pub fn with_auto_notify(mut self, enabled: bool) -> Self {
        self.auto_notify_on_update = enabled;
        self
    }

    pub fn auto_notify_on_update(&self) -> bool {
        self.auto_notify_on_update
    }

    pub async fn create_game(&self) -> GameId {
        let mut games = self.games.write().await;
        let game_id = loop {
            let candidate = GameId::generate();
            if let Entry::Vacant(entry) = games.entry(candidate) {
                entry.insert(Arc::new(Mutex::new(TicTacToeGame::new())));
                break candidate;
            }
        };
        let active = games.len();
        drop(games);

        log!("[game:{}] Created ({} active)", game_id, active);
        game_id
    }

    pub async fn get_game(&self, game_id: &GameId) -> Option<TicTacToeGame> {
        let slot = self.slot(game_id).await?;
        let game = slot.lock().await;
        Some(game.clone())
    }

    /// Replaces the stored game with `new_state` if `acting_player` owns the
    /// stored current turn. `new_state` is not checked for being a legal
    /// successor of the stored board.
    pub async fn update_game(
        &self,
        game_id: &GameId,
        acting_player: Player,
        new_state: TicTacToeGame,
    ) -> UpdateResponse {
        let Some(slot) = self.slot(game_id).await else {
            let response = UpdateResponse::DoesNotExist;
            log!("[game:{}] Update rejected: {}", game_id, response);
            return response;
        };

        let mut game = slot.lock().await;
        if game.current_turn != acting_player {
            let response = UpdateResponse::NotYourTurn;
            log!(
                "[game:{}] Update rejected: {} ({} moved, {} expected)",
                game_id,
                response,
                acting_player,
                game.current_turn
            );
            return response;
        }
        *game = new_state;
        drop(game);

        if self.auto_notify_on_update {
            self.notify(game_id).await;
        }
        UpdateResponse::Updated
    }

    pub async fn notify(&self, game_id: &GameId) {
        let delivered = self.notifier.notify(game_id).await;
        log!("[game:{}] State change sent to {} subscriber(s)", game_id, delivered);
    }

    pub async fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&GameId) + Send + Sync + 'static,
    {
        self.notifier.subscribe(handler).await
    }

    pub async fn subscribe_channel(&self) -> (SubscriptionId, UnboundedReceiver<GameId>) {
        self.notifier.subscribe_channel().await
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id).await
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }

    async fn slot(&self, game_id: &GameId) -> Option<GameSlot> {
        self.games.read().await.get(game_id).cloned()
    }
}
