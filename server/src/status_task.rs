use std::time::Duration;

use common::log;

use crate::game_store::GameStore;

/// Periodically logs how many sessions the store holds. Games are never
/// evicted, so this is the only signal of registry growth.
pub struct StatusTask {
    store: GameStore,
    report_interval: Duration,
}

impl StatusTask {
    pub fn new(store: GameStore, report_interval: Duration) -> Self {
        Self {
            store,
            report_interval,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.report_interval);
        // First tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            self.report().await;
        }
    }

    pub async fn report(&self) -> usize {
        let count = self.store.game_count().await;
        log!("Active games: {}", count);
        count
    }
}
