// ============================================================================
// Timer de simulation des prix : PriceTicker
// ============================================================================
// Tâche tokio périodique qui applique un jitter au store partagé.
//
// CONCEPTS RUST :
// 1. State machine : Stopped → Running → Stopped
// 2. RAII : Drop arrête la tâche, le timer ne survit pas à la vue
// 3. JoinHandle::abort() : annulation d'une tâche tokio
//
// CONCEPT TOKIO : interval + MissedTickBehavior::Skip
// - Pas de rattrapage des ticks manqués, pas de correction de dérive
// ============================================================================

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::market::store::{lock_store, SharedStore};

/// Période par défaut entre deux mises à jour des prix
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(10);

/// État du timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Stopped,
    Running,
}

/// Timer qui fait "vivre" les prix du store
pub struct PriceTicker {
    period: Duration,

    /// Tâche tokio en cours (None quand le timer est arrêté)
    task: Option<JoinHandle<()>>,
}

impl PriceTicker {
    /// Crée un timer arrêté
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn state(&self) -> TickerState {
        match &self.task {
            Some(task) if !task.is_finished() => TickerState::Running,
            _ => TickerState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == TickerState::Running
    }

    /// Démarre le timer sur le store (transition Stopped → Running)
    ///
    /// - Doit être appelé dans un contexte tokio (Runtime::enter ou #[tokio::test])
    /// - Un second start pendant que le timer tourne est refusé : retourne false
    ///   et aucun second timer n'est créé
    pub fn start(&mut self, store: SharedStore) -> bool {
        if self.is_running() {
            warn!("Price ticker already running, start ignored");
            return false;
        }

        let period = self.period;
        info!(period_secs = period.as_secs_f64(), "Starting price ticker");

        self.task = Some(tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            // Le premier tick d'un interval est immédiat : on le consomme
            // pour que la première mise à jour arrive après une période
            interval.tick().await;

            loop {
                interval.tick().await;

                // Verrou tenu le temps du jitter seulement, jamais à travers un await
                let mut guard = lock_store(&store);
                guard.apply_jitter(&mut rng);
                debug!(tick = guard.tick_count(), "Price ticker fired");
            }
        }));

        true
    }

    /// Arrête le timer (transition Running → Stopped)
    ///
    /// Sans effet si le timer est déjà arrêté.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Price ticker stopped");
        }
    }
}

impl Default for PriceTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

// ============================================================================
// Trait Drop
// ============================================================================
// CONCEPT RUST : RAII
// - Quand le PriceTicker sort du scope, drop() est appelé automatiquement
// - La tâche tokio est annulée : pas de timer orphelin après la vue
// ============================================================================

impl Drop for PriceTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

// ============================================================================
// Tests
// ============================================================================
// CONCEPT TOKIO : start_paused
// - L'horloge est virtuelle, advance() fait avancer le temps instantanément
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::store::MarketStore;

    /// Laisse la tâche du timer s'exécuter après un advance()
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_lifecycle() {
        let store = MarketStore::seeded().into_shared();
        let mut ticker = PriceTicker::new(Duration::from_secs(10));
        assert_eq!(ticker.state(), TickerState::Stopped);

        assert!(ticker.start(store.clone()));
        assert_eq!(ticker.state(), TickerState::Running);

        ticker.stop();
        settle().await;
        assert_eq!(ticker.state(), TickerState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_applies_jitter_each_period() {
        let store = MarketStore::seeded().into_shared();
        let mut ticker = PriceTicker::new(Duration::from_secs(10));
        ticker.start(store.clone());
        settle().await;

        // Rien avant la fin de la première période
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(lock_store(&store).tick_count(), 0);

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(lock_store(&store).tick_count(), 1);

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(lock_store(&store).tick_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_refused() {
        let store = MarketStore::seeded().into_shared();
        let mut ticker = PriceTicker::new(Duration::from_secs(10));

        assert!(ticker.start(store.clone()));
        assert!(!ticker.start(store.clone()));
        settle().await;

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;

        // Un seul timer : un seul jitter par période
        assert_eq!(lock_store(&store).tick_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_after_stop() {
        let store = MarketStore::seeded().into_shared();
        let mut ticker = PriceTicker::new(Duration::from_secs(10));
        ticker.start(store.clone());
        settle().await;

        ticker.stop();
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;

        assert_eq!(lock_store(&store).tick_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_ticker() {
        let store = MarketStore::seeded().into_shared();
        {
            let mut ticker = PriceTicker::default();
            ticker.start(store.clone());
            settle().await;
        }

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(lock_store(&store).tick_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let store = MarketStore::seeded().into_shared();
        let mut ticker = PriceTicker::new(Duration::from_secs(1));

        ticker.start(store.clone());
        ticker.stop();
        assert!(ticker.start(store.clone()));
        settle().await;

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(lock_store(&store).tick_count(), 1);
    }
}
