// ============================================================================
// Structure : MarketStore
// ============================================================================
// Possède la liste mutable des instruments.
//
// CONCEPTS RUST :
// 1. Encapsulation : le Vec est privé, on ne peut ni insérer ni supprimer
//    depuis l'extérieur (taille fixe après construction)
// 2. Lecture via &[Instrument] : snapshot en lecture seule
// 3. Generics : apply_jitter accepte n'importe quelle source `R: Rng`
//
// CONCEPT : Partage entre threads
// - Le timer tourne sur un worker tokio, l'UI sur le thread principal
// - SharedStore = Arc<Mutex<MarketStore>> sérialise toutes les mutations
// ============================================================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::market::seed;
use crate::models::{Instrument, InstrumentId};

/// Amplitude totale du jitter : delta ∈ [-0.15, +0.15] points de %
pub const JITTER_SPREAD: f64 = 0.3;

/// Store partagé entre l'UI et le timer
pub type SharedStore = Arc<Mutex<MarketStore>>;

/// Verrouille le store partagé
///
/// CONCEPT : Mutex empoisonné
/// - Si un thread a paniqué en tenant le verrou, lock() retourne Err
/// - Chaque mutation laisse le store cohérent, on récupère donc la garde
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, MarketStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Les instruments suivis et leurs champs mutables
#[derive(Debug, Clone)]
pub struct MarketStore {
    instruments: Vec<Instrument>,

    /// Horodatage du dernier jitter (None avant le premier tick)
    last_update: Option<DateTime<Utc>>,

    /// Nombre de jitters appliqués depuis le démarrage
    tick_count: u64,
}

impl MarketStore {
    /// Crée un store à partir d'une liste d'instruments
    ///
    /// Refuse les identifiants dupliqués.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(instruments.len());
        for instrument in &instruments {
            if !seen.insert(instrument.id) {
                bail!("Identifiant d'instrument dupliqué : {}", instrument.id);
            }
        }

        Ok(Self {
            instruments,
            last_update: None,
            tick_count: 0,
        })
    }

    /// Store initialisé avec les données littérales du marché
    pub fn seeded() -> Self {
        Self {
            instruments: seed::instruments(),
            last_update: None,
            tick_count: 0,
        }
    }

    /// Enveloppe le store pour le partager (Arc<Mutex<>>)
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Snapshot en lecture seule, dans l'ordre d'origine
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn get(&self, id: InstrumentId) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Inverse le flag watchlist de l'instrument `id`
    ///
    /// - Retourne le nouvel état, ou None si l'id est inconnu (no-op)
    /// - Ne touche à aucun autre champ et ne réordonne pas la liste
    pub fn toggle_watchlist(&mut self, id: InstrumentId) -> Option<bool> {
        let instrument = self.instruments.iter_mut().find(|i| i.id == id)?;
        instrument.in_watchlist = !instrument.in_watchlist;
        info!(id, symbol = %instrument.symbol, in_watchlist = instrument.in_watchlist, "Watchlist toggled");
        Some(instrument.in_watchlist)
    }

    /// Applique un jitter aléatoire indépendant à chaque instrument
    ///
    /// Pour chaque instrument : d = (rand() - 0.5) * 0.3, puis
    /// price := round2(price * (1 + d/100)) et change := round2(change + d)
    ///
    /// CONCEPT RUST : &mut self
    /// - Tout le set est mis à jour dans le même emprunt mutable
    /// - Personne ne peut lire un état à moitié mis à jour
    pub fn apply_jitter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for instrument in &mut self.instruments {
            let delta = (rng.gen::<f64>() - 0.5) * JITTER_SPREAD;
            instrument.apply_move(delta);
        }

        self.last_update = Some(Utc::now());
        self.tick_count += 1;
        debug!(tick = self.tick_count, instruments = self.instruments.len(), "Prices jittered");
    }
}

impl Default for MarketStore {
    fn default() -> Self {
        Self::seeded()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::round2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let coins = vec![
            Instrument::new(1, "Bitcoin", "BTC", 1.0, 0.0),
            Instrument::new(1, "Bitcoin Cash", "BCH", 1.0, 0.0),
        ];
        assert!(MarketStore::new(coins).is_err());
    }

    #[test]
    fn test_new_empty_store() {
        let store = MarketStore::new(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.last_update().is_none());
    }

    #[test]
    fn test_toggle_watchlist_flips_one_flag() {
        let mut store = MarketStore::seeded();
        let before = store.instruments().to_vec();

        assert_eq!(store.toggle_watchlist(3), Some(true));

        for (old, new) in before.iter().zip(store.instruments()) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.price, new.price);
            assert_eq!(old.change_24h, new.change_24h);
            if old.id == 3 {
                assert_ne!(old.in_watchlist, new.in_watchlist);
            } else {
                assert_eq!(old.in_watchlist, new.in_watchlist);
            }
        }
    }

    #[test]
    fn test_toggle_watchlist_twice_is_identity() {
        let mut store = MarketStore::seeded();
        let before = store.instruments().to_vec();

        store.toggle_watchlist(2);
        store.toggle_watchlist(2);

        assert_eq!(store.instruments(), before.as_slice());
    }

    #[test]
    fn test_toggle_watchlist_unknown_id_is_noop() {
        let mut store = MarketStore::seeded();
        let before = store.instruments().to_vec();

        assert_eq!(store.toggle_watchlist(999), None);
        assert_eq!(store.instruments(), before.as_slice());
    }

    #[test]
    fn test_apply_jitter_bounds() {
        let mut store = MarketStore::seeded();
        let before = store.instruments().to_vec();
        let mut rng = StdRng::seed_from_u64(42);

        store.apply_jitter(&mut rng);

        for (old, new) in before.iter().zip(store.instruments()) {
            // Le delta appliqué est retrouvé (à l'arrondi près) via la variation
            let delta = new.change_24h - old.change_24h;
            assert!(delta.abs() <= 0.15 + 0.0051, "delta hors bornes : {}", delta);

            // Le prix est cohérent avec un delta de [-0.15, 0.15]
            let low = round2(old.price * (1.0 - 0.15 / 100.0));
            let high = round2(old.price * (1.0 + 0.15 / 100.0));
            assert!(new.price >= low && new.price <= high);

            assert_eq!(old.id, new.id);
            assert_eq!(old.in_watchlist, new.in_watchlist);
        }

        assert_eq!(store.tick_count(), 1);
        assert!(store.last_update().is_some());
    }

    #[test]
    fn test_apply_jitter_matches_drawn_delta() {
        // Même graine → mêmes tirages : on rejoue les deltas à la main
        let mut store = MarketStore::seeded();
        let mut expected = store.instruments().to_vec();

        let mut replay = StdRng::seed_from_u64(7);
        for coin in &mut expected {
            let delta = (replay.gen::<f64>() - 0.5) * JITTER_SPREAD;
            assert!((-0.15..=0.15).contains(&delta));
            coin.apply_move(delta);
        }

        store.apply_jitter(&mut StdRng::seed_from_u64(7));
        assert_eq!(store.instruments(), expected.as_slice());
    }

    #[test]
    fn test_jitter_keeps_order() {
        let mut store = MarketStore::seeded();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            store.apply_jitter(&mut rng);
        }

        let ids: Vec<_> = store.instruments().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(store.tick_count(), 20);
    }

    #[test]
    fn test_lock_store() {
        let shared = MarketStore::seeded().into_shared();
        lock_store(&shared).toggle_watchlist(1);
        assert_eq!(lock_store(&shared).get(1).map(|i| i.in_watchlist), Some(true));
    }
}
