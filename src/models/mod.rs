// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod filter;     // Critères de sélection (filtre, recherche, catégorie)
pub mod instrument; // Une cryptomonnaie du tableau
pub mod news;       // Actualités et cartes de statistiques (statiques)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use coinboard::models::instrument::Instrument;
// On peut faire : use coinboard::models::Instrument;
pub use filter::{Category, MarketFilter, ViewState};
pub use instrument::{round2, Instrument, InstrumentId};
pub use news::{MarketStat, NewsItem};
