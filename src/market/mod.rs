// ============================================================================
// Module : market
// ============================================================================
// Le view-model du marché :
// - store : les instruments et leurs champs mutables
// - views : les vues dérivées (tableau filtré, top movers)
// - ticker : le timer qui simule les variations de prix
// - seed : les données littérales chargées au démarrage
// ============================================================================

pub mod seed;
pub mod store;
pub mod ticker;
pub mod views;

pub use store::{lock_store, MarketStore, SharedStore};
pub use ticker::{PriceTicker, TickerState, DEFAULT_TICK_PERIOD};
pub use views::{filtered_view, top_movers, DEFAULT_TOP_MOVERS};
