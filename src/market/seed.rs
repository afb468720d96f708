// ============================================================================
// Données initiales
// ============================================================================
// Valeurs littérales chargées une seule fois au démarrage.
// Pas de réseau, pas de persistance : tout vit en mémoire.
// ============================================================================

use crate::models::{Instrument, MarketStat, NewsItem};

/// Les 8 cryptomonnaies du tableau, dans l'ordre d'affichage
pub fn instruments() -> Vec<Instrument> {
    vec![
        Instrument::new(1, "Bitcoin", "BTC", 43250.65, 2.35)
            .with_icon("₿")
            .with_market_figures("$24.8B", "$845.2B"),
        Instrument::new(2, "Ethereum", "ETH", 2380.45, 1.78)
            .with_icon("Ξ")
            .with_market_figures("$12.3B", "$285.7B")
            .watched(true),
        Instrument::new(3, "Binance Coin", "BNB", 315.20, -0.45)
            .with_icon("◈")
            .with_market_figures("$1.8B", "$48.5B"),
        Instrument::new(4, "Cardano", "ADA", 0.52, 3.21)
            .with_icon("◆")
            .with_market_figures("$480M", "$18.3B"),
        Instrument::new(5, "Ripple", "XRP", 0.62, 0.85)
            .with_icon("✕")
            .with_market_figures("$1.2B", "$33.5B")
            .watched(true),
        Instrument::new(6, "Dogecoin", "DOGE", 0.08, -1.25)
            .with_icon("Ð")
            .with_market_figures("$420M", "$11.2B"),
        Instrument::new(7, "Chainlink", "LINK", 14.32, 5.42)
            .with_icon("⛓")
            .with_market_figures("$680M", "$8.1B"),
        Instrument::new(8, "Polkadot", "DOT", 6.85, 2.15)
            .with_icon("●")
            .with_market_figures("$320M", "$8.7B"),
    ]
}

/// Flux d'actualités (statique)
pub fn news() -> Vec<NewsItem> {
    vec![
        NewsItem::new(
            "Bitcoin Surges Past $43,000 Amid Institutional Adoption",
            "Major financial institutions continue to add Bitcoin to their balance sheets, driving prices to new monthly highs.",
            "Crypto News",
            "2 hours ago",
            "📈",
        ),
        NewsItem::new(
            "Regulatory Clarity Boosts Ethereum Ecosystem",
            "Recent regulatory developments have provided much-needed clarity for Ethereum-based projects and DeFi protocols.",
            "Regulation",
            "5 hours ago",
            "🏛",
        ),
        NewsItem::new(
            "NFT Market Sees Resurgence with New Gaming Projects",
            "Play-to-earn gaming platforms are driving renewed interest in the NFT market, with trading volumes up 40% this month.",
            "NFT",
            "1 day ago",
            "🚀",
        ),
    ]
}

/// Cartes de statistiques globales affichées en haut de page
pub fn market_stats() -> Vec<MarketStat> {
    vec![
        MarketStat::new("Total Market Cap", "$1.74T"),
        MarketStat::new("24h Trading Volume", "$64.2B"),
        MarketStat::new("Bitcoin Dominance", "42.5%"),
        MarketStat::new("Active Cryptocurrencies", "9,821"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique() {
        let coins = instruments();
        let ids: HashSet<_> = coins.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), coins.len());
        assert_eq!(coins.len(), 8);
    }

    #[test]
    fn test_seed_watchlist_flags() {
        let watched: Vec<_> = instruments()
            .into_iter()
            .filter(|c| c.in_watchlist)
            .map(|c| c.symbol)
            .collect();
        assert_eq!(watched, vec!["ETH", "XRP"]);
    }

    #[test]
    fn test_static_content() {
        assert_eq!(news().len(), 3);
        assert_eq!(market_stats()[2].value, "42.5%");
    }
}
