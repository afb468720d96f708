// ============================================================================
// Vues dérivées : tableau filtré et top movers
// ============================================================================
// Fonctions pures recalculées à chaque rendu.
//
// CONCEPTS RUST :
// 1. Fonctions pures : &[Instrument] en entrée, aucune mutation
// 2. Vec<&Instrument> : on retourne des références, pas de copies
// 3. Tri stable : sort_by conserve l'ordre relatif des égalités
// ============================================================================

use crate::models::{Instrument, MarketFilter, ViewState};

/// Nombre de top movers affichés par défaut
pub const DEFAULT_TOP_MOVERS: usize = 4;

/// Lignes du tableau pour les critères courants
///
/// 1. Recherche insensible à la casse sur le nom ou le symbole
/// 2. Gainers : change_24h > 0, Losers : change_24h < 0
/// 3. DeFi, NFT, Metaverse et la catégorie n'ajoutent aucun prédicat
/// 4. L'ordre d'origine est conservé
pub fn filtered_view<'a>(instruments: &'a [Instrument], state: &ViewState) -> Vec<&'a Instrument> {
    // On plie le terme une seule fois pour toute la liste
    let needle = state.search_term.to_lowercase();

    instruments
        .iter()
        .filter(|instrument| instrument.matches_folded(&needle))
        .filter(|instrument| match state.active_filter {
            MarketFilter::Gainers => instrument.change_24h > 0.0,
            MarketFilter::Losers => instrument.change_24h < 0.0,
            MarketFilter::All | MarketFilter::DeFi | MarketFilter::NFT | MarketFilter::Metaverse => true,
        })
        .collect()
}

/// Les `n` instruments avec la plus forte variation absolue
///
/// CONCEPT : Tri sur une copie
/// - On trie un Vec de références, jamais la liste d'origine
/// - Le tableau principal garde son ordre entre deux rendus
pub fn top_movers(instruments: &[Instrument], n: usize) -> Vec<&Instrument> {
    let mut ranked: Vec<&Instrument> = instruments.iter().collect();

    // Tri stable décroissant sur |change_24h|
    ranked.sort_by(|a, b| b.change_24h.abs().total_cmp(&a.change_24h.abs()));
    ranked.truncate(n);
    ranked
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::seed;

    fn ids(view: &[&Instrument]) -> Vec<u32> {
        view.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_all_without_search_returns_everything() {
        let coins = seed::instruments();
        let view = filtered_view(&coins, &ViewState::new());
        assert_eq!(ids(&view), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let coins = seed::instruments();

        let view = filtered_view(&coins, &ViewState::new().with_search("eth"));
        assert_eq!(ids(&view), vec![2]);

        let view = filtered_view(&coins, &ViewState::new().with_search("DOGE"));
        assert_eq!(ids(&view), vec![6]);
    }

    #[test]
    fn test_search_results_contain_term() {
        let coins = seed::instruments();
        for term in ["b", "COIN", "o", "li", "xrp", "zzz"] {
            let view = filtered_view(&coins, &ViewState::new().with_search(term));
            let folded = term.to_lowercase();
            for coin in view {
                assert!(
                    coin.name.to_lowercase().contains(&folded)
                        || coin.symbol.to_lowercase().contains(&folded)
                );
            }
        }
    }

    #[test]
    fn test_gainers_and_losers() {
        let coins = seed::instruments();

        let gainers = filtered_view(&coins, &ViewState::new().with_filter(MarketFilter::Gainers));
        assert!(gainers.iter().all(|c| c.change_24h > 0.0));
        assert!(!ids(&gainers).contains(&3));

        let losers = filtered_view(&coins, &ViewState::new().with_filter(MarketFilter::Losers));
        assert_eq!(ids(&losers), vec![3, 6]);
    }

    #[test]
    fn test_zero_change_is_neither_gainer_nor_loser() {
        let coins = vec![Instrument::new(1, "Flat", "FLT", 1.0, 0.0)];
        assert!(filtered_view(&coins, &ViewState::new().with_filter(MarketFilter::Gainers)).is_empty());
        assert!(filtered_view(&coins, &ViewState::new().with_filter(MarketFilter::Losers)).is_empty());
        assert_eq!(filtered_view(&coins, &ViewState::new()).len(), 1);
    }

    #[test]
    fn test_inert_filters_match_all() {
        let coins = seed::instruments();
        let base = ids(&filtered_view(&coins, &ViewState::new().with_search("o")));

        for filter in [MarketFilter::DeFi, MarketFilter::NFT, MarketFilter::Metaverse] {
            let mut state = ViewState::new().with_filter(filter).with_search("o");
            state.set_category(crate::models::Category::Platform);
            assert_eq!(ids(&filtered_view(&coins, &state)), base);
        }
    }

    #[test]
    fn test_filter_preserves_order() {
        let coins = seed::instruments();
        let view = filtered_view(&coins, &ViewState::new().with_filter(MarketFilter::Gainers));
        let view_ids = ids(&view);
        let mut sorted = view_ids.clone();
        sorted.sort_unstable();
        assert_eq!(view_ids, sorted);
    }

    #[test]
    fn test_top_movers_ranking() {
        let coins = seed::instruments();
        let movers = top_movers(&coins, DEFAULT_TOP_MOVERS);

        // LINK 5.42, ADA 3.21, BTC 2.35, DOT 2.15
        assert_eq!(ids(&movers), vec![7, 4, 1, 8]);
    }

    #[test]
    fn test_top_movers_does_not_reorder_source() {
        let coins = seed::instruments();
        let _ = top_movers(&coins, DEFAULT_TOP_MOVERS);
        let order: Vec<_> = coins.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_top_movers_ties_keep_original_order() {
        let coins = vec![
            Instrument::new(1, "A", "A", 1.0, 1.0),
            Instrument::new(2, "B", "B", 1.0, -2.0),
            Instrument::new(3, "C", "C", 1.0, 2.0),
            Instrument::new(4, "D", "D", 1.0, -1.0),
            Instrument::new(5, "E", "E", 1.0, 0.5),
        ];
        let movers = top_movers(&coins, 4);
        assert_eq!(ids(&movers), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_top_movers_small_sets() {
        let coins = vec![Instrument::new(1, "A", "A", 1.0, 1.0)];
        assert_eq!(top_movers(&coins, 4).len(), 1);
        assert!(top_movers(&[], 4).is_empty());
        assert!(filtered_view(&[], &ViewState::new()).is_empty());
    }
}
