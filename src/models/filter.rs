// ============================================================================
// Critères de sélection : MarketFilter, Category, ViewState
// ============================================================================
// L'état de sélection de la vue (filtre actif, recherche, catégorie) est
// regroupé dans une structure explicite passée aux fonctions de vue.
//
// CONCEPTS RUST :
// 1. Enums pour ensembles fermés : le compilateur garantit l'exhaustivité
// 2. Cycle d'états : next() / previous() comme pour un carrousel
// 3. Copy : enums sans données, copiés au lieu d'être déplacés
// ============================================================================

// ============================================================================
// Enum : MarketFilter
// ============================================================================

/// Boutons de filtre au-dessus du tableau
///
/// Seuls Gainers et Losers ajoutent un prédicat ; DeFi, NFT et Metaverse
/// sont sélectionnables mais ne filtrent rien de plus que la recherche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketFilter {
    #[default]
    All,
    Gainers,
    Losers,
    DeFi,
    NFT,
    Metaverse,
}

impl MarketFilter {
    /// Tous les filtres, dans l'ordre des boutons
    pub const ALL: [MarketFilter; 6] = [
        MarketFilter::All,
        MarketFilter::Gainers,
        MarketFilter::Losers,
        MarketFilter::DeFi,
        MarketFilter::NFT,
        MarketFilter::Metaverse,
    ];

    /// Libellé du bouton
    pub fn label(&self) -> &'static str {
        match self {
            MarketFilter::All => "All",
            MarketFilter::Gainers => "Gainers",
            MarketFilter::Losers => "Losers",
            MarketFilter::DeFi => "DeFi",
            MarketFilter::NFT => "NFT",
            MarketFilter::Metaverse => "Metaverse",
        }
    }

    /// Position dans la barre de filtres
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Filtre à la position `index` (touches 1 à 6)
    pub fn from_index(index: usize) -> Option<MarketFilter> {
        Self::ALL.get(index).copied()
    }

    /// Passe au filtre suivant
    ///
    /// CONCEPT : Cycle d'états
    /// - All → Gainers → Losers → DeFi → NFT → Metaverse → All
    pub fn next(&self) -> MarketFilter {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Passe au filtre précédent (cycle inverse)
    pub fn previous(&self) -> MarketFilter {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Enum : Category
// ============================================================================

/// Sélecteur de catégorie (sans effet sur le filtrage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    AllCategories,
    Currency,
    Platform,
    DeFi,
    NFT,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::AllCategories,
        Category::Currency,
        Category::Platform,
        Category::DeFi,
        Category::NFT,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::AllCategories => "All Categories",
            Category::Currency => "Currency",
            Category::Platform => "Platform",
            Category::DeFi => "DeFi",
            Category::NFT => "NFT",
        }
    }

    pub fn next(&self) -> Category {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Structure : ViewState
// ============================================================================

/// Critères courants de la vue, passés aux fonctions de `market::views`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active_filter: MarketFilter,
    pub search_term: String,
    pub category: Category,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder : fixe le filtre actif
    pub fn with_filter(mut self, filter: MarketFilter) -> Self {
        self.active_filter = filter;
        self
    }

    /// Builder : fixe le terme de recherche
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn set_filter(&mut self, filter: MarketFilter) {
        self.active_filter = filter;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }
}
