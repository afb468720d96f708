// ============================================================================
// Structures statiques : NewsItem et MarketStat
// ============================================================================
// Contenu figé affiché sous le tableau (actualités, cartes de stats)
// Aucune mutation : chargé une fois au démarrage
// ============================================================================

/// Une actualité du flux "Crypto Market News"
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub excerpt: String,

    /// Étiquette de catégorie (ex: "Regulation")
    pub category: String,

    /// Libellé de temps relatif (ex: "2 hours ago")
    pub time_ago: String,

    /// Glyphe affiché à gauche du titre
    pub icon: String,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        excerpt: impl Into<String>,
        category: impl Into<String>,
        time_ago: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            category: category.into(),
            time_ago: time_ago.into(),
            icon: icon.into(),
        }
    }

    /// Ligne de méta-données : "Regulation · 5 hours ago"
    pub fn meta_line(&self) -> String {
        format!("{} · {}", self.category, self.time_ago)
    }
}

/// Carte de statistique globale du marché (valeur déjà formatée)
#[derive(Debug, Clone, PartialEq)]
pub struct MarketStat {
    pub label: String,
    pub value: String,
}

impl MarketStat {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
