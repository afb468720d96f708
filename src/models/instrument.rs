// ============================================================================
// Structure : Instrument
// ============================================================================
// Représente une cryptomonnaie suivie dans le tableau du marché
//
// CONCEPTS RUST :
// 1. #[derive(...)] : génère automatiquement l'implémentation de traits
//    - Debug : permet d'afficher la structure avec {:?}
//    - Clone : permet de dupliquer la valeur
//    - PartialEq : permet de comparer deux instruments avec ==
//
// 2. Champs mutables vs figés :
//    - price, change_24h, in_watchlist : modifiés en place
//    - le reste est fixé au démarrage (chaînes déjà formatées)
// ============================================================================

/// Identifiant unique d'un instrument (stable pendant toute la durée du process)
pub type InstrumentId = u32;

/// Une cryptomonnaie affichée dans le tableau
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    /// Identifiant unique (ex: 1 pour Bitcoin)
    pub id: InstrumentId,

    /// Nom complet (ex: "Bitcoin")
    pub name: String,

    /// Symbole (ex: "BTC")
    pub symbol: String,

    /// Glyphe affiché devant le nom (purement visuel)
    pub icon: String,

    /// Prix actuel en USD
    pub price: f64,

    /// Variation sur 24h en pourcentage (signée)
    pub change_24h: f64,

    /// Volume 24h déjà formaté (ex: "$24.8B"), jamais recalculé
    pub volume_24h: String,

    /// Capitalisation déjà formatée (ex: "$845.2B"), jamais recalculée
    pub market_cap: String,

    /// L'utilisateur suit-il cet instrument ?
    pub in_watchlist: bool,
}

impl Instrument {
    /// Constructeur : crée un instrument hors watchlist
    ///
    /// CONCEPT RUST : impl Into<String>
    /// - Accepte &str ou String sans to_string() côté appelant
    pub fn new(
        id: InstrumentId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        price: f64,
        change_24h: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            icon: String::new(),
            price,
            change_24h,
            volume_24h: String::new(),
            market_cap: String::new(),
            in_watchlist: false,
        }
    }

    /// Builder : ajoute le glyphe
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Builder : ajoute volume et capitalisation (chaînes d'affichage)
    pub fn with_market_figures(
        mut self,
        volume_24h: impl Into<String>,
        market_cap: impl Into<String>,
    ) -> Self {
        self.volume_24h = volume_24h.into();
        self.market_cap = market_cap.into();
        self
    }

    /// Builder : place l'instrument dans la watchlist
    pub fn watched(mut self, in_watchlist: bool) -> Self {
        self.in_watchlist = in_watchlist;
        self
    }

    /// Applique un mouvement de prix `delta` (en points de pourcentage)
    ///
    /// - price := round2(price * (1 + delta / 100))
    /// - change_24h := round2(change_24h + delta)
    ///
    /// Le même delta sert aux deux champs.
    pub fn apply_move(&mut self, delta: f64) {
        self.price = round2(self.price * (1.0 + delta / 100.0));
        self.change_24h = round2(self.change_24h + delta);
    }

    /// Retourne true si l'instrument est en hausse (ou stable)
    pub fn is_positive(&self) -> bool {
        self.change_24h >= 0.0
    }

    /// Vérifie si le nom ou le symbole contient `needle` (déjà en minuscules)
    ///
    /// CONCEPT : Case folding
    /// - On compare en minuscules des deux côtés
    /// - L'appelant plie le terme une seule fois pour toute la liste
    pub fn matches_folded(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.symbol.to_lowercase().contains(needle)
    }

    /// Prix formaté avec séparateur de milliers (ex: "$43,250.65")
    pub fn price_display(&self) -> String {
        format!("${}", format_thousands(self.price))
    }

    /// Variation formatée avec signe (ex: "+2.35%", "-0.45%")
    pub fn change_display(&self) -> String {
        if self.is_positive() {
            format!("+{:.2}%", self.change_24h)
        } else {
            format!("{:.2}%", self.change_24h)
        }
    }
}

/// Arrondit à 2 décimales (demi vers l'extérieur de zéro)
///
/// CONCEPT RUST : f64::round
/// - round() arrondit "half away from zero" (2.345 → 2.35, -2.345 → -2.35)
/// - `+ 0.0` normalise -0.0 en 0.0 (sinon affiché "-0.00")
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Formate un nombre avec 2 décimales et des virgules tous les 3 chiffres
fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    // Insère une virgule tous les 3 chiffres en partant de la droite
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_creation() {
        let coin = Instrument::new(3, "Binance Coin", "BNB", 315.20, -0.45)
            .with_market_figures("$1.8B", "$48.5B");

        assert_eq!(coin.symbol, "BNB");
        assert_eq!(coin.volume_24h, "$1.8B");
        assert!(!coin.in_watchlist);
        assert!(!coin.is_positive());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(-0.456), -0.46);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_apply_move_uses_same_delta() {
        let mut coin = Instrument::new(1, "Bitcoin", "BTC", 43250.65, 2.35);
        coin.apply_move(0.1);

        assert_eq!(coin.price, round2(43250.65 * 1.001));
        assert_eq!(coin.change_24h, 2.45);
    }

    #[test]
    fn test_apply_move_negative() {
        let mut coin = Instrument::new(6, "Dogecoin", "DOGE", 0.08, -1.25);
        coin.apply_move(-0.15);

        // 0.08 * 0.9985 = 0.07988 → 0.08
        assert_eq!(coin.price, 0.08);
        assert_eq!(coin.change_24h, -1.4);
    }

    #[test]
    fn test_move_to_zero_displays_unsigned() {
        // -0.10 + 0.098 = -0.002 → arrondi à zéro, sans signe négatif
        let mut coin = Instrument::new(1, "Flat", "FLT", 1.0, -0.10);
        coin.apply_move(0.098);

        assert_eq!(coin.change_24h, 0.0);
        assert!(coin.change_24h.is_sign_positive());
        assert_eq!(coin.change_display(), "+0.00%");
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_matches_folded() {
        let coin = Instrument::new(2, "Ethereum", "ETH", 2380.45, 1.78);
        assert!(coin.matches_folded(""));
        assert!(coin.matches_folded("eth"));
        assert!(coin.matches_folded("reum"));
        assert!(!coin.matches_folded("btc"));
    }

    #[test]
    fn test_display_helpers() {
        let btc = Instrument::new(1, "Bitcoin", "BTC", 43250.65, 2.35);
        assert_eq!(btc.price_display(), "$43,250.65");
        assert_eq!(btc.change_display(), "+2.35%");

        let bnb = Instrument::new(3, "Binance Coin", "BNB", 315.2, -0.45);
        assert_eq!(bnb.price_display(), "$315.20");
        assert_eq!(bnb.change_display(), "-0.45%");

        let big = Instrument::new(9, "Big", "BIG", 1234567.0, 0.0);
        assert_eq!(big.price_display(), "$1,234,567.00");
    }
}
