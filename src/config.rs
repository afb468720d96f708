// ============================================================================
// Configuration : AppConfig
// ============================================================================
// Réglages optionnels lus depuis un fichier JSON.
//
// Emplacement :
// - $COINBOARD_CONFIG si la variable est définie
// - sinon ~/.config/coinboard/config.json (Linux)
//
// Fichier absent : valeurs par défaut. Fichier invalide : erreur.
//
// Exemple :
// ```json
// { "tick_period_secs": 5, "top_movers": 3 }
// ```
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::market::{DEFAULT_TICK_PERIOD, DEFAULT_TOP_MOVERS};

/// Variable d'environnement qui remplace le chemin par défaut
pub const CONFIG_ENV_VAR: &str = "COINBOARD_CONFIG";

/// Plafond du nombre de top movers (le panneau doit tenir à l'écran)
pub const MAX_TOP_MOVERS: usize = 50;

/// Réglages de l'application
///
/// CONCEPT SERDE : #[serde(default)]
/// - Les champs absents du JSON prennent la valeur de Default
/// - Un fichier "{}" est donc valide
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Secondes entre deux mises à jour simulées des prix (minimum 1)
    pub tick_period_secs: u64,

    /// Nombre de cartes dans le panneau "Top Movers" (plafonné à MAX_TOP_MOVERS)
    pub top_movers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_period_secs: DEFAULT_TICK_PERIOD.as_secs(),
            top_movers: DEFAULT_TOP_MOVERS,
        }
    }
}

impl AppConfig {
    /// Période du timer (bornée à 1 seconde minimum)
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.tick_period_secs.max(1))
    }

    /// Nombre de top movers (borné à MAX_TOP_MOVERS)
    pub fn top_movers_count(&self) -> usize {
        self.top_movers.min(MAX_TOP_MOVERS)
    }

    /// Chemin du fichier de config (None si aucun répertoire de config connu)
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("coinboard").join("config.json"))
    }

    /// Charge la config depuis l'emplacement par défaut
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Charge la config depuis `path` (défauts si le fichier n'existe pas)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Config JSON invalide : {}", path.display()))?;

        info!(path = %path.display(), ?config, "Config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("coinboard-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_period(), Duration::from_secs(10));
        assert_eq!(config.top_movers, 4);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("coinboard-does-not-exist.json");
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let path = temp_file("partial", r#"{ "tick_period_secs": 3 }"#);
        let config = AppConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.tick_period(), Duration::from_secs(3));
        assert_eq!(config.top_movers, 4);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let config = AppConfig { tick_period_secs: 0, top_movers: 4 };
        assert_eq!(config.tick_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_oversized_top_movers_is_clamped() {
        let path = temp_file("movers", r#"{ "top_movers": 65535 }"#);
        let config = AppConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.top_movers_count(), MAX_TOP_MOVERS);
        assert_eq!(AppConfig::default().top_movers_count(), 4);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let path = temp_file("invalid", "{ not json");
        let result = AppConfig::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
