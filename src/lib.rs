// ============================================================================
// CoinBoard - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod app;     // État de l'application
pub mod config;  // Fichier de configuration
pub mod market;  // View-model : store, vues dérivées, timer des prix
pub mod models;  // Structures de données
pub mod ui;      // Interface utilisateur
