// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Partage : le store est un Arc<Mutex<>> partagé avec le timer des prix
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Les critères de sélection vivent dans ViewState, passé aux vues
// ============================================================================

use std::cell::Cell;

use tracing::{debug, info};

use crate::market::{filtered_view, lock_store, seed, top_movers, MarketStore, SharedStore};
use crate::models::{Instrument, InstrumentId, MarketFilter, MarketStat, NewsItem, ViewState};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : tableau, top movers, actualités
    Dashboard,

    /// Mode recherche : les touches éditent le terme de recherche
    /// CONCEPT : Modal input (Vim-like)
    /// - Le tableau se filtre à chaque caractère
    /// - Enter garde le terme, ESC l'efface
    SearchInput,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Instruments partagés avec le timer des prix
    pub store: SharedStore,

    /// Critères courants (filtre, recherche, catégorie)
    pub view: ViewState,

    /// Index de la ligne sélectionnée dans le tableau filtré
    pub selected_index: usize,

    /// Instrument surligné lors du dernier rendu
    ///
    /// CONCEPT RUST : Cell (mutabilité intérieure)
    /// - render() ne reçoit que &App mais doit noter la ligne dessinée
    /// - Le timer peut changer le tableau entre le rendu et la touche :
    ///   l'action porte sur ce que l'utilisateur a vu
    highlighted: Cell<Option<InstrumentId>>,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Two-step quit pour éviter les sorties accidentelles
    pub confirm_quit: bool,

    /// Nombre de cartes dans "Top Movers"
    pub top_movers_count: usize,

    /// Actualités (statiques)
    pub news: Vec<NewsItem>,

    /// Cartes de statistiques (statiques)
    pub stats: Vec<MarketStat>,
}

impl App {
    /// Crée une App sur le store des données littérales
    pub fn new() -> Self {
        Self::with_store(MarketStore::seeded().into_shared())
    }

    /// Crée une App sur un store existant (partagé avec le timer)
    pub fn with_store(store: SharedStore) -> Self {
        Self {
            running: true,
            store,
            view: ViewState::new(),
            selected_index: 0,
            highlighted: Cell::new(None),
            current_screen: Screen::Dashboard,
            confirm_quit: false,
            top_movers_count: crate::market::DEFAULT_TOP_MOVERS,
            news: seed::news(),
            stats: seed::market_stats(),
        }
    }

    /// Builder : nombre de top movers
    pub fn with_top_movers(mut self, count: usize) -> Self {
        self.top_movers_count = count;
        self
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Lecture des vues dérivées
    // ========================================================================

    /// Lignes visibles du tableau (copies, le verrou est relâché au retour)
    ///
    /// CONCEPT : Lock scope minimisé
    /// - On clone les lignes filtrées pour ne pas garder le Mutex
    pub fn visible_rows(&self) -> Vec<Instrument> {
        let store = lock_store(&self.store);
        filtered_view(store.instruments(), &self.view)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Top movers courants (copies)
    pub fn movers(&self) -> Vec<Instrument> {
        let store = lock_store(&self.store);
        top_movers(store.instruments(), self.top_movers_count)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Identifiant de l'instrument sous le curseur
    ///
    /// Celui du dernier rendu s'il existe, sinon recalculé depuis le store.
    pub fn selected_id(&self) -> Option<InstrumentId> {
        self.highlighted
            .get()
            .or_else(|| self.visible_rows().get(self.selected_index).map(|i| i.id))
    }

    /// Appelé par le rendu : note l'instrument effectivement surligné
    pub fn record_highlight(&self, id: Option<InstrumentId>) {
        self.highlighted.set(id);
    }

    /// Le curseur a bougé : le surlignage du dernier rendu n'est plus valable
    fn selection_changed(&mut self) {
        self.highlighted.set(None);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.selection_changed();
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.visible_rows().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
        self.selection_changed();
    }

    /// Ramène la sélection dans les bornes du tableau filtré
    ///
    /// Le tableau peut rétrécir après un changement de filtre, une recherche
    /// ou un tick (un Gainer peut devenir Loser).
    pub fn clamp_selection(&mut self) {
        let max_index = self.visible_rows().len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }

    /// Tick : appelé à chaque itération de la boucle
    pub fn tick(&mut self) {
        self.clamp_selection();
    }

    // ========================================================================
    // Actions utilisateur
    // ========================================================================

    /// Inverse le flag watchlist de la ligne sélectionnée
    ///
    /// Retourne (id, nouvel état), ou None si le tableau est vide.
    pub fn toggle_selected_watchlist(&mut self) -> Option<(InstrumentId, bool)> {
        let id = self.selected_id()?;
        let in_watchlist = lock_store(&self.store).toggle_watchlist(id)?;
        Some((id, in_watchlist))
    }

    /// Sélectionne un filtre et remet le curseur en haut
    pub fn set_filter(&mut self, filter: MarketFilter) {
        info!(filter = filter.label(), "Filter changed");
        self.view.set_filter(filter);
        self.selected_index = 0;
        self.selection_changed();
    }

    pub fn next_filter(&mut self) {
        self.set_filter(self.view.active_filter.next());
    }

    pub fn previous_filter(&mut self) {
        self.set_filter(self.view.active_filter.previous());
    }

    /// Passe à la catégorie suivante (sans effet sur le tableau)
    pub fn cycle_category(&mut self) {
        let category = self.view.category.next();
        info!(category = category.label(), "Category changed");
        self.view.set_category(category);
    }

    // ========================================================================
    // Search Mode Management
    // ========================================================================

    /// Entre en mode recherche (le terme courant est conservé)
    pub fn start_search(&mut self) {
        self.current_screen = Screen::SearchInput;
    }

    /// Ajoute un caractère au terme (le tableau se met à jour aussitôt)
    pub fn append_char(&mut self, c: char) {
        self.view.search_term.push(c);
        self.selected_index = 0;
        self.selection_changed();
    }

    /// Supprime le dernier caractère du terme
    pub fn backspace(&mut self) {
        self.view.search_term.pop();
        self.selected_index = 0;
        self.selection_changed();
    }

    /// Valide la recherche et retourne au dashboard
    pub fn submit_search(&mut self) {
        debug!(term = %self.view.search_term, "Search submitted");
        self.current_screen = Screen::Dashboard;
        self.clamp_selection();
    }

    /// Annule la recherche : efface le terme et retourne au dashboard
    pub fn cancel_search(&mut self) {
        self.current_screen = Screen::Dashboard;
        self.clear_search();
    }

    pub fn clear_search(&mut self) {
        self.view.set_search_term(String::new());
        self.selected_index = 0;
        self.selection_changed();
    }

    pub fn is_in_search_mode(&self) -> bool {
        self.current_screen == Screen::SearchInput
    }

    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    // ========================================================================
    // Quit Confirmation Management
    // ========================================================================

    /// Première pression de 'q' : attend une confirmation
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
