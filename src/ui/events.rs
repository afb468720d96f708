// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching : identifier la touche pressée
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (redessine les prix mis à jour par le timer)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    /// Attente maximale avant de retourner un Tick
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend max 250ms
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release : on ne garde que Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Extrait le KeyCode d'un événement clavier
fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' : quitter (two-step)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K')))
}

/// Flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J')))
}

/// Tab ou 'l' : filtre suivant
pub fn is_next_filter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab | KeyCode::Char('l')))
}

/// Shift+Tab ou 'h' : filtre précédent
pub fn is_previous_filter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::BackTab | KeyCode::Char('h')))
}

/// '1' à '6' : index du filtre à sélectionner directement
pub fn filter_index_from_event(event: &Event) -> Option<usize> {
    match key_code(event) {
        Some(KeyCode::Char(c @ '1'..='6')) => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// 'c' : catégorie suivante
pub fn is_category_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('c') | KeyCode::Char('C')))
}

/// '/' : mode recherche (comme dans vim ou less)
pub fn is_search_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('/')))
}

/// 'w' ou Espace : ajoute/retire de la watchlist
pub fn is_watchlist_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ')))
}

/// Caractère accepté dans le terme de recherche
pub fn search_char_from_event(event: &Event) -> Option<char> {
    match key_code(event) {
        Some(KeyCode::Char(c)) if c.is_alphanumeric() || c == ' ' || c == '-' || c == '.' => Some(c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_filter_index_from_event() {
        assert_eq!(filter_index_from_event(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(filter_index_from_event(&key(KeyCode::Char('6'))), Some(5));
        assert_eq!(filter_index_from_event(&key(KeyCode::Char('7'))), None);
        assert_eq!(filter_index_from_event(&Event::Tick), None);
    }

    #[test]
    fn test_search_chars() {
        assert_eq!(search_char_from_event(&key(KeyCode::Char('e'))), Some('e'));
        assert_eq!(search_char_from_event(&key(KeyCode::Char(' '))), Some(' '));
        assert_eq!(search_char_from_event(&key(KeyCode::Char('/'))), None);
        assert_eq!(search_char_from_event(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_navigation_keys() {
        assert!(is_up_event(&key(KeyCode::Up)));
        assert!(is_down_event(&key(KeyCode::Char('j'))));
        assert!(is_next_filter_event(&key(KeyCode::Tab)));
        assert!(is_previous_filter_event(&key(KeyCode::BackTab)));
        assert!(is_watchlist_event(&key(KeyCode::Char(' '))));
    }
}
