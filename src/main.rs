// ============================================================================
// CoinBoard - Page marché crypto dans le terminal
// ============================================================================
// Programme TUI : tableau des cryptos, filtres, recherche, top movers
// et actualités. Les prix sont simulés par un timer (jitter aléatoire).
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Runtime tokio "entré" : le timer des prix tourne sur un worker tokio
// 4. RAII : le timer est annulé quand la vue est détruite
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use coinboard::app::App;
use coinboard::config::AppConfig;
use coinboard::market::{MarketStore, PriceTicker};
use coinboard::models::MarketFilter;
use coinboard::ui::{events::EventHandler, render};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Répertoire des logs
///
/// - Linux : ~/.local/share/coinboard/logs
/// - macOS : ~/Library/Application Support/coinboard/logs
/// - Windows : C:\Users\<user>\AppData\Local\coinboard\logs
/// - Sinon : ./logs
fn log_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("coinboard").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/coinboard/logs/coinboard.log
/// RUST_LOG=coinboard=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "coinboard.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Le timer tourne sur un autre thread
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour coinboard, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinboard=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================
// CONCEPT RUST : Async dans sync
// - main() est synchrone (pour la boucle TUI)
// - runtime.enter() rend tokio::spawn disponible sur ce thread
// - Le timer des prix s'exécute sur les workers du runtime
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("CoinBoard starting up");

    let config = AppConfig::load().context("Échec du chargement de la configuration")?;
    debug!(?config, "Using configuration");

    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;
    let _guard = runtime.enter();

    // Store partagé entre l'UI et le timer
    let store = MarketStore::seeded().into_shared();
    let app = App::with_store(store.clone()).with_top_movers(config.top_movers_count());

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // "Montage" de la vue : le timer démarre une seule fois
    let mut ticker = PriceTicker::new(config.tick_period());
    ticker.start(store);

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events);

    // "Démontage" : le timer s'arrête avant de rendre le terminal
    ticker.stop();

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Game Loop / Event Loop Pattern
// - À chaque itération :
//   1. Dessiner l'interface (render) : les prix du timer apparaissent ici
//   2. Traiter les événements (input)
//   3. Mettre à jour l'état (update)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, &app))?;

        match events.next() {
            Ok(event) => handle_event(&mut app, event),
            Err(e) => error!(error = ?e, "Failed to read terminal event"),
        }

        app.tick();
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Le mode recherche capture les touches avant le dashboard
/// - Toute touche non reconnue annule la confirmation de quit
fn handle_event(app: &mut App, event: coinboard::ui::events::Event) {
    use coinboard::ui::events::{
        filter_index_from_event, is_backspace_event, is_category_event, is_down_event,
        is_enter_event, is_escape_event, is_next_filter_event, is_previous_filter_event,
        is_quit_event, is_search_event, is_up_event, is_watchlist_event, search_char_from_event,
        Event,
    };

    match event {
        Event::Tick => {}

        // ========================================
        // Search Mode : Gestion de la saisie
        // ========================================
        Event::Key(_) if app.is_in_search_mode() => {
            if is_escape_event(&event) {
                info!("User cleared search");
                app.cancel_search();
            } else if is_enter_event(&event) {
                app.submit_search();
            } else if is_backspace_event(&event) {
                app.backspace();
            } else if let Some(c) = search_char_from_event(&event) {
                app.append_char(c);
            }
        }

        // ========================================
        // Dashboard
        // ========================================
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) => {
            app.cancel_quit();

            if is_up_event(&event) {
                app.navigate_up();
            } else if is_down_event(&event) {
                app.navigate_down();
            } else if is_next_filter_event(&event) {
                app.next_filter();
            } else if is_previous_filter_event(&event) {
                app.previous_filter();
            } else if let Some(filter) = filter_index_from_event(&event).and_then(MarketFilter::from_index) {
                app.set_filter(filter);
            } else if is_category_event(&event) {
                app.cycle_category();
            } else if is_search_event(&event) {
                debug!("User entered search mode");
                app.start_search();
            } else if is_escape_event(&event) {
                app.clear_search();
            } else if is_watchlist_event(&event) {
                match app.toggle_selected_watchlist() {
                    Some((id, in_watchlist)) => debug!(id, in_watchlist, "Watchlist updated from UI"),
                    None => debug!("Nothing selected, watchlist toggle ignored"),
                }
            }
        }
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
