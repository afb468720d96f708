// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine la page marché en utilisant les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, Table, etc.)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
//
// La disposition :
// ┌ header ──────────────────────────────────────────┐
// │ stats (4 cartes)                                 │
// │ filtres + catégorie + recherche                  │
// │ tableau des cryptos        │ top movers          │
// │                            │ actualités          │
// └ footer (raccourcis ou saisie de la recherche) ───┘
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::{Instrument, MarketFilter};

/// Largeur de la barre de tendance (colonne "Trend")
const TREND_WIDTH: usize = 8;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le dashboard est toujours visible
/// - Seul le footer change en mode recherche
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let chunks = create_layout(size);

    render_header(frame, app, chunks[0]);
    render_stats(frame, app, chunks[1]);
    render_controls(frame, app, chunks[2]);
    render_main_content(frame, app, chunks[3]);

    match app.current_screen {
        Screen::Dashboard => render_footer(frame, app, chunks[4]),
        Screen::SearchInput => render_search_footer(frame, app, chunks[4]),
    }
}

// ============================================================================
// Layout : Découpage de l'écran
// ============================================================================

/// Crée le layout principal (header, stats, contrôles, contenu, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Cartes de stats
            Constraint::Length(3), // Filtres + recherche
            Constraint::Min(0),    // Tableau + panneaux
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header
// ============================================================================

/// Dessine le header avec le titre et l'heure de la dernière mise à jour
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" CoinBoard ")
        .title_alignment(Alignment::Center);

    let (last_update, ticks) = {
        let store = crate::market::lock_store(&app.store);
        (store.last_update(), store.tick_count())
    };

    let status = match last_update {
        Some(at) => format!("Live prices · updated {} UTC · #{}", at.format("%H:%M:%S"), ticks),
        None => "Live prices · waiting for first update".to_string(),
    };

    let text = vec![Line::from(vec![
        Span::styled(
            "🚀 Crypto Markets  ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status, Style::default().fg(Color::Gray)),
    ])];

    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Stats : 4 cartes côte à côte
// ============================================================================

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    if app.stats.is_empty() {
        return;
    }

    let count = app.stats.len() as u32;
    let constraints: Vec<Constraint> = app.stats.iter().map(|_| Constraint::Ratio(1, count)).collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (stat, card) in app.stats.iter().zip(cards.iter()) {
        let text = vec![
            Line::from(Span::styled(
                stat.value.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(stat.label.as_str(), Style::default().fg(Color::Gray))),
        ];

        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, *card);
    }
}

// ============================================================================
// Contrôles : boutons de filtre, catégorie, recherche
// ============================================================================

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut spans: Vec<Span> = Vec::new();
    for (index, filter) in MarketFilter::ALL.iter().enumerate() {
        let label = format!(" {} {} ", index + 1, filter.label());
        let style = if *filter == app.view.active_filter {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        format!("[{}]", app.view.category.label()),
        Style::default().fg(Color::Magenta),
    ));
    spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));

    let search = if app.view.search_term.is_empty() {
        Span::styled("Search crypto...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("🔍 {}", app.view.search_term),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    spans.push(search);

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Main Content : tableau + panneaux latéraux
// ============================================================================

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_market_table(frame, app, columns[0]);

    // Top movers : une ligne par carte + bordures
    let movers_height = u16::try_from(app.top_movers_count)
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(movers_height), Constraint::Min(0)])
        .split(columns[1]);

    render_top_movers(frame, app, side[0]);
    render_news(frame, app, side[1]);
}

/// Couleur selon le signe de la variation
fn change_color(instrument: &Instrument) -> Color {
    if instrument.is_positive() {
        Color::Green
    } else {
        Color::Red
    }
}

/// Barre de tendance : |change| * 20 % de la largeur remplie (plafonnée à 100 %)
///
/// Ex: +2.35% → 47 % de 8 cases → "████░░░░"
pub fn trend_bar(change_24h: f64, width: usize) -> String {
    let ratio = (change_24h.abs() * 20.0).min(100.0) / 100.0;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Dessine le tableau des cryptos filtrées
///
/// CONCEPT RATATUI : Table + TableState
/// - TableState garde la ligne sélectionnée pour le highlight
/// - render_stateful_widget() utilise cet état pendant le rendu
fn render_market_table(frame: &mut Frame, app: &App, area: Rect) {
    let rows_data = app.visible_rows();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📊 Top Cryptocurrencies ({}) ", rows_data.len()));

    if rows_data.is_empty() {
        app.record_highlight(None);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Aucune crypto ne correspond", Style::default().fg(Color::Gray))),
        ];
        let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec!["#", "Name", "Price", "24h", "Volume", "Mkt Cap", "Trend", "★"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    // CONCEPT RUST : Iterator chaining
    // - .enumerate() : le rang affiché suit l'ordre du tableau filtré
    let rows: Vec<Row> = rows_data
        .iter()
        .enumerate()
        .map(|(index, coin)| {
            let color = change_color(coin);
            let star = if coin.in_watchlist { "★" } else { "☆" };

            Row::new(vec![
                Cell::from(format!("{}", index + 1)),
                Cell::from(format!("{} {} {}", coin.icon, coin.name, coin.symbol)),
                Cell::from(coin.price_display()),
                Cell::from(coin.change_display()).style(Style::default().fg(color)),
                Cell::from(coin.volume_24h.clone()),
                Cell::from(coin.market_cap.clone()),
                Cell::from(trend_bar(coin.change_24h, TREND_WIDTH)).style(Style::default().fg(color)),
                Cell::from(star).style(Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(TREND_WIDTH as u16),
        Constraint::Length(2),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED));

    // Le curseur peut dépasser si le timer a retiré des lignes depuis le dernier tick
    let selected = app.selected_index.min(rows_data.len() - 1);
    app.record_highlight(Some(rows_data[selected].id));

    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Dessine le panneau "Today's Top Movers"
fn render_top_movers(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🔥 Today's Top Movers ");

    let lines: Vec<Line> = app
        .movers()
        .iter()
        .map(|mover| {
            Line::from(vec![
                Span::raw(format!(" {} ", mover.icon)),
                Span::styled(format!("{:<14}", mover.name), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("{:<6}", mover.symbol), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:>8}", mover.change_display()),
                    Style::default().fg(change_color(mover)).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Dessine le flux d'actualités
fn render_news(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 📰 Crypto Market News ");

    let mut lines: Vec<Line> = Vec::new();
    for news in &app.news {
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", news.icon)),
            Span::styled(news.title.as_str(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(news.excerpt.as_str(), Style::default().fg(Color::Gray))));
        lines.push(Line::from(Span::styled(news.meta_line(), Style::default().fg(Color::Yellow))));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", key_style),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(" à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠", key_style),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", key_style),
            Span::raw(" Navigate  "),
            Span::styled("[Tab / 1-6]", key_style),
            Span::raw(" Filter  "),
            Span::styled("[c]", key_style),
            Span::raw(" Category  "),
            Span::styled("[/]", key_style),
            Span::raw(" Search  "),
            Span::styled("[w]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Watchlist"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts]).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Dessine le footer en mode recherche avec la ligne de saisie
fn render_search_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)); // Vert pour indiquer mode input

    let input_line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(app.view.search_term.as_str(), Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK)),
        Span::raw("   "),
        Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" Keep  "),
        Span::styled("[ESC]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" Clear"),
    ]);

    let paragraph = Paragraph::new(vec![input_line]).block(block).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
// CONCEPT RATATUI : TestBackend
// - Terminal en mémoire, permet de vérifier le rendu sans vrai terminal
// ============================================================================
