//! Terminal UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, Mode, Tab};

/// Draw the whole UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Tabs
            Constraint::Length(7), // Actions
            Constraint::Min(6),    // Output log
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_title(f, chunks[0]);
    draw_tabs(f, app, chunks[1]);
    draw_actions(f, app, chunks[2]);
    draw_log(f, app, chunks[3]);
    draw_status_bar(f, app, chunks[4]);

    match app.mode().clone() {
        Mode::Browse => {}
        Mode::Prompt {
            action,
            values,
            buffer,
        } => {
            let label = action
                .fields()
                .get(values.len())
                .map_or("", |field| field.label);
            draw_prompt(f, action.title(), label, &buffer);
        }
        Mode::Confirm { action, .. } => {
            draw_confirm(f, action.confirmation().unwrap_or_default());
        }
    }
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "Redmi A2 Lite Tool",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Utilidad para dispositivos Android (ADB/Fastboot)"),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(title).block(block), area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.tab_index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_actions(f: &mut Frame, app: &mut App, area: Rect) {
    let tab = app.tab();
    let (banner_area, list_area) = if tab.is_dangerous() {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        (Some(parts[0]), parts[1])
    } else {
        (None, area)
    };

    if let Some(banner_area) = banner_area {
        let banner = Paragraph::new("⚠️ OPERACIONES PELIGROSAS - Pueden borrar datos").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(banner, banner_area);
    }

    let items: Vec<ListItem> = tab
        .actions()
        .iter()
        .map(|a| ListItem::new(format!("  {}", a.label())))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(tab.title()))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, list_area, app.list_state());
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    // Keep the tail in view
    let height = usize::from(area.height.saturating_sub(2));
    let lines: Vec<Line> = app.log().lines().map(Line::from).collect();
    let skip = lines.len().saturating_sub(height);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Salida de comandos");
    f.render_widget(Paragraph::new(visible).block(block), area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.mode() {
        Mode::Browse => "←→/Tab: Pestañas • ↑↓: Navegar • Enter: Ejecutar • c: Limpiar log • q: Salir",
        Mode::Prompt { .. } => "Enter: Aceptar • Esc: Cancelar",
        Mode::Confirm { .. } => "y/s: Sí • n/Esc: No",
    };
    let status = match app.running() {
        0 => help.to_string(),
        n => format!("⏳ {n} en curso • {help}"),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(status).block(block), area);
}

fn draw_prompt(f: &mut Frame, title: &str, label: &str, buffer: &str) {
    let area = centered_rect(60, 7, f.area());
    let text = vec![
        Line::from(label.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            format!("{buffer}_"),
            Style::default().fg(Color::Yellow),
        )),
    ];
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }).block(block), area);
}

fn draw_confirm(f: &mut Frame, question: &str) {
    let height = u16::try_from(question.lines().count()).unwrap_or(u16::MAX).saturating_add(4);
    let area = centered_rect(60, height, f.area());
    let mut text: Vec<Line> = question.lines().map(Line::from).collect();
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "y/s: Sí • n/Esc: No",
        Style::default().fg(Color::Yellow),
    )));
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirmación")
        .style(Style::default().fg(Color::Red));
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }).block(block), area);
}

/// Rectangle `percent_x` wide and `height` rows tall, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
