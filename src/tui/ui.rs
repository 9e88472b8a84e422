use super::app::{App, NoticeKind};
use crate::catalog;
use crate::format::{format_amount, format_payout};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub fn render(frame: &mut Frame, app: &App) {
    let tier_rows = app.tiers().len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),         // Title
            Constraint::Length(3),         // Amount input
            Constraint::Length(1),         // Amount error
            Constraint::Length(tier_rows), // Tier list
            Constraint::Length(1),         // Rate error
            Constraint::Length(1),         // Result
            Constraint::Min(5),            // History
            Constraint::Length(1),         // Footer
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_amount(frame, app, chunks[1]);
    render_field_error(frame, app.amount_error(), chunks[2]);
    render_tiers(frame, app, chunks[3]);
    render_field_error(frame, app.rate_error(), chunks[4]);
    render_result(frame, app, chunks[5]);
    render_history(frame, app, chunks[6]);
    render_footer(frame, app, chunks[7]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(Span::styled(
        " Rebate Calculator ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), area);
}

fn render_amount(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.amount_error().is_some() {
        Color::Red
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(" Performance amount ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(app.amount_input()).block(block), area);

    let cursor_x = area.x + 1 + app.amount_input().chars().count() as u16;
    if cursor_x < area.x + area.width.saturating_sub(1) {
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_field_error(frame: &mut Frame, error: Option<&str>, area: Rect) {
    if let Some(message) = error {
        let line = Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_tiers(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.rate_error().is_some() {
        Color::Red
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Rebate tier ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines: Vec<Line> = app
        .tiers()
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            if app.selected_index() == Some(i) {
                Line::from(Span::styled(
                    format!("> {}", tier.label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", tier.label))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.last_result() {
        Some(record) => Line::from(vec![
            Span::raw(" Payable: "),
            Span::styled(
                format_payout(record.payout),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            " Waiting for calculation...",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let history = app.session().history();
    let title = if history.is_empty() {
        " History ".to_string()
    } else {
        format!(
            " History ({} | total {}) ",
            history.len(),
            format_payout(history.total_payout())
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let header = Row::new(vec!["TIME", "AMOUNT", "TIER", "PAYOUT"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = history
        .all()
        .skip(app.history_offset())
        .map(|record| {
            Row::new(vec![
                Cell::from(record.timestamp.format("%H:%M:%S").to_string()),
                Cell::from(format_amount(record.amount)),
                Cell::from(catalog::percent_label(record.rate)),
                Cell::from(Span::styled(
                    format_payout(record.payout),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().bg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(" Enter ", key),
        Span::raw(" calculate "),
        Span::styled(" ↑/↓ ", key),
        Span::raw(" tier "),
        Span::styled(" ^L ", key),
        Span::raw(" clear "),
        Span::styled(" ^S ", key),
        Span::raw(" export "),
        Span::styled(" PgUp/PgDn ", key),
        Span::raw(" history "),
        Span::styled(" Esc ", key),
        Span::raw(" quit "),
    ];

    if let Some(notice) = app.notice() {
        let color = match notice.kind {
            NoticeKind::Info => Color::Yellow,
            NoticeKind::Success => Color::Green,
            NoticeKind::Failure => Color::Red,
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            notice.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
