use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell as TuiCell, Clear, Paragraph, Row, StatefulWidget, Table as TuiTable,
        TableState, Tabs, Widget, Wrap,
    },
};

use super::app::Route;
use crate::views::{Cell, DraftField, EditFlow, EditState, Table, TableRow, Tone};

const MAX_COLUMN_WIDTH: u16 = 48;

/// Color for a cell tone
pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default().fg(Color::White),
        Tone::Muted => Style::default().fg(Color::DarkGray),
        Tone::Strong => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        Tone::Primary => Style::default().fg(Color::White).bg(Color::Blue),
        Tone::Success => Style::default().fg(Color::Black).bg(Color::Green),
        Tone::Info => Style::default().fg(Color::Black).bg(Color::Cyan),
        Tone::Secondary => Style::default().fg(Color::White).bg(Color::DarkGray),
        Tone::Easy => Style::default().fg(Color::Black).bg(Color::LightGreen),
        Tone::Medium => Style::default().fg(Color::Black).bg(Color::Yellow),
        Tone::Hard => Style::default().fg(Color::White).bg(Color::Red),
        Tone::Gold => Style::default().fg(Color::Yellow),
        Tone::Silver => Style::default().fg(Color::Gray),
        Tone::Bronze => Style::default().fg(Color::LightRed),
    }
}

/// Styled line for one table cell
pub fn cell_line(cell: &Cell) -> Line<'static> {
    match cell {
        Cell::Text { text, tone } => Line::from(Span::styled(text.clone(), tone_style(*tone))),
        Cell::Badge { text, tone } => match tone {
            // Medals read better without a background
            Tone::Gold | Tone::Silver | Tone::Bronze => {
                Line::from(Span::styled(text.clone(), tone_style(*tone)))
            }
            _ => Line::from(Span::styled(format!(" {} ", text), tone_style(*tone))),
        },
        Cell::Badges { items, tone } => {
            let mut spans = Vec::with_capacity(items.len() * 2);
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(format!(" {} ", item), tone_style(*tone)));
            }
            Line::from(spans)
        }
    }
}

/// Render route tabs
pub fn render_tabs(area: Rect, buf: &mut Buffer, current: Route) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, route)| Line::from(format!("{} {}", i + 1, route.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 🐙 OctoFit Tracker ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(current.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    tabs.render(area, buf);
}

fn view_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Gray))
}

/// Render the loading indicator
pub fn render_loading(area: Rect, buf: &mut Buffer, message: &str) {
    let block = view_block(" ⏳ ".to_string());
    let inner = block.inner(area);
    block.render(area, buf);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    paragraph.render(inner, buf);
}

/// Render the error banner in place of the table
pub fn render_error(area: Rect, buf: &mut Buffer, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ✗ Error ")
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    block.render(area, buf);

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(
            "Error: ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message.to_string(), Style::default().fg(Color::Red)),
    ]))
    .wrap(Wrap { trim: true });
    paragraph.render(inner, buf);
}

/// Column widths sized to the widest header or cell
fn column_widths(headers: &[&str], rows: &[Vec<Line<'_>>]) -> Vec<Constraint> {
    let last = headers.len().saturating_sub(1);
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let widest = rows
                .iter()
                .filter_map(|cells| cells.get(col))
                .map(Line::width)
                .chain(std::iter::once(Line::from(*header).width()))
                .max()
                .unwrap_or(0);
            let width = (widest as u16).min(MAX_COLUMN_WIDTH);
            if col == last {
                Constraint::Min(width)
            } else {
                Constraint::Length(width)
            }
        })
        .collect()
}

/// Render a resource table. `selected` highlights a row and keeps it in view.
pub fn render_table(area: Rect, buf: &mut Buffer, table: &Table, selected: Option<usize>) {
    let block = view_block(format!(
        " {} {} ({}) ",
        table.icon, table.title, table.count_label
    ));
    let inner = block.inner(area);
    block.render(area, buf);

    let header = Row::new(table.headers.iter().map(|h| {
        TuiCell::from(Span::styled(
            *h,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ))
    }))
    .style(Style::default().bg(Color::Gray));

    let lines: Vec<Vec<Line>> = table
        .rows
        .iter()
        .map(|row| row.cells().iter().map(cell_line).collect())
        .collect();

    let widths = column_widths(table.headers, &lines);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .zip(lines)
        .filter(|(row, _)| matches!(row, TableRow::Record { .. }))
        .map(|(row, cells)| {
            let style = match row {
                TableRow::Record {
                    highlight: true, ..
                } => Style::default().fg(Color::Yellow),
                _ => Style::default(),
            };
            Row::new(cells.into_iter().map(TuiCell::from)).style(style)
        })
        .collect();

    let row_count = rows.len();
    let widget = TuiTable::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let selected = selected.filter(|i| *i < row_count);
    let mut state = TableState::default().with_selected(selected);
    StatefulWidget::render(widget, inner, buf, &mut state);

    if let Some(TableRow::Placeholder(message)) = table.rows.first() {
        if inner.height > 2 {
            let slot = Rect {
                x: inner.x,
                y: inner.y + 2,
                width: inner.width,
                height: 1,
            };
            Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .render(slot, buf);
        }
    }
}

/// Render the edit-user modal
pub fn render_edit_modal(area: Rect, buf: &mut Buffer, flow: &EditFlow, focus: DraftField) {
    let (Some(draft), Some(name)) = (flow.draft(), flow.target_name()) else {
        return;
    };

    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" ✏️ Edit User — {} ", name))
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    block.render(area, buf);

    let saving = matches!(flow.state(), EditState::Saving { .. });
    let mut lines = Vec::new();

    if let Some(error) = flow.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::White).bg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    for field in DraftField::ALL {
        let value = match field {
            DraftField::Name => draft.name.clone(),
            DraftField::Email => draft.email.clone(),
            DraftField::Team if draft.team.is_empty() => "— No Team —".to_string(),
            DraftField::Team => draft.team.clone(),
        };

        let focused = field == focus && !saving;
        let value_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let value = match (focused, field) {
            (true, DraftField::Team) => format!("◀ {} ▶", value),
            (true, _) => format!("{}▏", value),
            _ => value,
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<6} ", field.label()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(if saving {
        Line::from(Span::styled(
            "Saving…",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::styled("[Enter] Save Changes", Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled("[Esc] Cancel", Style::default().fg(Color::Gray)),
        ])
    });

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Views:", Style::default().fg(Color::Cyan))),
        Line::from("  1-5      - Jump to view"),
        Line::from("  Tab/→    - Next view"),
        Line::from("  S-Tab/←  - Previous view"),
        Line::from("  ↑/k ↓/j  - Move selection"),
        Line::from("  r        - Reload view"),
        Line::from(""),
        Line::from(Span::styled("Users:", Style::default().fg(Color::Cyan))),
        Line::from("  Enter/e  - Edit selected user"),
        Line::from("  Tab/↑/↓  - Next field (in editor)"),
        Line::from("  ←/→      - Change team (in editor)"),
        Line::from("  Enter    - Save changes (in editor)"),
        Line::from("  Esc      - Cancel (in editor)"),
        Line::from(""),
        Line::from(Span::styled("Other:", Style::default().fg(Color::Cyan))),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, api_base_url: &str, route: Route) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", route.path()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            format!(" {} ", api_base_url),
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        ),
        Span::styled(
            " Press ? for help ",
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        ),
    ]);

    Paragraph::new(line).render(area, buf);
}
