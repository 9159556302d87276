use colored::{ColoredString, Colorize};
use console::{measure_text_width, pad_str, Alignment};

use crate::views::{Cell, Table, TableRow, Tone};

const GAP: &str = "  ";

fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Plain => text.normal(),
        Tone::Muted => text.dimmed(),
        Tone::Strong => text.bold(),
        Tone::Primary => text.blue().bold(),
        Tone::Success => text.green().bold(),
        Tone::Info => text.cyan(),
        Tone::Secondary => text.bright_black(),
        Tone::Easy => text.green(),
        Tone::Medium => text.yellow(),
        Tone::Hard => text.red(),
        Tone::Gold => text.yellow().bold(),
        Tone::Silver => text.white().bold(),
        Tone::Bronze => text.truecolor(205, 127, 50).bold(),
    }
}

/// Painted pieces of a cell. Highlighted rows carry their background on
/// every piece, since each piece ends with its own reset.
fn painted(cell: &Cell, highlight: bool) -> Vec<ColoredString> {
    let pieces: Vec<ColoredString> = match cell {
        Cell::Text { text, tone } | Cell::Badge { text, tone } => vec![paint(text, *tone)],
        Cell::Badges { items, tone } => items.iter().map(|item| paint(item, *tone)).collect(),
    };

    if highlight {
        pieces.into_iter().map(|piece| piece.on_bright_black()).collect()
    } else {
        pieces
    }
}

fn styled(cell: &Cell, highlight: bool) -> String {
    painted(cell, highlight)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Column widths from headers and unstyled cell text
fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| measure_text_width(h)).collect();

    for row in &table.rows {
        for (i, cell) in row.cells().iter().enumerate() {
            let width = measure_text_width(&cell.text());
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    widths
}

/// Render a table for the terminal: title line, header, rule, rows
pub fn render(table: &Table) -> String {
    let widths = column_widths(table);
    let total = widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1);

    let mut out = String::new();
    out.push_str(&format!(
        "{} {}  {}\n",
        table.icon,
        table.title.bold(),
        format!("({})", table.count_label).dimmed()
    ));

    let header = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad_str(&h.bold().to_string(), *w, Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&"─".repeat(total.max(1)));
    out.push('\n');

    for row in &table.rows {
        let line = match row {
            TableRow::Placeholder(message) => message.dimmed().to_string(),
            TableRow::Record {
                cells, highlight, ..
            } => cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    pad_str(&styled(cell, *highlight), *w, Alignment::Left, None).into_owned()
                })
                .collect::<Vec<_>>()
                .join(GAP),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

pub fn print_table(table: &Table) {
    print!("{}", render(table));
}
