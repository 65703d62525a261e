//! Plain-text rendering of a [`View`].
//!
//! Used by the terminal front-end and by tests that want to look at the
//! whole screen at once. Widths are measured in display cells, so wide
//! characters line up.

use std::fmt::Write;

use crate::column::Alignment;
use crate::event::ActionKind;
use crate::text::{display_width, fit, single_line};
use crate::view::{Body, CardView, EmptyState, HeaderCell, PageInfo, TableView, View};

/// Cap for auto-sized columns. Columns with an explicit width ignore it.
pub const MAX_CELL_WIDTH: usize = 40;

const COLUMN_GAP: &str = "  ";

/// Renders the full view: search line, body and pagination footer.
pub fn render_text(view: &View) -> String {
    let mut out = String::new();
    if !view.search.is_empty() {
        let _ = writeln!(out, "Search: {}", view.search);
        out.push('\n');
    }

    match &view.body {
        Body::Loading => out.push_str("Loading...\n"),
        Body::Empty(empty) => render_empty(&mut out, empty),
        Body::Table(table) => render_table(&mut out, table),
        Body::Cards(cards) => render_cards(&mut out, cards),
    }

    if let Some(page) = &view.pagination {
        out.push('\n');
        out.push_str(&footer(page));
        out.push('\n');
    }
    out
}

fn render_empty(out: &mut String, empty: &EmptyState) {
    let _ = writeln!(out, "{}", empty.message());
    if empty.can_clear() {
        out.push_str("Clear search and filters to show all records.\n");
    }
}

fn actions_text(actions: &[ActionKind]) -> String {
    actions
        .iter()
        .map(|action| format!("[{action}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_table(out: &mut String, table: &TableView) {
    let labels: Vec<String> = table.headers.iter().map(HeaderCell::label).collect();
    let mut widths: Vec<usize> = table
        .headers
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, (header, label))| match header.width {
            Some(width) => usize::from(width),
            None => table
                .rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| display_width(&single_line(&cell.text)))
                .chain(std::iter::once(display_width(label)))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH),
        })
        .collect();

    let action_texts: Vec<String> = table.rows.iter().map(|row| actions_text(&row.actions)).collect();
    let mut header_cells: Vec<String> = table
        .headers
        .iter()
        .zip(&labels)
        .zip(&widths)
        .map(|((header, label), &width)| fit(label, width, header.align))
        .collect();
    if table.has_actions {
        let width = action_texts
            .iter()
            .map(|text| display_width(text))
            .chain(std::iter::once(display_width("Actions")))
            .max()
            .unwrap_or(0);
        header_cells.push(fit("Actions", width, Alignment::Left));
        widths.push(width);
    }

    push_line(out, &header_cells.join(COLUMN_GAP));
    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    push_line(out, &"─".repeat(rule_width));

    for (row, actions) in table.rows.iter().zip(&action_texts) {
        let mut cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| fit(&single_line(&cell.text), width, cell.align))
            .collect();
        if table.has_actions {
            cells.push(actions.clone());
        }
        push_line(out, &cells.join(COLUMN_GAP));
    }
}

fn render_cards(out: &mut String, cards: &[CardView]) {
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if card.actions.is_empty() {
            let _ = writeln!(out, "{}", single_line(&card.title));
        } else {
            let _ = writeln!(out, "{}  {}", single_line(&card.title), actions_text(&card.actions));
        }
        for field in &card.primary {
            let _ = writeln!(out, "  {}: {}", field.label, single_line(&field.text));
        }
        match card.disclosure {
            Some(true) => {
                out.push_str("  ▼ Details\n");
                for field in &card.secondary {
                    let _ = writeln!(out, "    {}: {}", field.label, single_line(&field.text));
                }
            }
            Some(false) => {
                let noun = if card.hidden_fields == 1 { "field" } else { "fields" };
                let _ = writeln!(out, "  ▶ {} more {noun}", card.hidden_fields);
            }
            None => {}
        }
    }
}

fn footer(page: &PageInfo) -> String {
    let mut line = format!(
        "Page {} of {} · {} total",
        page.current, page.total_pages, page.total
    );
    if page.show_size_changer {
        let options = page
            .page_size_options
            .iter()
            .map(|size| {
                if *size == page.page_size {
                    format!("[{size}]")
                } else {
                    size.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(line, " · per page: {options}");
    }
    line
}

/// Appends `line` without trailing padding.
fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}
