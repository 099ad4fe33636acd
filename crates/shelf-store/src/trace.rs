//! # Transfer Trace Observers
//!
//! Turns `MoveEvent`s into something a person can follow.
//!
//! ## Table Layout
//! ```text
//! After   3 moves:     Broken Cart            Working Cart           Spare Cart
//!                      ---------------------------------------------------------------------
//!                      Les Mis
//!                      Eat pray love                                 131 Answer Key
//!                      Hunger Games           Like the Animals       Hunger Games Box ...
//!                      =====================================================================
//! ```
//!
//! Columns are always in slot order (source, destination, spare) and stacks
//! are bottom-aligned, so a book visibly hops between columns.

use std::io::Write;

use shelf_core::transfer::{MoveEvent, Snapshot, TraceObserver};
use tracing::{debug, warn};

/// Spaces before the first column.
const MARGIN: usize = 21;

/// Space between columns.
const GUTTER: usize = 3;

/// Renders one snapshot as the classic three-column table.
pub fn render_table(snapshot: &Snapshot, move_number: u64, title_width: usize) -> String {
    let column = title_width + GUTTER;
    let rule_width = column * 3;
    let margin = " ".repeat(MARGIN);
    let mut out = String::new();

    out.push_str(&format!("After {move_number:>3} moves:     "));
    for cart in &snapshot.carts {
        out.push_str(&format!("{:<column$}", cart.label));
    }
    out.push('\n');
    out.push_str(&margin);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    for height in (1..=snapshot.tallest()).rev() {
        out.push_str(&margin);
        for cart in &snapshot.carts {
            let cell = if cart.len() >= height {
                truncate_title(cart.books[cart.len() - height].title(), title_width)
            } else {
                String::new()
            };
            out.push_str(&format!("{cell:<column$}"));
        }
        out.push('\n');
    }

    out.push_str(&margin);
    out.push_str(&"=".repeat(rule_width));
    out.push_str("\n\n\n\n");
    out
}

/// Cuts `title` to `width` characters, ending in "..." when shortened.
pub fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let kept: String = title.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

// =============================================================================
// Table Observer
// =============================================================================

/// Writes a table to `out` before the first move and after every move.
#[derive(Debug)]
pub struct TableObserver<W: Write> {
    out: W,
    title_width: usize,
}

impl<W: Write> TableObserver<W> {
    pub fn new(out: W, title_width: usize) -> Self {
        TableObserver { out, title_width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, snapshot: &Snapshot, move_number: u64) {
        let table = render_table(snapshot, move_number, self.title_width);
        if let Err(err) = self.out.write_all(table.as_bytes()) {
            warn!(error = %err, move_number, "Failed to write transfer trace");
        }
    }
}

impl<W: Write> TraceObserver for TableObserver<W> {
    fn on_start(&mut self, snapshot: &Snapshot) {
        self.write(snapshot, 0);
    }

    fn on_move(&mut self, event: &MoveEvent) {
        self.write(&event.snapshot, event.move_number);
    }
}

// =============================================================================
// Log Observer
// =============================================================================

/// One `debug` event per move.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl TraceObserver for LogObserver {
    fn on_move(&mut self, event: &MoveEvent) {
        debug!(
            move_number = event.move_number,
            isbn = %event.isbn,
            from = %event.from,
            to = %event.to,
            "Transfer move"
        );
    }
}
