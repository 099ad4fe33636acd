//! # Transfer Engine
//!
//! Moves books from one cart to another, one book at a time, through a
//! spare cart, so that they arrive in the same order they left.
//!
//! ## The Algorithm
//! ```text
//! carefully_move(n, from, to, via):
//!     if n == 1:
//!         move top book  from ──► to
//!     else:
//!         carefully_move(n-1, from, via, to)   // clear the way
//!         move top book  from ──► to           // the bottom-most book
//!         carefully_move(n-1, via, to, from)   // stack the rest back on
//! ```
//!
//! Each recursive level reverses the order once on the way to `via` and
//! once more on the way to `to`, so the net order is preserved. The cost is
//! exactly `2^n - 1` single-book moves; that count is part of the contract.
//!
//! ## Stable Slots For Tracing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Outermost call binds carts to slots ONCE:                              │
//! │                                                                         │
//! │     Slot::Source ──► &mut broken_cart                                   │
//! │     Slot::Destination ──► &mut working_cart                             │
//! │     Slot::Spare ──► &mut spare_cart                                     │
//! │                                                                         │
//! │  Recursive calls shuffle which slot plays `from` / `to` / `via`, but    │
//! │  snapshots are always taken in Slot order, so a trace reader sees the   │
//! │  same three columns on every move.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::cart::{Cart, CartSnapshot};
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Slots
// =============================================================================

/// Canonical identity of a cart for the duration of one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Source,
    Destination,
    Spare,
}

impl Slot {
    /// Display order of the three carts.
    pub const ALL: [Slot; 3] = [Slot::Source, Slot::Destination, Slot::Spare];

    const fn index(self) -> usize {
        match self {
            Slot::Source => 0,
            Slot::Destination => 1,
            Slot::Spare => 2,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Source => write!(f, "source"),
            Slot::Destination => write!(f, "destination"),
            Slot::Spare => write!(f, "spare"),
        }
    }
}

// =============================================================================
// Trace Events
// =============================================================================

/// All three carts, in [`Slot::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub carts: [CartSnapshot; 3],
}

impl Snapshot {
    pub fn cart(&self, slot: Slot) -> &CartSnapshot {
        &self.carts[slot.index()]
    }

    /// Height of the tallest cart.
    pub fn tallest(&self) -> usize {
        self.carts.iter().map(CartSnapshot::len).max().unwrap_or(0)
    }
}

/// Emitted after every single-book move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// 1-based; the state before the first move is reported via `on_start`.
    pub move_number: u64,
    pub isbn: String,
    pub from: Slot,
    pub to: Slot,
    pub snapshot: Snapshot,
}

/// Receives transfer progress.
pub trait TraceObserver {
    /// When false the engine skips building snapshots entirely.
    fn is_enabled(&self) -> bool {
        true
    }

    /// State before the first move (move 0).
    fn on_start(&mut self, _snapshot: &Snapshot) {}

    fn on_move(&mut self, event: &MoveEvent);
}

/// Tracing switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceObserver for NoTrace {
    fn is_enabled(&self) -> bool {
        false
    }

    fn on_move(&mut self, _event: &MoveEvent) {}
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub start: Option<Snapshot>,
    pub events: Vec<MoveEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceObserver for RecordingObserver {
    fn on_start(&mut self, snapshot: &Snapshot) {
        self.start = Some(snapshot.clone());
    }

    fn on_move(&mut self, event: &MoveEvent) {
        self.events.push(event.clone());
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Outcome of a completed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    /// Books that ended up in the destination.
    pub moved: usize,
    /// Single-book moves performed, always `2^moved - 1`.
    pub moves: u64,
}

/// `2^count - 1`, or `None` when that does not fit in a u64.
pub fn minimum_moves(count: usize) -> Option<u64> {
    let exponent = u32::try_from(count).ok()?;
    1u64.checked_shl(exponent).map(|power| power - 1)
}

/// Moves `count` books from the top of `source` onto `destination`,
/// using `spare` as the holding area.
///
/// ## Errors
/// [`CoreError::TransferExceedsSource`] when `count > source.len()`. The
/// check runs before the first move, so the carts are untouched.
///
/// ```rust
/// use shelf_core::cart::Cart;
/// use shelf_core::transfer::{transfer, NoTrace};
/// use shelf_core::BookRecord;
///
/// let books = ["3", "2", "1"].map(|isbn| BookRecord::for_shopping("Book", isbn).unwrap());
/// let mut source = Cart::with_books("Broken Cart", books);
/// let mut destination = Cart::new("Working Cart");
/// let mut spare = Cart::new("Spare Cart");
///
/// let report = transfer(3, &mut source, &mut destination, &mut spare, &mut NoTrace).unwrap();
/// assert_eq!(report.moves, 7);
/// assert_eq!(destination.isbns_top_down(), ["1", "2", "3"]);
/// ```
pub fn transfer(
    count: usize,
    source: &mut Cart,
    destination: &mut Cart,
    spare: &mut Cart,
    observer: &mut dyn TraceObserver,
) -> CoreResult<TransferReport> {
    TransferEngine::new(source, destination, spare, observer).run(count)
}

/// Three carts bound to fixed slots plus a move counter.
pub struct TransferEngine<'c, 'o> {
    carts: [&'c mut Cart; 3],
    observer: &'o mut dyn TraceObserver,
    moves: u64,
}

impl<'c, 'o> TransferEngine<'c, 'o> {
    pub fn new(
        source: &'c mut Cart,
        destination: &'c mut Cart,
        spare: &'c mut Cart,
        observer: &'o mut dyn TraceObserver,
    ) -> Self {
        TransferEngine {
            carts: [source, destination, spare],
            observer,
            moves: 0,
        }
    }

    /// Runs the transfer from `Slot::Source` to `Slot::Destination`.
    pub fn run(mut self, count: usize) -> CoreResult<TransferReport> {
        let available = self.carts[Slot::Source.index()].len();
        if count > available {
            return Err(CoreError::TransferExceedsSource {
                requested: count,
                available,
            });
        }

        debug!(count, "Starting cart transfer");
        if self.observer.is_enabled() {
            let snapshot = self.snapshot();
            self.observer.on_start(&snapshot);
        }

        self.carefully_move(count, Slot::Source, Slot::Destination, Slot::Spare);

        debug!(count, moves = self.moves, "Cart transfer complete");
        Ok(TransferReport {
            moved: count,
            moves: self.moves,
        })
    }

    fn carefully_move(&mut self, count: usize, from: Slot, to: Slot, via: Slot) {
        match count {
            0 => {}
            1 => self.move_top(from, to),
            _ => {
                self.carefully_move(count - 1, from, via, to);
                self.move_top(from, to);
                self.carefully_move(count - 1, via, to, from);
            }
        }
    }

    fn move_top(&mut self, from: Slot, to: Slot) {
        // `run` checked the source height, so every pop here has a book.
        let Some(book) = self.carts[from.index()].pop() else {
            return;
        };
        self.moves += 1;
        trace!(move_number = self.moves, isbn = %book.isbn(), %from, %to, "Moved book");

        self.carts[to.index()].push(book);

        if self.observer.is_enabled() {
            let isbn = self.carts[to.index()]
                .top()
                .map(|moved| moved.isbn().to_string())
                .unwrap_or_default();
            let event = MoveEvent {
                move_number: self.moves,
                isbn,
                from,
                to,
                snapshot: self.snapshot(),
            };
            self.observer.on_move(&event);
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            carts: [
                self.carts[0].snapshot(),
                self.carts[1].snapshot(),
                self.carts[2].snapshot(),
            ],
        }
    }
}

impl fmt::Debug for TransferEngine<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferEngine")
            .field("carts", &self.carts)
            .field("moves", &self.moves)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{BROKEN_CART_LABEL, SPARE_CART_LABEL, WORKING_CART_LABEL};
    use crate::types::BookRecord;

    /// Builds a source cart whose top-to-bottom ISBNs are `isbns`.
    fn carts_with(isbns: &[&str]) -> (Cart, Cart, Cart) {
        let books = isbns
            .iter()
            .rev()
            .map(|isbn| BookRecord::for_shopping(format!("Title {isbn}"), *isbn).unwrap());
        (
            Cart::with_books(BROKEN_CART_LABEL, books),
            Cart::new(WORKING_CART_LABEL),
            Cart::new(SPARE_CART_LABEL),
        )
    }

    fn numbered(n: usize) -> Vec<String> {
        (1..=n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_transfer_preserves_order_for_every_size() {
        for n in 0..=10 {
            let names = numbered(n);
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut source, mut destination, mut spare) = carts_with(&refs);

            let report =
                transfer(n, &mut source, &mut destination, &mut spare, &mut NoTrace).unwrap();

            assert!(source.is_empty(), "n={n}");
            assert!(spare.is_empty(), "n={n}");
            assert_eq!(destination.isbns_top_down(), names, "n={n}");
            assert_eq!(report.moved, n);
            assert_eq!(Some(report.moves), minimum_moves(n), "n={n}");
        }
    }

    #[test]
    fn test_three_books_double_inversion_cancels() {
        let (mut source, mut destination, mut spare) = carts_with(&["x1", "x2", "x3"]);
        let mut observer = RecordingObserver::new();

        let report =
            transfer(3, &mut source, &mut destination, &mut spare, &mut observer).unwrap();

        assert_eq!(report.moves, 7);
        assert_eq!(destination.isbns_top_down(), ["x1", "x2", "x3"]);
        assert_eq!(observer.events.len(), 7);
    }

    #[test]
    fn test_zero_books_makes_no_moves() {
        let (mut source, mut destination, mut spare) = carts_with(&[]);
        let mut observer = RecordingObserver::new();

        let report =
            transfer(0, &mut source, &mut destination, &mut spare, &mut observer).unwrap();

        assert_eq!(report.moves, 0);
        assert!(observer.events.is_empty());
        assert!(observer.start.is_some());
    }

    #[test]
    fn test_partial_transfer_leaves_rest_in_source() {
        let (mut source, mut destination, mut spare) = carts_with(&["a", "b", "c", "d"]);

        let report =
            transfer(2, &mut source, &mut destination, &mut spare, &mut NoTrace).unwrap();

        assert_eq!(report.moves, 3);
        assert_eq!(destination.isbns_top_down(), ["a", "b"]);
        assert_eq!(source.isbns_top_down(), ["c", "d"]);
        assert!(spare.is_empty());
    }

    #[test]
    fn test_count_larger_than_source_fails_without_moving() {
        let (mut source, mut destination, mut spare) = carts_with(&["a", "b"]);
        let mut observer = RecordingObserver::new();

        let err = transfer(3, &mut source, &mut destination, &mut spare, &mut observer)
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::TransferExceedsSource {
                requested: 3,
                available: 2
            }
        ));
        assert_eq!(source.isbns_top_down(), ["a", "b"]);
        assert!(destination.is_empty());
        assert!(spare.is_empty());
        assert!(observer.start.is_none());
        assert!(observer.events.is_empty());
    }

    #[test]
    fn test_snapshots_keep_canonical_order() {
        let (mut source, mut destination, mut spare) = carts_with(&["1", "2", "3", "4"]);
        let mut observer = RecordingObserver::new();

        transfer(4, &mut source, &mut destination, &mut spare, &mut observer).unwrap();

        let start = observer.start.as_ref().unwrap();
        assert_eq!(start.cart(Slot::Source).len(), 4);

        for (i, event) in observer.events.iter().enumerate() {
            assert_eq!(event.move_number, i as u64 + 1);
            let labels: Vec<&str> = event
                .snapshot
                .carts
                .iter()
                .map(|c| c.label.as_str())
                .collect();
            assert_eq!(labels, ["Broken Cart", "Working Cart", "Spare Cart"]);
            let total: usize = event.snapshot.carts.iter().map(CartSnapshot::len).sum();
            assert_eq!(total, 4);
            assert_eq!(
                event.snapshot.cart(event.to).books[0].isbn(),
                event.isbn,
                "moved book lands on top of its destination"
            );
        }

        let last = observer.events.last().unwrap();
        assert_eq!(last.snapshot.cart(Slot::Destination).len(), 4);
        assert!(last.snapshot.cart(Slot::Spare).is_empty());
    }

    #[test]
    fn test_no_book_ever_lands_on_one_that_started_above_it() {
        let names = numbered(6);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (mut source, mut destination, mut spare) = carts_with(&refs);
        let mut observer = RecordingObserver::new();

        transfer(6, &mut source, &mut destination, &mut spare, &mut observer).unwrap();

        // ISBN "k" started at depth k-1; top-to-bottom depths must increase.
        for event in &observer.events {
            for cart in &event.snapshot.carts {
                let depths: Vec<u32> = cart
                    .books
                    .iter()
                    .map(|b| b.isbn().parse().unwrap())
                    .collect();
                assert!(
                    depths.windows(2).all(|w| w[0] < w[1]),
                    "move {}: {} holds {:?}",
                    event.move_number,
                    cart.label,
                    depths
                );
            }
        }
    }

    #[test]
    fn test_minimum_moves() {
        assert_eq!(minimum_moves(0), Some(0));
        assert_eq!(minimum_moves(1), Some(1));
        assert_eq!(minimum_moves(5), Some(31));
        assert_eq!(minimum_moves(63), Some(u64::MAX >> 1));
        assert_eq!(minimum_moves(64), None);
    }

    #[test]
    fn test_disabled_observer_sees_nothing() {
        struct Counting(u32);
        impl TraceObserver for Counting {
            fn is_enabled(&self) -> bool {
                false
            }
            fn on_start(&mut self, _snapshot: &Snapshot) {
                self.0 += 1;
            }
            fn on_move(&mut self, _event: &MoveEvent) {
                self.0 += 1;
            }
        }

        let (mut source, mut destination, mut spare) = carts_with(&["a", "b"]);
        let mut counting = Counting(0);
        transfer(2, &mut source, &mut destination, &mut spare, &mut counting).unwrap();
        assert_eq!(counting.0, 0);
    }
}
