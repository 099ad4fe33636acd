//! # Checkout Session
//!
//! Walks one customer's books from the shopping cart to a priced receipt.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Empty ──populate_cart()──► Shopping                                   │
//! │                                  │                                      │
//! │                   move_to_working_area()   (TransferEngine, 2^n - 1)    │
//! │                                  ▼                                      │
//! │                             Transferred                                 │
//! │                                  │                                      │
//! │                   drain_to_checkout_line() (pop top ──► back of queue)  │
//! │                                  ▼                                      │
//! │                              Draining                                   │
//! │                                  │                                      │
//! │                              total()       (Catalog::find per book)     │
//! │                                  ▼                                      │
//! │                              Totaled ──► Receipt                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calling a step out of order returns [`CoreError::InvalidSessionState`]
//! and leaves the session untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cart::{Cart, BROKEN_CART_LABEL, SPARE_CART_LABEL, WORKING_CART_LABEL};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::transfer::{transfer, TraceObserver, TransferReport};
use crate::types::BookRecord;

/// The classic shopping trip, heaviest book first so it sits at the bottom.
pub const DEFAULT_SHOPPING_LIST: [(&str, &str); 5] = [
    ("Hunger Games", "9780545310581"),
    ("Eat pray love", "9780399576775"),
    ("Les Mis", "0140444300"),
    ("131 Answer Key", "54782169785"),
    ("Like the Animals", "9780895656926"),
];

/// Builds [`DEFAULT_SHOPPING_LIST`] as unpriced records, in push order.
pub fn default_shopping_list() -> CoreResult<Vec<BookRecord>> {
    DEFAULT_SHOPPING_LIST
        .iter()
        .map(|(title, isbn)| BookRecord::for_shopping(*title, *isbn).map_err(CoreError::from))
        .collect()
}

// =============================================================================
// Session State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing in any cart yet.
    Empty,
    /// Books are in the (broken) shopping cart.
    Shopping,
    /// Books are in the working cart.
    Transferred,
    /// Books are lined up at the counter.
    Draining,
    /// Receipt issued.
    Totaled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Empty => write!(f, "empty"),
            SessionState::Shopping => write!(f, "shopping"),
            SessionState::Transferred => write!(f, "transferred"),
            SessionState::Draining => write!(f, "draining"),
            SessionState::Totaled => write!(f, "totaled"),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// One book at the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReceiptLine {
    /// Found in the catalog; carries the catalog's copy of the record.
    Charged { book: BookRecord },
    /// Unknown ISBN, handed over free of charge.
    NoCharge { isbn: String },
}

impl ReceiptLine {
    /// Price charged for this line.
    pub fn amount(&self) -> Money {
        match self {
            ReceiptLine::Charged { book } => book.price(),
            ReceiptLine::NoCharge { .. } => Money::zero(),
        }
    }

    pub fn isbn(&self) -> &str {
        match self {
            ReceiptLine::Charged { book } => book.isbn(),
            ReceiptLine::NoCharge { isbn } => isbn,
        }
    }
}

impl fmt::Display for ReceiptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptLine::Charged { book } => write!(f, "{book}"),
            ReceiptLine::NoCharge { isbn } => write!(
                f,
                "Description and Price Not Found For \"{isbn}\"! There will be no charge..."
            ),
        }
    }
}

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub session_id: Uuid,
    /// In checkout-line order.
    pub lines: Vec<ReceiptLine>,
    pub amount_due: Money,
    pub completed_at: DateTime<Utc>,
}

impl Receipt {
    pub fn no_charge_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, ReceiptLine::NoCharge { .. }))
            .count()
    }

    pub fn charged_count(&self) -> usize {
        self.lines.len() - self.no_charge_count()
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "Total: {}", self.amount_due)
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

/// One customer's trip through the checkout.
///
/// Borrows the catalog; owns every cart and the checkout line.
#[derive(Debug)]
pub struct CheckoutSession<'a> {
    id: Uuid,
    catalog: &'a Catalog,
    state: SessionState,
    cart: Cart,
    working_area: Cart,
    checkout_line: VecDeque<BookRecord>,
    amount_due: Money,
}

impl<'a> CheckoutSession<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        CheckoutSession {
            id: Uuid::new_v4(),
            catalog,
            state: SessionState::Empty,
            cart: Cart::new(BROKEN_CART_LABEL),
            working_area: Cart::new(WORKING_CART_LABEL),
            checkout_line: VecDeque::new(),
            amount_due: Money::zero(),
        }
    }

    /// Pushes `books` into the cart in order; the first ends at the bottom.
    ///
    /// ## Errors
    /// [`CoreError::InvalidSessionState`] unless the session is `Empty`.
    ///
    /// Any number of books is accepted; moving them later takes `2^n - 1` moves.
    pub fn populate_cart(&mut self, books: impl IntoIterator<Item = BookRecord>) -> CoreResult<()> {
        self.expect_state(SessionState::Empty, "populate the cart")?;

        for book in books {
            self.cart.push(book);
        }
        debug!(session_id = %self.id, count = self.cart.len(), "Cart populated");
        self.state = SessionState::Shopping;
        Ok(())
    }

    /// Moves the whole cart onto the working cart through a fresh spare cart.
    pub fn move_to_working_area(
        &mut self,
        observer: &mut dyn TraceObserver,
    ) -> CoreResult<TransferReport> {
        self.expect_state(SessionState::Shopping, "move books to the working cart")?;

        let mut spare = Cart::new(SPARE_CART_LABEL);
        let report = transfer(
            self.cart.len(),
            &mut self.cart,
            &mut self.working_area,
            &mut spare,
            observer,
        )?;

        info!(
            session_id = %self.id,
            books = report.moved,
            moves = report.moves,
            "Books moved to working cart"
        );
        self.state = SessionState::Transferred;
        Ok(report)
    }

    /// Pops every book off the working cart into the checkout line.
    ///
    /// Returns the number of books now in line.
    pub fn drain_to_checkout_line(&mut self) -> CoreResult<usize> {
        self.expect_state(SessionState::Transferred, "drain to the checkout line")?;

        while let Some(book) = self.working_area.pop() {
            self.checkout_line.push_back(book);
        }

        debug!(session_id = %self.id, count = self.checkout_line.len(), "Checkout line ready");
        self.state = SessionState::Draining;
        Ok(self.checkout_line.len())
    }

    /// Rings up the checkout line against the catalog.
    ///
    /// Unknown ISBNs are not an error: they cost nothing and get a
    /// no-charge line on the receipt.
    pub fn total(&mut self) -> CoreResult<Receipt> {
        self.expect_state(SessionState::Draining, "total")?;

        let catalog = self.catalog;
        let mut lines = Vec::with_capacity(self.checkout_line.len());
        self.amount_due = Money::zero();

        while let Some(item) = self.checkout_line.pop_front() {
            match catalog.find(item.isbn()) {
                Some(record) => {
                    self.amount_due += record.price();
                    info!(
                        isbn = %record.isbn(),
                        title = %record.title(),
                        price = %record.price(),
                        "Charged"
                    );
                    lines.push(ReceiptLine::Charged {
                        book: record.clone(),
                    });
                }
                None => {
                    warn!(isbn = %item.isbn(), "Description and price not found, no charge");
                    lines.push(ReceiptLine::NoCharge {
                        isbn: item.isbn().to_string(),
                    });
                }
            }
        }

        self.state = SessionState::Totaled;
        info!(session_id = %self.id, amount_due = %self.amount_due, "Checkout totaled");

        Ok(Receipt {
            session_id: self.id,
            lines,
            amount_due: self.amount_due,
            completed_at: Utc::now(),
        })
    }

    /// All four steps in order.
    pub fn run(
        &mut self,
        books: impl IntoIterator<Item = BookRecord>,
        observer: &mut dyn TraceObserver,
    ) -> CoreResult<Receipt> {
        self.populate_cart(books)?;
        self.move_to_working_area(observer)?;
        self.drain_to_checkout_line()?;
        self.total()
    }

    // =========================================================================
    // Read-only accessors (copies)
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cart(&self) -> Cart {
        self.cart.clone()
    }

    pub fn working_area(&self) -> Cart {
        self.working_area.clone()
    }

    pub fn checkout_line(&self) -> VecDeque<BookRecord> {
        self.checkout_line.clone()
    }

    pub fn amount_due(&self) -> Money {
        self.amount_due
    }

    fn expect_state(&self, expected: SessionState, operation: &'static str) -> CoreResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CoreError::InvalidSessionState {
                operation,
                current: self.state.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{NoTrace, RecordingObserver};

    fn priced(isbn: &str, cents: i64) -> BookRecord {
        BookRecord::new(isbn, format!("Title {isbn}"), "Author", Money::from_cents(cents)).unwrap()
    }

    fn entry(isbn: &str) -> BookRecord {
        BookRecord::for_shopping(format!("Title {isbn}"), isbn).unwrap()
    }

    fn ab_catalog() -> Catalog {
        Catalog::from_records(vec![priced("A", 1000), priced("B", 500)])
    }

    fn isbns(books: impl IntoIterator<Item = BookRecord>) -> Vec<String> {
        books.into_iter().map(|b| b.isbn().to_string()).collect()
    }

    #[test]
    fn test_full_scenario() {
        let catalog = ab_catalog();
        let mut session = CheckoutSession::new(&catalog);

        // Top to bottom A, C, B means B is pushed first.
        session
            .populate_cart([entry("B"), entry("C"), entry("A")])
            .unwrap();
        assert_eq!(session.state(), SessionState::Shopping);
        assert_eq!(session.cart().isbns_top_down(), ["A", "C", "B"]);

        let report = session.move_to_working_area(&mut NoTrace).unwrap();
        assert_eq!(report.moves, 7);
        assert!(session.cart().is_empty());
        assert_eq!(session.working_area().isbns_top_down(), ["A", "C", "B"]);

        assert_eq!(session.drain_to_checkout_line().unwrap(), 3);
        assert!(session.working_area().is_empty());
        assert_eq!(isbns(session.checkout_line()), ["A", "C", "B"]);

        let receipt = session.total().unwrap();
        assert_eq!(receipt.amount_due, Money::from_cents(1500));
        assert_eq!(session.amount_due(), Money::from_cents(1500));
        assert_eq!(receipt.no_charge_count(), 1);
        assert_eq!(receipt.charged_count(), 2);
        assert_eq!(
            receipt.lines[1],
            ReceiptLine::NoCharge {
                isbn: "C".to_string()
            }
        );
        assert_eq!(receipt.session_id, session.id());
        assert!(session.checkout_line().is_empty());
        assert_eq!(session.state(), SessionState::Totaled);
    }

    #[test]
    fn test_receipt_uses_catalog_copy_of_record() {
        let catalog = ab_catalog();
        let mut session = CheckoutSession::new(&catalog);
        let receipt = session.run([entry("A")], &mut NoTrace).unwrap();

        match &receipt.lines[0] {
            ReceiptLine::Charged { book } => {
                assert_eq!(book.author(), "Author");
                assert_eq!(book.price(), Money::from_cents(1000));
            }
            other => panic!("expected a charged line, got {other:?}"),
        }
    }

    #[test]
    fn test_only_found_prices_are_summed() {
        let catalog = Catalog::from_records(vec![
            priced("111", 199),
            priced("222", 250),
            priced("333", 1),
        ]);
        let mut session = CheckoutSession::new(&catalog);
        let cart = ["111", "404", "222", "405", "333", "111"].map(entry);

        let receipt = session.run(cart, &mut NoTrace).unwrap();

        assert_eq!(receipt.lines.len(), 6);
        assert_eq!(receipt.no_charge_count(), 2);
        assert_eq!(receipt.amount_due, Money::from_cents(199 + 250 + 1 + 199));
        let summed: Money = receipt.lines.iter().map(ReceiptLine::amount).sum();
        assert_eq!(summed, receipt.amount_due);
    }

    #[test]
    fn test_empty_cart() {
        let catalog = ab_catalog();
        let mut session = CheckoutSession::new(&catalog);
        let mut observer = RecordingObserver::new();

        session.populate_cart(Vec::new()).unwrap();
        let report = session.move_to_working_area(&mut observer).unwrap();
        assert_eq!(report.moves, 0);
        assert!(observer.events.is_empty());
        assert_eq!(session.drain_to_checkout_line().unwrap(), 0);

        let receipt = session.total().unwrap();
        assert!(receipt.amount_due.is_zero());
        assert!(receipt.lines.is_empty());
    }

    #[test]
    fn test_steps_out_of_order_are_rejected() {
        let catalog = ab_catalog();
        let mut session = CheckoutSession::new(&catalog);

        assert!(matches!(
            session.total(),
            Err(CoreError::InvalidSessionState { operation: "total", .. })
        ));
        assert!(session.drain_to_checkout_line().is_err());
        assert!(session.move_to_working_area(&mut NoTrace).is_err());
        assert_eq!(session.state(), SessionState::Empty);

        session.populate_cart([entry("A")]).unwrap();
        assert!(session.populate_cart([entry("B")]).is_err());
        assert_eq!(session.cart().len(), 1);

        session.run_to_totaled_for_test();
        assert!(session.total().is_err());
    }

    #[test]
    fn test_large_cart_is_accepted() {
        let catalog = ab_catalog();
        let mut session = CheckoutSession::new(&catalog);
        let books: Vec<BookRecord> = (0..21).map(|i| entry(&i.to_string())).collect();

        let receipt = session.run(books, &mut NoTrace).unwrap();
        assert_eq!(session.state(), SessionState::Totaled);
        assert_eq!(receipt.lines.len(), 21);
        assert_eq!(receipt.no_charge_count(), 21);
        assert_eq!(receipt.lines[0].isbn(), "20");
        assert!(session.working_area().is_empty());
    }

    #[test]
    fn test_accessors_return_copies() {
        let catalog = ab_catalog();
        let mut session = CheckoutSession::new(&catalog);
        session.populate_cart([entry("A"), entry("B")]).unwrap();

        let mut copy = session.cart();
        copy.pop();
        assert_eq!(session.cart().len(), 2);
    }

    #[test]
    fn test_default_shopping_list() {
        let list = default_shopping_list().unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0].title(), "Hunger Games");
        assert_eq!(list[4].isbn(), "9780895656926");

        let catalog = Catalog::from_records(vec![priced("0140444300", 1299)]);
        let mut session = CheckoutSession::new(&catalog);
        let receipt = session.run(list, &mut NoTrace).unwrap();

        // Last pushed is on top, so it is first in line.
        assert_eq!(receipt.lines[0].isbn(), "9780895656926");
        assert_eq!(receipt.amount_due, Money::from_cents(1299));
        assert_eq!(receipt.no_charge_count(), 4);
    }

    #[test]
    fn test_receipt_display_and_json() {
        let catalog = ab_catalog();
        let mut session = CheckoutSession::new(&catalog);
        let receipt = session.run([entry("B"), entry("C"), entry("A")], &mut NoTrace).unwrap();

        let text = receipt.to_string();
        assert!(text.contains("\"A\", \"Title A\", \"Author\", 10.00"));
        assert!(text.contains("Description and Price Not Found For \"C\"! There will be no charge..."));
        assert!(text.ends_with("Total: $15.00"));

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["amount_due"], 1500);
        assert_eq!(json["lines"][1]["kind"], "no_charge");
        assert_eq!(json["lines"][1]["isbn"], "C");
    }

    impl CheckoutSession<'_> {
        fn run_to_totaled_for_test(&mut self) {
            self.move_to_working_area(&mut NoTrace).unwrap();
            self.drain_to_checkout_line().unwrap();
            self.total().unwrap();
        }
    }
}
