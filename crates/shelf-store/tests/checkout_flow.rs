//! End-to-end checkout against an in-memory catalog.

use shelf_core::checkout::default_shopping_list;
use shelf_core::transfer::{RecordingObserver, Slot};
use shelf_core::{Catalog, CheckoutSession, Money, ReceiptLine, SessionState};
use shelf_store::reader::{parse_records, read_records};
use shelf_store::trace::TableObserver;

const CATALOG: &str = r#"
"9780545310581", "The Hunger Games",            "Suzanne Collins",   8.99
"0140444300",    "Les Miserables",              "Victor Hugo",      12.50
"9780399576775", "Eat, Pray, Love",             "Elizabeth Gilbert", 15.00
"0001062417",    "Early aircraft",              "Maurice F. Allward", 65.65
"0000255406",    "Shadow maker \"1st edition)\"", "Rosemary Sullivan", 8.08
"#;

fn catalog() -> Catalog {
    Catalog::from_records(parse_records(CATALOG).unwrap())
}

#[test]
fn test_default_list_checkout() {
    let catalog = catalog();
    assert_eq!(catalog.size(), 5);

    let mut session = CheckoutSession::new(&catalog);
    let mut observer = RecordingObserver::new();
    let receipt = session
        .run(default_shopping_list().unwrap(), &mut observer)
        .unwrap();

    assert_eq!(session.state(), SessionState::Totaled);
    assert_eq!(observer.events.len(), 31);
    assert_eq!(observer.start.as_ref().unwrap().cart(Slot::Source).len(), 5);

    // The last book pushed is on top, so it reaches the register first.
    let isbns: Vec<&str> = receipt.lines.iter().map(ReceiptLine::isbn).collect();
    assert_eq!(
        isbns,
        [
            "9780895656926",
            "54782169785",
            "0140444300",
            "9780399576775",
            "9780545310581"
        ]
    );

    assert_eq!(receipt.no_charge_count(), 2);
    assert_eq!(receipt.amount_due, Money::from_cents(899 + 1250 + 1500));
    assert_eq!(receipt.to_string().lines().last(), Some("Total: $36.49"));

    // Charged lines carry the catalog's record, not the shopping list's.
    match &receipt.lines[2] {
        ReceiptLine::Charged { book } => {
            assert_eq!(book.title(), "Les Miserables");
            assert_eq!(book.author(), "Victor Hugo");
        }
        other => panic!("expected a charged line, got {other:?}"),
    }
}

#[test]
fn test_scenario_from_stream() {
    let source = "\"A\", \"Alpha\", \"Ann\", 10.00\n\"B\", \"Beta\", \"Bob\", 5.00\n";
    let catalog = Catalog::from_records(read_records(source.as_bytes()).unwrap());

    let books = ["B", "C", "A"]
        .into_iter()
        .map(|isbn| shelf_core::BookRecord::for_shopping(format!("Book {isbn}"), isbn).unwrap());

    let mut session = CheckoutSession::new(&catalog);
    let mut table = TableObserver::new(Vec::new(), 20);
    let receipt = session.run(books, &mut table).unwrap();

    assert_eq!(receipt.amount_due, Money::from_cents(1500));
    assert_eq!(
        receipt.lines[1].to_string(),
        "Description and Price Not Found For \"C\"! There will be no charge..."
    );

    let trace = String::from_utf8(table.into_inner()).unwrap();
    assert_eq!(trace.matches("moves:").count(), 8);
}

#[test]
fn test_receipt_json() {
    let catalog = catalog();
    let mut session = CheckoutSession::new(&catalog);
    let receipt = session
        .run(default_shopping_list().unwrap(), &mut RecordingObserver::new())
        .unwrap();

    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["lines"][0]["kind"], "no_charge");
    assert_eq!(json["lines"][2]["kind"], "charged");
    assert_eq!(json["session_id"], session.id().to_string());
}
