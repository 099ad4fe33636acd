//! # Catalog Record Reader
//!
//! Turns the catalog text file into `BookRecord`s, in file order.
//!
//! ## File Format
//! ```text
//!  "0001062417",  "Early aircraft",                 "Maurice F. Allward", 65.65
//!  "0000255406",  "Shadow maker \"1st edition)\"",  "Rosemary Sullivan",   8.08
//!  └─── isbn ───┘ └────────── title ─────────────┘  └──── author ──────┘  price
//! ```
//!
//! - Three double-quoted strings then a decimal price, comma separated
//! - Whitespace (including newlines) is allowed anywhere between tokens
//! - Inside quotes a backslash escapes the next character: `\"`, `\\`
//! - Records are separated by whitespace; one per line is conventional
//! - Prices with more than two decimals are rounded to the cent
//! - Only a blank ISBN or a negative price is rejected after parsing
//!
//! Any malformed record fails the whole read with the line it starts on.

use std::io::Read;
use std::iter::Peekable;
use std::path::PathBuf;
use std::str::Chars;

use shelf_core::{BookRecord, Money};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Reads every record from `reader`.
pub fn read_records(mut reader: impl Read) -> StoreResult<Vec<BookRecord>> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|source| StoreError::LoadFailure {
            path: PathBuf::from("<stream>"),
            source,
        })?;
    parse_records(&contents)
}

/// Parses every record in `input`.
///
/// ```rust
/// use shelf_store::reader::parse_records;
///
/// let books = parse_records(r#""0000255406", "Shadow maker \"1st edition)\"", "Rosemary Sullivan", 8.08"#).unwrap();
/// assert_eq!(books[0].title(), "Shadow maker \"1st edition)\"");
/// assert_eq!(books[0].price().cents(), 808);
/// ```
pub fn parse_records(input: &str) -> StoreResult<Vec<BookRecord>> {
    let mut parser = RecordParser::new(input);
    let mut records = Vec::new();

    while !parser.at_end() {
        records.push(parser.record()?);
    }

    debug!(count = records.len(), "Parsed catalog records");
    Ok(records)
}

struct RecordParser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> RecordParser<'a> {
    fn new(input: &'a str) -> Self {
        RecordParser {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.next_char();
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.chars.peek().is_none()
    }

    fn record(&mut self) -> StoreResult<BookRecord> {
        self.skip_whitespace();
        let line = self.line;

        let isbn = self.quoted("isbn")?;
        self.comma("isbn")?;
        let title = self.quoted("title")?;
        self.comma("title")?;
        let author = self.quoted("author")?;
        self.comma("author")?;
        let price = self.price()?;

        BookRecord::new(isbn, title, author, price)
            .map_err(|err| StoreError::parse(line, err.to_string()))
    }

    fn quoted(&mut self, field: &str) -> StoreResult<String> {
        self.skip_whitespace();
        match self.next_char() {
            Some('"') => {}
            Some(found) => {
                return Err(StoreError::parse(
                    self.line,
                    format!("expected opening quote for {field}, found '{found}'"),
                ))
            }
            None => {
                return Err(StoreError::parse(
                    self.line,
                    format!("unexpected end of input, expected {field}"),
                ))
            }
        }

        let start_line = self.line;
        let mut value = String::new();
        loop {
            match self.next_char() {
                Some('"') => return Ok(value),
                Some('\\') => match self.next_char() {
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }

        Err(StoreError::parse(
            start_line,
            format!("unterminated quote in {field}"),
        ))
    }

    fn comma(&mut self, after: &str) -> StoreResult<()> {
        self.skip_whitespace();
        match self.next_char() {
            Some(',') => Ok(()),
            Some(found) => Err(StoreError::parse(
                self.line,
                format!("expected ',' after {after}, found '{found}'"),
            )),
            None => Err(StoreError::parse(
                self.line,
                format!("unexpected end of input after {after}"),
            )),
        }
    }

    fn price(&mut self) -> StoreResult<Money> {
        self.skip_whitespace();
        let mut token = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || c == '"' || c == ',' {
                break;
            }
            token.push(c);
            self.next_char();
        }

        if token.is_empty() {
            return Err(StoreError::parse(self.line, "missing price"));
        }
        Money::parse_decimal(&token).map_err(|err| StoreError::parse(self.line, err.to_string()))
    }
}
