//! # Receipt Text Parser
//!
//! Heuristic line parser for store receipts, uploaded either as PDF or as
//! plain text.
//!
//! ## Line Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "SUBTOTAL        24.00"      ──► subtotal (first one wins)             │
//! │  "HST 13%          3.12"      ──► tax      (tax / hst / gst / pst)      │
//! │  "TOTAL           27.12"      ──► total                                 │
//! │  "VISA TEND       27.12"      ──► noise, clears pending description     │
//! │  "Apples 3 @ 0.50 1.50"       ──► item, qty 3, unit 0.50, total 1.50    │
//! │  "Bananas x2      1.20"       ──► item, qty 2, unit 0.60, total 1.20    │
//! │  "Milk 2%         3.49 N"     ──► item, qty 1, total 3.49               │
//! │  "Organic Baby"               ──► pending description...                │
//! │  "Spinach         4.99"       ──► ...item "Organic Baby Spinach"        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts always carry two decimals. Anything the heuristics do not
//! recognise is skipped rather than rejected.
//!
//! ## Document Formats
//! Uploads starting with the `%PDF` magic are PDFs: the text of every page
//! is extracted with `lopdf`, one line per text object. Everything else must
//! be UTF-8 text (a leading BOM is ignored).

use std::sync::LazyLock;

use fairshare_core::{LineItem, Money, Receipt};
use lopdf::Document;
use regex::Regex;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF";

/// `2 @ 3.50 7.00`, optionally followed by a one-letter tax flag.
static QTY_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<qty>\d+)\s*@\s*(?P<unit>\d+\.\d{2})\s+(?P<total>\d+\.\d{2})(?:\s*[A-Z])?$")
        .expect("qty-at regex")
});

static MULTIPLIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)x\s*(?P<qty>\d+)").expect("multiplier regex"));

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\d+\.\d{2}").expect("amount regex"));

static INTEGER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("integer-only regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

static SUBTOTAL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)subtotal.*\d+\.\d{2}").expect("subtotal regex"));

static TAX_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(tax|hst|gst|pst).*\d+\.\d{2}").expect("tax regex"));

static TOTAL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)total.*\d+\.\d{2}").expect("total regex"));

/// Lines starting with one of these words are never items.
static NOISE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(change|cash|debit|credit|visa|mastercard|card|approval|terminal|store|manager|walmart|thank|visit|survey|coupon|subtotal|total|tax|hst|gst|pst|balance|tender|auth|appr|invoice|transaction|trans|date|time|sold|qty|item|return|ref|delivery|free delivery|free|tip|driver|service fee|shipping|temporary|adjusted|adjustment)\b",
    )
    .expect("noise regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Receipt document is neither a PDF nor UTF-8 text")]
    NotText,

    #[error("Receipt PDF could not be read: {0}")]
    UnreadablePdf(String),

    #[error("Receipt document contains no line items or totals")]
    NoContent,
}

/// Output of a parse, before the store assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReceipt {
    pub items: Vec<LineItem>,
    pub subtotal: Option<Money>,
    pub tax: Option<Money>,
    pub total: Option<Money>,
}

impl ParsedReceipt {
    fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.subtotal.is_none()
            && self.tax.is_none()
            && self.total.is_none()
    }

    /// Converts into an unsaved [`Receipt`] (blank id).
    pub fn into_receipt(self) -> Receipt {
        Receipt {
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            ..Receipt::new("", self.items)
        }
    }
}

/// Decodes an uploaded document (PDF or UTF-8 text) and parses it.
///
/// PDF extraction is CPU-bound; async callers should run this on a blocking
/// thread.
pub fn parse_document(bytes: &[u8]) -> Result<ParsedReceipt, ParseError> {
    let parsed = if bytes.starts_with(PDF_MAGIC) {
        parse_text(&pdf_text(bytes)?)
    } else {
        let text = std::str::from_utf8(bytes).map_err(|_| ParseError::NotText)?;
        parse_text(text.trim_start_matches('\u{feff}'))
    };

    if parsed.is_empty() {
        return Err(ParseError::NoContent);
    }
    Ok(parsed)
}

/// Text of every page, in page order.
fn pdf_text(bytes: &[u8]) -> Result<String, ParseError> {
    let document =
        Document::load_mem(bytes).map_err(|e| ParseError::UnreadablePdf(e.to_string()))?;
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    document
        .extract_text(&pages)
        .map_err(|e| ParseError::UnreadablePdf(e.to_string()))
}

/// Parses receipt text line by line.
pub fn parse_text(text: &str) -> ParsedReceipt {
    let mut parsed = ParsedReceipt::default();
    let mut pending = String::new();

    for raw in text.lines() {
        let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
        let line: &str = &collapsed;
        if line.is_empty() {
            continue;
        }

        if parsed.subtotal.is_none() && SUBTOTAL_LINE.is_match(line) {
            parsed.subtotal = last_amount(line).map(|(_, amount)| amount);
            continue;
        }
        if parsed.tax.is_none() && TAX_LINE.is_match(line) {
            parsed.tax = last_amount(line).map(|(_, amount)| amount);
            continue;
        }
        if parsed.total.is_none() && TOTAL_LINE.is_match(line) {
            parsed.total = last_amount(line).map(|(_, amount)| amount);
            continue;
        }

        if NOISE_LINE.is_match(line) {
            pending.clear();
            continue;
        }

        if let Some(item) = quantity_at_item(line, &pending) {
            parsed.items.push(item);
            pending.clear();
            continue;
        }

        match last_amount(line) {
            Some((start, price)) => {
                let description = join_description(&pending, &line[..start]);
                pending.clear();
                if let Some(item) = priced_item(description, price) {
                    parsed.items.push(item);
                }
            }
            // Printed amount beyond Money::MAX_AMOUNT: drop the line and
            // whatever description it would have priced.
            None if AMOUNT.is_match(line) => pending.clear(),
            None => {
                if !INTEGER_ONLY.is_match(line) {
                    if !pending.is_empty() {
                        pending.push(' ');
                    }
                    pending.push_str(line);
                }
            }
        }
    }

    parsed
}

/// Start offset and value of the last amount on the line.
fn last_amount(line: &str) -> Option<(usize, Money)> {
    let m = AMOUNT.find_iter(line).last()?;
    let amount = Money::parse_decimal(m.as_str()).ok()?;
    Some((m.start(), amount))
}

fn quantity_at_item(line: &str, pending: &str) -> Option<LineItem> {
    let caps = QTY_AT.captures(line)?;
    let whole = caps.get(0)?;

    let quantity: u32 = caps["qty"].parse().ok()?;
    let unit = Money::parse_decimal(&caps["unit"]).ok()?;
    let total = Money::parse_decimal(&caps["total"]).ok()?;

    let description = join_description(pending, &line[..whole.start()]);
    if description.is_empty() {
        return None;
    }
    Some(LineItem::new(description, quantity, unit, total))
}

/// Builds an item from a description and its line price, honouring an
/// `xN` multiplier. A price with no description at all is dropped.
fn priced_item(description: String, price: Money) -> Option<LineItem> {
    if description.is_empty() {
        return None;
    }

    if let Some(caps) = MULTIPLIER.captures(&description) {
        let quantity = caps["qty"].parse::<u32>().ok().filter(|q| *q > 0);
        if let (Some(quantity), Some(marker)) = (quantity, caps.get(0)) {
            let mut cleaned = String::with_capacity(description.len());
            cleaned.push_str(&description[..marker.start()]);
            cleaned.push(' ');
            cleaned.push_str(&description[marker.end()..]);
            let cleaned = WHITESPACE.replace_all(cleaned.trim(), " ").into_owned();

            return Some(LineItem::new(
                cleaned,
                quantity,
                unit_price(price, quantity),
                price,
            ));
        }
    }

    Some(LineItem::single(description, price))
}

/// Per-unit price rounded to the nearest cent.
fn unit_price(total: Money, quantity: u32) -> Money {
    let q = i64::from(quantity);
    Money::from_cents((total.cents() + q / 2) / q)
}

fn join_description(pending: &str, prefix: &str) -> String {
    let prefix = prefix.trim();
    if pending.is_empty() {
        prefix.to_string()
    } else {
        format!("{} {}", pending, prefix).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_simple_receipt() {
        let parsed = parse_text(
            "WALMART SUPERCENTRE\n\
             Milk 2%        3.49 N\n\
             Bread          2.50\n\
             SUBTOTAL       5.99\n\
             HST 13%        0.78\n\
             TOTAL          6.77\n\
             VISA TEND      6.77\n",
        );

        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0], LineItem::single("Milk 2%", cents(349)));
        assert_eq!(parsed.items[1], LineItem::single("Bread", cents(250)));
        assert_eq!(parsed.subtotal, Some(cents(599)));
        assert_eq!(parsed.tax, Some(cents(78)));
        assert_eq!(parsed.total, Some(cents(677)));
    }

    #[test]
    fn test_quantity_at_line() {
        let parsed = parse_text("Apples 3 @ 0.50 1.50 N");

        assert_eq!(
            parsed.items,
            vec![LineItem::new("Apples", 3, cents(50), cents(150))]
        );
    }

    #[test]
    fn test_multiplier() {
        let parsed = parse_text("Bananas x2 1.25\nEggs X 3 $9.00");

        assert_eq!(parsed.items[0], LineItem::new("Bananas", 2, cents(63), cents(125)));
        assert_eq!(parsed.items[1], LineItem::new("Eggs", 3, cents(300), cents(900)));
    }

    #[test]
    fn test_multiline_description() {
        let parsed = parse_text("Organic Baby\n   Spinach    4.99\n");

        assert_eq!(
            parsed.items,
            vec![LineItem::single("Organic Baby Spinach", cents(499))]
        );
    }

    #[test]
    fn test_noise_line_clears_pending_description() {
        let parsed = parse_text("Organic Baby\nStore #1234\nSpinach 4.99");

        assert_eq!(parsed.items, vec![LineItem::single("Spinach", cents(499))]);
    }

    #[test]
    fn test_bare_numbers_are_ignored() {
        let parsed = parse_text("Cheese\n12345\n7.99\n");

        // The integer is skipped; the bare amount prices the pending description.
        assert_eq!(parsed.items, vec![LineItem::single("Cheese", cents(799))]);

        let parsed = parse_text("4.50\n");
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_first_total_wins() {
        let parsed = parse_text("Tea 3.00\nTOTAL 3.00\nTOTAL 99.00\n");

        assert_eq!(parsed.total, Some(cents(300)));
        assert_eq!(parsed.items.len(), 1);
    }

    #[test]
    fn test_uses_last_amount_on_line() {
        let parsed = parse_text("Coffee 2.00 4.50\nSUBTOTAL 1.00 4.50");

        assert_eq!(parsed.items, vec![LineItem::single("Coffee 2.00", cents(450))]);
        assert_eq!(parsed.subtotal, Some(cents(450)));
    }

    #[test]
    fn test_delivery_and_tip_are_not_items() {
        let parsed = parse_text("Pizza 20.00\nDelivery Fee 3.99\nTip 5.00\nDriver 1.00");

        assert_eq!(parsed.items, vec![LineItem::single("Pizza", cents(2000))]);
    }

    #[test]
    fn test_parse_document_rejects_binary_and_empty() {
        assert_eq!(parse_document(&[0xff, 0xfe, 0x00]), Err(ParseError::NotText));
        assert_eq!(parse_document(b"  \n\n"), Err(ParseError::NoContent));
        assert_eq!(parse_document(b"Thank you for shopping"), Err(ParseError::NoContent));
    }

    #[test]
    fn test_parse_document_extracts_pdf_text() {
        let parsed = parse_document(include_bytes!("../tests/fixtures/receipt.pdf")).unwrap();

        assert_eq!(
            parsed.items,
            vec![
                LineItem::single("Pizza", cents(2000)),
                LineItem::single("Soda", cents(400)),
            ]
        );
        assert_eq!(parsed.subtotal, Some(cents(2400)));
        assert_eq!(parsed.tax, Some(cents(312)));
        assert_eq!(parsed.total, Some(cents(2712)));
    }

    #[test]
    fn test_parse_document_rejects_broken_pdf() {
        assert!(matches!(
            parse_document(b"%PDF-1.4\nnot really a pdf"),
            Err(ParseError::UnreadablePdf(_))
        ));
    }

    #[test]
    fn test_amount_above_max_is_skipped() {
        let parsed = parse_text("Motor\nYacht 500000000000000.00\nTea 3.00\nTOTAL 900000000000000.00");

        assert_eq!(parsed.items, vec![LineItem::single("Tea", cents(300))]);
        assert_eq!(parsed.total, None);
    }

    #[test]
    fn test_into_receipt() {
        let receipt = parse_document("\u{feff}Soda 4.00\nTOTAL 4.52".as_bytes())
            .unwrap()
            .into_receipt();

        assert!(receipt.id.is_empty());
        assert_eq!(receipt.items_total(), cents(400));
        assert_eq!(receipt.total, Some(cents(452)));
        assert_eq!(receipt.subtotal, None);
    }
}
