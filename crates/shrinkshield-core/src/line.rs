//! # Line Item Parser
//!
//! Turns one line of OCR text into a structured [`LineItem`].
//!
//! ```text
//!   "Distilled Water 1 L   $1.29"
//!    └──── name ───┘ └size┘ └price┘
//! ```
//!
//! - The size is the leftmost quantity+unit pair (see [`crate::size`]).
//! - The price is a `d.dd` token, optionally `$`-prefixed, ending the line.
//! - The name is whatever precedes the size, or the price when there is no size.
//!
//! Lines with neither a size nor a price (headers, store addresses) are not
//! items, and neither are summary lines such as `TOTAL 12.40` or `TAX 0.61`.

use std::sync::LazyLock;

use regex::Regex;

use crate::size::find_size;
use crate::types::LineItem;

static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)\$?(\d+\.\d{2})\s*$").expect("price pattern is valid")
});

/// Receipt footer labels that carry an amount but are not products.
const SUMMARY_LABELS: &[&str] = &[
    "total", "subtotal", "sub total", "tax", "change", "cash", "balance", "card", "tender",
];

/// Parses a single OCR text line into a line item.
///
/// ## Example
/// ```rust
/// use shrinkshield_core::line::parse_line_item;
///
/// let item = parse_line_item("Sparkling Water 500 mL 0.89").unwrap();
/// assert_eq!(item.name, "Sparkling Water");
/// assert_eq!(item.size.as_deref(), Some("500 mL"));
/// assert_eq!(item.price, Some(0.89));
/// ```
pub fn parse_line_item(line: &str) -> Option<LineItem> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let size = find_size(line);

    let price = PRICE_PATTERN.captures(line).and_then(|caps| {
        let token = caps.get(1)?;
        // A price may not sit inside the size text
        if let Some(size) = &size {
            if token.start() < size.end {
                return None;
            }
        }
        let value: f64 = token.as_str().parse().ok()?;
        Some((caps.get(0)?.start(), value))
    });

    let name_end = match (&size, &price) {
        (Some(size), _) => size.start,
        (None, Some((start, _))) => *start,
        (None, None) => return None,
    };

    let name = line[..name_end]
        .trim()
        .trim_end_matches(|c: char| c == '-' || c == ',' || c == ':' || c == '(')
        .trim();
    if name.is_empty() || is_summary_label(name) {
        return None;
    }

    Some(LineItem {
        name: name.to_string(),
        size: size.map(|s| line[s.start..s.end].to_string()),
        price: price.map(|(_, value)| value),
    })
}

fn is_summary_label(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUMMARY_LABELS.contains(&lower.trim_end_matches(|c: char| c == '$' || c.is_whitespace()))
}

/// Parses every line, keeping only those that yield an item.
pub fn parse_line_items<'a, I>(lines: I) -> Vec<LineItem>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(parse_line_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_size_and_price() {
        let item = parse_line_item("Distilled Water 1 L   $1.29").unwrap();
        assert_eq!(item.name, "Distilled Water");
        assert_eq!(item.size.as_deref(), Some("1 L"));
        assert_eq!(item.price, Some(1.29));
    }

    #[test]
    fn test_price_only() {
        let item = parse_line_item("Bananas 0.99").unwrap();
        assert_eq!(item.name, "Bananas");
        assert_eq!(item.size, None);
        assert_eq!(item.price, Some(0.99));
    }

    #[test]
    fn test_size_only() {
        let item = parse_line_item("Orange Juice 1.75 L").unwrap();
        assert_eq!(item.name, "Orange Juice");
        assert_eq!(item.size.as_deref(), Some("1.75 L"));
        assert_eq!(item.price, None);
    }

    #[test]
    fn test_unrecognized_unit_falls_back_to_price() {
        let item = parse_line_item("Eggs 12 ct 3.49").unwrap();
        assert_eq!(item.name, "Eggs 12 ct");
        assert_eq!(item.size, None);
        assert_eq!(item.price, Some(3.49));
    }

    #[test]
    fn test_non_item_lines() {
        assert!(parse_line_item("").is_none());
        assert!(parse_line_item("THANK YOU FOR SHOPPING").is_none());
        assert!(parse_line_item("[placeholder OCR] bytes=12 mimetype=image/png").is_none());
        assert!(parse_line_item("$4.99").is_none());
    }

    #[test]
    fn test_summary_lines_are_skipped() {
        assert!(parse_line_item("TOTAL $12.40").is_none());
        assert!(parse_line_item("Subtotal 11.79").is_none());
        assert!(parse_line_item("TAX 0.61").is_none());
        assert!(parse_line_item("Total Cola 2 L 1.99").is_some());
    }

    #[test]
    fn test_glued_price_is_ignored() {
        let item = parse_line_item("Cola 2 L SKU12.99");
        assert_eq!(item.unwrap().price, None);
    }

    #[test]
    fn test_parse_many() {
        let lines = ["MARKET", "Milk 2 L 3.49", "Soda 355 ml 0.75", "TOTAL"];
        let items = parse_line_items(lines);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "Soda");
    }
}
