//! # Result Rendering
//!
//! Read-only projection of the calculation service's response: one summary
//! row per calculation entry plus an aggregate block with total area and
//! total price. No validation happens here.

use serde::{Deserialize, Serialize};

/// One per-material calculation returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationEntry {
    pub name: String,
    pub area: f64,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
    pub price: f64,
}

/// Aggregates across all entries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_area: f64,
    pub total_price: f64,
}

/// Sum area and price over all entries
pub fn summarize(entries: &[CalculationEntry]) -> Summary {
    Summary {
        total_area: entries.iter().map(|e| e.area).sum(),
        total_price: entries.iter().map(|e| e.price).sum(),
    }
}

/// Format a price as a zero-decimal KZT amount, ru-KZ style: thousands
/// grouped with non-breaking spaces and a trailing tenge sign.
///
/// ```rust
/// use reno_core::results::format_price;
///
/// assert_eq!(format_price(1234567.0), "1\u{a0}234\u{a0}567\u{a0}₸");
/// ```
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    // NBSP separators every three digits from the right
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{a0}');
        }
        out.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{out}\u{a0}₸")
}

/// Render one result row as display text
pub fn render_entry(entry: &CalculationEntry) -> String {
    let unit = entry.unit.as_deref().unwrap_or("");
    format!(
        "{}\n  Площадь:    {:.2} м²\n  Количество: {:.2} {}\n  Стоимость:  {}",
        entry.name,
        entry.area,
        entry.quantity,
        unit,
        format_price(entry.price)
    )
}

/// Render the aggregate summary block
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Общий итог\n  Общая площадь:   {:.2} м²\n  Общая стоимость: {}",
        summary.total_area,
        format_price(summary.total_price)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, area: f64, price: f64) -> CalculationEntry {
        CalculationEntry {
            name: name.to_string(),
            area,
            quantity: 3.0,
            unit: Some("рулонов".to_string()),
            price,
        }
    }

    #[test]
    fn test_summarize_sums_area_and_price() {
        let entries = vec![entry("Обои", 30.5, 12000.0), entry("Краска", 10.0, 4500.0)];
        let summary = summarize(&entries);
        assert_eq!(summary.total_area, 40.5);
        assert_eq!(summary.total_price, 16500.0);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_area, 0.0);
        assert_eq!(summary.total_price, 0.0);
    }

    #[test]
    fn test_format_price_grouping() {
        assert_eq!(format_price(0.0), "0\u{a0}₸");
        assert_eq!(format_price(999.0), "999\u{a0}₸");
        assert_eq!(format_price(1000.0), "1\u{a0}000\u{a0}₸");
        assert_eq!(format_price(1234567.0), "1\u{a0}234\u{a0}567\u{a0}₸");
    }

    #[test]
    fn test_format_price_rounds_to_zero_decimals() {
        assert_eq!(format_price(1234.49), "1\u{a0}234\u{a0}₸");
        assert_eq!(format_price(1234.5), "1\u{a0}235\u{a0}₸");
    }

    #[test]
    fn test_format_price_negative() {
        assert_eq!(format_price(-1500.0), "-1\u{a0}500\u{a0}₸");
    }

    #[test]
    fn test_entry_deserializes_without_unit() {
        let json = r#"{"name": "Стяжка пола", "area": 12.0, "quantity": 18.5, "price": 9000}"#;
        let entry: CalculationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.unit, None);
        assert_eq!(entry.quantity, 18.5);
    }

    #[test]
    fn test_render_entry_contains_fields() {
        let rendered = render_entry(&entry("Обои", 30.0, 12000.0));
        assert!(rendered.contains("Обои"));
        assert!(rendered.contains("30.00 м²"));
        assert!(rendered.contains("12\u{a0}000\u{a0}₸"));
    }
}
