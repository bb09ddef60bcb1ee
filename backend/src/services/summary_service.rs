use crate::models::{FuelSale, Summary};

pub fn summarize(records: &[FuelSale]) -> Summary {
    let total_sales: f64 = records.iter().map(|s| s.total_sale).sum();
    let total_liters_sold: f64 = records.iter().map(|s| s.units_sold).sum();
    let average_sale = if records.is_empty() {
        None
    } else {
        Some(total_sales / records.len() as f64)
    };

    Summary {
        record_count: records.len(),
        total_sales,
        total_liters_sold,
        average_sale,
        total_sales_display: format_amount(total_sales),
        total_liters_display: format_liters(total_liters_sold),
        average_sale_display: average_sale.map(format_amount),
    }
}

/// Liters with two decimals and a unit suffix, e.g. `50.00 L`.
pub fn format_liters(liters: f64) -> String {
    format!("{:.2} L", liters)
}

/// Thousands-grouped amount, e.g. `1,234,567.5`. Fractions are kept only when
/// non-zero and capped at three digits.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let rounded = format!("{:.3}", amount.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && (whole != "0" || !fraction.is_empty()) { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}
