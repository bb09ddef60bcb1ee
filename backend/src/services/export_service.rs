use chrono::NaiveDate;
use csv::WriterBuilder;

use crate::errors::AppError;
use crate::models::FuelSale;

pub const EXPORT_HEADER: [&str; 6] = [
    "Date",
    "Rate per Liter",
    "Dispenser Open",
    "Dispenser Close",
    "Units Sold",
    "Total Sale",
];

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("fuel-sales-{}.csv", today.format("%Y-%m-%d"))
}

/// Records in export order: oldest date first, same-date records keep their relative order.
pub fn chronological(records: &[FuelSale]) -> Vec<&FuelSale> {
    let mut sorted: Vec<&FuelSale> = records.iter().collect();
    sorted.sort_by_key(|sale| sale.date);
    sorted
}

pub fn export_sales(records: &[FuelSale], today: NaiveDate) -> Result<ExportFile, AppError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for sale in chronological(records) {
        writer.write_record([
            sale.date.format("%Y-%m-%d").to_string(),
            sale.rate_per_liter.to_string(),
            sale.dispenser_open.to_string(),
            sale.dispenser_close.to_string(),
            sale.units_sold.to_string(),
            sale.total_sale.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;

    Ok(ExportFile {
        file_name: export_file_name(today),
        content_type: "text/csv; charset=utf-8",
        bytes,
    })
}
