pub mod dashboard;
pub mod fuel_sales;
pub mod health;
