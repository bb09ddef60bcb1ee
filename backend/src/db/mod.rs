pub mod fuel_sale_queries;
