pub mod carry_forward_service;
pub mod dashboard_service;
pub mod export_service;
pub mod sale_computation;
pub mod sale_service;
pub mod summary_service;
