pub mod aggregation_service;
pub mod report_service;
pub mod savings_service;
pub mod transaction_service;
