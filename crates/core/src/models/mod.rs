pub mod analytics;
pub mod category;
pub mod ledger;
pub mod report;
pub mod savings_goal;
pub mod settings;
pub mod transaction;
