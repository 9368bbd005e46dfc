pub mod manager;
pub mod record_store;
