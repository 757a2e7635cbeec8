pub mod state;
pub mod store_errors;
