pub mod amortization;
pub mod time_value;
pub mod types;
pub mod underwriting;

pub use types::*;
