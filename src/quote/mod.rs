//! Quote request data structures and batch loading

mod data;
pub mod loader;

pub use data::{Gender, ProductType, QuoteError, QuoteFlags, QuoteRequest, ValidationMode};
pub use loader::{load_default_batch, load_requests, load_requests_from_reader};
