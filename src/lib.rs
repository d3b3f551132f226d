//! Rating Engine - Rate-factor pricing engine for quote calculators
//!
//! This library provides:
//! - Premium and fee estimation for insurance, tax, duty, and legal products
//! - Factor resolution against immutable rating tables (age, provider, area)
//! - Progressive bracket evaluation for tax/duty/fee schedules
//! - Provider comparison with display-only ratings kept out of the math
//! - Lenient (coercing) and strict (rejecting) input validation modes

pub mod quote;
pub mod tables;
pub mod pricing;
pub mod runner;

// Re-export commonly used types
pub use quote::{ProductType, QuoteError, QuoteRequest, ValidationMode};
pub use tables::RatingTables;
pub use pricing::{PricingConfig, PricingEngine, QuoteResult, ComparisonRow};
pub use runner::QuoteRunner;
