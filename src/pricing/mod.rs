//! Pricing engine: premium calculation, provider comparison, narratives

mod breakdown;
mod compare;
mod engine;
mod narrative;

pub use breakdown::{BreakdownComponent, QuoteResult};
pub use compare::{compare_providers, ComparisonRow, FixedRating, RandomRating, RatingSource};
pub use engine::{PricingConfig, PricingEngine};
pub use narrative::{narrative_for, narrative_for_key, Narrative};
