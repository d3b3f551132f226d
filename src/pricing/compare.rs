//! Provider comparison: the same quote re-run across the provider panel
//!
//! Comparison rows are always recomputed from scratch per provider so a
//! row shows exactly what selecting that provider would quote. The star
//! rating shown next to each row is display-only and has no bearing on
//! the ordering; it is isolated behind `RatingSource` so everything else
//! stays deterministic.

use super::engine::PricingEngine;
use crate::quote::{QuoteError, QuoteRequest};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

/// One alternative provider priced against the same request
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub provider: String,
    pub periodic_amount: f64,
    pub annualized_amount: f64,
    pub total_over_term: f64,
    /// Display-only star rating; not derived from the amounts
    pub rating: f64,
}

/// Source of the display-only rating attached to each comparison row
pub trait RatingSource {
    fn rating_for(&mut self, provider: &str) -> f64;
}

/// Pseudo-random ratings between 3.0 and 5.0 stars, the behavior the
/// live comparison widgets exhibit. Seedable for reproducible output.
pub struct RandomRating {
    rng: ChaCha20Rng,
}

impl RandomRating {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomRating {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingSource for RandomRating {
    fn rating_for(&mut self, _provider: &str) -> f64 {
        self.rng.random_range(30..=50) as f64 / 10.0
    }
}

/// Deterministic placeholder rating for tests and golden output
pub struct FixedRating(pub f64);

impl RatingSource for FixedRating {
    fn rating_for(&mut self, _provider: &str) -> f64 {
        self.0
    }
}

/// Re-run the quote once per alternative provider and sort ascending by
/// annual cost. Products without a provider panel compare to nothing.
pub fn compare_providers(
    engine: &PricingEngine,
    request: &QuoteRequest,
    rating: &mut dyn RatingSource,
) -> Result<Vec<ComparisonRow>, QuoteError> {
    if !request.product.uses_provider() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();

    let providers: Vec<String> = engine
        .tables()
        .provider_factors
        .keys()
        .filter(|key| *key != request.provider)
        .map(|key| key.to_string())
        .collect();

    for provider in providers {
        let mut alternative = request.clone();
        alternative.provider = provider.clone();

        let result = engine.quote(&alternative)?;
        rows.push(ComparisonRow {
            provider,
            periodic_amount: result.periodic_amount,
            annualized_amount: result.annualized_amount,
            total_over_term: result.total_over_term,
            rating: rating.rating_for(&alternative.provider),
        });
    }

    rows.sort_by(|a, b| a.annualized_amount.total_cmp(&b.annualized_amount));

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{Gender, ProductType};

    fn life_request() -> QuoteRequest {
        QuoteRequest::new(
            ProductType::Life,
            "gauteng",
            "meridian",
            40,
            Gender::Male,
            500_000.0,
            15,
        )
    }

    #[test]
    fn test_rows_exclude_the_selected_provider() {
        let engine = PricingEngine::with_defaults();
        let rows = compare_providers(&engine, &life_request(), &mut FixedRating(4.0)).unwrap();

        let panel_size = engine.tables().provider_factors.len();
        assert_eq!(rows.len(), panel_size - 1);
        assert!(rows.iter().all(|row| row.provider != "meridian"));
    }

    #[test]
    fn test_rows_sorted_ascending_by_cost() {
        let engine = PricingEngine::with_defaults();
        let rows = compare_providers(&engine, &life_request(), &mut FixedRating(4.0)).unwrap();

        for pair in rows.windows(2) {
            assert!(pair[0].annualized_amount <= pair[1].annualized_amount);
        }
    }

    #[test]
    fn test_rows_match_a_direct_quote() {
        // Recompute-from-scratch policy: a row must equal the quote the
        // engine would give with that provider selected
        let engine = PricingEngine::with_defaults();
        let request = life_request();
        let rows = compare_providers(&engine, &request, &mut FixedRating(4.0)).unwrap();

        for row in &rows {
            let mut direct = request.clone();
            direct.provider = row.provider.clone();
            let result = engine.quote(&direct).unwrap();
            assert_eq!(row.periodic_amount, result.periodic_amount);
            assert_eq!(row.total_over_term, result.total_over_term);
        }
    }

    #[test]
    fn test_bracketed_products_have_no_panel() {
        let engine = PricingEngine::with_defaults();
        let mut request = life_request();
        request.product = ProductType::TransferDuty;

        let rows = compare_providers(&engine, &request, &mut FixedRating(4.0)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_seeded_ratings_are_reproducible() {
        let engine = PricingEngine::with_defaults();
        let request = life_request();

        let a = compare_providers(&engine, &request, &mut RandomRating::seeded(7)).unwrap();
        let b = compare_providers(&engine, &request, &mut RandomRating::seeded(7)).unwrap();

        let ratings_a: Vec<f64> = a.iter().map(|row| row.rating).collect();
        let ratings_b: Vec<f64> = b.iter().map(|row| row.rating).collect();
        assert_eq!(ratings_a, ratings_b);
        assert!(ratings_a.iter().all(|r| (3.0..=5.0).contains(r)));
    }

    #[test]
    fn test_ratings_do_not_affect_ordering() {
        let engine = PricingEngine::with_defaults();
        let request = life_request();

        let fixed = compare_providers(&engine, &request, &mut FixedRating(1.0)).unwrap();
        let random = compare_providers(&engine, &request, &mut RandomRating::seeded(99)).unwrap();

        let order_fixed: Vec<&str> = fixed.iter().map(|row| row.provider.as_str()).collect();
        let order_random: Vec<&str> = random.iter().map(|row| row.provider.as_str()).collect();
        assert_eq!(order_fixed, order_random);
    }
}
