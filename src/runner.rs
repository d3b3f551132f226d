//! Quote runner for efficient repeated quoting
//!
//! Pre-loads rating tables once, then serves many quotes without
//! re-reading CSV files. The live calculators re-quote on every input
//! change, so this is the shape the UI layer holds on to.

use crate::pricing::{
    compare_providers, ComparisonRow, PricingConfig, PricingEngine, QuoteResult, RatingSource,
};
use crate::quote::{QuoteError, QuoteRequest};
use crate::tables::RatingTables;

/// Pre-loaded quote runner
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::from_csv()?;
///
/// // Re-quote as the form changes
/// for request in form_updates {
///     let result = runner.run(&request)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QuoteRunner {
    engine: PricingEngine,
}

impl QuoteRunner {
    /// Create a runner with the built-in tables in lenient mode
    pub fn new() -> Self {
        Self {
            engine: PricingEngine::with_defaults(),
        }
    }

    /// Create a runner by loading tables from CSV files
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_tables(RatingTables::from_csv()?, PricingConfig::default()))
    }

    /// Create a runner from a specific tables directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_tables(
            RatingTables::from_csv_path(path)?,
            PricingConfig::default(),
        ))
    }

    /// Create a runner with pre-built tables
    pub fn with_tables(tables: RatingTables, config: PricingConfig) -> Self {
        Self {
            engine: PricingEngine::new(tables, config),
        }
    }

    /// Run a single quote
    pub fn run(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteError> {
        self.engine.quote(request)
    }

    /// Run quotes for a batch of requests
    pub fn run_batch(&self, requests: &[QuoteRequest]) -> Vec<Result<QuoteResult, QuoteError>> {
        requests.iter().map(|request| self.engine.quote(request)).collect()
    }

    /// Run a quote together with its provider comparison
    pub fn run_with_comparison(
        &self,
        request: &QuoteRequest,
        rating: &mut dyn RatingSource,
    ) -> Result<(QuoteResult, Vec<ComparisonRow>), QuoteError> {
        let result = self.engine.quote(request)?;
        let comparison = compare_providers(&self.engine, request, rating)?;
        Ok((result, comparison))
    }

    /// Get a reference to the underlying engine
    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }
}

impl Default for QuoteRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::FixedRating;
    use crate::quote::{Gender, ProductType};

    fn request() -> QuoteRequest {
        QuoteRequest::new(
            ProductType::Home,
            "western-cape",
            "unity-cover",
            45,
            Gender::Female,
            1_800_000.0,
            20,
        )
    }

    #[test]
    fn test_run_matches_direct_engine_quote() {
        let runner = QuoteRunner::new();
        let direct = PricingEngine::with_defaults().quote(&request()).unwrap();
        let via_runner = runner.run(&request()).unwrap();
        assert_eq!(direct.periodic_amount, via_runner.periodic_amount);
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = QuoteRunner::new();
        let mut second = request();
        second.monetary_base = 900_000.0;

        let results = runner.run_batch(&[request(), second]);
        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        let last = results[1].as_ref().unwrap();
        assert!(first.periodic_amount > last.periodic_amount);
    }

    #[test]
    fn test_run_with_comparison() {
        let runner = QuoteRunner::new();
        let (result, comparison) = runner
            .run_with_comparison(&request(), &mut FixedRating(4.0))
            .unwrap();

        assert!(result.periodic_amount > 0.0);
        assert_eq!(
            comparison.len(),
            runner.engine().tables().provider_factors.len() - 1
        );
    }
}
