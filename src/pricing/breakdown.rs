//! Quote output structures

use super::narrative::Narrative;
use crate::quote::ProductType;
use serde::Serialize;

/// One named sub-amount of a quote. Multiplicative loadings are recorded
/// as the incremental amount they added, so the components of a quote sum
/// to the amount they reconcile against.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownComponent {
    pub label: &'static str,
    pub amount: f64,
}

/// The full result of one quote calculation. Recomputed from scratch on
/// every input change; nothing is carried over between calculations.
///
/// Components reconcile to `periodic_amount` for monthly products and to
/// the once-off total for bracketed products.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResult {
    pub product: ProductType,
    pub provider: String,

    /// Monthly premium for insurance products; the annual or once-off
    /// amount for bracketed products
    pub periodic_amount: f64,

    /// `periodic_amount * 12` for monthly products, else equal to it
    pub annualized_amount: f64,

    /// `annualized_amount * term_years`, less any already-insured offset,
    /// floored at zero
    pub total_over_term: f64,

    /// Ordered named sub-amounts
    pub components: Vec<BreakdownComponent>,

    /// Canned product-keyed text; independent of the numbers above
    pub narrative: Narrative,
}

impl QuoteResult {
    pub fn new(product: ProductType, provider: &str, narrative: Narrative) -> Self {
        Self {
            product,
            provider: provider.to_string(),
            periodic_amount: 0.0,
            annualized_amount: 0.0,
            total_over_term: 0.0,
            components: Vec::new(),
            narrative,
        }
    }

    pub fn push_component(&mut self, label: &'static str, amount: f64) {
        self.components.push(BreakdownComponent { label, amount });
    }

    /// Sum of all components, for reconciliation checks
    pub fn components_total(&self) -> f64 {
        self.components.iter().map(|c| c.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::narrative::narrative_for;

    #[test]
    fn test_components_total() {
        let mut result = QuoteResult::new(
            ProductType::Life,
            "meridian",
            narrative_for(ProductType::Life, None),
        );
        result.push_component("Base premium", 450.0);
        result.push_component("Age loading", 54.0);
        result.push_component("Existing cover offset", -20.0);

        assert!((result.components_total() - 484.0).abs() < 1e-9);
        assert_eq!(result.components.len(), 3);
        assert_eq!(result.components[1].label, "Age loading");
    }
}
