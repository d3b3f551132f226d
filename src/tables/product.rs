//! Per-product rate terms: base rates, unit semantics, and flag factors

use crate::quote::ProductType;
use serde::{Deserialize, Serialize};

/// How `monetary_base` converts into units of the base rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitBasis {
    /// Rate applies per 1000 of cover (life, medical)
    PerThousand,
    /// Rate is a straight percentage of the asset value (motor, home)
    PercentOfValue,
    /// No base rate; the product evaluates a bracket schedule instead
    Bracketed,
}

/// Rate terms for one product. Flag factors sit at 1.0 (or a fee of 0)
/// for products the flag does not apply to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductRates {
    /// Monthly rate per unit; unused for bracketed products
    pub base_rate: f64,

    pub unit: UnitBasis,

    /// Male loading where the product rates on gender
    pub male_factor: f64,

    /// Smoker loading (life/medical)
    pub smoker_factor: f64,

    /// Pre-existing condition loading (life/medical)
    pub condition_factor: f64,

    /// Urgent-matter loading applied to the schedule total (legal)
    pub urgency_factor: f64,

    /// Fixed court-fee component added when proceedings are issued (legal)
    pub court_fee: f64,

    /// Fraction of the pre-offset total credited back when cover already
    /// exists elsewhere
    pub offset_rate: f64,

    /// Cap on the already-insured offset, in currency
    pub offset_ceiling: f64,
}

impl ProductRates {
    /// Built-in calibration for each product
    pub fn default_for(product: ProductType) -> Self {
        match product {
            // 0.45 per 1000 of cover per month
            ProductType::Life => Self {
                base_rate: 0.45,
                unit: UnitBasis::PerThousand,
                male_factor: 1.12,
                smoker_factor: 1.60,
                condition_factor: 1.35,
                urgency_factor: 1.0,
                court_fee: 0.0,
                offset_rate: 0.15,
                offset_ceiling: 20_000.0,
            },
            ProductType::Medical => Self {
                base_rate: 0.62,
                unit: UnitBasis::PerThousand,
                male_factor: 1.08,
                smoker_factor: 1.45,
                condition_factor: 1.50,
                urgency_factor: 1.0,
                court_fee: 0.0,
                offset_rate: 0.10,
                offset_ceiling: 10_000.0,
            },
            // ~4.6% of vehicle value per year
            ProductType::Motor => Self {
                base_rate: 0.0038,
                unit: UnitBasis::PercentOfValue,
                male_factor: 1.0,
                smoker_factor: 1.0,
                condition_factor: 1.0,
                urgency_factor: 1.0,
                court_fee: 0.0,
                offset_rate: 0.10,
                offset_ceiling: 15_000.0,
            },
            ProductType::Home => Self {
                base_rate: 0.0011,
                unit: UnitBasis::PercentOfValue,
                male_factor: 1.0,
                smoker_factor: 1.0,
                condition_factor: 1.0,
                urgency_factor: 1.0,
                court_fee: 0.0,
                offset_rate: 0.10,
                offset_ceiling: 10_000.0,
            },
            ProductType::IncomeTax | ProductType::TransferDuty => Self::bracketed_neutral(),
            // Legal-insurance holders get a capped credit against the estimate
            ProductType::LegalFee => Self {
                urgency_factor: 1.50,
                court_fee: 4_500.0,
                offset_rate: 0.30,
                offset_ceiling: 15_000.0,
                ..Self::bracketed_neutral()
            },
        }
    }

    fn bracketed_neutral() -> Self {
        Self {
            base_rate: 0.0,
            unit: UnitBasis::Bracketed,
            male_factor: 1.0,
            smoker_factor: 1.0,
            condition_factor: 1.0,
            urgency_factor: 1.0,
            court_fee: 0.0,
            offset_rate: 0.0,
            offset_ceiling: 0.0,
        }
    }

    /// Base monthly amount before any factor is applied
    pub fn base_periodic(&self, monetary_base: f64) -> f64 {
        match self.unit {
            UnitBasis::PerThousand => monetary_base / 1000.0 * self.base_rate,
            UnitBasis::PercentOfValue => monetary_base * self.base_rate,
            UnitBasis::Bracketed => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_thousand_base() {
        let rates = ProductRates::default_for(ProductType::Life);
        // 1,000,000 of cover at 0.45 per 1000 = 450 per month
        assert!((rates.base_periodic(1_000_000.0) - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_of_value_base() {
        let rates = ProductRates::default_for(ProductType::Motor);
        assert!((rates.base_periodic(250_000.0) - 950.0).abs() < 1e-9);
    }

    #[test]
    fn test_bracketed_products_have_no_base_rate() {
        let rates = ProductRates::default_for(ProductType::TransferDuty);
        assert_eq!(rates.unit, UnitBasis::Bracketed);
        assert_eq!(rates.base_periodic(2_000_000.0), 0.0);
    }

    #[test]
    fn test_legal_fee_loads_urgency_and_court_fee() {
        let rates = ProductRates::default_for(ProductType::LegalFee);
        assert_eq!(rates.urgency_factor, 1.50);
        assert_eq!(rates.court_fee, 4_500.0);

        let life = ProductRates::default_for(ProductType::Life);
        assert_eq!(life.urgency_factor, 1.0);
        assert_eq!(life.court_fee, 0.0);
    }
}
