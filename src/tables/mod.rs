//! Immutable rating configuration: factor tables, bracket schedules, and
//! per-product rate terms. Built once at startup and shared read-only.

mod brackets;
mod factors;
mod product;
pub mod loader;

pub use brackets::{BracketBand, BracketRule, BracketSchedule};
pub use factors::{AgeCurve, FactorTable};
pub use loader::LoadedTables;
pub use product::{ProductRates, UnitBasis};

use crate::quote::ProductType;
use std::collections::HashMap;
use std::path::Path;

/// Container for every rating dimension the engine resolves against
#[derive(Debug, Clone)]
pub struct RatingTables {
    pub age_curve: AgeCurve,
    pub provider_factors: FactorTable,
    pub jurisdiction_factors: FactorTable,
    pub income_tax_brackets: BracketSchedule,
    pub transfer_duty_brackets: BracketSchedule,
    pub legal_fee_scale: BracketSchedule,
    /// Per-product rate terms; any product missing here falls back to the
    /// built-in calibration
    pub products: HashMap<ProductType, ProductRates>,
}

impl RatingTables {
    /// Built-in tables matching the published calculator calibration
    pub fn default_rates() -> Self {
        Self {
            age_curve: Self::default_age_curve(),
            provider_factors: Self::default_provider_factors(),
            jurisdiction_factors: Self::default_jurisdiction_factors(),
            income_tax_brackets: Self::default_income_tax_brackets(),
            transfer_duty_brackets: Self::default_transfer_duty_brackets(),
            legal_fee_scale: Self::default_legal_fee_scale(),
            products: HashMap::new(),
        }
    }

    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedTables::load_from(path)?;

        Ok(Self {
            age_curve: loaded.age_curve,
            provider_factors: loaded.provider_factors,
            jurisdiction_factors: loaded.jurisdiction_factors,
            income_tax_brackets: loaded.income_tax_brackets,
            transfer_duty_brackets: loaded.transfer_duty_brackets,
            legal_fee_scale: loaded.legal_fee_scale,
            products: HashMap::new(),
        })
    }

    /// Rate terms for a product: an override from `products` if present,
    /// else the built-in calibration
    pub fn product_rates(&self, product: ProductType) -> ProductRates {
        self.products
            .get(&product)
            .copied()
            .unwrap_or_else(|| ProductRates::default_for(product))
    }

    /// Override the rate terms for one product
    pub fn set_product_rates(&mut self, product: ProductType, rates: ProductRates) {
        self.products.insert(product, rates);
    }

    /// Bracket schedule for a bracketed product
    pub fn schedule_for(&self, product: ProductType) -> Option<&BracketSchedule> {
        match product {
            ProductType::IncomeTax => Some(&self.income_tax_brackets),
            ProductType::TransferDuty => Some(&self.transfer_duty_brackets),
            ProductType::LegalFee => Some(&self.legal_fee_scale),
            _ => None,
        }
    }

    /// Age loading sampled every few years; monotonic over the rateable range
    fn default_age_curve() -> AgeCurve {
        AgeCurve::new(vec![
            (18, 0.80),
            (25, 0.85),
            (30, 0.92),
            (35, 1.00),
            (40, 1.12),
            (45, 1.28),
            (50, 1.50),
            (55, 1.78),
            (60, 2.15),
            (65, 2.60),
            (70, 3.20),
            (75, 3.95),
            (80, 4.80),
        ])
    }

    fn default_provider_factors() -> FactorTable {
        FactorTable::new(
            "provider",
            vec![
                ("meridian", 1.00),
                ("atlas-mutual", 0.95),
                ("crestline", 1.08),
                ("southstar", 0.92),
                ("pinnacle-life", 1.15),
                ("unity-cover", 0.98),
            ],
        )
    }

    fn default_jurisdiction_factors() -> FactorTable {
        FactorTable::new(
            "jurisdiction",
            vec![
                ("gauteng", 1.05),
                ("western-cape", 1.00),
                ("kwazulu-natal", 1.08),
                ("eastern-cape", 0.95),
                ("free-state", 0.92),
                ("limpopo", 0.90),
                ("mpumalanga", 0.94),
                ("north-west", 0.93),
                ("northern-cape", 0.88),
            ],
        )
    }

    /// Personal income tax, 2024/25 marginal rates
    fn default_income_tax_brackets() -> BracketSchedule {
        BracketSchedule::marginal(vec![
            (Some(237_100.0), 0.18),
            (Some(370_500.0), 0.26),
            (Some(512_800.0), 0.31),
            (Some(673_000.0), 0.36),
            (Some(857_900.0), 0.39),
            (Some(1_817_000.0), 0.41),
            (None, 0.45),
        ])
    }

    /// Property transfer duty, 2024/25 schedule
    fn default_transfer_duty_brackets() -> BracketSchedule {
        BracketSchedule::marginal(vec![
            (Some(1_100_000.0), 0.0),
            (Some(1_512_500.0), 0.03),
            (Some(2_117_500.0), 0.06),
            (Some(2_722_500.0), 0.08),
            (Some(12_100_000.0), 0.11),
            (None, 0.13),
        ])
    }

    /// Professional fee scale by dispute value
    fn default_legal_fee_scale() -> BracketSchedule {
        BracketSchedule::flat_fee(vec![
            (Some(20_000.0), 3_500.0),
            (Some(100_000.0), 9_500.0),
            (Some(400_000.0), 28_000.0),
            (Some(1_500_000.0), 65_000.0),
            (None, 120_000.0),
        ])
    }
}

impl Default for RatingTables {
    fn default() -> Self {
        Self::default_rates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_age_curve_is_monotonic() {
        let tables = RatingTables::default_rates();
        let points = tables.age_curve.points();
        for pair in points.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 < pair[1].1);
        }
    }

    #[test]
    fn test_default_schedules_are_well_formed() {
        let tables = RatingTables::default_rates();
        assert!(tables.income_tax_brackets.is_well_formed());
        assert!(tables.transfer_duty_brackets.is_well_formed());
        assert!(tables.legal_fee_scale.is_well_formed());
    }

    #[test]
    fn test_schedule_routing() {
        let tables = RatingTables::default_rates();
        assert!(tables.schedule_for(ProductType::IncomeTax).is_some());
        assert!(tables.schedule_for(ProductType::LegalFee).is_some());
        assert!(tables.schedule_for(ProductType::Life).is_none());
    }

    #[test]
    fn test_product_rate_override() {
        let mut tables = RatingTables::default_rates();
        let mut rates = ProductRates::default_for(ProductType::Life);
        rates.base_rate = 0.55;
        tables.set_product_rates(ProductType::Life, rates);

        assert_eq!(tables.product_rates(ProductType::Life).base_rate, 0.55);
        // Other products still use the built-in calibration
        assert_eq!(
            tables.product_rates(ProductType::Medical),
            ProductRates::default_for(ProductType::Medical)
        );
    }

    #[test]
    fn test_income_tax_first_bracket() {
        let tables = RatingTables::default_rates();
        let tax = tables.income_tax_brackets.amount_for(100_000.0);
        assert!((tax - 18_000.0).abs() < 1e-6);
    }
}
