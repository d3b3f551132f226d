//! Quote request data structures matching the calculator form inputs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product the quote is for. Determines which factor dimensions apply
/// and whether pricing runs the multiplicative or the bracketed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// Life cover, priced per 1000 of cover, monthly
    Life,
    /// Medical / gap cover, priced per 1000 of cover, monthly
    Medical,
    /// Motor cover, priced as a percentage of vehicle value, monthly
    Motor,
    /// Home / buildings cover, priced as a percentage of property value, monthly
    Home,
    /// Personal income tax, progressive brackets, annual
    IncomeTax,
    /// Property transfer duty, progressive brackets, once-off
    TransferDuty,
    /// Legal fees, flat-fee brackets by dispute value, once-off
    LegalFee,
}

impl ProductType {
    /// Products priced by walking a bracket schedule rather than
    /// composing multiplicative factors
    pub fn is_bracketed(&self) -> bool {
        matches!(
            self,
            ProductType::IncomeTax | ProductType::TransferDuty | ProductType::LegalFee
        )
    }

    /// Whether the periodic amount is monthly (insurance) as opposed to
    /// annual or once-off (tax, duty, legal)
    pub fn monthly_native(&self) -> bool {
        !self.is_bracketed()
    }

    pub fn uses_age(&self) -> bool {
        matches!(self, ProductType::Life | ProductType::Medical | ProductType::Motor)
    }

    pub fn uses_gender(&self) -> bool {
        matches!(self, ProductType::Life | ProductType::Medical)
    }

    /// Smoking status only loads life and health products
    pub fn uses_smoking(&self) -> bool {
        matches!(self, ProductType::Life | ProductType::Medical)
    }

    /// Insurance products are quoted against a provider panel
    pub fn uses_provider(&self) -> bool {
        matches!(
            self,
            ProductType::Life | ProductType::Medical | ProductType::Motor | ProductType::Home
        )
    }

    pub fn uses_jurisdiction(&self) -> bool {
        matches!(self, ProductType::Motor | ProductType::Home | ProductType::LegalFee)
    }

    /// Urgency loading applies to legal matters only
    pub fn uses_urgency(&self) -> bool {
        matches!(self, ProductType::LegalFee)
    }

    /// Pre-existing condition loading applies to life and health products
    pub fn uses_condition(&self) -> bool {
        matches!(self, ProductType::Life | ProductType::Medical)
    }

    /// Allowed subject age range for products that rate on age
    pub fn age_bounds(&self) -> (u8, u8) {
        match self {
            ProductType::Medical => (18, 75),
            _ => (18, 80),
        }
    }

    /// Parse the key used in CSV files and API requests
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "life" => Some(ProductType::Life),
            "medical" => Some(ProductType::Medical),
            "motor" => Some(ProductType::Motor),
            "home" => Some(ProductType::Home),
            "income-tax" => Some(ProductType::IncomeTax),
            "transfer-duty" => Some(ProductType::TransferDuty),
            "legal-fee" => Some(ProductType::LegalFee),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            ProductType::Life => "life",
            ProductType::Medical => "medical",
            ProductType::Motor => "motor",
            ProductType::Home => "home",
            ProductType::IncomeTax => "income-tax",
            ProductType::TransferDuty => "transfer-duty",
            ProductType::LegalFee => "legal-fee",
        }
    }
}

/// Gender of the person being quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Named boolean flags from the calculator form, each mapping to its own
/// factor or additive term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFlags {
    /// Smoker loading (life/medical)
    #[serde(default)]
    pub smoker: bool,

    /// Urgent matter loading (legal)
    #[serde(default)]
    pub urgent: bool,

    /// Adds the court-fee component (legal)
    #[serde(default)]
    pub court_proceeding: bool,

    /// Existing cover elsewhere; triggers the capped offset
    #[serde(default)]
    pub already_insured: bool,

    /// Pre-existing condition loading (life/medical)
    #[serde(default)]
    pub pre_existing_condition: bool,
}

/// A single quote request as assembled from the calculator form.
/// Recreated on every input change; nothing persists between quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Product being quoted
    pub product: ProductType,

    /// Country/province/city identifier for the jurisdiction factor
    pub jurisdiction: String,

    /// Provider key selecting a row in the provider factor table
    pub provider: String,

    /// Age of the person being quoted
    pub subject_age: u8,

    /// Gender of the person being quoted
    pub gender: Gender,

    /// Cover amount, asset value, income, or dispute value depending on product
    pub monetary_base: f64,

    /// Term in years; multiplies the annual amount for the total projection
    pub term_years: u32,

    /// Named form flags
    #[serde(default)]
    pub flags: QuoteFlags,
}

impl QuoteRequest {
    pub fn new(
        product: ProductType,
        jurisdiction: &str,
        provider: &str,
        subject_age: u8,
        gender: Gender,
        monetary_base: f64,
        term_years: u32,
    ) -> Self {
        Self {
            product,
            jurisdiction: jurisdiction.to_string(),
            provider: provider.to_string(),
            subject_age,
            gender,
            monetary_base,
            term_years,
            flags: QuoteFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: QuoteFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Coerce out-of-domain numeric inputs to safe values (lenient mode).
    /// Non-finite or negative amounts become zero, ages clamp into the
    /// product's bounds, and a zero term becomes one year. Never fails.
    pub fn sanitized(&self) -> Self {
        let mut req = self.clone();

        if !req.monetary_base.is_finite() || req.monetary_base < 0.0 {
            req.monetary_base = 0.0;
        }

        if req.product.uses_age() {
            let (min, max) = req.product.age_bounds();
            req.subject_age = req.subject_age.clamp(min, max);
        }

        if req.term_years == 0 {
            req.term_years = 1;
        }

        req
    }

    /// Reject out-of-domain numeric inputs (strict mode). Key existence
    /// against the rating tables is checked by the engine, not here.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !self.monetary_base.is_finite() {
            return Err(QuoteError::NonFiniteAmount);
        }
        if self.monetary_base < 0.0 {
            return Err(QuoteError::NegativeAmount(self.monetary_base));
        }
        if self.product.uses_age() {
            let (min, max) = self.product.age_bounds();
            if self.subject_age < min || self.subject_age > max {
                return Err(QuoteError::AgeOutOfRange {
                    age: self.subject_age,
                    min,
                    max,
                });
            }
        }
        if self.term_years == 0 {
            return Err(QuoteError::ZeroTerm);
        }
        Ok(())
    }
}

/// How the engine treats out-of-domain input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Coerce to safe defaults and always produce a number.
    /// This is the behavior the live calculators exhibit.
    #[default]
    Lenient,
    /// Surface the same conditions as errors
    Strict,
}

/// Validation failures surfaced in strict mode
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuoteError {
    #[error("monetary base is not a finite number")]
    NonFiniteAmount,

    #[error("monetary base {0} is negative")]
    NegativeAmount(f64),

    #[error("age {age} is outside the allowed range {min}-{max}")]
    AgeOutOfRange { age: u8, min: u8, max: u8 },

    #[error("unknown provider key '{0}'")]
    UnknownProvider(String),

    #[error("unknown jurisdiction key '{0}'")]
    UnknownJurisdiction(String),

    #[error("term must be at least one year")]
    ZeroTerm,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn life_request(age: u8, base: f64) -> QuoteRequest {
        QuoteRequest::new(ProductType::Life, "gauteng", "meridian", age, Gender::Male, base, 10)
    }

    #[test]
    fn test_path_selection() {
        assert!(!ProductType::Life.is_bracketed());
        assert!(!ProductType::Home.is_bracketed());
        assert!(ProductType::IncomeTax.is_bracketed());
        assert!(ProductType::TransferDuty.is_bracketed());
        assert!(ProductType::LegalFee.is_bracketed());
    }

    #[test]
    fn test_dimension_applicability() {
        assert!(ProductType::Life.uses_smoking());
        assert!(!ProductType::Motor.uses_smoking());
        assert!(ProductType::Motor.uses_jurisdiction());
        assert!(!ProductType::IncomeTax.uses_provider());
        assert!(ProductType::LegalFee.uses_urgency());
        assert!(!ProductType::Life.uses_urgency());
    }

    #[test]
    fn test_product_keys_round_trip() {
        for product in [
            ProductType::Life,
            ProductType::Medical,
            ProductType::Motor,
            ProductType::Home,
            ProductType::IncomeTax,
            ProductType::TransferDuty,
            ProductType::LegalFee,
        ] {
            assert_eq!(ProductType::from_key(product.as_key()), Some(product));
        }
        assert_eq!(ProductType::from_key("pet"), None);
    }

    #[test]
    fn test_sanitize_coerces_bad_amounts() {
        assert_eq!(life_request(40, -5000.0).sanitized().monetary_base, 0.0);
        assert_eq!(life_request(40, f64::NAN).sanitized().monetary_base, 0.0);
        assert_eq!(life_request(40, f64::INFINITY).sanitized().monetary_base, 0.0);
        assert_eq!(life_request(40, 250_000.0).sanitized().monetary_base, 250_000.0);
    }

    #[test]
    fn test_sanitize_clamps_age_and_term() {
        let req = life_request(11, 100_000.0).sanitized();
        assert_eq!(req.subject_age, 18);

        let req = life_request(95, 100_000.0).sanitized();
        assert_eq!(req.subject_age, 80);

        let mut req = life_request(40, 100_000.0);
        req.term_years = 0;
        assert_eq!(req.sanitized().term_years, 1);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert_eq!(
            life_request(40, -1.0).validate(),
            Err(QuoteError::NegativeAmount(-1.0))
        );
        assert_eq!(life_request(40, f64::NAN).validate(), Err(QuoteError::NonFiniteAmount));
        assert!(matches!(
            life_request(12, 1000.0).validate(),
            Err(QuoteError::AgeOutOfRange { age: 12, .. })
        ));
        assert!(life_request(40, 1000.0).validate().is_ok());
    }

    #[test]
    fn test_validate_ignores_age_for_bracketed_products() {
        let mut req = life_request(12, 1000.0);
        req.product = ProductType::TransferDuty;
        assert!(req.validate().is_ok());
    }
}
