//! Premium calculator: composes a base rate with resolved factors, or
//! walks a bracket schedule, to produce a full quote

use super::breakdown::QuoteResult;
use super::narrative::narrative_for;
use crate::quote::{Gender, QuoteError, QuoteRequest, ValidationMode};
use crate::tables::{ProductRates, RatingTables};
use serde::{Deserialize, Serialize};

/// Configuration for a pricing engine
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// How out-of-domain input is treated
    pub validation: ValidationMode,
}

impl PricingConfig {
    pub fn strict() -> Self {
        Self {
            validation: ValidationMode::Strict,
        }
    }
}

/// Main pricing engine. Holds the immutable rating tables and is safe to
/// share across calculations; every quote is a pure function of its
/// request plus these tables.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    tables: RatingTables,
    config: PricingConfig,
}

impl PricingEngine {
    /// Create a new engine with given tables and config
    pub fn new(tables: RatingTables, config: PricingConfig) -> Self {
        Self { tables, config }
    }

    /// Engine over the built-in tables in lenient mode
    pub fn with_defaults() -> Self {
        Self::new(RatingTables::default_rates(), PricingConfig::default())
    }

    pub fn tables(&self) -> &RatingTables {
        &self.tables
    }

    pub fn config(&self) -> PricingConfig {
        self.config
    }

    /// Produce a quote for a request.
    ///
    /// In lenient mode this never fails: out-of-domain input is coerced
    /// first, so the calculator always has a number to show. In strict
    /// mode the same conditions surface as `QuoteError`s.
    pub fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteError> {
        let request = match self.config.validation {
            ValidationMode::Lenient => request.sanitized(),
            ValidationMode::Strict => {
                request.validate()?;
                self.check_keys(request)?;
                request.clone()
            }
        };

        log::debug!(
            "quoting {} for base {} via {}",
            request.product.as_key(),
            request.monetary_base,
            request.provider
        );

        if request.product.is_bracketed() {
            Ok(self.bracketed_quote(&request))
        } else {
            Ok(self.multiplicative_quote(&request))
        }
    }

    /// Strict-mode existence checks against the rating tables
    fn check_keys(&self, request: &QuoteRequest) -> Result<(), QuoteError> {
        if request.product.uses_provider() && !self.tables.provider_factors.contains_key(&request.provider) {
            return Err(QuoteError::UnknownProvider(request.provider.clone()));
        }
        if request.product.uses_jurisdiction()
            && !self.tables.jurisdiction_factors.contains_key(&request.jurisdiction)
        {
            return Err(QuoteError::UnknownJurisdiction(request.jurisdiction.clone()));
        }
        Ok(())
    }

    /// Insurance products: base rate times every applicable factor.
    /// Components record each loading as its incremental amount and
    /// reconcile to the monthly premium.
    fn multiplicative_quote(&self, request: &QuoteRequest) -> QuoteResult {
        let rates = self.tables.product_rates(request.product);
        let narrative = narrative_for(request.product, Some(&request.jurisdiction));
        let mut result = QuoteResult::new(request.product, &request.provider, narrative);

        let base = rates.base_periodic(request.monetary_base);
        result.push_component("Base premium", base);
        let mut periodic = base;

        if request.product.uses_age() {
            let factor = self.tables.age_curve.factor_for(request.subject_age);
            apply_loading(&mut result, &mut periodic, "Age loading", factor);
        }
        if request.product.uses_gender() && request.gender == Gender::Male {
            apply_loading(&mut result, &mut periodic, "Gender loading", rates.male_factor);
        }
        if request.product.uses_smoking() && request.flags.smoker {
            apply_loading(&mut result, &mut periodic, "Smoker loading", rates.smoker_factor);
        }
        if request.product.uses_condition() && request.flags.pre_existing_condition {
            apply_loading(&mut result, &mut periodic, "Condition loading", rates.condition_factor);
        }
        if request.product.uses_provider() {
            let factor = self.tables.provider_factors.resolve(&request.provider);
            apply_loading(&mut result, &mut periodic, "Provider adjustment", factor);
        }
        if request.product.uses_jurisdiction() {
            let factor = self.tables.jurisdiction_factors.resolve(&request.jurisdiction);
            apply_loading(&mut result, &mut periodic, "Area adjustment", factor);
        }

        result.periodic_amount = periodic;
        result.annualized_amount = periodic * 12.0;

        let gross = result.annualized_amount * request.term_years as f64;
        let (net, _offset) = apply_offset(gross, &rates, request);
        result.total_over_term = net;

        result
    }

    /// Tax, duty, and legal-fee products: walk the bracket schedule, then
    /// apply multipliers to the total. The amount is annual or once-off
    /// native, so it annualizes to itself. Components reconcile to the
    /// once-off total.
    fn bracketed_quote(&self, request: &QuoteRequest) -> QuoteResult {
        let rates = self.tables.product_rates(request.product);
        let narrative = narrative_for(request.product, Some(&request.jurisdiction));
        let mut result = QuoteResult::new(request.product, &request.provider, narrative);

        let schedule = match self.tables.schedule_for(request.product) {
            Some(schedule) => schedule,
            None => {
                log::warn!("no bracket schedule configured for {}", request.product.as_key());
                return result;
            }
        };

        let scheduled = schedule.amount_for(request.monetary_base);
        result.push_component("Base fee", scheduled);
        let mut amount = scheduled;

        // Multipliers apply to the schedule total, never per band
        if request.product.uses_urgency() && request.flags.urgent {
            apply_loading(&mut result, &mut amount, "Urgency loading", rates.urgency_factor);
        }
        if request.flags.court_proceeding && rates.court_fee > 0.0 {
            amount += rates.court_fee;
            result.push_component("Court fees", rates.court_fee);
        }

        result.periodic_amount = amount;
        result.annualized_amount = amount;

        let gross = result.annualized_amount * request.term_years as f64;
        let (net, offset) = apply_offset(gross, &rates, request);
        if offset > 0.0 {
            result.push_component("Existing cover offset", -offset);
        }
        result.total_over_term = net;

        result
    }
}

/// Multiply the running amount by a factor, recording the increment as a
/// named component. Neutral factors leave no trace.
fn apply_loading(result: &mut QuoteResult, running: &mut f64, label: &'static str, factor: f64) {
    if factor == 1.0 {
        return;
    }
    let delta = *running * (factor - 1.0);
    *running *= factor;
    result.push_component(label, delta);
}

/// Capped offset for existing cover, floored so the net never goes
/// negative. Returns (net, amount actually credited).
fn apply_offset(gross: f64, rates: &ProductRates, request: &QuoteRequest) -> (f64, f64) {
    if !request.flags.already_insured || rates.offset_rate <= 0.0 {
        return (gross, 0.0);
    }
    let offset = (rates.offset_rate * gross).min(rates.offset_ceiling);
    let net = (gross - offset).max(0.0);
    (net, gross - net)
}
