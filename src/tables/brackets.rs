//! Progressive bracket schedules for tax, duty, and legal-fee products

use serde::{Deserialize, Serialize};

/// How a schedule turns bands into an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketRule {
    /// Each band taxes the slice of value falling inside it at the band's
    /// marginal rate; the result accumulates across bands.
    Marginal,
    /// The band containing the value determines a fixed fee outright.
    FlatFee,
}

/// One band of a schedule. `upper` is the inclusive upper bound of the
/// band; the final band carries `None` and is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketBand {
    pub upper: Option<f64>,
    /// Marginal rate (`Marginal`) or fixed fee (`FlatFee`)
    pub value: f64,
}

/// An ordered bracket schedule. Bounds must be strictly increasing with
/// an unbounded final band; the CSV loader enforces this, built-in
/// schedules are assumed well formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketSchedule {
    rule: BracketRule,
    bands: Vec<BracketBand>,
}

impl BracketSchedule {
    pub fn marginal(bands: Vec<(Option<f64>, f64)>) -> Self {
        Self::build(BracketRule::Marginal, bands)
    }

    pub fn flat_fee(bands: Vec<(Option<f64>, f64)>) -> Self {
        Self::build(BracketRule::FlatFee, bands)
    }

    fn build(rule: BracketRule, bands: Vec<(Option<f64>, f64)>) -> Self {
        Self {
            rule,
            bands: bands
                .into_iter()
                .map(|(upper, value)| BracketBand { upper, value })
                .collect(),
        }
    }

    pub fn rule(&self) -> BracketRule {
        self.rule
    }

    pub fn bands(&self) -> &[BracketBand] {
        &self.bands
    }

    /// Bounds strictly increasing, only the final band unbounded
    pub fn is_well_formed(&self) -> bool {
        if self.bands.is_empty() {
            return false;
        }
        let mut previous = 0.0;
        for (i, band) in self.bands.iter().enumerate() {
            match band.upper {
                Some(upper) => {
                    if i + 1 == self.bands.len() || upper <= previous {
                        return false;
                    }
                    previous = upper;
                }
                None => {
                    if i + 1 != self.bands.len() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Evaluate the schedule for a value. Multipliers (urgency,
    /// complexity) are applied by the caller to this total, never to
    /// individual bands.
    pub fn amount_for(&self, base: f64) -> f64 {
        match self.rule {
            BracketRule::Marginal => self.marginal_amount(base),
            BracketRule::FlatFee => self.flat_fee_amount(base),
        }
    }

    fn marginal_amount(&self, base: f64) -> f64 {
        let mut total = 0.0;
        let mut previous = 0.0;

        for band in &self.bands {
            let upper = band.upper.unwrap_or(f64::INFINITY);
            let taxed = base.min(upper) - previous;
            if taxed <= 0.0 {
                break;
            }
            total += taxed * band.value;
            if base <= upper {
                break;
            }
            previous = upper;
        }

        total
    }

    fn flat_fee_amount(&self, base: f64) -> f64 {
        for band in &self.bands {
            match band.upper {
                Some(upper) if base > upper => continue,
                _ => return band.value,
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transfer-duty style schedule: 0% to 1.1m, 3% to 1.5125m, 6% to 2.1175m
    fn duty_schedule() -> BracketSchedule {
        BracketSchedule::marginal(vec![
            (Some(1_100_000.0), 0.0),
            (Some(1_512_500.0), 0.03),
            (Some(2_117_500.0), 0.06),
            (None, 0.08),
        ])
    }

    #[test]
    fn test_marginal_worked_example() {
        // (1,512,500 - 1,100,000) * 3% + (2,000,000 - 1,512,500) * 6% = 41,625
        let duty = duty_schedule().amount_for(2_000_000.0);
        assert!((duty - 41_625.0).abs() < 1e-6, "duty = {}", duty);
    }

    #[test]
    fn test_marginal_below_first_threshold() {
        assert_eq!(duty_schedule().amount_for(900_000.0), 0.0);
        assert_eq!(duty_schedule().amount_for(0.0), 0.0);
    }

    #[test]
    fn test_marginal_continuity_at_boundary() {
        let schedule = duty_schedule();
        let below = schedule.amount_for(1_512_499.0);
        let at = schedule.amount_for(1_512_500.0);
        let above = schedule.amount_for(1_512_501.0);

        // No jump beyond the marginal amount taxed at the new rate
        assert!(at - below < 0.04, "jump below boundary: {}", at - below);
        assert!(above - at < 0.07, "jump above boundary: {}", above - at);
        assert!(below <= at && at <= above);
    }

    #[test]
    fn test_marginal_top_band_is_unbounded() {
        let schedule = duty_schedule();
        let at_cap = schedule.amount_for(2_117_500.0);
        let past_cap = schedule.amount_for(3_117_500.0);
        assert!((past_cap - at_cap - 1_000_000.0 * 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_flat_fee_uses_containing_band() {
        let scale = BracketSchedule::flat_fee(vec![
            (Some(20_000.0), 3_500.0),
            (Some(100_000.0), 9_000.0),
            (None, 22_000.0),
        ]);

        assert_eq!(scale.amount_for(5_000.0), 3_500.0);
        assert_eq!(scale.amount_for(20_000.0), 3_500.0); // boundary is inclusive
        assert_eq!(scale.amount_for(20_001.0), 9_000.0);
        assert_eq!(scale.amount_for(500_000.0), 22_000.0);
    }

    #[test]
    fn test_well_formed_checks() {
        assert!(duty_schedule().is_well_formed());

        let unordered = BracketSchedule {
            rule: BracketRule::Marginal,
            bands: vec![
                BracketBand { upper: Some(100.0), value: 0.1 },
                BracketBand { upper: Some(50.0), value: 0.2 },
                BracketBand { upper: None, value: 0.3 },
            ],
        };
        assert!(!unordered.is_well_formed());

        let bounded_tail = BracketSchedule {
            rule: BracketRule::Marginal,
            bands: vec![BracketBand { upper: Some(100.0), value: 0.1 }],
        };
        assert!(!bounded_tail.is_well_formed());
    }
}
