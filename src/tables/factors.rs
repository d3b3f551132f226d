//! Factor tables and the resolution rules applied to raw form inputs
//!
//! Two lookup shapes exist:
//! - exact-match tables keyed by string (provider, jurisdiction)
//! - sampled age curves resolved by nearest key
//!
//! Both resolve misses to the neutral factor 1.0 rather than failing, so a
//! configuration typo degrades the quote instead of breaking the form.

use serde::{Deserialize, Serialize};

/// Exact-match factor table for one rating dimension.
/// Entries keep their insertion order; tables are small enough that a
/// linear scan beats hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorTable {
    /// Dimension name used in log messages ("provider", "jurisdiction")
    name: String,
    entries: Vec<(String, f64)>,
}

impl FactorTable {
    pub fn new(name: &str, entries: Vec<(&str, f64)>) -> Self {
        Self {
            name: name.to_string(),
            entries: entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    pub fn from_rows(name: &str, entries: Vec<(String, f64)>) -> Self {
        Self {
            name: name.to_string(),
            entries,
        }
    }

    /// Look up a key without any fallback
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    /// Resolve a key to its multiplier, falling back to the neutral 1.0
    /// on a miss. The warning is the only trace a typo leaves.
    pub fn resolve(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(factor) => factor,
            None => {
                log::warn!("unknown {} key '{}', using neutral factor 1.0", self.name, key);
                1.0
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Age factor curve sampled at discrete ages.
///
/// Resolution picks the sample age **closest by absolute difference** to
/// the raw input, not a containing range; on an exact tie the first point
/// in table order wins. The factor curve is therefore a step function
/// that jumps halfway between sample ages (age 38 resolves to the 40
/// sample when the points are 35 and 40).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeCurve {
    points: Vec<(u8, f64)>,
}

impl AgeCurve {
    pub fn new(points: Vec<(u8, f64)>) -> Self {
        Self { points }
    }

    /// Resolve the factor for a raw age via nearest sample key.
    /// An empty curve resolves to the neutral factor.
    pub fn factor_for(&self, age: u8) -> f64 {
        let mut best: Option<(u16, f64)> = None;
        for &(sample_age, factor) in &self.points {
            let distance = (sample_age as i16 - age as i16).unsigned_abs();
            match best {
                Some((best_distance, _)) if distance >= best_distance => {}
                _ => best = Some((distance, factor)),
            }
        }
        best.map(|(_, factor)| factor).unwrap_or(1.0)
    }

    /// Sample points in table order
    pub fn points(&self) -> &[(u8, f64)] {
        &self.points
    }

    /// Flat curve resolving every age to 1.0
    pub fn neutral() -> Self {
        Self {
            points: vec![(18, 1.0), (80, 1.0)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_table() -> FactorTable {
        FactorTable::new(
            "provider",
            vec![("meridian", 1.0), ("atlas-mutual", 0.95), ("crestline", 1.08)],
        )
    }

    #[test]
    fn test_exact_lookup() {
        let table = provider_table();
        assert_eq!(table.get("atlas-mutual"), Some(0.95));
        assert_eq!(table.get("nobody"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_neutral() {
        let table = provider_table();
        assert_eq!(table.resolve("crestline"), 1.08);
        assert_eq!(table.resolve("typo-key"), 1.0);
    }

    #[test]
    fn test_keys_preserve_table_order() {
        let table = provider_table();
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["meridian", "atlas-mutual", "crestline"]);
    }

    #[test]
    fn test_nearest_age_resolution() {
        let curve = AgeCurve::new(vec![(30, 1.0), (40, 1.2), (50, 1.5)]);

        assert_eq!(curve.factor_for(30), 1.0);
        assert_eq!(curve.factor_for(33), 1.0); // closer to 30
        assert_eq!(curve.factor_for(38), 1.2); // closer to 40
        assert_eq!(curve.factor_for(41), 1.2); // 40 bucket, not interpolated
        assert_eq!(curve.factor_for(70), 1.5); // beyond the last sample
        assert_eq!(curve.factor_for(18), 1.0); // below the first sample
    }

    #[test]
    fn test_nearest_age_tie_goes_to_first_point() {
        // Age 35 is 5 away from both 30 and 40; first in table order wins
        let curve = AgeCurve::new(vec![(30, 1.0), (40, 1.2)]);
        assert_eq!(curve.factor_for(35), 1.0);

        let reversed = AgeCurve::new(vec![(40, 1.2), (30, 1.0)]);
        assert_eq!(reversed.factor_for(35), 1.2);
    }

    #[test]
    fn test_empty_curve_is_neutral() {
        let curve = AgeCurve::new(vec![]);
        assert_eq!(curve.factor_for(44), 1.0);
    }
}
