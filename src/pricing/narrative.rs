//! Canned recommendation and disclosure text keyed by product
//!
//! Narrative text is a pure function of the product (and occasionally the
//! jurisdiction); it never depends on the calculated amounts.

use crate::quote::ProductType;
use serde::Serialize;

/// Explanatory text attached to every quote result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub recommendation: &'static str,
    pub benefits: Vec<&'static str>,
    pub exclusions: Vec<&'static str>,
    pub process: &'static str,
    pub time_estimate: &'static str,
}

impl Narrative {
    /// Fallback entry for anything without its own text
    pub fn generic() -> Self {
        Self {
            recommendation: "Speak to an accredited adviser before committing to this product.",
            benefits: vec!["Indicative estimate based on current published rates"],
            exclusions: vec!["Estimate only; final terms depend on underwriting"],
            process: "Submit your details online and an adviser will confirm the final quote.",
            time_estimate: "1-2 business days",
        }
    }
}

/// Narrative for a product, with an optional jurisdiction overlay.
/// Only court-bound products vary by jurisdiction, and only in the time
/// estimate (busier court rolls in the metro provinces).
pub fn narrative_for(product: ProductType, jurisdiction: Option<&str>) -> Narrative {
    match product {
        ProductType::Life => Narrative {
            recommendation: "Cover of 10-15x annual income is the usual guideline for breadwinners.",
            benefits: vec![
                "Lump sum paid to your beneficiaries",
                "Premiums fixed for the first policy year",
                "Terminal illness benefit included",
            ],
            exclusions: vec![
                "Suicide within the first 24 months",
                "Non-disclosure of material health information",
            ],
            process: "Complete the health questionnaire; most policies issue without medicals.",
            time_estimate: "3-5 business days",
        },
        ProductType::Medical => Narrative {
            recommendation: "Gap cover is worth considering alongside any hospital plan.",
            benefits: vec![
                "Covers the shortfall between scheme rates and specialist billing",
                "Family members on the same scheme can be added",
            ],
            exclusions: vec![
                "Pre-existing conditions during the waiting period",
                "Procedures excluded by the underlying scheme",
            ],
            process: "Provide your scheme membership details and confirm dependants.",
            time_estimate: "2-3 business days",
        },
        ProductType::Motor => Narrative {
            recommendation: "Comprehensive cover is advisable for financed or newer vehicles.",
            benefits: vec![
                "Accident, theft, and third-party liability cover",
                "Approved repairer network",
            ],
            exclusions: vec![
                "Unroadworthy vehicles",
                "Driving under the influence",
                "Unnamed regular drivers",
            ],
            process: "A vehicle inspection may be required before cover starts.",
            time_estimate: "1-2 business days",
        },
        ProductType::Home => Narrative {
            recommendation: "Insure buildings at replacement value, not market value.",
            benefits: vec![
                "Structural damage from fire, storm, and burst geysers",
                "Alternative accommodation while repairs run",
            ],
            exclusions: vec![
                "Wear and tear and gradual deterioration",
                "Defective workmanship",
            ],
            process: "Banks require proof of cover before bond registration.",
            time_estimate: "1-2 business days",
        },
        ProductType::IncomeTax => Narrative {
            recommendation: "Retirement annuity contributions remain the simplest way to reduce taxable income.",
            benefits: vec![
                "Estimate reflects the current year's published brackets",
                "Rebates and medical credits can reduce the final figure",
            ],
            exclusions: vec![
                "Capital gains and fringe benefits are not included in this estimate",
            ],
            process: "File through eFiling; provisional taxpayers submit twice a year.",
            time_estimate: "Assessment usually issues within 21 business days",
        },
        ProductType::TransferDuty => Narrative {
            recommendation: "Budget for duty on top of the purchase price; it cannot be bonded.",
            benefits: vec![
                "No duty below the first threshold",
                "New developments bought from VAT vendors are duty-exempt",
            ],
            exclusions: vec![
                "Conveyancing and bond registration fees are separate",
            ],
            process: "The conveyancer pays duty to the revenue service before transfer lodges.",
            time_estimate: "Transfer typically registers in 8-12 weeks",
        },
        ProductType::LegalFee => {
            let time_estimate = match jurisdiction {
                // Metro court rolls run months longer
                Some("gauteng") | Some("western-cape") => "9-18 months to trial",
                _ => "6-12 months to trial",
            };
            Narrative {
                recommendation: "Attempt mediation before litigating; most disputes settle.",
                benefits: vec![
                    "Fee estimate follows the published tariff for the dispute value",
                    "Cost orders can recover a portion from the losing party",
                ],
                exclusions: vec![
                    "Counsel's fees for senior advocates are quoted separately",
                    "Expert witness costs",
                ],
                process: "Letter of demand, then summons if no settlement follows.",
                time_estimate,
            }
        }
    }
}

/// String-keyed variant used where the product arrives as raw text;
/// unrecognized keys fall back to the generic entry.
pub fn narrative_for_key(product_key: &str, jurisdiction: Option<&str>) -> Narrative {
    match ProductType::from_key(product_key) {
        Some(product) => narrative_for(product, jurisdiction),
        None => Narrative::generic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrative_is_product_keyed() {
        let life = narrative_for(ProductType::Life, None);
        let motor = narrative_for(ProductType::Motor, None);
        assert_ne!(life, motor);
        assert!(!life.benefits.is_empty());
        assert!(!life.exclusions.is_empty());
    }

    #[test]
    fn test_jurisdiction_only_moves_the_time_estimate() {
        let joburg = narrative_for(ProductType::LegalFee, Some("gauteng"));
        let rural = narrative_for(ProductType::LegalFee, Some("limpopo"));

        assert_ne!(joburg.time_estimate, rural.time_estimate);
        assert_eq!(joburg.recommendation, rural.recommendation);
        assert_eq!(joburg.benefits, rural.benefits);
    }

    #[test]
    fn test_jurisdiction_ignored_for_other_products() {
        let a = narrative_for(ProductType::Life, Some("gauteng"));
        let b = narrative_for(ProductType::Life, Some("limpopo"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unrecognized_key_falls_back_to_generic() {
        assert_eq!(narrative_for_key("pet-cover", None), Narrative::generic());
        assert_eq!(
            narrative_for_key("life", None),
            narrative_for(ProductType::Life, None)
        );
    }
}
