//! Rating Engine CLI
//!
//! Command-line walkthrough of a single quote with its provider comparison

use rating_engine::{
    PricingConfig, PricingEngine, RatingTables,
    pricing::{compare_providers, RandomRating},
    quote::{Gender, ProductType, QuoteFlags, QuoteRequest},
};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("Rating Engine v0.1.0");
    println!("====================\n");

    // Sample request - life cover, male smoker, age 47
    let request = QuoteRequest::new(
        ProductType::Life,
        "gauteng",
        "meridian",
        47,
        Gender::Male,
        1_500_000.0,          // cover amount
        15,                   // term years
    )
    .with_flags(QuoteFlags {
        smoker: true,
        ..QuoteFlags::default()
    });

    println!("Request: {}", request.product.as_key());
    println!("  Provider: {}", request.provider);
    println!("  Age: {}", request.subject_age);
    println!("  Gender: {:?}", request.gender);
    println!("  Cover: R{:.2}", request.monetary_base);
    println!("  Term: {} years", request.term_years);
    println!();

    let engine = PricingEngine::new(RatingTables::default_rates(), PricingConfig::default());
    let result = engine.quote(&request).expect("lenient mode cannot fail");

    println!("Quote:");
    println!("  Monthly premium:  R{:>12.2}", result.periodic_amount);
    println!("  Annual premium:   R{:>12.2}", result.annualized_amount);
    println!("  Total over term:  R{:>12.2}", result.total_over_term);
    println!();

    println!("Breakdown:");
    println!("{:<24} {:>12}", "Component", "Amount");
    println!("{}", "-".repeat(37));
    for component in &result.components {
        println!("{:<24} {:>12.2}", component.label, component.amount);
    }
    println!();

    // Comparison across the rest of the provider panel
    let mut rating = RandomRating::new();
    let comparison = compare_providers(&engine, &request, &mut rating)
        .expect("lenient mode cannot fail");

    println!("Provider comparison ({} alternatives):", comparison.len());
    println!("{:<16} {:>12} {:>12} {:>14} {:>7}",
        "Provider", "Monthly", "Annual", "Term Total", "Rating");
    println!("{}", "-".repeat(65));
    for row in &comparison {
        println!("{:<16} {:>12.2} {:>12.2} {:>14.2} {:>7.1}",
            row.provider,
            row.periodic_amount,
            row.annualized_amount,
            row.total_over_term,
            row.rating,
        );
    }

    // Write comparison to CSV
    let csv_path = "comparison_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");

    writeln!(file, "Provider,Monthly,Annual,TermTotal,Rating").unwrap();
    for row in &comparison {
        writeln!(file, "{},{:.2},{:.2},{:.2},{:.1}",
            row.provider,
            row.periodic_amount,
            row.annualized_amount,
            row.total_over_term,
            row.rating,
        ).unwrap();
    }

    println!("\nComparison written to: {}", csv_path);

    println!("\nGuidance: {}", result.narrative.recommendation);
    println!("Turnaround: {}", result.narrative.time_estimate);
}
