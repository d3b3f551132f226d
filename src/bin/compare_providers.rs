//! Print provider comparison grids for representative requests
//!
//! Usage: cargo run --bin compare_providers

use rating_engine::{
    pricing::{compare_providers, PricingConfig, PricingEngine, RandomRating},
    quote::{Gender, ProductType, QuoteFlags, QuoteRequest},
    RatingTables,
};

fn main() {
    env_logger::init();

    let samples = vec![
        (
            "Life cover, 40-year-old non-smoker, R1m",
            QuoteRequest::new(ProductType::Life, "gauteng", "meridian", 40, Gender::Female, 1_000_000.0, 20),
        ),
        (
            "Life cover, 55-year-old smoker, R2m",
            QuoteRequest::new(ProductType::Life, "gauteng", "meridian", 55, Gender::Male, 2_000_000.0, 10)
                .with_flags(QuoteFlags { smoker: true, ..QuoteFlags::default() }),
        ),
        (
            "Motor, R350k vehicle in KZN",
            QuoteRequest::new(ProductType::Motor, "kwazulu-natal", "southstar", 30, Gender::Male, 350_000.0, 1),
        ),
        (
            "Home, R2.4m property in the Western Cape",
            QuoteRequest::new(ProductType::Home, "western-cape", "unity-cover", 45, Gender::Female, 2_400_000.0, 1),
        ),
    ];

    let engine = PricingEngine::new(RatingTables::default_rates(), PricingConfig::default());
    // Seeded so repeated runs print the same grid
    let mut rating = RandomRating::seeded(42);

    for (label, request) in samples {
        println!("\n{}", "=".repeat(60));
        println!("{}", label);
        println!("{}", "=".repeat(60));

        let selected = engine.quote(&request).expect("lenient mode cannot fail");
        println!("  Selected: {:<16} R{:>10.2}/month", request.provider, selected.periodic_amount);

        let rows = compare_providers(&engine, &request, &mut rating)
            .expect("lenient mode cannot fail");

        println!("\n  {:<16} {:>12} {:>12} {:>7}", "Provider", "Monthly", "Annual", "Rating");
        println!("  {}", "-".repeat(51));
        for row in &rows {
            let marker = if row.periodic_amount < selected.periodic_amount { "*" } else { " " };
            println!(
                "  {:<16} {:>12.2} {:>12.2} {:>7.1}{}",
                row.provider, row.periodic_amount, row.annualized_amount, row.rating, marker,
            );
        }
        println!("\n  * cheaper than the selected provider");
    }
}
