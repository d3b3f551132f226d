//! Price an entire batch of quote requests from CSV
//!
//! Outputs one row per request for comparison with the published
//! calculator pages

use clap::Parser;
use rating_engine::{
    pricing::{PricingConfig, PricingEngine, QuoteResult},
    quote::{load_requests, QuoteRequest},
    RatingTables,
};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Price a batch of quote requests from CSV")]
struct Args {
    /// Input CSV of quote requests
    #[arg(long, default_value = "data/quote_batch.csv")]
    input: String,

    /// Output CSV path
    #[arg(long, default_value = "quote_output.csv")]
    output: String,

    /// Directory of rating table CSVs (built-in calibration when omitted)
    #[arg(long)]
    tables: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    println!("Loading requests from {}...", args.input);
    let requests: Vec<QuoteRequest> =
        load_requests(&args.input).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let tables = match &args.tables {
        Some(dir) => RatingTables::from_csv_path(Path::new(dir)).map_err(|e| anyhow::anyhow!("{e}"))?,
        None => RatingTables::default_rates(),
    };
    let engine = PricingEngine::new(tables, PricingConfig::default());

    println!("Pricing...");
    let pricing_start = Instant::now();

    // Lenient mode never fails, so every request produces a row
    let results: Vec<QuoteResult> = requests
        .par_iter()
        .map(|request| engine.quote(request).expect("lenient mode cannot fail"))
        .collect();

    println!("Priced {} requests in {:?}", results.len(), pricing_start.elapsed());

    let mut file = File::create(&args.output)?;
    writeln!(file, "Product,Provider,Jurisdiction,MonetaryBase,Monthly,Annual,TermTotal")?;

    for (request, result) in requests.iter().zip(&results) {
        writeln!(
            file,
            "{},{},{},{:.2},{:.2},{:.2},{:.2}",
            request.product.as_key(),
            request.provider,
            request.jurisdiction,
            request.monetary_base,
            result.periodic_amount,
            result.annualized_amount,
            result.total_over_term,
        )?;
    }

    println!("Output written to {}", args.output);

    // Summary stats
    let total_monthly: f64 = results.iter().map(|r| r.periodic_amount).sum();
    let total_term: f64 = results.iter().map(|r| r.total_over_term).sum();
    println!("\nBatch Summary:");
    println!("  Requests:        {}", results.len());
    println!("  Total monthly:   R{:.2}", total_monthly);
    println!("  Total over term: R{:.2}", total_term);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
