//! AWS Lambda handler for the quote calculators
//!
//! Accepts a quote request via JSON and returns the priced result along
//! with its provider comparison.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rating_engine::{
    pricing::{compare_providers, ComparisonRow, PricingConfig, PricingEngine, QuoteResult, RandomRating},
    quote::{Gender, ProductType, QuoteFlags, QuoteRequest, ValidationMode},
    RatingTables,
};
use serde::{Deserialize, Serialize};

/// Input for a quote
#[derive(Debug, Deserialize)]
pub struct QuoteApiRequest {
    /// Product key: life, medical, motor, home, income-tax, transfer-duty, legal-fee
    pub product: String,

    #[serde(default)]
    pub jurisdiction: String,

    #[serde(default)]
    pub provider: String,

    #[serde(default = "default_age")]
    pub age: u8,

    /// "Male" or "Female"
    #[serde(default = "default_gender")]
    pub gender: String,

    /// Cover amount, asset value, income, or dispute value
    #[serde(default)]
    pub monetary_base: f64,

    #[serde(default = "default_term_years")]
    pub term_years: u32,

    #[serde(default)]
    pub smoker: bool,

    #[serde(default)]
    pub urgent: bool,

    #[serde(default)]
    pub court_proceeding: bool,

    #[serde(default)]
    pub already_insured: bool,

    #[serde(default)]
    pub pre_existing_condition: bool,

    /// Include the provider comparison in the response (default: true)
    #[serde(default = "default_true")]
    pub compare: bool,

    /// Seed for reproducible display ratings
    #[serde(default)]
    pub rating_seed: Option<u64>,

    /// Reject out-of-range input instead of coercing it
    #[serde(default)]
    pub strict: bool,
}

fn default_age() -> u8 { 35 }
fn default_gender() -> String { "Female".to_string() }
fn default_term_years() -> u32 { 1 }
fn default_true() -> bool { true }

/// Output for a quote
#[derive(Debug, Serialize)]
pub struct QuoteApiResponse {
    pub quote: QuoteResult,
    pub comparison: Vec<ComparisonRow>,
    pub quoted_at: String,
    pub execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &QuoteApiResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let api_request: QuoteApiRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let product = match ProductType::from_key(&api_request.product) {
        Some(p) => p,
        None => {
            return Ok(error_response(400, &format!("Unknown product: {}", api_request.product)));
        }
    };

    let gender = match api_request.gender.as_str() {
        "Male" => Gender::Male,
        "Female" => Gender::Female,
        other => {
            return Ok(error_response(400, &format!("Unknown gender: {}", other)));
        }
    };

    let request = QuoteRequest {
        product,
        jurisdiction: api_request.jurisdiction,
        provider: api_request.provider,
        subject_age: api_request.age,
        gender,
        monetary_base: api_request.monetary_base,
        term_years: api_request.term_years,
        flags: QuoteFlags {
            smoker: api_request.smoker,
            urgent: api_request.urgent,
            court_proceeding: api_request.court_proceeding,
            already_insured: api_request.already_insured,
            pre_existing_condition: api_request.pre_existing_condition,
        },
    };

    let config = PricingConfig {
        validation: if api_request.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        },
    };
    let engine = PricingEngine::new(RatingTables::default_rates(), config);

    let quote = match engine.quote(&request) {
        Ok(q) => q,
        Err(e) => {
            return Ok(error_response(422, &e.to_string()));
        }
    };

    let comparison = if api_request.compare {
        let mut rating = match api_request.rating_seed {
            Some(seed) => RandomRating::seeded(seed),
            None => RandomRating::new(),
        };
        match compare_providers(&engine, &request, &mut rating) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(error_response(422, &e.to_string()));
            }
        }
    } else {
        Vec::new()
    };

    let response = QuoteApiResponse {
        quote,
        comparison,
        quoted_at: chrono::Utc::now().to_rfc3339(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
