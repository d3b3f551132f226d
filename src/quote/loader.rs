//! Load batch quote requests from CSV

use super::{Gender, ProductType, QuoteFlags, QuoteRequest};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Default path to the sample batch file
pub const DEFAULT_BATCH_PATH: &str = "data/quote_batch.csv";

/// Raw CSV row matching the quote_batch.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Jurisdiction")]
    jurisdiction: String,
    #[serde(rename = "Provider")]
    provider: String,
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "MonetaryBase")]
    monetary_base: f64,
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "Smoker")]
    smoker: u8,
    #[serde(rename = "Urgent")]
    urgent: u8,
    #[serde(rename = "CourtProceeding")]
    court_proceeding: u8,
    #[serde(rename = "AlreadyInsured")]
    already_insured: u8,
    #[serde(rename = "PreExistingCondition")]
    pre_existing_condition: u8,
}

impl CsvRow {
    fn to_request(self) -> Result<QuoteRequest, Box<dyn Error>> {
        let product = ProductType::from_key(&self.product)
            .ok_or_else(|| format!("Unknown Product: {}", self.product))?;

        let gender = match self.gender.as_str() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            other => return Err(format!("Unknown Gender: {}", other).into()),
        };

        Ok(QuoteRequest {
            product,
            jurisdiction: self.jurisdiction,
            provider: self.provider,
            subject_age: self.age,
            gender,
            monetary_base: self.monetary_base,
            term_years: self.term_years,
            flags: QuoteFlags {
                smoker: self.smoker != 0,
                urgent: self.urgent != 0,
                court_proceeding: self.court_proceeding != 0,
                already_insured: self.already_insured != 0,
                pre_existing_condition: self.pre_existing_condition != 0,
            },
        })
    }
}

/// Load all quote requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<QuoteRequest>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut requests = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    Ok(requests)
}

/// Load quote requests from any reader (e.g., string buffer, upload body)
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<QuoteRequest>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut requests = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    Ok(requests)
}

/// Load the sample batch from the default location
pub fn load_default_batch() -> Result<Vec<QuoteRequest>, Box<dyn Error>> {
    load_requests(DEFAULT_BATCH_PATH)
}
