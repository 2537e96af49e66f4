//! AWS Lambda handler for loan quotes
//!
//! Accepts a borrower profile and loan request as JSON through a Lambda
//! Function URL and returns the priced result, optionally with the
//! repayment schedule.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use lending_engine::pricing::RepaymentSchedule;
use lending_engine::{
    BorrowerProfile, LoanApplication, LoanPurpose, LoanRequest, PricingEngine, PricingError, PricingResult,
};
use serde::{Deserialize, Serialize};

/// Input for a quote
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default = "default_application_id")]
    pub application_id: String,

    #[serde(default)]
    pub profile: BorrowerProfile,

    pub request: LoanRequest,

    #[serde(default = "default_purpose")]
    pub purpose: LoanPurpose,

    /// Include the month-by-month schedule
    #[serde(default)]
    pub include_schedule: bool,

    /// Disbursement date for schedule due dates
    #[serde(default)]
    pub disbursed_on: Option<NaiveDate>,
}

fn default_application_id() -> String { "QUOTE".to_string() }
fn default_purpose() -> LoanPurpose { LoanPurpose::Personal }

/// Output of a quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub application_id: String,
    pub risk_category_label: String,
    pub pricing: PricingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<RepaymentSchedule>,
    pub execution_time_us: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert("Access-Control-Allow-Methods", HeaderValue::from_static("POST, OPTIONS"));
    headers.insert("Access-Control-Allow-Headers", HeaderValue::from_static("Content-Type"));
    headers
}

fn response(status_code: i64, body: Option<String>) -> LambdaFunctionUrlResponse {
    LambdaFunctionUrlResponse {
        status_code,
        headers: cors_headers(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status_code: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message })?;
    Ok(response(status_code, Some(body)))
}

fn status_for(err: &PricingError) -> i64 {
    if err.is_invalid_input() { 400 } else { 500 }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let payload = event.payload;

    // Handle CORS preflight
    if payload.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(response(200, None));
    }

    let body = payload.body.unwrap_or_else(|| "{}".to_string());
    let quote: QuoteRequest = match serde_json::from_str(&body) {
        Ok(q) => q,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let engine = PricingEngine::default();
    let application = LoanApplication {
        application_id: quote.application_id,
        profile: BorrowerProfile::new(quote.profile.monthly_income_band, quote.profile.cibil_score),
        request: quote.request,
        purpose: quote.purpose,
    };

    let pricing = match engine.quote(&application) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Quote {} rejected: {}", application.application_id, e);
            return error_response(status_for(&e), &e.to_string());
        }
    };

    let schedule = if quote.include_schedule {
        match RepaymentSchedule::build(
            pricing.amount,
            pricing.annual_interest_rate,
            pricing.tenure_months,
            quote.disbursed_on,
        ) {
            Ok(s) => Some(s),
            Err(e) => return error_response(status_for(&e), &e.to_string()),
        }
    } else {
        None
    };

    log::info!(
        "Quoted {}: score={} category={} rate={}%",
        application.application_id,
        pricing.risk_score,
        pricing.risk_category.code(),
        pricing.annual_interest_rate
    );

    let out = QuoteResponse {
        application_id: application.application_id,
        risk_category_label: pricing.risk_category.to_string(),
        pricing,
        schedule,
        execution_time_us: start.elapsed().as_micros() as u64,
    };

    Ok(response(200, Some(serde_json::to_string(&out)?)))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
