//! AWS Lambda handler for running projections over HTTP
//!
//! Accepts a parameter set (plus optional named scenarios to compare against)
//! as JSON and returns the projection result and comparison rows.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use compound_growth::{
    params::CalculationParams,
    projection::{CalculationResult, ProjectionConfig},
    scenario::{ComparisonRow, SavedScenario, ScenarioRunner},
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// A named parameter set supplied by the caller for comparison
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub params: CalculationParams,
}

/// Input for a projection request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    /// Parameters to project (defaults when absent)
    #[serde(default)]
    pub params: Option<CalculationParams>,

    /// Name of the draft in the comparison
    #[serde(default)]
    pub name: String,

    /// Saved scenarios to compare against
    #[serde(default)]
    pub scenarios: Vec<ScenarioInput>,

    /// Include the month-by-month trace
    #[serde(default)]
    pub monthly_detail: bool,
}

/// Output of a projection request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub result: CalculationResult,
    pub comparison: Vec<ComparisonRow>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

type ResponseBuilder = lambda_http::http::response::Builder;

fn with_cors(builder: ResponseBuilder) -> ResponseBuilder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message })?;
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Project the request's parameters and compare against its scenarios.
/// Returns a message suitable for a 422 when validation fails.
fn process(request: ProjectionRequest) -> Result<ProjectionResponse, String> {
    let start = std::time::Instant::now();
    let params = request.params.unwrap_or_default();
    params.validate().map_err(|e| e.to_string())?;

    let saved: Vec<SavedScenario> = request
        .scenarios
        .into_iter()
        .enumerate()
        .map(|(idx, s)| -> Result<SavedScenario, String> {
            s.params
                .validate()
                .map_err(|e| format!("scenario {}: {}", idx + 1, e))?;
            let name = match s.name.trim() {
                "" => format!("Scenario {}", idx + 1),
                n => n.to_string(),
            };
            Ok(SavedScenario {
                id: s.id.unwrap_or_else(|| (idx + 1).to_string()),
                name,
                params: s.params,
                created_at: chrono::Utc::now(),
            })
        })
        .collect::<Result<_, String>>()?;

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        monthly_detail: request.monthly_detail,
    });
    let result = runner.run(&params);
    let comparison = runner.compare_projected(&request.name, &params, &result, &saved);

    Ok(ProjectionResponse {
        result,
        comparison,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    match process(request) {
        Ok(response) => json_response(&response),
        Err(message) => {
            log::warn!("Rejected projection request: {}", message);
            error_response(422, &message)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
