use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ContentStore, LlmClient, PhotoSearch};
use crate::application::services::{parse_csv, validate_csv};
use crate::domain::{JobId, PublishConfig};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

pub const CSV_FIELD: &str = "csvFile";
pub const CONFIG_FIELD: &str = "config";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub job_id: String,
    pub total_posts: usize,
}

#[derive(Deserialize)]
pub struct StatusQuery {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
}

#[derive(Default)]
struct SubmitForm {
    csv: Option<String>,
    config: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn submit_generation_handler<L, P, S>(
    State(state): State<AppState<L, P, S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    L: LlmClient + 'static,
    P: PhotoSearch + 'static,
    S: ContentStore + 'static,
{
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected non-multipart request");
            return ErrorResponse::with_details(
                "Expected a multipart/form-data request",
                vec![rejection.body_text()],
            )
            .into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(message) => {
            tracing::warn!(error = %message, "Failed to read multipart");
            return ErrorResponse::new(message).into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    let Some(csv_text) = form.csv else {
        return ErrorResponse::new("No CSV file provided")
            .into_response_with(StatusCode::BAD_REQUEST);
    };

    let config = match form.config.as_deref().map(str::trim) {
        None | Some("") => PublishConfig::default(),
        Some(raw) => match serde_json::from_str::<PublishConfig>(raw) {
            Ok(config) => config,
            Err(e) => {
                return ErrorResponse::with_details("Invalid config", vec![e.to_string()])
                    .into_response_with(StatusCode::BAD_REQUEST);
            }
        },
    };

    let validation = validate_csv(&csv_text);
    if !validation.is_valid {
        tracing::warn!(errors = ?validation.errors, "Rejected invalid CSV");
        return ErrorResponse::with_details("Invalid CSV format", validation.errors)
            .into_response_with(StatusCode::BAD_REQUEST);
    }

    let rows = match parse_csv(&csv_text) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "CSV contained no usable rows");
            return ErrorResponse::with_details("Failed to parse CSV", vec![e.to_string()])
                .into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    match state.orchestrator.submit(rows, config).await {
        Ok(job) => (
            StatusCode::OK,
            Json(SubmitResponse {
                success: true,
                job_id: job.id.to_string(),
                total_posts: job.total_rows,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to start blog generation job");
            ErrorResponse::new(format!("Failed to start blog generation: {}", e))
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn generation_status_handler<L, P, S>(
    State(state): State<AppState<L, P, S>>,
    Query(query): Query<StatusQuery>,
) -> Response
where
    L: LlmClient + 'static,
    P: PhotoSearch + 'static,
    S: ContentStore + 'static,
{
    let Some(raw_id) = query.job_id.filter(|id| !id.trim().is_empty()) else {
        return ErrorResponse::new("Job ID is required").into_response_with(StatusCode::BAD_REQUEST);
    };

    let not_found = || ErrorResponse::new("Job not found").into_response_with(StatusCode::NOT_FOUND);

    let Ok(job_id) = raw_id.parse::<JobId>() else {
        return not_found();
    };

    match state.job_store.get(job_id).await {
        Ok(Some(job)) => (StatusCode::OK, Json(job)).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            ErrorResponse::new(format!("Failed to fetch job: {}", e))
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn read_form(mut multipart: Multipart) -> Result<SubmitForm, String> {
    let mut form = SubmitForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read multipart: {}", e))?
    {
        let target = match field.name() {
            Some(CSV_FIELD) => &mut form.csv,
            Some(CONFIG_FIELD) => &mut form.config,
            _ => continue,
        };
        let text = field
            .text()
            .await
            .map_err(|e| format!("Failed to read form field: {}", e))?;
        *target = Some(text);
    }
    Ok(form)
}
