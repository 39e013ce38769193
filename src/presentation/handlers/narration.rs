use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::application::services::{Narration, NarrationError, NarrationRequest};
use crate::presentation::state::AppState;

use super::narration_types::{ErrorResponse, NarrationBody, NarrationQuery, NarrationResponse};

pub const CACHE_STATUS_HEADER: &str = "x-narration-cache";

#[derive(Clone, Copy)]
enum Delivery {
    Structured,
    Stream,
}

pub async fn narrate_json_handler(
    State(state): State<AppState>,
    body: Result<Json<NarrationBody>, JsonRejection>,
) -> Response {
    respond(&state, from_body(body), Delivery::Structured).await
}

pub async fn narrate_query_handler(
    State(state): State<AppState>,
    query: Result<Query<NarrationQuery>, QueryRejection>,
) -> Response {
    respond(&state, from_query(query), Delivery::Structured).await
}

pub async fn stream_json_handler(
    State(state): State<AppState>,
    body: Result<Json<NarrationBody>, JsonRejection>,
) -> Response {
    respond(&state, from_body(body), Delivery::Stream).await
}

pub async fn stream_query_handler(
    State(state): State<AppState>,
    query: Result<Query<NarrationQuery>, QueryRejection>,
) -> Response {
    respond(&state, from_query(query), Delivery::Stream).await
}

fn from_body(body: Result<Json<NarrationBody>, JsonRejection>) -> Result<NarrationRequest, String> {
    let Json(body) = body.map_err(|rejection| rejection.body_text())?;
    NarrationRequest::try_from(body).map_err(|e| e.to_string())
}

fn from_query(
    query: Result<Query<NarrationQuery>, QueryRejection>,
) -> Result<NarrationRequest, String> {
    let Query(query) = query.map_err(|rejection| rejection.body_text())?;
    NarrationRequest::try_from(query).map_err(|e| e.to_string())
}

async fn respond(
    state: &AppState,
    request: Result<NarrationRequest, String>,
    delivery: Delivery,
) -> Response {
    let request = match request {
        Ok(request) => request,
        Err(message) => {
            tracing::info!(error = %message, "Rejected narration request");
            return bad_request(message);
        }
    };

    tracing::debug!(
        coordinate = %request.coordinate,
        historical = request.is_historical(),
        "Processing narration request"
    );

    match state.narration_service.narrate(&request).await {
        Ok(narration) => {
            tracing::info!(
                bytes = narration.audio.len(),
                cache_hit = narration.cache_hit,
                "Narration served"
            );
            match delivery {
                Delivery::Structured => structured(narration),
                Delivery::Stream => streamed(narration),
            }
        }
        Err(e) => internal_error(e),
    }
}

fn structured(narration: Narration) -> Response {
    let cache_status = cache_status(narration.cache_hit);
    let body = NarrationResponse {
        transcript: narration.text,
        audio: STANDARD.encode(&narration.audio),
        audio_format: narration.format.extension().to_string(),
    };

    let mut response = (StatusCode::OK, Json(body)).into_response();
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, cache_status);
    response
}

fn streamed(narration: Narration) -> Response {
    let content_length = narration.audio.len();
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, narration.format.as_mime())],
        narration.audio,
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));
    headers.insert(CACHE_STATUS_HEADER, cache_status(narration.cache_hit));
    response
}

fn cache_status(hit: bool) -> HeaderValue {
    HeaderValue::from_static(if hit { "hit" } else { "miss" })
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

fn internal_error(error: NarrationError) -> Response {
    tracing::error!(error = %error, "Narration failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Narration failed: {}", error),
        }),
    )
        .into_response()
}
