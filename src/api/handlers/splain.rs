use crate::AppState;
use crate::etherscan::MIN_RAW_TX_LEN;
use crate::splain::{Mode, SplainError, SplainOptions, splain_hex};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Served from `/` when no transaction is given.
pub const SAMPLE_TX: &str = "0xf89182032d8504a817c80082fe90940b95993a39a363d99280ac950f5e4536ab5c5566871550f7dca70000a41a6952300000000000000000000000001b46d8845f5a30447f182ac925c7da8b65a0124a26a0df820a48d3a6cd4e986b00a601138a1a7d0969334edd1ec1e2f6ad3c6890a468a0573ca6ccd5dc1eab646aa996c8fa7c6f1ec3256d2d051e0f2a0a04e0066025b6";

#[derive(Debug, Default, Deserialize)]
pub struct SplainQuery {
    pub verbose: Option<String>,
    pub strict: Option<String>,
}

impl SplainQuery {
    fn options(&self, state: &AppState) -> SplainOptions {
        let strict = state.settings.strict || is_true(self.strict.as_deref());
        SplainOptions {
            verbose: is_true(self.verbose.as_deref()),
            mode: if strict { Mode::Strict } else { Mode::Lenient },
        }
    }
}

fn is_true(value: Option<&str>) -> bool {
    value == Some("true")
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<SplainError> for ApiError {
    fn from(error: SplainError) -> Self {
        Self::bad_request(format!("could not decode: {}", error.kind()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub async fn sample(State(state): State<AppState>) -> Response {
    let options = SplainOptions {
        verbose: false,
        mode: state.settings.mode(),
    };
    respond(render(SAMPLE_TX, options))
}

pub async fn splain_tx(
    State(state): State<AppState>,
    Path(tx): Path<String>,
    Query(query): Query<SplainQuery>,
) -> Response {
    let options = query.options(&state);
    let raw = match resolve_raw_tx(&state, tx).await {
        Ok(raw) => raw,
        Err(error) => return error.into_response(),
    };
    respond(render(&raw, options))
}

/// Short inputs are transaction hashes and get looked up on the explorer.
async fn resolve_raw_tx(state: &AppState, tx: String) -> Result<String, ApiError> {
    if tx.len() >= MIN_RAW_TX_LEN {
        return Ok(tx);
    }

    let resolved = state
        .explorer
        .resolve(&tx)
        .await
        .map(|raw| raw.trim().to_string())
        .unwrap_or_default();
    if resolved.len() < MIN_RAW_TX_LEN {
        info!(tx_hash = %tx, "no raw transaction found for hash");
        return Err(ApiError::bad_request(
            "could not resolve transaction hash to a raw transaction",
        ));
    }
    Ok(resolved)
}

fn render(raw: &str, options: SplainOptions) -> Result<String, ApiError> {
    let splain = splain_hex(raw, options).map_err(|error| {
        warn!(kind = error.kind(), error = %error, "transaction decode failed");
        ApiError::from(error)
    })?;
    info!(
        tokens = splain.tokens.len(),
        verbose = options.verbose,
        "explained transaction"
    );
    splain
        .to_json_pretty()
        .map_err(|error| ApiError::internal(format!("failed to serialize tokens: {}", error)))
}

fn respond(result: Result<String, ApiError>) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
