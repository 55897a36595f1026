// =============================================================================
// REST API Endpoints: Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. Reads serve the latest evaluation;
// writes replace part of the input snapshot, which triggers a full recompute
// before the handler responds.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::{AppState, EvaluationRecord, MarketUpdate};
use crate::types::CurrencyInputs;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Reads ───────────────────────────────────────────────────
        .route("/api/v1/health", get(health))
        .route("/api/v1/state", get(full_state))
        .route("/api/v1/regime", get(regime))
        .route("/api/v1/scores", get(scores))
        .route("/api/v1/signal", get(pair_signal))
        .route("/api/v1/pairs", get(pairs))
        // ── Input updates ───────────────────────────────────────────
        .route("/api/v1/inputs/volatility", post(record_volatility))
        .route("/api/v1/inputs/market", post(update_market))
        .route("/api/v1/inputs/currency/:code", put(set_currency))
        .route("/api/v1/control/policy-week", post(set_policy_week))
        // ── Middleware & State ───────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Short acknowledgement returned by every write endpoint.
#[derive(Serialize)]
struct UpdateResponse {
    version: u64,
    computed_at: String,
    regime: String,
    degraded: bool,
}

impl From<EvaluationRecord> for UpdateResponse {
    fn from(record: EvaluationRecord) -> Self {
        Self {
            version: record.version,
            computed_at: record.computed_at,
            regime: record.evaluation.regime.to_string(),
            degraded: record.evaluation.regime_state.is_degraded(),
        }
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Reads
// =============================================================================

async fn full_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.build_snapshot())
}

async fn regime(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let record = state.latest();
    let rs = &record.evaluation.regime_state;
    Json(serde_json::json!({
        "regime": rs.regime.to_string(),
        "current": rs.current,
        "p25": rs.p25,
        "p75": rs.p75,
        "hedge_outperform_streak": rs.hedge_outperform_streak,
        "padded_observations": rs.padded_observations,
        "degraded": rs.is_degraded(),
        "reason": rs.reason,
        "weights": record.evaluation.weights,
        "computed_at": record.computed_at,
    }))
}

async fn scores(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let record = state.latest();
    let ranked: Vec<_> = record.evaluation.ranked().into_iter().cloned().collect();
    Json(serde_json::json!({
        "regime": record.evaluation.regime.to_string(),
        "version": record.version,
        "scores": ranked,
    }))
}

#[derive(Deserialize)]
struct SignalQuery {
    base: String,
    quote: String,
}

async fn pair_signal(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SignalQuery>,
) -> Response {
    let base = query.base.trim().to_ascii_uppercase();
    let quote = query.quote.trim().to_ascii_uppercase();
    let record = state.latest();

    match record.evaluation.signal_for(&base, &quote) {
        Some(signal) => Json(serde_json::json!({
            "pair": format!("{base}/{quote}"),
            "base": base,
            "quote": quote,
            "signal": signal,
        }))
        .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("no score available for {base}/{quote}"),
        ),
    }
}

async fn pairs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let record = state.latest();
    let pairs = state.major_pairs();
    Json(serde_json::json!({
        "regime": record.evaluation.regime.to_string(),
        "pairs": record.evaluation.pair_signals(&pairs),
        "strong_setups": record.evaluation.strong_setups(&pairs),
    }))
}

// =============================================================================
// Input updates
// =============================================================================

#[derive(Deserialize)]
struct VolatilityObservation {
    value: f64,
}

async fn record_volatility(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VolatilityObservation>,
) -> Response {
    if !body.value.is_finite() || body.value < 0.0 {
        warn!(value = body.value, "rejected volatility observation");
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "volatility observation must be a finite, non-negative number",
        );
    }
    Json(UpdateResponse::from(state.record_volatility(body.value))).into_response()
}

async fn update_market(
    State(state): State<Arc<AppState>>,
    Json(update): Json<MarketUpdate>,
) -> impl IntoResponse {
    Json(UpdateResponse::from(state.update_market(update)))
}

async fn set_currency(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(bundle): Json<CurrencyInputs>,
) -> Response {
    if code.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "currency code must not be empty");
    }
    Json(UpdateResponse::from(state.set_currency(&code, bundle))).into_response()
}

#[derive(Deserialize)]
struct PolicyWeekRequest {
    enabled: bool,
}

async fn set_policy_week(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PolicyWeekRequest>,
) -> impl IntoResponse {
    let record = state.set_policy_week(body.enabled);
    info!(enabled = body.enabled, "Policy week toggled via API");
    Json(UpdateResponse::from(record))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    use crate::engine::ModelInputs;
    use crate::runtime_config::RuntimeConfig;

    fn app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::new(
            RuntimeConfig::default(),
            ModelInputs::sample(),
            None,
        ));
        (state.clone(), router(state))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (_, app) = app();
        let (status, body) = send(app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["state_version"], 1);
    }

    #[tokio::test]
    async fn test_regime_endpoint() {
        let (_, app) = app();
        let (status, body) = send(app, Method::GET, "/api/v1/regime", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regime"], "RISK_OFF");
        assert_eq!(body["p75"], 27.5);
        assert_eq!(body["degraded"], false);
    }

    #[tokio::test]
    async fn test_scores_are_ranked() {
        let (_, app) = app();
        let (_, body) = send(app, Method::GET, "/api/v1/scores", None).await;
        let scores = body["scores"].as_array().unwrap();
        assert_eq!(scores.len(), 7);
        assert_eq!(scores[0]["currency_code"], "USD");
    }

    #[tokio::test]
    async fn test_signal_lookup() {
        let (_, app) = app();
        let (status, body) =
            send(app.clone(), Method::GET, "/api/v1/signal?base=usd&quote=JPY", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pair"], "USD/JPY");
        assert!(body["signal"]["differential"].as_f64().unwrap() > 0.0);

        let (status, _) = send(app, Method::GET, "/api/v1/signal?base=USD&quote=NZD", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pairs_board() {
        let (_, app) = app();
        let (_, body) = send(app, Method::GET, "/api/v1/pairs", None).await;
        assert_eq!(body["pairs"].as_array().unwrap().len(), 5);
        assert_eq!(body["pairs"][0]["pair"], "EUR/USD");
    }

    #[tokio::test]
    async fn test_volatility_observation_recomputes() {
        let (state, app) = app();
        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/v1/inputs/volatility",
            Some(serde_json::json!({ "value": 18.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], 2);
        assert_eq!(state.inputs().volatility.current, 18.0);

        let (status, _) = send(
            app,
            Method::POST,
            "/api/v1/inputs/volatility",
            Some(serde_json::json!({ "value": -3.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_market_update() {
        let (state, app) = app();
        let (status, _) = send(
            app,
            Method::POST,
            "/api/v1/inputs/market",
            Some(serde_json::json!({ "primary_asset_return": -0.5, "hedge_asset_return": 0.4 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.inputs().market.hedge_outperform_streak, 1);
    }

    #[tokio::test]
    async fn test_set_currency_adds_new_code() {
        let (state, app) = app();
        let bundle = ModelInputs::sample().currencies["AUD"]
            .clone()
            .with_currency_code("NZD");
        let (status, _) = send(
            app,
            Method::PUT,
            "/api/v1/inputs/currency/nzd",
            Some(serde_json::to_value(&bundle).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let latest = state.latest();
        assert_eq!(latest.evaluation.scores.len(), 8);
        assert!(latest.evaluation.scores.contains_key("NZD"));
        assert!(state.inputs().currencies["NZD"].mismatched_codes("NZD").is_empty());
    }

    #[tokio::test]
    async fn test_policy_week_toggle() {
        let (_, app) = app();
        let (_, body) = send(
            app,
            Method::POST,
            "/api/v1/control/policy-week",
            Some(serde_json::json!({ "enabled": true })),
        )
        .await;
        assert_eq!(body["regime"], "CENTRAL_BANK_WEEK");
    }

    #[tokio::test]
    async fn test_full_state() {
        let (_, app) = app();
        let (status, body) = send(app, Method::GET, "/api/v1/state", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["evaluation"]["regime"], "RISK_OFF");
        assert_eq!(body["inputs"]["currencies"].as_object().unwrap().len(), 7);
    }
}
