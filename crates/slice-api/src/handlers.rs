//! # Request Handlers
//!
//! Axum request handlers for the ordering API.
//! Every session step maps one-to-one onto an `OrderSession` transition.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use slice_core::{AddOnKind, BaseKind, OrderError, Price, SessionSummary};
use std::collections::BTreeMap;
use tracing::{error, info, instrument};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Base or add-on selection
#[derive(Debug, Deserialize)]
pub struct KindRequest {
    /// Kind name (e.g. "margherita") or menu number
    pub kind: String,
}

/// Payment selection
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    /// Channel key (e.g. "paypal"), label, or menu number
    pub channel: String,
}

/// A menu line with live availability
#[derive(Debug, Serialize)]
pub struct MenuItem {
    pub kind: &'static str,
    pub name: String,
    pub price: Price,
    pub available: u32,
}

/// Menu response
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub bases: Vec<MenuItem>,
    pub add_ons: Vec<MenuItem>,
}

/// Payment channel listing
#[derive(Debug, Serialize)]
pub struct PaymentMethod {
    pub key: &'static str,
    pub name: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn order_error_to_response(err: OrderError) -> ApiError {
    let code = err.status_code();
    if code >= 500 {
        error!("Order error: {}", err);
    }
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "slice-shop",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Menu with current availability
pub async fn menu(State(state): State<AppState>) -> Json<MenuResponse> {
    let catalog = state.shop.catalog();
    let inventory = state.shop.inventory();

    let bases = catalog
        .bases
        .iter()
        .map(|b| MenuItem {
            kind: b.kind.as_str(),
            name: b.name.clone(),
            price: b.price,
            available: inventory.remaining(&b.name),
        })
        .collect();
    let add_ons = catalog
        .add_ons
        .iter()
        .map(|a| MenuItem {
            kind: a.kind.as_str(),
            name: a.name.clone(),
            price: a.price,
            available: inventory.remaining(&a.name),
        })
        .collect();

    Json(MenuResponse { bases, add_ons })
}

/// Remaining stock per item
pub async fn inventory(State(state): State<AppState>) -> Json<BTreeMap<String, u32>> {
    Json(state.shop.inventory_snapshot())
}

/// Registered payment channels
pub async fn payment_methods(State(state): State<AppState>) -> Json<Vec<PaymentMethod>> {
    let methods = state
        .shop
        .payments()
        .channels()
        .into_iter()
        .map(|(key, name)| PaymentMethod { key, name })
        .collect();
    Json(methods)
}

/// Open a new order session
#[instrument(skip(state))]
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionSummary>) {
    let session = state.shop.new_session();
    let summary = session.summary();
    state.sessions.insert(session).await;

    info!("Opened session {}", summary.id);
    (StatusCode::CREATED, Json(summary))
}

/// Get a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .map_err(order_error_to_response)?;
    let summary = session.lock().await.summary();
    Ok(Json(summary))
}

/// Choose the base product
#[instrument(skip(state, request), fields(kind = %request.kind))]
pub async fn select_base(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<KindRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    let kind: BaseKind = request.kind.parse().map_err(order_error_to_response)?;
    let session = state
        .sessions
        .get(session_id)
        .await
        .map_err(order_error_to_response)?;

    let mut session = session.lock().await;
    session.select_base(kind).map_err(order_error_to_response)?;
    Ok(Json(session.summary()))
}

/// Layer an add-on onto the session's product
#[instrument(skip(state, request), fields(kind = %request.kind))]
pub async fn add_add_on(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<KindRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    let kind: AddOnKind = request.kind.parse().map_err(order_error_to_response)?;
    let session = state
        .sessions
        .get(session_id)
        .await
        .map_err(order_error_to_response)?;

    let mut session = session.lock().await;
    session.add_add_on(kind).map_err(order_error_to_response)?;
    Ok(Json(session.summary()))
}

/// Stop adding add-ons
pub async fn finish(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .map_err(order_error_to_response)?;

    let mut session = session.lock().await;
    session.finish().map_err(order_error_to_response)?;
    Ok(Json(session.summary()))
}

/// Pay and complete the order
#[instrument(skip(state, request), fields(channel = %request.channel))]
pub async fn select_payment(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .map_err(order_error_to_response)?;

    let mut session = session.lock().await;
    let order = session
        .select_payment(&request.channel)
        .map_err(order_error_to_response)?;
    info!(
        "Session {} paid {} via {}",
        session_id, order.total, order.receipt.channel
    );
    Ok(Json(session.summary()))
}

/// Abandon the order (stock already taken is not returned)
pub async fn cancel(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .map_err(order_error_to_response)?;

    let mut session = session.lock().await;
    session.cancel().map_err(order_error_to_response)?;
    Ok(Json(session.summary()))
}
