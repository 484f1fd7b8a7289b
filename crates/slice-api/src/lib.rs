//! # slice-api
//!
//! HTTP API layer for slice-shop.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the menu, stock and payment channels
//! - Order session endpoints, one per workflow step
//!
//! Many customers can hold sessions at once; they all draw on the same stock.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/menu` | Menu with availability |
//! | GET | `/api/v1/inventory` | Remaining stock |
//! | GET | `/api/v1/payment-methods` | Payment channels |
//! | POST | `/api/v1/sessions` | Open a session |
//! | GET | `/api/v1/sessions/{id}` | Session summary |
//! | POST | `/api/v1/sessions/{id}/base` | Choose base |
//! | POST | `/api/v1/sessions/{id}/add-ons` | Add an add-on |
//! | POST | `/api/v1/sessions/{id}/finish` | Finish add-ons |
//! | POST | `/api/v1/sessions/{id}/payment` | Pay |
//! | POST | `/api/v1/sessions/{id}/cancel` | Cancel |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, SessionRegistry};
