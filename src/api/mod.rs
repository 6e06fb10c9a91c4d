//! HTTP API module for the taxi payroll engine.
//!
//! Exposes payroll prediction over JSON and CSV bodies, and the active
//! commission table for clients that display it.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PredictionRequest;
pub use response::{ApiError, ApiErrorResponse, CommissionTiersResponse};
pub use state::AppState;
