//! HTTP API module for the compensation engine.
//!
//! This module provides the REST endpoints for CTC breakdowns, payroll test
//! runs and leave registers.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CtcRequest, LeaveRegisterRequest, TestRunRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationEnvelope};
pub use state::AppState;
