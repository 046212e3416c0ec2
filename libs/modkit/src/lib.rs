//! # ModKit
//!
//! Shared building blocks for EventHub modules:
//!
//! - RFC 9457 Problem Details responses (`api::problem`)
//! - Axum extractors that reject with Problem bodies (`api::extract`)
//! - OS signal handling for graceful shutdown (`runtime::shutdown`)

pub use anyhow::Result;

pub mod api;
pub mod runtime;

pub use api::extract::{JsonBody, PathParam};
pub use api::problem::{bad_request, Problem, ProblemResponse, ValidationError};
pub use runtime::shutdown::wait_for_shutdown;
