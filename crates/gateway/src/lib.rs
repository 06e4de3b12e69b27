//! Umbra Gateway
//!
//! Remote proxy functions of the Umbra privacy DeFi demo, served over HTTP
//! under `/functions/v1`:
//!
//! - `activate-agent` records that a wallet activated a catalog agent
//! - `create-deposit` accepts a private deposit and confirms it later
//! - `generate-stealth-address` issues a one-time receiving address
//! - `get-pool-stats` reports the main privacy pool
//!
//! Persistence goes through the [`DataApi`] port. [`RestDataApi`] talks to
//! a PostgREST-style backend; [`InMemoryDataApi`] keeps tables in memory
//! for tests and offline runs.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use umbra_clock::SystemClock;
//! use umbra_gateway::{AppState, InMemoryDataApi, create_router};
//!
//! let state = AppState::new(
//!     Arc::new(InMemoryDataApi::new()),
//!     Arc::new(SystemClock),
//!     Duration::from_secs(2),
//! );
//! let router = create_router(Arc::new(state));
//! ```

pub mod config;
pub mod data_api;
pub mod error;
pub mod functions;
pub mod rest;

pub use config::{ConfigError, GatewayConfig};
pub use data_api::{DataApi, DataApiError, Filter, InMemoryDataApi, RestDataApi, Row};
pub use error::FunctionError;
pub use rest::{AppState, FUNCTIONS_PREFIX, create_router};
