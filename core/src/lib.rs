//! Ambient logging setup shared by the chainview workspace.
//!
//! Business logic crates depend on the `log` facade directly and call
//! `log::info!`/`log::warn!`/etc. This crate only owns the *sink*: wiring
//! those facade calls to stdout (and, for long running hosts, a rolling
//! file) via `log4rs`.

pub mod log;

pub use crate::log::{init_logger, try_init_logger};
