#![forbid(unsafe_code)]
//! slate-core: overlay merge and timeline projection for externally-tracked
//! issues.
//!
//! The pipeline is synchronous and request-scoped: issues arrive from an
//! [`source::IssueSource`], locally-owned overlays are merged onto them
//! ([`overlay`]), and the result is projected into a flat list of timeline
//! groups and items ([`timeline`]). Groups and items are rebuilt from scratch
//! on every call; nothing in this crate caches or mutates shared state.
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at fallible seams; malformed dates and
//!   overlay payloads degrade instead of erroring.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod date;
pub mod model;
pub mod overlay;
pub mod source;
pub mod timeline;
