//! pwrstat Prometheus Exporter
//!
//! A Prometheus metrics exporter for CyberPower UPS units managed by PowerPanel's
//! `pwrstat` utility.
//!
//! # Overview
//!
//! On every scrape the exporter runs `pwrstat -status`, parses the report into a
//! flat field/value record and translates a fixed set of fields (load, state,
//! battery capacity, remaining runtime, input/output voltage, self-test result)
//! into gauges labelled with the UPS model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   pwrstat -status    ┌──────────────┐
//! │    UPS      │ ───────────────────► │   Exporter   │
//! │ (PowerPanel)│     text report      │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Parser │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Collect │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`pwrstat`] - Report parser and status sources (live command or captured file)
//! - [`metrics`] - Metric descriptors and the Prometheus registry
//! - [`collectors`] - The on-demand UPS collector
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use pwrstat_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pwrstat;
pub mod server;
