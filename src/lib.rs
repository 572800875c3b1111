#![warn(missing_docs)]
//! Watchsmith turns a declarative monitoring specification into a consistent bundle of
//! observability artifacts: scrape targets, alerting rules, a dashboard document, a generated
//! health-check script, firewall port requirements, and log-pipeline wiring.
//!
//! The generator is a pure function of its input: given the same [`models::MonitoringSpec`],
//! [`generate::generate`] produces byte-identical artifacts on every run. All build-time
//! validation failures are collected and reported together in a single
//! [`generate::GenerationError`].

pub mod artifacts;
pub mod catalog;
pub mod cmd;
pub mod config;
pub mod generate;
pub mod loader;
pub mod models;
