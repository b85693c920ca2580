//! Core library for the `tickload` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, the fixed-rate dispatcher and fetch tasks,
//! latency bucketing with sampled request ids, and report rendering. The
//! primary user-facing interface is the `tickload` command-line application;
//! library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
