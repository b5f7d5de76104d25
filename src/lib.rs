//! Studmosaic - stud mosaics from images
//!
//! Command-line front end for the `stud-quant` engine: YAML configuration,
//! PNG input and output, and JSON reports.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
