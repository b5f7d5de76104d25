//! Public API for the stud-quant crate.
//!
//! This module provides the high-level API: the [`MosaicBuilder`] entry
//! point and the [`MosaicError`] unified error type.

mod builder;
mod error;

pub use builder::MosaicBuilder;
pub use error::{MosaicError, UnknownOptionError};
