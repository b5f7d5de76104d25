//! Image preprocessing before quantization.
//!
//! Source images are shrunk to the stud resolution with adaptive pooling
//! and can then be tuned with hue/saturation/value, brightness and
//! contrast offsets. See [`Preprocessor`] for the order of operations.

mod adjust;
mod options;
mod pooling;
mod preprocessor;

pub use adjust::{adjust_brightness, adjust_contrast, adjust_hsv, contrast_factor, MAX_CONTRAST};
pub use options::PreprocessOptions;
pub use pooling::{resize_with_pooling, PoolingMode};
pub use preprocessor::Preprocessor;
