//! Progress module containing progress bar functionality.
//!
//! Progress bars are optional and hidden unless requested.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Progress bar display management and coordination

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
