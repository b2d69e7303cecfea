//! User interface module - terminal output for the command-line tool.
//!
//! - `formatter` - Pure formatting functions and the printers built on them

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_degradation, display_degradations, display_error, display_status, display_version,
    format_degradation, format_error, format_status,
};
