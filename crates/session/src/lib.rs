//! Detection Session
//!
//! Host-side state around the overlay:
//! - Detection and OCR on/off, driven by buttons or voice commands
//! - Detector controls (score threshold, max results, delegate)
//! - Latest OCR text readout

pub mod command;
pub mod settings;
pub mod state;
pub mod readout;

pub use command::VoiceCommand;
pub use readout::TextReadout;
pub use settings::{Delegate, DetectorSettings};
pub use state::{DetectionSession, FrameRoute, SessionUpdate};

use thiserror::Error;

/// Session error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Setting outside its allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
