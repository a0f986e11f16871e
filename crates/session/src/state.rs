//! Detection session state

use crate::command::VoiceCommand;
use tracing::info;

/// What to do with an incoming camera frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRoute {
    /// Detection is off, release the frame untouched
    Drop,
    /// Object detection only
    ObjectsOnly,
    /// Object detection plus text recognition
    ObjectsAndText,
}

/// Side effects the host applies after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionUpdate {
    /// Status message for the user, if any
    pub status: Option<&'static str>,
    /// Overlay and OCR text must be cleared
    pub clear_overlay: bool,
}

/// Detection/OCR on-off state
///
/// Both flags start off. Detection follows OCR when OCR is toggled; `stop`
/// turns detection off without touching the OCR flag.
#[derive(Debug, Clone, Default)]
pub struct DetectionSession {
    detection_active: bool,
    ocr_active: bool,
}

impl DetectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_detection_active(&self) -> bool {
        self.detection_active
    }

    pub fn is_ocr_active(&self) -> bool {
        self.ocr_active
    }

    /// Flip OCR; detection follows it
    pub fn toggle_ocr(&mut self) -> SessionUpdate {
        self.ocr_active = !self.ocr_active;
        self.detection_active = self.ocr_active;

        if self.ocr_active {
            info!("OCR on, detection started");
            SessionUpdate {
                status: Some("OCR is now ON"),
                clear_overlay: false,
            }
        } else {
            info!("OCR off, detection stopped");
            SessionUpdate {
                status: Some("OCR is now OFF"),
                clear_overlay: true,
            }
        }
    }

    /// Stop detection immediately and clear the overlay
    pub fn stop(&mut self) -> SessionUpdate {
        self.detection_active = false;
        info!("Detection stopped");
        SessionUpdate {
            status: None,
            clear_overlay: true,
        }
    }

    /// Apply a voice command
    pub fn apply(&mut self, command: VoiceCommand) -> SessionUpdate {
        match command {
            VoiceCommand::ToggleOcr => self.toggle_ocr(),
            VoiceCommand::Stop => self.stop(),
        }
    }

    /// Route for the next camera frame
    pub fn route_frame(&self) -> FrameRoute {
        if !self.detection_active {
            FrameRoute::Drop
        } else if self.ocr_active {
            FrameRoute::ObjectsAndText
        } else {
            FrameRoute::ObjectsOnly
        }
    }

    /// Whether detector results should reach the overlay
    pub fn accepts_results(&self) -> bool {
        self.detection_active
    }
}
