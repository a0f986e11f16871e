//! Voice commands

use serde::{Deserialize, Serialize};

/// Phrase that toggles OCR
pub const TOGGLE_OCR_PHRASE: &str = "start button";

/// Phrase that stops detection
pub const STOP_PHRASE: &str = "stop";

/// Command recognized from speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceCommand {
    ToggleOcr,
    Stop,
}

impl VoiceCommand {
    /// Match a single transcript (whole phrase, case-insensitive)
    pub fn parse(transcript: &str) -> Option<Self> {
        if transcript.eq_ignore_ascii_case(TOGGLE_OCR_PHRASE) {
            Some(VoiceCommand::ToggleOcr)
        } else if transcript.eq_ignore_ascii_case(STOP_PHRASE) {
            Some(VoiceCommand::Stop)
        } else {
            None
        }
    }

    /// First command among recognizer candidates, in rank order
    pub fn from_transcripts<S: AsRef<str>>(transcripts: &[S]) -> Option<Self> {
        transcripts.iter().find_map(|t| Self::parse(t.as_ref()))
    }
}
