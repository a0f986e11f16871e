//! OCR text readout

/// Placeholder shown before any text is recognized
pub const RECOGNISING_PLACEHOLDER: &str = "Recognising...";

/// Latest recognized text shown under the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReadout {
    text: String,
}

impl TextReadout {
    pub fn new() -> Self {
        Self {
            text: RECOGNISING_PLACEHOLDER.to_string(),
        }
    }

    /// Replace the readout with the last block of an OCR result.
    ///
    /// Returns `false` when the result had no blocks and the readout kept
    /// its previous text.
    pub fn update<S: AsRef<str>>(&mut self, blocks: &[S]) -> bool {
        match blocks.last() {
            Some(last) => {
                self.text = last.as_ref().to_string();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for TextReadout {
    fn default() -> Self {
        Self::new()
    }
}
