//! Upload flow state machine shared by the page and the command-line client.

use std::mem;

use crate::encoder;

/// A file the user picked or dropped, with its preview already prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub preview: String,
}

impl SelectedImage {
    /// Returns `None` unless `mime_type` is in the `image/` category.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Option<Self> {
        let mime_type = mime_type.into();
        if !mime_type.starts_with("image/") {
            return None;
        }

        let preview = encoder::encode(&bytes, &mime_type).data_url();
        Some(Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
            preview,
        })
    }

    pub fn size_kb(&self) -> usize {
        (self.bytes.len() + 512) / 1024
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Landing,
    /// Upload panel open, nothing selected.
    Empty,
    Selected(SelectedImage),
    /// A request for this image is in flight.
    Analyzing(SelectedImage),
    Result {
        image: SelectedImage,
        analysis: String,
    },
}

#[derive(Debug, Default)]
pub struct UploadSession {
    phase: Phase,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        match &self.phase {
            Phase::Selected(image) | Phase::Analyzing(image) | Phase::Result { image, .. } => {
                Some(image)
            }
            Phase::Landing | Phase::Empty => None,
        }
    }

    pub fn analysis(&self) -> Option<&str> {
        match &self.phase {
            Phase::Result { analysis, .. } => Some(analysis),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Analyzing(_))
    }

    /// "Get Started".
    pub fn start(&mut self) {
        if self.phase == Phase::Landing {
            self.phase = Phase::Empty;
        }
    }

    /// Picks or drops a file. Non-image files, and files offered outside the
    /// upload panel, are ignored; returns whether the selection changed.
    pub fn select(
        &mut self,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> bool {
        if !matches!(self.phase, Phase::Empty | Phase::Selected(_)) {
            return false;
        }
        match SelectedImage::new(file_name, mime_type, bytes) {
            Some(image) => {
                self.phase = Phase::Selected(image);
                true
            }
            None => false,
        }
    }

    /// "Remove Image".
    pub fn remove(&mut self) {
        if matches!(self.phase, Phase::Selected(_)) {
            self.phase = Phase::Empty;
        }
    }

    /// Enters the busy state and hands back the image to submit. Returns
    /// `None` if nothing is selected or a request is already in flight.
    pub fn begin_analysis(&mut self) -> Option<SelectedImage> {
        match mem::take(&mut self.phase) {
            Phase::Selected(image) => {
                self.phase = Phase::Analyzing(image.clone());
                Some(image)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Applies the endpoint's answer. On failure the selection is kept and
    /// the message to alert with is returned.
    pub fn finish(&mut self, outcome: Result<String, String>) -> Option<String> {
        match mem::take(&mut self.phase) {
            Phase::Analyzing(image) => match outcome {
                Ok(analysis) => {
                    self.phase = Phase::Result { image, analysis };
                    None
                }
                Err(message) => {
                    self.phase = Phase::Selected(image);
                    Some(message)
                }
            },
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// "Analyze Another": drops the file and the result, keeps the upload panel open.
    pub fn analyze_another(&mut self) {
        if matches!(self.phase, Phase::Result { .. }) {
            self.phase = Phase::Empty;
        }
    }

    /// "Back to Home".
    pub fn back(&mut self) {
        self.phase = Phase::Landing;
    }
}
