/// Video platforms the transcription provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    Instagram,
}

impl Platform {
    /// Substring match on the URL; no parsing is attempted.
    pub fn detect(url: &str) -> Option<Self> {
        if url.contains("youtube.com") || url.contains("youtu.be") {
            Some(Platform::YouTube)
        } else if url.contains("instagram.com") {
            Some(Platform::Instagram)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
        }
    }
}
