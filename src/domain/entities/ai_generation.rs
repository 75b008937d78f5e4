/// What the completion provider is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Post,
    Title,
    Excerpt,
    Seo,
    Transcription,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Post => "post",
            GenerationKind::Title => "title",
            GenerationKind::Excerpt => "excerpt",
            GenerationKind::Seo => "seo",
            GenerationKind::Transcription => "transcription",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "post" => Some(GenerationKind::Post),
            "title" => Some(GenerationKind::Title),
            "excerpt" => Some(GenerationKind::Excerpt),
            "seo" => Some(GenerationKind::Seo),
            "transcription" => Some(GenerationKind::Transcription),
            _ => None,
        }
    }

    /// Post and title work from a topic prompt; the rest rewrite existing content.
    pub fn needs_prompt(&self) -> bool {
        matches!(self, GenerationKind::Post | GenerationKind::Title)
    }
}

/// Writing voice. Unknown names fall back to `Professional`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Casual,
    Friendly,
    Formal,
    Technical,
    Persuasive,
}

impl Tone {
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.unwrap_or("professional") {
            "casual" => Tone::Casual,
            "friendly" => Tone::Friendly,
            "formal" => Tone::Formal,
            "technical" => Tone::Technical,
            "persuasive" => Tone::Persuasive,
            _ => Tone::Professional,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Professional => "Use a professional, objective tone.",
            Tone::Casual => "Use a casual, relaxed tone, like a conversation between friends.",
            Tone::Friendly => "Use a friendly, welcoming tone.",
            Tone::Formal => "Use a formal, elegant tone.",
            Tone::Technical => {
                "Use a technical, detailed tone with domain terminology where appropriate."
            }
            Tone::Persuasive => {
                "Use a persuasive, convincing tone that focuses on benefits and arguments."
            }
        }
    }
}
