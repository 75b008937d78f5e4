use crate::domain::entities::ai_generation::{GenerationKind, Tone};

pub const DEFAULT_WORD_COUNT: u32 = 1000;
const MIN_MAX_TOKENS: u32 = 500;
const MAX_MAX_TOKENS: u32 = 4000;

/// Everything needed to phrase one completion request.
#[derive(Debug, Clone)]
pub struct PromptInput<'a> {
    pub kind: GenerationKind,
    pub prompt: Option<&'a str>,
    pub content: Option<&'a str>,
    pub context: Option<&'a str>,
    pub tone: Tone,
    pub word_count: u32,
    pub language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

/// Token budget: 1.5 tokens per requested word, clamped to [500, 4000].
pub fn max_tokens_for(word_count: u32) -> u32 {
    let wanted = (u64::from(word_count) * 3).div_ceil(2);
    wanted.clamp(u64::from(MIN_MAX_TOKENS), u64::from(MAX_MAX_TOKENS)) as u32
}

pub fn build(input: &PromptInput<'_>) -> Prompt {
    let topic = input.prompt.unwrap_or_default();
    let content = input.content.unwrap_or_default();
    let language = input.language;
    let words = input.word_count;

    let (system, user) = match input.kind {
        GenerationKind::Post => {
            let system = format!(
                "You are a professional blog writer who creates engaging, well-structured content.\n\
                 Write in {language}.\n\
                 {tone}\n\
                 Use markdown formatting where appropriate.\n\
                 The article should be roughly {words} words long.",
                tone = input.tone.instruction(),
            );
            let context = input
                .context
                .filter(|c| !c.trim().is_empty())
                .map(|c| format!("Additional context: {c}"))
                .unwrap_or_default();
            let user = format!(
                "Write a blog article about: {topic}\n\n\
                 {context}\n\n\
                 The article must have:\n\
                 - An attractive title\n\
                 - An engaging introduction\n\
                 - 3-5 sections with clear subheadings\n\
                 - Practical examples where relevant\n\
                 - A conclusion with a call to action\n\n\
                 Target length: {words} words"
            );
            (system, user)
        }
        GenerationKind::Title => (
            format!(
                "You are an SEO and copywriting specialist.\n\
                 Generate blog titles optimized for engagement and search.\n\
                 Reply only with the titles, one per line, in {language}.\n\
                 {tone}",
                tone = input.tone.instruction(),
            ),
            format!("Generate 5 blog titles for: {topic}"),
        ),
        GenerationKind::Excerpt => (
            format!(
                "You are a specialist in content summaries.\n\
                 Write short, engaging summaries in {language} that make the reader want more.\n\
                 Maximum of 160 characters."
            ),
            format!("Write a summary for this content:\n\n{content}"),
        ),
        GenerationKind::Seo => (
            "You are an SEO specialist.\n\
             Analyze the content and suggest search engine optimizations.\n\
             Reply in JSON with: { meta_title, meta_description, keywords }"
                .to_string(),
            format!(
                "Analyze this content and suggest a meta title (max 60 characters), \
                 a meta description (max 160 characters) and keywords:\n\n{content}"
            ),
        ),
        GenerationKind::Transcription => (
            format!(
                "You turn video transcripts into blog articles.\n\
                 Keep the key information but rewrite it as an article in {language}.\n\
                 Add subheadings and organize the content logically.\n\
                 {tone}",
                tone = input.tone.instruction(),
            ),
            format!("Turn this transcript into a professional blog article:\n\n{content}"),
        ),
    };

    Prompt {
        system,
        user,
        max_tokens: max_tokens_for(words),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(kind: GenerationKind) -> PromptInput<'static> {
        PromptInput {
            kind,
            prompt: Some("rust web services"),
            content: Some("transcript body"),
            context: None,
            tone: Tone::Casual,
            word_count: DEFAULT_WORD_COUNT,
            language: "English",
        }
    }

    #[test]
    fn given_word_counts_when_budgeting_should_clamp_tokens() {
        assert_eq!(max_tokens_for(100), 500);
        assert_eq!(max_tokens_for(1000), 1500);
        assert_eq!(max_tokens_for(333), 500);
        assert_eq!(max_tokens_for(1001), 1502);
        assert_eq!(max_tokens_for(10_000), 4000);
    }

    #[test]
    fn given_post_kind_should_embed_topic_tone_and_length() {
        let prompt = build(&input(GenerationKind::Post));
        assert!(prompt.user.contains("rust web services"));
        assert!(prompt.user.contains("1000 words"));
        assert!(prompt.system.contains(Tone::Casual.instruction()));
        assert!(prompt.system.contains("English"));
        assert!(!prompt.user.contains("Additional context"));
    }

    #[test]
    fn given_post_with_context_should_include_it() {
        let mut req = input(GenerationKind::Post);
        req.context = Some("aimed at beginners");
        let prompt = build(&req);
        assert!(prompt.user.contains("Additional context: aimed at beginners"));
    }

    #[test]
    fn given_transcription_kind_should_rewrite_content() {
        let prompt = build(&input(GenerationKind::Transcription));
        assert!(prompt.user.ends_with("transcript body"));
    }

    #[test]
    fn given_seo_kind_should_ask_for_json() {
        let prompt = build(&input(GenerationKind::Seo));
        assert!(prompt.system.contains("meta_title"));
    }
}
