use serde::{Deserialize, Serialize};

const WORDS_PER_MINUTE: usize = 200;
const EXCERPT_CHARS: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "draft" => Some(PostStatus::Draft),
            "scheduled" => Some(PostStatus::Scheduled),
            "published" => Some(PostStatus::Published),
            "archived" => Some(PostStatus::Archived),
            _ => None,
        }
    }

    /// True when moving from `prev` (None for a brand-new post) into `self` publishes the post.
    pub fn publishes_from(&self, prev: Option<PostStatus>) -> bool {
        *self == PostStatus::Published && prev != Some(PostStatus::Published)
    }
}

/// Estimated reading time in whole minutes, never below one.
pub fn read_time_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as i32
}

/// Default excerpt: markup stripped, first 160 characters, then an ellipsis.
pub fn derive_excerpt(content: &str) -> String {
    let text = strip_tags(content);
    let mut excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

fn strip_tags(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut tag_start: Option<usize> = None;
    for (idx, ch) in content.char_indices() {
        match (ch, tag_start) {
            ('<', None) => tag_start = Some(idx),
            ('>', Some(_)) => tag_start = None,
            (_, None) => out.push(ch),
            _ => {}
        }
    }
    // An unterminated `<` is literal text, not markup.
    if let Some(start) = tag_start {
        out.push_str(&content[start..]);
    }
    out
}
