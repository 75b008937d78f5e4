const KEY_PREFIX: &str = "eb_";

/// A fresh key: `eb_` followed by 64 hex characters from two random v4 UUIDs.
pub fn generate_api_key() -> String {
    let first = uuid::Uuid::new_v4();
    let second = uuid::Uuid::new_v4();
    format!("{KEY_PREFIX}{}{}", first.simple(), second.simple())
}

/// Display form for listings: first 8 characters, `...`, last 4.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "...".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
