// src/utils/html.rs

/// Clean user-authored text using the ammonia library.
///
/// Whitelist-based sanitization: safe tags (like <b>, <p>) survive,
/// dangerous ones (<script>, <iframe>) and malicious attributes (onclick)
/// are stripped. Applied to chat messages and feedback comments before they
/// are persisted, as a fail-safe against stored XSS in whatever client
/// renders them.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_tags() {
        let cleaned = clean_html("hello <script>alert('x')</script>world");
        assert!(!cleaned.contains("script"));
        assert!(cleaned.contains("hello"));
    }
}
