//! Coarse topic classification for prompts that miss every
//! prompt-specific pattern.
//!
//! The checks run in a fixed priority order; the first hit wins, so the
//! narrow patterns (exact greetings, acknowledgments) sit above the broad
//! keyword nets. Reordering them changes behavior.

use once_cell::sync::Lazy;
use regex::Regex;

/// Coarse response category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Greeting,
    Help,
    Acknowledge,
    Summarize,
    Code,
    Explain,
    Ui,
    Api,
    General,
}

static GREETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(hi|hey|hello|howdy|yo|sup|what'?s up|good morning|good afternoon|good evening)[\s!?.]*$",
    )
    .unwrap()
});

static HELP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)what can you do|what can you help|how can you help|help me|capabilities|what are you|who are you|get started|what do you do",
    )
    .unwrap()
});

static ACKNOWLEDGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(thanks|thank you|thx|ty|got it|perfect|great)[\s!?.]*$").unwrap());

static ATTACHMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)attached|attachment|file\(s\)|\.pdf|\.png|\.jpg|\.txt|\.md|\.json|\.csv").unwrap()
});

static SUMMARIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)summarize|summary|summarise|tl;?dr|brief|overview|recap|key points|insights")
        .unwrap()
});

static CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)code|component|function|implement|typescript|javascript|react|python|write.*schema|generate.*code|create.*component",
    )
    .unwrap()
});

static EXPLAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)explain|what is|how does|why does|meaning of|understand|describe|how.*work")
        .unwrap()
});

static UI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)dashboard|ui|interface|design|layout|button|modal|component|responsive|tailwind")
        .unwrap()
});

static API: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)api|endpoint|rest|graphql|request|response|schema").unwrap());

/// Classify a trimmed, non-empty prompt
pub fn detect_category(prompt: &str) -> Category {
    if GREETING.is_match(prompt) {
        return Category::Greeting;
    }
    if HELP.is_match(prompt) {
        return Category::Help;
    }
    if ACKNOWLEDGE.is_match(prompt) {
        return Category::Acknowledge;
    }
    if ATTACHMENT.is_match(prompt) || SUMMARIZE.is_match(prompt) {
        return Category::Summarize;
    }
    if CODE.is_match(prompt) {
        return Category::Code;
    }
    if EXPLAIN.is_match(prompt) {
        return Category::Explain;
    }
    if UI.is_match(prompt) {
        return Category::Ui;
    }
    if API.is_match(prompt) {
        return Category::Api;
    }
    Category::General
}

static LEADING_VERBS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(explain|what is|how does|why does|describe|tell me about|generate|create|write|build|design|make)\s+",
    )
    .unwrap()
});

static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?+\.*$").unwrap());

static SUBJECT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s-]+").unwrap());

/// Extract the main subject phrase from a prompt, for interpolation into
/// explain-style templates. Falls back to "that".
pub fn extract_subject(prompt: &str) -> String {
    let lower = prompt.to_lowercase();
    let cleaned = LEADING_VERBS.replace(lower.trim(), "");
    let cleaned = TRAILING_PUNCT.replace(&cleaned, "");
    let cleaned = cleaned.trim();

    let phrase = match SUBJECT_RUN.find(cleaned) {
        Some(m) => m.as_str().trim().to_string(),
        None => cleaned.chars().take(40).collect::<String>(),
    };

    if phrase.is_empty() {
        "that".to_string()
    } else {
        phrase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_only_matches_bare_greetings() {
        assert_eq!(detect_category("Hello!"), Category::Greeting);
        assert_eq!(detect_category("good morning"), Category::Greeting);
        // a greeting followed by a real question is not a greeting
        assert_ne!(detect_category("hello, explain JWT"), Category::Greeting);
    }

    #[test]
    fn test_priority_order_is_fixed() {
        // "summarize this code" hits summarize before code
        assert_eq!(detect_category("summarize this code"), Category::Summarize);
        // code outranks explain
        assert_eq!(
            detect_category("explain this react component"),
            Category::Code
        );
    }

    #[test]
    fn test_attachment_keywords_route_to_summarize() {
        assert_eq!(
            detect_category("what does the attached report.pdf say"),
            Category::Summarize
        );
    }

    #[test]
    fn test_unmatched_prompt_is_general() {
        assert_eq!(detect_category("plan my week"), Category::General);
    }

    #[test]
    fn test_extract_subject_strips_interrogatives() {
        assert_eq!(extract_subject("What is JWT?"), "jwt");
        assert_eq!(extract_subject("Explain dependency injection"), "dependency injection");
    }

    #[test]
    fn test_extract_subject_takes_leading_word_run() {
        assert_eq!(
            extract_subject("describe event loops (in browsers)"),
            "event loops"
        );
    }

    #[test]
    fn test_extract_subject_falls_back_to_that() {
        assert_eq!(extract_subject("???"), "that");
    }
}
