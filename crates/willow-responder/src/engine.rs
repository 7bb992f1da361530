use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::catalog::{category_pool, prompt_specific, FALLBACK_RESPONSE};
use crate::classify::{detect_category, extract_subject, Category};
use crate::random::{RandomSource, ThreadRandom};

/// Probability of prefixing a short prompt's reply with an echo of it
const ECHO_PROBABILITY: f64 = 0.2;

/// Echoed prompts are cut at this many characters
const ECHO_MAX_CHARS: usize = 50;

/// Prompts at or above this length never get the echo prefix
const ECHO_PROMPT_LIMIT: usize = 100;

static ATTACHMENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\n\n\[Attached:.*\]\s*$").unwrap());

/// Canned-response picker.
///
/// Same input may yield different output across calls; that variety is the
/// point of the demo. Inject a scripted [`RandomSource`] to pin it down.
pub struct Responder<R: RandomSource = ThreadRandom> {
    random: R,
}

impl Responder<ThreadRandom> {
    pub fn new() -> Self {
        Self::with_random(ThreadRandom::new())
    }
}

impl Default for Responder<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Responder<R> {
    pub fn with_random(random: R) -> Self {
        Self { random }
    }

    /// Map a prompt to a full reply text.
    ///
    /// Never fails: any input, including empty, maps to some text.
    pub fn respond(&mut self, prompt: &str) -> String {
        let stripped = ATTACHMENT_MARKER.replace(prompt, "");
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            return FALLBACK_RESPONSE.to_string();
        }

        // Specific patterns outrank the coarse categories; first match wins.
        for entry in prompt_specific() {
            if entry.pattern.is_match(trimmed) {
                return self.pick(entry.responses).to_string();
            }
        }

        let category = detect_category(trimmed);
        debug!("classified prompt as {category:?}");
        let template = self.pick(category_pool(category));
        let response = if category == Category::Explain {
            template.replace("{subject}", &extract_subject(trimmed))
        } else {
            template.to_string()
        };

        if trimmed.chars().count() < ECHO_PROMPT_LIMIT && self.random.chance(ECHO_PROBABILITY) {
            return format!("Regarding \"{}\" — {}", truncate_for_echo(trimmed), response);
        }
        response
    }

    fn pick(&mut self, pool: &'static [&'static str]) -> &'static str {
        pool[self.random.pick_index(pool.len())]
    }
}

fn truncate_for_echo(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= ECHO_MAX_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(ECHO_MAX_CHARS).collect();
    format!("{}…", cut.trim_end())
}
