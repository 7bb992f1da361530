//! Mock response engine for the Willow chat demo.
//!
//! No model anywhere: an ordered regex table maps a prompt to one of a
//! fixed set of canned reply texts, and a typewriter stream reveals the
//! chosen text token by token to imitate live generation. Random selection
//! sits behind [`RandomSource`] so tests can pin outputs.

mod catalog;
mod classify;
mod engine;
mod random;
mod stream;

pub use catalog::{suggested_prompts, FALLBACK_RESPONSE};
pub use classify::Category;
pub use engine::Responder;
pub use random::{RandomSource, StepRandom, ThreadRandom};
pub use stream::{stream_text, tokenize, StreamHandle};
