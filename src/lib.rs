//! Debounced English/Hindi to Odia translation assistant.
//!
//! Three components make up the crate: [`gemini::GeminiClient`], a stateless
//! adapter over the hosted generative-text service; [`history::HistoryStore`],
//! a bounded newest-first log persisted to a single JSON file; and
//! [`controller::InputController`], the debounce state machine that ties text
//! edits, requests and history together. `main.rs` wires them into an
//! interactive terminal session.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod gemini;
pub mod history;
pub mod language;

pub use config::Config;
pub use controller::{InputController, Phase, SessionEvent, ViewState, TRANSLATE_FAILURE_MESSAGE};
pub use gemini::{GeminiClient, TranslateError, Translation, Translator, TRANSLATION_FAILED};
pub use history::{HistoryStore, TranslationRecord, HISTORY_CAPACITY, VISIBLE_HISTORY};
pub use language::Language;
