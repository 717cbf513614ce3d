//! Input controller: mediates between raw text edits and the translation
//! client, debouncing requests and feeding completed translations into the
//! history log.
//!
//! The controller is a single owning task. Events arrive on an mpsc channel,
//! view updates leave on a watch channel, and all mutable state lives inside
//! the task, so no locking is needed. The only suspension points are the
//! debounce sleep and the in-flight request task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::gemini::{TranslateError, Translation, Translator};
use crate::history::{HistoryStore, TranslationRecord};
use crate::language::Language;

/// Shown in place of a translation when the transport fails.
pub const TRANSLATE_FAILURE_MESSAGE: &str =
    "Error connecting to AI. Please check your connection.";

/// Where the controller currently is in its input cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No text, nothing displayed.
    Idle,
    /// Text present, debounce timer running, no request in flight.
    Pending,
    /// A request is in flight.
    Translating,
    /// A result is displayed; no timer or request active.
    Displaying,
}

/// Events the surrounding surface feeds into the controller.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    TextChanged(String),
    SourceLanguageChanged(Language),
    /// Explicit trigger; ignored while the text is empty or a request is
    /// already in flight.
    TranslateNow,
    ClearHistory,
    Shutdown,
}

/// Snapshot of everything a front end needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub input: String,
    pub source_lang: Language,
    pub output: String,
    /// Newest-first, capped for compact display.
    pub history: Vec<TranslationRecord>,
    /// Copying is allowed only when something is displayed and no request
    /// is in flight.
    pub can_copy: bool,
}

struct InFlight {
    /// Trimmed text this request was issued for. Completions are applied
    /// only while it still matches the current input.
    text: String,
    source: Language,
    task: JoinHandle<Result<Translation, TranslateError>>,
}

enum Wake {
    Event(Option<SessionEvent>),
    DebounceElapsed,
    RequestFinished(Result<Result<Translation, TranslateError>, JoinError>),
}

pub struct InputController {
    translator: Arc<dyn Translator>,
    history: HistoryStore,
    debounce: Duration,
    text: String,
    source_lang: Language,
    output: String,
    phase: Phase,
    deadline: Option<Instant>,
    in_flight: Option<InFlight>,
    view_tx: watch::Sender<ViewState>,
}

impl InputController {
    pub fn new(
        translator: Arc<dyn Translator>,
        history: HistoryStore,
        debounce: Duration,
    ) -> (Self, watch::Receiver<ViewState>) {
        let initial = ViewState {
            phase: Phase::Idle,
            input: String::new(),
            source_lang: Language::AutoDetect,
            output: String::new(),
            history: history.visible().to_vec(),
            can_copy: false,
        };
        let (view_tx, view_rx) = watch::channel(initial);
        let controller = Self {
            translator,
            history,
            debounce,
            text: String::new(),
            source_lang: Language::AutoDetect,
            output: String::new(),
            phase: Phase::Idle,
            deadline: None,
            in_flight: None,
            view_tx,
        };
        (controller, view_rx)
    }

    /// Drive the controller until `Shutdown` arrives or the event channel
    /// closes. Returns the history store so the caller can keep using it.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) -> HistoryStore {
        loop {
            let wake = {
                let deadline = self.deadline;
                let in_flight = self.in_flight.as_mut();
                tokio::select! {
                    event = events.recv() => Wake::Event(event),
                    () = async {
                        match deadline {
                            Some(at) => tokio::time::sleep_until(at).await,
                            None => std::future::pending().await,
                        }
                    } => Wake::DebounceElapsed,
                    joined = async {
                        match in_flight {
                            Some(request) => (&mut request.task).await,
                            None => std::future::pending().await,
                        }
                    } => Wake::RequestFinished(joined),
                }
            };

            match wake {
                Wake::Event(None) | Wake::Event(Some(SessionEvent::Shutdown)) => break,
                Wake::Event(Some(event)) => self.handle_event(event),
                Wake::DebounceElapsed => {
                    self.deadline = None;
                    self.begin_translation();
                }
                Wake::RequestFinished(joined) => self.finish_translation(joined),
            }
            self.publish();
        }
        self.history
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TextChanged(text) => self.set_text(text),
            SessionEvent::SourceLanguageChanged(lang) => self.set_source_language(lang),
            SessionEvent::TranslateNow => self.translate_now(),
            SessionEvent::ClearHistory => self.history.clear(),
            // Intercepted by the run loop.
            SessionEvent::Shutdown => {}
        }
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        if self.text.trim().is_empty() {
            // Empty input clears the display immediately and never issues
            // a request.
            self.output.clear();
            self.phase = Phase::Idle;
            self.deadline = None;
            self.abort_in_flight();
        } else {
            self.phase = Phase::Pending;
            self.deadline = Some(Instant::now() + self.debounce);
        }
    }

    fn set_source_language(&mut self, lang: Language) {
        self.source_lang = lang;
        // The hint is part of the request, so changing it re-debounces
        // exactly like an edit.
        if !self.text.trim().is_empty() {
            self.phase = Phase::Pending;
            self.deadline = Some(Instant::now() + self.debounce);
        }
    }

    fn translate_now(&mut self) {
        if self.text.trim().is_empty() || self.in_flight.is_some() {
            return;
        }
        self.deadline = None;
        self.begin_translation();
    }

    fn begin_translation(&mut self) {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.abort_in_flight();
        let source = self.source_lang;
        let translator = Arc::clone(&self.translator);
        let task = tokio::spawn({
            let text = text.clone();
            async move { translator.translate(&text, source).await }
        });
        self.in_flight = Some(InFlight { text, source, task });
        self.phase = Phase::Translating;
    }

    fn finish_translation(
        &mut self,
        joined: Result<Result<Translation, TranslateError>, JoinError>,
    ) {
        let Some(request) = self.in_flight.take() else {
            return;
        };
        let result = match joined {
            Ok(result) => result,
            Err(e) => {
                if e.is_panic() {
                    warn!("Translation task panicked: {e}");
                }
                return;
            }
        };

        // Only apply a response whose originating text still matches the
        // current input; anything else is stale and dropped silently.
        if request.text != self.text.trim() {
            debug!("Discarding stale translation response");
            return;
        }

        match result {
            Ok(translation) => {
                self.output = translation.text.clone();
                self.history.append(TranslationRecord::new(
                    request.text,
                    translation.text,
                    request.source,
                ));
            }
            Err(e) => {
                warn!("Translation request failed: {e}");
                self.output = TRANSLATE_FAILURE_MESSAGE.to_string();
            }
        }
        // A newer edit may already have re-armed the timer.
        self.phase = if self.deadline.is_some() {
            Phase::Pending
        } else {
            Phase::Displaying
        };
    }

    fn abort_in_flight(&mut self) {
        if let Some(request) = self.in_flight.take() {
            request.task.abort();
        }
    }

    fn can_copy(&self) -> bool {
        !self.output.is_empty() && self.phase != Phase::Translating
    }

    fn publish(&self) {
        self.view_tx.send_replace(ViewState {
            phase: self.phase,
            input: self.text.clone(),
            source_lang: self.source_lang,
            output: self.output.clone(),
            history: self.history.visible().to_vec(),
            can_copy: self.can_copy(),
        });
    }
}
