use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use odia_translator::{
    clipboard, Config, GeminiClient, InputController, Language, Phase, SessionEvent, Translator,
};
use odia_translator::history::HistoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when unset in the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("odia_translator=info".parse()?),
        )
        .init();

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(model = %config.gemini_model, "Starting Odia translator session");

    let translator: Arc<dyn Translator> = Arc::new(GeminiClient::new(&config));
    let history = HistoryStore::load(&config.history_path);
    let (controller, view) =
        InputController::new(translator, history, Duration::from_millis(config.debounce_ms));

    let (events, event_rx) = mpsc::channel::<SessionEvent>(32);
    let controller_task = tokio::spawn(controller.run(event_rx));

    // Print each new translation as it lands.
    let mut display = view.clone();
    tokio::spawn(async move {
        let mut last_output = String::new();
        while display.changed().await.is_ok() {
            let state = display.borrow_and_update().clone();
            if state.phase == Phase::Displaying
                && !state.output.is_empty()
                && state.output != last_output
            {
                println!("-> {}", state.output);
                last_output = state.output;
            }
        }
    });

    println!("Translate English & Hindi to Odia.");
    println!(
        "Type text to translate after a short pause. Commands: \
         :translate  :lang <auto|en|hi>  :copy  :history  :clear  :quit"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            let _ = events.send(SessionEvent::Shutdown).await;
            break;
        };
        let trimmed = line.trim();

        if let Some(command) = trimmed.strip_prefix(':') {
            let mut parts = command.split_whitespace();
            match parts.next().unwrap_or_default() {
                "quit" | "q" => {
                    let _ = events.send(SessionEvent::Shutdown).await;
                    break;
                }
                "translate" | "t" => {
                    let _ = events.send(SessionEvent::TranslateNow).await;
                }
                "lang" => match parts.next().and_then(Language::parse_hint) {
                    Some(lang) => {
                        println!("Source language: {lang}");
                        let _ = events.send(SessionEvent::SourceLanguageChanged(lang)).await;
                    }
                    None => println!("Usage: :lang <auto|en|hi>"),
                },
                "copy" => {
                    let state = view.borrow().clone();
                    if !state.can_copy {
                        println!("Nothing to copy yet.");
                    } else {
                        match clipboard::copy_text(&state.output) {
                            Ok(()) => println!("Copied!"),
                            Err(e) => println!("Copy failed: {e}"),
                        }
                    }
                }
                "history" => {
                    let state = view.borrow().clone();
                    if state.history.is_empty() {
                        println!("No translations yet.");
                    }
                    for record in &state.history {
                        println!(
                            "[{}] {} -> {}",
                            record.source_lang, record.source_text, record.translated_text
                        );
                    }
                }
                "clear" => {
                    let _ = events.send(SessionEvent::ClearHistory).await;
                    println!("History cleared.");
                }
                other => println!("Unknown command: :{other}"),
            }
            continue;
        }

        let _ = events.send(SessionEvent::TextChanged(line)).await;
    }

    let _ = controller_task.await;
    info!("Session ended");
    Ok(())
}
