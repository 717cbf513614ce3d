use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard, best effort.
///
/// Callers gate on [`crate::controller::ViewState::can_copy`]; failures here
/// (headless session, no clipboard service) are reported but never fatal.
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text)
        .context("Failed to write clipboard")?;
    Ok(())
}
