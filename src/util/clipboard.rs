//! Clipboard export of composed requests.

use crate::error::Result;
use arboard::Clipboard;

/// Separator between request strings on the clipboard.
pub const REQUEST_SEPARATOR: &str = ", ";

/// Join request strings and put them on the system clipboard.
///
/// Returns the copied text.
pub fn copy_requests<S: AsRef<str>>(requests: &[S]) -> Result<String> {
    let text = requests
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(REQUEST_SEPARATOR);
    Clipboard::new()?.set_text(text.as_str())?;
    tracing::debug!("Copied {} requests to clipboard", requests.len());
    Ok(text)
}
