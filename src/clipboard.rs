//! Copy-to-clipboard with a user-facing notification.

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard, via `arboard` on desktop and mobile builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    #[cfg(all(
        not(target_arch = "wasm32"),
        any(feature = "desktop", feature = "mobile")
    ))]
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }

    #[cfg(not(all(
        not(target_arch = "wasm32"),
        any(feature = "desktop", feature = "mobile")
    )))]
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "no clipboard on this platform".to_string(),
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient toast shown after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl Notification {
    pub fn class(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "toast success",
            NotificationKind::Error => "toast error",
        }
    }
}

pub const COPY_SUCCESS: Notification = Notification {
    kind: NotificationKind::Success,
    title: "Copied!",
    description: "Git diff copied to clipboard",
};

pub const COPY_FAILURE: Notification = Notification {
    kind: NotificationKind::Error,
    title: "Failed to copy",
    description: "Could not copy diff to clipboard",
};

pub fn copy_diff(clipboard: &mut dyn Clipboard, diff: &str) -> Notification {
    match clipboard.set_text(diff) {
        Ok(()) => {
            tracing::debug!(bytes = diff.len(), "diff copied to clipboard");
            COPY_SUCCESS
        }
        Err(err) => {
            tracing::warn!(error = %err, "copying diff failed");
            COPY_FAILURE
        }
    }
}
