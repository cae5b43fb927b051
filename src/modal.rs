//! Modal dialog for adding or editing an entry
//!
//! The dialog is a small state machine:
//!
//! ```text
//! Closed --open_new/open_existing--> Editing --submit/cancel--> Closed
//! ```
//!
//! Submitting blank content is treated exactly like cancelling. The host
//! keeps a global key listener attached only while [`EditDialog::listens_for_keys`]
//! is true.

use crate::platform::Device;

/// What a submitted dialog applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTarget {
    /// Create a new entry
    New,
    /// Replace the content of the entry at this index
    Existing(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DialogState {
    #[default]
    Closed,
    Editing {
        target: DialogTarget,
        content: String,
    },
}

/// How the dialog closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Submitted { target: DialogTarget, content: String },
    Cancelled,
}

/// A key press as seen by the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key` value, e.g. `Enter`
    pub key: String,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Result of feeding a key press to the dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyResponse {
    pub prevent_default: bool,
    pub outcome: Option<DialogOutcome>,
}

#[derive(Debug, Clone, Default)]
pub struct EditDialog {
    state: DialogState,
}

impl EditDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open empty, for a new entry
    pub fn open_new(&mut self) {
        self.state = DialogState::Editing {
            target: DialogTarget::New,
            content: String::new(),
        };
    }

    /// Open pre-filled with the entry at `index`
    pub fn open_existing(&mut self, index: usize, content: &str) {
        self.state = DialogState::Editing {
            target: DialogTarget::Existing(index),
            content: content.to_string(),
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Editing { .. })
    }

    /// Whether the global key listener should be attached
    pub fn listens_for_keys(&self) -> bool {
        self.is_open()
    }

    pub fn target(&self) -> Option<DialogTarget> {
        match &self.state {
            DialogState::Editing { target, .. } => Some(*target),
            DialogState::Closed => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.state {
            DialogState::Editing { content, .. } => Some(content),
            DialogState::Closed => None,
        }
    }

    /// Replace the edited text; ignored while closed
    pub fn set_content(&mut self, text: impl Into<String>) {
        if let DialogState::Editing { content, .. } = &mut self.state {
            *content = text.into();
        }
    }

    /// Clear the edited text without closing
    pub fn reset(&mut self) {
        self.set_content(String::new());
    }

    /// Close, yielding the content only if it is not blank
    pub fn submit(&mut self) -> DialogOutcome {
        match std::mem::take(&mut self.state) {
            DialogState::Editing { target, content } => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    DialogOutcome::Cancelled
                } else {
                    DialogOutcome::Submitted {
                        target,
                        content: trimmed.to_string(),
                    }
                }
            }
            DialogState::Closed => DialogOutcome::Cancelled,
        }
    }

    pub fn cancel(&mut self) -> DialogOutcome {
        self.state = DialogState::Closed;
        DialogOutcome::Cancelled
    }

    /// Enter (without Shift) submits on desktop; Escape cancels anywhere
    pub fn handle_key(&mut self, key: &KeyPress, device: Device) -> KeyResponse {
        if !self.is_open() {
            return KeyResponse::default();
        }
        match key.key.as_str() {
            "Enter" if !key.shift && device.is_desktop() => KeyResponse {
                prevent_default: true,
                outcome: Some(self.submit()),
            },
            "Escape" => KeyResponse {
                prevent_default: true,
                outcome: Some(self.cancel()),
            },
            _ => KeyResponse::default(),
        }
    }
}
