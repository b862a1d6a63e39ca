use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// A one-shot toast notification shown on the next rendered page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashMessage {
    pub title: String,
    pub description: String,
    pub kind: FlashKind,
}

impl FlashMessage {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: FlashKind::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: FlashKind::Error,
        }
    }

    /// CSS modifier for the toast.
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "toast-success",
            FlashKind::Error => "toast-destructive",
        }
    }
}
