//! Prompt events received from Claude Code.
//!
//! The hook receives one JSON record per user prompt on stdin:
//!
//! ```json
//! {
//!   "session_id": "abc123",
//!   "prompt": "write a react hook",
//!   "meta": { "file": "apps/web/src/App.tsx", "fileContent": "...", "branch": "feat/x" }
//! }
//! ```
//!
//! Input problems never abort the hook: anything that cannot be read as an
//! event becomes an empty event, which evaluates to a no-op. Fields other
//! than `prompt` are read leniently, so a value of the wrong type is dropped
//! without discarding the prompt.

use serde::{Deserialize, Serialize};

use crate::serde_ext::{lenient_object, lenient_string, null_as_default};

/// Optional file context attached to a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    /// Path of the file the prompt concerns.
    #[serde(default, deserialize_with = "lenient_string")]
    pub file: Option<String>,

    /// Contents of that file, if the caller already has them.
    #[serde(default, rename = "fileContent", deserialize_with = "lenient_string")]
    pub file_content: Option<String>,

    /// Current branch. Carried through but not used for matching.
    #[serde(default, deserialize_with = "lenient_string")]
    pub branch: Option<String>,
}

/// A single prompt submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEvent {
    /// Unique session identifier.
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,

    /// Path to the transcript file.
    #[serde(default, deserialize_with = "lenient_string")]
    pub transcript_path: Option<String>,

    /// Working directory of the session.
    #[serde(default, deserialize_with = "lenient_string")]
    pub cwd: Option<String>,

    /// Permission mode (e.g., "default", "plan").
    #[serde(default, deserialize_with = "lenient_string")]
    pub permission_mode: Option<String>,

    /// The hook event name (normally "UserPromptSubmit").
    #[serde(default, deserialize_with = "lenient_string")]
    pub hook_event_name: Option<String>,

    /// The user's prompt text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,

    /// File context.
    #[serde(default, deserialize_with = "lenient_object")]
    pub meta: EventMeta,
}

impl PromptEvent {
    /// Create an event with just a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set the file path.
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.meta.file = Some(path.into());
        self
    }

    /// Set the file content.
    pub fn with_file_content(mut self, content: impl Into<String>) -> Self {
        self.meta.file_content = Some(content.into());
        self
    }

    /// Parse a raw stdin payload.
    ///
    /// Empty input yields an empty event. Malformed JSON is logged and also
    /// yields an empty event.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<PromptEvent>(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Invalid JSON on stdin: {}", e);
                Self::default()
            }
        }
    }

    /// The prompt with surrounding whitespace removed.
    pub fn prompt(&self) -> &str {
        self.prompt.trim()
    }

    /// Whether there is a prompt to evaluate.
    pub fn has_prompt(&self) -> bool {
        !self.prompt().is_empty()
    }

    /// The trimmed file path, if one was supplied and is non-empty.
    pub fn file_path(&self) -> Option<&str> {
        self.meta
            .file
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    /// The supplied file content, if non-empty.
    pub fn supplied_content(&self) -> Option<&str> {
        self.meta
            .file_content
            .as_deref()
            .filter(|content| !content.is_empty())
    }
}
