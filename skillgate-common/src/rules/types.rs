//! Skill rule types.
//!
//! Skills are declared in `skill-rules.json` as a mapping from skill name to a
//! record describing when the skill activates (prompt and file triggers), how
//! urgently it is surfaced (priority), and whether it is a blocking guardrail.

use serde::{Deserialize, Deserializer, Serialize};

use crate::serde_ext::{null_as_default, optional_object};

/// Priority tier used to group matched skills in the activation banner.
///
/// Parsing is lenient: values are compared case-insensitively and anything
/// unrecognized (or absent) becomes [`Priority::Low`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Required before responding.
    Critical,
    /// Recommended.
    High,
    /// Suggested.
    Medium,
    /// Optional.
    #[default]
    Low,
}

impl Priority {
    /// All priorities in banner order.
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    /// Parse a priority label, falling back to `Low` for unknown values.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "critical" => Priority::Critical,
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            other => {
                tracing::debug!("Unrecognized priority '{}', treating as low", other);
                Priority::Low
            }
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Critical => write!(f, "critical"),
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Priority::from_label).unwrap_or_default())
    }
}

/// How a matched skill is enforced.
///
/// Only `block` stops the turn. Every other value, including an absent or
/// unrecognized one, is advisory and only shows up in the banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforcement {
    /// Advisory suggestion.
    #[default]
    Suggest,
    /// Advisory warning.
    Warn,
    /// Guardrail that blocks the turn unless a skip condition applies.
    Block,
}

impl Enforcement {
    /// Parse an enforcement label case-insensitively.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "block" => Enforcement::Block,
            "warn" => Enforcement::Warn,
            _ => Enforcement::Suggest,
        }
    }

    /// Whether this enforcement level can block the turn.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Enforcement::Block)
    }
}

impl std::fmt::Display for Enforcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Enforcement::Suggest => write!(f, "suggest"),
            Enforcement::Warn => write!(f, "warn"),
            Enforcement::Block => write!(f, "block"),
        }
    }
}

impl<'de> Deserialize<'de> for Enforcement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Enforcement::from_label).unwrap_or_default())
    }
}

/// Triggers evaluated against the prompt text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTriggers {
    /// Case-insensitive substrings of the prompt.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    /// Regular expressions, matched case-insensitively in multiline mode.
    #[serde(default, deserialize_with = "null_as_default")]
    pub intent_patterns: Vec<String>,
}

impl PromptTriggers {
    /// Check if there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.intent_patterns.is_empty()
    }
}

/// Triggers evaluated against the file named by the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTriggers {
    /// Shell globs the file path must match (e.g. `apps/web/**/*.tsx`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_patterns: Vec<String>,

    /// Shell globs that disqualify the file route when they also match.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_exclusions: Vec<String>,

    /// Regular expressions, at least one of which must match the file text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_patterns: Vec<String>,
}

impl FileTriggers {
    /// Check if there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        self.path_patterns.is_empty()
    }
}

/// Conditions under which a blocking guardrail steps aside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipConditions {
    /// Environment variable that, when truthy, disables the block.
    #[serde(default)]
    pub env_override: Option<String>,

    /// Skip when this skill was already used in the session.
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_skill_used: bool,

    /// Literal markers whose presence in the file text disables the block.
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_markers: Vec<String>,
}

/// A named skill rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Unique name, taken from the key in the `skills` mapping.
    #[serde(skip)]
    pub name: String,

    /// Human-readable description (diagnostics only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Prompt keyword and intent triggers.
    #[serde(
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_triggers: Option<PromptTriggers>,

    /// File path and content triggers.
    #[serde(
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_triggers: Option<FileTriggers>,

    /// Banner priority tier.
    #[serde(default)]
    pub priority: Priority,

    /// Enforcement level.
    #[serde(default)]
    pub enforcement: Enforcement,

    /// Message printed when this guardrail blocks; may contain `{file_path}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_message: Option<String>,

    /// Conditions that disable blocking for a single evaluation.
    #[serde(
        default,
        deserialize_with = "optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub skip_conditions: Option<SkipConditions>,
}

impl Skill {
    /// Create a skill with the given name and no triggers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the skill name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the skill has any trigger that could ever match.
    pub fn has_triggers(&self) -> bool {
        let prompt = self
            .prompt_triggers
            .as_ref()
            .is_some_and(|t| !t.is_empty());
        let file = self.file_triggers.as_ref().is_some_and(|t| !t.is_empty());
        prompt || file
    }

    /// Whether this skill is a blocking guardrail.
    pub fn is_blocking(&self) -> bool {
        self.enforcement.is_blocking()
    }

    /// Set the prompt keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt_triggers
            .get_or_insert_with(PromptTriggers::default)
            .keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the prompt intent patterns.
    pub fn with_intent_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt_triggers
            .get_or_insert_with(PromptTriggers::default)
            .intent_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the file triggers.
    pub fn with_file_triggers(mut self, triggers: FileTriggers) -> Self {
        self.file_triggers = Some(triggers);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the enforcement level.
    pub fn with_enforcement(mut self, enforcement: Enforcement) -> Self {
        self.enforcement = enforcement;
        self
    }

    /// Set the block message template.
    pub fn with_block_message(mut self, message: impl Into<String>) -> Self {
        self.block_message = Some(message.into());
        self
    }

    /// Set the skip conditions.
    pub fn with_skip_conditions(mut self, conditions: SkipConditions) -> Self {
        self.skip_conditions = Some(conditions);
        self
    }
}
