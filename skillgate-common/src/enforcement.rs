//! Guardrail enforcement.
//!
//! Matched skills with `enforcement: "block"` stop the turn unless one of
//! their skip conditions applies. The first un-skipped guardrail in match
//! order wins; later matches are not consulted.

use crate::env::SessionEnv;
use crate::event::PromptEvent;
use crate::matcher::{FileText, SkillMatch};
use crate::rules::Skill;

/// Message used when a blocking skill has no `blockMessage`.
pub const DEFAULT_BLOCK_MESSAGE: &str = "Blocked by guardrail.";

/// Token in `blockMessage` replaced by the event's file path.
pub const FILE_PATH_TOKEN: &str = "{file_path}";

/// Substituted for [`FILE_PATH_TOKEN`] when the event names no file.
pub const UNKNOWN_FILE_PATH: &str = "<unknown>";

/// Values of an override flag that count as "on".
const TRUTHY_VALUES: [&str; 4] = ["1", "true", "yes", "on"];

/// Why a blocking skill stepped aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The named override flag is set to a truthy value.
    EnvOverride(String),
    /// The skill was already used in this session.
    SessionSkillUsed,
    /// The file text contains this marker.
    FileMarker(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EnvOverride(flag) => write!(f, "override flag {} is set", flag),
            SkipReason::SessionSkillUsed => write!(f, "skill already used in session"),
            SkipReason::FileMarker(marker) => write!(f, "file contains marker '{}'", marker),
        }
    }
}

/// A guardrail that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Name of the blocking skill.
    pub skill: String,
    /// Rendered block message.
    pub message: String,
}

/// Check whether an override flag value is truthy.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    TRUTHY_VALUES.contains(&value.as_str())
}

/// Determine whether a blocking skill should be skipped for this evaluation.
pub fn skip_reason(
    skill: &Skill,
    env: &dyn SessionEnv,
    text: &FileText<'_>,
) -> Option<SkipReason> {
    let conditions = skill.skip_conditions.as_ref()?;

    if let Some(flag) = conditions.env_override.as_deref().filter(|f| !f.is_empty()) {
        if env.var(flag).is_some_and(|value| is_truthy(&value)) {
            return Some(SkipReason::EnvOverride(flag.to_string()));
        }
    }

    if conditions.session_skill_used && env.used_skills().contains(skill.name()) {
        return Some(SkipReason::SessionSkillUsed);
    }

    if !conditions.file_markers.is_empty() {
        let content = text.get();
        if !content.is_empty() {
            if let Some(marker) = conditions
                .file_markers
                .iter()
                .find(|marker| content.contains(marker.as_str()))
            {
                return Some(SkipReason::FileMarker(marker.clone()));
            }
        }
    }

    None
}

/// Render a skill's block message for the given file path.
pub fn render_block_message(skill: &Skill, file_path: Option<&str>) -> String {
    skill
        .block_message
        .as_deref()
        .filter(|message| !message.is_empty())
        .unwrap_or(DEFAULT_BLOCK_MESSAGE)
        .replace(FILE_PATH_TOKEN, file_path.unwrap_or(UNKNOWN_FILE_PATH))
}

/// Find the first matched guardrail that is not skipped.
pub fn find_block(
    matches: &[SkillMatch<'_>],
    event: &PromptEvent,
    env: &dyn SessionEnv,
    text: &FileText<'_>,
) -> Option<Block> {
    for matched in matches.iter().filter(|m| m.skill.is_blocking()) {
        let skill = matched.skill;
        if let Some(reason) = skip_reason(skill, env, text) {
            tracing::debug!("Skipping guardrail '{}': {}", skill.name(), reason);
            continue;
        }

        return Some(Block {
            skill: skill.name().to_string(),
            message: render_block_message(skill, event.file_path()),
        });
    }
    None
}
