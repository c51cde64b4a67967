//! Skill Gate Common - core library for the skill activation hook.
//!
//! This crate provides the rule model, the prompt/file matcher, guardrail
//! enforcement with skip conditions, and priority-grouped banner rendering
//! used by the `skillgate` Claude Code hook.

pub mod decision;
pub mod enforcement;
pub mod env;
pub mod error;
pub mod event;
pub mod gate;
pub mod matcher;
pub mod render;
pub mod rules;
pub mod settings;

mod serde_ext;

pub use decision::{Decision, BLOCKED_EXIT_CODE, ERROR_EXIT_CODE, SUCCESS_EXIT_CODE};
pub use env::{ProcessEnv, SessionEnv, StaticEnv};
pub use error::{ConfigError, GateError};
pub use event::{EventMeta, PromptEvent};
pub use gate::{Evaluation, SkillGate};
pub use matcher::{MatchDetails, MatchType, SkillMatch};
pub use rules::{Enforcement, Priority, RuleSet, Skill};
