//! Skill Gate - Claude Code prompt hook for skill activation and guardrails.
//!
//! On every prompt, the hook matches the prompt (and any file it concerns)
//! against `.claude/skills/skill-rules.json` and then:
//! - prints nothing when no skill matches,
//! - prints a banner of matched skills grouped by priority, or
//! - prints a guardrail's block message and exits with code 3.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use skillgate::{ProcessEnv, PromptEvent, RuleSet, SkillGate};
//! use std::path::Path;
//!
//! let rules = RuleSet::load(Path::new(".claude/skills/skill-rules.json")).unwrap();
//! let gate = SkillGate::new(rules, ProcessEnv);
//!
//! let decision = gate.evaluate(&PromptEvent::new("write a react hook"));
//! if let Some(text) = decision.output() {
//!     println!("{}", text);
//! }
//! std::process::exit(decision.exit_code());
//! ```

pub mod cli;
pub mod explain;
pub mod hook;
pub mod list;

pub use cli::{Cli, Commands};

// Re-export everything from skillgate-common
pub use skillgate_common::*;

use skillgate_common::settings::RulesLocation;

/// Resolve and load the rule set for this invocation.
pub fn load_rules(location: &RulesLocation, env: &dyn SessionEnv) -> Result<RuleSet, GateError> {
    let path = location.resolve(env)?;
    Ok(RuleSet::load(&path)?)
}
