//! Skill rules: the declarative rule set consulted on every prompt.
//!
//! Rules are loaded from `<project>/.claude/skills/skill-rules.json`:
//!
//! ```json
//! {
//!   "skills": {
//!     "frontend-dev-guidelines": {
//!       "promptTriggers": { "keywords": ["react"] },
//!       "priority": "high",
//!       "enforcement": "suggest"
//!     }
//!   }
//! }
//! ```

mod loader;
mod types;

pub use loader::RuleSet;
pub use types::{Enforcement, FileTriggers, Priority, PromptTriggers, Skill, SkipConditions};
