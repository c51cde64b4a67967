//! Terminal decisions for a single evaluation.

/// Exit code for a no-op or an advisory banner.
pub const SUCCESS_EXIT_CODE: i32 = 0;

/// Exit code for an internal failure such as an unloadable rule set.
pub const ERROR_EXIT_CODE: i32 = 1;

/// Exit code returned when a guardrail blocks the turn.
pub const BLOCKED_EXIT_CODE: i32 = 3;

/// Outcome of evaluating one prompt event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Nothing matched, or there was no prompt. Print nothing.
    NoOp,
    /// Matched skills grouped by priority. Advisory only.
    Banner {
        /// Rendered banner text.
        text: String,
    },
    /// A guardrail fired and the turn must stop.
    Blocked {
        /// Name of the blocking skill.
        skill: String,
        /// Rendered block message.
        message: String,
    },
}

impl Decision {
    /// Process exit code for this decision.
    pub fn exit_code(&self) -> i32 {
        match self {
            Decision::NoOp | Decision::Banner { .. } => SUCCESS_EXIT_CODE,
            Decision::Blocked { .. } => BLOCKED_EXIT_CODE,
        }
    }

    /// Text to print to stdout, if any.
    ///
    /// The banner already ends with a newline; the block message does not.
    pub fn output(&self) -> Option<&str> {
        match self {
            Decision::NoOp => None,
            Decision::Banner { text } => Some(text),
            Decision::Blocked { message, .. } => Some(message),
        }
    }

    /// Whether this decision blocks the turn.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Decision::Blocked { .. })
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::NoOp => write!(f, "no-op"),
            Decision::Banner { .. } => write!(f, "banner"),
            Decision::Blocked { skill, .. } => write!(f, "blocked by {}", skill),
        }
    }
}
