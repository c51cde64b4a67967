//! The skill gate: evaluates prompt events against a loaded rule set.
//!
//! ```text
//! START -> (no prompt)                          -> NoOp
//! START -> match -> (no matches)                -> NoOp
//!          match -> (un-skipped guardrail)      -> Blocked
//!          match -> (no un-skipped guardrail)   -> Banner
//! ```
//!
//! The rule set is immutable once loaded, so one gate can evaluate any
//! number of events; each evaluation is independent of the others.

use crate::decision::Decision;
use crate::enforcement::find_block;
use crate::env::SessionEnv;
use crate::event::PromptEvent;
use crate::matcher::{match_skills, FileText, SkillMatch};
use crate::render::{render_banner, PriorityBuckets};
use crate::rules::RuleSet;

/// The matched skills for one event and the decision reached from them.
#[derive(Debug, Clone)]
pub struct Evaluation<'r> {
    /// Matched skills in rule set order, with the route that matched each.
    pub matches: Vec<SkillMatch<'r>>,
    /// The decision hook mode acts on.
    pub decision: Decision,
}

/// Rule set plus the environment consulted by skip conditions.
#[derive(Debug)]
pub struct SkillGate<E> {
    rules: RuleSet,
    env: E,
}

impl<E: SessionEnv> SkillGate<E> {
    /// Create a gate over a loaded rule set.
    pub fn new(rules: RuleSet, env: E) -> Self {
        Self { rules, env }
    }

    /// The loaded rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate one event.
    pub fn evaluate(&self, event: &PromptEvent) -> Decision {
        self.explain(event).decision
    }

    /// Evaluate one event, keeping the matched skills alongside the decision.
    ///
    /// Matching runs once, so the event's file is read at most once.
    pub fn explain(&self, event: &PromptEvent) -> Evaluation<'_> {
        if !event.has_prompt() {
            return Evaluation {
                matches: Vec::new(),
                decision: Decision::NoOp,
            };
        }

        let text = FileText::new(event, &self.env);
        let matches = match_skills(&self.rules, event, &text);
        let decision = self.decide(event, &matches, &text);
        Evaluation { matches, decision }
    }

    fn decide(
        &self,
        event: &PromptEvent,
        matches: &[SkillMatch<'_>],
        text: &FileText<'_>,
    ) -> Decision {
        if matches.is_empty() {
            tracing::debug!("No skills matched");
            return Decision::NoOp;
        }

        if let Some(block) = find_block(matches, event, &self.env, text) {
            tracing::debug!("Guardrail '{}' blocked the prompt", block.skill);
            return Decision::Blocked {
                skill: block.skill,
                message: block.message,
            };
        }

        let buckets = PriorityBuckets::from_matches(matches);
        Decision::Banner {
            text: render_banner(&buckets),
        }
    }
}
