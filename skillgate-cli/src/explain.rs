//! Skill Gate Explain - show what the hook would do for a prompt.
//!
//! Lists every matched skill with the route that matched it, then the
//! decision hook mode would reach. Nothing is blocked; this is diagnostics.

use std::io::Write;

use comfy_table::{presets::UTF8_FULL, Table};
use skillgate_common::{Decision, Evaluation, GateError, PromptEvent, SessionEnv, SkillGate};

/// Write the explanation for one event.
pub fn run_explain<W, E>(
    gate: &SkillGate<E>,
    event: &PromptEvent,
    out: &mut W,
) -> Result<(), GateError>
where
    W: Write,
    E: SessionEnv,
{
    let Evaluation { matches, decision } = gate.explain(event);

    if matches.is_empty() {
        writeln!(out, "No skills matched.")?;
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Skill", "Priority", "Enforcement", "Match", "Reason"]);
        for matched in &matches {
            table.add_row(vec![
                matched.name().to_string(),
                matched.skill.priority.to_string(),
                matched.skill.enforcement.to_string(),
                matched.details.match_type.to_string(),
                matched.details.reason.to_string(),
            ]);
        }
        writeln!(out, "{table}")?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "Decision: {} (exit code {})",
        decision,
        decision.exit_code()
    )?;
    match &decision {
        Decision::NoOp => {}
        Decision::Banner { text } => write!(out, "\n{}", text)?,
        Decision::Blocked { message, .. } => writeln!(out, "\n{}", message)?,
    }
    Ok(())
}
