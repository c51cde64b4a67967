//! Hook mode: one prompt event in, one decision out.

use std::io::{Read, Write};

use skillgate_common::settings::RulesLocation;
use skillgate_common::{Decision, GateError, PromptEvent, SessionEnv, SkillGate};

use crate::load_rules;

/// Process one hook invocation.
///
/// Reads the event from `input`, writes the decision text to `output`, and
/// returns the exit code. The rule set is only loaded when there is a prompt
/// to evaluate.
pub fn run_hook<R, W, E>(
    mut input: R,
    mut output: W,
    location: &RulesLocation,
    env: E,
) -> Result<i32, GateError>
where
    R: Read,
    W: Write,
    E: SessionEnv,
{
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let raw = String::from_utf8_lossy(&bytes);
    tracing::debug!("Input: {}", raw.trim());

    let event = PromptEvent::parse(&raw);
    if !event.has_prompt() {
        tracing::debug!("No prompt, nothing to do");
        return Ok(0);
    }

    let rules = load_rules(location, &env)?;
    let gate = SkillGate::new(rules, env);
    let decision = gate.evaluate(&event);

    tracing::debug!(
        decision = %decision,
        exit_code = decision.exit_code(),
        "Prompt evaluated"
    );

    write_decision(&mut output, &decision)?;
    Ok(decision.exit_code())
}

/// Write a decision's text, newline-terminated.
fn write_decision<W: Write>(output: &mut W, decision: &Decision) -> std::io::Result<()> {
    let Some(text) = decision.output() else {
        return Ok(());
    };
    output.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        output.write_all(b"\n")?;
    }
    output.flush()
}
