//! Skill Gate List - list the skills in the rule set.
//!
//! Shows each skill's priority, enforcement level, and a summary of its
//! triggers, in rule set order.

use std::io::Write;

use comfy_table::{presets::UTF8_FULL, Table};
use skillgate_common::{GateError, RuleSet, Skill};

/// Maximum length for description in table display before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 50;

/// Write the skill listing.
///
/// With `json`, the rule set is written in its document shape. Otherwise a
/// table is written, with a description column when `verbose` is set.
pub fn run_list<W: Write>(
    rules: &RuleSet,
    verbose: bool,
    json: bool,
    out: &mut W,
) -> Result<(), GateError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, rules)?;
        writeln!(out)?;
        return Ok(());
    }

    if rules.is_empty() {
        writeln!(out, "No skills found.")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    if verbose {
        table.set_header(vec![
            "Name",
            "Description",
            "Priority",
            "Enforcement",
            "Triggers",
        ]);
    } else {
        table.set_header(vec!["Name", "Priority", "Enforcement", "Triggers"]);
    }

    for skill in rules {
        let mut row = vec![skill.name().to_string()];
        if verbose {
            row.push(truncate_description(
                skill.description.as_deref().unwrap_or(""),
                MAX_DESCRIPTION_LENGTH,
            ));
        }
        row.push(skill.priority.to_string());
        row.push(skill.enforcement.to_string());
        row.push(trigger_summary(skill));
        table.add_row(row);
    }

    writeln!(out, "{table}")?;
    writeln!(out)?;
    writeln!(out, "{} skill(s) found", rules.len())?;
    Ok(())
}

/// Summarize a skill's triggers, e.g. `2 keywords, 1 intent, 1 path`.
fn trigger_summary(skill: &Skill) -> String {
    let mut parts = Vec::new();

    if let Some(prompt) = &skill.prompt_triggers {
        push_count(&mut parts, prompt.keywords.len(), "keyword", "keywords");
        push_count(&mut parts, prompt.intent_patterns.len(), "intent", "intents");
    }
    if let Some(file) = &skill.file_triggers {
        push_count(&mut parts, file.path_patterns.len(), "path", "paths");
        push_count(&mut parts, file.path_exclusions.len(), "exclusion", "exclusions");
        push_count(&mut parts, file.content_patterns.len(), "content", "contents");
    }

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

fn push_count(parts: &mut Vec<String>, count: usize, singular: &str, plural: &str) {
    match count {
        0 => {}
        1 => parts.push(format!("1 {}", singular)),
        n => parts.push(format!("{} {}", n, plural)),
    }
}

/// Truncate description to max length (in characters) with ellipsis.
fn truncate_description(desc: &str, max_len: usize) -> String {
    if desc.chars().count() <= max_len {
        desc.to_string()
    } else {
        let kept: String = desc.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillgate_common::rules::FileTriggers;

    fn sample_rules() -> RuleSet {
        RuleSet::from_json_str(
            r#"{"skills": {
                "frontend-dev-guidelines": {
                    "description": "React/TypeScript conventions",
                    "promptTriggers": {"keywords": ["react", "mui"]},
                    "priority": "high",
                    "enforcement": "block"
                },
                "empty": {}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_trigger_summary() {
        let skill = Skill::new("s")
            .with_keywords(["a", "b"])
            .with_intent_patterns(["x"])
            .with_file_triggers(FileTriggers {
                path_patterns: vec!["*.ts".to_string()],
                path_exclusions: vec![],
                content_patterns: vec!["a".to_string(), "b".to_string()],
            });
        assert_eq!(
            trigger_summary(&skill),
            "2 keywords, 1 intent, 1 path, 2 contents"
        );
        assert_eq!(trigger_summary(&Skill::new("none")), "none");
    }

    /// Test length for truncation tests.
    const TEST_TRUNCATE_LEN: usize = 20;

    #[test]
    fn test_truncate_description_long() {
        let desc = "This is a very long description that should be truncated";
        let result = truncate_description(desc, TEST_TRUNCATE_LEN);
        assert_eq!(result.chars().count(), TEST_TRUNCATE_LEN);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_description_multibyte() {
        let desc = "→".repeat(30);
        let result = truncate_description(&desc, TEST_TRUNCATE_LEN);
        assert_eq!(result.chars().count(), TEST_TRUNCATE_LEN);
    }

    #[test]
    fn test_run_list_table() {
        let mut out = Vec::new();
        run_list(&sample_rules(), false, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("frontend-dev-guidelines"));
        assert!(text.contains("2 keywords"));
        assert!(text.contains("block"));
        assert!(text.contains("2 skill(s) found"));
        assert!(!text.contains("React/TypeScript conventions"));
    }

    #[test]
    fn test_run_list_verbose_shows_description() {
        let mut out = Vec::new();
        run_list(&sample_rules(), true, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("React/TypeScript conventions"));
    }

    #[test]
    fn test_run_list_json() {
        let mut out = Vec::new();
        run_list(&sample_rules(), false, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let skill = &value["skills"]["frontend-dev-guidelines"];
        assert_eq!(skill["priority"], "high");
        assert_eq!(skill["enforcement"], "block");
        assert_eq!(skill["promptTriggers"]["keywords"][1], "mui");
    }

    #[test]
    fn test_run_list_empty() {
        let mut out = Vec::new();
        run_list(&RuleSet::default(), false, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No skills found.\n");
    }
}
