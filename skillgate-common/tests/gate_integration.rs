//! Integration tests for evaluating prompt events against rule files on disk.
//!
//! These tests verify:
//! - Rules load from the project-relative location
//! - Advisory matches render a grouped banner
//! - Guardrails block, and skip conditions release them
//! - File content is read from disk when not supplied


use serial_test::serial;
use skillgate_common::env::USED_SKILLS_VAR;
use skillgate_common::settings::{RulesLocation, PROJECT_DIR_VAR};
use skillgate_common::{
    ConfigError, Decision, ProcessEnv, PromptEvent, RuleSet, SkillGate, StaticEnv,
    BLOCKED_EXIT_CODE,
};
use test_helpers::{create_project_with_rules, showcase_rules, write_project_file};

fn gate_for(rules_json: &str) -> (tempfile::TempDir, SkillGate<StaticEnv>) {
    let (temp, path) = create_project_with_rules(rules_json);
    let rules = RuleSet::load(&path).unwrap();
    (temp, SkillGate::new(rules, StaticEnv::new()))
}

#[test]
fn test_end_to_end_suggest_banner() {
    let (_temp, gate) = gate_for(
        r#"{"skills": {"frontend-dev-guidelines": {
            "promptTriggers": {"keywords": ["react"]},
            "priority": "high",
            "enforcement": "suggest"
        }}}"#,
    );

    let decision = gate.evaluate(&PromptEvent::parse(r#"{"prompt": "write a react hook"}"#));
    assert_eq!(decision.exit_code(), 0);

    let text = decision.output().unwrap();
    let heading = text.find("📚 RECOMMENDED SKILLS:").unwrap();
    let name = text.find("  → frontend-dev-guidelines").unwrap();
    assert!(heading < name);
}

#[test]
fn test_end_to_end_block() {
    let (_temp, gate) = gate_for(
        r#"{"skills": {"frontend-dev-guidelines": {
            "promptTriggers": {"keywords": ["react"]},
            "priority": "high",
            "enforcement": "block",
            "blockMessage": "Use the skill first for {file_path}"
        }}}"#,
    );

    let decision = gate.evaluate(&PromptEvent::parse(r#"{"prompt": "react please", "meta": {}}"#));
    assert_eq!(decision.output(), Some("Use the skill first for <unknown>"));
    assert_eq!(decision.exit_code(), BLOCKED_EXIT_CODE);
}

#[test]
fn test_showcase_block_substitutes_file_path() {
    let (_temp, gate) = gate_for(showcase_rules());
    let event = PromptEvent::parse(
        r#"{"prompt": "tweak this", "meta": {"file": "apps/web/src/App.tsx"}}"#,
    );

    match gate.evaluate(&event) {
        Decision::Blocked { skill, message } => {
            assert_eq!(skill, "frontend-dev-guidelines");
            assert!(message.ends_with("before editing apps/web/src/App.tsx"));
        }
        other => panic!("Expected Blocked, got {:?}", other),
    }
}

#[test]
fn test_showcase_excluded_test_file_does_not_block() {
    let (_temp, gate) = gate_for(showcase_rules());
    let event = PromptEvent::new("tweak this").with_file("apps/web/src/App.test.tsx");
    assert_eq!(gate.evaluate(&event), Decision::NoOp);
}

#[test]
fn test_showcase_priorities_and_invalid_pattern() {
    let (_temp, gate) = gate_for(showcase_rules());
    let event = PromptEvent::new("add a controller endpoint and test the route");

    let text = gate.evaluate(&event).output().unwrap().to_string();
    let critical = text.find("⚠️ CRITICAL SKILLS (REQUIRED):\n  → route-tester").unwrap();
    let high = text.find("📚 RECOMMENDED SKILLS:\n  → backend-dev-guidelines").unwrap();
    assert!(critical < high);
    assert!(!text.contains("skill-developer"));
}

#[test]
fn test_showcase_file_marker_on_disk_skips_block() {
    let (temp, gate) = gate_for(showcase_rules());
    let file = write_project_file(
        &temp,
        "apps/web/src/Legacy.tsx",
        "// @skip-validation\nexport const Legacy = () => null;",
    );
    // The glob is relative; match on the react keyword and rely on the
    // on-disk marker to release the guardrail.
    let gate = SkillGate::new(gate.rules().clone(), ProcessEnv);
    let event = PromptEvent::new("refactor this react component").with_file(file);

    let decision = gate.evaluate(&event);
    assert!(matches!(decision, Decision::Banner { .. }), "{decision:?}");
    assert!(decision.output().unwrap().contains("frontend-dev-guidelines"));
}

#[test]
fn test_showcase_content_pattern_reads_disk() {
    let (temp, gate) = gate_for(
        r#"{"skills": {"backend-dev-guidelines": {
            "priority": "high",
            "fileTriggers": {
                "pathPatterns": ["*/services/*/src/*.ts"],
                "contentPatterns": ["PrismaClient"]
            }
        }}}"#,
    );
    let gate = SkillGate::new(gate.rules().clone(), ProcessEnv);

    let with_prisma = write_project_file(
        &temp,
        "services/api/src/db.ts",
        "export const db = new PrismaClient();",
    );
    let without = write_project_file(&temp, "services/api/src/util.ts", "export {}");

    assert!(matches!(
        gate.evaluate(&PromptEvent::new("look").with_file(with_prisma)),
        Decision::Banner { .. }
    ));
    assert_eq!(
        gate.evaluate(&PromptEvent::new("look").with_file(without)),
        Decision::NoOp
    );
}

#[test]
#[serial]
fn test_process_env_override_and_used_skills() {
    let (_temp, path) = create_project_with_rules(showcase_rules());
    let gate = SkillGate::new(RuleSet::load(&path).unwrap(), ProcessEnv);
    let event = PromptEvent::new("build a react component");

    assert!(gate.evaluate(&event).is_blocked());

    std::env::set_var("SKIP_FRONTEND_GUIDELINES", "On");
    let decision = gate.evaluate(&event);
    std::env::remove_var("SKIP_FRONTEND_GUIDELINES");
    assert!(matches!(decision, Decision::Banner { .. }));

    std::env::set_var(USED_SKILLS_VAR, "skill-developer,frontend-dev-guidelines");
    let decision = gate.evaluate(&event);
    std::env::remove_var(USED_SKILLS_VAR);
    assert!(matches!(decision, Decision::Banner { .. }));

    assert!(gate.evaluate(&event).is_blocked());
}

#[test]
fn test_rules_location_resolves_project_dir() {
    let (temp, path) = create_project_with_rules(showcase_rules());
    let env = StaticEnv::new().with_var(PROJECT_DIR_VAR, temp.path().to_string_lossy());
    let resolved = RulesLocation::default().resolve(&env).unwrap();
    assert_eq!(resolved, path);
    assert_eq!(RuleSet::load(&resolved).unwrap().len(), 4);
}

#[test]
fn test_missing_rules_is_config_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let location = RulesLocation {
        project_dir: Some(temp.path().to_path_buf()),
        ..Default::default()
    };
    let path = location.resolve(&StaticEnv::new()).unwrap();
    assert!(matches!(
        RuleSet::load(&path),
        Err(ConfigError::NotFound { .. })
    ));
}
