//! Rule file location.
//!
//! The rules live at `<project>/.claude/skills/skill-rules.json`. The project
//! root comes from, in order:
//! 1. An explicit directory (the `--project-dir` flag)
//! 2. `CLAUDE_PROJECT_DIR`, when set and non-empty
//! 3. The current working directory
//!
//! An explicit rules file (the `--rules` flag) bypasses all of the above.

use std::path::{Path, PathBuf};

use crate::env::SessionEnv;
use crate::error::ConfigError;

/// Environment variable naming the project root.
pub const PROJECT_DIR_VAR: &str = "CLAUDE_PROJECT_DIR";

/// Rules file path relative to the project root.
pub const RULES_REL_PATH: &str = ".claude/skills/skill-rules.json";

/// Where to find the rules for one invocation.
#[derive(Debug, Clone, Default)]
pub struct RulesLocation {
    /// Explicit rules file.
    pub rules_file: Option<PathBuf>,
    /// Explicit project root.
    pub project_dir: Option<PathBuf>,
}

impl RulesLocation {
    /// Resolve the rules file path.
    pub fn resolve(&self, env: &dyn SessionEnv) -> Result<PathBuf, ConfigError> {
        if let Some(file) = &self.rules_file {
            return Ok(file.clone());
        }
        Ok(rules_path_for(&self.project_root(env)?))
    }

    /// Resolve the project root.
    pub fn project_root(&self, env: &dyn SessionEnv) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.project_dir {
            return Ok(dir.clone());
        }

        if let Some(dir) = env.var(PROJECT_DIR_VAR).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        std::env::current_dir().map_err(ConfigError::CurrentDir)
    }
}

/// Rules path for a given project root.
pub fn rules_path_for(project_root: &Path) -> PathBuf {
    project_root.join(RULES_REL_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnv;

    #[test]
    fn test_explicit_rules_file_wins() {
        let location = RulesLocation {
            rules_file: Some(PathBuf::from("/tmp/custom.json")),
            project_dir: Some(PathBuf::from("/repo")),
        };
        let env = StaticEnv::new().with_var(PROJECT_DIR_VAR, "/elsewhere");
        assert_eq!(
            location.resolve(&env).unwrap(),
            PathBuf::from("/tmp/custom.json")
        );
    }

    #[test]
    fn test_project_dir_beats_env() {
        let location = RulesLocation {
            project_dir: Some(PathBuf::from("/repo")),
            ..Default::default()
        };
        let env = StaticEnv::new().with_var(PROJECT_DIR_VAR, "/elsewhere");
        assert_eq!(
            location.resolve(&env).unwrap(),
            PathBuf::from("/repo/.claude/skills/skill-rules.json")
        );
    }

    #[test]
    fn test_env_project_dir() {
        let env = StaticEnv::new().with_var(PROJECT_DIR_VAR, "/from-env");
        assert_eq!(
            RulesLocation::default().resolve(&env).unwrap(),
            rules_path_for(Path::new("/from-env"))
        );
    }

    #[test]
    fn test_empty_env_falls_back_to_cwd() {
        let env = StaticEnv::new().with_var(PROJECT_DIR_VAR, "");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            RulesLocation::default().resolve(&env).unwrap(),
            cwd.join(RULES_REL_PATH)
        );
    }
}
