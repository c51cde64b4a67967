//! Session environment capability.
//!
//! Skip conditions depend on state outside the event: environment flags, the
//! list of skills already used in the session, and the contents of files on
//! disk. All of that is reached through [`SessionEnv`] so the matcher and the
//! enforcement pass stay pure and testable.

use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Environment variable listing skills already used in this session.
pub const USED_SKILLS_VAR: &str = "SKILL_USED";

/// Access to the state a single evaluation may consult.
pub trait SessionEnv {
    /// Look up an environment flag.
    fn var(&self, name: &str) -> Option<String>;

    /// Names of skills already used in this session.
    fn used_skills(&self) -> HashSet<String>;

    /// Best-effort read of a file as text.
    ///
    /// Returns `None` on any failure; callers treat that as empty content.
    fn read_file(&self, path: &str) -> Option<String> {
        read_text_lossy(Path::new(path))
    }
}

/// Parse a comma-separated skill list, trimming entries and dropping empties.
pub fn parse_skill_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Read a file, replacing invalid UTF-8 instead of failing.
pub fn read_text_lossy(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::debug!("Could not read {}: {}", path.display(), e);
            None
        }
    }
}

/// Environment backed by the real process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl SessionEnv for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn used_skills(&self) -> HashSet<String> {
        std::env::var(USED_SKILLS_VAR)
            .map(|raw| parse_skill_list(&raw))
            .unwrap_or_default()
    }
}

/// In-memory environment.
///
/// Used by tests and by hosts that evaluate many events in one process and
/// want each evaluation isolated from ambient process state.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
    used_skills: HashSet<String>,
    files: HashMap<String, String>,
}

impl StaticEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment flag.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Mark a skill as already used in the session.
    pub fn with_used_skill(mut self, name: impl Into<String>) -> Self {
        self.used_skills.insert(name.into());
        self
    }

    /// Provide the contents of a file by path.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl SessionEnv for StaticEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn used_skills(&self) -> HashSet<String> {
        self.used_skills.clone()
    }

    fn read_file(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }
}

impl<E: SessionEnv + ?Sized> SessionEnv for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn used_skills(&self) -> HashSet<String> {
        (**self).used_skills()
    }

    fn read_file(&self, path: &str) -> Option<String> {
        (**self).read_file(path)
    }
}
