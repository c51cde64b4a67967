//! Rule set loading.
//!
//! The rule set is read once per invocation and is immutable afterwards.
//! Loading is all-or-nothing: a missing, unreadable, or malformed document
//! fails with a [`ConfigError`] instead of producing a partial rule set.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::serde_ext::object_map;

use super::types::Skill;

/// Path label used in errors for documents that did not come from disk.
const INLINE_SOURCE: &str = "<inline>";

/// On-disk shape of `skill-rules.json`.
#[derive(Debug, Default, Deserialize)]
struct RulesDocument {
    #[serde(default, deserialize_with = "object_map")]
    skills: IndexMap<String, Skill>,
}

/// An ordered, immutable collection of skills keyed by name.
///
/// Iteration order is the order in which skills appear in the source
/// document. If a name appears twice, the entry keeps its first position
/// and takes the last definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleSet {
    skills: IndexMap<String, Skill>,
}

impl RuleSet {
    /// Build a rule set from skills, keyed by their names.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        Self {
            skills: skills
                .into_iter()
                .map(|skill| (skill.name.clone(), skill))
                .collect(),
        }
    }

    /// Load the rule set from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let rules = Self::parse(&content, path)?;
        tracing::debug!(
            "Loaded {} skill(s) from {}",
            rules.len(),
            path.display()
        );
        Ok(rules)
    }

    /// Parse a rule set from an in-memory JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new(INLINE_SOURCE))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let document: RulesDocument =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: PathBuf::from(path),
                source,
            })?;

        let skills = document
            .skills
            .into_iter()
            .map(|(name, mut skill)| {
                skill.name = name.clone();
                (name, skill)
            })
            .collect();

        Ok(Self { skills })
    }

    /// Get a skill by name.
    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    /// Iterate over skills in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    /// Number of skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if the rule set has no skills.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Skill;
    type IntoIter = indexmap::map::Values<'a, String, Skill>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.values()
    }
}
