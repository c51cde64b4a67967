//! Trigger matching.
//!
//! Each skill is matched independently against the event through three
//! routes, evaluated in order with the first success winning:
//!
//! 1. **Keyword** - any keyword is a case-insensitive substring of the prompt
//! 2. **Intent** - any intent regex matches the prompt (case-insensitive, multiline)
//! 3. **File** - the file path matches a path glob, does not match an
//!    exclusion glob, and (if content patterns exist) the file text matches
//!    at least one content regex
//!
//! An exclusion only abandons the file route. It never undoes a prompt match.
//! Malformed regexes and globs are logged and skipped.

use std::borrow::Cow;
use std::cell::OnceCell;

use regex::RegexBuilder;
use serde::Serialize;

use crate::env::SessionEnv;
use crate::event::PromptEvent;
use crate::rules::{RuleSet, Skill};

/// Which route produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Prompt keyword substring.
    Keyword,
    /// Prompt intent regex.
    Intent,
    /// File path and content patterns.
    File,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Keyword => write!(f, "keyword"),
            MatchType::Intent => write!(f, "intent"),
            MatchType::File => write!(f, "file"),
        }
    }
}

/// Why a skill matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchDetails {
    /// The route that matched.
    pub match_type: MatchType,
    /// Short human-readable reason.
    pub reason: &'static str,
}

impl MatchDetails {
    fn keyword() -> Self {
        Self {
            match_type: MatchType::Keyword,
            reason: "keyword match",
        }
    }

    fn intent() -> Self {
        Self {
            match_type: MatchType::Intent,
            reason: "intent pattern",
        }
    }

    fn file() -> Self {
        Self {
            match_type: MatchType::File,
            reason: "path/content patterns",
        }
    }
}

/// A matched skill together with the reason it matched.
#[derive(Debug, Clone, Copy)]
pub struct SkillMatch<'r> {
    /// The matched skill.
    pub skill: &'r Skill,
    /// Match route and reason.
    pub details: MatchDetails,
}

impl<'r> SkillMatch<'r> {
    /// Name of the matched skill.
    pub fn name(&self) -> &'r str {
        self.skill.name()
    }
}

/// Text of the event's file, resolved lazily at most once per evaluation.
///
/// Resolution order: the event's supplied `fileContent` if non-empty,
/// otherwise a best-effort read of the file path, otherwise empty.
pub struct FileText<'a> {
    event: &'a PromptEvent,
    env: &'a dyn SessionEnv,
    resolved: OnceCell<Cow<'a, str>>,
}

impl<'a> FileText<'a> {
    /// Create a resolver for the given event.
    pub fn new(event: &'a PromptEvent, env: &'a dyn SessionEnv) -> Self {
        Self {
            event,
            env,
            resolved: OnceCell::new(),
        }
    }

    /// Get the resolved text, reading the file on first use.
    pub fn get(&self) -> &str {
        self.resolved.get_or_init(|| {
            if let Some(content) = self.event.supplied_content() {
                return Cow::Borrowed(content);
            }
            let read = self
                .event
                .file_path()
                .and_then(|path| self.env.read_file(path))
                .unwrap_or_default();
            Cow::Owned(read)
        })
    }
}

impl std::fmt::Debug for FileText<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileText")
            .field("file", &self.event.file_path())
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}

impl Skill {
    /// Match this skill against an event.
    ///
    /// Returns `None` when no route matches.
    pub fn match_event(&self, event: &PromptEvent, text: &FileText<'_>) -> Option<MatchDetails> {
        if let Some(triggers) = &self.prompt_triggers {
            let prompt = event.prompt();

            if !triggers.keywords.is_empty() && contains_any_keyword(prompt, &triggers.keywords) {
                return Some(MatchDetails::keyword());
            }

            if !triggers.intent_patterns.is_empty()
                && regex_any(prompt, &triggers.intent_patterns, &self.name)
            {
                return Some(MatchDetails::intent());
            }
        }

        self.match_file(event, text)
    }

    /// The file route.
    fn match_file(&self, event: &PromptEvent, text: &FileText<'_>) -> Option<MatchDetails> {
        let triggers = self.file_triggers.as_ref()?;
        let path = event.file_path()?;

        if triggers.path_patterns.is_empty()
            || !glob_any(path, &triggers.path_patterns, &self.name)
        {
            return None;
        }

        if !triggers.path_exclusions.is_empty()
            && glob_any(path, &triggers.path_exclusions, &self.name)
        {
            tracing::debug!("Skill '{}': path '{}' is excluded", self.name, path);
            return None;
        }

        if !triggers.content_patterns.is_empty()
            && !regex_any(text.get(), &triggers.content_patterns, &self.name)
        {
            return None;
        }

        Some(MatchDetails::file())
    }
}

/// Match every skill in the rule set, preserving rule set order.
pub fn match_skills<'r>(
    rules: &'r RuleSet,
    event: &PromptEvent,
    text: &FileText<'_>,
) -> Vec<SkillMatch<'r>> {
    rules
        .iter()
        .filter_map(|skill| {
            skill.match_event(event, text).map(|details| {
                tracing::debug!(
                    skill = %skill.name(),
                    match_type = %details.match_type,
                    "Skill matched"
                );
                SkillMatch { skill, details }
            })
        })
        .collect()
}

/// Check if any keyword is a case-insensitive substring of `text`.
fn contains_any_keyword(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
}

/// Check if any pattern matches anywhere in `text`.
///
/// Patterns are compiled case-insensitive and multiline. Invalid patterns
/// are logged and skipped.
fn regex_any(text: &str, patterns: &[String], skill: &str) -> bool {
    patterns.iter().any(|pattern| {
        match RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
        {
            Ok(re) => re.is_match(text),
            Err(e) => {
                tracing::warn!(
                    "Invalid pattern '{}' in skill '{}': {}",
                    pattern,
                    skill,
                    e
                );
                false
            }
        }
    })
}

/// Check if `path` matches any shell glob.
///
/// Globs follow `fnmatch` rules: matching is case-sensitive and `*` also
/// matches `/`, which makes `**` equivalent to `*`.
fn glob_any(path: &str, patterns: &[String], skill: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| match glob::Pattern::new(&collapse_stars(pattern)) {
            Ok(glob) => glob.matches(path),
            Err(e) => {
                tracing::warn!(
                    "Invalid glob '{}' in skill '{}': {}",
                    pattern,
                    skill,
                    e
                );
                false
            }
        })
}

/// Collapse runs of `*` into a single `*`.
fn collapse_stars(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains("**") {
        return Cow::Borrowed(pattern);
    }
    let mut collapsed = String::with_capacity(pattern.len());
    let mut prev_star = false;
    for c in pattern.chars() {
        if c == '*' && prev_star {
            continue;
        }
        prev_star = c == '*';
        collapsed.push(c);
    }
    Cow::Owned(collapsed)
}
