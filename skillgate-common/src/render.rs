//! Priority grouping and the skill activation banner.
//!
//! The banner layout is scraped by downstream tooling, so headings, bucket
//! order, and framing lines are fixed.

use std::fmt::Write;

use crate::matcher::SkillMatch;
use crate::rules::Priority;

/// Horizontal rule framing the banner.
const RULE_LINE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Banner title.
const TITLE: &str = "🎯 SKILL ACTIVATION CHECK";

/// Closing call to action.
const ACTION_LINE: &str = "ACTION: Use Skill tool BEFORE responding";

/// Prefix for each skill name.
const SKILL_MARKER: &str = "  → ";

/// Heading for a priority bucket.
pub fn bucket_heading(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "⚠️ CRITICAL SKILLS (REQUIRED):",
        Priority::High => "📚 RECOMMENDED SKILLS:",
        Priority::Medium => "💡 SUGGESTED SKILLS:",
        Priority::Low => "📌 OPTIONAL SKILLS:",
    }
}

/// Matched skill names grouped into the four priority buckets.
///
/// Each bucket keeps the order in which its skills matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityBuckets<'a> {
    critical: Vec<&'a str>,
    high: Vec<&'a str>,
    medium: Vec<&'a str>,
    low: Vec<&'a str>,
}

impl<'a> PriorityBuckets<'a> {
    /// Group matches by their skill's priority.
    pub fn from_matches(matches: &[SkillMatch<'a>]) -> Self {
        let mut buckets = Self::default();
        for matched in matches {
            buckets.push(matched.skill.priority, matched.skill.name());
        }
        buckets
    }

    /// Add a skill name to a bucket.
    pub fn push(&mut self, priority: Priority, name: &'a str) {
        self.bucket_mut(priority).push(name);
    }

    /// Names in the given bucket.
    pub fn get(&self, priority: Priority) -> &[&'a str] {
        match priority {
            Priority::Critical => &self.critical,
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    fn bucket_mut(&mut self, priority: Priority) -> &mut Vec<&'a str> {
        match priority {
            Priority::Critical => &mut self.critical,
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        }
    }

    /// Iterate over all four buckets in banner order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &[&'a str])> + '_ {
        Priority::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Total number of grouped skills.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, names)| names.len()).sum()
    }

    /// Check if every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render the activation banner.
///
/// Empty buckets are omitted; the framing is always emitted.
pub fn render_banner(buckets: &PriorityBuckets<'_>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{RULE_LINE}");
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{RULE_LINE}");
    let _ = writeln!(out);

    for (priority, names) in buckets.iter().filter(|(_, names)| !names.is_empty()) {
        let _ = writeln!(out, "{}", bucket_heading(priority));
        for name in names {
            let _ = writeln!(out, "{SKILL_MARKER}{name}");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{ACTION_LINE}");
    let _ = writeln!(out, "{RULE_LINE}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_line_width() {
        assert_eq!(RULE_LINE.chars().count(), 39);
    }

    #[test]
    fn test_unrecognized_priority_lands_in_optional() {
        let mut buckets = PriorityBuckets::default();
        buckets.push(Priority::Critical, "db-migrations");
        buckets.push(Priority::Low, "style-guide");
        buckets.push(Priority::from_label("someday"), "nice-to-have");

        let banner = render_banner(&buckets);
        let critical = banner.find("⚠️ CRITICAL SKILLS (REQUIRED):").unwrap();
        let optional = banner.find("📌 OPTIONAL SKILLS:").unwrap();
        let style = banner.find("  → style-guide").unwrap();
        let nice = banner.find("  → nice-to-have").unwrap();

        assert!(critical < optional);
        assert!(optional < style && style < nice);
        assert!(!banner.contains("📚 RECOMMENDED SKILLS:"));
        assert!(!banner.contains("💡 SUGGESTED SKILLS:"));
    }

    #[test]
    fn test_render_banner_exact_layout() {
        let mut buckets = PriorityBuckets::default();
        buckets.push(Priority::High, "frontend-dev-guidelines");
        buckets.push(Priority::Medium, "error-tracking");

        let expected = format!(
            "{RULE_LINE}\n\
             🎯 SKILL ACTIVATION CHECK\n\
             {RULE_LINE}\n\
             \n\
             📚 RECOMMENDED SKILLS:\n  → frontend-dev-guidelines\n\
             \n\
             💡 SUGGESTED SKILLS:\n  → error-tracking\n\
             \n\
             ACTION: Use Skill tool BEFORE responding\n\
             {RULE_LINE}\n"
        );
        assert_eq!(render_banner(&buckets), expected);
    }

    #[test]
    fn test_render_banner_empty_still_framed() {
        let banner = render_banner(&PriorityBuckets::default());
        assert!(banner.starts_with(RULE_LINE));
        assert!(banner.contains(TITLE));
        assert!(banner.contains(ACTION_LINE));
        assert!(!banner.contains(SKILL_MARKER));
    }

    #[test]
    fn test_buckets_iterate_in_fixed_order() {
        let buckets = PriorityBuckets::default();
        let order: Vec<Priority> = buckets.iter().map(|(p, _)| p).collect();
        assert_eq!(order, Priority::ALL.to_vec());
        assert!(buckets.is_empty());
    }
}
