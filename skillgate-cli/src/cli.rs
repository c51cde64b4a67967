//! CLI definition for the skillgate command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skillgate_common::settings::RulesLocation;

/// Skill Gate - skill activation and guardrails for Claude Code prompts
///
/// With no subcommand, reads a UserPromptSubmit hook event from stdin and
/// prints either nothing, a skill activation banner, or a block message.
#[derive(Parser, Debug)]
#[command(name = "skillgate")]
#[command(version)]
#[command(about = "Skill Gate - Claude Code skill activation hook")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Project root containing .claude/skills/skill-rules.json
    /// [default: $CLAUDE_PROJECT_DIR, then the current directory]
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Skill rules file to use instead of the project's
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Where to load the rules from, per the command-line overrides.
    pub fn rules_location(&self) -> RulesLocation {
        RulesLocation {
            rules_file: self.rules.clone(),
            project_dir: self.project_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the skills defined in the rule set
    List {
        /// Show detailed output including descriptions
        #[arg(short, long)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which skills a prompt activates and what the hook would do
    Explain {
        /// Prompt text to evaluate
        prompt: String,
        /// File path the prompt concerns
        #[arg(long)]
        file: Option<String>,
        /// File content to match instead of reading the file
        #[arg(long)]
        content: Option<String>,
    },
}
