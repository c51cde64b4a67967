//! Skill Gate CLI - Claude Code UserPromptSubmit hook.
//!
//! Commands:
//! - `skillgate` (no args): Read a prompt event from stdin, print the decision
//! - `skillgate list [--json] [--verbose]`: List the skills in the rule set
//! - `skillgate explain <prompt> [--file F] [--content C]`: Show matches and decision
//!
//! Exit codes:
//! - 0: Success (nothing printed, or an advisory banner)
//! - 1: Error (rules missing or unreadable)
//! - 3: Blocked (a guardrail stopped the turn)

use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use skillgate::{explain, hook, list, load_rules};
use skillgate::{Cli, Commands};
use skillgate_common::{GateError, ProcessEnv, PromptEvent, SkillGate, ERROR_EXIT_CODE};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("skillgate=debug,skillgate_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = dispatch_command(cli);
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
fn dispatch_command(cli: Cli) -> i32 {
    match &cli.command {
        Some(cmd) => result_to_exit(dispatch_subcommand(&cli, cmd).map(|()| 0)),
        None => result_to_exit(run_hook_mode(&cli)),
    }
}

/// Handle an explicit subcommand.
fn dispatch_subcommand(cli: &Cli, cmd: &Commands) -> Result<(), GateError> {
    let rules = load_rules(&cli.rules_location(), &ProcessEnv)?;
    let mut stdout = io::stdout().lock();

    match cmd {
        Commands::List { verbose, json } => list::run_list(&rules, *verbose, *json, &mut stdout),
        Commands::Explain {
            prompt,
            file,
            content,
        } => {
            let mut event = PromptEvent::new(prompt.as_str());
            if let Some(file) = file {
                event = event.with_file(file.as_str());
            }
            if let Some(content) = content {
                event = event.with_file_content(content.as_str());
            }
            let gate = SkillGate::new(rules, ProcessEnv);
            explain::run_explain(&gate, &event, &mut stdout)
        }
    }
}

/// Convert a `Result<i32, E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<i32, E>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ERROR_EXIT_CODE
        }
    }
}

fn run_hook_mode(cli: &Cli) -> Result<i32, GateError> {
    // Check if stdin is a terminal (no piped input)
    if io::stdin().is_terminal() {
        // Show clap-generated help when run interactively without subcommand
        Cli::command().print_help().ok();
        println!();
        return Ok(0);
    }

    hook::run_hook(
        io::stdin().lock(),
        io::stdout().lock(),
        &cli.rules_location(),
        ProcessEnv,
    )
}
