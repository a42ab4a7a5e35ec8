//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a tutor turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the tutor's final answer
    #[default]
    Response,
    /// Every agent's contribution, plus consensus rounds
    Full,
    /// The workflow state as JSON
    Json,
}

/// CLI arguments for agent-tutor
#[derive(Parser, Debug)]
#[command(name = "agent-tutor")]
#[command(author, version, about = "Programming tutor backed by cooperating LLM agents")]
#[command(long_about = r#"
Agent Tutor answers programming questions with one or more LLM agents.

Orchestrations:
  single       One tutor agent answers directly
  multi-agent  Tutor drafts, expert analyses, teacher reviews, tutor revises
  consensus    Expert, tutor and teacher repeat rounds until the teacher agrees

Configuration files are loaded from (in priority order):
1. TUTOR_* environment variables (e.g. TUTOR_MODEL__NAME)
2. --config <path>     Explicit config file
3. ./tutor.toml        Project-level config
4. ~/.config/agent-tutor/config.toml   Global config

Example:
  agent-tutor "Why does my for loop skip the last element?"
  agent-tutor -l Go --mode debug --orchestration consensus "Why is my slice empty?"
  agent-tutor --chat --orchestration multi-agent
"#)]
pub struct Cli {
    /// The question for the tutor (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Programming language being taught (Python, Java, C++, Go, C, ...)
    #[arg(short, long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Tutoring mode: adaptive, debug, fundamentals, examples, exercise, feedback
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Orchestration: single, multi-agent, pipeline or consensus
    #[arg(long, value_name = "TYPE")]
    pub orchestration: Option<String>,

    /// Round cap for the consensus orchestration
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Skip the tutor's revision pass in the multi-agent pipeline
    #[arg(long)]
    pub no_revision: bool,

    /// Log each agent call with the student's full request
    #[arg(long)]
    pub debug_agents: bool,

    /// Ollama model name
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Ollama server URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "response")]
    pub output: OutputFormat,

    /// Resume a stored conversation by id
    #[arg(long, value_name = "ID")]
    pub conversation: Option<String>,

    /// List stored conversations and exit
    #[arg(long)]
    pub list_conversations: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_one_shot_defaults() {
        let cli = Cli::parse_from(["agent-tutor", "fix my off-by-one loop"]);
        assert_eq!(cli.question.as_deref(), Some("fix my off-by-one loop"));
        assert_eq!(cli.output, OutputFormat::Response);
        assert!(!cli.chat);
        assert!(!cli.no_revision);
        assert!(!cli.debug_agents);
        assert!(cli.orchestration.is_none());
    }

    #[test]
    fn test_all_overrides() {
        let cli = Cli::parse_from([
            "agent-tutor",
            "--chat",
            "-l",
            "Go",
            "--mode",
            "debug",
            "--orchestration",
            "consensus",
            "--max-rounds",
            "5",
            "--no-revision",
            "--debug-agents",
            "-m",
            "qwen2.5-coder:7b",
            "--base-url",
            "http://gpu:11434",
            "-o",
            "json",
            "-vv",
        ]);
        assert!(cli.chat);
        assert_eq!(cli.language.as_deref(), Some("Go"));
        assert_eq!(cli.mode.as_deref(), Some("debug"));
        assert_eq!(cli.orchestration.as_deref(), Some("consensus"));
        assert_eq!(cli.max_rounds, Some(5));
        assert!(cli.no_revision);
        assert!(cli.debug_agents);
        assert_eq!(cli.model.as_deref(), Some("qwen2.5-coder:7b"));
        assert_eq!(cli.base_url.as_deref(), Some("http://gpu:11434"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }
}
