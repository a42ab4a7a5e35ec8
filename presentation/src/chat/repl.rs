//! REPL (Read-Eval-Print Loop) for interactive tutoring sessions

use crate::cli::commands::OutputFormat;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tutor_application::{NoProgress, TurnOutput, TutorTurnUseCase};
use tutor_domain::Conversation;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Help,
    Config,
    History,
    New,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        match line.split_whitespace().next().unwrap_or_default() {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/config" => ReplCommand::Config,
            "/history" => ReplCommand::History,
            "/new" => ReplCommand::New,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL over one conversation at a time
pub struct ChatRepl {
    use_case: Arc<TutorTurnUseCase>,
    conversation: Conversation,
    show_progress: bool,
    output: OutputFormat,
}

impl ChatRepl {
    /// Create a REPL continuing `conversation`
    pub fn new(use_case: Arc<TutorTurnUseCase>, conversation: Conversation) -> Self {
        Self {
            use_case,
            conversation,
            show_progress: true,
            output: OutputFormat::Response,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Run until `/quit` or end of input
    pub async fn run(mut self) -> io::Result<()> {
        let mut lines = BufReader::new(io::stdin()).lines();

        self.print_welcome();

        loop {
            print!(">>> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!("Bye!");
                break;
            };
            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                if self.handle_command(line).await {
                    break;
                }
                continue;
            }

            self.process_message(line).await;
        }

        self.use_case.end(&self.conversation.id);
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Agent Tutor - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_config();
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /config           - Show the session configuration");
        println!("  /history          - Show this conversation");
        println!("  /new              - Start a new conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    fn print_config(&self) {
        let config = &self.conversation.config;
        println!("{} {}", "Conversation:".cyan(), self.conversation.id);
        println!("{} {}", "Language:".cyan(), config.language);
        println!("{} {}", "Mode:".cyan(), config.mode.description());
        println!("{} {}", "Orchestration:".cyan(), config.orchestration);
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, line: &str) -> bool {
        match ReplCommand::parse(line) {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Config => {
                println!();
                self.print_config();
                println!();
            }
            ReplCommand::History => {
                println!();
                println!("{}", ConsoleFormatter::format_history(&self.conversation));
                println!();
            }
            ReplCommand::New => self.start_new_conversation().await,
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn start_new_conversation(&mut self) {
        match self.use_case.start(self.conversation.config.clone()).await {
            Ok(conversation) => {
                self.use_case.end(&self.conversation.id);
                println!("Started conversation {}", conversation.id.bold());
                self.conversation = conversation;
            }
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }

    async fn process_message(&mut self, message: &str) {
        println!();

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case
                .execute_with_progress(&mut self.conversation, message, &progress)
                .await
        } else {
            self.use_case
                .execute_with_progress(&mut self.conversation, message, &NoProgress)
                .await
        };

        match result {
            Ok(output) => println!("{}", self.render(message, &output)),
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }

    fn render(&self, message: &str, output: &TurnOutput) -> String {
        match self.output {
            OutputFormat::Response => ConsoleFormatter::format_response_only(output),
            OutputFormat::Full => ConsoleFormatter::format(message, output),
            OutputFormat::Json => ConsoleFormatter::format_json(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/config"), ReplCommand::Config);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/new now"), ReplCommand::New);
        assert_eq!(
            ReplCommand::parse("/models"),
            ReplCommand::Unknown("/models".to_string())
        );
    }
}
