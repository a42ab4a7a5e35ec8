//! Progress reporting for tutoring workflows

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tutor_application::WorkflowProgressNotifier;
use tutor_domain::AgentRole;

/// Reports progress with one spinner per running agent
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<AgentRole, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn activity(role: AgentRole) -> &'static str {
        match role {
            AgentRole::Tutor => "writing an answer...",
            AgentRole::Expert => "analysing the problem...",
            AgentRole::Teacher => "reviewing...",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowProgressNotifier for ProgressReporter {
    fn on_agent_start(&self, role: AgentRole) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(role.display_name());
        pb.set_message(Self::activity(role));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(role, pb);
        }
    }

    fn on_agent_complete(&self, role: AgentRole, success: bool) {
        let Some(pb) = self.bars.lock().ok().and_then(|mut bars| bars.remove(&role)) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{}", "done".green()));
        } else {
            pb.abandon_with_message(format!("{}", "failed".red()));
        }
    }

    fn on_round_complete(&self, round: usize, consensus: bool) {
        let status = if consensus {
            "consensus reached".green()
        } else {
            "revision requested".yellow()
        };
        let _ = self
            .multi
            .println(format!("{} Round {}: {}", "->".cyan(), round, status));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl WorkflowProgressNotifier for SimpleProgress {
    fn on_agent_start(&self, role: AgentRole) {
        println!(
            "{} {} {}",
            "->".cyan(),
            role.display_name().bold(),
            ProgressReporter::activity(role)
        );
    }

    fn on_agent_complete(&self, role: AgentRole, success: bool) {
        if success {
            println!("  {} {}", "v".green(), role.display_name());
        } else {
            println!("  {} {} (failed)", "x".red(), role.display_name());
        }
    }

    fn on_round_complete(&self, round: usize, consensus: bool) {
        let status = if consensus { "consensus" } else { "revise" };
        println!("  Round {}: {}", round, status);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_running_agents() {
        let reporter = ProgressReporter::new();
        reporter.on_agent_start(AgentRole::Expert);
        assert!(reporter.bars.lock().unwrap().contains_key(&AgentRole::Expert));

        reporter.on_agent_complete(AgentRole::Expert, true);
        assert!(reporter.bars.lock().unwrap().is_empty());

        // Completion without a start is ignored
        reporter.on_agent_complete(AgentRole::Teacher, false);
        reporter.on_round_complete(1, false);
    }
}
