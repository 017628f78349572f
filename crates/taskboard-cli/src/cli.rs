use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use taskboard_core::{Priority, PriorityFilter, StatusFilter, TaskId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskboard",
    version,
    about = "Task board client with priorities, categories and an offline demo mode",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "taskboardrc", global = true)]
    pub taskboardrc: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show tasks, optionally narrowed by search text and filters.
    List {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long, default_value_t = StatusFilter::All)]
        status: StatusFilter,

        #[arg(long, default_value_t = PriorityFilter::All)]
        priority: PriorityFilter,
    },

    /// Add a task.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        #[arg(short, long, default_value_t = Priority::Medium)]
        priority: Priority,

        #[arg(short, long, default_value = "")]
        category: String,
    },

    /// Flip a task between active and completed.
    Toggle { id: TaskId },

    Delete { id: TaskId },

    /// Change the priority of a task. Stored locally only.
    Priority { id: TaskId, priority: Priority },

    Stats,

    Categories,
}

impl Default for Command {
    fn default() -> Self {
        Command::List {
            search: String::new(),
            status: StatusFilter::All,
            priority: PriorityFilter::All,
        }
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "off"
    } else if quiet == 1 {
        "error"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_list() {
        let cli = GlobalCli::parse_from(["taskboard"]);
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
    }

    #[test]
    fn add_joins_words_and_parses_priority() {
        let cli = GlobalCli::parse_from([
            "taskboard", "add", "Buy", "milk", "-p", "high", "-c", "Home",
        ]);
        let Some(Command::Add {
            title,
            priority,
            category,
        }) = cli.command
        else {
            panic!("expected add");
        };
        assert_eq!(title.join(" "), "Buy milk");
        assert_eq!(priority, Priority::High);
        assert_eq!(category, "Home");
    }

    #[test]
    fn rc_overrides_are_global() {
        let cli = GlobalCli::parse_from([
            "taskboard",
            "stats",
            "--rc",
            "api.url=http://example.test",
        ]);
        assert_eq!(cli.rc_overrides.len(), 1);
        assert_eq!(cli.rc_overrides[0].key, "api.url");
        assert_eq!(cli.rc_overrides[0].value, "http://example.test");
    }

    #[test]
    fn list_filters_parse() {
        let cli = GlobalCli::parse_from([
            "taskboard", "list", "--status", "active", "--priority", "low",
        ]);
        assert_eq!(
            cli.command,
            Some(Command::List {
                search: String::new(),
                status: StatusFilter::Active,
                priority: PriorityFilter::Only(Priority::Low),
            })
        );
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert!(GlobalCli::try_parse_from(["taskboard", "priority", "1", "urgent"]).is_err());
        assert!(GlobalCli::try_parse_from(["taskboard", "add", "x", "-p", "hgih"]).is_err());
        assert!(GlobalCli::try_parse_from(["taskboard", "list", "--priority", "urgent"]).is_err());
    }
}
