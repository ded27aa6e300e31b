use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this theme for the current invocation only
    #[arg(long, global = true, value_name = "THEME")]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: reminders add "Buy milk" --due "2026-09-01 09:00" --remind "2026-09-01 08:45"
    Add {
        title: Option<String>,
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
        #[arg(long = "due", value_name = "DATETIME")]
        due_date: Option<String>,
        #[arg(long = "remind", value_name = "DATETIME")]
        reminder_time: Option<String>,
    },
    /// Edit a task, replacing its fields
    ///
    /// Example: reminders edit 1 "Buy oat milk" --remind "2026-09-01 17:30"
    Edit {
        id: i64,
        title: String,
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
        #[arg(long = "due", value_name = "DATETIME")]
        due_date: Option<String>,
        #[arg(long = "remind", value_name = "DATETIME")]
        reminder_time: Option<String>,
    },
    /// Delete a task
    ///
    /// Example: reminders delete 1
    Delete {
        id: i64,
    },
    /// Mark a task as completed
    ///
    /// Example: reminders done 1
    Done {
        id: i64,
    },
    /// Show details of a task
    ///
    /// Example: reminders show 1
    Show {
        id: i64,
    },
    /// List all tasks
    ///
    /// Example: reminders list
    List,
    /// Show or change the color theme
    ///
    /// Example: reminders theme dark
    Theme {
        name: Option<String>,
    },
}
