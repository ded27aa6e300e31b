use clap::{CommandFactory, Parser};
use reminders_app::cli::{Cli, Command};
use reminders_core::config::{self, Config, Palette};
use reminders_core::error::AppError;
use reminders_core::model::{Task, TaskDraft};
use reminders_core::notify::notifier_from_env;
use reminders_core::scheduler::ReminderScheduler;
use reminders_core::shell::Shell;
use reminders_core::store::TaskStore;
use std::io::{self, BufRead};
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Due Date")]
    due_date: String,
    #[tabled(rename = "Reminder Time")]
    reminder_time: String,
    #[tabled(rename = "Completed")]
    completed: String,
}

fn task_row(task: &Task, palette: &Palette) -> TaskRow {
    let title = if task.completed {
        palette.mutedize(&task.title)
    } else {
        palette.accentize(&task.title)
    };

    TaskRow {
        id: task.id,
        title,
        description: task.description.clone().unwrap_or_default(),
        due_date: task.due_date.clone().unwrap_or_default(),
        reminder_time: task.reminder_time.clone().unwrap_or_default(),
        completed: if task.completed { "yes" } else { "no" }.to_string(),
    }
}

fn print_tasks_plain(tasks: &[Task], palette: &Palette) {
    let rows: Vec<TaskRow> = tasks.iter().map(|task| task_row(task, palette)).collect();
    println!("{}", Table::new(rows));
}

fn print_tasks_json(tasks: &[Task]) {
    println!("{}", serde_json::json!(tasks));
}

fn print_task_json(task: &Task) {
    println!("{}", serde_json::json!(task));
}

fn print_task_plain(task: &Task) {
    println!("Title: {}", task.title);
    println!(
        "Description: {}",
        task.description.as_deref().unwrap_or("-")
    );
    println!("Due date: {}", task.due_date.as_deref().unwrap_or("-"));
    println!(
        "Reminder time: {}",
        task.reminder_time.as_deref().unwrap_or("-")
    );
    println!("Completed: {}", if task.completed { "yes" } else { "no" });
}

fn current_palette(cli_theme: Option<&str>) -> Palette {
    let config = config::load_config_with_fallback();
    if let Some(err) = config.error {
        eprintln!("WARNING: {err}");
    }
    let theme = cli_theme
        .map(str::to_string)
        .or(config.config.theme);
    config::palette_for_theme(theme.as_deref())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::validation("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn open_shell() -> Result<Shell, AppError> {
    let store = TaskStore::open_default()?;
    let notifier = notifier_from_env()?;
    let scheduler = ReminderScheduler::start(notifier);
    Ok(Shell::new(store, scheduler))
}

fn run_command(shell: &Shell, cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Add {
            title,
            description,
            due_date,
            reminder_time,
        } => {
            let title = match title {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::validation("title is required")),
            };

            let task = shell.add_task(&TaskDraft {
                title,
                description,
                due_date,
                reminder_time,
            })?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::Edit {
            id,
            title,
            description,
            due_date,
            reminder_time,
        } => {
            let task = shell.update_task(
                id,
                &TaskDraft {
                    title,
                    description,
                    due_date,
                    reminder_time,
                },
            )?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Updated task: {} ({})", task.title, task.id);
            }
        }
        Command::Delete { id } => {
            shell.delete_task(id)?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                println!("Deleted task {id}");
            }
        }
        Command::Done { id } => {
            let task = shell.complete_task(id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Completed task: {} ({})", task.title, task.id);
            }
        }
        Command::Show { id } => {
            let task = shell.store().get(id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                print_task_plain(&task);
            }
        }
        Command::List => {
            let tasks = shell.store().list()?;
            if cli.json {
                print_tasks_json(&tasks);
            } else {
                print_tasks_plain(&tasks, &current_palette(cli.theme.as_deref()));
            }
        }
        Command::Theme { name } => match name {
            Some(raw) => {
                let theme = config::canonical_theme_name(&raw);
                config::save_config(&Config {
                    theme: theme.clone(),
                })?;
                println!("Theme set to {}", theme.as_deref().unwrap_or("light"));
            }
            None => {
                let config = config::load_config_with_fallback().config;
                println!("{}", config.theme.as_deref().unwrap_or("light"));
            }
        },
    }

    Ok(())
}

/// Resident session: reload the store (re-registering every pending
/// reminder) and keep the process alive so the scheduler can fire.
fn run_interactive(shell: &Shell) -> Result<(), AppError> {
    shell.reload()?;

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::storage(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("reminders".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(shell, cli) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let shell = match open_shell() {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive(&shell) {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(&shell, cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
