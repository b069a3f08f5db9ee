use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;
use std::process;
use todostore::render::{render_rows, render_views, validation_message, view_label};
use todostore::{Backend, Config, SystemClock, TodoApp, UuidV7Ids, ValidationError, is_ymd};

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore CLI - dated task list with today/upcoming/all views")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: ~/.config/todostore/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the task data (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Storage backend: file or sqlite (overrides config)
    #[arg(short, long)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add {
        /// Task title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(short = 't', long)]
        date: Option<String>,
    },

    /// Remove a task by id
    Remove { id: String },

    /// List tasks for a view
    List {
        /// today, upcoming, all, sort_oldest or sort_newest
        #[arg(short, long, default_value = "all")]
        view: String,
    },

    /// Show the available views
    Views {
        #[arg(short, long, default_value = "all")]
        view: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(2);
    }
}

fn run() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from_path(path)?;
            config.apply_env(|key| std::env::var(key).ok())?;
            config
        }
        None => Config::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    let mut app = TodoApp::open(config.open_storage()?, Box::new(UuidV7Ids), Box::new(SystemClock));

    match cli.command {
        Commands::Add { title, date } => {
            let added = resolve_date(date, app.today()).and_then(|date| app.add(&title.join(" "), &date));
            match added {
                Ok(task) => {
                    println!("Added {} {} {}", task.title, format!("[{}]", task.date).cyan(), task.id.dimmed());
                }
                Err(e) => {
                    eprintln!("{}", validation_message(&e).red());
                    process::exit(1);
                }
            }
        }
        Commands::Remove { id } => {
            if app.remove(&id) {
                println!("Removed {}", id);
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::List { view } => {
            app.select_view(view.as_str());
            println!("{}", view_label(app.mode()).bold());
            for line in render_rows(&app.visible()) {
                println!("{}", line);
            }
        }
        Commands::Views { view } => {
            app.select_view(view.as_str());
            for line in render_views(app.mode()) {
                println!("{}", line);
            }
        }
    }

    if let Some(warning) = app.store().persistence_warning() {
        eprintln!("{} {}", "warning: changes not saved:".yellow(), warning);
    }

    Ok(())
}

/// Date for a new task: today when omitted, otherwise a strict `YYYY-MM-DD`
///
/// An empty value is passed through so the store reports it.
fn resolve_date(date: Option<String>, today: String) -> Result<String, ValidationError> {
    match date {
        None => Ok(today),
        Some(date) if date.is_empty() || is_ymd(&date) => Ok(date),
        Some(_) => Err(ValidationError::MissingDate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: &str = "2024-06-15";

    #[test]
    fn test_resolve_date_defaults_to_today() {
        assert_eq!(resolve_date(None, TODAY.to_string()), Ok(TODAY.to_string()));
    }

    #[test]
    fn test_resolve_date_accepts_ymd() {
        assert_eq!(
            resolve_date(Some("2024-12-31".to_string()), TODAY.to_string()),
            Ok("2024-12-31".to_string())
        );
    }

    #[test]
    fn test_resolve_date_bad_format_is_validation_error() {
        for bad in ["2024-6-1", "tomorrow", " 2024-01-01 ", "2023-02-29"] {
            let err = resolve_date(Some(bad.to_string()), TODAY.to_string()).unwrap_err();
            assert_eq!(err, ValidationError::MissingDate);
            assert_eq!(validation_message(&err), "Please select a valid date.");
        }
    }

    #[test]
    fn test_resolve_date_empty_left_to_store() {
        assert_eq!(resolve_date(Some(String::new()), TODAY.to_string()), Ok(String::new()));
    }
}
