// Text rendering for the CLI

use crate::store::ValidationError;
use crate::task::Task;
use crate::view::ViewMode;
use colored::Colorize;

pub const EMPTY_LIST: &str = "No tasks to show.";

/// Human-readable name of a view
pub fn view_label(mode: &ViewMode) -> &'static str {
    match mode {
        ViewMode::Today => "Today",
        ViewMode::Upcoming => "Upcoming",
        ViewMode::SortOldest => "Sort by Oldest",
        ViewMode::SortNewest => "Sort by Newest",
        ViewMode::All | ViewMode::Unknown(_) => "All",
    }
}

/// Message shown to the user when `add` is rejected
pub fn validation_message(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::MissingTitle => "Please enter a task.",
        ValidationError::MissingDate => "Please select a valid date.",
    }
}

/// One line per task: title, date badge, id
pub fn render_rows(tasks: &[Task]) -> Vec<String> {
    if tasks.is_empty() {
        return vec![EMPTY_LIST.dimmed().to_string()];
    }

    let width = tasks.iter().map(|t| t.title.chars().count()).max().unwrap_or(0);
    tasks
        .iter()
        .map(|t| {
            format!(
                "{:<width$}  {}  {}",
                t.title,
                format!("[{}]", t.date).cyan(),
                t.id.dimmed(),
                width = width
            )
        })
        .collect()
}

/// The view menu, with the active entry marked
pub fn render_views(current: &ViewMode) -> Vec<String> {
    ViewMode::KNOWN
        .iter()
        .map(|mode| {
            let line = format!("{:<12} {}", mode.as_str(), view_label(mode));
            if mode == current {
                format!("* {}", line.bold().green())
            } else {
                format!("  {}", line)
            }
        })
        .collect()
}
