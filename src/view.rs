// View selection: which tasks to show, and in what order

use crate::task::Task;
use std::cmp::Ordering;
use std::fmt;

/// Display mode for the task list
///
/// Dates compare as `YYYY-MM-DD` strings, which matches calendar order for
/// well-formed dates. An unrecognized mode is kept verbatim and behaves like `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Tasks dated today
    Today,
    /// Tasks dated today or later, soonest first
    Upcoming,
    /// Every task, latest date first
    #[default]
    All,
    SortOldest,
    SortNewest,
    Unknown(String),
}

impl ViewMode {
    /// The five modes offered to users, in menu order
    pub const KNOWN: [ViewMode; 5] = [
        ViewMode::Today,
        ViewMode::Upcoming,
        ViewMode::All,
        ViewMode::SortOldest,
        ViewMode::SortNewest,
    ];

    /// Map an identifier to a mode. Never fails.
    pub fn parse(value: &str) -> Self {
        match value {
            "today" => ViewMode::Today,
            "upcoming" => ViewMode::Upcoming,
            "all" => ViewMode::All,
            "sort_oldest" => ViewMode::SortOldest,
            "sort_newest" => ViewMode::SortNewest,
            other => ViewMode::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ViewMode::Today => "today",
            ViewMode::Upcoming => "upcoming",
            ViewMode::All => "all",
            ViewMode::SortOldest => "sort_oldest",
            ViewMode::SortNewest => "sort_newest",
            ViewMode::Unknown(s) => s,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ViewMode {
    fn from(value: &str) -> Self {
        ViewMode::parse(value)
    }
}

fn date_asc(a: &Task, b: &Task) -> Ordering {
    a.date.cmp(&b.date)
}

fn date_desc(a: &Task, b: &Task) -> Ordering {
    b.date.cmp(&a.date)
}

/// Ordered subset of `tasks` for `mode`, given today's `YYYY-MM-DD` date
///
/// Sorting is stable: tasks with equal dates keep their relative input order.
pub fn derive(tasks: &[Task], mode: &ViewMode, today: &str) -> Vec<Task> {
    let mut items: Vec<Task> = match mode {
        ViewMode::Today => tasks.iter().filter(|t| t.date == today).cloned().collect(),
        ViewMode::Upcoming => tasks.iter().filter(|t| t.date.as_str() >= today).cloned().collect(),
        _ => tasks.to_vec(),
    };

    match mode {
        ViewMode::Upcoming | ViewMode::SortOldest => items.sort_by(date_asc),
        _ => items.sort_by(date_desc),
    }

    items
}

/// Holds the current view mode
#[derive(Debug, Clone, Default)]
pub struct ViewSelector {
    mode: ViewMode,
}

impl ViewSelector {
    /// A selector showing `All`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Set the mode as given, unknown values included
    pub fn select_mode(&mut self, mode: impl Into<ViewMode>) {
        self.mode = mode.into();
    }

    /// Back to `All`
    pub fn clear(&mut self) {
        self.mode = ViewMode::All;
    }

    pub fn derive(&self, tasks: &[Task], today: &str) -> Vec<Task> {
        derive(tasks, &self.mode, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: &str = "2024-06-15";

    fn sample() -> Vec<Task> {
        vec![
            Task::new("a", "New year", "2024-01-01"),
            Task::new("b", "Midyear", "2024-06-15"),
            Task::new("c", "Year end", "2024-12-31"),
        ]
    }

    fn dates(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.date.as_str()).collect()
    }

    #[test]
    fn test_today() {
        let result = derive(&sample(), &ViewMode::Today, TODAY);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn test_upcoming() {
        let result = derive(&sample(), &ViewMode::Upcoming, TODAY);
        assert_eq!(dates(&result), vec!["2024-06-15", "2024-12-31"]);
    }

    #[test]
    fn test_sort_oldest() {
        let result = derive(&sample(), &ViewMode::SortOldest, TODAY);
        assert_eq!(dates(&result), vec!["2024-01-01", "2024-06-15", "2024-12-31"]);
    }

    #[test]
    fn test_sort_newest_and_all() {
        let newest = derive(&sample(), &ViewMode::SortNewest, TODAY);
        assert_eq!(dates(&newest), vec!["2024-12-31", "2024-06-15", "2024-01-01"]);

        let all = derive(&sample(), &ViewMode::All, TODAY);
        assert_eq!(all, newest);
    }

    #[test]
    fn test_unknown_mode_behaves_as_all() {
        let unknown = derive(&sample(), &ViewMode::parse("by_priority"), TODAY);
        assert_eq!(unknown, derive(&sample(), &ViewMode::All, TODAY));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let tasks = vec![
            Task::new("x", "First", "2024-05-05"),
            Task::new("y", "Second", "2024-05-05"),
            Task::new("z", "Earlier", "2024-01-01"),
        ];

        let ids = |v: Vec<Task>| v.into_iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(derive(&tasks, &ViewMode::SortOldest, TODAY)), vec!["z", "x", "y"]);
        assert_eq!(ids(derive(&tasks, &ViewMode::SortNewest, TODAY)), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_empty_input() {
        for mode in ViewMode::KNOWN.iter() {
            assert!(derive(&[], mode, TODAY).is_empty());
        }
    }

    #[test]
    fn test_derive_does_not_mutate() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = derive(&tasks, &ViewMode::SortNewest, TODAY);
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_parse_roundtrip_known() {
        for mode in ViewMode::KNOWN.iter() {
            assert_eq!(&ViewMode::parse(mode.as_str()), mode);
        }
        assert_eq!(ViewMode::parse("bogus").as_str(), "bogus");
        assert_eq!(ViewMode::parse("bogus"), ViewMode::Unknown("bogus".to_string()));
    }

    #[test]
    fn test_selector_defaults_to_all() {
        let selector = ViewSelector::new();
        assert_eq!(selector.mode(), &ViewMode::All);
    }

    #[test]
    fn test_selector_select_and_clear() {
        let mut selector = ViewSelector::new();

        selector.select_mode("upcoming");
        assert_eq!(selector.mode(), &ViewMode::Upcoming);
        assert_eq!(dates(&selector.derive(&sample(), TODAY)), vec!["2024-06-15", "2024-12-31"]);

        selector.select_mode("whatever");
        assert_eq!(selector.mode(), &ViewMode::Unknown("whatever".to_string()));

        selector.clear();
        assert_eq!(selector.mode(), &ViewMode::All);
    }
}
