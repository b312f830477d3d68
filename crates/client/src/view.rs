//! Filtering, sorting and summaries over the loaded task list.
//!
//! Everything here is a pure function of the task slice and the current
//! [`ViewFilters`], recomputed whenever either changes.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use todo_domain::Task;

// =============================================================================
// Filters
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Earliest due date first; undated tasks last.
    #[default]
    DueDate,
    /// High, then medium, then low.
    Priority,
    /// Newest first.
    CreatedAt,
}

impl SortKey {
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::DueDate => match (left.due_date, right.due_date) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Priority => right.priority.rank().cmp(&left.priority.rank()),
            Self::CreatedAt => right.created_at.cmp(&left.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilters {
    pub status: StatusFilter,
    /// Case-insensitive substring of title or description; empty means off.
    pub search: String,
    pub sort: SortKey,
    /// Exact category label.
    pub category: Option<String>,
    /// Exact due date.
    pub due_date: Option<NaiveDate>,
}

impl ViewFilters {
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task)
            && self.matches_search(task)
            && self
                .category
                .as_deref()
                .is_none_or(|category| task.categories.contains(category))
            && self.due_date.is_none_or(|due| task.due_date == Some(due))
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let query = self.search.to_lowercase();
        task.title.to_lowercase().contains(&query)
            || task.description.to_lowercase().contains(&query)
    }
}

/// Applies the filters in order (status, search, category, due date), then
/// a stable sort on `filters.sort`.
#[must_use]
pub fn visible_tasks<'a>(tasks: &'a [Task], filters: &ViewFilters) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|task| filters.matches(task)).collect();
    visible.sort_by(|left, right| filters.sort.compare(left, right));
    visible
}

// =============================================================================
// Summaries
// =============================================================================

/// Distinct non-empty category labels across all tasks, in first-seen order.
#[must_use]
pub fn category_options(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .flat_map(|task| task.categories.labels())
        .filter(|label| !label.is_empty() && seen.insert(label.as_str()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCount {
    pub total: usize,
    pub completed: usize,
}

#[must_use]
pub fn task_count(tasks: &[Task]) -> TaskCount {
    TaskCount {
        total: tasks.len(),
        completed: tasks.iter().filter(|task| task.completed).count(),
    }
}

/// How a due date is highlighted relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueHighlight {
    DueToday,
    DueYesterday,
    Normal,
}

impl DueHighlight {
    #[must_use]
    pub fn classify(due_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        match due_date.map(|due| (due - today).num_days()) {
            Some(0) => Self::DueToday,
            Some(-1) => Self::DueYesterday,
            _ => Self::Normal,
        }
    }
}
