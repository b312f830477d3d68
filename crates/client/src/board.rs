//! Client view state.
//!
//! [`TaskBoard`] owns the local copy of the task list, the active filters and
//! the form state. All mutation goes through its named operations. Toggle and
//! delete are applied locally before the server confirms them and are rolled
//! back when the gateway reports failure, so local state never stays diverged
//! from the server after a failed mutation.

use chrono::NaiveDate;
use todo_domain::{Task, TaskId};

use crate::form::TaskForm;
use crate::gateway::TaskGateway;
use crate::view::{self, SortKey, StatusFilter, TaskCount, ViewFilters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Creating,
    Editing(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A one-shot user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct TaskBoard<G> {
    gateway: G,
    tasks: Vec<Task>,
    filters: ViewFilters,
    form: FormState,
    loading: bool,
    notices: Vec<Notice>,
}

impl<G: TaskGateway> TaskBoard<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            filters: ViewFilters::default(),
            form: FormState::Closed,
            loading: false,
            notices: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub const fn filters(&self) -> &ViewFilters {
        &self.filters
    }

    pub const fn form_state(&self) -> FormState {
        self.form
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The filtered and sorted list to display.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        view::visible_tasks(&self.tasks, &self.filters)
    }

    /// Category choices for the filter, drawn from every loaded task.
    pub fn category_options(&self) -> Vec<String> {
        view::category_options(&self.tasks)
    }

    pub fn task_count(&self) -> TaskCount {
        view::task_count(&self.tasks)
    }

    /// Drains pending notifications.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Form for the current form state, if one is open.
    pub fn current_form(&self, today: NaiveDate) -> Option<TaskForm> {
        match self.form {
            FormState::Closed => None,
            FormState::Creating => Some(TaskForm::new(today)),
            FormState::Editing(id) => self.find(id).map(TaskForm::for_task),
        }
    }

    fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    // -------------------------------------------------------------------------
    // Filters and form
    // -------------------------------------------------------------------------

    pub const fn set_status(&mut self, status: StatusFilter) {
        self.filters.status = status;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    pub const fn set_sort(&mut self, sort: SortKey) {
        self.filters.sort = sort;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filters.category = category.filter(|label| !label.is_empty());
    }

    pub const fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.filters.due_date = due_date;
    }

    pub const fn open_create_form(&mut self) {
        self.form = FormState::Creating;
    }

    /// Opens the edit form; ignored when the task is not loaded.
    pub fn open_edit_form(&mut self, id: TaskId) {
        if self.find(id).is_some() {
            self.form = FormState::Editing(id);
        }
    }

    pub const fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    // -------------------------------------------------------------------------
    // Server-backed operations
    // -------------------------------------------------------------------------

    /// Replaces the local list with the server's.
    pub async fn load(&mut self) {
        self.loading = true;
        self.tasks = self.gateway.list_tasks().await;
        self.loading = false;
    }

    /// Validates and submits a new task. Returns whether it was created.
    pub async fn create(&mut self, form: &TaskForm) -> bool {
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(error) => {
                self.notices.push(Notice::error(error.to_string()));
                return false;
            }
        };

        match self.gateway.create_task(&draft).await {
            Some(task) => {
                self.tasks.push(task);
                self.form = FormState::Closed;
                self.notices.push(Notice::success("Task added successfully"));
                true
            }
            None => {
                self.notices.push(Notice::error("Failed to add task"));
                false
            }
        }
    }

    /// Validates and submits an edit. Returns whether it was saved.
    pub async fn update(&mut self, id: TaskId, form: &TaskForm) -> bool {
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(error) => {
                self.notices.push(Notice::error(error.to_string()));
                return false;
            }
        };

        match self.gateway.update_task(id, &draft).await {
            Some(updated) => {
                if let Some(task) = self.find_mut(id) {
                    *task = updated;
                }
                self.form = FormState::Closed;
                self.notices.push(Notice::success("Task updated successfully"));
                true
            }
            None => {
                self.notices.push(Notice::error("Failed to update task"));
                false
            }
        }
    }

    /// Flips `completed` locally, then confirms with the server.
    ///
    /// On failure the flag is restored to its prior value. Returns whether
    /// the server confirmed.
    pub async fn toggle(&mut self, id: TaskId) -> bool {
        let Some(task) = self.find_mut(id) else {
            return false;
        };
        let prior = task.completed;
        task.completed = !prior;

        match self.gateway.toggle_task(id, !prior).await {
            Some(confirmed) => {
                let completed = confirmed.completed;
                if let Some(task) = self.find_mut(id) {
                    *task = confirmed;
                }
                self.notices.push(Notice::success(if completed {
                    "Task completed!"
                } else {
                    "Task marked as active"
                }));
                true
            }
            None => {
                if let Some(task) = self.find_mut(id) {
                    task.completed = prior;
                }
                self.notices.push(Notice::error("Failed to update task status"));
                false
            }
        }
    }

    /// Removes the task locally, then confirms with the server.
    ///
    /// On failure the whole prior list is restored. Returns whether the
    /// server confirmed.
    pub async fn delete(&mut self, id: TaskId) -> bool {
        let snapshot = self.tasks.clone();
        self.tasks.retain(|task| task.id != id);

        if self.gateway.delete_task(id).await {
            if self.form == FormState::Editing(id) {
                self.form = FormState::Closed;
            }
            self.notices.push(Notice::success("Task deleted"));
            true
        } else {
            self.tasks = snapshot;
            self.notices.push(Notice::error("Failed to delete task"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::TaskDraft;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use todo_domain::{Categories, Priority};

    // =========================================================================
    // Scripted gateway
    // =========================================================================

    /// Gateway whose answers are queued up front. Unscripted calls fail.
    #[derive(Default)]
    struct ScriptedGateway {
        lists: Mutex<VecDeque<Vec<Task>>>,
        tasks: Mutex<VecDeque<Option<Task>>>,
        deletes: Mutex<VecDeque<bool>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn with_list(self, tasks: Vec<Task>) -> Self {
            self.lists.lock().unwrap().push_back(tasks);
            self
        }

        fn with_task(self, task: Option<Task>) -> Self {
            self.tasks.lock().unwrap().push_back(task);
            self
        }

        fn with_delete(self, result: bool) -> Self {
            self.deletes.lock().unwrap().push_back(result);
            self
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn next_task(&self) -> Option<Task> {
            self.tasks.lock().unwrap().pop_front().flatten()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TaskGateway for ScriptedGateway {
        async fn list_tasks(&self) -> Vec<Task> {
            self.record("list".to_string());
            self.lists.lock().unwrap().pop_front().unwrap_or_default()
        }

        async fn get_task(&self, id: TaskId) -> Option<Task> {
            self.record(format!("get {id}"));
            self.next_task()
        }

        async fn create_task(&self, draft: &TaskDraft) -> Option<Task> {
            self.record(format!("create {}", draft.title));
            self.next_task()
        }

        async fn update_task(&self, id: TaskId, _draft: &TaskDraft) -> Option<Task> {
            self.record(format!("update {id}"));
            self.next_task()
        }

        async fn toggle_task(&self, id: TaskId, completed: bool) -> Option<Task> {
            self.record(format!("toggle {id} {completed}"));
            self.next_task()
        }

        async fn delete_task(&self, id: TaskId) -> bool {
            self.record(format!("delete {id}"));
            self.deletes.lock().unwrap().pop_front().unwrap_or(false)
        }
    }

    fn task(id: i64, title: &str, completed: bool) -> Task {
        Task {
            id: TaskId::new(id),
            title: title.to_string(),
            description: String::new(),
            completed,
            priority: Priority::Medium,
            due_date: None,
            categories: Categories::default(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[fixture]
    fn loaded_tasks() -> Vec<Task> {
        vec![task(1, "Walk dog", false), task(2, "Pay bills", true)]
    }

    async fn loaded_board(gateway: ScriptedGateway, tasks: Vec<Task>) -> TaskBoard<ScriptedGateway> {
        let mut board = TaskBoard::new(gateway.with_list(tasks));
        board.load().await;
        board.take_notices();
        board
    }

    // =========================================================================
    // load
    // =========================================================================

    #[rstest]
    #[tokio::test]
    async fn load_replaces_tasks(loaded_tasks: Vec<Task>) {
        let board = loaded_board(ScriptedGateway::default(), loaded_tasks.clone()).await;

        assert_eq!(board.tasks(), loaded_tasks.as_slice());
        assert!(!board.is_loading());
        assert_eq!(board.task_count(), TaskCount { total: 2, completed: 1 });
    }

    // =========================================================================
    // create / update
    // =========================================================================

    #[rstest]
    #[tokio::test]
    async fn create_appends_and_closes_form(loaded_tasks: Vec<Task>) {
        let created = task(3, "Call plumber", false);
        let mut board =
            loaded_board(ScriptedGateway::default().with_task(Some(created.clone())), loaded_tasks).await;
        board.open_create_form();
        let mut form = board.current_form(today()).unwrap();
        form.title = "Call plumber".to_string();

        assert!(board.create(&form).await);

        assert_eq!(board.tasks().last(), Some(&created));
        assert_eq!(board.form_state(), FormState::Closed);
        assert_eq!(board.take_notices()[0].kind, NoticeKind::Success);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_create_leaves_tasks_unchanged(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default().with_task(None), loaded_tasks.clone()).await;
        board.open_create_form();
        let form = TaskForm {
            title: "Call plumber".to_string(),
            ..TaskForm::new(today())
        };

        assert!(!board.create(&form).await);

        assert_eq!(board.tasks(), loaded_tasks.as_slice());
        assert_eq!(board.form_state(), FormState::Creating);
        assert_eq!(
            board.take_notices(),
            [Notice::error("Failed to add task")]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_title_never_reaches_gateway(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default(), loaded_tasks).await;
        let form = TaskForm {
            title: "Call plumber!".to_string(),
            ..TaskForm::new(today())
        };

        assert!(!board.create(&form).await);

        assert_eq!(board.gateway().calls(), ["list"]);
        assert_eq!(
            board.take_notices(),
            [Notice::error("Title should not contain special characters.")]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_in_place(loaded_tasks: Vec<Task>) {
        let renamed = task(1, "Walk the dog", false);
        let mut board =
            loaded_board(ScriptedGateway::default().with_task(Some(renamed.clone())), loaded_tasks).await;
        board.open_edit_form(TaskId::new(1));
        let mut form = board.current_form(today()).unwrap();
        form.title = "Walk the dog".to_string();

        assert!(board.update(TaskId::new(1), &form).await);

        assert_eq!(board.tasks()[0], renamed);
        assert_eq!(board.tasks().len(), 2);
        assert_eq!(board.form_state(), FormState::Closed);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_update_leaves_tasks_unchanged(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default().with_task(None), loaded_tasks.clone()).await;
        let form = TaskForm::for_task(&loaded_tasks[0]);

        assert!(!board.update(TaskId::new(1), &form).await);

        assert_eq!(board.tasks(), loaded_tasks.as_slice());
    }

    // =========================================================================
    // toggle
    // =========================================================================

    #[rstest]
    #[tokio::test]
    async fn toggle_adopts_confirmed_row(loaded_tasks: Vec<Task>) {
        let confirmed = task(1, "Walk dog", true);
        let mut board =
            loaded_board(ScriptedGateway::default().with_task(Some(confirmed.clone())), loaded_tasks).await;

        assert!(board.toggle(TaskId::new(1)).await);

        assert_eq!(board.tasks()[0], confirmed);
        assert_eq!(board.gateway().calls(), ["list", "toggle 1 true"]);
        assert_eq!(board.take_notices(), [Notice::success("Task completed!")]);
    }

    #[rstest]
    #[case(1, false)]
    #[case(2, true)]
    #[tokio::test]
    async fn failed_toggle_restores_prior_value(
        loaded_tasks: Vec<Task>,
        #[case] id: i64,
        #[case] prior: bool,
    ) {
        let mut board = loaded_board(ScriptedGateway::default().with_task(None), loaded_tasks.clone()).await;

        assert!(!board.toggle(TaskId::new(id)).await);

        let task = board.tasks().iter().find(|task| task.id == TaskId::new(id)).unwrap();
        assert_eq!(task.completed, prior);
        assert_eq!(board.tasks(), loaded_tasks.as_slice());
        assert_eq!(
            board.take_notices(),
            [Notice::error("Failed to update task status")]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn toggle_unknown_task_does_nothing(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default(), loaded_tasks).await;

        assert!(!board.toggle(TaskId::new(99)).await);

        assert_eq!(board.gateway().calls(), ["list"]);
    }

    // =========================================================================
    // delete
    // =========================================================================

    #[rstest]
    #[tokio::test]
    async fn delete_removes_on_success(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default().with_delete(true), loaded_tasks).await;

        assert!(board.delete(TaskId::new(1)).await);

        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.tasks()[0].id, TaskId::new(2));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_delete_restores_full_list(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default().with_delete(false), loaded_tasks.clone()).await;

        assert!(!board.delete(TaskId::new(2)).await);

        assert_eq!(board.tasks(), loaded_tasks.as_slice());
        assert_eq!(board.take_notices(), [Notice::error("Failed to delete task")]);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_edited_task_closes_form(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default().with_delete(true), loaded_tasks).await;
        board.open_edit_form(TaskId::new(1));

        board.delete(TaskId::new(1)).await;

        assert_eq!(board.form_state(), FormState::Closed);
    }

    // =========================================================================
    // filters
    // =========================================================================

    #[rstest]
    #[tokio::test]
    async fn filters_drive_visible_tasks(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default(), loaded_tasks).await;

        board.set_status(StatusFilter::Completed);
        let completed: Vec<TaskId> = board.visible_tasks().iter().map(|task| task.id).collect();
        board.set_status(StatusFilter::All);
        board.set_search("WALK");
        let searched: Vec<TaskId> = board.visible_tasks().iter().map(|task| task.id).collect();

        assert_eq!(completed, [TaskId::new(2)]);
        assert_eq!(searched, [TaskId::new(1)]);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_category_clears_filter(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default(), loaded_tasks).await;

        board.set_category(Some(String::new()));

        assert_eq!(board.filters().category, None);
        assert_eq!(board.visible_tasks().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn edit_form_for_unknown_task_stays_closed(loaded_tasks: Vec<Task>) {
        let mut board = loaded_board(ScriptedGateway::default(), loaded_tasks).await;

        board.open_edit_form(TaskId::new(42));

        assert_eq!(board.form_state(), FormState::Closed);
        assert!(board.current_form(today()).is_none());
    }
}
