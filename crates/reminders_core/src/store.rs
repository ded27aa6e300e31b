use crate::error::AppError;
use crate::model::{Task, TaskDraft};
use crate::timefmt;
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "tasks.db";
const DB_PATH_ENV_VAR: &str = "REMINDERS_DB_PATH";

/// Resolve the task database location. `REMINDERS_DB_PATH` wins, otherwise
/// the platform config directory is used.
pub fn db_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(DB_PATH_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::storage("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("reminders")
            .join(DB_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::storage("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("reminders")
            .join(DB_FILE_NAME))
    }
}

/// Durable CRUD over the single `tasks` table. Every mutating call commits
/// before returning (SQLite autocommit).
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    pub fn open_default() -> Result<Self, AppError> {
        let path = db_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| AppError::storage(err.to_string()))?;
        }
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), AppError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                due_date TEXT,
                reminder_time TEXT,
                completed INTEGER NOT NULL DEFAULT 0
            )",
            params![],
        )?;
        Ok(())
    }

    /// Insert a new task with `completed = false` and return the stored row
    /// carrying its freshly assigned id.
    pub fn create(&self, draft: &TaskDraft) -> Result<Task, AppError> {
        let draft = validate_draft(draft)?;
        self.conn.execute(
            "INSERT INTO tasks (title, description, due_date, reminder_time, completed)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![
                draft.title,
                draft.description,
                draft.due_date,
                draft.reminder_time
            ],
        )?;
        self.get(self.conn.last_insert_rowid())
    }

    /// All tasks ordered by id. The dataset is a personal task list, no
    /// pagination.
    pub fn list(&self) -> Result<Vec<Task>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, due_date, reminder_time, completed
             FROM tasks ORDER BY id",
        )?;
        let rows = stmt.query_map(params![], row_to_task)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    pub fn get(&self, id: i64) -> Result<Task, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, due_date, reminder_time, completed
             FROM tasks WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], row_to_task)?;
        match rows.next() {
            Some(row) => Ok(row?),
            None => Err(AppError::not_found(format!("no task with id {id}"))),
        }
    }

    /// Replace every mutable field, leaving `completed` untouched.
    pub fn update(&self, id: i64, draft: &TaskDraft) -> Result<Task, AppError> {
        let draft = validate_draft(draft)?;
        let changed = self.conn.execute(
            "UPDATE tasks
             SET title = ?2, description = ?3, due_date = ?4, reminder_time = ?5
             WHERE id = ?1",
            params![
                id,
                draft.title,
                draft.description,
                draft.due_date,
                draft.reminder_time
            ],
        )?;

        if changed == 0 {
            return Err(AppError::not_found(format!("no task with id {id}")));
        }
        self.get(id)
    }

    /// Remove the task permanently. Deleting an id that does not exist is an
    /// error, not a no-op.
    pub fn delete(&self, id: i64) -> Result<(), AppError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(AppError::not_found(format!("no task with id {id}")));
        }
        Ok(())
    }

    /// Set `completed = true`. Idempotent: completing an already completed
    /// task succeeds without changing anything.
    pub fn mark_completed(&self, id: i64) -> Result<Task, AppError> {
        let changed = self
            .conn
            .execute("UPDATE tasks SET completed = 1 WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(AppError::not_found(format!("no task with id {id}")));
        }
        self.get(id)
    }
}

fn row_to_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        reminder_time: row.get(4)?,
        completed: row.get(5)?,
    })
}

/// Trim free-text fields and canonicalize date-time text. Empty title and
/// malformed date-times are rejected before anything touches the table.
fn validate_draft(draft: &TaskDraft) -> Result<TaskDraft, AppError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("title is required"));
    }

    let description = draft
        .description
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(TaskDraft {
        title: title.to_string(),
        description,
        due_date: validate_datetime(draft.due_date.as_deref(), "due_date")?,
        reminder_time: validate_datetime(draft.reminder_time.as_deref(), "reminder_time")?,
    })
}

fn validate_datetime(value: Option<&str>, field: &str) -> Result<Option<String>, AppError> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let parsed = timefmt::parse(raw).map_err(|_| {
                AppError::validation(format!("{field} must be \"YYYY-MM-DD HH:MM\""))
            })?;
            Ok(Some(timefmt::format(parsed)))
        }
        None => Ok(None),
    }
}
