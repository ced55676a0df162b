//! The in-memory store and its snapshot persistence.
//!
//! `Tutorbook` owns the whole `AppState`. Every mutation runs against a copy,
//! the copy is handed to the `Storage` in full, and only then does it replace
//! the current state. A failed write leaves the in-memory state untouched.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::error::{TutorError, TutorResult};
use crate::lesson::{Lesson, LessonPatch};
use crate::state::{AppState, Theme};
use crate::student::{Student, StudentPatch};

/// File name of the snapshot inside the data directory.
pub const SNAPSHOT_FILE: &str = "tutorbook.json";

/// Where snapshots are loaded from and written to.
pub trait Storage {
    fn load(&self) -> TutorResult<AppState>;

    /// Called with the complete next state after every mutation.
    fn save(&self, state: &AppState) -> TutorResult<()>;
}

/// Pretty-printed JSON snapshot on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    /// Storage for the snapshot file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SNAPSHOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> TutorResult<AppState> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no snapshot yet, starting empty");
            return Ok(AppState::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let state: AppState = serde_json::from_str(&contents).map_err(|e| {
            TutorError::Snapshot(format!("Could not parse {}: {}", self.path.display(), e))
        })?;

        tracing::info!(
            path = %self.path.display(),
            students = state.students.len(),
            lessons = state.lessons.len(),
            "loaded snapshot"
        );

        let orphans = state.lessons.iter().filter(|l| state.student_of(l).is_none()).count();
        if orphans > 0 {
            tracing::warn!(orphans, "snapshot has lessons whose student no longer exists");
        }

        Ok(state)
    }

    fn save(&self, state: &AppState) -> TutorResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(state)
            .map_err(|e| TutorError::Snapshot(format!("Could not serialize state: {e}")))?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// Keeps the last saved snapshot in memory. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: RefCell<Option<AppState>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn with_state(state: AppState) -> Self {
        MemoryStorage {
            snapshot: RefCell::new(Some(state)),
            saves: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<AppState> {
        self.snapshot.borrow().clone()
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> TutorResult<AppState> {
        Ok(self.snapshot().unwrap_or_default())
    }

    fn save(&self, state: &AppState) -> TutorResult<()> {
        *self.snapshot.borrow_mut() = Some(state.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// The application store.
pub struct Tutorbook<S: Storage = JsonFileStorage> {
    state: AppState,
    storage: S,
}

impl Tutorbook<JsonFileStorage> {
    /// Open the snapshot kept in `dir`.
    pub fn open_dir(dir: &Path) -> TutorResult<Self> {
        Self::open(JsonFileStorage::in_dir(dir))
    }
}

impl<S: Storage> Tutorbook<S> {
    /// Load the snapshot once. Later changes are written back on every mutation.
    pub fn open(storage: S) -> TutorResult<Self> {
        let state = storage.load()?;
        Ok(Tutorbook { state, storage })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply `mutate` to a copy of the state, persist it, then swap it in.
    fn commit<T>(&mut self, op: &str, mutate: impl FnOnce(&mut AppState) -> T) -> TutorResult<T> {
        let mut next = self.state.clone();
        let outcome = mutate(&mut next);

        self.storage.save(&next)?;
        self.state = next;

        tracing::debug!(
            op,
            students = self.state.students.len(),
            lessons = self.state.lessons.len(),
            "state changed"
        );
        Ok(outcome)
    }

    pub fn add_student(&mut self, student: Student) -> TutorResult<()> {
        self.commit("add_student", |state| state.add_student(student))
    }

    pub fn update_student(&mut self, id: &str, patch: &StudentPatch) -> TutorResult<bool> {
        self.commit("update_student", |state| state.update_student(id, patch))
    }

    /// Delete a student and all of its lessons in one step.
    /// Returns how many lessons went with it.
    pub fn delete_student(&mut self, id: &str) -> TutorResult<usize> {
        self.commit("delete_student", |state| state.delete_student(id))
    }

    pub fn add_lesson(&mut self, lesson: Lesson) -> TutorResult<()> {
        self.add_lessons(vec![lesson])
    }

    /// Add a batch (e.g. a weekly series) as one mutation.
    pub fn add_lessons(&mut self, lessons: Vec<Lesson>) -> TutorResult<()> {
        self.commit("add_lessons", |state| state.add_lessons(lessons))
    }

    pub fn update_lesson(&mut self, id: &str, patch: &LessonPatch) -> TutorResult<bool> {
        self.commit("update_lesson", |state| state.update_lesson(id, patch))
    }

    pub fn delete_lesson(&mut self, id: &str) -> TutorResult<bool> {
        self.commit("delete_lesson", |state| state.delete_lesson(id))
    }

    pub fn complete_lesson(&mut self, id: &str) -> TutorResult<bool> {
        self.commit("complete_lesson", |state| state.complete_lesson(id))
    }

    pub fn cancel_lesson(&mut self, id: &str) -> TutorResult<bool> {
        self.commit("cancel_lesson", |state| state.cancel_lesson(id))
    }

    pub fn set_theme(&mut self, theme: Theme) -> TutorResult<()> {
        self.commit("set_theme", |state| state.set_theme(theme))
    }
}
