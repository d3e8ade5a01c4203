//! The open score project: path, save-state flags, and the save entry point.
//!
//! Serialization is delegated to an injected [`ScoreWriter`]; the file format
//! is owned entirely by the writer. The project tracks two flags: `created`
//! (true until the first explicit save) and `need_save` (unsaved edits
//! exist), and notifies subscribers when `need_save` changes.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use neuma_types::SaveMode;

use crate::notify::Subscribers;

/// Error from a project save.
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Writer(String),
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Writer(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SaveError {}

/// Serializes a project's score to disk. Implemented by the score engine.
pub trait ScoreWriter {
    fn write(&mut self, path: &Path, mode: SaveMode) -> Result<(), SaveError>;
}

pub struct ScoreProject {
    path: PathBuf,
    created: bool,
    need_save: bool,
    need_save_subs: Subscribers<bool>,
    writer: Box<dyn ScoreWriter>,
}

impl ScoreProject {
    /// A project that has never been explicitly saved. `path` is where the
    /// first explicit save will land.
    pub fn new(path: impl Into<PathBuf>, writer: Box<dyn ScoreWriter>) -> Self {
        Self {
            path: path.into(),
            created: true,
            need_save: false,
            need_save_subs: Subscribers::new(),
            writer,
        }
    }

    /// A project loaded from an existing file.
    pub fn open(path: impl Into<PathBuf>, writer: Box<dyn ScoreWriter>) -> Self {
        Self {
            created: false,
            ..Self::new(path, writer)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until the project has been explicitly saved once.
    pub fn created(&self) -> bool {
        self.created
    }

    /// True when unsaved edits exist.
    pub fn need_save(&self) -> bool {
        self.need_save
    }

    pub fn set_need_save(&mut self, need_save: bool) {
        if need_save == self.need_save {
            return;
        }
        self.need_save = need_save;
        self.need_save_subs.notify(need_save);
    }

    /// Subscribe to `need_save` transitions.
    pub fn need_save_changed(&mut self) -> Receiver<bool> {
        self.need_save_subs.subscribe()
    }

    /// Write the project to `path`.
    ///
    /// An explicit save adopts `path` as the project path and marks the
    /// project clean; an autosave writes the snapshot and leaves the
    /// project's path and flags untouched.
    pub fn save(&mut self, path: &Path, mode: SaveMode) -> Result<(), SaveError> {
        self.writer.write(path, mode)?;

        if mode.is_explicit() {
            self.path = path.to_path_buf();
            self.created = false;
            self.set_need_save(false);
        }
        Ok(())
    }
}

impl fmt::Debug for ScoreProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreProject")
            .field("path", &self.path)
            .field("created", &self.created)
            .field("need_save", &self.need_save)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingWriter {
        written: Rc<RefCell<Vec<(PathBuf, SaveMode)>>>,
        fail: bool,
    }

    impl ScoreWriter for RecordingWriter {
        fn write(&mut self, path: &Path, mode: SaveMode) -> Result<(), SaveError> {
            if self.fail {
                return Err(SaveError::Writer("disk full".to_string()));
            }
            self.written.borrow_mut().push((path.to_path_buf(), mode));
            Ok(())
        }
    }

    fn project_with_writer(fail: bool) -> (ScoreProject, Rc<RefCell<Vec<(PathBuf, SaveMode)>>>) {
        let written = Rc::new(RefCell::new(Vec::new()));
        let writer = RecordingWriter {
            written: Rc::clone(&written),
            fail,
        };
        (
            ScoreProject::open("/scores/etude.neum", Box::new(writer)),
            written,
        )
    }

    #[test]
    fn explicit_save_clears_flags() {
        let (mut project, written) = project_with_writer(false);
        project.set_need_save(true);

        project
            .save(Path::new("/scores/etude.neum"), SaveMode::Save)
            .unwrap();

        assert!(!project.need_save());
        assert!(!project.created());
        assert_eq!(written.borrow().len(), 1);
    }

    #[test]
    fn save_as_adopts_the_new_path() {
        let (mut project, _written) = project_with_writer(false);
        project
            .save(Path::new("/scores/etude-final.neum"), SaveMode::SaveAs)
            .unwrap();
        assert_eq!(project.path(), Path::new("/scores/etude-final.neum"));
    }

    #[test]
    fn autosave_leaves_flags_and_path_alone() {
        let (mut project, written) = project_with_writer(false);
        project.set_need_save(true);

        project
            .save(Path::new("/scores/etude.neum.autosave"), SaveMode::AutoSave)
            .unwrap();

        assert!(project.need_save());
        assert_eq!(project.path(), Path::new("/scores/etude.neum"));
        assert_eq!(written.borrow()[0].1, SaveMode::AutoSave);
    }

    #[test]
    fn failed_save_keeps_flags() {
        let (mut project, _written) = project_with_writer(true);
        project.set_need_save(true);

        let result = project.save(Path::new("/scores/etude.neum"), SaveMode::Save);

        assert!(result.is_err());
        assert!(project.need_save());
    }

    #[test]
    fn need_save_notifies_on_transition_only() {
        let (mut project, _written) = project_with_writer(false);
        let rx = project.need_save_changed();

        project.set_need_save(false); // already false
        assert!(rx.try_recv().is_err());

        project.set_need_save(true);
        assert_eq!(rx.try_recv().unwrap(), true);

        project.set_need_save(true); // no transition
        assert!(rx.try_recv().is_err());

        project.set_need_save(false);
        assert_eq!(rx.try_recv().unwrap(), false);
    }

    #[test]
    fn fresh_project_starts_created() {
        let written = Rc::new(RefCell::new(Vec::new()));
        let writer = RecordingWriter {
            written,
            fail: false,
        };
        let project = ScoreProject::new("/scores/untitled.neum", Box::new(writer));
        assert!(project.created());
        assert!(!project.need_save());
    }
}
