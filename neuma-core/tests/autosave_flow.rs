//! End-to-end autosave flow against the real file system.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use neuma_core::autosave::{autosave_path, project_original_path, ProjectAutoSaver};
use neuma_core::config::{Config, Settings};
use neuma_core::context::SessionContext;
use neuma_core::fs::LocalFileSystem;
use neuma_core::project::{SaveError, ScoreProject, ScoreWriter};
use neuma_types::SaveMode;

/// Writes a placeholder score file; stands in for the score engine's
/// serializer.
struct FileWriter;

impl ScoreWriter for FileWriter {
    fn write(&mut self, path: &Path, _mode: SaveMode) -> Result<(), SaveError> {
        fs::write(path, b"score data")?;
        Ok(())
    }
}

struct Session {
    settings: Settings,
    ctx: SessionContext,
    autosaver: ProjectAutoSaver,
    project_path: PathBuf,
    start: Instant,
    _dir: tempfile::TempDir,
}

impl Session {
    fn open() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("etude.neum");
        fs::write(&project_path, b"score data").unwrap();

        let mut settings = Settings::new(&Config::default());
        let mut ctx = SessionContext::new();
        ctx.set_current_project(Some(ScoreProject::open(
            &project_path,
            Box::new(FileWriter),
        )));

        let start = Instant::now();
        let autosaver =
            ProjectAutoSaver::new(&mut settings, &mut ctx, Box::new(LocalFileSystem), start);

        Session {
            settings,
            ctx,
            autosaver,
            project_path,
            start,
            _dir: dir,
        }
    }

    fn tick_at(&mut self, minutes: u64) {
        let now = self.start + Duration::from_secs(minutes * 60);
        self.autosaver.process(&mut self.ctx, now);
    }

    fn shadow_path(&self) -> PathBuf {
        autosave_path(&self.project_path)
    }
}

#[test]
fn test_dirty_project_gets_a_shadow_file() {
    let mut session = Session::open();
    session.ctx.current_project_mut().unwrap().set_need_save(true);

    session.tick_at(2);

    assert!(session.shadow_path().exists());
    assert!(session
        .autosaver
        .project_has_unsaved_changes(&session.project_path));
}

#[test]
fn test_clean_project_is_never_shadowed() {
    let mut session = Session::open();

    session.tick_at(2);
    session.tick_at(4);

    assert!(!session.shadow_path().exists());
}

#[test]
fn test_explicit_save_removes_the_shadow() {
    let mut session = Session::open();
    session.ctx.current_project_mut().unwrap().set_need_save(true);
    session.tick_at(2);
    assert!(session.shadow_path().exists());

    let target = session.project_path.clone();
    session
        .ctx
        .current_project_mut()
        .unwrap()
        .save(&target, SaveMode::Save)
        .unwrap();
    session.tick_at(3);

    assert!(!session.shadow_path().exists());
    assert!(!session
        .autosaver
        .project_has_unsaved_changes(&session.project_path));
}

#[test]
fn test_disabled_autosave_writes_nothing() {
    let mut session = Session::open();
    session.ctx.current_project_mut().unwrap().set_need_save(true);
    session.settings.set_autosave_enabled(false);

    session.tick_at(2);
    session.tick_at(60);

    assert!(!session.shadow_path().exists());
}

#[test]
fn test_shadow_round_trip_recovers_the_project_path() {
    let session = Session::open();
    let shadow = session.shadow_path();

    assert_eq!(
        shadow,
        PathBuf::from(format!("{}.autosave", session.project_path.display()))
    );
    assert_eq!(project_original_path(&shadow), session.project_path);
}

#[test]
fn test_switching_projects_moves_the_need_save_watch() {
    let mut session = Session::open();
    session.ctx.current_project_mut().unwrap().set_need_save(true);
    session.tick_at(2);
    let first_shadow = session.shadow_path();
    assert!(first_shadow.exists());

    // Open a second project; its cleanliness transitions are now watched.
    let second_path = session._dir.path().join("nocturne.neum");
    fs::write(&second_path, b"score data").unwrap();
    let mut second = ScoreProject::open(&second_path, Box::new(FileWriter));
    second.set_need_save(true);
    session.ctx.set_current_project(Some(second));
    session.tick_at(3);

    session.tick_at(4);
    assert!(autosave_path(&second_path).exists());

    session
        .ctx
        .current_project_mut()
        .unwrap()
        .set_need_save(false);
    session.tick_at(5);

    assert!(!autosave_path(&second_path).exists());
    // The first project's shadow is untouched by the second's save-state.
    assert!(first_shadow.exists());
}
