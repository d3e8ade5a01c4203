//! Periodic project autosave.
//!
//! Saves the open project to a shadow path (`<path>.autosave`) on a
//! recurring interval, and clears that shadow as soon as the project becomes
//! clean. The saver is driven by the host event loop: call
//! [`ProjectAutoSaver::process`] once per loop iteration with the current
//! time. Everything runs synchronously on that one thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use neuma_types::SaveMode;

use crate::config::Settings;
use crate::context::SessionContext;
use crate::fs::FileSystem;

const AUTOSAVE_SUFFIX: &str = ".autosave";

/// The shadow path for a project path: the full file name plus the autosave
/// suffix, so `etude.neum` autosaves next to itself as `etude.neum.autosave`.
pub fn autosave_path(project_path: &Path) -> PathBuf {
    let mut path = project_path.as_os_str().to_os_string();
    path.push(AUTOSAVE_SUFFIX);
    PathBuf::from(path)
}

/// Recover the original project path from a shadow path by stripping the
/// trailing extension component.
///
/// This works because the suffix is extension-shaped. It is lossy on inputs
/// that are not shadow paths: a path whose own last dot-segment is not the
/// autosave suffix loses that segment instead (`etude.neum` becomes
/// `etude`).
pub fn project_original_path(shadow_path: &Path) -> PathBuf {
    shadow_path.with_extension("")
}

/// Recurring timer driven by the host loop.
///
/// Two states: idle (stopped) and armed (running). An interval change keeps
/// the current state and only adjusts the period.
#[derive(Debug)]
struct AutosaveTimer {
    interval: Duration,
    armed: bool,
    period_start: Instant,
}

impl AutosaveTimer {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            armed: false,
            period_start: now,
        }
    }

    fn start(&mut self, now: Instant) {
        self.armed = true;
        self.period_start = now;
    }

    fn stop(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// True once per elapsed interval while armed; firing starts the next
    /// period.
    fn due(&mut self, now: Instant) -> bool {
        if !self.armed || now.duration_since(self.period_start) < self.interval {
            return false;
        }
        self.period_start = now;
        true
    }
}

/// Watches the session and periodically snapshots the open project.
pub struct ProjectAutoSaver {
    timer: AutosaveTimer,
    fs: Box<dyn FileSystem>,
    enabled_rx: Receiver<bool>,
    interval_rx: Receiver<u64>,
    project_rx: Receiver<()>,
    need_save_rx: Option<Receiver<bool>>,
}

impl ProjectAutoSaver {
    /// Wire the saver up to the settings service and session context. The
    /// timer starts armed iff autosave is enabled; a project that is already
    /// open is watched immediately.
    pub fn new(
        settings: &mut Settings,
        ctx: &mut SessionContext,
        fs: Box<dyn FileSystem>,
        now: Instant,
    ) -> Self {
        let interval = Duration::from_secs(settings.autosave_interval_minutes() * 60);
        let mut timer = AutosaveTimer::new(interval, now);
        if settings.autosave_enabled() {
            timer.start(now);
        }

        let mut saver = Self {
            timer,
            fs,
            enabled_rx: settings.autosave_enabled_changed(),
            interval_rx: settings.autosave_interval_changed(),
            project_rx: ctx.current_project_changed(),
            need_save_rx: None,
        };
        saver.watch_current_project(ctx);
        saver
    }

    /// Drain pending notifications and fire the timer if due. Call once per
    /// host-loop iteration.
    pub fn process(&mut self, ctx: &mut SessionContext, now: Instant) {
        while let Ok(enabled) = self.enabled_rx.try_recv() {
            if enabled != self.timer.is_armed() {
                if enabled {
                    self.timer.start(now);
                } else {
                    self.timer.stop();
                }
            }
        }

        while let Ok(minutes) = self.interval_rx.try_recv() {
            self.timer.set_interval(Duration::from_secs(minutes * 60));
        }

        let mut project_changed = false;
        while self.project_rx.try_recv().is_ok() {
            project_changed = true;
        }
        if project_changed {
            self.watch_current_project(ctx);
        }

        let mut became_clean = false;
        if let Some(rx) = &self.need_save_rx {
            while let Ok(need_save) = rx.try_recv() {
                became_clean = !need_save;
            }
        }
        if became_clean {
            if let Some(path) = ctx.current_project().map(|p| p.path().to_path_buf()) {
                self.remove_project_unsaved_changes(&path);
            }
        }

        if self.timer.due(now) {
            self.on_try_save(ctx);
        }
    }

    /// True iff an autosave snapshot exists for the project at `project_path`.
    pub fn project_has_unsaved_changes(&self, project_path: &Path) -> bool {
        self.fs.exists(&autosave_path(project_path))
    }

    /// Delete the autosave snapshot for `project_path`, if any.
    pub fn remove_project_unsaved_changes(&self, project_path: &Path) {
        let shadow = autosave_path(project_path);
        if let Err(e) = self.fs.remove(&shadow) {
            log::warn!(target: "autosave", "could not remove {}: {}", shadow.display(), e);
        }
    }

    fn watch_current_project(&mut self, ctx: &mut SessionContext) {
        self.need_save_rx = ctx.current_project_mut().map(|p| p.need_save_changed());
    }

    fn on_try_save(&mut self, ctx: &mut SessionContext) {
        let Some(project) = ctx.current_project_mut() else {
            log::debug!(target: "autosave", "no project");
            return;
        };

        if project.created() {
            log::debug!(target: "autosave", "project just created");
            return;
        }

        if !project.need_save() {
            log::debug!(target: "autosave", "project does not need save");
            return;
        }

        let save_path = autosave_path(project.path());
        match project.save(&save_path, SaveMode::AutoSave) {
            Ok(()) => log::debug!(target: "autosave", "successfully saved project"),
            Err(e) => log::error!(target: "autosave", "failed to save project: {}", e),
        }
    }
}
