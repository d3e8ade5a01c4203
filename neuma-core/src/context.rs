//! Session context: what is currently open.
//!
//! One `SessionContext` exists per editor session, created at startup and
//! passed by reference to the components that need it. It owns the open
//! project, the open master notation, and the id of the notation the user is
//! currently viewing, and it notifies subscribers when either the current
//! notation or the current project changes.

use std::sync::mpsc::Receiver;

use neuma_types::NotationId;

use crate::notation::{MasterNotation, Notation};
use crate::notify::Subscribers;
use crate::project::ScoreProject;

#[derive(Default)]
pub struct SessionContext {
    master: Option<MasterNotation>,
    current: Option<NotationId>,
    project: Option<ScoreProject>,
    notation_subs: Subscribers<()>,
    project_subs: Subscribers<()>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a newly opened master notation and make it current.
    /// Passing `None` closes the notation.
    pub fn set_master_notation(&mut self, master: Option<MasterNotation>) {
        self.current = master.as_ref().map(|m| m.notation().id());
        self.master = master;
        self.notation_subs.notify(());
    }

    pub fn master_notation(&self) -> Option<&MasterNotation> {
        self.master.as_ref()
    }

    pub fn master_notation_mut(&mut self) -> Option<&mut MasterNotation> {
        self.master.as_mut()
    }

    /// Switch the active view to `id` (the master notation or one of its
    /// excerpts). No-op if the view is already current.
    pub fn set_current_notation(&mut self, id: NotationId) {
        if self.current == Some(id) {
            return;
        }
        if self.master.as_ref().and_then(|m| m.find(id)).is_none() {
            log::warn!(target: "context", "set_current_notation: unknown notation {}", id);
            return;
        }
        self.current = Some(id);
        self.notation_subs.notify(());
    }

    /// The notation the user is currently viewing.
    pub fn current_notation(&self) -> Option<&Notation> {
        let id = self.current?;
        self.master.as_ref()?.find(id)
    }

    pub fn current_notation_mut(&mut self) -> Option<&mut Notation> {
        let id = self.current?;
        self.master.as_mut()?.find_mut(id)
    }

    /// Subscribe to current-notation changes.
    pub fn current_notation_changed(&mut self) -> Receiver<()> {
        self.notation_subs.subscribe()
    }

    pub fn set_current_project(&mut self, project: Option<ScoreProject>) {
        self.project = project;
        self.project_subs.notify(());
    }

    pub fn current_project(&self) -> Option<&ScoreProject> {
        self.project.as_ref()
    }

    pub fn current_project_mut(&mut self) -> Option<&mut ScoreProject> {
        self.project.as_mut()
    }

    /// Subscribe to current-project changes.
    pub fn current_project_changed(&mut self) -> Receiver<()> {
        self.project_subs.subscribe()
    }
}
