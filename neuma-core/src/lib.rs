//! # neuma-core
//!
//! Session plumbing for the Neuma notation editor: the model behind the
//! instrument properties panel and the periodic project autosaver,
//! independent of any UI framework.
//!
//! Everything here runs on one thread. Components communicate through the
//! [`notify`] channels and are driven by the host event loop, which calls
//! each component's `process` method once per iteration:
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use neuma_core::autosave::ProjectAutoSaver;
//! use neuma_core::config::{Config, Settings};
//! use neuma_core::context::SessionContext;
//! use neuma_core::fs::LocalFileSystem;
//!
//! let mut settings = Settings::new(&Config::load());
//! let mut ctx = SessionContext::new();
//! let mut autosaver = ProjectAutoSaver::new(
//!     &mut settings,
//!     &mut ctx,
//!     Box::new(LocalFileSystem),
//!     Instant::now(),
//! );
//!
//! loop {
//!     // ... handle input, mutate ctx / settings ...
//!     autosaver.process(&mut ctx, Instant::now());
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] — TOML configuration (embedded defaults + user override) and
//!   the live [`config::Settings`] service with change notifications
//! - [`notify`] — change-notification fan-out; the `Receiver` is the
//!   subscription handle
//! - [`context`] — [`context::SessionContext`]: the open project, master
//!   notation, and active view
//! - [`project`] — [`project::ScoreProject`]: path, save-state flags, save
//!   entry point delegating to a [`project::ScoreWriter`]
//! - [`autosave`] — [`autosave::ProjectAutoSaver`] and shadow-path
//!   derivation
//! - [`parts`], [`notation`] — the slice of the score model the panel edits
//! - [`instrument_settings`] — the panel model itself
//! - [`picker`] — the instrument chooser interface
//! - [`fs`] — the narrow file-system service

pub mod autosave;
pub mod config;
pub mod context;
pub mod fs;
pub mod instrument_settings;
pub mod notation;
pub mod notify;
pub mod parts;
pub mod picker;
pub mod project;
