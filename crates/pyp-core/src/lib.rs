//! Present Year Practice Core Library
//!
//! This crate provides the core functionality for Present Year Practice,
//! a 12-month guided self-reflection program: onboarding, monthly modules,
//! journaling, service projects, a legacy vault and group meetings.
//!
//! # Architecture
//!
//! - **Store**: the single authority over one persisted JSON document
//!   (`AppState`), with Load / Save / Update (shallow merge)
//! - **Catalog**: static module curriculum and quotes
//!
//! Every feature reads the document from the store and writes back only the
//! top-level keys it owns.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! store.capture_gratitude("Morning light")?;
//! store.toggle_week(3, 3)?;
//!
//! let state = store.load();
//! println!("{}% complete", state.overall_progress());
//! ```
//!
//! # Modules
//!
//! - `store`: Load / Save / Update over the state document (main entry point)
//! - `models`: The `AppState` document and its parts
//! - `storage`: Persistence backends
//! - `practice`: User actions built on `Store::update`
//! - `catalog`: Monthly modules and quotes
//! - `calendar`: iCalendar export
//! - `export`: Text and PDF export
//! - `meeting`: Agendas, countdown timer, talking queue
//! - `config`: Application configuration

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod export;
pub mod meeting;
pub mod models;
pub mod practice;
pub mod storage;
pub mod store;

pub use calendar::CalendarEvent;
pub use catalog::{Module, Quote};
pub use config::Config;
pub use models::{
    AppState, JournalEntry, LegacyItem, LegacyKind, ModuleProgress, PracticePath, Preferences,
    ServiceProject, ServiceTask, Streaks,
};
pub use practice::{ForgivenessLetter, PracticeError};
pub use storage::{FileBackend, MemoryBackend, StateBackend, StorageError};
pub use store::{StatePatch, Store};
