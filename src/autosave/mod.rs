//! # Autosave
//!
//! Editor-session state for one diary entry: the in-memory draft, a debounced
//! background save, and the `saved` / `saving` / `unsaved` projection shown to
//! the user.
//!
//! The session talks to the server only through a [`DiaryTransport`] and to
//! the host shell only through a [`Navigator`]. Dropping the controller (or
//! calling [`AutosaveController::close`]) cancels any pending save.
//!
//! [`DiaryTransport`]: crate::client::DiaryTransport

pub mod controller;
pub mod debounce;
pub mod draft;
pub mod status;


pub use controller::{AutosaveController, Navigator, AUTOSAVE_DELAY};
pub use debounce::Debouncer;
pub use draft::{date_in_target_zone, today_in_target_zone, DiaryId, Draft, Edit};
pub use status::SaveStatus;
