//! Reconciliation and announcement engine.
//!
//! Pure functions only; all I/O happens in [`crate::scrapers`],
//! [`crate::outputs`] and [`crate::orchestrator`].
//!
//! | Step | Module |
//! |------|--------|
//! | Last name and comparison key | [`normalize`] |
//! | Cross-check against the secondary list | [`reconcile`] |
//! | Joint leaders | [`leaders`] |
//! | Announcement text | [`announce`] |

pub mod announce;
pub mod leaders;
pub mod normalize;
pub mod reconcile;
