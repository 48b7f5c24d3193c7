//! Everything a run hands its results to.
//!
//! # Submodules
//!
//! - [`media`]: Locates leader pictures on disk
//! - [`publish`]: Sends the announcement and its pictures
//! - [`error_log`]: Persists run-aborting failures
//!
//! # On-disk layout
//!
//! ```text
//! img/
//! ├── Haaland.jpeg
//! └── Kane.jpeg
//!
//! logs/
//! └── 2024-3-7-error-logs-1709849100000.txt
//! ```

pub mod error_log;
pub mod media;
pub mod publish;
