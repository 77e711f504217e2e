//! Where a finished draft goes.
//!
//! # Submodules
//!
//! - [`drafts`]: Writes the Markdown and HTML renderings into the drafts directory
//! - [`email`]: Mails both renderings as one multipart message
//!
//! The orchestrator only sees the [`DraftSink`] and [`DraftNotifier`] traits.
//! A notifier without credentials is `None` and reports [`Delivery::Skipped`].

pub mod drafts;
pub mod email;

use crate::models::Draft;
use std::error::Error;
use std::path::PathBuf;

/// Outcome of a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No notifier configured.
    Skipped,
    Failed,
}

/// Persists a draft.
pub trait DraftSink {
    /// Save `draft`, returning the paths actually written.
    async fn save(&self, draft: &Draft, overwrite: bool) -> Result<Vec<PathBuf>, Box<dyn Error>>;
}

/// Tells someone a draft is ready.
pub trait DraftNotifier {
    /// Deliver `draft`. Never fails; problems are logged.
    async fn notify(&self, draft: &Draft) -> Delivery;
}

impl<T: DraftNotifier> DraftNotifier for Option<T> {
    async fn notify(&self, draft: &Draft) -> Delivery {
        match self {
            Some(notifier) => notifier.notify(draft).await,
            None => Delivery::Skipped,
        }
    }
}
