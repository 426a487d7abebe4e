//! Console-log capture with per-session hold-back.

use crate::browser::Browser;
use crate::errors::Result;
use driver_adapter::{LogEntry, LogKind};
use tracing::debug;

impl Browser {
    /// Console entries captured since the last call.
    ///
    /// Without a filter, everything pending is delivered. With a filter,
    /// matching entries are delivered and the rest are held back in the
    /// session buffer for a later call asking for their kind. Each entry is
    /// delivered at most once per session; the buffer belongs to this
    /// `Browser`, so parallel sessions keep independent cursors.
    pub async fn get_console_logs(&self, filter: Option<LogKind>) -> Result<Vec<LogEntry>> {
        let fresh = self.driver.console_logs().await?;

        let mut pending = self.pending_logs.lock();
        let mut combined: Vec<LogEntry> = pending.drain(..).collect();
        combined.extend(fresh);

        match filter {
            None => Ok(combined),
            Some(kind) => {
                let (matched, rest): (Vec<_>, Vec<_>) =
                    combined.into_iter().partition(|log| log.kind == kind);
                debug!(
                    kind = kind.as_str(),
                    matched = matched.len(),
                    held_back = rest.len(),
                    "filtered console logs"
                );
                *pending = rest;
                Ok(matched)
            }
        }
    }
}
