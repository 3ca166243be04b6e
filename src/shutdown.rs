// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Deferred process exit.
///
/// Gives outstanding output a moment to reach the host before the process
/// goes away.  The timer task captures nothing from the session, so it still
/// fires if the session is dropped first.  Dropping the `ExitTimer` detaches
/// the task; only [`ExitTimer::cancel`] stops it.
pub struct ExitTimer {
    handle: JoinHandle<()>,
}

impl ExitTimer {
    /// Exit the process with status 0 after `grace`.
    pub fn schedule(grace: Duration) -> Self {
        Self::schedule_with(grace, || std::process::exit(0))
    }

    /// Run `on_expiry` after `grace`.
    pub fn schedule_with<F>(grace: Duration, on_expiry: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        debug!(grace_ms = grace.as_millis() as u64, "exit scheduled");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            info!("exiting");
            on_expiry();
        });
        Self { handle }
    }

    // The binary always lets the timer run out.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cancel(self) {
        debug!("scheduled exit cancelled");
        self.handle.abort();
    }

    /// Block until the timer has fired (or was aborted).
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
