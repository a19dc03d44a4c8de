//! Scoped history cursor
//!
//! Sketches for a cut are inserted at an earlier point of the change
//! history than the cuts themselves. The marker is moved back for the
//! insertion and put back afterwards, shifted by whatever was inserted.

use tracing::debug;

use super::{DraftingHost, HostResult};

/// A saved marker position, active until `restore` is called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the history marker stays moved until the scope is restored"]
pub struct CursorScope {
    saved: usize,
    saved_len: usize,
    target: usize,
}

impl CursorScope {
    /// Save the current marker and move it to `target`
    pub fn enter(host: &mut dyn DraftingHost, target: usize) -> HostResult<Self> {
        let scope = Self {
            saved: host.timeline_position(),
            saved_len: host.timeline_len(),
            target,
        };
        host.set_timeline_position(target)?;
        debug!(
            "Timeline marker moved {} -> {}",
            scope.saved, scope.target
        );
        Ok(scope)
    }

    /// Marker position the scope will restore to, given the current history length
    pub fn restore_position(&self, current_len: usize) -> usize {
        let added = current_len.saturating_sub(self.saved_len);
        if self.target <= self.saved {
            // Entries inserted inside the scope sit before the saved marker
            self.saved + added
        } else {
            self.saved
        }
    }

    /// Put the marker back
    pub fn restore(self, host: &mut dyn DraftingHost) -> HostResult<()> {
        let position = self.restore_position(host.timeline_len());
        host.set_timeline_position(position)?;
        debug!("Timeline marker restored to {}", position);
        Ok(())
    }
}

/// Run `op` with the history marker at `position`, then restore it.
///
/// The marker is restored even when `op` fails; the error from `op` takes
/// precedence over a restore error.
pub fn with_cursor_at<R>(
    host: &mut dyn DraftingHost,
    position: usize,
    op: impl FnOnce(&mut dyn DraftingHost) -> HostResult<R>,
) -> HostResult<R> {
    let scope = CursorScope::enter(host, position)?;
    let result = op(&mut *host);
    let restored = scope.restore(host);
    let value = result?;
    restored?;
    Ok(value)
}
