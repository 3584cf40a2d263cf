//! Reconciliation progress reporting.

/// Receives updates while a pass walks the identifier groups.
pub trait ReconcileProgress {
    /// Called after the survivor of group `current` of `total` is chosen.
    fn on_post(&self, current: usize, total: usize, title: &str);

    /// Called when a phase starts (e.g., "Assigning slugs").
    fn on_phase(&self, message: &str);

    /// Called once with the pass summary line.
    fn on_complete(&self, message: &str);
}

/// Discards all updates.
pub struct SilentProgress;

impl ReconcileProgress for SilentProgress {
    fn on_post(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Logs through the `log` crate.
///
/// A feed holds a few hundred posts, so every post is traced and roughly
/// every tenth of the pass is logged at debug level.
pub struct LogProgress;

/// Number of checkpoints `LogProgress` reports over a pass.
const CHECKPOINTS: usize = 10;

fn is_checkpoint(current: usize, total: usize) -> bool {
    let step = total.div_ceil(CHECKPOINTS).max(1);
    current.is_multiple_of(step) || current == total
}

impl ReconcileProgress for LogProgress {
    fn on_post(&self, current: usize, total: usize, title: &str) {
        log::trace!("  [{}/{}] {}", current, total, title);
        if is_checkpoint(current, total) {
            log::debug!(
                "  {}/{} groups resolved ({}%)",
                current,
                total,
                current * 100 / total.max(1)
            );
        }
    }

    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
