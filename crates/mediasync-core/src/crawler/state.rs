//! Outstanding-branch counter and the single re-crawl timer of one source.

use tokio::task::JoinHandle;

/// Crawl bookkeeping for one present source.
///
/// Invariant: `recrawl` is only ever `Some` while `active_branches == 0`
/// at the time it was armed, and at most one timer exists.
#[derive(Debug, Default)]
pub struct CrawlState {
    active_branches: usize,
    recrawl: Option<JoinHandle<()>>,
}

impl CrawlState {
    pub fn active_branches(&self) -> usize {
        self.active_branches
    }

    pub fn is_idle(&self) -> bool {
        self.active_branches == 0
    }

    pub fn recrawl_armed(&self) -> bool {
        self.recrawl.is_some()
    }

    pub fn branch_started(&mut self) {
        self.active_branches += 1;
    }

    /// Called once per page response, success or failure.
    pub fn branch_finished(&mut self) {
        debug_assert!(self.active_branches > 0, "branch finished twice");
        self.active_branches = self.active_branches.saturating_sub(1);
    }

    /// Arm the re-crawl timer using `spawn`. No-op (returns false) while a
    /// timer is armed or branches are outstanding.
    pub fn arm_recrawl(&mut self, spawn: impl FnOnce() -> JoinHandle<()>) -> bool {
        if self.recrawl.is_some() || self.active_branches != 0 {
            return false;
        }
        self.recrawl = Some(spawn());
        true
    }

    /// The timer has fired; forget its handle so a later pass can arm again.
    pub fn recrawl_fired(&mut self) {
        self.recrawl = None;
    }

    pub fn cancel_recrawl(&mut self) {
        if let Some(handle) = self.recrawl.take() {
            handle.abort();
        }
    }
}

impl Drop for CrawlState {
    fn drop(&mut self) {
        self.cancel_recrawl();
    }
}
