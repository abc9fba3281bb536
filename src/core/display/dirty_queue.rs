use crate::core::context::FrameBlock;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Hand-off of completed blocks from render workers to the display thread.
///
/// Many producers, one consumer. Blocks come out in completion order; the
/// queue never reorders by priority and never drops a block. `count`
/// mirrors the queue length so the consumer can test for work without
/// taking the lock.
#[derive(Debug, Default)]
pub struct DirtyBlockQueue {
    queue: Mutex<VecDeque<FrameBlock>>,
    count: AtomicUsize,
}

impl DirtyBlockQueue {
    pub fn new() -> Self {
        DirtyBlockQueue::default()
    }

    // The queue only ever holds plain values, so a panic in another holder
    // cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, VecDeque<FrameBlock>> {
        return self.queue.lock().unwrap_or_else(PoisonError::into_inner);
    }

    pub fn push(&self, blk: FrameBlock) {
        let mut queue = self.lock();
        queue.push_back(blk);
        self.count.fetch_add(1, Ordering::Release);
    }

    /// Pops the oldest block, or `None` when nothing is pending. Never blocks
    /// beyond the push/pop critical section.
    pub fn drain_one(&self) -> Option<FrameBlock> {
        let mut queue = self.lock();
        let blk = queue.pop_front()?;
        self.count.fetch_sub(1, Ordering::Release);
        return Some(blk);
    }

    /// Lock-free estimate of the pending count; exact whenever no push or
    /// pop is in flight.
    pub fn len(&self) -> usize {
        return self.count.load(Ordering::Acquire);
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}
