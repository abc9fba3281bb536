use super::dirty_queue::DirtyBlockQueue;
use crate::core::context::FrameBlock;
use crate::core::render::BlockDoneFn;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, Thread};
use std::time::Duration;

/// "Please redraw" hint aimed at the display thread.
///
/// Requests coalesce: any number of `request` calls between two `take`s
/// read as one. A request is never a promise of one drain pass per block;
/// the display loop drains the queue to empty on every tick instead.
#[derive(Debug)]
pub struct RedrawRequest {
    pending: AtomicBool,
    owner: Thread,
}

impl RedrawRequest {
    /// Must be created on the display thread; that thread is the one woken
    /// by `request`.
    pub fn new() -> Self {
        RedrawRequest {
            pending: AtomicBool::new(false),
            owner: thread::current(),
        }
    }

    pub fn request(&self) {
        self.pending.store(true, Ordering::Release);
        self.owner.unpark();
    }

    pub fn is_pending(&self) -> bool {
        return self.pending.load(Ordering::Acquire);
    }

    pub fn take(&self) -> bool {
        return self.pending.swap(false, Ordering::AcqRel);
    }

    /// Parks the display thread until a request arrives or `timeout`
    /// elapses, then consumes the request.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        debug_assert_eq!(thread::current().id(), self.owner.id());
        if self.take() {
            return true;
        }
        thread::park_timeout(timeout);
        return self.take();
    }
}

impl Default for RedrawRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Render-completion side of the display pipeline.
///
/// Runs on render worker threads. It holds only the queue and the redraw
/// hint; display resources (`Texture`, `DisplayLoop`) are `!Send` and cannot
/// end up inside it.
#[derive(Debug, Clone)]
pub struct DisplaySync {
    queue: Arc<DirtyBlockQueue>,
    redraw: Arc<RedrawRequest>,
}

impl DisplaySync {
    pub fn new(queue: &Arc<DirtyBlockQueue>, redraw: &Arc<RedrawRequest>) -> Self {
        DisplaySync {
            queue: queue.clone(),
            redraw: redraw.clone(),
        }
    }

    pub fn block_done(&self, blk: FrameBlock) {
        self.queue.push(blk);
        self.redraw.request();
    }

    pub fn queue(&self) -> &Arc<DirtyBlockQueue> {
        return &self.queue;
    }

    pub fn into_callback(self) -> BlockDoneFn {
        return Arc::new(move |blk: FrameBlock| self.block_done(blk));
    }
}
