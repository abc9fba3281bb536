use crate::core::context::*;
use crate::core::error::*;

use log::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Called once per completed block, from a render worker thread.
pub type BlockDoneFn = Arc<dyn Fn(FrameBlock) + Send + Sync>;

/// Asynchronous block-wise renderer writing into a context's frame buffer.
pub trait Renderer: Send + Sync {
    fn set_completion_callback(&mut self, f: BlockDoneFn);

    /// Starts rendering every block of `ctx` and returns immediately.
    fn start_render(&self, ctx: &Arc<RenderContext>) -> Result<RenderJob, CalaError>;
}

/// Progress shared between a running render and whoever started it.
#[derive(Debug)]
pub struct JobState {
    total: usize,
    blocks_done: AtomicUsize,
    aborted: AtomicBool,
    done: AtomicBool,
}

impl JobState {
    pub fn new(total: usize) -> Self {
        JobState {
            total,
            blocks_done: AtomicUsize::new(0),
            aborted: AtomicBool::new(false),
            done: AtomicBool::new(false),
        }
    }

    pub fn total(&self) -> usize {
        return self.total;
    }

    pub fn blocks_done(&self) -> usize {
        return self.blocks_done.load(Ordering::Acquire);
    }

    pub fn block_finished(&self) {
        self.blocks_done.fetch_add(1, Ordering::AcqRel);
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn should_stop(&self) -> bool {
        return self.aborted.load(Ordering::Acquire);
    }

    /// Set once the workers have returned; every completion callback has
    /// run by then.
    pub fn is_done(&self) -> bool {
        return self.done.load(Ordering::Acquire);
    }

    pub fn finish(&self) {
        self.done.store(true, Ordering::Release);
    }
}

/// Marks the job done when the render thread exits, panicking or not.
pub struct DoneGuard(pub Arc<JobState>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Handle to a render in flight. Dropping it aborts the render and waits
/// for the workers.
pub struct RenderJob {
    state: Arc<JobState>,
    handle: Option<JoinHandle<Result<(), CalaError>>>,
}

impl RenderJob {
    pub fn new(state: &Arc<JobState>, handle: JoinHandle<Result<(), CalaError>>) -> Self {
        RenderJob {
            state: state.clone(),
            handle: Some(handle),
        }
    }

    pub fn is_done(&self) -> bool {
        return self.state.is_done();
    }

    pub fn blocks_done(&self) -> usize {
        return self.state.blocks_done();
    }

    pub fn total_blocks(&self) -> usize {
        return self.state.total();
    }

    /// Stops scheduling new blocks. Blocks already handed to the display
    /// are still drained.
    pub fn abort(&self) {
        self.state.abort();
    }

    pub fn wait(mut self) -> Result<(), CalaError> {
        return self.join();
    }

    fn join(&mut self) -> Result<(), CalaError> {
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(r) => {
                    return r;
                }
                Err(_) => {
                    return Err(CalaError::render("render thread panicked"));
                }
            }
        }
        return Ok(());
    }
}

impl Drop for RenderJob {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.abort();
            if let Err(e) = self.join() {
                error!("{}", e);
            }
        }
    }
}
