use super::dirty_queue::DirtyBlockQueue;
use super::display::*;
use super::input::InputState;
use super::synchronizer::{DisplaySync, RedrawRequest};
use super::texture::Texture;
use crate::core::base::*;
use crate::core::context::*;
use crate::core::error::*;
use crate::core::render::RenderJob;

use log::*;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on how long the loop sleeps waiting for a redraw request.
pub const REDRAW_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// `c ^ (1 / gamma)` with the gamma floor applied.
#[inline]
pub fn composite_value(c: f32, gamma: f32) -> f32 {
    let gamma = f32::max(gamma, MIN_GAMMA);
    return gamma_correct(c, 1.0 / gamma);
}

/// The display-thread half of the pipeline: drains completed blocks into
/// the texture, composites through the gamma pass and presents.
pub struct DisplayLoop {
    ctx: Arc<RenderContext>,
    queue: Arc<DirtyBlockQueue>,
    redraw: Arc<RedrawRequest>,
    texture: Texture,
    frame: Frame,
    viewport: [usize; 2],
    gamma: f32,
    input: InputState,
    blocks_uploaded: usize,
    needs_redraw: bool,
    quiet: bool,
}

impl DisplayLoop {
    /// Must be called on the display thread.
    pub fn new(ctx: &Arc<RenderContext>) -> Self {
        let [width, height] = ctx.resolution();
        DisplayLoop {
            ctx: ctx.clone(),
            queue: Arc::new(DirtyBlockQueue::new()),
            redraw: Arc::new(RedrawRequest::new()),
            texture: Texture::from_pixmap(&ctx.framebuf),
            frame: Frame::new(width, height),
            viewport: [width, height],
            gamma: DEFAULT_GAMMA,
            input: InputState::new(),
            blocks_uploaded: 0,
            needs_redraw: true,
            quiet: false,
        }
    }

    /// Completion-callback side bound to this loop's queue.
    pub fn synchronizer(&self) -> DisplaySync {
        return DisplaySync::new(&self.queue, &self.redraw);
    }

    pub fn queue(&self) -> &Arc<DirtyBlockQueue> {
        return &self.queue;
    }

    pub fn texture(&self) -> &Texture {
        return &self.texture;
    }

    pub fn frame(&self) -> &Frame {
        return &self.frame;
    }

    pub fn gamma(&self) -> f32 {
        return self.gamma;
    }

    pub fn set_gamma(&mut self, gamma: f32) {
        self.gamma = f32::max(gamma, MIN_GAMMA);
        self.needs_redraw = true;
    }

    /// Stops gamma changes from being echoed on stdout.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn is_quiet(&self) -> bool {
        return self.quiet;
    }

    pub fn viewport(&self) -> [usize; 2] {
        return self.viewport;
    }

    pub fn blocks_uploaded(&self) -> usize {
        return self.blocks_uploaded;
    }

    /// Copies one block from the frame buffer into the texture, one
    /// scanline at a time.
    fn upload_block(&mut self, blk: &FrameBlock) -> Result<(), CalaError> {
        let texture = &mut self.texture;
        self.ctx.framebuf.read_block(blk, |row, rgb| {
            texture.sub_image(blk.x, blk.y + row, blk.width, 1, rgb)
        })?;
        self.blocks_uploaded += 1;
        return Ok(());
    }

    /// Drains the dirty-block queue to empty. The lock is only held inside
    /// `drain_one`, never across the copy.
    pub fn update_texture(&mut self) -> Result<usize, CalaError> {
        let mut n = 0;
        while let Some(blk) = self.queue.drain_one() {
            self.upload_block(&blk)?;
            n += 1;
        }
        return Ok(n);
    }

    /// Full-screen pass: nearest-sample the texture over the viewport and
    /// apply the gamma curve.
    pub fn composite(&mut self) {
        let [vw, vh] = self.viewport;
        let tw = self.texture.width();
        let th = self.texture.height();
        self.frame.resize(vw, vh);
        let gamma = f32::max(self.gamma, MIN_GAMMA);
        let inv_gamma = 1.0 / gamma;
        for oy in 0..vh {
            let ty = oy * th / vh;
            for ox in 0..vw {
                let tx = ox * tw / vw;
                let c = self.texture.texel(tx, ty);
                self.frame.pixels[oy * vw + ox] = pack_rgb(
                    to_byte(gamma_correct(c[0], inv_gamma)),
                    to_byte(gamma_correct(c[1], inv_gamma)),
                    to_byte(gamma_correct(c[2], inv_gamma)),
                );
            }
        }
    }

    /// One redraw: drain, then exactly one composite pass. Returns the
    /// number of blocks uploaded.
    pub fn tick(&mut self) -> Result<usize, CalaError> {
        let n = self.update_texture()?;
        self.composite();
        self.needs_redraw = false;
        if n > 0 {
            trace!("uploaded {} block(s), {} total", n, self.blocks_uploaded);
        }
        return Ok(n);
    }

    /// The host's redraw callback.
    pub fn redisplay(&mut self, display: &mut dyn Display) -> Result<usize, CalaError> {
        let n = self.tick()?;
        display.present(&self.frame)?;
        return Ok(n);
    }

    /// Viewport change; the frame buffer keeps its size.
    pub fn reshape(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        debug!("viewport {}x{}", width, height);
        self.viewport = [width, height];
        self.needs_redraw = true;
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Control {
        match *event {
            InputEvent::KeyDown { key, x, y } => {
                if key == KEY_ESCAPE {
                    return Control::Exit;
                }
                self.input.key_down(key, x, y);
            }
            InputEvent::KeyUp { key, .. } => {
                self.input.key_up(key);
            }
            InputEvent::Motion { x, y } => {
                if let Some(dx) = self.input.motion(x, y) {
                    if self.input.is_pressed(b'g') || self.input.is_pressed(b'G') {
                        let width = self.ctx.opt.width as f32;
                        self.set_gamma(self.gamma + 4.0 * dx as f32 / width);
                        if self.quiet {
                            info!("gamma: {:.6}", self.gamma);
                        } else {
                            println!("gamma: {:.6}", self.gamma);
                        }
                        self.redraw.request();
                    }
                }
            }
            InputEvent::Resize { width, height } => {
                self.reshape(width, height);
            }
            InputEvent::Close => {
                return Control::Exit;
            }
        }
        return Control::Continue;
    }

    /// Runs until the render has finished and everything is shown (for
    /// non-interactive displays) or until the user quits.
    ///
    /// Redraw requests are only hints: every iteration re-checks the queue,
    /// so a request coalesced away by the host delays an update by at most
    /// one poll interval.
    pub fn run(&mut self, display: &mut dyn Display, job: &RenderJob) -> Result<Control, CalaError> {
        let mut finished = false;
        loop {
            for event in display.poll_events() {
                if self.handle_event(&event) == Control::Exit {
                    job.abort();
                    return Ok(Control::Exit);
                }
            }
            if !display.is_open() {
                job.abort();
                return Ok(Control::Exit);
            }

            let requested = self.redraw.take();
            if requested || self.needs_redraw || !self.queue.is_empty() {
                self.redisplay(display)?;
            } else {
                display.idle()?;
            }

            if !finished && job.is_done() {
                // blocks pushed before the job finished are all queued now
                self.redisplay(display)?;
                finished = true;
                info!(
                    "render finished: {}/{} blocks shown",
                    self.blocks_uploaded,
                    self.ctx.num_blocks()
                );
            }
            if finished && !display.is_interactive() {
                return Ok(Control::Continue);
            }

            if self.redraw.wait_timeout(REDRAW_POLL_INTERVAL) {
                self.needs_redraw = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::RenderOptions;
    use crate::core::scene::Scene;

    fn context(width: usize, height: usize, block_size: usize) -> Arc<RenderContext> {
        let opt = RenderOptions {
            width,
            height,
            block_size,
            ..RenderOptions::default()
        };
        Arc::new(RenderContext::new(&opt, Scene::new()).unwrap())
    }

    #[test]
    fn test_composite_value() {
        assert!((composite_value(0.25, 0.5) - 0.0625).abs() < 1e-6);
        assert!((composite_value(0.5, 1.0) - 0.5).abs() < 1e-6);
        let v = composite_value(0.5, 0.0);
        assert!(v.is_finite());
        let v = composite_value(0.5, -3.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_drain_uploads_only_dirty_blocks() {
        let ctx = context(8, 8, 4);
        let mut dl = DisplayLoop::new(&ctx);
        let blk = ctx.blocks()[3];
        ctx.framebuf.store_block(&blk, &vec![1.0; 48]).unwrap();
        dl.synchronizer().block_done(blk);
        assert_eq!(dl.tick().unwrap(), 1);
        assert_eq!(dl.texture().texel(4, 4), [1.0, 1.0, 1.0]);
        assert_eq!(dl.texture().texel(0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(dl.frame().get(5, 5), 0xffffff);
        assert_eq!(dl.frame().get(0, 0), 0);
        assert_eq!(dl.tick().unwrap(), 0);
    }

    #[test]
    fn test_gamma_drag() {
        let ctx = context(100, 10, 10);
        let mut dl = DisplayLoop::new(&ctx);
        assert_eq!(dl.gamma(), DEFAULT_GAMMA);
        // motion without a held key does nothing
        dl.handle_event(&InputEvent::Motion { x: 50, y: 0 });
        assert_eq!(dl.gamma(), DEFAULT_GAMMA);

        dl.handle_event(&InputEvent::KeyDown { key: b'g', x: 0, y: 0 });
        dl.handle_event(&InputEvent::Motion { x: 10, y: 0 });
        assert!((dl.gamma() - (DEFAULT_GAMMA + 0.4)).abs() < 1e-5);

        dl.handle_event(&InputEvent::Motion { x: -1000, y: 0 });
        assert_eq!(dl.gamma(), MIN_GAMMA);

        dl.handle_event(&InputEvent::KeyUp { key: b'g', x: 0, y: 0 });
        dl.handle_event(&InputEvent::Motion { x: 500, y: 0 });
        assert_eq!(dl.gamma(), MIN_GAMMA);
    }

    #[test]
    fn test_gamma_drag_when_quiet() {
        let ctx = context(100, 10, 10);
        let mut dl = DisplayLoop::new(&ctx);
        assert!(!dl.is_quiet());
        dl.set_quiet(true);
        dl.handle_event(&InputEvent::KeyDown { key: b'G', x: 0, y: 0 });
        dl.handle_event(&InputEvent::Motion { x: -25, y: 0 });
        assert!((dl.gamma() - (DEFAULT_GAMMA - 1.0)).abs() < 1e-5);
        assert!(dl.is_quiet());
    }

    #[test]
    fn test_other_keys_do_not_adjust_gamma() {
        let ctx = context(100, 10, 10);
        let mut dl = DisplayLoop::new(&ctx);
        dl.handle_event(&InputEvent::KeyDown { key: b'h', x: 0, y: 0 });
        dl.handle_event(&InputEvent::Motion { x: 30, y: 0 });
        assert_eq!(dl.gamma(), DEFAULT_GAMMA);
        dl.handle_event(&InputEvent::KeyDown { key: b'G', x: 30, y: 0 });
        dl.handle_event(&InputEvent::Motion { x: 55, y: 0 });
        assert!((dl.gamma() - (DEFAULT_GAMMA + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_escape_and_close() {
        let ctx = context(10, 10, 10);
        let mut dl = DisplayLoop::new(&ctx);
        let esc = InputEvent::KeyDown {
            key: KEY_ESCAPE,
            x: 0,
            y: 0,
        };
        assert_eq!(dl.handle_event(&esc), Control::Exit);
        assert_eq!(dl.handle_event(&InputEvent::Close), Control::Exit);
        let a = InputEvent::KeyDown { key: b'a', x: 0, y: 0 };
        assert_eq!(dl.handle_event(&a), Control::Continue);
    }

    #[test]
    fn test_reshape_scales_composite() {
        let ctx = context(4, 4, 2);
        let mut dl = DisplayLoop::new(&ctx);
        let blk = ctx.blocks()[0];
        ctx.framebuf.store_block(&blk, &vec![1.0; 12]).unwrap();
        dl.synchronizer().block_done(blk);
        dl.handle_event(&InputEvent::Resize {
            width: 8,
            height: 8,
        });
        dl.tick().unwrap();
        assert_eq!(dl.frame().width, 8);
        assert_eq!(dl.frame().pixels.len(), 64);
        assert_eq!(dl.frame().get(3, 3), 0xffffff);
        assert_eq!(dl.frame().get(4, 4), 0);
        // the frame buffer keeps its size
        assert_eq!(ctx.resolution(), [4, 4]);
    }
}
