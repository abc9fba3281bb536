use calacirya::core::context::*;
use calacirya::core::display::*;
use calacirya::core::error::*;
use calacirya::core::options::*;
use calacirya::core::render::*;
use calacirya::core::scene::Scene;
use calacirya::displays::HeadlessDisplay;
use calacirya::renderers::PreviewRenderer;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn context(width: usize, height: usize, block_size: usize) -> Arc<RenderContext> {
    let opt = RenderOptions {
        width,
        height,
        block_size,
        samples: 2,
        ..RenderOptions::default()
    };
    Arc::new(RenderContext::new(&opt, Scene::demo()).unwrap())
}

/// Interactive display that asks to quit on its first poll.
struct QuitDisplay {
    polls: usize,
}

impl Display for QuitDisplay {
    fn start(&mut self, _title: &str, _resolution: &[usize; 2]) -> Result<(), CalaError> {
        Ok(())
    }
    fn present(&mut self, _frame: &Frame) -> Result<(), CalaError> {
        Ok(())
    }
    fn end(&mut self) -> Result<(), CalaError> {
        Ok(())
    }
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        vec![InputEvent::KeyDown {
            key: calacirya::core::base::KEY_ESCAPE,
            x: 0,
            y: 0,
        }]
    }
    fn is_interactive(&self) -> bool {
        true
    }
}

#[test]
fn headless_render_shows_every_block() {
    let ctx = context(64, 48, 16);
    let mut dl = DisplayLoop::new(&ctx);
    let mut renderer = PreviewRenderer::new();
    renderer.set_threads(Some(3));
    renderer.set_completion_callback(dl.synchronizer().into_callback());

    let mut display = HeadlessDisplay::new();
    display.start("test", &ctx.resolution()).unwrap();
    let job = renderer.start_render(&ctx).unwrap();
    let control = dl.run(&mut display, &job).unwrap();
    assert_eq!(control, Control::Continue);
    assert!(job.is_done());
    assert_eq!(job.blocks_done(), ctx.num_blocks());
    job.wait().unwrap();

    assert_eq!(dl.blocks_uploaded(), ctx.num_blocks());
    assert!(dl.queue().is_empty());
    assert_eq!(dl.texture().texels_written(), 64 * 48);
    for y in 0..48 {
        for x in 0..64 {
            assert_eq!(dl.texture().texel(x, y), ctx.framebuf.get_pixel(x, y));
        }
    }
    assert!(display.presents() >= 1);
    assert_eq!(display.frame(), dl.frame());
    display.end().unwrap();
}

#[test]
fn headless_render_writes_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let ctx = context(32, 32, 8);
    let mut dl = DisplayLoop::new(&ctx);
    let mut renderer = PreviewRenderer::new();
    renderer.set_completion_callback(dl.synchronizer().into_callback());

    let mut display = HeadlessDisplay::with_output(&path);
    display.start("test", &ctx.resolution()).unwrap();
    let job = renderer.start_render(&ctx).unwrap();
    dl.run(&mut display, &job).unwrap();
    job.wait().unwrap();
    display.end().unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (32, 32));
    // sphere in the middle, background in the corner
    assert_ne!(img.get_pixel(16, 16), img.get_pixel(0, 0));
}

fn wait_for_blocks(dl: &DisplayLoop, n: usize) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while dl.queue().len() < n {
        assert!(Instant::now() < deadline, "render produced no blocks");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn escape_stops_render() {
    let ctx = context(256, 256, 8);
    let mut dl = DisplayLoop::new(&ctx);
    let mut renderer = PreviewRenderer::new();
    renderer.set_threads(Some(1));
    renderer.set_completion_callback(dl.synchronizer().into_callback());

    let mut display = QuitDisplay { polls: 0 };
    let job = renderer.start_render(&ctx).unwrap();
    wait_for_blocks(&dl, 1);
    let control = dl.run(&mut display, &job).unwrap();
    assert_eq!(control, Control::Exit);
    assert_eq!(display.polls, 1);
    while !job.is_done() {
        thread::yield_now();
    }
    let done = job.blocks_done();
    let total = job.total_blocks();
    job.wait().unwrap();
    assert_eq!(total, 1024);
    assert!(done >= 1 && done < total, "{} of {} blocks", done, total);

    // blocks finished before the quit are still shown
    assert_eq!(dl.tick().unwrap(), done);
    assert_eq!(dl.blocks_uploaded(), done);
    assert!(dl.queue().is_empty());
}

#[test]
fn blocks_pushed_before_abort_are_drained() {
    let ctx = context(256, 256, 8);
    let mut dl = DisplayLoop::new(&ctx);
    let mut renderer = PreviewRenderer::new();
    renderer.set_threads(Some(1));
    renderer.set_completion_callback(dl.synchronizer().into_callback());

    let job = renderer.start_render(&ctx).unwrap();
    wait_for_blocks(&dl, 3);
    job.abort();
    while !job.is_done() {
        thread::yield_now();
    }
    let done = job.blocks_done();
    job.wait().unwrap();
    assert!(done >= 3 && done < ctx.num_blocks());
    assert_eq!(dl.queue().len(), done);

    assert_eq!(dl.tick().unwrap(), done);
    assert!(dl.queue().is_empty());
    assert_eq!(dl.texture().texels_written(), (done * 8 * 8) as u64);
    for y in 0..256 {
        for x in 0..256 {
            assert_eq!(dl.texture().texel(x, y), ctx.framebuf.get_pixel(x, y));
        }
    }
    // nothing arrives after the render has stopped
    assert_eq!(dl.tick().unwrap(), 0);
}
