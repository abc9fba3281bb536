use crate::core::base::*;
use crate::core::context::*;
use crate::core::error::*;
use crate::core::geometry::*;
use crate::core::misc::ProgressReporter;
use crate::core::options::*;
use crate::core::render::*;
use crate::core::rng::RNG;
use crate::core::scene::*;

use log::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Direct-lighting ray caster: Lambert + Phong surfaces, point lights with
/// hard shadows, jittered supersampling, optional thin-lens depth of field
/// and shutter-time sampling.
pub struct PreviewRenderer {
    callback: Option<BlockDoneFn>,
    nthreads: Option<usize>,
    quiet: bool,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        PreviewRenderer {
            callback: None,
            nthreads: None,
            quiet: true,
        }
    }
}

impl PreviewRenderer {
    pub fn new() -> Self {
        PreviewRenderer::default()
    }

    /// Worker count; `None` lets rayon decide.
    pub fn set_threads(&mut self, nthreads: Option<usize>) {
        self.nthreads = nthreads;
    }

    /// Shows a progress bar on stderr when `quiet` is false.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }
}

fn trace_ray(scn: &Scene, ray: &Ray) -> Color {
    let hit = match scn.intersect(ray) {
        Some(hit) => hit,
        None => {
            return scn.background;
        }
    };
    let wo = -ray.d.normalize();
    let n = if hit.n.dot(&wo) < 0.0 { -hit.n } else { hit.n };
    let mut l = Color::zero();
    for light in scn.lights.iter() {
        let to_light = light.position - hit.p;
        let dist = to_light.length();
        let wi = to_light / dist;
        let origin = hit.p + n * SHADOW_EPSILON;
        let shadow = Ray::new(&origin, &wi, dist * (1.0 - SHADOW_EPSILON), ray.time);
        if scn.intersect_p(&shadow) {
            continue;
        }
        l += light.color * hit.material.shade(&n, &wo, &wi);
    }
    return l;
}

fn block_seed(blk: &FrameBlock) -> u64 {
    return (blk.y * blk.scansize + blk.x) as u64;
}

/// Renders one block into a tightly packed RGB buffer.
pub fn render_block(ctx: &RenderContext, camera: &Camera, blk: &FrameBlock) -> Vec<f32> {
    let opt = &ctx.opt;
    let [width, height] = ctx.resolution();
    let aspect = width as Float / height as Float;
    let samples = u32::max(opt.samples, 1);
    let dof = opt.is_enabled(RenderFlags::DEPTH_OF_FIELD);
    let mblur = opt.is_enabled(RenderFlags::MOTION_BLUR) && opt.time_end > opt.time_start;
    let t0 = opt.time_start as Float / 1000.0;
    let t1 = opt.time_end as Float / 1000.0;

    let mut rng = RNG::new_sequence(block_seed(blk));
    let mut rgb = Vec::with_capacity(blk.pixel_count() * PIXMAP_CHANNELS);
    for y in blk.y..blk.y + blk.height {
        for x in blk.x..blk.x + blk.width {
            let mut sum = Color::zero();
            for s in 0..samples {
                let (jx, jy) = if samples == 1 {
                    (0.5, 0.5)
                } else {
                    (rng.uniform_float(), rng.uniform_float())
                };
                let lens = (rng.uniform_float(), rng.uniform_float());
                let time = if mblur {
                    lerp((s as Float + rng.uniform_float()) / samples as Float, t0, t1)
                } else {
                    t0
                };
                let sx = (x as Float + jx) / width as Float;
                let sy = (y as Float + jy) / height as Float;
                let ray = camera.generate_ray(sx, sy, aspect, lens, time, dof);
                sum += trace_ray(&ctx.scn, &ray);
            }
            let c = sum / samples as Float;
            rgb.push(c.x as f32);
            rgb.push(c.y as f32);
            rgb.push(c.z as f32);
        }
    }
    return rgb;
}

fn build_pool(nthreads: Option<usize>) -> Result<rayon::ThreadPool, CalaError> {
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("render-{}", i));
    if let Some(n) = nthreads {
        builder = builder.num_threads(n);
    }
    return builder.build().map_err(|e| CalaError::render(&e.to_string()));
}

impl Renderer for PreviewRenderer {
    fn set_completion_callback(&mut self, f: BlockDoneFn) {
        self.callback = Some(f);
    }

    fn start_render(&self, ctx: &Arc<RenderContext>) -> Result<RenderJob, CalaError> {
        let camera = match ctx.scn.active_camera() {
            Some(cam) => cam.clone(),
            None => {
                return Err(CalaError::render("scene has no camera"));
            }
        };

        // centre-out: lowest priority value first, row-major among equals
        let mut order: Vec<FrameBlock> = ctx.blocks().to_vec();
        order.sort_by_key(|b| b.prio);

        let pool = build_pool(self.nthreads)?;
        let state = Arc::new(JobState::new(order.len()));
        let reporter = if self.quiet {
            ProgressReporter::hidden(order.len())
        } else {
            ProgressReporter::new(order.len(), "rendering")
        };
        info!(
            "rendering {} blocks on {} threads",
            order.len(),
            pool.current_num_threads()
        );

        let ctx = ctx.clone();
        let callback = self.callback.clone();
        let job_state = state.clone();
        let handle = thread::Builder::new()
            .name(String::from("render"))
            .spawn(move || -> Result<(), CalaError> {
                let _guard = DoneGuard(job_state.clone());
                let next = AtomicUsize::new(0);
                let failure: Mutex<Option<CalaError>> = Mutex::new(None);
                pool.broadcast(|_| loop {
                    if job_state.should_stop() {
                        break;
                    }
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    if i >= order.len() {
                        break;
                    }
                    let blk = &order[i];
                    let rgb = render_block(&ctx, &camera, blk);
                    if let Err(e) = ctx.framebuf.store_block(blk, &rgb) {
                        job_state.abort();
                        if let Ok(mut f) = failure.lock() {
                            f.get_or_insert(e);
                        }
                        break;
                    }
                    job_state.block_finished();
                    if let Some(cb) = callback.as_ref() {
                        cb(*blk);
                    }
                    reporter.update(1);
                });
                reporter.done();
                let failure = failure.into_inner().unwrap_or(None);
                if let Some(e) = failure {
                    return Err(e);
                }
                debug!(
                    "render thread exiting after {}/{} blocks",
                    job_state.blocks_done(),
                    job_state.total()
                );
                return Ok(());
            })?;
        return Ok(RenderJob::new(&state, handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(width: usize, height: usize, block_size: usize) -> Arc<RenderContext> {
        let opt = RenderOptions {
            width,
            height,
            block_size,
            ..RenderOptions::default()
        };
        Arc::new(RenderContext::new(&opt, Scene::demo()).unwrap())
    }

    #[test]
    fn test_centre_hits_sphere() {
        let ctx = context(64, 64, 16);
        let cam = ctx.scn.active_camera().unwrap().clone();
        let blk = FrameBlock::new(32, 32, 1, 1, 64);
        let rgb = render_block(&ctx, &cam, &blk);
        assert_eq!(rgb.len(), 3);
        // lit orange sphere, red dominant
        assert!(rgb[0] > rgb[2]);

        let corner = FrameBlock::new(0, 0, 1, 1, 64);
        let rgb = render_block(&ctx, &cam, &corner);
        let bg = ctx.scn.background;
        assert!((rgb[0] - bg.x as f32).abs() < 1e-6);
        assert!((rgb[2] - bg.z as f32).abs() < 1e-6);
    }

    #[test]
    fn test_render_calls_back_every_block() {
        let ctx = context(48, 40, 16);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let mut renderer = PreviewRenderer::new();
        renderer.set_threads(Some(2));
        renderer.set_completion_callback(Arc::new(move |blk: FrameBlock| {
            s.lock().unwrap().push(blk);
        }));
        let job = renderer.start_render(&ctx).unwrap();
        job.wait().unwrap();

        let mut seen = seen.lock().unwrap().clone();
        assert_eq!(seen.len(), ctx.num_blocks());
        seen.sort_by_key(|b| (b.y, b.x));
        assert_eq!(seen, ctx.blocks().to_vec());
    }

    #[test]
    fn test_abort_stops_scheduling() {
        let ctx = context(256, 256, 8);
        let pushed = Arc::new(AtomicUsize::new(0));
        let p = pushed.clone();
        let mut renderer = PreviewRenderer::new();
        renderer.set_threads(Some(1));
        renderer.set_completion_callback(Arc::new(move |_blk: FrameBlock| {
            p.fetch_add(1, Ordering::SeqCst);
        }));
        let job = renderer.start_render(&ctx).unwrap();
        job.abort();
        while !job.is_done() {
            thread::yield_now();
        }
        let done = job.blocks_done();
        let total = job.total_blocks();
        job.wait().unwrap();
        assert_eq!(total, 1024);
        assert!(done < total, "{} of {} blocks rendered after abort", done, total);
        // every block that finished was also handed to the callback
        assert_eq!(pushed.load(Ordering::SeqCst), done);
    }

    #[test]
    fn test_no_camera() {
        let opt = RenderOptions::default();
        let ctx = Arc::new(RenderContext::new(&opt, Scene::new()).unwrap());
        assert!(PreviewRenderer::new().start_render(&ctx).is_err());
    }
}
