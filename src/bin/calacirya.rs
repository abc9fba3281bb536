use clap::*;

use calacirya::core::context::*;
use calacirya::core::display::*;
use calacirya::core::error::*;
use calacirya::core::options::*;
use calacirya::core::render::*;
use calacirya::core::scene::Scene;
use calacirya::displays::HeadlessDisplay;
#[cfg(feature = "window")]
use calacirya::displays::WindowDisplay;
use calacirya::renderers::PreviewRenderer;

use log::*;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

const DEFAULT_CONFIG: &str = "calacirya.conf";
const DEFAULT_OUTFILE: &str = "calacirya.png";
const WINDOW_TITLE: &str = "Calacirya render";

#[derive(Debug, Parser)]
#[clap(author, about, version)]
struct CommandOptions {
    /// Configuration file. Defaults to ./calacirya.conf when present.
    #[arg(short, long, value_name = "filename")]
    pub config: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(long, value_name = "num")]
    pub width: Option<usize>,

    /// Output height in pixels.
    #[arg(long, value_name = "num")]
    pub height: Option<usize>,

    /// Samples per pixel.
    #[arg(short = 's', long, value_name = "num")]
    pub samples: Option<u32>,

    /// Render block size in pixels.
    #[arg(short, long = "blocksize", value_name = "num")]
    pub blocksize: Option<usize>,

    /// Use specified number of threads for rendering.
    #[arg(short = 'j', long = "nthreads", value_name = "num")]
    pub nthreads: Option<usize>,

    /// Write the final image to the given filename.
    #[arg(short, long, value_name = "filename")]
    pub outfile: Option<PathBuf>,

    /// Render without opening a window.
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Initial display gamma.
    #[arg(short, long, value_name = "value")]
    pub gamma: Option<f32>,

    /// Suppress all text output other than error messages.
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log messages at or above this level (0 -> INFO,
    /// 1 -> WARNING, 2 -> ERROR, 3-> FATAL).
    #[arg(long, value_name = "num")]
    pub minloglevel: Option<i32>,
}

fn init_logger(opts: &CommandOptions) {
    if let Some(minloglevel) = opts.minloglevel {
        const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        let log_level = LOG_LEVELS[(minloglevel + 2).clamp(0, 4) as usize];
        env::set_var("RUST_LOG", log_level);
    } else {
        //default log level : warn
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned());
        env::set_var("RUST_LOG", log_level);
    }

    env_logger::Builder::from_default_env()
        .format_target(false)
        .format_module_path(false)
        .init();
}

fn load_options(opts: &CommandOptions) -> Result<RenderOptions, CalaError> {
    let mut opt = RenderOptions::new();
    if let Some(path) = opts.config.as_ref() {
        load_config(&mut opt, path)?;
    } else {
        let path = Path::new(DEFAULT_CONFIG);
        if path.exists() {
            load_config(&mut opt, path)?;
        } else {
            info!("no {} found, using default options", DEFAULT_CONFIG);
        }
    }

    if let Some(width) = opts.width {
        opt.width = width;
    }
    if let Some(height) = opts.height {
        opt.height = height;
    }
    if let Some(samples) = opts.samples {
        opt.samples = samples;
    }
    if let Some(blocksize) = opts.blocksize {
        opt.block_size = blocksize;
    }
    opt.validate()?;
    return Ok(opt);
}

fn use_window(opts: &CommandOptions) -> bool {
    if opts.headless {
        return false;
    }
    if cfg!(feature = "window") {
        return true;
    }
    warn!("built without the \"window\" feature, rendering headless");
    return false;
}

#[cfg(feature = "window")]
fn create_window_display(opts: &CommandOptions) -> Box<dyn Display> {
    let window: Box<dyn Display> = Box::new(WindowDisplay::new());
    if let Some(outfile) = opts.outfile.as_ref() {
        let mut multiple = MultipleDisplay::new();
        multiple.add_display(window);
        multiple.add_display(Box::new(HeadlessDisplay::with_output(outfile)));
        return Box::new(multiple);
    }
    return window;
}

#[cfg(not(feature = "window"))]
fn create_window_display(opts: &CommandOptions) -> Box<dyn Display> {
    return create_headless_display(opts);
}

fn create_headless_display(opts: &CommandOptions) -> Box<dyn Display> {
    let outfile = opts
        .outfile
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTFILE));
    return Box::new(HeadlessDisplay::with_output(&outfile));
}

fn run(opts: &CommandOptions) -> Result<(), CalaError> {
    let opt = load_options(opts)?;
    let ctx = Arc::new(RenderContext::new(&opt, Scene::demo())?);
    let windowed = use_window(opts);
    if !opts.quiet {
        println!(
            "calacirya {}: {}x{}, {} spp, {} blocks of {}x{}",
            env!("CARGO_PKG_VERSION"),
            opt.width,
            opt.height,
            opt.samples,
            ctx.num_blocks(),
            ctx.block_dims().0,
            ctx.block_dims().1
        );
    }

    let mut display_loop = DisplayLoop::new(&ctx);
    if let Some(gamma) = opts.gamma {
        display_loop.set_gamma(gamma);
    }
    display_loop.set_quiet(opts.quiet);

    let mut renderer = PreviewRenderer::new();
    renderer.set_threads(opts.nthreads);
    renderer.set_quiet(opts.quiet || windowed);
    renderer.set_completion_callback(display_loop.synchronizer().into_callback());

    let mut display = if windowed {
        create_window_display(opts)
    } else {
        create_headless_display(opts)
    };
    display.start(WINDOW_TITLE, &ctx.resolution())?;

    let job = renderer.start_render(&ctx)?;
    let control = display_loop.run(display.as_mut(), &job)?;
    if control == Control::Exit {
        info!("quit requested, stopping render");
        job.abort();
    }
    display.end()?;
    job.wait()?;
    return Ok(());
}

pub fn main() {
    let opts = CommandOptions::parse();
    init_logger(&opts);
    match run(&opts) {
        Ok(_) => {
            process::exit(0);
        }
        Err(e) => {
            error!("{}", e);
            if !opts.quiet {
                eprintln!("{}", e);
            }
            process::exit(if e.is_config() { 2 } else { 1 });
        }
    }
}
