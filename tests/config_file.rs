use calacirya::core::context::*;
use calacirya::core::options::*;
use calacirya::core::scene::Scene;

use std::fs;

#[test]
fn context_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calacirya.conf");
    fs::write(
        &path,
        "# preview settings\nsize 320 200\nsamples 2\nblocksize 64\ntime 0 40\ndof off\n",
    )
    .unwrap();

    let ctx = RenderContext::from_config(&path, Scene::demo()).unwrap();
    assert_eq!(ctx.resolution(), [320, 200]);
    assert_eq!(ctx.opt.samples, 2);
    assert_eq!(ctx.opt.time_end, 40);
    assert!(!ctx.opt.is_enabled(RenderFlags::DEPTH_OF_FIELD));
    assert!(ctx.opt.is_enabled(RenderFlags::MOTION_BLUR));
    assert_eq!(ctx.block_dims(), (64, 64));
    assert_eq!(ctx.num_blocks(), 5 * 4);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.conf");
    let e = RenderContext::from_config(&path, Scene::demo())
        .err()
        .unwrap();
    assert!(e.is_config());
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.conf");
    fs::write(&path, "width 0\n").unwrap();
    let mut opt = RenderOptions::new();
    assert!(load_config(&mut opt, &path).unwrap_err().is_config());

    fs::write(&path, "time 100 50\n").unwrap();
    let mut opt = RenderOptions::new();
    assert!(load_config(&mut opt, &path).is_err());
}
