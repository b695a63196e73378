use mandelbrot_live::config::EngineConfig;
use mandelbrot_live::render::ExecutionStrategy;
use mandelbrot_live::session::Session;
use mandelbrot_live::snapshot::save_png;

#[test]
fn rendered_frame_round_trips_through_png() {
    let cfg = EngineConfig {
        width: 40,
        height: 30,
        max_iterations: 60,
        execution: ExecutionStrategy::Parallel,
        ..EngineConfig::default()
    };
    let mut session = Session::new(cfg).unwrap();
    session.render_frame().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    save_png(session.grid(), &path).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (40, 30));
    assert_eq!(img.as_raw().as_slice(), session.grid().as_bytes());
}

#[test]
fn unwritable_path_reports_the_path() {
    let cfg = EngineConfig {
        width: 8,
        height: 8,
        ..EngineConfig::default()
    };
    let mut session = Session::new(cfg).unwrap();
    session.render_frame().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("frame.png");
    let err = save_png(session.grid(), &path).unwrap_err();
    assert!(err.to_string().contains("missing"));
}
