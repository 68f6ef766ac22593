use super::*;
use crate::animation::mode::{CompositeMotion, GlobeMotion, SpinMotion};

fn write_front(dir: &Path) -> PathBuf {
    let p = dir.join("front.png");
    image::RgbaImage::from_pixel(40, 40, image::Rgba([255, 0, 0, 255]))
        .save_with_format(&p, image::ImageFormat::Png)
        .unwrap();
    p
}

/// Copies the first frame to the output path.
struct CopyFirst {
    seen: usize,
}

impl AnimationSink for CopyFirst {
    fn encode(&mut self, frames: &[PathBuf], s: &GifSettings, out: &Path) -> CardspinResult<()> {
        assert!(s.delay_centis >= 1);
        self.seen = frames.len();
        std::fs::copy(&frames[0], out).unwrap();
        Ok(())
    }
}

struct Broken;

impl AnimationSink for Broken {
    fn encode(&mut self, _: &[PathBuf], _: &GifSettings, out: &Path) -> CardspinResult<()> {
        std::fs::write(out, b"partial").unwrap();
        Err(CardspinError::encoder_failure("exit 1", "convert: no decode delegate"))
    }
}

#[test]
fn canvas_side_defaults_and_minimums() {
    let mut req = RunRequest::new("f.png", "o.gif", AnimationMode::Spin(SpinMotion::FullTurn));
    assert_eq!(req.canvas_side().unwrap(), 256);
    req.size = Some(32);
    assert_eq!(req.canvas_side().unwrap(), 32);
    req.size = Some(31);
    assert!(matches!(
        req.canvas_side().unwrap_err(),
        CardspinError::InvalidInput(_)
    ));

    req.mode = AnimationMode::Globe(GlobeMotion::default());
    req.size = None;
    assert_eq!(req.canvas_side().unwrap(), 512);
    req.size = Some(63);
    assert!(req.canvas_side().is_err());
}

#[test]
fn missing_front_is_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let req = RunRequest::new(
        dir.path().join("absent.png"),
        dir.path().join("o.gif"),
        AnimationMode::Spin(SpinMotion::FullTurn),
    );
    assert!(matches!(
        prepare_run(&req).unwrap_err(),
        CardspinError::MissingFile(_)
    ));
}

#[test]
fn validation_happens_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = RunRequest::new(
        dir.path().join("absent.png"),
        dir.path().join("o.gif"),
        AnimationMode::Composite(CompositeMotion::default()),
    );
    assert!(matches!(
        prepare_run(&req).unwrap_err(),
        CardspinError::InvalidInput(_)
    ));

    req.mode = AnimationMode::Oscillate { max_degrees: 15.0 };
    req.fps = 0;
    assert!(matches!(
        prepare_run(&req).unwrap_err(),
        CardspinError::InvalidInput(_)
    ));
}

#[test]
fn duration_is_reported_before_rates_derived_from_it() {
    let mut req = RunRequest::new(
        "absent.png",
        "o.gif",
        AnimationMode::Composite(CompositeMotion {
            z_degrees_per_sec: Some(360.0 / 0.0),
            ..CompositeMotion::default()
        }),
    );
    req.duration_sec = 0.0;
    let err = req.validate().unwrap_err();
    assert!(matches!(err, CardspinError::InvalidInput(_)));
    assert!(err.to_string().contains("duration"), "{err}");

    req.duration_sec = 2.0;
    req.mode = AnimationMode::Composite(CompositeMotion {
        z_degrees_per_sec: Some(180.0),
        ..CompositeMotion::default()
    });
    assert!(req.validate().is_ok());
}

#[test]
fn preview_frame_rejects_out_of_range_t() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = RunRequest::new(
        write_front(dir.path()),
        dir.path().join("o.gif"),
        AnimationMode::Oscillate { max_degrees: 15.0 },
    );
    req.size = Some(48);
    let run = prepare_run(&req).unwrap();
    assert!(run.single_sided());
    assert_eq!(run.back_source(), &BackSource::Absent);
    assert_eq!(run.render_frame_at(0.5).unwrap().dimensions(), (48, 48));
    assert!(run.render_frame_at(1.5).is_err());
    assert!(run.render_frame_at(f64::NAN).is_err());
}

#[test]
fn generate_places_output_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out.gif");
    let mut req = RunRequest::new(
        write_front(dir.path()),
        &out,
        AnimationMode::Yaw { rotations: 1.0 },
    );
    req.fps = 5;
    req.duration_sec = 1.0;
    req.size = Some(32);

    let mut sink = CopyFirst { seen: 0 };
    let report = generate(&req, &mut sink).unwrap();
    assert_eq!(sink.seen, 5);
    assert_eq!(report.frame_count, 5);
    assert_eq!(report.frame_delay_centis, 20);
    assert!(report.single_sided);
    assert!(out.exists());
}

#[test]
fn failed_encode_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.gif");
    let mut req = RunRequest::new(
        write_front(dir.path()),
        &out,
        AnimationMode::Spin(SpinMotion::FullTurn),
    );
    req.fps = 2;
    req.duration_sec = 1.0;
    req.size = Some(32);

    let err = generate(&req, &mut Broken).unwrap_err();
    assert!(err.to_string().ends_with(": convert: no decode delegate"));
    assert!(!out.exists());
}

#[test]
fn missing_back_degrades_to_single_sided() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = RunRequest::new(
        write_front(dir.path()),
        dir.path().join("o.gif"),
        AnimationMode::Spin(SpinMotion::FullTurn),
    );
    req.back = Some(dir.path().join("no-back.png"));
    req.size = Some(32);

    let run = prepare_run(&req).unwrap();
    assert!(run.single_sided());
    assert_eq!(run.back_source(), &BackSource::Absent);
    assert_eq!(run.warnings().len(), 1);
    assert!(run.warnings()[0].contains("missing file"));
}

#[test]
fn staged_name_keeps_extension() {
    assert_eq!(staged_name(Path::new("a/b.gif")), PathBuf::from("output.gif"));
    assert_eq!(staged_name(Path::new("noext")), PathBuf::from("output.gif"));
    assert_eq!(staged_name(Path::new("x.webp")), PathBuf::from("output.webp"));
}
