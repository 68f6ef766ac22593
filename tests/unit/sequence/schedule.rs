use super::*;

struct IndexSource;

impl FrameSource for IndexSource {
    fn render_frame(&self, time: FrameTime) -> CardspinResult<Frame> {
        Ok(Frame::from_pixel(1, 1, image::Rgba([time.index as u8, 0, 0, 255])))
    }
}

struct FailAt(u64);

impl FrameSource for FailAt {
    fn render_frame(&self, time: FrameTime) -> CardspinResult<Frame> {
        if time.index == self.0 {
            return Err(CardspinError::invalid_input("boom"));
        }
        Ok(Frame::new(1, 1))
    }
}

#[test]
fn twelve_fps_for_two_seconds_is_24_frames() {
    let s = FrameSchedule::for_card(12, 2.0, false).unwrap();
    assert_eq!(s.frame_count(), 24);
    for (i, time) in s.times().enumerate() {
        assert_eq!(time.index, i as u64);
        assert!((time.t - i as f64 / 24.0).abs() < 1e-15);
    }
}

#[test]
fn card_duration_is_ceiled() {
    let s = FrameSchedule::for_card(10, 1.2, false).unwrap();
    assert_eq!(s.frame_count(), 20);
    assert_eq!(s.run_seconds(), 2.0);
    let last = s.time_at(19);
    assert!(last.t < 1.0);
    assert!((last.elapsed_sec - 1.9).abs() < 1e-12);
}

#[test]
fn static_mode_has_one_frame() {
    let s = FrameSchedule::for_card(30, 5.0, true).unwrap();
    assert_eq!(s.frame_count(), 1);
    assert_eq!(s.time_at(0).t, 0.0);
}

#[test]
fn globe_frames_round_and_fail_below_one() {
    assert_eq!(FrameSchedule::for_globe(10, 1.5).unwrap().frame_count(), 15);
    assert_eq!(FrameSchedule::for_globe(3, 0.5).unwrap().frame_count(), 2);
    let err = FrameSchedule::for_globe(1, 0.25).unwrap_err();
    assert!(matches!(err, CardspinError::InvalidInput(_)));
}

#[test]
fn degenerate_timing_is_rejected() {
    assert!(FrameSchedule::for_card(0, 1.0, false).is_err());
    assert!(FrameSchedule::for_card(12, 0.0, false).is_err());
    assert!(FrameSchedule::for_card(12, -1.0, false).is_err());
    assert!(FrameSchedule::for_globe(12, f64::NAN).is_err());
}

#[test]
fn huge_durations_are_rejected_instead_of_overflowing() {
    for (fps, dur) in [(2, 1e20), (u32::MAX, 1e10), (1, f64::MAX)] {
        assert!(matches!(
            FrameSchedule::for_card(fps, dur, false).unwrap_err(),
            CardspinError::InvalidInput(_)
        ));
        assert!(matches!(
            FrameSchedule::for_globe(fps, dur).unwrap_err(),
            CardspinError::InvalidInput(_)
        ));
    }
    assert_eq!(
        FrameSchedule::for_card(10, MAX_FRAME_COUNT as f64 / 10.0, false)
            .unwrap()
            .frame_count(),
        MAX_FRAME_COUNT
    );
    assert_eq!(FrameSchedule::for_card(2, 1e20, true).unwrap().frame_count(), 1);
}

#[test]
fn frame_delay_is_rounded_centiseconds() {
    assert_eq!(frame_delay_centis(12), 8);
    assert_eq!(frame_delay_centis(10), 10);
    assert_eq!(frame_delay_centis(30), 3);
    assert_eq!(frame_delay_centis(240), 1);
    assert_eq!(FrameSchedule::for_card(25, 1.0, false).unwrap().frame_delay_centis(), 4);
}

#[test]
fn parallel_rendering_preserves_order() {
    let s = FrameSchedule::for_card(50, 1.0, false).unwrap();
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 7,
        threads: Some(3),
    };
    let mut seen = Vec::new();
    let n = render_sequence(&s, &IndexSource, &threading, |time, frame| {
        seen.push((time.index, frame.get_pixel(0, 0).0[0]));
        Ok(())
    })
    .unwrap();
    assert_eq!(n, 50);
    let expected: Vec<(u64, u8)> = (0..50).map(|i| (i, i as u8)).collect();
    assert_eq!(seen, expected);
}

#[test]
fn first_failure_stops_the_run() {
    let s = FrameSchedule::for_card(10, 1.0, false).unwrap();
    let mut emitted = 0;
    let err = render_sequence(&s, &FailAt(4), &RenderThreading::default(), |_, _| {
        emitted += 1;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(err, CardspinError::InvalidInput(_)));
    assert_eq!(emitted, 4);
}

#[test]
fn zero_threads_is_invalid() {
    let s = FrameSchedule::for_card(1, 1.0, false).unwrap();
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 4,
        threads: Some(0),
    };
    assert!(render_sequence(&s, &IndexSource, &threading, |_, _| Ok(())).is_err());
}
