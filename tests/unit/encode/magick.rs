use super::*;

fn settings(optimize: bool) -> GifSettings {
    GifSettings {
        delay_centis: 8,
        optimize,
    }
}

#[test]
fn arguments_follow_the_gif_layout() {
    let frames = vec![PathBuf::from("f/frame_0000.png"), PathBuf::from("f/frame_0001.png")];
    let args = MagickGifSink::command_args(&frames, &settings(true), Path::new("out.gif"));
    let args: Vec<String> = args
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        args,
        [
            "-delay",
            "8",
            "-dispose",
            "Background",
            "-layers",
            "Optimize",
            "f/frame_0000.png",
            "f/frame_0001.png",
            "-loop",
            "0",
            "out.gif",
        ]
    );
}

#[test]
fn optimization_is_optional() {
    let frames = vec![PathBuf::from("a.png")];
    let args = MagickGifSink::command_args(&frames, &settings(false), Path::new("o.gif"));
    assert!(!args.iter().any(|a| a == "-layers"));
    assert_eq!(args.len(), 8);
}

#[test]
fn missing_program_is_encoder_failure() {
    let mut sink = MagickGifSink::with_program("cardspin-no-such-encoder");
    let dir = tempfile::tempdir().unwrap();
    let err = sink
        .encode(
            &[dir.path().join("frame_0000.png")],
            &settings(false),
            &dir.path().join("out.gif"),
        )
        .unwrap_err();
    assert!(matches!(err, CardspinError::EncoderFailure { .. }));
    assert!(err.to_string().starts_with("encoder failure: failed to start"));
}

#[test]
fn empty_frame_list_is_rejected() {
    let mut sink = MagickGifSink::with_program("magick");
    let err = sink
        .encode(&[], &settings(false), Path::new("o.gif"))
        .unwrap_err();
    assert!(matches!(err, CardspinError::InvalidInput(_)));
}

#[test]
fn zero_delay_is_invalid() {
    let s = GifSettings {
        delay_centis: 0,
        optimize: false,
    };
    assert!(s.validate().is_err());
}
