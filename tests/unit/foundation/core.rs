use super::*;

#[test]
fn named_colors_parse_case_insensitively() {
    assert_eq!("Transparent".parse::<Rgba8>().unwrap(), Rgba8::TRANSPARENT);
    assert_eq!("BLACK".parse::<Rgba8>().unwrap(), Rgba8::BLACK);
    assert_eq!(" white ".parse::<Rgba8>().unwrap(), Rgba8::WHITE);
}

#[test]
fn hex_colors_parse_with_and_without_alpha() {
    assert_eq!(
        "#ff8000".parse::<Rgba8>().unwrap(),
        Rgba8::opaque(255, 128, 0)
    );
    assert_eq!(
        "#10203040".parse::<Rgba8>().unwrap(),
        Rgba8::new(0x10, 0x20, 0x30, 0x40)
    );
}

#[test]
fn bad_colors_are_invalid_input() {
    for bad in ["teal", "#12", "#gg0000", "#1234567"] {
        let err = bad.parse::<Rgba8>().unwrap_err();
        assert!(matches!(err, CardspinError::InvalidInput(_)), "{bad}");
    }
}

#[test]
fn pixel_conversion_is_lossless() {
    let c = Rgba8::new(1, 2, 3, 4);
    assert_eq!(Rgba8::from_pixel(c.to_pixel()), c);
}
