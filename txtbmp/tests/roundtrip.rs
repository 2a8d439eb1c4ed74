/// End-to-end tests: text -> grid -> text, plus the grid contract seen from outside.
use txtbmp::layout::{self, Dimensions};
use txtbmp::{decode, decode_string, decode_with, encode, encode_code_points};
use txtbmp::{EncodeError, ErrorKind, Pixel, PixelGrid, SentinelMode};

fn units(s: &str) -> Vec<u16> {
    s.chars().map(|c| c as u16).collect()
}

fn padded(s: &str) -> String {
    let n = s.chars().count();
    format!("{s}{}", " ".repeat(layout::padding_len(n)))
}

#[test]
fn roundtrip_ascii() {
    for text in ["a", "ab", "abc", "hello, world", "The quick brown fox jumps over the lazy dog."] {
        let grid = encode(text, Dimensions::auto()).unwrap();
        assert_eq!(decode_string(&grid).unwrap(), padded(text), "text {text:?}");
    }
}

#[test]
fn roundtrip_bmp_characters() {
    let text = "中文字符 ümlaut ½ €\u{FFFD}";
    let grid = encode(text, Dimensions::auto()).unwrap();
    assert_eq!(decode_string(&grid).unwrap(), padded(text));
}

#[test]
fn roundtrip_with_explicit_width() {
    let text = "line one\nline two\nline three\n";
    let grid = encode(text, Dimensions::with_width(4)).unwrap();
    assert_eq!(grid.width(), 4);
    assert_eq!(decode_string(&grid).unwrap(), padded(text));
}

#[test]
fn roundtrip_in_oversized_grid() {
    let text = "spare capacity";
    let grid = encode(text, Dimensions::exact(20, 20)).unwrap();
    assert_eq!(decode_string(&grid).unwrap(), padded(text));
    assert_eq!(
        decode_with(&grid, SentinelMode::EndOfText),
        units(&padded(text))
    );
}

#[test]
fn padding_law() {
    assert_eq!(decode(&encode("abc", Dimensions::auto()).unwrap()), units("abc"));
    assert_eq!(decode(&encode("abcd", Dimensions::auto()).unwrap()), units("abcd  "));
    assert_eq!(decode(&encode("abcde", Dimensions::auto()).unwrap()), units("abcde "));
}

#[test]
fn dimension_inference_with_width() {
    // 10 chars -> 12 padded -> 8 pixels
    let text = "0123456789";
    for width in [2u32, 4, 6, 8, 10] {
        let grid = encode(text, Dimensions::with_width(width)).unwrap();
        assert_eq!(grid.height() as u64, 8u64.div_ceil(width as u64));
    }
}

#[test]
fn capacity_rejection() {
    let err = encode("abcdef", Dimensions::exact(2, 1)).unwrap_err();
    assert_eq!(err, EncodeError::Capacity { needed: 4, available: 2 });
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

#[test]
fn even_width_enforcement() {
    let err = encode("abc", Dimensions::exact(3, 2)).unwrap_err();
    assert_eq!(err, EncodeError::OddWidth(3));
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn oversized_explicit_dimensions_fail_without_allocating() {
    let err = encode("abc", Dimensions::exact(4_000_000_000, 4_000_000_000)).unwrap_err();
    assert_eq!(err, EncodeError::TooLarge { width: 4_000_000_000, height: 4_000_000_000 });
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn height_without_width_is_config_error() {
    let dims = Dimensions { width: None, height: Some(2) };
    let err = encode("abc", dims).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn out_of_range_code_point() {
    let err = encode_code_points(&[0x41, 0x1_0000], Dimensions::auto()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn sentinel_is_row_scoped() {
    let [a, b] = layout::pack_triple([0x78, 0x79, 0x7A]);
    let pixels = vec![
        Pixel::BLACK, Pixel::BLACK, // row 0: sentinel at col 0
        a, b,                       // row 1: "xyz"
    ];
    let grid = PixelGrid::from_pixels(2, 2, pixels).unwrap();
    assert_eq!(decode(&grid), units("xyz"));
    assert!(decode_with(&grid, SentinelMode::EndOfText).is_empty());
}

#[test]
fn concrete_example() {
    let grid = encode("AB ", Dimensions::auto()).unwrap();
    assert_eq!(grid.pixels(), &[Pixel::new(0, 65, 0), Pixel::new(66, 0, 32)]);

    let external = PixelGrid::from_rgb_bytes(2, 1, vec![0, 65, 0, 66, 0, 32]).unwrap();
    assert_eq!(decode_string(&external).unwrap(), "AB ");
}

#[test]
fn odd_area_widening() {
    // 3x1 grid: one full pair, then a lone pixel paired with the black column
    let [a, b] = layout::pack_triple([0x41, 0x42, 0x43]);
    let lone = Pixel::new(0, 0x44, 0);
    let grid = PixelGrid::from_pixels(3, 1, vec![a, b, lone]).unwrap();
    assert_eq!(decode(&grid), vec![0x41, 0x42, 0x43, 0x44, 0, 0]);
    // the caller's grid is untouched
    assert_eq!(grid.width(), 3);
    assert_eq!(grid.pixels(), &[a, b, lone]);
}

#[test]
fn encoded_grid_survives_byte_export() {
    let text = "bytes in, bytes out";
    let grid = encode(text, Dimensions::auto()).unwrap();
    let (w, h) = (grid.width(), grid.height());
    let rebuilt = PixelGrid::from_rgb_bytes(w, h, grid.into_rgb_bytes()).unwrap();
    assert_eq!(decode_string(&rebuilt).unwrap(), padded(text));
}
