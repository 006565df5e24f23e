// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the filter engine

use filter_camera::filters::{FilterType, PixelBuffer, apply_filter, apply_filter_by_id};

/// Deterministic, varied test image
fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 37 + y * 11) % 256;
            let g = (x * 5 + y * 53) % 256;
            let b = (x * y * 7 + 13) % 256;
            buffer.set_pixel(x, y, [r as u8, g as u8, b as u8, ((x + y) * 19 % 256) as u8]);
        }
    }
    buffer
}

#[test]
fn test_every_filter_preserves_dimensions() {
    for filter in FilterType::ALL {
        let mut buffer = gradient(13, 9);
        apply_filter(&mut buffer, filter);
        assert_eq!((buffer.width(), buffer.height()), (13, 9), "{}", filter);
        assert_eq!(buffer.as_bytes().len(), 13 * 9 * 4, "{}", filter);
    }
}

#[test]
fn test_none_and_unknown_are_identity() {
    let original = gradient(6, 6);

    let mut none = original.clone();
    apply_filter_by_id(&mut none, "none");
    assert_eq!(none, original);

    let mut unknown = original.clone();
    apply_filter_by_id(&mut unknown, "glitter");
    assert_eq!(unknown, original);
}

#[test]
fn test_invert_twice_is_identity() {
    let original = gradient(7, 5);
    let mut buffer = original.clone();
    apply_filter(&mut buffer, FilterType::Invert);
    assert_ne!(buffer, original);
    apply_filter(&mut buffer, FilterType::Invert);
    assert_eq!(buffer, original);
}

#[test]
fn test_mirror_twice_is_identity() {
    let original = gradient(7, 5);
    let mut buffer = original.clone();
    apply_filter(&mut buffer, FilterType::Mirror);
    assert_eq!(buffer.pixel(0, 0), original.pixel(6, 0));
    apply_filter(&mut buffer, FilterType::Mirror);
    assert_eq!(buffer, original);
}

#[test]
fn test_grayscale_is_idempotent_and_neutral() {
    let mut once = gradient(8, 8);
    apply_filter(&mut once, FilterType::Grayscale);
    assert!(once.pixels().iter().all(|px| px[0] == px[1] && px[1] == px[2]));

    let mut twice = once.clone();
    apply_filter(&mut twice, FilterType::Grayscale);
    assert_eq!(twice, once);
}

#[test]
fn test_posterize_uses_four_levels() {
    let mut buffer = gradient(16, 16);
    apply_filter(&mut buffer, FilterType::Posterize);
    for px in buffer.pixels() {
        for value in &px[..3] {
            assert!(matches!(value, 0 | 85 | 170 | 255), "unexpected level {}", value);
        }
    }
}

#[test]
fn test_sepia_on_white() {
    let mut buffer = PixelBuffer::filled(1, 1, [255, 255, 255, 255]);
    apply_filter(&mut buffer, FilterType::Sepia);
    // The blue row of the sepia matrix sums to 0.937
    assert_eq!(buffer.pixel(0, 0), Some([255, 255, 239, 255]));
}

#[test]
fn test_blur_alternating_rows() {
    let mut buffer = PixelBuffer::new(4, 4);
    for y in 0..4 {
        let v = if y % 2 == 0 { 0 } else { 255 };
        for x in 0..4 {
            buffer.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    let original = buffer.clone();
    apply_filter(&mut buffer, FilterType::Blur);

    // Border untouched
    for x in 0..4 {
        assert_eq!(buffer.pixel(x, 0), original.pixel(x, 0));
        assert_eq!(buffer.pixel(x, 3), original.pixel(x, 3));
    }
    for y in 0..4 {
        assert_eq!(buffer.pixel(0, y), original.pixel(0, y));
        assert_eq!(buffer.pixel(3, y), original.pixel(3, y));
    }

    // Row 1 sees black/white/black, row 2 sees white/black/white
    assert_eq!(buffer.pixel(1, 1), Some([85, 85, 85, 255]));
    assert_eq!(buffer.pixel(2, 1), Some([85, 85, 85, 255]));
    assert_eq!(buffer.pixel(1, 2), Some([170, 170, 170, 255]));
    assert_eq!(buffer.pixel(2, 2), Some([170, 170, 170, 255]));
}

#[test]
fn test_neighbourhood_filters_leave_tiny_buffers_alone() {
    for filter in [FilterType::Blur, FilterType::Emboss] {
        let original = gradient(2, 5);
        let mut buffer = original.clone();
        apply_filter(&mut buffer, filter);
        assert_eq!(buffer, original, "{}", filter);
    }
}

#[test]
fn test_pixelate_partial_blocks_stay_inside() {
    let mut buffer = gradient(10, 10);
    let original = buffer.clone();
    let corner = buffer.pixel(8, 8).unwrap();
    apply_filter(&mut buffer, FilterType::Pixelate);

    assert_eq!(buffer.width(), 10);
    // Edge block spans 8..10 in both directions and takes its top-left colour
    for y in 8..10 {
        for x in 8..10 {
            let px = buffer.pixel(x, y).unwrap();
            assert_eq!(px[..3], corner[..3]);
            assert_eq!(px[3], original.pixel(x, y).unwrap()[3]);
        }
    }
}

#[test]
fn test_empty_buffer_is_accepted() {
    for filter in FilterType::ALL {
        let mut buffer = PixelBuffer::new(0, 0);
        apply_filter(&mut buffer, filter);
        assert!(buffer.is_empty());
    }
}

#[test]
fn test_filter_ids_round_trip() {
    for filter in FilterType::ALL {
        let parsed: FilterType = filter.id().parse().unwrap();
        assert_eq!(parsed, filter);
    }
    assert!("sparkle".parse::<FilterType>().is_err());
}
