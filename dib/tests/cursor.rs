use lpvc_dib::{
    padded_stride, Bgr, DibCursor, DibCursorMut, DibLayout, Geometry, Rgb, RowLayout, RowOrder,
};

/// Bytes of a 2×2 packed bitmap, `[B G R]` per sample and rows in memory order.
const TWO_BY_TWO: [u8; 12] = [
    0x00, 0x01, 0x02, // row 0, column 0
    0x10, 0x11, 0x12, // row 0, column 1
    0x20, 0x21, 0x22, // row 1, column 0
    0x30, 0x31, 0x32, // row 1, column 1
];

fn collect(cursor: DibCursor<'_>) -> Vec<Rgb> {
    cursor.map(Rgb::from).collect()
}

#[test]
fn packed_top_down() {
    let layout = DibLayout::new(Geometry::new(2, -2), RowLayout::Packed).unwrap();
    let cursor = DibCursor::new(layout, &TWO_BY_TWO).unwrap();

    assert_eq!(
        collect(cursor),
        [
            Rgb::new(0x02, 0x01, 0x00),
            Rgb::new(0x12, 0x11, 0x10),
            Rgb::new(0x22, 0x21, 0x20),
            Rgb::new(0x32, 0x31, 0x30),
        ]
    );
}

#[test]
fn packed_bottom_up() {
    let layout = DibLayout::with_row_order(
        Geometry::new(2, -2),
        RowLayout::Packed,
        RowOrder::BottomUp,
    )
    .unwrap();
    let cursor = DibCursor::new(layout, &TWO_BY_TWO).unwrap();

    let pixels = collect(cursor);
    // The first logical row comes from the second physical row.
    assert_eq!(pixels[..2], [Rgb::new(0x22, 0x21, 0x20), Rgb::new(0x32, 0x31, 0x30)]);
    assert_eq!(pixels[2..], [Rgb::new(0x02, 0x01, 0x00), Rgb::new(0x12, 0x11, 0x10)]);

    // The same as signaled by a positive height.
    let signed = DibLayout::new(Geometry::new(2, 2), RowLayout::Packed).unwrap();
    assert_eq!(signed, layout);
}

#[test]
fn first_pixel_by_direction() {
    let rows = 5;
    for width in [1usize, 2, 3, 4, 5, 13] {
        let stride = padded_stride(width);
        let mut bytes = vec![0u8; stride * rows];
        bytes[0..3].copy_from_slice(&[1, 2, 3]);
        let last = (rows - 1) * stride;
        bytes[last..last + 3].copy_from_slice(&[4, 5, 6]);

        let up = DibLayout::new(Geometry::new(width, rows as isize), RowLayout::Padded).unwrap();
        let first = DibCursor::new(up, &bytes).unwrap().get();
        assert_eq!(first, Rgb::new(6, 5, 4), "width {}", width);

        let down =
            DibLayout::new(Geometry::new(width, -(rows as isize)), RowLayout::Padded).unwrap();
        let first = DibCursor::new(down, &bytes).unwrap().get();
        assert_eq!(first, Rgb::new(3, 2, 1), "width {}", width);
    }
}

#[test]
fn padding_is_skipped_and_kept() {
    // One pixel per row, each row carries one byte of padding.
    let layout = DibLayout::new(Geometry::new(1, -3), RowLayout::Padded).unwrap();
    assert_eq!(layout.stride(), 4);

    let mut bytes = [0xAAu8; 12];
    let colors = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6), Rgb::new(7, 8, 9)];
    let mut cursor = DibCursorMut::new(layout, &mut bytes).unwrap();
    for color in colors {
        cursor.get_mut().set(color);
        cursor.advance();
    }

    assert_eq!(
        bytes,
        [3, 2, 1, 0xAA, 6, 5, 4, 0xAA, 9, 8, 7, 0xAA],
        "Padding bytes are never touched"
    );

    let read: Vec<Rgb> = collect(DibCursor::new(layout, &bytes).unwrap());
    assert_eq!(read, colors);
}

#[test]
fn write_then_read_round_trips() {
    let layout = DibLayout::new(Geometry::new(3, 3), RowLayout::Padded).unwrap();
    let mut bytes = vec![0u8; layout.byte_len()];

    let mut cursor = DibCursorMut::new(layout, &mut bytes).unwrap();
    let mut value = 0u8;
    while cursor.remaining() > 0 {
        let color = Rgb::new(value, value.wrapping_add(85), value.wrapping_add(170));
        let mut pixel = cursor.get_mut();
        pixel.set(color);
        assert_eq!(pixel.get(), color);
        cursor.advance();
        value = value.wrapping_add(29);
    }
}

#[test]
fn iterators_are_exact() {
    let layout = DibLayout::new(Geometry::new(5, 7), RowLayout::Padded).unwrap();
    let mut bytes = vec![0u8; layout.byte_len()];

    let cursor = DibCursor::new(layout, &bytes).unwrap();
    assert_eq!(cursor.len(), 35);
    assert_eq!(cursor.skip(34).len(), 1);

    let mut cursor = DibCursorMut::new(layout, &mut bytes).unwrap();
    assert_eq!(cursor.len(), 35);
    assert_eq!(cursor.by_ref().count(), 35);
    assert!(cursor.next().is_none());
    assert!(cursor.next().is_none());
}

#[test]
fn sample_view_matches_bytes() {
    let layout = DibLayout::new(Geometry::new(2, -2), RowLayout::Packed).unwrap();
    let samples: &[Bgr] = bytemuck::cast_slice(&TWO_BY_TWO);

    let cursor = DibCursor::new(layout, &TWO_BY_TWO).unwrap();
    for (pixel, sample) in cursor.zip(samples) {
        assert_eq!(pixel.sample(), sample);
        assert_eq!(pixel.get(), sample.to_rgb());
    }
}
