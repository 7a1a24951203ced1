//! Benchmarks walking bitmaps through the pixel cursors.
use brunch::Bench;

use lpvc_dib::{DibCursor, DibCursorMut, DibError, DibLayout, Geometry, Rgb, RowLayout};

struct Walk {
    row_layout: RowLayout,
    height: isize,
    width: usize,
}

impl Walk {
    fn name(&self, what: &str) -> String {
        format!(
            "dib::iterate::{}({:?}, {}x{})",
            what, self.row_layout, self.width, self.height
        )
    }

    fn layout(&self) -> Result<DibLayout, DibError> {
        DibLayout::new(Geometry::new(self.width, self.height), self.row_layout)
    }

    fn prepare_read(&self) -> Result<impl FnMut() -> u32, DibError> {
        let layout = self.layout()?;
        let bytes = vec![0x7fu8; layout.byte_len()];

        Ok(move || {
            DibCursor::new(layout, &bytes)
                .expect("Buffer fits its layout")
                .map(|pixel| u32::from(pixel.get().r))
                .sum::<u32>()
        })
    }

    fn prepare_write(&self) -> Result<impl FnMut(), DibError> {
        let layout = self.layout()?;
        let mut bytes = vec![0u8; layout.byte_len()];

        Ok(move || {
            for mut pixel in DibCursorMut::new(layout, &mut bytes).expect("Buffer fits its layout")
            {
                pixel.set(Rgb::new(0xff, 0x80, 0x00));
            }
        })
    }
}

fn main() {
    let tests = [
        // Aligned rows, no padding at all.
        Walk {
            row_layout: RowLayout::Padded,
            width: 640,
            height: 480,
        },
        Walk {
            row_layout: RowLayout::Padded,
            width: 640,
            height: -480,
        },
        // One byte of padding per row.
        Walk {
            row_layout: RowLayout::Padded,
            width: 641,
            height: 480,
        },
        Walk {
            row_layout: RowLayout::Packed,
            width: 641,
            height: -480,
        },
    ];

    let mut benches = brunch::Benches::default();
    for walk in &tests {
        benches.extend([
            Bench::new(walk.name("read"))
                .run(walk.prepare_read().expect("Failed to setup benchmark")),
            Bench::new(walk.name("write"))
                .run(walk.prepare_write().expect("Failed to setup benchmark")),
        ]);
    }
    benches.finish();
}
