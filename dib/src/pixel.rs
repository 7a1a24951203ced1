use bytemuck::{Pod, Zeroable};

/// A physical pixel sample, as stored in the bitmap buffer.
///
/// The byte order is blue, green, red. The type has alignment one and no padding, so any three
/// bytes of a buffer can be viewed as a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

/// A logical pixel value, in the channel order consumed and produced by codecs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Bgr { b, g, r }
    }

    /// Reorder the channels into a logical value.
    pub const fn to_rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Reorder the channels into a physical sample.
    pub const fn to_bgr(self) -> Bgr {
        Bgr {
            b: self.b,
            g: self.g,
            r: self.r,
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

impl From<Bgr> for Rgb {
    fn from(sample: Bgr) -> Self {
        sample.to_rgb()
    }
}

impl From<Rgb> for Bgr {
    fn from(color: Rgb) -> Self {
        color.to_bgr()
    }
}

#[test]
fn sample_bytes() {
    let bytes = [1u8, 2, 3];
    let sample: &Bgr = bytemuck::from_bytes(&bytes);
    assert_eq!(*sample, Bgr::new(1, 2, 3));
    assert_eq!(sample.to_rgb(), Rgb::new(3, 2, 1));
    assert_eq!(<[u8; 3]>::from(sample.to_rgb()), [3, 2, 1]);
    assert_eq!(core::mem::size_of::<Bgr>(), 3);
    assert_eq!(core::mem::align_of::<Bgr>(), 1);
}
