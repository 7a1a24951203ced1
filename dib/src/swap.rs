//! A reference to a pixel sample that converts its channel order on access.
use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::pixel::{Bgr, Rgb};

/// A channel-swapping reference to one physical pixel.
///
/// Reading yields the logical [`Rgb`] value of the stored [`Bgr`] sample. Writing takes a logical
/// value and stores it as a physical sample, in place. Whether writing is possible is decided by
/// the reference type: a `Swapped<&Bgr>` can only be read, a `Swapped<&mut Bgr>` can also be
/// assigned.
///
/// ```
/// use lpvc_dib::{Bgr, Rgb, Swapped};
///
/// let mut sample = Bgr::new(0x10, 0x20, 0x30);
/// let mut pixel = Swapped::new(&mut sample);
/// assert_eq!(pixel.get(), Rgb::new(0x30, 0x20, 0x10));
///
/// pixel.set(Rgb::new(0xff, 0x80, 0x00));
/// assert_eq!(sample, Bgr::new(0x00, 0x80, 0xff));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swapped<P> {
    sample: P,
}

impl<P: Deref<Target = Bgr>> Swapped<P> {
    pub fn new(sample: P) -> Self {
        Swapped { sample }
    }

    /// Read the logical value.
    pub fn get(&self) -> Rgb {
        self.sample.to_rgb()
    }

    /// Borrow a read-only handle to the same sample.
    pub fn as_ref(&self) -> Swapped<&'_ Bgr> {
        Swapped {
            sample: &*self.sample,
        }
    }

    /// The physical sample behind this reference.
    pub fn sample(&self) -> &Bgr {
        &self.sample
    }
}

impl<P: DerefMut<Target = Bgr>> Swapped<P> {
    /// Store a logical value.
    pub fn set(&mut self, color: Rgb) {
        *self.sample = color.to_bgr();
    }

    /// Read, transform and store the logical value.
    pub fn update(&mut self, with: impl FnOnce(Rgb) -> Rgb) {
        let color = with(self.get());
        self.set(color);
    }
}

impl<P: Deref<Target = Bgr>> From<Swapped<P>> for Rgb {
    fn from(pixel: Swapped<P>) -> Self {
        pixel.get()
    }
}

impl<P: Deref<Target = Bgr>> PartialEq<Rgb> for Swapped<P> {
    fn eq(&self, other: &Rgb) -> bool {
        self.get() == *other
    }
}

impl<P: Deref<Target = Bgr>> fmt::Debug for Swapped<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Swapped").field(&self.get()).finish()
    }
}

#[test]
fn every_value_round_trips() {
    let mut sample = Bgr::default();

    for r in 0..=255u8 {
        for g in [0u8, 1, 0x7f, 0x80, 0xfe, 0xff] {
            for b in [0u8, 1, 0x55, 0xaa, 0xff, r] {
                let color = Rgb::new(r, g, b);
                let mut pixel = Swapped::new(&mut sample);
                pixel.set(color);
                assert_eq!(pixel.get(), color);
                assert_eq!(sample, Bgr::new(b, g, r));
            }
        }
    }
}

#[test]
fn update_in_place() {
    let mut sample = Bgr::new(1, 2, 3);
    Swapped::new(&mut sample).update(|Rgb { r, g, b }| Rgb::new(b, g, r));
    assert_eq!(sample, Bgr::new(3, 2, 1));

    let read = Swapped::new(&sample);
    assert_eq!(read, Rgb::new(1, 2, 3));
    assert_eq!(Rgb::from(read), Rgb::new(1, 2, 3));
}
