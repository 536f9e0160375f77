//! Fixed-size pixel buffers for the sensor outputs

use std::fmt::Debug;
use std::marker::PhantomData;

use ndarray::{Array3, ArrayView1, ArrayViewMut1, s};

/// Pixel format of an [`Image`]
pub trait PixelType {
    type Scalar: Copy + Default + PartialEq + Debug + Send + Sync + 'static;

    /// Channels per pixel
    const CHANNELS: usize;
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8U;

/// Depth in meters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth32F;

/// Depth in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth16U;

/// Per-pixel object label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label16I;

impl PixelType for Rgba8U {
    type Scalar = u8;
    const CHANNELS: usize = 4;
}

impl PixelType for Depth32F {
    type Scalar = f32;
    const CHANNELS: usize = 1;
}

impl PixelType for Depth16U {
    type Scalar = u16;
    const CHANNELS: usize = 1;
}

impl PixelType for Label16I {
    type Scalar = i16;
    const CHANNELS: usize = 1;
}

pub type ImageRgba8U = Image<Rgba8U>;
pub type ImageDepth32F = Image<Depth32F>;
pub type ImageDepth16U = Image<Depth16U>;
pub type ImageLabel16I = Image<Label16I>;

/// Depth values renderers conventionally report for pixels without a valid return
pub mod depth_sentinel {
    /// Surface closer than the minimum depth
    pub const TOO_CLOSE: f32 = 0.0;
    /// Surface beyond the maximum depth, or nothing hit
    pub const TOO_FAR: f32 = f32::INFINITY;
}

/// Label values renderers conventionally reserve
pub mod label_sentinel {
    pub const DONT_CARE: i16 = 32764;
    pub const UNSPECIFIED: i16 = 32765;
    /// No body covers the pixel
    pub const EMPTY: i16 = 32766;
    pub const DO_NOT_RENDER: i16 = 32767;
}

/// Image with shape (height, width, channels).
///
/// The size is fixed at construction; there is no resize.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<P: PixelType> {
    data: Array3<P::Scalar>,
    _pixel: PhantomData<P>,
}

impl<P: PixelType> Image<P> {
    /// Create a zero-filled image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array3::default((height, width, P::CHANNELS)),
            _pixel: PhantomData,
        }
    }

    /// Create an image with every channel of every pixel set to `value`
    pub fn filled(width: usize, height: usize, value: P::Scalar) -> Self {
        Self {
            data: Array3::from_elem((height, width, P::CHANNELS), value),
            _pixel: PhantomData,
        }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Get image dimensions (width, height)
    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn num_channels(&self) -> usize {
        P::CHANNELS
    }

    /// Channels of the pixel at column `x`, row `y`
    pub fn at(&self, x: usize, y: usize) -> Option<ArrayView1<'_, P::Scalar>> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data.slice(s![y, x, ..]))
    }

    pub fn at_mut(&mut self, x: usize, y: usize) -> Option<ArrayViewMut1<'_, P::Scalar>> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data.slice_mut(s![y, x, ..]))
    }

    /// First channel of the pixel at (`x`, `y`)
    pub fn value(&self, x: usize, y: usize) -> Option<P::Scalar> {
        self.data.get((y, x, 0)).copied()
    }

    /// Set every channel of every pixel to `value`
    pub fn fill(&mut self, value: P::Scalar) {
        self.data.fill(value);
    }

    /// True if every channel of every pixel equals `value`
    pub fn all_equal(&self, value: P::Scalar) -> bool {
        self.data.iter().all(|&v| v == value)
    }

    /// Raw buffer with shape (height, width, channels)
    pub fn data(&self) -> &Array3<P::Scalar> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array3<P::Scalar> {
        &mut self.data
    }
}

impl Image<Rgba8U> {
    /// Set every pixel to one RGBA color
    pub fn fill_rgba(&mut self, rgba: [u8; 4]) {
        for mut pixel in self.data.lanes_mut(ndarray::Axis(2)) {
            for (channel, value) in pixel.iter_mut().zip(rgba) {
                *channel = value;
            }
        }
    }

    pub fn rgba(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let pixel = self.at(x, y)?;
        Some([pixel[0], pixel[1], pixel[2], pixel[3]])
    }
}
