//! Linear Framebuffer.
//!
//! An optional memory-mapped pixel buffer of `width * height` 32-bit pixels stored
//! row-major in big-endian order. Pixels are plain storage; the device also counts bus
//! pulses so a front end can poll for new frames.

use crate::soc::traits::Device;

/// Bytes per pixel.
const BYTES_PER_PIXEL: u32 = 4;

/// Framebuffer device structure.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    base_addr: u32,
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    frames: u64,
}

impl Framebuffer {
    /// Creates a cleared `width` x `height` framebuffer at `base_addr`.
    pub fn new(base_addr: u32, width: u32, height: u32) -> Self {
        Self {
            base_addr,
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            frames: 0,
        }
    }

    /// Dimensions as `(width, height)`.
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major pixel contents.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Number of bus pulses observed.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    fn pixel_mut(&mut self, offset: u32) -> Option<&mut u32> {
        self.pixels.get_mut((offset / BYTES_PER_PIXEL) as usize)
    }
}

impl Device for Framebuffer {
    fn name(&self) -> &str {
        "framebuffer"
    }

    fn address_range(&self) -> (u32, u32) {
        (
            self.base_addr,
            self.width
                .saturating_mul(self.height)
                .saturating_mul(BYTES_PER_PIXEL),
        )
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        let shift = 8 * (3 - offset % BYTES_PER_PIXEL);
        self.pixel_mut(offset).map_or(0, |p| (*p >> shift) as u8)
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        let shift = 8 * (3 - offset % BYTES_PER_PIXEL);
        if let Some(p) = self.pixel_mut(offset) {
            *p = (*p & !(0xFF << shift)) | (u32::from(val) << shift);
        }
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        self.pixel_mut(offset).map_or(0, |p| *p)
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        if let Some(p) = self.pixel_mut(offset) {
            *p = val;
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
    }
}
