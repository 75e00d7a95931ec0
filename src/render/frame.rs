use crate::foundation::core::{Canvas, PixelPos, Rgb8};

/// A rendered frame as opaque RGB8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRgb {
    /// A frame covering `canvas`, filled with `bg`.
    pub fn filled(canvas: Canvas, bg: Rgb8) -> Self {
        let mut data = vec![0u8; canvas.pixel_count() * 3];
        if bg != Rgb8::black() {
            for px in data.chunks_exact_mut(3) {
                px.copy_from_slice(&[bg.r, bg.g, bg.b]);
            }
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Canvas this frame covers.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Color at `pos`, or `None` off-canvas.
    pub fn pixel(&self, pos: PixelPos) -> Option<Rgb8> {
        let canvas = self.canvas();
        if !canvas.contains(pos) {
            return None;
        }
        let o = canvas.index_of(pos) * 3;
        Some(Rgb8::new(self.data[o], self.data[o + 1], self.data[o + 2]))
    }

    /// Overwrite the color at `pos`. Off-canvas writes are ignored.
    pub fn put(&mut self, pos: PixelPos, c: Rgb8) {
        let canvas = self.canvas();
        if !canvas.contains(pos) {
            return;
        }
        let o = canvas.index_of(pos) * 3;
        self.data[o..o + 3].copy_from_slice(&[c.r, c.g, c.b]);
    }
}
