//! CPU framebuffer for offline rendering.

/// Row-major RGB float image, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "framebuffer dimensions must be positive"
        );
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn set(&mut self, x: u32, y: u32, color: [f32; 3]) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    pub fn get(&self, x: u32, y: u32) -> [f32; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Pack into tightly packed RGBA8 bytes, top row first, opaque alpha.
    /// Channels are clamped to [0, 1] before quantization.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            for channel in pixel {
                bytes.push((channel.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
            bytes.push(255);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_black() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.get(0, 0), [0.0; 3]);
        assert_eq!(fb.get(3, 2), [0.0; 3]);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set(2, 1, [0.25, 0.5, 0.75]);
        assert_eq!(fb.get(2, 1), [0.25, 0.5, 0.75]);
        assert_eq!(fb.get(1, 2), [0.0; 3]);
    }

    #[test]
    fn rgba8_packing_layout() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set(1, 0, [1.0, 0.5, 0.0]);
        let bytes = fb.to_rgba8();
        assert_eq!(bytes.len(), 2 * 2 * 4);

        // Pixel (1, 0) starts at byte 4 of the top row.
        assert_eq!(bytes[4], 255);
        assert_eq!(bytes[5], 128);
        assert_eq!(bytes[6], 0);
        assert_eq!(bytes[7], 255);
    }

    #[test]
    fn rgba8_clamps_out_of_range_channels() {
        let mut fb = Framebuffer::new(1, 1);
        fb.set(0, 0, [1.5, -0.25, 0.0]);
        let bytes = fb.to_rgba8();
        assert_eq!(&bytes[..4], &[255, 0, 0, 255]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_get_panics() {
        let fb = Framebuffer::new(2, 2);
        fb.get(2, 0);
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn zero_size_panics() {
        Framebuffer::new(0, 4);
    }
}
