/// A decoded RGBA8 pixel buffer, row-major with no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            anyhow::bail!("image has no pixels ({width}x{height})");
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            anyhow::bail!(
                "image buffer is {} bytes, expected {expected} for {width}x{height} RGBA",
                pixels.len()
            );
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image where every pixel is produced by `f(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> anyhow::Result<Self> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, clamped to the image edges.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::Image;

    #[test]
    fn rejects_wrong_length() {
        assert!(Image::new(2, 2, vec![0; 15]).is_err());
        assert!(Image::new(0, 2, vec![]).is_err());
    }

    #[test]
    fn pixel_lookup_clamps() {
        let img = Image::from_fn(2, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(img.pixel(1, 0), [1, 0, 0, 255]);
        assert_eq!(img.pixel(9, 9), [1, 1, 0, 255]);
    }
}
