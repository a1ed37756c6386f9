/// Read access to premultiplied RGBA8 pixels.
///
/// Implemented by both decoded images and intermediate composite surfaces,
/// so the compositor and the transition engine never care where pixels
/// came from.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Tightly packed premultiplied RGBA8, row-major, `width * height * 4` bytes.
    fn pixels(&self) -> &[u8];
}

/// Owned premultiplied RGBA8 pixel buffer, allocated transparent.
///
/// Used for composite slides, Stage-1 output and final frames. Surfaces are
/// created per render call and never shared across frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl PixelSource for Surface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.data
    }
}
