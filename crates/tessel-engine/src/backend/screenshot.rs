/// RGBA8 capture of the composite target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screenshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Screenshot {
    /// Wraps tightly packed RGBA8 rows.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "screenshot data must be width * height RGBA8 texels"
        );
        Self { width, height, data }
    }

    /// Fully transparent capture.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height, vec![0; width as usize * height as usize * 4])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_lookup_is_row_major() {
        let mut data = vec![0; 2 * 2 * 4];
        data[(2 + 1) * 4..(2 + 1) * 4 + 4].copy_from_slice(&[1, 2, 3, 4]);
        let shot = Screenshot::new(2, 2, data);
        assert_eq!(shot.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(shot.pixel(2, 0), None);
    }

    #[test]
    #[should_panic(expected = "RGBA8")]
    fn short_data_is_rejected() {
        Screenshot::new(4, 4, vec![0; 3]);
    }
}
