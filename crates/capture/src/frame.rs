//! Captured pixel buffer

use crate::{CaptureError, CaptureResult, Rect};
use image::{ImageBuffer, RgbaImage};

/// RGBA8 pixels of a captured rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameData {
    /// Wrap an RGBA buffer, checking its length against the dimensions
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> CaptureResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CaptureError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { data, width, height })
    }

    /// Wrap a BGRA buffer (GDI order), converting it to RGBA in place
    pub fn from_bgra(width: u32, height: u32, mut data: Vec<u8>) -> CaptureResult<Self> {
        for chunk in data.chunks_exact_mut(4) {
            chunk.swap(0, 2);
        }
        Self::from_rgba(width, height, data)
    }

    pub fn into_rgba_image(self) -> CaptureResult<RgbaImage> {
        let actual = self.data.len();
        ImageBuffer::from_raw(self.width, self.height, self.data).ok_or(
            CaptureError::InvalidBuffer {
                expected: self.width as usize * self.height as usize * 4,
                actual,
            },
        )
    }

    /// Opaque black frame
    pub fn blank(width: u32, height: u32) -> Self {
        let data = [0, 0, 0, 255].repeat(width as usize * height as usize);
        Self { data, width, height }
    }

    /// Copy `src` into this frame with its top-left corner at (`x`, `y`).
    ///
    /// Pixels of `src` that land outside this frame are dropped.
    pub fn paste(&mut self, src: &FrameData, x: i32, y: i32) {
        let dst = Rect::new(0, 0, self.width, self.height);
        let Some(overlap) = dst.intersection(&Rect::new(x, y, src.width, src.height)) else {
            return;
        };

        let row_len = overlap.width as usize * 4;
        for row in 0..overlap.height as i32 {
            let dst_y = overlap.y + row;
            let src_y = dst_y - y;
            let dst_offset = (dst_y as usize * self.width as usize + overlap.x as usize) * 4;
            let src_offset = (src_y as usize * src.width as usize + (overlap.x - x) as usize) * 4;
            self.data[dst_offset..dst_offset + row_len]
                .copy_from_slice(&src.data[src_offset..src_offset + row_len]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x3 frame where each pixel's red channel is its index
    fn numbered_frame() -> FrameData {
        let data = (0..12u8).flat_map(|i| [i, 0, 0, 255]).collect();
        FrameData::from_rgba(4, 3, data).unwrap()
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        let err = FrameData::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::InvalidBuffer { expected: 16, actual: 15 }
        ));
    }

    #[test]
    fn bgra_is_swapped_to_rgba() {
        let frame = FrameData::from_bgra(1, 1, vec![10, 20, 30, 255]).unwrap();
        assert_eq!(frame.data, vec![30, 20, 10, 255]);
    }

    fn reds(frame: &FrameData) -> Vec<u8> {
        frame.data.chunks_exact(4).map(|p| p[0]).collect()
    }

    #[test]
    fn blank_is_opaque_black() {
        let frame = FrameData::blank(2, 1);
        assert_eq!(frame.data, vec![0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn paste_picks_inner_block() {
        // Region (1,1) 2x2 of the source, as a grab would request it
        let mut out = FrameData::blank(2, 2);
        out.paste(&numbered_frame(), -1, -1);
        assert_eq!(reds(&out), vec![5, 6, 9, 10]);
    }

    #[test]
    fn paste_pads_off_edge_region_with_black() {
        // Region starting 2 px left of and 1 px above the source
        let mut out = FrameData::blank(4, 3);
        out.paste(&numbered_frame(), 2, 1);

        assert_eq!((out.width, out.height), (4, 3));
        assert_eq!(reds(&out), vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 4, 5]);
        assert!(out.data.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn paste_from_two_sources_fills_side_by_side() {
        let left = FrameData::from_rgba(1, 1, vec![7, 0, 0, 255]).unwrap();
        let right = FrameData::from_rgba(1, 1, vec![9, 0, 0, 255]).unwrap();

        let mut out = FrameData::blank(2, 1);
        out.paste(&left, 0, 0);
        out.paste(&right, 1, 0);
        assert_eq!(reds(&out), vec![7, 9]);
    }

    #[test]
    fn paste_outside_frame_is_noop() {
        let mut out = FrameData::blank(2, 2);
        out.paste(&numbered_frame(), 5, 5);
        assert_eq!(out, FrameData::blank(2, 2));
    }

    #[test]
    fn converts_to_image() {
        let img = numbered_frame().into_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(1, 2).0, [9, 0, 0, 255]);
    }
}
