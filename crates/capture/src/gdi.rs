//! Screen rectangle grab using GDI

use crate::{CaptureError, CaptureResult, FrameData, Rect, ScreenGrabber};
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
    GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
    SRCCOPY,
};

/// Copies screen pixels through a memory DC
#[derive(Debug, Default, Clone, Copy)]
pub struct GdiGrabber;

impl ScreenGrabber for GdiGrabber {
    fn grab(&self, rect: Rect) -> CaptureResult<FrameData> {
        if rect.is_empty() {
            return Err(CaptureError::EmptyRegion(rect.width, rect.height));
        }

        let width = rect.width as i32;
        let height = rect.height as i32;

        unsafe {
            let screen_dc = GetDC(None);
            if screen_dc.is_invalid() {
                return Err(CaptureError::Grab("Failed to get screen DC".into()));
            }

            let mem_dc = CreateCompatibleDC(screen_dc);
            let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
            let old_bitmap = SelectObject(mem_dc, bitmap);

            let blit = BitBlt(mem_dc, 0, 0, width, height, screen_dc, rect.x, rect.y, SRCCOPY);

            let mut bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height, // Top-down DIB
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    biSizeImage: 0,
                    biXPelsPerMeter: 0,
                    biYPelsPerMeter: 0,
                    biClrUsed: 0,
                    biClrImportant: 0,
                },
                bmiColors: [Default::default()],
            };

            let mut data = vec![0u8; rect.width as usize * rect.height as usize * 4];
            let lines = if blit.is_ok() {
                GetDIBits(
                    mem_dc,
                    bitmap,
                    0,
                    rect.height,
                    Some(data.as_mut_ptr() as *mut _),
                    &mut bmi,
                    DIB_RGB_COLORS,
                )
            } else {
                0
            };

            // Cleanup before reporting any failure
            SelectObject(mem_dc, old_bitmap);
            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(mem_dc);
            ReleaseDC(None, screen_dc);

            blit?;
            if lines != height {
                return Err(CaptureError::Grab(format!(
                    "GetDIBits copied {} of {} lines",
                    lines, height
                )));
            }

            // BitBlt leaves the alpha byte zeroed
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }

            log::debug!("GDI grab {}x{} at ({}, {})", rect.width, rect.height, rect.x, rect.y);
            FrameData::from_bgra(rect.width, rect.height, data)
        }
    }
}
