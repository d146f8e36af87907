use serde::{Deserialize, Serialize};

/// Pixel-aligned rectangle inside a raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelBounds {
    /// Grows the bounds by `pad` pixels on each side, clamped to the surface.
    #[must_use]
    pub fn padded(self, pad: u32, surface_width: u32, surface_height: u32) -> Self {
        let x = self.x.saturating_sub(pad);
        let y = self.y.saturating_sub(pad);
        let right = self
            .x
            .saturating_add(self.width)
            .saturating_add(pad)
            .min(surface_width);
        let bottom = self
            .y
            .saturating_add(self.height)
            .saturating_add(pad)
            .min(surface_height);
        Self {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

/// Smallest rectangle containing every pixel that differs from `background`.
///
/// `data` holds native-endian 32-bit pixels in rows of `stride` bytes.
/// Returns `None` when the surface is blank or the buffer is too short.
#[must_use]
pub fn content_bounds(
    data: &[u8],
    stride: usize,
    width: u32,
    height: u32,
    background: u32,
) -> Option<PixelBounds> {
    let row_bytes = width as usize * 4;
    if stride < row_bytes || data.len() < stride * height as usize {
        return None;
    }

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for y in 0..height {
        let row_start = y as usize * stride;
        let row = &data[row_start..row_start + row_bytes];
        for (x, pixel) in row.chunks_exact(4).enumerate() {
            let value = u32::from_ne_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);
            if value == background {
                continue;
            }
            let x = x as u32;
            found = true;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    found.then(|| PixelBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::{PixelBounds, content_bounds};

    const WHITE: u32 = 0xffff_ffff;
    const BLACK: u32 = 0xff00_0000;

    fn surface(width: u32, height: u32, stride: usize, ink: &[(u32, u32)]) -> Vec<u8> {
        let mut data = vec![0u8; stride * height as usize];
        for y in 0..height {
            for x in 0..width {
                let value = if ink.contains(&(x, y)) { BLACK } else { WHITE };
                let offset = y as usize * stride + x as usize * 4;
                data[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
            }
        }
        data
    }

    #[test]
    fn blank_surface_has_no_content() {
        let data = surface(8, 6, 32, &[]);
        assert_eq!(content_bounds(&data, 32, 8, 6, WHITE), None);
    }

    #[test]
    fn bounds_cover_all_ink_pixels() {
        let data = surface(8, 6, 40, &[(2, 1), (5, 4)]);
        assert_eq!(
            content_bounds(&data, 40, 8, 6, WHITE),
            Some(PixelBounds {
                x: 2,
                y: 1,
                width: 4,
                height: 4,
            })
        );
    }

    #[test]
    fn stride_padding_is_ignored() {
        let mut data = surface(4, 2, 24, &[]);
        // Garbage in the padding bytes past the last pixel of each row.
        data[16..24].fill(0x11);
        assert_eq!(content_bounds(&data, 24, 4, 2, WHITE), None);
    }

    #[test]
    fn padding_is_clamped_to_surface() {
        let bounds = PixelBounds {
            x: 3,
            y: 0,
            width: 10,
            height: 5,
        };
        assert_eq!(
            bounds.padded(5, 15, 8),
            PixelBounds {
                x: 0,
                y: 0,
                width: 15,
                height: 8,
            }
        );
    }
}
