//! Frame to tensor conversion.

use gpuprobe_core::{Frame, PixelLayout};

/// Resize `frame` (nearest neighbour) to `width`x`height` and lay it out as
/// planar RGB `f32` in `[0, 1]`, ready for a `[1, 3, height, width]` tensor.
pub fn to_nchw(frame: &Frame, width: u32, height: u32) -> Vec<f32> {
    let (dst_w, dst_h) = (width as usize, height as usize);
    let (src_w, src_h) = (frame.width(), frame.height());
    let plane = dst_w * dst_h;
    let channel_order: [usize; 3] = match frame.layout() {
        PixelLayout::Rgb => [0, 1, 2],
        PixelLayout::Bgr => [2, 1, 0],
    };

    let mut tensor = vec![0.0_f32; plane * 3];
    for y in 0..height {
        let src_y = scale(y, src_h, height);
        for x in 0..width {
            let src_x = scale(x, src_w, width);
            let pixel = frame.pixel(src_x, src_y).unwrap_or_default();
            let dst = y as usize * dst_w + x as usize;
            for (channel, &offset) in channel_order.iter().enumerate() {
                tensor[channel * plane + dst] = f32::from(pixel[offset]) / 255.0;
            }
        }
    }
    tensor
}

/// Nearest source coordinate for `dst` when mapping `dst_len` onto `src_len`.
#[allow(clippy::cast_possible_truncation)]
const fn scale(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    (dst as u64 * src_len as u64 / dst_len as u64) as u32
}
