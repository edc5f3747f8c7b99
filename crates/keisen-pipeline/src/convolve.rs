//! 3x3 convolution engine shared by the smoothing and edge-enhancement
//! passes.
//!
//! Operates on interior pixels only (`1 <= x < width-1`,
//! `1 <= y < height-1`); the outermost ring is copied through from the
//! input unchanged. No padding, wraparound, or reflection is performed,
//! so the kernel is never applied out of bounds.
//!
//! Images with a width or height of 2 or less have no interior pixels
//! and pass through as a plain copy.

use image::GrayImage;

/// A 3x3 convolution kernel with its output-range rule.
///
/// Kernels are immutable presets: see [`crate::blur::GAUSSIAN`] and the
/// Laplacian tables in [`crate::edge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    /// Row-major weights, `weights[ky][kx]` for the neighbor at
    /// `(x + kx - 1, y + ky - 1)`.
    pub weights: [[f32; 3]; 3],

    /// Whether the weighted sum is clamped to `[0, 255]` before storage.
    ///
    /// Normalized kernels (weights summing to 1) leave this off: their
    /// sums stay in range and are truncated toward zero. Signed kernels
    /// such as the Laplacians require it.
    pub clamp: bool,
}

/// Apply `kernel` to every interior pixel of `input`, producing a
/// same-size output buffer.
///
/// The input is not mutated; the output starts as a copy of the input,
/// which leaves the border ring bit-identical to the source. Each output
/// pixel depends only on the fixed 3x3 input neighborhood, so passes over
/// distinct pixels are independent.
#[must_use = "returns the filtered image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn convolve_3x3(input: &GrayImage, kernel: &Kernel) -> GrayImage {
    let mut output = input.clone();
    let (width, height) = (input.width(), input.height());
    if width <= 2 || height <= 2 {
        return output;
    }

    let src = input.as_raw();
    let w = width as usize;

    for y in 1..(height as usize - 1) {
        for x in 1..(w - 1) {
            let mut sum = 0.0f32;
            for (ky, row) in kernel.weights.iter().enumerate() {
                for (kx, weight) in row.iter().enumerate() {
                    let pixel = src[(y + ky - 1) * w + (x + kx - 1)];
                    sum += f32::from(pixel) * weight;
                }
            }
            if kernel.clamp {
                sum = sum.clamp(0.0, 255.0);
            }
            // Truncation toward zero; in range by normalization or by the
            // clamp above.
            output.put_pixel(x as u32, y as u32, image::Luma([sum as u8]));
        }
    }

    output
}
