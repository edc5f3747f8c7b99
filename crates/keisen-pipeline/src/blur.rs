//! Gaussian smoothing for noise reduction before edge enhancement.
//!
//! Screenshots carry dithering and anti-aliasing artifacts that would
//! otherwise survive the Laplacian as spurious foreground pixels. A
//! single normalized 3x3 pass is enough at screenshot resolutions.

use image::GrayImage;

use crate::convolve::{Kernel, convolve_3x3};

/// Normalized Gaussian-like smoothing kernel.
///
/// Weights sum to 1 (center 4/16, edge-adjacent 2/16, corner 1/16), so
/// interior sums stay within the 8-bit range and are truncated rather
/// than clamped.
pub const GAUSSIAN: Kernel = Kernel {
    weights: [
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
        [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    ],
    clamp: false,
};

/// Apply the smoothing pass.
///
/// This is the first pipeline stage. The input is read-only; the border
/// ring of the output equals the input's border ring.
#[must_use = "returns the smoothed image"]
pub fn smooth(image: &GrayImage) -> GrayImage {
    convolve_3x3(image, &GAUSSIAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_weights_sum_to_one() {
        let sum: f32 = GAUSSIAN.weights.iter().flatten().sum();
        assert!((sum - 1.0).abs() < 1e-6, "kernel sum {sum} != 1");
    }

    #[test]
    fn uniform_image_unchanged_by_smoothing() {
        // Normalization means a uniform image maps to itself exactly,
        // interior and border alike.
        let img = GrayImage::from_fn(12, 9, |_, _| image::Luma([128]));
        let smoothed = smooth(&img);
        assert_eq!(img, smoothed);
    }

    #[test]
    fn output_dimensions_preserved() {
        let img = GrayImage::new(17, 31);
        let smoothed = smooth(&img);
        assert_eq!(smoothed.width(), 17);
        assert_eq!(smoothed.height(), 31);
    }

    #[test]
    fn smoothing_softens_sharp_boundary() {
        // Left half black, right half white: the columns flanking the
        // boundary should take intermediate values.
        let img = GrayImage::from_fn(10, 10, |x, _y| {
            if x < 5 { image::Luma([0]) } else { image::Luma([255]) }
        });
        let smoothed = smooth(&img);

        let left_of_edge = smoothed.get_pixel(4, 5).0[0];
        let right_of_edge = smoothed.get_pixel(5, 5).0[0];
        assert!(
            left_of_edge > 0,
            "expected smoothing to raise left-of-edge above 0, got {left_of_edge}",
        );
        assert!(
            right_of_edge < 255,
            "expected smoothing to lower right-of-edge below 255, got {right_of_edge}",
        );
    }

    #[test]
    fn isolated_bright_pixel_spreads_truncated() {
        // A 255 dot contributes 255 * 4/16 = 63.75 at its own position,
        // truncated to 63; 2/16 -> 31 at edge neighbors; 1/16 -> 15 at
        // corner neighbors.
        let mut img = GrayImage::new(7, 7);
        img.put_pixel(3, 3, image::Luma([255]));
        let smoothed = smooth(&img);

        assert_eq!(smoothed.get_pixel(3, 3).0[0], 63);
        assert_eq!(smoothed.get_pixel(2, 3).0[0], 31);
        assert_eq!(smoothed.get_pixel(3, 2).0[0], 31);
        assert_eq!(smoothed.get_pixel(2, 2).0[0], 15);
        assert_eq!(smoothed.get_pixel(4, 4).0[0], 15);
        assert_eq!(smoothed.get_pixel(5, 3).0[0], 0);
    }
}
