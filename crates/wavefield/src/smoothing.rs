//! 3x3 binomial blur applied before surface reconstruction.

use rayon::prelude::*;

/// Binomial kernel, rows top to bottom. Sums to 16.
pub const BINOMIAL_KERNEL: [[f32; 3]; 3] = [
    [1.0, 2.0, 1.0],
    [2.0, 4.0, 2.0],
    [1.0, 2.0, 1.0],
];

/// Blur `input` into `output` with clamp-to-edge sampling.
///
/// Both slices are `width * height` long. Stateless: the output depends only
/// on each cell's 3x3 neighbourhood.
pub fn blur3x3(width: usize, height: usize, input: &[f32], output: &mut [f32]) {
    debug_assert_eq!(input.len(), width * height);
    debug_assert_eq!(output.len(), width * height);
    if width == 0 || height == 0 {
        return;
    }

    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for (ky, kernel_row) in BINOMIAL_KERNEL.iter().enumerate() {
                    let sy = (y + ky).saturating_sub(1).min(height - 1);
                    for (kx, weight) in kernel_row.iter().enumerate() {
                        let sx = (x + kx).saturating_sub(1).min(width - 1);
                        sum += weight * input[sy * width + sx];
                    }
                }
                *out = sum / 16.0;
            }
        });
}
