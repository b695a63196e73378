//! CPU 版の描画
//!
//! `out` は `width * height * 3` バイト以上必要（不足すると panic する）。

use rayon::prelude::*;

use crate::common::colors::colorize;
use crate::common::mandelbrot::{map_pixel, EscapeTime};
use crate::common::viewport::Viewport;

/// 行→列の順に1ピクセルずつ計算する
pub fn render_sequential<E: EscapeTime>(
    width: usize,
    height: usize,
    vp: &Viewport,
    max_iter: u32,
    escape: &E,
    out: &mut [u8],
) {
    for row in 0..height {
        for col in 0..width {
            let c = map_pixel(row, col, width, height, vp);
            let n = escape.iterate(c, max_iter);
            let offset = row * width * 3 + col * 3;
            out[offset..offset + 3].copy_from_slice(&colorize(n, max_iter));
        }
    }
}

/// 1ピクセルを1ワークアイテムとして Rayon で並列計算する
///
/// 各ワークアイテムは通し番号から (row, col) を求め、自分の3バイトだけに書き込む。
pub fn render_parallel<E: EscapeTime>(
    width: usize,
    height: usize,
    vp: &Viewport,
    max_iter: u32,
    escape: &E,
    out: &mut [u8],
) {
    out[..width * height * 3]
        .par_chunks_exact_mut(3)
        .enumerate()
        .for_each(|(idx, pixel)| {
            let row = idx / width;
            let col = idx % width;
            let c = map_pixel(row, col, width, height, vp);
            let n = escape.iterate(c, max_iter);
            pixel.copy_from_slice(&colorize(n, max_iter));
        });
}

/// GPU から読み戻した反復回数を色に変換する
pub fn colorize_counts(counts: &[u32], max_iter: u32, out: &mut [u8]) {
    out.par_chunks_exact_mut(3)
        .zip(counts.par_iter())
        .for_each(|(pixel, &n)| pixel.copy_from_slice(&colorize(n.min(max_iter), max_iter)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::mandelbrot::{FixedEscape, FloatEscape};

    fn sequential<E: EscapeTime>(w: usize, h: usize, vp: &Viewport, max_iter: u32, e: &E) -> Vec<u8> {
        let mut buf = vec![0; w * h * 3];
        render_sequential(w, h, vp, max_iter, e, &mut buf);
        buf
    }

    fn parallel<E: EscapeTime>(w: usize, h: usize, vp: &Viewport, max_iter: u32, e: &E) -> Vec<u8> {
        let mut buf = vec![0; w * h * 3];
        render_parallel(w, h, vp, max_iter, e, &mut buf);
        buf
    }

    #[test]
    fn four_by_four_scenario() {
        let vp = Viewport::new(0.0, 0.0, 2.0);
        let buf = sequential(4, 4, &vp, 50, &FloatEscape);

        let corner = map_pixel(0, 0, 4, 4, &vp);
        assert_eq!((corner.re, corner.im), (-2.0, -2.0));
        assert!(FloatEscape.iterate(corner, 50) <= 5);
        assert_eq!(&buf[0..3], &colorize(1, 50));

        let center = map_pixel(2, 2, 4, 4, &vp);
        assert_eq!((center.re, center.im), (0.0, 0.0));
        assert_eq!(FloatEscape.iterate(center, 50), 50);
        let offset = 2 * 4 * 3 + 2 * 3;
        assert_eq!(&buf[offset..offset + 3], &[255, 255, 255]);
    }

    #[test]
    fn parallel_matches_sequential_bytes() {
        let vp = Viewport::new(-0.6, 0.05, 1.3);
        for &(w, h) in &[(1, 1), (7, 3), (64, 48), (33, 65)] {
            assert_eq!(
                sequential(w, h, &vp, 120, &FloatEscape),
                parallel(w, h, &vp, 120, &FloatEscape),
                "{w}x{h} float"
            );
            assert_eq!(
                sequential(w, h, &vp, 120, &FixedEscape),
                parallel(w, h, &vp, 120, &FixedEscape),
                "{w}x{h} fixed"
            );
        }
    }

    #[test]
    fn bytes_past_the_frame_are_untouched() {
        let vp = Viewport::default();
        let mut buf = vec![7u8; 5 * 4 * 3 + 9];
        render_parallel(5, 4, &vp, 30, &FloatEscape, &mut buf);
        assert!(buf[60..].iter().all(|&b| b == 7));
        render_sequential(5, 4, &vp, 30, &FloatEscape, &mut buf);
        assert!(buf[60..].iter().all(|&b| b == 7));
    }

    #[test]
    fn colorize_counts_clamps_overflowing_counts() {
        let mut buf = vec![0; 6];
        colorize_counts(&[0, 1000], 100, &mut buf);
        assert_eq!(&buf[..3], &[0, 0, 0]);
        assert_eq!(&buf[3..], &[255, 255, 255]);
    }
}
