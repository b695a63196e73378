//! カラーマップと色変換関数

use super::normalize::normalize;

/// 反復回数から色を計算する
///
/// 黒→青→緑→黄→白 の4区間の線形グラデーション。
/// 発散しなかった点（`n == max_iter`）は白になる。
pub fn colorize(n: u32, max_iter: u32) -> [u8; 3] {
    let t = normalize(n as f64, 0.0, max_iter as f64, 0.0, 1.0);
    let ramp = |x: f64| (x * 4.0 * 255.0).round().clamp(0.0, 255.0) as u8;

    if t < 0.25 {
        [0, 0, ramp(t)]
    } else if t < 0.5 {
        [0, ramp(t - 0.25), 255]
    } else if t < 0.75 {
        let up = ramp(t - 0.5);
        [up, 255, 255 - up]
    } else {
        [255, 255, ramp(t - 0.75)]
    }
}

/// RGB を minifb 形式の u32 (0xRRGGBB) に詰める
#[inline]
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_channel_step(a: [u8; 3], b: [u8; 3]) -> u8 {
        a.iter().zip(b.iter()).map(|(x, y)| x.abs_diff(*y)).max().unwrap_or(0)
    }

    #[test]
    fn band_anchor_colors() {
        assert_eq!(colorize(0, 256), [0, 0, 0]);
        assert_eq!(colorize(64, 256), [0, 0, 255]);
        assert_eq!(colorize(128, 256), [0, 255, 255]);
        assert_eq!(colorize(192, 256), [255, 255, 0]);
        assert_eq!(colorize(256, 256), [255, 255, 255]);
    }

    #[test]
    fn interior_is_white() {
        assert_eq!(colorize(50, 50), [255, 255, 255]);
        assert_eq!(colorize(800, 800), [255, 255, 255]);
    }

    #[test]
    fn band_boundaries_are_continuous() {
        let max_iter = 10_000;
        for boundary in [2_500u32, 5_000, 7_500] {
            let below = colorize(boundary - 1, max_iter);
            let above = colorize(boundary + 1, max_iter);
            assert!(max_channel_step(below, above) <= 1, "{boundary}: {below:?} {above:?}");
        }
    }

    #[test]
    fn neighbouring_counts_change_gradually() {
        let max_iter = 1020;
        for n in 0..max_iter {
            let step = max_channel_step(colorize(n, max_iter), colorize(n + 1, max_iter));
            assert!(step <= 1, "n = {n}");
        }
    }

    #[test]
    fn pack_matches_minifb_layout() {
        assert_eq!(pack_rgb([0x12, 0x34, 0x56]), 0x123456);
        assert_eq!(pack_rgb(colorize(256, 256)), 0xFFFFFF);
    }
}
