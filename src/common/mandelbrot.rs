//! マンデルブロ集合計算関数
//!
//! ピクセル→複素平面の変換と、脱出時間（反復回数）の計算。
//! 反復計算は f64 版と固定小数点版の2実装を `EscapeTime` で切り替える。

use std::ops::{Add, Mul, Sub};

use clap::ValueEnum;
use num_complex::Complex;

use super::constants::ESCAPE_RADIUS_SQR;
use super::normalize::normalize;
use super::viewport::Viewport;

/// 複素平面上の点
pub type ComplexPoint = Complex<f64>;

/// ピクセル (row, col) を複素平面上の点に変換する
///
/// row 0 が上端。虚軸は数学の慣例とは上下反転する。
#[inline]
pub fn map_pixel(row: usize, col: usize, width: usize, height: usize, vp: &Viewport) -> ComplexPoint {
    let im = normalize(row as f64, 0.0, height as f64, -vp.zoom, vp.zoom) + vp.offset_y;
    let re = normalize(col as f64, 0.0, width as f64, -vp.zoom, vp.zoom) + vp.offset_x;
    Complex::new(re, im)
}

/// 脱出時間の計算方式
pub trait EscapeTime: Send + Sync {
    /// `c` の軌道が半径2を超えるまでの反復回数（最大 `max_iter`）
    fn iterate(&self, c: ComplexPoint, max_iter: u32) -> u32;
}

/// 数値表現の選択
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NumericStrategy {
    /// f64 浮動小数点
    #[default]
    Float,
    /// 64bit 固定小数点 (2^30 スケール)
    Fixed,
}

impl std::fmt::Display for NumericStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericStrategy::Float => write!(f, "f64"),
            NumericStrategy::Fixed => write!(f, "fixed Q30"),
        }
    }
}

/// f64 版（基準実装）
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatEscape;

impl EscapeTime for FloatEscape {
    #[inline]
    fn iterate(&self, c: ComplexPoint, max_iter: u32) -> u32 {
        let mut zr = 0.0;
        let mut zi = 0.0;
        let mut zr2 = 0.0;
        let mut zi2 = 0.0;
        let mut n = 0;

        while zr2 + zi2 < ESCAPE_RADIUS_SQR && n < max_iter {
            // zi は更新前の zr を使う
            zi = 2.0 * zr * zi + c.im;
            zr = zr2 - zi2 + c.re;
            zr2 = zr * zr;
            zi2 = zi * zi;
            n += 1;
        }
        n
    }
}

/// Q33.30 の固定小数点数
///
/// 演算は全て飽和する。乗算は64bit積を飽和させてから30bit右シフトするので、
/// 積がオーバーフローする大きさ（実数で 8 以上）は脱出半径を超えた値として扱われる。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed(i64);

impl Fixed {
    pub const FRAC_BITS: u32 = 30;
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(1 << Self::FRAC_BITS);
    pub const FOUR: Fixed = Fixed(4 << Self::FRAC_BITS);

    const SCALE: f64 = (1u64 << Self::FRAC_BITS) as f64;

    /// 最も近い表現値に丸める（範囲外は飽和, NaN は 0）
    pub fn from_f64(value: f64) -> Self {
        Fixed((value * Self::SCALE).round() as i64)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }

    #[inline]
    pub fn double(self) -> Self {
        Fixed(self.0.saturating_mul(2))
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    #[inline]
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_mul(rhs.0) >> Self::FRAC_BITS)
    }
}

/// 固定小数点版
///
/// 浮動小数点が弱い（またはエミュレーションの）計算環境向け。
/// 量子化誤差のため境界付近では f64 版と ±1 程度ずれる。
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedEscape;

impl EscapeTime for FixedEscape {
    #[inline]
    fn iterate(&self, c: ComplexPoint, max_iter: u32) -> u32 {
        let re = Fixed::from_f64(c.re);
        let im = Fixed::from_f64(c.im);

        let mut zr = Fixed::ZERO;
        let mut zi = Fixed::ZERO;
        let mut zr2 = Fixed::ZERO;
        let mut zi2 = Fixed::ZERO;
        let mut n = 0;

        while zr2 + zi2 < Fixed::FOUR && n < max_iter {
            zi = (zr * zi).double() + im;
            zr = zr2 - zi2 + re;
            zr2 = zr * zr;
            zi2 = zi * zi;
            n += 1;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// `z = z*z + c` をそのまま書いた比較用の実装
    fn naive_iter(c: ComplexPoint, max_iter: u32) -> u32 {
        let mut z = Complex::new(0.0, 0.0);
        for i in 0..max_iter {
            if z.norm_sqr() >= 4.0 {
                return i;
            }
            z = z * z + c;
        }
        max_iter
    }

    #[test]
    fn center_pixel_maps_to_origin() {
        let vp = Viewport::default();
        let c = map_pixel(240, 320, 640, 480, &vp);
        assert_eq!(c, Complex::new(0.0, 0.0));
    }

    #[test]
    fn top_left_pixel_maps_to_corner() {
        let vp = Viewport::new(0.5, -0.25, 2.0);
        let c = map_pixel(0, 0, 4, 4, &vp);
        assert_eq!(c, Complex::new(-1.5, -2.25));
    }

    #[test]
    fn rows_increase_imaginary_part() {
        let vp = Viewport::default();
        let top = map_pixel(0, 5, 10, 10, &vp);
        let bottom = map_pixel(9, 5, 10, 10, &vp);
        assert!(top.im < bottom.im);
    }

    #[test]
    fn wider_zoom_moves_edges_outward() {
        let narrow = Viewport::new(-0.5, 0.1, 0.5);
        let wide = Viewport { zoom: 1.5, ..narrow };
        let center = Complex::new(narrow.offset_x, narrow.offset_y);
        for &(row, col) in &[(0, 0), (0, 63), (47, 0), (47, 63), (10, 20)] {
            let a = (map_pixel(row, col, 64, 48, &narrow) - center).norm();
            let b = (map_pixel(row, col, 64, 48, &wide) - center).norm();
            assert!(b > a, "({row}, {col})");
        }
    }

    #[test]
    fn origin_never_escapes() {
        let origin = Complex::new(0.0, 0.0);
        for max_iter in [1, 50, 256, 800] {
            assert_eq!(FloatEscape.iterate(origin, max_iter), max_iter);
            assert_eq!(FixedEscape.iterate(origin, max_iter), max_iter);
        }
    }

    #[test]
    fn far_point_escapes_immediately() {
        let c = Complex::new(-2.0, -2.0);
        assert_eq!(FloatEscape.iterate(c, 50), 1);
        assert_eq!(FixedEscape.iterate(c, 50), 1);
    }

    #[test]
    fn zero_budget_returns_zero() {
        assert_eq!(FloatEscape.iterate(Complex::new(0.3, 0.2), 0), 0);
        assert_eq!(FixedEscape.iterate(Complex::new(0.3, 0.2), 0), 0);
    }

    #[test]
    fn float_matches_plain_complex_recurrence() {
        for y in 0..30 {
            for x in 0..40 {
                let c = Complex::new(-2.2 + x as f64 * 0.08, -1.3 + y as f64 * 0.09);
                assert_eq!(FloatEscape.iterate(c, 200), naive_iter(c, 200), "{c}");
            }
        }
    }

    #[test]
    fn fixed_tracks_float_near_escape_radius() {
        for &radius in &[1.999, 2.0, 2.001, 2.05] {
            for k in 0..8 {
                // 実軸負側 (θ = π) はカオス的なので除く
                if k == 4 {
                    continue;
                }
                let theta = k as f64 * PI / 4.0;
                let c = Complex::from_polar(radius, theta);
                let a = FloatEscape.iterate(c, 256);
                let b = FixedEscape.iterate(c, 256);
                assert!(a.abs_diff(b) <= 1, "{c}: float={a} fixed={b}");
            }
        }
    }

    #[test]
    fn fixed_mostly_agrees_over_the_plane() {
        let mut close = 0;
        let mut total = 0;
        for y in 0..40 {
            for x in 0..40 {
                let c = Complex::new(-2.0 + x as f64 * 0.075, -1.5 + y as f64 * 0.075);
                let a = FloatEscape.iterate(c, 64);
                let b = FixedEscape.iterate(c, 64);
                total += 1;
                if a.abs_diff(b) <= 1 {
                    close += 1;
                }
            }
        }
        assert!(close * 100 >= total * 95, "{close}/{total}");
    }

    #[test]
    fn fixed_arithmetic_basics() {
        let a = Fixed::from_f64(1.5);
        let b = Fixed::from_f64(-0.25);
        assert_eq!((a * b).to_f64(), -0.375);
        assert_eq!((a + b).to_f64(), 1.25);
        assert_eq!((a - b).to_f64(), 1.75);
        assert_eq!(a.double().to_f64(), 3.0);
        assert_eq!(Fixed::ONE.to_f64(), 1.0);
        assert_eq!(Fixed::FOUR.to_f64(), 4.0);
    }

    #[test]
    fn fixed_multiplication_saturates_instead_of_wrapping() {
        let big = Fixed::from_f64(1.0e6);
        assert!(big * big > Fixed::FOUR);
        let neg = Fixed::from_f64(-1.0e6);
        assert!(big * neg < Fixed::ZERO);
    }

    #[test]
    fn huge_offsets_still_escape() {
        let c = Complex::new(1.0e12, -3.0e15);
        assert_eq!(FixedEscape.iterate(c, 100), 1);
        assert_eq!(FloatEscape.iterate(c, 100), 1);
    }
}
