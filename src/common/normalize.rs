//! 値域の線形変換

/// `value` を `[in_min, in_max]` から `[out_min, out_max]` へアフィン変換する。
///
/// クランプは行わない。範囲外の入力は範囲外の出力になる。
/// 軸の正規化・ピクセル→複素平面・反復回数→グラデーション位置の全てに使う。
#[inline]
pub fn normalize(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}
