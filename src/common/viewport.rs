//! ビューポート（表示中心とズーム）とコントローラ入力

use super::constants::{
    AXIS_MAX, AXIS_MIN, AXIS_PAN_X, AXIS_PAN_Y, AXIS_ZOOM_IN, AXIS_ZOOM_OUT, MIN_ZOOM,
    PAN_DEAD_ZONE, PAN_SCALE, ZOOM_FACTOR_MAX, ZOOM_FACTOR_MIN,
};
use super::normalize::normalize;

/// 1フレーム分のコントローラ軸の値（ネイティブ範囲の生値）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerInputFrame {
    pub pan_x: i16,
    pub pan_y: i16,
    pub zoom_in: i16,
    pub zoom_out: i16,
}

impl ControllerInputFrame {
    /// 軸番号順の配列から組み立てる（存在しない軸は 0）
    pub fn from_axes(axes: &[i16]) -> Self {
        let axis = |i: usize| axes.get(i).copied().unwrap_or(0);
        Self {
            pan_x: axis(AXIS_PAN_X),
            pan_y: axis(AXIS_PAN_Y),
            zoom_in: axis(AXIS_ZOOM_IN),
            zoom_out: axis(AXIS_ZOOM_OUT),
        }
    }
}

/// 入力→ビューポート変換の調整値
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTuning {
    pub pan_scale: f64,
    /// パン軸の不感帯（生値, 絶対値がこれ未満なら無視）
    pub dead_zone: i16,
    pub min_zoom: f64,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            pan_scale: PAN_SCALE,
            dead_zone: PAN_DEAD_ZONE,
            min_zoom: MIN_ZOOM,
        }
    }
}

/// 表示中の複素平面の領域
///
/// `zoom` は中心から上下左右の端までの距離（半幅）。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }
}

fn axis_unit(raw: i16) -> f64 {
    normalize(raw as f64, AXIS_MIN, AXIS_MAX, -1.0, 1.0)
}

fn trigger_factor(raw: i16) -> f64 {
    normalize(raw as f64, AXIS_MIN, AXIS_MAX, ZOOM_FACTOR_MIN, ZOOM_FACTOR_MAX)
}

impl Viewport {
    pub fn new(offset_x: f64, offset_y: f64, zoom: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            zoom,
        }
    }

    /// 1フレーム分の入力を反映する
    ///
    /// パン量は現在のズームに比例する。ズームアウト側トリガーは倍率を掛け、
    /// ズームイン側は割る。両方離した状態ではほぼ打ち消し合う。
    pub fn update(&mut self, input: ControllerInputFrame, tuning: &ViewportTuning) {
        let step = tuning.pan_scale * self.zoom;
        if input.pan_x.unsigned_abs() >= tuning.dead_zone.unsigned_abs() {
            self.offset_x += axis_unit(input.pan_x) * step;
        }
        if input.pan_y.unsigned_abs() >= tuning.dead_zone.unsigned_abs() {
            self.offset_y += axis_unit(input.pan_y) * step;
        }

        self.zoom *= trigger_factor(input.zoom_out);
        self.zoom /= trigger_factor(input.zoom_in);
        if !(self.zoom >= tuning.min_zoom) {
            self.zoom = tuning.min_zoom;
        }
    }

    /// 描画範囲 `(re_min, re_max, im_min, im_max)`
    ///
    /// 幅・高さに関わらず両軸とも `[-zoom, zoom]`（非正方形のウィンドウでは縦横比が歪む）。
    pub fn plane_bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.offset_x - self.zoom,
            self.offset_x + self.zoom,
            self.offset_y - self.zoom,
            self.offset_y + self.zoom,
        )
    }
}
