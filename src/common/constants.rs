//! 共通定数

/// 描画バッファの最大幅
pub const MAX_WIDTH: usize = 1920;
/// 描画バッファの最大高さ
pub const MAX_HEIGHT: usize = 1080;
/// 描画バッファの容量（バイト, RGB 3バイト/ピクセル）
pub const MAX_BUFFER_BYTES: usize = MAX_WIDTH * MAX_HEIGHT * 3;

/// 既定の描画サイズ
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

/// 最大反復回数の既定値
pub const MAX_ITER: u32 = 256;

/// 脱出判定に使う |z|^2 の閾値（半径2）
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// コントローラ軸の値域（SDL等のネイティブ範囲）
pub const AXIS_MIN: f64 = i16::MIN as f64;
pub const AXIS_MAX: f64 = i16::MAX as f64;

/// 入力フレーム内の軸番号
pub const AXIS_PAN_X: usize = 0;
pub const AXIS_PAN_Y: usize = 1;
pub const AXIS_ZOOM_OUT: usize = 4;
pub const AXIS_ZOOM_IN: usize = 5;

/// パン速度（ズーム倍率に比例させる）
pub const PAN_SCALE: f64 = 0.08;

/// パン軸の不感帯（生値）。1 なら静止位置 0 だけを無視する
pub const PAN_DEAD_ZONE: i16 = 1;

/// トリガーを倍率に変換する範囲
pub const ZOOM_FACTOR_MIN: f64 = 0.1;
pub const ZOOM_FACTOR_MAX: f64 = 2.0;

/// ズームの下限（f64の分解能付近）
pub const MIN_ZOOM: f64 = 1e-13;
