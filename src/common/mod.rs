//! 描画エンジンの数値部品（座標変換・反復計算・配色）

pub mod colors;
pub mod constants;
pub mod mandelbrot;
pub mod normalize;
pub mod viewport;
