//! マンデルブロ集合のリアルタイム描画エンジン
//!
//! コントローラ入力でビューポートを更新し、1フレーム分のRGBバッファを
//! 逐次 / Rayon並列 / GPU (wgpu) のいずれかで計算する。

pub mod common;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod snapshot;
