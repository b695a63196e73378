//! 起動時の構成（コマンドライン引数と検証）

use std::path::PathBuf;

use clap::Parser;

use crate::common::constants::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_HEIGHT, MAX_ITER, MAX_WIDTH, PAN_DEAD_ZONE, PAN_SCALE,
};
use crate::common::mandelbrot::NumericStrategy;
use crate::common::viewport::{Viewport, ViewportTuning};
use crate::error::ConfigError;
use crate::render::ExecutionStrategy;

/// エンジン構成（実行中は変更しない）
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub max_iterations: u32,
    pub numeric: NumericStrategy,
    pub execution: ExecutionStrategy,
    pub initial_viewport: Viewport,
    pub tuning: ViewportTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: MAX_ITER,
            numeric: NumericStrategy::default(),
            execution: ExecutionStrategy::default(),
            initial_viewport: Viewport::default(),
            tuning: ViewportTuning::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(ConfigError::ResolutionTooLarge {
                width: self.width,
                height: self.height,
                max_width: MAX_WIDTH,
                max_height: MAX_HEIGHT,
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        let zoom = self.initial_viewport.zoom;
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(ConfigError::InvalidZoom(zoom));
        }
        if self.execution == ExecutionStrategy::Gpu && self.numeric == NumericStrategy::Fixed {
            return Err(ConfigError::GpuFixedPoint);
        }
        Ok(())
    }
}

/// コマンドライン引数
#[derive(Parser, Debug, Clone)]
#[command(name = "mandelbrot-live", version, about = "コントローラ操作のマンデルブロ集合ビューア")]
pub struct Args {
    /// 描画幅（ピクセル）
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// 描画高さ（ピクセル）
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// 最大反復回数
    #[arg(long = "max-iter", default_value_t = MAX_ITER)]
    pub max_iter: u32,

    /// 数値表現
    #[arg(long, value_enum, default_value_t = NumericStrategy::Float)]
    pub numeric: NumericStrategy,

    /// 実行方式
    #[arg(long, value_enum, default_value_t = ExecutionStrategy::Parallel)]
    pub backend: ExecutionStrategy,

    /// 初期中心（実部）
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset_x: f64,

    /// 初期中心（虚部, 下向きが正）
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset_y: f64,

    /// 初期ズーム（中心から端までの距離）
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub zoom: f64,

    /// パン速度
    #[arg(long, default_value_t = PAN_SCALE)]
    pub pan_scale: f64,

    /// パン軸の不感帯（軸の生値）
    #[arg(long, default_value_t = PAN_DEAD_ZONE)]
    pub dead_zone: i16,

    /// 指定するとウィンドウを開かずに1フレームだけ描画して PNG に保存する
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Args {
    /// 検証済みの構成に変換する
    pub fn to_config(&self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            width: self.width,
            height: self.height,
            max_iterations: self.max_iter,
            numeric: self.numeric,
            execution: self.backend,
            initial_viewport: Viewport::new(self.offset_x, self.offset_y, self.zoom),
            tuning: ViewportTuning {
                pan_scale: self.pan_scale,
                dead_zone: self.dead_zone,
                ..ViewportTuning::default()
            },
        };
        config.validate()?;
        Ok(config)
    }
}
