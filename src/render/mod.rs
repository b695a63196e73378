//! フレーム描画（全ピクセルの座標変換→反復計算→配色）
//!
//! 実行方式は3種類:
//!   - 逐次: 行→列の二重ループ（基準実装）
//!   - 並列: Rayon で1ピクセル1ワークアイテムに分割
//!   - GPU: wgpu コンピュートシェーダで1ピクセル1スレッド

pub mod cpu;
pub mod gpu;

use std::time::{Duration, Instant};

use clap::ValueEnum;
use log::debug;

use crate::common::constants::{MAX_BUFFER_BYTES, MAX_HEIGHT, MAX_WIDTH};
use crate::common::mandelbrot::{FixedEscape, FloatEscape, NumericStrategy};
use crate::common::viewport::Viewport;
use crate::config::EngineConfig;
use crate::error::{EngineError, RenderError};

use gpu::{GpuContext, GpuParams};

/// 実行方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExecutionStrategy {
    Sequential,
    #[default]
    Parallel,
    Gpu,
}

impl std::fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStrategy::Sequential => write!(f, "CPU 逐次"),
            ExecutionStrategy::Parallel => write!(f, "CPU 並列"),
            ExecutionStrategy::Gpu => write!(f, "GPU"),
        }
    }
}

/// 固定容量の RGB ピクセルバッファ（行優先, 左上原点, 3バイト/ピクセル）
///
/// 描画中は `Dispatcher` だけが書き込み、描画後は表示側が読み取り専用で参照する。
pub struct PixelGrid {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelGrid {
    /// 最大解像度 (`MAX_WIDTH` x `MAX_HEIGHT`) 分の容量を確保する
    pub fn new() -> Self {
        Self::with_capacity(MAX_BUFFER_BYTES)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: vec![0; bytes],
            width: 0,
            height: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// 描画済み領域 (`width * height * 3` バイト)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.width * self.height * 3]
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let i = (row * self.width + col) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    fn ensure_capacity(&self, width: usize, height: usize) -> Result<usize, RenderError> {
        let required = width * height * 3;
        if required > self.data.len() {
            return Err(RenderError::CapacityExceeded {
                required,
                capacity: self.data.len(),
            });
        }
        Ok(required)
    }

    /// 容量を確認してから書き込み先を返す
    fn prepare(&mut self, width: usize, height: usize) -> Result<&mut [u8], RenderError> {
        let required = self.ensure_capacity(width, height)?;
        self.width = width;
        self.height = height;
        Ok(&mut self.data[..required])
    }
}

/// 1フレームの描画結果
#[derive(Clone, Copy, Debug)]
pub struct FrameReport {
    pub elapsed: Duration,
    pub strategy: ExecutionStrategy,
}

/// 1フレーム分の描画を行うもの
pub trait FrameRenderer {
    fn render(&mut self, vp: &Viewport, out: &mut PixelGrid) -> Result<FrameReport, RenderError>;
    fn strategy(&self) -> ExecutionStrategy;
}

enum Backend {
    Sequential,
    Parallel,
    Gpu(GpuContext),
}

/// 描画エンジン
///
/// 構成（解像度・反復回数・数値表現・実行方式）は構築時に固定される。
pub struct Dispatcher {
    width: usize,
    height: usize,
    max_iter: u32,
    numeric: NumericStrategy,
    strategy: ExecutionStrategy,
    backend: Backend,
}

impl Dispatcher {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let backend = match config.execution {
            ExecutionStrategy::Sequential => Backend::Sequential,
            ExecutionStrategy::Parallel => Backend::Parallel,
            ExecutionStrategy::Gpu => Backend::Gpu(GpuContext::new(MAX_WIDTH * MAX_HEIGHT)?),
        };

        Ok(Self {
            width: config.width,
            height: config.height,
            max_iter: config.max_iterations,
            numeric: config.numeric,
            strategy: config.execution,
            backend,
        })
    }
}

impl FrameRenderer for Dispatcher {
    /// 全ピクセルを描画して `out` を埋める
    ///
    /// 戻るまでに全ワークアイテムが完了している。失敗した場合 `out` の内容は前フレームのまま。
    fn render(&mut self, vp: &Viewport, out: &mut PixelGrid) -> Result<FrameReport, RenderError> {
        let start = Instant::now();
        let (width, height, max_iter) = (self.width, self.height, self.max_iter);

        match &self.backend {
            Backend::Sequential => {
                let buf = out.prepare(width, height)?;
                match self.numeric {
                    NumericStrategy::Float => {
                        cpu::render_sequential(width, height, vp, max_iter, &FloatEscape, buf)
                    }
                    NumericStrategy::Fixed => {
                        cpu::render_sequential(width, height, vp, max_iter, &FixedEscape, buf)
                    }
                }
            }
            Backend::Parallel => {
                let buf = out.prepare(width, height)?;
                match self.numeric {
                    NumericStrategy::Float => {
                        cpu::render_parallel(width, height, vp, max_iter, &FloatEscape, buf)
                    }
                    NumericStrategy::Fixed => {
                        cpu::render_parallel(width, height, vp, max_iter, &FixedEscape, buf)
                    }
                }
            }
            Backend::Gpu(gpu) => {
                out.ensure_capacity(width, height)?;
                let counts = gpu.compute(&GpuParams::new(vp, width, height, max_iter))?;
                let buf = out.prepare(width, height)?;
                cpu::colorize_counts(&counts, max_iter, buf);
            }
        }

        let elapsed = start.elapsed();
        debug!("描画 {}x{} [{}] {:.2?}", width, height, self.strategy, elapsed);
        Ok(FrameReport {
            elapsed,
            strategy: self.strategy,
        })
    }

    fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }
}
