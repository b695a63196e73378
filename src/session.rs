//! フレームループ
//!
//! 入力取得 → ビューポート更新 → 描画 → 表示 を終了要求まで繰り返す。
//! ウィンドウや入力デバイスは `InputSource` / `Presenter` の向こう側にある。

use std::time::Duration;

use log::{debug, info, warn};

use crate::common::viewport::{ControllerInputFrame, Viewport};
use crate::config::EngineConfig;
use crate::error::{EngineError, RenderError};
use crate::render::{Dispatcher, ExecutionStrategy, FrameRenderer, PixelGrid};

/// 1フレーム分の入力
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub axes: ControllerInputFrame,
    pub quit_requested: bool,
    /// 初期表示に戻す
    pub reset_requested: bool,
}

/// 入力デバイス（毎フレーム1回だけ読む）
pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

/// 表示に渡す付随情報
#[derive(Clone, Copy, Debug)]
pub struct FrameStatus {
    pub frame: u64,
    pub viewport: Viewport,
    pub strategy: ExecutionStrategy,
    /// 描画時間（スキップしたフレームは `None`）
    pub render_time: Option<Duration>,
}

/// 表示先
pub trait Presenter {
    fn present(&mut self, grid: &PixelGrid, status: &FrameStatus) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub skipped_frames: u64,
}

pub struct Session<R = Dispatcher> {
    renderer: R,
    grid: PixelGrid,
    viewport: Viewport,
    config: EngineConfig,
}

impl Session<Dispatcher> {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let dispatcher = Dispatcher::new(&config)?;
        info!(
            "エンジン開始: {}x{} 反復 {} [{} / {}]",
            config.width,
            config.height,
            config.max_iterations,
            config.execution,
            config.numeric
        );
        Ok(Self::with_renderer(config, dispatcher))
    }
}

impl<R: FrameRenderer> Session<R> {
    pub fn with_renderer(config: EngineConfig, renderer: R) -> Self {
        Self {
            renderer,
            grid: PixelGrid::new(),
            viewport: config.initial_viewport,
            config,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// 現在のビューポートで1フレーム描画する
    pub fn render_frame(&mut self) -> Result<Duration, RenderError> {
        let report = self.renderer.render(&self.viewport, &mut self.grid)?;
        Ok(report.elapsed)
    }

    /// 1フレーム分の入力を反映する（描画の前に呼ぶ）
    pub fn apply_input(&mut self, input: &FrameInput) {
        if input.reset_requested {
            info!("リセット");
            self.viewport = self.config.initial_viewport;
        } else {
            self.viewport.update(input.axes, &self.config.tuning);
        }
    }

    /// 終了要求が来るまでフレームループを回す
    ///
    /// バックエンドの失敗はそのフレームを飛ばして前のバッファを表示し続ける。
    /// 容量不足と表示側のエラーはループを終了させる。
    pub fn run<F>(&mut self, frontend: &mut F) -> anyhow::Result<SessionSummary>
    where
        F: InputSource + Presenter,
    {
        let mut summary = SessionSummary::default();

        loop {
            let input = frontend.poll();
            if input.quit_requested {
                break;
            }

            self.apply_input(&input);

            let render_time = match self.render_frame() {
                Ok(elapsed) => Some(elapsed),
                Err(RenderError::Backend(msg)) => {
                    warn!("フレーム {} をスキップ: {}", summary.frames, msg);
                    summary.skipped_frames += 1;
                    None
                }
                Err(e) => return Err(e.into()),
            };

            let status = FrameStatus {
                frame: summary.frames,
                viewport: self.viewport,
                strategy: self.renderer.strategy(),
                render_time,
            };
            frontend.present(&self.grid, &status)?;

            let (re_min, re_max, im_min, im_max) = self.viewport.plane_bounds();
            debug!(
                "フレーム {} | 実部 [{:.6}, {:.6}] 虚部 [{:.6}, {:.6}] | ズーム: {:.3e}",
                summary.frames, re_min, re_max, im_min, im_max, self.viewport.zoom
            );
            summary.frames += 1;
        }

        info!(
            "終了: {} フレーム (スキップ {})",
            summary.frames, summary.skipped_frames
        );
        Ok(summary)
    }
}
