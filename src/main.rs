//! マンデルブロ集合リアルタイムビューア
//!
//! ゲームコントローラの軸入力（パン2軸 + ズームトリガー2本）で表示範囲を動かす。
//! このウィンドウ版ではキーボードでコントローラ軸を代用する。
//!
//! 操作方法:
//!   - 矢印キー: パン（左スティック相当）
//!   - Z キー: ズームイン（右トリガー相当）
//!   - X キー: ズームアウト（左トリガー相当）
//!   - R キー: 初期表示にリセット
//!   - S キー: 現在の表示を画像として保存
//!   - Q / Escape キー: 終了

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, warn};
use mandelbrot_live::{
    common::{colors::pack_rgb, viewport::ControllerInputFrame},
    config::Args,
    render::PixelGrid,
    session::{FrameInput, FrameStatus, InputSource, Presenter, Session},
    snapshot::{numbered_filename, save_png},
};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

/// 矢印キーを押したときのスティック量（最大の半分）
const KEY_PAN_DEFLECTION: i16 = 16_384;
/// Z/X キーを押したときのトリガー量（静止位置 0 より少しだけ倍率が変わる）
const KEY_TRIGGER_PRESS: i16 = 2_000;

/// minifb のウィンドウ（キーボード入力 + 表示）
struct MinifbFrontend {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    save_requested: bool,
    save_counter: u32,
}

impl MinifbFrontend {
    fn new(width: usize, height: usize) -> anyhow::Result<Self> {
        let mut window = Window::new(
            "マンデルブロ集合",
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| anyhow!("ウィンドウの作成に失敗しました: {e}"))?;

        window.set_target_fps(60);

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
            save_requested: false,
            save_counter: 0,
        })
    }

    fn axis(&self, negative: Key, positive: Key, amount: i16) -> i16 {
        match (self.window.is_key_down(negative), self.window.is_key_down(positive)) {
            (true, false) => -amount,
            (false, true) => amount,
            _ => 0,
        }
    }

    fn trigger(&self, key: Key) -> i16 {
        if self.window.is_key_down(key) {
            KEY_TRIGGER_PRESS
        } else {
            0
        }
    }
}

impl InputSource for MinifbFrontend {
    fn poll(&mut self) -> FrameInput {
        if self.window.is_key_pressed(Key::S, KeyRepeat::No) {
            self.save_requested = true;
        }

        FrameInput {
            axes: ControllerInputFrame {
                pan_x: self.axis(Key::Left, Key::Right, KEY_PAN_DEFLECTION),
                pan_y: self.axis(Key::Up, Key::Down, KEY_PAN_DEFLECTION),
                zoom_in: self.trigger(Key::Z),
                zoom_out: self.trigger(Key::X),
            },
            quit_requested: !self.window.is_open()
                || self.window.is_key_down(Key::Escape)
                || self.window.is_key_down(Key::Q),
            reset_requested: self.window.is_key_pressed(Key::R, KeyRepeat::No),
        }
    }
}

impl Presenter for MinifbFrontend {
    fn present(&mut self, grid: &PixelGrid, status: &FrameStatus) -> anyhow::Result<()> {
        for (dst, px) in self.buffer.iter_mut().zip(grid.as_bytes().chunks_exact(3)) {
            *dst = pack_rgb([px[0], px[1], px[2]]);
        }

        if self.save_requested {
            self.save_requested = false;
            self.save_counter += 1;
            if let Err(e) = save_png(grid, numbered_filename(self.save_counter)) {
                warn!("{e}");
            }
        }

        let vp = &status.viewport;
        let timing = match status.render_time {
            Some(t) => format!("{:.1} ms", t.as_secs_f64() * 1000.0),
            None => "skip".to_string(),
        };
        self.window.set_title(&format!(
            "マンデルブロ集合 [{}] 中心 ({:.6}, {:.6}i) ズーム {:.2e} | {}",
            status.strategy, vp.offset_x, vp.offset_y, vp.zoom, timing
        ));

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| anyhow!("バッファの更新に失敗しました: {e}"))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.to_config().context("構成が不正です")?;
    let mut session = Session::new(config.clone())?;

    if let Some(path) = &args.output {
        let elapsed = session.render_frame()?;
        info!("描画完了: {:.2?}", elapsed);
        save_png(session.grid(), path)?;
        return Ok(());
    }

    println!("操作方法:");
    println!("  - 矢印キー: パン");
    println!("  - Z / X キー: ズームイン / ズームアウト");
    println!("  - R キー: 初期表示にリセット");
    println!("  - S キー: 現在の表示を画像として保存");
    println!("  - Q / Escape キー: 終了");
    println!();

    let mut frontend = MinifbFrontend::new(config.width, config.height)?;
    let summary = session.run(&mut frontend)?;

    println!("終了しました ({} フレーム)", summary.frames);
    Ok(())
}
