//! エラー型

use std::path::PathBuf;

/// 構成エラー（起動時に検出し、エンジンは開始しない）
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("解像度 {width}x{height} は最大 {max_width}x{max_height} を超えています")]
    ResolutionTooLarge {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },
    #[error("解像度が0です ({width}x{height})")]
    EmptyResolution { width: usize, height: usize },
    #[error("最大反復回数は1以上が必要です")]
    ZeroIterations,
    #[error("初期ズームは正の有限値が必要です: {0}")]
    InvalidZoom(f64),
    #[error("GPUバックエンドは固定小数点演算に対応していません")]
    GpuFixedPoint,
}

/// 1フレームの描画エラー
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("出力バッファの容量不足: 必要 {required} バイト, 容量 {capacity} バイト")]
    CapacityExceeded { required: usize, capacity: usize },
    /// 計算バックエンドの実行・読み戻し失敗（そのフレームだけ諦める）
    #[error("計算バックエンドのエラー: {0}")]
    Backend(String),
}

/// エンジン構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("GPU の初期化に失敗しました: {0}")]
    GpuInit(String),
}

/// 画像保存のエラー
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("まだ描画されていません")]
    Empty,
    #[error("画像の保存に失敗しました ({path}): {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
