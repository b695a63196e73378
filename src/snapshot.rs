//! 描画結果を PNG として保存する

use std::path::Path;

use image::RgbImage;
use log::info;

use crate::error::SnapshotError;
use crate::render::PixelGrid;

/// 描画済み領域を 8bit RGB の画像として保存する（形式は拡張子で決まる）
pub fn save_png(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    if grid.is_empty() {
        return Err(SnapshotError::Empty);
    }

    let img = RgbImage::from_raw(
        grid.width() as u32,
        grid.height() as u32,
        grid.as_bytes().to_vec(),
    )
    .ok_or(SnapshotError::Empty)?;

    img.save(path).map_err(|source| SnapshotError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    info!("画像を保存しました: {}", path.display());
    Ok(())
}

/// `mandelbrot_001.png` 形式の連番ファイル名
pub fn numbered_filename(counter: u32) -> String {
    format!("mandelbrot_{:03}.png", counter)
}
