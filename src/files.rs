//! File-access service: listing, reading, importing and deleting the image
//! files that back collections and board items.
//!
//! The canvas core only depends on the [`FileService`] trait (two read-side
//! operations); the rest of the surface lives on [`LocalFiles`] and serves
//! the collection views (import, clipboard paste, delete).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::warn;

static IMAGE_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "tiff", "tif", "avif",
    ]
    .into_iter()
    .collect()
});

#[derive(Error, Debug)]
pub enum FileError {
    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("system clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

pub type FileResult<T> = Result<T, FileError>;

/// How `import_files` transfers each source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportMode {
    Copy,
    Move,
}

/// The read-side interface the canvas core needs.
pub trait FileService: Send + Sync {
    /// Image files directly inside `dir`, sorted by path.
    fn list_images(&self, dir: &Path) -> FileResult<Vec<PathBuf>>;

    /// Raw encoded bytes of one image file.
    fn read_image(&self, path: &Path) -> FileResult<Vec<u8>>;
}

/// True if the path has a recognized image extension.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn mime_for_ext(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Local-filesystem implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFiles;

impl FileService for LocalFiles {
    fn list_images(&self, dir: &Path) -> FileResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(FileError::NotADirectory(dir.to_path_buf()));
        }
        let mut images = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image_path(&path) {
                images.push(path);
            }
        }
        images.sort();
        Ok(images)
    }

    fn read_image(&self, path: &Path) -> FileResult<Vec<u8>> {
        if !path.is_file() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        Ok(fs::read(path)?)
    }
}

impl LocalFiles {
    /// Read an image and encode it as a `data:` URL for a host webview.
    pub fn read_image_data_url(&self, path: &Path) -> FileResult<String> {
        let data = self.read_image(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png")
            .to_lowercase();
        let mime = mime_for_ext(&ext);
        Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&data)))
    }

    /// Copy or move files into a collection folder, renaming on collision
    /// (`photo.png` becomes `photo_1.png`, `photo_2.png`, ...). Individual
    /// failures are logged and skipped; the successfully imported
    /// destination paths are returned.
    pub fn import_files(
        &self,
        sources: &[PathBuf],
        target_dir: &Path,
        mode: ImportMode,
    ) -> FileResult<Vec<PathBuf>> {
        if !target_dir.is_dir() {
            return Err(FileError::NotADirectory(target_dir.to_path_buf()));
        }

        let mut imported = Vec::new();
        for source in sources {
            if !source.is_file() {
                continue;
            }
            let Some(file_name) = source.file_name() else {
                continue;
            };

            let mut dest = target_dir.join(file_name);
            if dest.exists() {
                let stem = source
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("file");
                let ext = source.extension().and_then(|e| e.to_str()).unwrap_or("");
                let mut counter = 1u32;
                loop {
                    let candidate = if ext.is_empty() {
                        format!("{stem}_{counter}")
                    } else {
                        format!("{stem}_{counter}.{ext}")
                    };
                    dest = target_dir.join(candidate);
                    if !dest.exists() {
                        break;
                    }
                    counter += 1;
                }
            }

            let result = match mode {
                ImportMode::Move => {
                    // rename fails across filesystems; fall back to copy + delete
                    fs::rename(source, &dest)
                        .or_else(|_| fs::copy(source, &dest).and_then(|_| fs::remove_file(source)))
                }
                ImportMode::Copy => fs::copy(source, &dest).map(|_| ()),
            };

            match result {
                Ok(()) => imported.push(dest),
                Err(e) => warn!(source = %source.display(), error = %e, "import failed"),
            }
        }
        Ok(imported)
    }

    /// Persist raw RGBA clipboard pixels as a timestamped PNG in the target
    /// directory, returning the new path.
    pub fn save_clipboard_image(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        target_dir: &Path,
    ) -> FileResult<PathBuf> {
        if !target_dir.is_dir() {
            return Err(FileError::NotADirectory(target_dir.to_path_buf()));
        }
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
        let dest = target_dir.join(format!("clipboard_{timestamp}.png"));

        let file = fs::File::create(&dest)?;
        let writer = BufWriter::new(file);
        PngEncoder::new(writer).write_image(
            rgba,
            width,
            height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(dest)
    }

    pub fn delete_image(&self, path: &Path) -> FileResult<()> {
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        Ok(fs::remove_file(path)?)
    }
}
