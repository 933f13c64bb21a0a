use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation;
use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageReader, RgbImage};
use thiserror::Error;

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
const TEMP_SAVE_SUFFIX: &str = ".blurry-tmp";
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("no .jpg or .jpeg files in {0}")]
    NoEligibleImages(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Ordered JPEG paths of one folder, captured once when the folder is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList {
    folder: PathBuf,
    files: Vec<PathBuf>,
}

impl FileList {
    /// Builds a list from already discovered paths. Empty lists are refused.
    pub fn new(folder: impl Into<PathBuf>, files: Vec<PathBuf>) -> StorageResult<Self> {
        let folder = folder.into();
        if files.is_empty() {
            return Err(StorageError::NoEligibleImages(folder));
        }
        Ok(Self { folder, files })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

pub fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            JPEG_EXTENSIONS
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
}

/// Lists regular `.jpg`/`.jpeg` files (any case) directly inside `folder`, sorted by name.
/// Symlinks count when they resolve to a regular file.
pub fn discover_images(folder: &Path) -> StorageResult<FileList> {
    if !folder.is_dir() {
        return Err(StorageError::NotADirectory(folder.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if !is_jpeg_path(&path) || !fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
            continue;
        }
        files.push(path);
    }
    files.sort_by(|left, right| left.file_name().cmp(&right.file_name()));

    tracing::info!(folder = %folder.display(), count = files.len(), "discovered images");
    FileList::new(folder, files)
}

/// Load/save seam between navigation and the filesystem.
pub trait ImageStore {
    fn load(&self, path: &Path) -> StorageResult<RgbImage>;
    fn save(&self, path: &Path, image: &RgbImage) -> StorageResult<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct FsImageStore {
    jpeg_quality: u8,
}

impl Default for FsImageStore {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl FsImageStore {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub const fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    fn encode_into(
        &self,
        destination: &Path,
        image: &RgbImage,
        permissions: Option<fs::Permissions>,
    ) -> StorageResult<()> {
        let file = fs::File::create(destination)?;
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality)
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|source| StorageError::Encode {
                path: destination.to_path_buf(),
                source,
            })?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        if let Some(permissions) = permissions {
            fs::set_permissions(destination, permissions)?;
        }
        Ok(())
    }
}

impl ImageStore for FsImageStore {
    /// Decodes `path` upright: the EXIF orientation is applied to the pixels,
    /// since saved files carry no EXIF block.
    fn load(&self, path: &Path) -> StorageResult<RgbImage> {
        let decode_error = |source: image::ImageError| StorageError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()
            .map_err(decode_error)?;
        let orientation = decoder.orientation().unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), ?err, "ignoring unreadable EXIF orientation");
            Orientation::NoTransforms
        });
        let mut decoded = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
        decoded.apply_orientation(orientation);
        Ok(decoded.into_rgb8())
    }

    fn save(&self, path: &Path, image: &RgbImage) -> StorageResult<()> {
        // Replace the link target, not the link.
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());
        let temp = temp_save_path(&target);
        if let Err(err) = self.encode_into(&temp, image, permissions) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }
        if let Err(err) = fs::rename(&temp, &target) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Io(err));
        }
        tracing::info!(path = %path.display(), "saved image");
        Ok(())
    }
}

fn temp_save_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(TEMP_SAVE_SUFFIX);
    path.with_file_name(name)
}
