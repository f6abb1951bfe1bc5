use std::io::{Cursor, Read};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;
use crate::error::AppError;

/// Largest image accepted, either uploaded directly or unpacked from an archive.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// An uploaded file as handed over by the picker.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }
}

/// Sniffs the image type from magic bytes, falling back to the extension.
pub fn detect_image_mime(file_name: &str, bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF8") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

pub fn image_to_data_url(upload: &Upload) -> Result<String, AppError> {
    if upload.bytes.is_empty() {
        return Err(AppError::Validation(format!("{} is empty", upload.file_name)));
    }
    let mime = detect_image_mime(&upload.file_name, &upload.bytes)
        .ok_or_else(|| AppError::Validation(format!("{} is not a supported image", upload.file_name)))?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&upload.bytes)))
}

/// Pulls every image out of a zip archive. Directories, macOS resource
/// forks and non-image entries are skipped. An entry that inflates past
/// `max_entry_bytes` fails the whole archive.
pub fn extract_images(archive_bytes: &[u8], max_entry_bytes: u64) -> Result<Vec<Upload>, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes))
        .map_err(|e| AppError::Archive(format!("Unreadable archive: {}", e)))?;

    let mut images = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| AppError::Archive(format!("Corrupt archive entry {}: {}", index, e)))?;

        let name = entry.name().to_string();
        if entry.is_dir() || name.starts_with("__MACOSX/") {
            continue;
        }

        if entry.size() > max_entry_bytes {
            return Err(too_large(&name, max_entry_bytes));
        }

        // The declared size can lie; never inflate more than one byte past the cap.
        let mut bytes = Vec::new();
        entry
            .by_ref()
            .take(max_entry_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::Archive(format!("Failed to read {}: {}", name, e)))?;
        if bytes.len() as u64 > max_entry_bytes {
            return Err(too_large(&name, max_entry_bytes));
        }

        if detect_image_mime(&name, &bytes).is_none() {
            debug!("Skipping non-image archive entry {}", name);
            continue;
        }
        images.push(Upload::new(name, bytes));
    }
    Ok(images)
}

fn too_large(name: &str, limit: u64) -> AppError {
    AppError::Archive(format!("{} is larger than the {} byte limit", name, limit))
}
