//! In-memory ZIP construction for multi-file uploads.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use impactqr_core::error::{AppError, ErrorKind};

use crate::upload::UploadedFile;

/// Deflate level used for bundles.
const COMPRESSION_LEVEL: i64 = 9;

/// Pack `files` into a single ZIP archive held in memory.
///
/// Entry names are reduced to their final path component and made unique,
/// so `a.txt` uploaded twice becomes `a.txt` and `a (1).txt`.
pub fn zip_files(files: &[UploadedFile]) -> Result<Bytes, AppError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut taken = HashSet::new();

    for (index, file) in files.iter().enumerate() {
        let name = unique_entry_name(&file.name, index, &mut taken);
        writer
            .start_file(name, entry_options())
            .map_err(|e| zip_error("Failed to start archive entry", e))?;
        writer.write_all(&file.data).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to write archive entry", e)
        })?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| zip_error("Failed to finalize archive", e))?;

    Ok(Bytes::from(cursor.into_inner()))
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL))
}

fn zip_error(context: &str, err: zip::result::ZipError) -> AppError {
    AppError::with_source(ErrorKind::Internal, format!("{context}: {err}"), err)
}

/// Last path component of `raw`, or a positional fallback when empty.
fn base_name(raw: &str, index: usize) -> String {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match name {
        "" | "." | ".." => format!("file-{}", index + 1),
        name => name.to_string(),
    }
}

fn unique_entry_name(raw: &str, index: usize, taken: &mut HashSet<String>) -> String {
    let base = base_name(raw, index);
    if taken.insert(base.clone()) {
        return base;
    }

    let (stem, ext) = match base.rfind('.') {
        Some(dot) if dot > 0 => (&base[..dot], &base[dot..]),
        _ => (base.as_str(), ""),
    };

    let mut n = 1;
    loop {
        let candidate = format!("{stem} ({n}){ext}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
