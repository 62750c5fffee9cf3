use crate::errors::{AppError, AppResult};
use std::io::{Cursor, Read};
use tracing::debug;
use zip::result::ZipError;
use zip::{CompressionMethod, DateTime, ZipArchive};

const MAX_PREALLOCATED_BYTES: u64 = 1 << 20;

/// Metadata of one archive member, read from the central directory.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
    pub compressed_size: u64,
    pub compression: CompressionMethod,
    pub crc32: u32,
    pub last_modified: DateTime,
    pub is_dir: bool,
}

/// In-memory ZIP archive whose members are decompressed only on request.
pub struct ZipHandle {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    filelist: Vec<ArchiveEntry>,
}

impl ZipHandle {
    /// Opens `bytes` as a ZIP archive and indexes its entries.
    ///
    /// Only metadata is read, so entries that are encrypted or use a compression
    /// method this build cannot decompress are still listed; reading them fails.
    ///
    /// # Errors
    ///
    /// Returns `Archive` if the data is not a readable ZIP archive.
    pub fn from_bytes(bytes: Vec<u8>) -> AppResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut filelist = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index_raw(i)?;
            filelist.push(ArchiveEntry {
                name: file.name().to_string(),
                size: file.size(),
                compressed_size: file.compressed_size(),
                compression: file.compression(),
                crc32: file.crc32(),
                last_modified: file.last_modified(),
                is_dir: file.is_dir(),
            });
        }

        debug!(entries = filelist.len(), "Opened ZIP archive");
        Ok(Self { archive, filelist })
    }

    /// Entries in central-directory order.
    pub fn filelist(&self) -> &[ArchiveEntry] {
        &self.filelist
    }

    pub fn len(&self) -> usize {
        self.filelist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filelist.is_empty()
    }

    /// Decompressed content of `member`, or of the first entry when `None`.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` for an unknown name, `EmptyArchive` when there is no
    /// first entry and `Archive` when decompression or the CRC check fails.
    pub fn read_member(&mut self, member: Option<&str>) -> AppResult<Vec<u8>> {
        let mut file = match member {
            Some(name) => self.archive.by_name(name).map_err(|e| match e {
                ZipError::FileNotFound => AppError::MemberNotFound(name.to_string()),
                other => AppError::Archive(other),
            })?,
            None => {
                if self.archive.len() == 0 {
                    return Err(AppError::EmptyArchive);
                }
                self.archive.by_index(0)?
            }
        };

        // Declared sizes are untrusted; only a bounded hint is preallocated.
        let capacity = file.size().min(MAX_PREALLOCATED_BYTES) as usize;
        let mut content = Vec::with_capacity(capacity);
        file.read_to_end(&mut content)
            .map_err(|e| AppError::Archive(ZipError::Io(e)))?;

        debug!(member = file.name(), bytes = content.len(), "Read ZIP member");
        Ok(content)
    }

    pub fn into_inner(self) -> ZipArchive<Cursor<Vec<u8>>> {
        self.archive
    }
}

impl std::fmt::Debug for ZipHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipHandle")
            .field("filelist", &self.filelist)
            .finish_non_exhaustive()
    }
}
