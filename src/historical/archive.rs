use crate::historical::error::ArchiveError;
use log::debug;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Prefix of the one entry in each station archive that holds the daily values.
/// The other entries are station metadata.
pub const PRODUCT_FILE_PREFIX: &str = "produkt_";

/// The data file pulled out of a station archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Opens a ZIP archive held in memory and extracts its single product file.
pub fn extract_product_file(archive_bytes: &[u8]) -> Result<ProductFile, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes))?;

    let candidates: Vec<String> = archive
        .file_names()
        .filter(|name| is_product_file(name))
        .map(str::to_string)
        .collect();
    debug!(
        "Archive holds {} entries, {} product file(s)",
        archive.len(),
        candidates.len()
    );

    let name = match candidates.as_slice() {
        [] => return Err(ArchiveError::NoProductFile),
        [single] => single.clone(),
        _ => return Err(ArchiveError::AmbiguousProductFile(candidates)),
    };

    let mut entry = archive.by_name(&name)?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| ArchiveError::EntryRead(name.clone(), e))?;

    Ok(ProductFile { name, bytes })
}

fn is_product_file(entry_name: &str) -> bool {
    let base = entry_name.rsplit('/').next().unwrap_or(entry_name);
    base.starts_with(PRODUCT_FILE_PREFIX)
}
