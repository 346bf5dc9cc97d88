#![allow(dead_code)]

pub mod config;
pub mod mock_provider;
pub mod server;

use std::path::Path;

/// Number of entries currently in the uploads directory
pub fn upload_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map_or(0, Iterator::count)
}

/// Hex rendering of a payload, mirrored by the mock provider's URLs
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Multipart file part with the given filename
pub fn file_part(bytes: &[u8], filename: &str) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(filename.to_owned())
}
