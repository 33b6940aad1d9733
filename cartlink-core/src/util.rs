/// Format a byte count as a human-readable size string (e.g., "4 KB", "2 MB").
///
/// Uses exact integer division. Values that aren't clean multiples of KB/MB
/// are shown in bytes.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 && bytes.is_multiple_of(1024 * 1024) {
        format!("{} MB", bytes / (1024 * 1024))
    } else if bytes >= 1024 && bytes.is_multiple_of(1024) {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Build the default output file name for a dump: the cartridge title plus
/// the given extension.
///
/// Path separators and control characters in the title are replaced with
/// `_`. An empty title falls back to `cartridge`.
pub fn dump_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_ascii_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim();
    let stem = if stem.is_empty() { "cartridge" } else { stem };
    format!("{}.{}", stem, extension)
}
