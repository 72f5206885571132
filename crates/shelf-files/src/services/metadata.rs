//! Display metadata helpers
//!
//! Pure functions turning raw object properties into the strings the file
//! table renders. Both work from the object name and reported byte count
//! alone; content is never inspected.

/// Size units, smallest first. Values past the last unit stay in TB.
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a raw byte count for display
///
/// `None`, zero and negative counts all mean the store did not report a
/// usable size; those render as "N/A".
pub fn format_size(bytes: Option<i64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "N/A".to_string(),
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

/// Derive a category label from an object name's extension
pub fn classify_type(name: &str) -> String {
    if name.is_empty() {
        return "UNKNOWN".to_string();
    }

    let ext = match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_uppercase(),
        // No dot, or a bare trailing dot
        _ => return "FILE".to_string(),
    };

    let category = match ext.as_str() {
        "PNG" | "JPG" | "JPEG" | "GIF" => "IMAGE",
        "MP4" | "MOV" | "AVI" => "VIDEO",
        "MP3" | "WAV" | "AAC" => "AUDIO",
        "PDF" => "PDF",
        "DOC" | "DOCX" => "DOCUMENT",
        "XLS" | "XLSX" => "SPREADSHEET",
        "TXT" => "TEXT",
        "ZIP" | "RAR" => "ARCHIVE",
        "CSV" => "CSV",
        // Unrecognized extensions are shown verbatim
        _ => return ext,
    };

    category.to_string()
}
