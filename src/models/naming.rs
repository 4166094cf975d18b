use std::path::{is_separator, Path};

const DEFAULT_PAGE_EXTENSION: &str = "png";
/// Stand-in for names that would vanish or point outside their parent.
const PLACEHOLDER_COMPONENT: &str = "_";

/// Zero-pads a chapter number to three digits, leaving any decimal part alone.
pub fn pad_chapter_number(num: &str) -> String {
    match num.split_once('.') {
        Some((whole, fraction)) => format!("{:0>3}.{}", whole, fraction),
        None => format!("{:0>3}", num),
    }
}

pub fn chapter_folder_format(
    name: &str,
    num: &str,
    group_name: &str,
    extra: Option<&str>,
) -> String {
    let num = pad_chapter_number(num);
    match extra.filter(|e| !e.is_empty()) {
        Some(extra) => format!("{} - c{} ({}) [{}]", name, num, extra, group_name),
        None => format!("{} - c{} [{}]", name, num, group_name),
    }
}

/// Strips path separators so a name can't create nested directories.
pub fn sanitize_path_component(s: &str) -> String {
    let cleaned: String = s.chars().filter(|c| !is_separator(*c)).collect();
    match cleaned.as_str() {
        "" | "." | ".." => PLACEHOLDER_COMPONENT.to_string(),
        _ => cleaned,
    }
}

/// `NNN.<ext>`, keeping the extension of the served file.
pub fn page_filename(index: usize, source_name: &str) -> String {
    let ext = Path::new(source_name)
        .extension()
        .map(|e| e.to_string_lossy())
        .unwrap_or(DEFAULT_PAGE_EXTENSION.into());
    format!("{:0>3}.{}", index, ext)
}
