const MAX_STEM_CHARS: usize = 120;

/// Filesystem-safe file stem for a media item: the sanitized title, or the
/// identifier when nothing usable is left of the title.
pub fn media_file_stem(title: &str, id: &str) -> String {
    let stem = sanitize(title);
    if stem.is_empty() {
        let fallback = sanitize(id);
        if fallback.is_empty() {
            return "untitled".to_string();
        }
        return fallback;
    }
    stem
}

fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_replaced = false;
    for c in input.chars() {
        if is_forbidden(c) {
            // Runs of forbidden characters collapse into one underscore.
            if !prev_replaced {
                out.push('_');
            }
            prev_replaced = true;
        } else {
            out.push(c);
            prev_replaced = false;
        }
    }

    let trimmed = out.trim_matches(&['_', ' ', '.'][..]);
    let mut stem: String = trimmed.chars().take(MAX_STEM_CHARS).collect();
    let trimmed_len = stem.trim_end_matches(&['_', ' ', '.'][..]).len();
    stem.truncate(trimmed_len);

    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}' | '\u{7F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
