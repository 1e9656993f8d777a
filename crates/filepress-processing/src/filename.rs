//! Storage-safe filenames derived from client input.

const MAX_FILENAME_LENGTH: usize = 255;
const COMPRESSED_PREFIX: &str = "compressed_";
const COMPRESSED_SUFFIX: &str = ".zip";

/// Longest sanitized name whose compressed artifact name still fits the
/// filesystem component limit.
pub const MAX_SANITIZED_LENGTH: usize =
    MAX_FILENAME_LENGTH - COMPRESSED_PREFIX.len() - COMPRESSED_SUFFIX.len();

/// Reduce a client-declared filename to a single safe path component.
///
/// Directory components are dropped (both `/` and `\` count as separators),
/// anything outside `[A-Za-z0-9._-]` becomes `_`, runs of dots collapse to one
/// and leading dots are stripped. Names longer than [`MAX_SANITIZED_LENGTH`]
/// lose the end of their stem, never their extension. The result is never
/// empty, never contains a separator and never contains `..`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let mut sanitized = String::with_capacity(base.len());
    for c in base.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            c
        } else {
            '_'
        };
        if c == '.' && sanitized.ends_with('.') {
            continue;
        }
        sanitized.push(c);
    }

    let sanitized = sanitized.trim_start_matches('.');
    if sanitized.is_empty() {
        return "file".to_string();
    }

    truncate_keeping_extension(sanitized, MAX_SANITIZED_LENGTH)
}

/// Only ASCII reaches here, so byte slicing is char-safe.
fn truncate_keeping_extension(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }

    match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot < max_len => {
            let extension = &name[dot..];
            let stem = name[..max_len - extension.len()].trim_end_matches('.');
            format!("{}{}", stem, extension)
        }
        _ => name[..max_len].to_string(),
    }
}

/// Name of the compressed artifact for a sanitized upload name.
///
/// The `.zip` suffix is applied even when the payload is a re-encoded image.
pub fn compressed_filename(sanitized: &str) -> String {
    format!("{}{}{}", COMPRESSED_PREFIX, sanitized, COMPRESSED_SUFFIX)
}
