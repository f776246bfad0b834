use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters never allowed in a stored filename: path separators, NUL and control chars
    /// - Valid: "demo.h5p", "Quiz 3 (final).h5p", "übung.h5p"
    /// - Invalid: "a/b.h5p", "..\\x.h5p", "tab\there.h5p"
    pub static ref FORBIDDEN_FILENAME_CHARS: Regex = Regex::new(r"[/\\\x00-\x1f\x7f]").unwrap();
}

/// Longest accepted filename, in characters
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Validate a client-supplied filename as a single, non-traversing path segment.
///
/// Returns the trimmed filename, or a human-readable reason for rejection.
pub fn sanitize_filename(raw: &str) -> Result<String, String> {
    let filename = raw.trim();

    if filename.is_empty() {
        return Err("filename is required".to_string());
    }
    if filename.chars().count() > MAX_FILENAME_LENGTH {
        return Err(format!(
            "filename must be at most {} characters",
            MAX_FILENAME_LENGTH
        ));
    }
    if filename == "." || filename.contains("..") {
        return Err(format!("filename '{}' contains a path traversal sequence", filename));
    }
    if FORBIDDEN_FILENAME_CHARS.is_match(filename) {
        return Err(format!(
            "filename '{}' must be a single path segment without control characters",
            filename
        ));
    }

    Ok(filename.to_string())
}

/// Filename minus its final extension, used as the default display title.
///
/// Dotfiles and names without an extension are returned unchanged.
pub fn filename_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => filename,
        Some(idx) => &filename[..idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_valid() {
        assert_eq!(sanitize_filename("demo.h5p").unwrap(), "demo.h5p");
        assert_eq!(sanitize_filename("  quiz.h5p ").unwrap(), "quiz.h5p");
        assert_eq!(
            sanitize_filename("Quiz 3 (final).h5p").unwrap(),
            "Quiz 3 (final).h5p"
        );
        assert_eq!(sanitize_filename("übung.h5p").unwrap(), "übung.h5p");
    }

    #[test]
    fn test_sanitize_filename_invalid() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("   ").is_err());
        assert!(sanitize_filename(".").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("../etc/passwd").is_err()); // traversal
        assert!(sanitize_filename("a/b.h5p").is_err()); // separator
        assert!(sanitize_filename("a\\b.h5p").is_err()); // windows separator
        assert!(sanitize_filename("bad\0name.h5p").is_err()); // NUL
        assert!(sanitize_filename("tab\tname.h5p").is_err()); // control char
    }

    #[test]
    fn test_sanitize_filename_length_limit() {
        let longest = format!("{}.h5p", "a".repeat(MAX_FILENAME_LENGTH - 4));
        assert_eq!(sanitize_filename(&longest).unwrap(), longest);

        let too_long = format!("{}.h5p", "a".repeat(MAX_FILENAME_LENGTH - 3));
        assert!(sanitize_filename(&too_long).is_err());

        // Counted in characters, not bytes
        let multibyte = format!("{}.h5p", "ü".repeat(MAX_FILENAME_LENGTH - 4));
        assert!(sanitize_filename(&multibyte).is_ok());
    }

    #[test]
    fn test_filename_stem() {
        assert_eq!(filename_stem("demo.h5p"), "demo");
        assert_eq!(filename_stem("archive.tar.h5p"), "archive.tar");
        assert_eq!(filename_stem("noext"), "noext");
        assert_eq!(filename_stem(".hidden"), ".hidden");
    }
}
