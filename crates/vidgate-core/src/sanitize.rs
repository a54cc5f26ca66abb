//! Filename sanitization for downloaded videos.
//!
//! Titles come straight from whatever the source site reports, so they
//! can contain path separators, shell-hostile punctuation and arbitrary
//! length. The sanitized form is safe to join onto the downloads
//! directory on any supported filesystem.

/// Maximum length, in bytes, of a sanitized title.
const MAX_TITLE_BYTES: usize = 100;

/// Characters replaced by `_` in filenames, plus the space character.
const FORBIDDEN: [char; 10] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', ' '];

/// Sanitize a video title into a safe filename stem.
///
/// Replaces every forbidden character with `_` and truncates the result
/// to at most 100 bytes, keeping char boundaries intact. Idempotent:
/// sanitizing an already-sanitized string returns it unchanged.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let mut out: String = title
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();

    if out.len() > MAX_TITLE_BYTES {
        let mut cut = MAX_TITLE_BYTES;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_forbidden_character() {
        assert_eq!(
            sanitize_title(r#"a/b\c:d*e?f"g<h>i|j k"#),
            "a_b_c_d_e_f_g_h_i_j_k"
        );
    }

    #[test]
    fn leaves_safe_titles_untouched() {
        assert_eq!(sanitize_title("My_Video.part2"), "My_Video.part2");
    }

    #[test]
    fn is_idempotent() {
        let once = sanitize_title("some: weird/title?");
        assert_eq!(sanitize_title(&once), once);
    }

    #[test]
    fn truncates_to_100_bytes() {
        let long = "x".repeat(300);
        let out = sanitize_title(&long);
        assert_eq!(out.len(), 100);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; 99 of them is 198 bytes, so the cut at byte
        // 100 falls mid-char and must back up to 99.
        let long = "é".repeat(99);
        let out = sanitize_title(&long);
        assert!(out.len() <= 100);
        assert!(out.is_char_boundary(out.len()));
        assert_eq!(out.chars().count(), 50);
    }

    #[test]
    fn empty_title_stays_empty() {
        assert_eq!(sanitize_title(""), "");
    }
}
