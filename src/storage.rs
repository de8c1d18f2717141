//! High-score persistence: a single `HighScore = <n>` line in a small text
//! file. Missing or malformed files read as score 0; nothing here is fatal
//! to the engines.

use std::fs;
use std::io;
use std::path::Path;

/// Default records location, relative to the working directory.
pub const RECORDS_PATH: &str = "records/records";

const MARKER: &str = "HighScore = ";

/// Read the stored high score; 0 when the file is absent or unreadable.
pub fn load_high_score(path: impl AsRef<Path>) -> i32 {
    let Ok(contents) = fs::read_to_string(path) else {
        return 0;
    };
    for line in contents.lines() {
        if line.contains(MARKER) {
            return line
                .strip_prefix(MARKER)
                .and_then(parse_leading_int)
                .unwrap_or(0);
        }
    }
    0
}

/// Overwrite the records file, creating its directory when absent.
pub fn save_high_score(path: impl AsRef<Path>, high_score: i32) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, format!("{MARKER}{high_score}"))
}

/// Leading decimal integer, ignoring trailing text.
fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let mut end = 0;
    for (i, ch) in s.char_indices() {
        if ch.is_ascii_digit() || (i == 0 && ch == '-') {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("brickgame_storage_{tag}_{}", std::process::id()))
    }

    #[test]
    fn missing_file_reads_as_zero() {
        assert_eq!(load_high_score(scratch("missing")), 0);
    }

    #[test]
    fn round_trip() {
        let path = scratch("roundtrip");
        for n in [0, 12, 196, 987_654] {
            save_high_score(&path, n).unwrap();
            assert_eq!(load_high_score(&path), n);
        }
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn garbled_contents_read_as_zero() {
        let path = scratch("garbled");
        fs::write(&path, "not a score file\n").unwrap();
        assert_eq!(load_high_score(&path), 0);

        fs::write(&path, "HighScore = banana\n").unwrap();
        assert_eq!(load_high_score(&path), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn trailing_text_after_the_number_is_ignored() {
        let path = scratch("trailing");
        fs::write(&path, "HighScore = 42 (old build)\n").unwrap();
        assert_eq!(load_high_score(&path), 42);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn creates_the_records_directory() {
        let dir = scratch("dir");
        let path = dir.join("records");
        let _ = fs::remove_dir_all(&dir);
        save_high_score(&path, 7).unwrap();
        assert_eq!(load_high_score(&path), 7);
        let _ = fs::remove_dir_all(&dir);
    }
}
