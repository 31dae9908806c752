use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Rerunning with identical data yields a byte-identical file, which is what
/// makes the bootstrap stage idempotent.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Append text to a file, creating it if it doesn't exist.
pub fn append_text(path: &Path, text: &str) -> Result<()> {
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    f.write_all(text.as_bytes())?;
    Ok(())
}

/// Ensure `line` is present verbatim in the file at `path`, appending it if
/// absent. Returns true if the line was added. Exact line match — avoids
/// false positives from substring checks.
pub fn ensure_line_in_file(path: &Path, line: &str) -> Result<bool> {
    let existing = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };
    if existing.lines().any(|l| l == line) {
        return Ok(false);
    }
    let sep = if existing.is_empty() || existing.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    append_text(path, &format!("{sep}{line}\n"))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/settings.json");
        atomic_write(&path, b"{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn atomic_write_twice_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Makefile");
        atomic_write(&path, b"test:\n\tflutter test\n").unwrap();
        let first = std::fs::read(&path).unwrap();
        atomic_write(&path, b"test:\n\tflutter test\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), first);
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("existing.txt");
        std::fs::write(&path, b"original").unwrap();
        assert!(!write_if_missing(&path, b"new").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn ensure_line_creates_file_when_missing() {
        let dir = TempDir::new().unwrap();
        let profile = dir.path().join(".zprofile");
        assert!(ensure_line_in_file(&profile, "export PATH=\"/sdk/bin:$PATH\"").unwrap());
        let content = std::fs::read_to_string(&profile).unwrap();
        assert_eq!(content, "export PATH=\"/sdk/bin:$PATH\"\n");
    }

    #[test]
    fn ensure_line_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let profile = dir.path().join(".zprofile");
        let line = "export PATH=\"/sdk/bin:$PATH\"";
        assert!(ensure_line_in_file(&profile, line).unwrap());
        assert!(!ensure_line_in_file(&profile, line).unwrap());
        let content = std::fs::read_to_string(&profile).unwrap();
        assert_eq!(content.lines().filter(|l| *l == line).count(), 1);
    }

    #[test]
    fn ensure_line_appends_separator_to_unterminated_file() {
        let dir = TempDir::new().unwrap();
        let profile = dir.path().join(".zprofile");
        std::fs::write(&profile, "alias ll='ls -l'").unwrap();
        ensure_line_in_file(&profile, "export A=1").unwrap();
        let content = std::fs::read_to_string(&profile).unwrap();
        assert_eq!(content, "alias ll='ls -l'\nexport A=1\n");
    }

    #[test]
    fn ensure_line_ignores_substring_matches() {
        let dir = TempDir::new().unwrap();
        let profile = dir.path().join(".zprofile");
        std::fs::write(&profile, "# export A=1 (disabled)\n").unwrap();
        assert!(ensure_line_in_file(&profile, "export A=1").unwrap());
    }
}
