//! File I/O for saving and loading solved placements.
//!
//! Text format, one block per line, fixed blocks included:
//! ```text
//! # lazor solution: x y kind
//! 1 3 C
//! 3 3 B
//! ```
//! Blank lines and `#` comments are ignored on load.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::blocks::{BlockKind, Placement};
use crate::error::PersistenceError;

const SOLUTION_EXTENSION: &str = "solution";

/// Where the solution for `puzzle_path` is stored: same stem, `.solution` extension.
pub fn solution_path(puzzle_path: &Path) -> PathBuf {
    puzzle_path.with_extension(SOLUTION_EXTENSION)
}

/// Writes `placement` to `path`, replacing any existing file.
pub fn save(path: &Path, placement: &Placement) -> Result<(), PersistenceError> {
    let io_error = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    writeln!(writer, "# lazor solution: x y kind").map_err(io_error)?;
    for ((x, y), kind) in placement.iter() {
        writeln!(writer, "{x} {y} {kind}").map_err(io_error)?;
    }
    writer.flush().map_err(io_error)
}

/// Parses one `x y kind` entry.
fn parse_entry(text: &str) -> Option<((i32, i32), BlockKind)> {
    let mut fields = text.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let mut letter = fields.next()?.chars();
    let kind = BlockKind::from_letter(letter.next()?)?;
    if letter.next().is_some() || fields.next().is_some() {
        return None;
    }
    Some(((x, y), kind))
}

/// Reads a placement written by [`save`].
pub fn load(path: &Path) -> Result<Placement, PersistenceError> {
    let io_error = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut placement = Placement::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let malformed = || PersistenceError::Malformed {
            path: path.to_path_buf(),
            line: index + 1,
            text: trimmed.to_string(),
        };
        let (point, kind) = parse_entry(trimmed).ok_or_else(malformed)?;
        if placement.insert(point, kind).is_some() {
            return Err(malformed());
        }
    }

    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_restores_placement() {
        let dir = tempfile::tempdir().unwrap();
        let path = solution_path(&dir.path().join("mad_1.bff"));
        assert_eq!(path.file_name().unwrap(), "mad_1.solution");

        let placement: Placement = [
            ((1, 5), BlockKind::Reflect),
            ((5, 1), BlockKind::Refract),
            ((3, 3), BlockKind::Absorb),
        ]
        .into_iter()
        .collect();

        save(&path, &placement).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        insta::assert_snapshot!(text, @r"
        # lazor solution: x y kind
        1 5 A
        3 3 B
        5 1 C
        ");

        assert_eq!(load(&path).unwrap(), placement);
    }

    #[test]
    fn test_load_rejects_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.solution");

        std::fs::write(&path, "1 1 A\n3 one B\n").unwrap();
        assert!(matches!(
            load(&path),
            Err(PersistenceError::Malformed { line: 2, .. })
        ));

        std::fs::write(&path, "1 1 A\n1 1 C\n").unwrap();
        assert!(matches!(
            load(&path),
            Err(PersistenceError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("none.solution")),
            Err(PersistenceError::Io { .. })
        ));
    }
}
