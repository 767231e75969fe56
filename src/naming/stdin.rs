//! Verbatim destination pairing: one input line per file argument.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::RenameError;

use super::paths::absolutize;

/// Read the destination for the next argument.
///
/// `Ok(None)` means a blank line (skip the argument). End of input is `NoInput`.
/// Blocks until a full line or end of input is available.
pub fn next_destination<R: BufRead>(input: &mut R, cwd: &Path) -> Result<Option<PathBuf>, RenameError> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|e| RenameError::Io {
        message: format!("reading standard input: {e}"),
        source: e,
    })?;
    if read == 0 {
        return Err(RenameError::NoInput);
    }
    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(&line);
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(absolutize(Path::new(line), cwd)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[cfg(unix)]
    #[test]
    fn lines_pair_in_order() {
        let mut input = Cursor::new("new.jpg\n\n/abs/x\r\nlast");
        let cwd = Path::new("/pics");
        assert_eq!(
            next_destination(&mut input, cwd).unwrap(),
            Some(PathBuf::from("/pics/new.jpg"))
        );
        assert_eq!(next_destination(&mut input, cwd).unwrap(), None);
        assert_eq!(next_destination(&mut input, cwd).unwrap(), Some(PathBuf::from("/abs/x")));
        assert_eq!(
            next_destination(&mut input, cwd).unwrap(),
            Some(PathBuf::from("/pics/last"))
        );
        assert!(matches!(next_destination(&mut input, cwd), Err(RenameError::NoInput)));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut input = Cursor::new(vec![0xff, 0xfe, b'\n']);
        let err = next_destination(&mut input, Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), "io");
    }
}
