//! Turning the command line and list files into a prefix and parameters.
use std::{
    ffi::OsString,
    fs::File,
    io::{self, BufRead, BufReader},
    os::unix::ffi::OsStringExt,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use rr_core::error::CoreError;
use rr_model::{CommandPrefix, Token};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Can't read directory: {}", .0.display())]
    Directory(PathBuf),

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while walking {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Read every list file in order, one parameter per line.
pub fn read_lists(paths: &[PathBuf]) -> Result<Vec<Token>, InputError> {
    let mut words = Vec::new();
    for path in paths {
        let before = words.len();
        read_list(path, &mut words)?;
        debug!(file = %path.display(), lines = words.len() - before, "list file read");
    }
    Ok(words)
}

/// Lines are split on `\n` only and kept as raw bytes.
fn read_list(path: &Path, out: &mut Vec<Token>) -> Result<(), InputError> {
    if path.is_dir() {
        return Err(InputError::Directory(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    loop {
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| InputError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 {
            return Ok(());
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        out.push(OsString::from_vec(std::mem::take(&mut line)));
    }
}

/// Split the words into the fixed command and the parameters.
///
/// The first word is the program. A later `--` ends its fixed flags and is
/// dropped, unless `keep_dashdash` keeps it as the last prefix word.
/// Print-only runs have no command at all.
pub fn split_command(
    mut words: Vec<Token>,
    print_only: bool,
    keep_dashdash: bool,
) -> Result<(CommandPrefix, Vec<Token>), CoreError> {
    if print_only {
        return Ok((CommandPrefix::empty(), words));
    }
    if words.is_empty() {
        return Err(CoreError::Usage("missing command".to_string()));
    }

    let Some(sep) = words.iter().skip(1).position(|w| w == "--").map(|i| i + 1) else {
        let tokens = words.split_off(1);
        return Ok((CommandPrefix::new(words), tokens));
    };

    let tokens = words.split_off(sep + 1);
    if !keep_dashdash {
        words.pop();
    }
    Ok((CommandPrefix::new(words), tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn words(list: &[&str]) -> Vec<Token> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn command_without_separator() {
        let (prefix, tokens) = split_command(words(&["ls", "-l", "a"]), false, false).unwrap();
        assert_eq!(prefix.words(), words(&["ls"]).as_slice());
        assert_eq!(tokens, words(&["-l", "a"]));
    }

    #[test]
    fn separator_ends_fixed_flags() {
        let (prefix, tokens) =
            split_command(words(&["grep", "-i", "x", "--", "a", "b"]), false, false).unwrap();
        assert_eq!(prefix.to_string(), "grep -i x");
        assert_eq!(tokens, words(&["a", "b"]));

        let (prefix, tokens) =
            split_command(words(&["grep", "-i", "x", "--", "a", "b"]), false, true).unwrap();
        assert_eq!(prefix.to_string(), "grep -i x --");
        assert_eq!(tokens, words(&["a", "b"]));
    }

    #[test]
    fn only_the_first_separator_counts() {
        let (prefix, tokens) = split_command(words(&["cmd", "--", "--", "a"]), false, false).unwrap();
        assert_eq!(prefix.words(), words(&["cmd"]).as_slice());
        assert_eq!(tokens, words(&["--", "a"]));
    }

    #[test]
    fn program_named_dashdash_is_not_a_separator() {
        let (prefix, tokens) = split_command(words(&["--", "a"]), false, false).unwrap();
        assert_eq!(prefix.words(), words(&["--"]).as_slice());
        assert_eq!(tokens, words(&["a"]));
    }

    #[test]
    fn print_only_has_no_command() {
        let (prefix, tokens) = split_command(words(&["a", "--", "b"]), true, false).unwrap();
        assert!(prefix.is_empty());
        assert_eq!(tokens, words(&["a", "--", "b"]));
    }

    #[test]
    fn missing_command_is_a_usage_error() {
        let err = split_command(Vec::new(), false, false).unwrap_err();
        assert!(err.is_usage());
        assert!(split_command(Vec::new(), true, false).is_ok());
    }

    #[test]
    fn list_lines_are_raw() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"one\n\ntwo words\n\xff\xfe\nlast").unwrap();

        let got = read_lists(&[f.path().to_path_buf()]).unwrap();
        assert_eq!(got.len(), 5);
        assert_eq!(got[0], "one");
        assert_eq!(got[1], "");
        assert_eq!(got[2], "two words");
        assert_eq!(got[3].as_encoded_bytes(), b"\xff\xfe");
        assert_eq!(got[4], "last");
    }

    #[test]
    fn lists_are_read_in_order() {
        let mut a = tempfile::NamedTempFile::new().unwrap();
        let mut b = tempfile::NamedTempFile::new().unwrap();
        writeln!(a, "a1\na2").unwrap();
        writeln!(b, "b1").unwrap();

        let got = read_lists(&[b.path().to_path_buf(), a.path().to_path_buf()]).unwrap();
        assert_eq!(got, words(&["b1", "a1", "a2"]));
    }

    #[test]
    fn directory_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_lists(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, InputError::Directory(_)));
        assert!(err.to_string().starts_with("Can't read directory: "));
    }

    #[test]
    fn missing_file_reports_os_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let err = read_lists(&[path.clone()]).unwrap_err();
        match &err {
            InputError::Open { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with(&format!("Failed to open {}: ", path.display())));
    }
}
