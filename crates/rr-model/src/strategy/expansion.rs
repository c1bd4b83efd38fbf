use serde::{Deserialize, Serialize};

/// What a directory token expands to.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirExpansion {
    /// Directories are ordinary tokens.
    #[default]
    None,
    /// Every non-directory entry below the directory, recursively.
    Files,
    /// Only the leaf directories below the directory.
    LeafDirs,
}

impl DirExpansion {
    /// Resolve from the `-r` / `-D` switches; `-D` implies recursion.
    pub fn from_flags(recursive: bool, leaf_dirs: bool) -> Self {
        if leaf_dirs {
            DirExpansion::LeafDirs
        } else if recursive {
            DirExpansion::Files
        } else {
            DirExpansion::None
        }
    }

    /// Returns `true` if directory tokens are walked at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, DirExpansion::None)
    }
}

#[cfg(test)]
mod tests {
    use super::DirExpansion;

    #[test]
    fn leaf_dirs_implies_recursion() {
        assert_eq!(DirExpansion::from_flags(false, true), DirExpansion::LeafDirs);
        assert_eq!(DirExpansion::from_flags(true, true), DirExpansion::LeafDirs);
        assert_eq!(DirExpansion::from_flags(true, false), DirExpansion::Files);
        assert!(!DirExpansion::from_flags(false, false).is_enabled());
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&DirExpansion::LeafDirs).unwrap();
        assert_eq!(json, r#""leafDirs""#);
    }
}
