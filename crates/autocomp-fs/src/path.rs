//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Replace every backslash with a forward slash.
pub fn slash(s: &str) -> String {
    s.replace('\\', "/")
}

/// A path normalized to use forward slashes internally.
///
/// Component identity is the path string, so every path entering the
/// registry goes through this type. Conversion to a platform-native path
/// happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes; does not touch `.` or `..`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: slash(&path_str),
        }
    }

    /// Resolve `path` against `base` lexically, like `path.resolve(base, path)`.
    ///
    /// An absolute `path` ignores `base`. `.` and `..` segments are folded
    /// and duplicate separators collapsed. The filesystem is never consulted.
    pub fn resolve(base: &NormalizedPath, path: &str) -> Self {
        let path = slash(path);
        let joined = if is_absolute_str(&path) {
            path
        } else {
            format!("{}/{}", base.inner, path)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = slash(segment);
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the file name without its final extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Whether the path is rooted (`/...` or a drive letter such as `C:/...`).
    pub fn is_absolute(&self) -> bool {
        is_absolute_str(&self.inner)
    }

    /// Return the remainder of this path below `dir`.
    ///
    /// Matches only on a segment boundary: `/src/components2/A` is not
    /// below `/src/components`. Returns `Some("")` when both are equal.
    pub fn strip_dir(&self, dir: &NormalizedPath) -> Option<&str> {
        let dir = dir.inner.trim_end_matches('/');
        let rest = self.inner.strip_prefix(dir)?;
        if rest.is_empty() {
            Some("")
        } else {
            rest.strip_prefix('/')
        }
    }

    /// The same path with one leading `/` removed.
    pub fn without_leading_slash(&self) -> &str {
        self.inner.strip_prefix('/').unwrap_or(&self.inner)
    }

    /// Lexical path from the directory `base` to this path.
    ///
    /// Both paths must be absolute for the result to be meaningful.
    pub fn relative_to(&self, base: &NormalizedPath) -> String {
        let from: Vec<&str> = base.inner.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.inner.split('/').filter(|s| !s.is_empty()).collect();
        let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

        let mut parts: Vec<&str> = std::iter::repeat_n("..", from.len() - common).collect();
        parts.extend(&to[common..]);
        parts.join("/")
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Canonicalize a project root and normalize it.
///
/// Uses `dunce` so Windows roots do not come back as `\\?\` UNC paths.
pub fn canonicalize_root(path: impl AsRef<Path>) -> Result<NormalizedPath> {
    let path = path.as_ref();
    let canonical = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
    Ok(NormalizedPath::new(canonical))
}

fn is_absolute_str(s: &str) -> bool {
    if s.starts_with('/') {
        return true;
    }
    let bytes = s.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/')
}

fn clean(s: &str) -> String {
    let (prefix, rest) = if let Some(rest) = s.strip_prefix('/') {
        ("/".to_string(), rest)
    } else if is_absolute_str(s) {
        (format!("{}/", &s[..2]), s[2..].trim_start_matches('/'))
    } else {
        (String::new(), s)
    };
    let absolute = !prefix.is_empty();

    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (absolute, body.is_empty()) {
        (true, _) => format!("{prefix}{body}"),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
