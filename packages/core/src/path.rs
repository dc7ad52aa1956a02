//! Traversal paths used for diagnostics.

use std::fmt;

/// One step from a container to one of its children.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum PathSegment {
    /// A field name inside a map.
    Key(String),
    /// A position inside a list.
    Index(usize),
}

impl PathSegment {
    /// The key, if this segment is one.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }

    /// The index, if this segment is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// The position of a traversal inside a value tree.
///
/// A path is the ordered sequence of keys and indices from the root to the
/// frame currently being encoded or decoded. It is carried by every error so
/// callers can tell exactly where a conversion failed. Paths are never used
/// to address values during a conversion.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path, pointing at the root value.
    pub fn root() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Parse a `/`-separated path string.
    ///
    /// # Path Syntax
    ///
    /// - Segments are separated by `/`
    /// - Empty segments are ignored (normalizes `//` and trailing `/`)
    /// - Purely numeric segments are list indices, everything else is a key
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapcoder_core::{Path, PathSegment};
    ///
    /// let path = Path::parse("users/3/name");
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path[1], PathSegment::Index(3));
    ///
    /// // Trailing slashes are normalized
    /// assert_eq!(Path::parse("foo/bar/"), Path::parse("foo/bar"));
    /// ```
    pub fn parse(s: &str) -> Self {
        let segments = s
            .split('/')
            .filter(|c| !c.is_empty())
            .map(|c| match c.parse::<usize>() {
                Ok(index) if c.chars().all(|ch| ch.is_ascii_digit()) => PathSegment::Index(index),
                _ => PathSegment::Key(c.to_string()),
            })
            .collect();
        Path { segments }
    }

    /// Check if this path is empty (root path).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// A new path with one more segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Path {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }

    /// Check if this path has the given prefix.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        prefix.segments.len() <= self.segments.len()
            && prefix.segments == self.segments[..prefix.segments.len()]
    }

    /// The keys of this path, with indices rendered as strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.segments.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Path {
    type Output = PathSegment;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Path { segments }
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Macro for writing paths in tests and diagnostics.
///
/// # Example
///
/// ```rust
/// use mapcoder_core::path;
///
/// let p = path!("users/123/name");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_paths() {
        assert_eq!(Path::parse("").len(), 0);
        assert_eq!(Path::parse("foo").len(), 1);
        assert_eq!(Path::parse("foo/bar").len(), 2);
        assert_eq!(Path::parse("foo/bar/baz").len(), 3);
    }

    #[test]
    fn normalize_slashes() {
        assert_eq!(Path::parse("foo/bar/"), Path::parse("foo/bar"));
        assert_eq!(Path::parse("foo//bar"), Path::parse("foo/bar"));
        assert_eq!(Path::parse("/foo/bar"), Path::parse("foo/bar"));
    }

    #[test]
    fn numeric_segments_are_indices() {
        let p = Path::parse("items/0/name");
        assert_eq!(p[0], PathSegment::Key("items".to_string()));
        assert_eq!(p[1], PathSegment::Index(0));
        assert_eq!(p[1].as_index(), Some(0));
        assert_eq!(p[2].as_key(), Some("name"));
    }

    #[test]
    fn signed_numbers_are_keys() {
        let p = Path::parse("+1");
        assert_eq!(p[0], PathSegment::Key("+1".to_string()));
    }

    #[test]
    fn push_and_pop() {
        let mut p = Path::root();
        p.push("outer");
        p.push(2usize);
        assert_eq!(p.to_string(), "outer/2");
        assert_eq!(p.pop(), Some(PathSegment::Index(2)));
        assert_eq!(p.last(), Some(&PathSegment::Key("outer".to_string())));
    }

    #[test]
    fn child_leaves_parent_untouched() {
        let parent = path!("a");
        let child = parent.child("b");
        assert_eq!(parent.len(), 1);
        assert_eq!(child, path!("a/b"));
        assert!(child.has_prefix(&parent));
        assert!(!parent.has_prefix(&child));
    }

    #[test]
    fn join_method() {
        let joined = path!("foo/bar").join(&path!("baz/0"));
        assert_eq!(joined.to_string(), "foo/bar/baz/0");
    }

    #[test]
    fn display_root() {
        assert_eq!(Path::root().to_string(), "<root>");
    }

    #[test]
    fn to_strings_renders_indices() {
        assert_eq!(path!("a/3/b").to_strings(), vec!["a", "3", "b"]);
    }

    #[test]
    fn from_iter_of_keys() {
        let p: Path = ["outer", "inner"].into_iter().collect();
        assert_eq!(p, path!("outer/inner"));
    }

    #[test]
    fn path_ord() {
        assert!(path!("a/b") < path!("a/c"));
        assert!(path!("a/c") < path!("b/a"));
    }
}
