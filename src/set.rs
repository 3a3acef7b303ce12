// set.rs - Matching one input against many globs.
//
// The input is decoded once per call and shared by every glob in the set.

use crate::api::Glob;
use crate::error::{AllocError, CompileError};
use crate::exec::{decode, match_runes};

/// An ordered collection of compiled globs.
///
/// # Examples
///
/// ```
/// use globrune::set::GlobSet;
///
/// let set = GlobSet::new(["*.rs", "Cargo.{toml,lock}", "docs/**/*.md"]).unwrap();
/// assert_eq!(set.first_match("Cargo.lock").unwrap(), Some(1));
/// assert_eq!(set.matches("docs/a/b.md").unwrap(), vec![2]);
/// assert!(!set.is_match("build.sh").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    globs: Vec<Glob>,
}

impl GlobSet {
    /// Compile every pattern with default flags. Fails on the first pattern
    /// that does not compile.
    pub fn new<'p, I>(patterns: I) -> Result<GlobSet, CompileError>
    where
        I: IntoIterator<Item = &'p str>,
    {
        let globs = patterns
            .into_iter()
            .map(Glob::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GlobSet { globs })
    }

    /// Build a set from already compiled globs, keeping their flags.
    pub fn from_globs(globs: Vec<Glob>) -> GlobSet {
        GlobSet { globs }
    }

    pub fn push(&mut self, glob: Glob) {
        self.globs.push(glob);
    }

    pub fn len(&self) -> usize {
        self.globs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Glob> {
        self.globs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glob> {
        self.globs.iter()
    }

    /// Whether any glob matches `input`.
    pub fn is_match(&self, input: &str) -> Result<bool, AllocError> {
        Ok(self.first_match(input)?.is_some())
    }

    /// Index of the first glob, in insertion order, that matches `input`.
    pub fn first_match(&self, input: &str) -> Result<Option<usize>, AllocError> {
        let runes = decode(input)?;
        for (i, glob) in self.globs.iter().enumerate() {
            if match_runes(glob.pattern(), &runes, glob.flags())? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    /// Indices of every glob that matches `input`, in insertion order.
    pub fn matches(&self, input: &str) -> Result<Vec<usize>, AllocError> {
        let runes = decode(input)?;
        let mut hits = Vec::new();
        for (i, glob) in self.globs.iter().enumerate() {
            if match_runes(glob.pattern(), &runes, glob.flags())? {
                hits.try_reserve(1)?;
                hits.push(i);
            }
        }
        tracing::trace!(globs = self.globs.len(), hits = hits.len(), "glob set match");
        Ok(hits)
    }
}

impl FromIterator<Glob> for GlobSet {
    fn from_iter<T: IntoIterator<Item = Glob>>(iter: T) -> Self {
        GlobSet {
            globs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GlobSet {
    type Item = &'a Glob;
    type IntoIter = std::slice::Iter<'a, Glob>;

    fn into_iter(self) -> Self::IntoIter {
        self.globs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_matches_nothing() {
        let set = GlobSet::default();
        assert!(set.is_empty());
        assert!(!set.is_match("anything").unwrap());
        assert_eq!(set.first_match("anything").unwrap(), None);
        assert!(set.matches("anything").unwrap().is_empty());
    }

    #[test]
    fn first_match_respects_order() {
        let set = GlobSet::new(["*.txt", "notes*", "*"]).unwrap();
        assert_eq!(set.first_match("notes.txt").unwrap(), Some(0));
        assert_eq!(set.first_match("notes.md").unwrap(), Some(1));
        assert_eq!(set.first_match("x").unwrap(), Some(2));
        assert_eq!(set.matches("notes.txt").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn compile_error_stops_construction() {
        let err = GlobSet::new(["ok", "{broken", "[also"]).unwrap_err();
        assert!(matches!(err, CompileError::Expected { expected: "}", .. }));
    }

    #[test]
    fn per_glob_flags_are_kept() {
        let set: GlobSet = [
            Glob::builder("a").full_match(true).build().unwrap(),
            Glob::new("a").unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.matches("ab").unwrap(), vec![1]);
        assert_eq!(set.matches("a").unwrap(), vec![0, 1]);
    }

    #[test]
    fn push_get_and_iterate() {
        let mut set = GlobSet::from_globs(vec![Glob::new("x").unwrap()]);
        set.push(Glob::new("y").unwrap());
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).map(Glob::as_str), Some("y"));
        assert!(set.get(2).is_none());
        let sources: Vec<&str> = set.iter().map(Glob::as_str).collect();
        assert_eq!(sources, vec!["x", "y"]);
        assert_eq!((&set).into_iter().count(), 2);
    }
}
