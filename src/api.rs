// api.rs - High-level glob API.
//
// Wraps the compiler and matcher with owned types: Glob, GlobBuilder, plus
// the one-shot is_match helper and escape.

use std::fmt;
use std::str::FromStr;

use crate::error::{AllocError, CompileError, Error};
use crate::exec;
use crate::flags::MatchFlags;
use crate::node::{is_operator, Pattern};
use crate::parse::compile;

/// A compiled glob pattern.
///
/// Immutable once built; match it against as many inputs as needed, from
/// any number of threads.
///
/// # Examples
///
/// ```
/// use globrune::api::Glob;
///
/// let glob = Glob::new("src/**/*.rs").unwrap();
/// assert!(glob.is_match("src/parse/mod.rs").unwrap());
/// assert!(!glob.is_match("tests/api.rs").unwrap());
/// ```
#[derive(Clone)]
pub struct Glob {
    source: String,
    pattern: Pattern,
    flags: MatchFlags,
}

impl Glob {
    /// Compile a pattern with default flags.
    pub fn new(pattern: &str) -> Result<Glob, CompileError> {
        GlobBuilder::new(pattern).build()
    }

    /// Create a [`GlobBuilder`] for control over match flags.
    pub fn builder(pattern: &str) -> GlobBuilder {
        GlobBuilder::new(pattern)
    }

    /// Check whether `input` matches.
    ///
    /// Only fails if the scratch buffer for the decoded input cannot be
    /// allocated.
    pub fn is_match(&self, input: &str) -> Result<bool, AllocError> {
        let matched = exec::is_match(&self.pattern, input, self.flags)?;
        tracing::trace!(glob = %self.source, input_len = input.len(), matched, "glob match");
        Ok(matched)
    }

    /// The pattern text this glob was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled node sequence.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn flags(&self) -> MatchFlags {
        self.flags
    }
}

impl fmt::Debug for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glob")
            .field("source", &self.source)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Glob {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Glob, CompileError> {
        Glob::new(s)
    }
}

// === GlobBuilder ===

/// Builder for compiling a [`Glob`] with custom flags.
///
/// # Examples
///
/// ```
/// use globrune::api::Glob;
///
/// let glob = Glob::builder("*.rs").full_match(true).build().unwrap();
/// assert!(glob.is_match("main.rs").unwrap());
/// assert!(!glob.is_match("main.rs.bak").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct GlobBuilder {
    pattern: String,
    flags: MatchFlags,
}

impl GlobBuilder {
    pub fn new(pattern: &str) -> Self {
        GlobBuilder {
            pattern: pattern.to_string(),
            flags: MatchFlags::empty(),
        }
    }

    /// Require the pattern to consume the whole input. Brace alternatives
    /// are then retried when the rest of the pattern fails, so `{*}.rs`
    /// matches `main.rs`.
    pub fn full_match(mut self, yes: bool) -> Self {
        self.flags.set(MatchFlags::FULL_MATCH, yes);
        self
    }

    /// Use the separator-only `**` expansion with its fallback.
    /// See [`MatchFlags::LEGACY_GLOBSTAR`].
    pub fn legacy_globstar(mut self, yes: bool) -> Self {
        self.flags.set(MatchFlags::LEGACY_GLOBSTAR, yes);
        self
    }

    /// Let negated classes end the match early.
    /// See [`MatchFlags::LEGACY_NEGATION`].
    pub fn legacy_negation(mut self, yes: bool) -> Self {
        self.flags.set(MatchFlags::LEGACY_NEGATION, yes);
        self
    }

    /// Add raw flags.
    pub fn flags(mut self, flags: MatchFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Compile the pattern into a [`Glob`].
    pub fn build(self) -> Result<Glob, CompileError> {
        match compile(&self.pattern) {
            Ok(pattern) => {
                tracing::debug!(
                    glob = %self.pattern,
                    nodes = pattern.len(),
                    flags = ?self.flags,
                    "compiled glob"
                );
                Ok(Glob {
                    source: self.pattern,
                    pattern,
                    flags: self.flags,
                })
            }
            Err(err) => {
                tracing::debug!(glob = %self.pattern, error = %err, "glob failed to compile");
                Err(err)
            }
        }
    }
}

// === One-shot helpers ===

/// Compile `pattern`, match it against `input` once, and release it.
///
/// # Examples
///
/// ```
/// assert!(globrune::is_match("?at", "cat").unwrap());
/// assert!(globrune::is_match("[", "x").is_err());
/// ```
pub fn is_match(pattern: &str, input: &str) -> Result<bool, Error> {
    let glob = Glob::new(pattern)?;
    Ok(glob.is_match(input)?)
}

/// Escape every operator rune in `text`, producing a pattern that matches
/// `text` literally. Separators stay as they are and compile to path
/// separators.
///
/// # Examples
///
/// ```
/// use globrune::api::{escape, Glob};
///
/// assert_eq!(escape("a*b[1].txt"), r"a\*b\[1\].txt");
/// let glob = Glob::new(&escape("what?")).unwrap();
/// assert!(glob.is_match("what?").unwrap());
/// assert!(!glob.is_match("whatx").unwrap());
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_operator(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_new_and_match() {
        let glob = Glob::new("foo/*.bar").unwrap();
        assert!(glob.is_match("foo/x.bar").unwrap());
        assert!(!glob.is_match("foo/x/y.bar").unwrap());
        assert_eq!(glob.as_str(), "foo/*.bar");
        assert_eq!(glob.to_string(), "foo/*.bar");
        assert_eq!(glob.pattern().len(), 4);
        assert_eq!(glob.flags(), MatchFlags::empty());
    }

    #[test]
    fn glob_from_str() {
        let glob: Glob = "{a,b}".parse().unwrap();
        assert!(glob.is_match("b").unwrap());
        assert!("{a,b".parse::<Glob>().is_err());
    }

    #[test]
    fn builder_toggles_flags() {
        let builder = Glob::builder("x")
            .full_match(true)
            .legacy_globstar(true)
            .legacy_negation(true);
        let glob = builder.clone().build().unwrap();
        assert_eq!(glob.flags(), MatchFlags::all());

        let glob = builder.full_match(false).build().unwrap();
        assert!(!glob.flags().contains(MatchFlags::FULL_MATCH));
        assert!(glob.flags().contains(MatchFlags::LEGACY_GLOBSTAR));
    }

    #[test]
    fn builder_raw_flags() {
        let glob = Glob::builder("a")
            .flags(MatchFlags::FULL_MATCH)
            .build()
            .unwrap();
        assert!(glob.is_match("a").unwrap());
        assert!(!glob.is_match("ab").unwrap());
    }

    #[test]
    fn builder_propagates_compile_errors() {
        let err = Glob::builder("[!").build().unwrap_err();
        assert!(matches!(err, CompileError::Expected { expected: "]", .. }));
    }

    #[test]
    fn one_shot_is_match() {
        assert!(is_match("*/bin", "usr/bin").unwrap());
        assert!(!is_match("*/bin", "bin").unwrap());
        assert!(matches!(
            is_match("a\\", "a").unwrap_err(),
            Error::Compile(CompileError::UnexpectedEnd { offset: 1 })
        ));
    }

    #[test]
    fn escape_operators() {
        assert_eq!(escape("plain/path"), "plain/path");
        assert_eq!(escape(r"{a,b}\?"), r"\{a\,b\}\\\?");
    }

    #[test]
    fn escaped_text_matches_itself() {
        for text in ["a*b", "[x]", "{1,2}", r"back\slash", "q?", "日本"] {
            let glob = Glob::builder(&escape(text)).full_match(true).build().unwrap();
            assert!(glob.is_match(text).unwrap(), "text {:?}", text);
        }
    }

    #[test]
    fn debug_output() {
        let glob = Glob::new("a").unwrap();
        let dbg = format!("{:?}", glob);
        assert!(dbg.starts_with("Glob {"));
        assert!(dbg.contains("source: \"a\""));
    }

    #[test]
    fn glob_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Glob>();
        assert_send_sync::<Pattern>();
    }
}
