// flags.rs - Match option flags.

use bitflags::bitflags;

bitflags! {
    /// Options that change how a compiled pattern is evaluated.
    ///
    /// The empty set is the default: prefix matching, zero-or-more segment
    /// `**`, and negated classes that consume one rune.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatchFlags: u32 {
        /// The match must consume the whole input, not just a prefix.
        /// Brace alternatives stop committing: each one is tried together
        /// with the rest of the pattern until some path reaches the end.
        const FULL_MATCH = 1 << 0;
        /// `**` only resumes at separator positions; when none of them
        /// lets the rest match, it falls back to the last separator found
        /// (or the current position) and carries on from there.
        const LEGACY_GLOBSTAR = 1 << 1;
        /// A negated class that excludes the current rune ends the match
        /// successfully on the spot, without consuming anything or looking
        /// at the nodes after it.
        const LEGACY_NEGATION = 1 << 2;
    }
}

impl Default for MatchFlags {
    fn default() -> Self {
        MatchFlags::empty()
    }
}

impl MatchFlags {
    #[inline]
    pub(crate) fn full_match(self) -> bool {
        self.contains(MatchFlags::FULL_MATCH)
    }

    #[inline]
    pub(crate) fn legacy_globstar(self) -> bool {
        self.contains(MatchFlags::LEGACY_GLOBSTAR)
    }

    #[inline]
    pub(crate) fn legacy_negation(self) -> bool {
        self.contains(MatchFlags::LEGACY_NEGATION)
    }
}
