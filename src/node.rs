// node.rs - Compiled pattern representation.
//
// A pattern compiles to a flat sequence of nodes. Groups nest further
// sequences, one per alternative.

use std::fmt;

/// Operator nodes without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A path separator: matches one `/` or `\`.
    Slash,
    /// `**`: may span any number of path segments.
    Globstar,
    /// `?`: one rune that is not a separator.
    AnyChar,
    /// `*`: any run of runes within the current segment.
    AnyText,
}

/// One element of a compiled pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Symbol(Symbol),
    /// Exact, non-empty rune sequence with escapes already resolved.
    Literal(Box<[char]>),
    /// Inclusive code point interval; matches exactly one rune.
    Range(char, char),
    /// Ordered alternatives. `{a,b}` produces arbitrary sub-sequences,
    /// `[...]` produces single-rune literals and ranges. Never empty.
    Group { patterns: Vec<Vec<Node>>, negate: bool },
}

impl Node {
    pub const SLASH: Node = Node::Symbol(Symbol::Slash);
    pub const GLOBSTAR: Node = Node::Symbol(Symbol::Globstar);
    pub const ANY_CHAR: Node = Node::Symbol(Symbol::AnyChar);
    pub const ANY_TEXT: Node = Node::Symbol(Symbol::AnyText);

    /// Build a literal node from text. `None` for empty text, since
    /// literals always hold at least one rune.
    pub fn literal(text: &str) -> Option<Node> {
        if text.is_empty() {
            return None;
        }
        Some(Node::Literal(text.chars().collect()))
    }

    /// Build a code point range node.
    pub fn range(lo: char, hi: char) -> Node {
        Node::Range(lo, hi)
    }

    /// Build a group node from its alternatives.
    pub fn group(patterns: Vec<Vec<Node>>, negate: bool) -> Node {
        Node::Group { patterns, negate }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Symbol(Symbol::Slash) => f.write_str("/"),
            Node::Symbol(Symbol::Globstar) => f.write_str("**"),
            Node::Symbol(Symbol::AnyChar) => f.write_str("?"),
            Node::Symbol(Symbol::AnyText) => f.write_str("*"),
            Node::Literal(runes) => {
                for &c in runes.iter() {
                    if is_operator(c) || c == '/' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                Ok(())
            }
            Node::Range(lo, hi) => {
                f.write_str("[")?;
                write_class_range(f, *lo, *hi)?;
                f.write_str("]")
            }
            Node::Group { patterns, negate } => {
                if *negate || patterns.iter().all(|alt| is_class_member(alt)) {
                    f.write_str(if *negate { "[!" } else { "[" })?;
                    for alt in patterns {
                        match alt.as_slice() {
                            [Node::Range(lo, hi)] => write_class_range(f, *lo, *hi)?,
                            [Node::Literal(r)] => {
                                for &c in r.iter() {
                                    write_class_rune(f, c)?;
                                }
                            }
                            other => write_sequence(f, other)?,
                        }
                    }
                    f.write_str("]")
                } else {
                    f.write_str("{")?;
                    for (i, alt) in patterns.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write_sequence(f, alt)?;
                    }
                    f.write_str("}")
                }
            }
        }
    }
}

fn is_class_member(alt: &[Node]) -> bool {
    match alt {
        [Node::Range(..)] => true,
        [Node::Literal(r)] => r.len() == 1,
        _ => false,
    }
}

fn write_class_rune(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    if matches!(c, ']' | '\\' | '-' | '!') {
        f.write_str("\\")?;
    }
    write!(f, "{}", c)
}

fn write_class_range(f: &mut fmt::Formatter<'_>, lo: char, hi: char) -> fmt::Result {
    write_class_rune(f, lo)?;
    f.write_str("-")?;
    write_class_rune(f, hi)
}

fn write_sequence(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for node in nodes {
        write!(f, "{}", node)?;
    }
    Ok(())
}

/// Runes that carry meaning in pattern text and need a `\` to be literal.
#[inline]
pub fn is_operator(c: char) -> bool {
    matches!(c, '*' | '?' | '{' | '}' | '[' | ']' | ',' | '\\')
}

/// Path separators recognized in match input.
#[inline]
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

// === Pattern ===

/// A compiled glob: an immutable, owned sequence of [`Node`]s.
///
/// Obtained from [`compile`](crate::parse::compile). Dropping the value
/// releases every node it owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pattern {
    nodes: Vec<Node>,
}

impl Pattern {
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Pattern {
        Pattern { nodes }
    }

    /// The top-level node sequence.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Renders the canonical pattern text; compiling it again yields an
/// equal `Pattern`.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, &self.nodes)
    }
}
