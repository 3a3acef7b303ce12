// parse.rs - Glob pattern compiler.
//
// Single pass over the decoded runes of the pattern. Produces the node
// sequence that `exec` evaluates; every buffer grows through fallible
// reservation so allocator exhaustion surfaces as `CompileError::Alloc`.

use smallvec::SmallVec;

use crate::error::{AllocError, CompileError};
use crate::node::{Node, Pattern, Symbol};

const ESCAPE: char = '\\';

/// Deepest brace nesting a pattern may use.
pub const MAX_GROUP_DEPTH: usize = 256;

/// Runes that end a literal run at any nesting level.
#[inline]
fn ends_literal(c: char) -> bool {
    matches!(c, '/' | '*' | '?' | '{' | '[')
}

#[inline]
fn push<T>(v: &mut Vec<T>, item: T) -> Result<(), AllocError> {
    v.try_reserve(1)?;
    v.push(item);
    Ok(())
}

/// Compile `pattern` into a [`Pattern`].
///
/// # Examples
///
/// ```
/// use globrune::node::Node;
/// use globrune::parse::compile;
///
/// let p = compile("foo/*.rs").unwrap();
/// assert_eq!(
///     p.nodes(),
///     &[
///         Node::literal("foo").unwrap(),
///         Node::SLASH,
///         Node::ANY_TEXT,
///         Node::literal(".rs").unwrap(),
///     ]
/// );
/// ```
pub fn compile(pattern: &str) -> Result<Pattern, CompileError> {
    let mut runes: SmallVec<[char; 64]> = SmallVec::new();
    runes.try_reserve(pattern.len()).map_err(AllocError::from)?;
    runes.extend(pattern.chars());

    let mut parser = Parser {
        runes: &runes,
        pos: 0,
        depth: 0,
    };
    let nodes = parser.parse_sequence(&[])?;
    debug_assert!(parser.at_end());
    Ok(Pattern::from_nodes(nodes))
}

struct Parser<'a> {
    runes: &'a [char],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.runes.len()
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.runes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.runes.get(self.pos + ahead).copied()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expected(&self, expected: &'static str) -> CompileError {
        CompileError::Expected {
            expected,
            found: self.peek(),
            offset: self.pos,
        }
    }

    /// Parse nodes until end of input or an unescaped rune in `terminators`,
    /// which is left unconsumed.
    fn parse_sequence(&mut self, terminators: &[char]) -> Result<Vec<Node>, CompileError> {
        let mut nodes = Vec::new();
        while let Some(c) = self.peek() {
            if terminators.contains(&c) {
                break;
            }
            let node = match c {
                '/' => {
                    self.pos += 1;
                    Node::Symbol(Symbol::Slash)
                }
                '*' => {
                    self.pos += 1;
                    if self.eat('*') {
                        Node::Symbol(Symbol::Globstar)
                    } else {
                        Node::Symbol(Symbol::AnyText)
                    }
                }
                '?' => {
                    self.pos += 1;
                    Node::Symbol(Symbol::AnyChar)
                }
                '{' => self.parse_braces()?,
                '[' => self.parse_class()?,
                _ => self.parse_literal(terminators)?,
            };
            push(&mut nodes, node)?;
        }
        Ok(nodes)
    }

    /// A run of plain and escaped runes. Always consumes at least one rune.
    fn parse_literal(&mut self, terminators: &[char]) -> Result<Node, CompileError> {
        let mut buf: SmallVec<[char; 16]> = SmallVec::new();
        while let Some(c) = self.peek() {
            if !buf.is_empty() && (ends_literal(c) || terminators.contains(&c)) {
                break;
            }
            let c = if c == ESCAPE {
                self.escaped()?
            } else {
                self.pos += 1;
                c
            };
            buf.try_reserve(1).map_err(AllocError::from)?;
            buf.push(c);
        }

        let mut runes = Vec::new();
        runes.try_reserve_exact(buf.len()).map_err(AllocError::from)?;
        runes.extend_from_slice(&buf);
        Ok(Node::Literal(runes.into_boxed_slice()))
    }

    /// Consume `\` and the rune after it, returning the latter.
    fn escaped(&mut self) -> Result<char, CompileError> {
        let offset = self.pos;
        self.pos += 1;
        self.bump().ok_or(CompileError::UnexpectedEnd { offset })
    }

    /// `{alt,alt,...}`. Each alternative is a full sub-pattern.
    fn parse_braces(&mut self) -> Result<Node, CompileError> {
        let open = self.pos;
        if self.depth >= MAX_GROUP_DEPTH {
            return Err(CompileError::TooDeep { offset: open });
        }
        self.depth += 1;
        self.pos += 1;

        let mut patterns = Vec::new();
        loop {
            let alt = self.parse_sequence(&[',', '}'])?;
            match self.bump() {
                Some(',') => push(&mut patterns, alt)?,
                Some(_) => {
                    if patterns.is_empty() && alt.is_empty() {
                        return Err(CompileError::Expected {
                            expected: "group alternative",
                            found: Some('}'),
                            offset: open + 1,
                        });
                    }
                    push(&mut patterns, alt)?;
                    break;
                }
                None => return Err(self.expected("}")),
            }
        }

        self.depth -= 1;
        Ok(Node::Group {
            patterns,
            negate: false,
        })
    }

    /// `[...]` and `[!...]`: single runes and `x-y` ranges.
    fn parse_class(&mut self) -> Result<Node, CompileError> {
        self.pos += 1;
        let negate = self.eat('!');

        let mut patterns = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.expected("]")),
                Some(']') => {
                    if patterns.is_empty() {
                        return Err(self.expected("class member"));
                    }
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }

            let lo = self.class_rune()?;
            let is_range =
                self.peek() == Some('-') && self.peek_at(1).is_some_and(|next| next != ']');
            let member = if is_range {
                self.pos += 1;
                let offset = self.pos;
                let hi = self.class_rune()?;
                if hi < lo {
                    return Err(CompileError::Expected {
                        expected: "range upper bound not below lower bound",
                        found: Some(hi),
                        offset,
                    });
                }
                Node::Range(lo, hi)
            } else {
                let mut rune = Vec::new();
                rune.try_reserve_exact(1).map_err(AllocError::from)?;
                rune.push(lo);
                Node::Literal(rune.into_boxed_slice())
            };

            let mut alt = Vec::new();
            push(&mut alt, member)?;
            push(&mut patterns, alt)?;
        }

        Ok(Node::Group { patterns, negate })
    }

    fn class_rune(&mut self) -> Result<char, CompileError> {
        match self.peek() {
            Some(ESCAPE) => self.escaped(),
            Some(c) => {
                self.pos += 1;
                Ok(c)
            }
            None => Err(self.expected("]")),
        }
    }
}
