// exec.rs - Backtracking matcher over compiled patterns.
//
// The input is decoded once into a rune buffer. Evaluation walks the node
// sequence with a cursor into that buffer; every node with more than one
// way to proceed (`*`, `**`, brace groups) pushes a choice point onto an
// explicit backtrack stack, so neither pattern length nor input length
// turns into call depth. No substring is ever copied.
//
// Brace alternatives continue into the rest of the pattern through a
// continuation chain. Without `FULL_MATCH` leaving an alternative cuts the
// stack back to the group's entry height, committing to that span.

use smallvec::SmallVec;

use crate::error::AllocError;
use crate::flags::MatchFlags;
use crate::node::{is_separator, Node, Pattern, Symbol};

/// Runes that fit here are decoded without touching the heap.
const INLINE_RUNES: usize = 128;

/// Decoded match input, scoped to a single match call.
pub(crate) type Runes = SmallVec<[char; INLINE_RUNES]>;

/// Decode `input` into runes. Reservation is fallible so exhaustion is
/// reported rather than aborting.
pub(crate) fn decode(input: &str) -> Result<Runes, AllocError> {
    let mut runes = Runes::new();
    // Byte length bounds the rune count from above.
    runes.try_reserve(input.len())?;
    runes.extend(input.chars());
    Ok(runes)
}

/// Match `input` against a compiled pattern.
///
/// Without [`MatchFlags::FULL_MATCH`] the pattern only has to be satisfied
/// by a prefix of the input; an empty pattern matches everything.
///
/// # Examples
///
/// ```
/// use globrune::exec::is_match;
/// use globrune::flags::MatchFlags;
/// use globrune::parse::compile;
///
/// let p = compile("*/bin").unwrap();
/// assert!(is_match(&p, "usr/bin", MatchFlags::empty()).unwrap());
/// assert!(!is_match(&p, "bin", MatchFlags::empty()).unwrap());
/// ```
pub fn is_match(pattern: &Pattern, input: &str, flags: MatchFlags) -> Result<bool, AllocError> {
    let runes = decode(input)?;
    match_runes(pattern, &runes, flags)
}

/// Match already-decoded input. Shared by single globs and glob sets.
pub(crate) fn match_runes(
    pattern: &Pattern,
    runes: &[char],
    flags: MatchFlags,
) -> Result<bool, AllocError> {
    Matcher::new(runes, flags).run(pattern.nodes(), 0)
}

/// Index of the first separator at or after `from`.
fn next_separator(runes: &[char], from: usize) -> Option<usize> {
    runes
        .get(from..)?
        .iter()
        .position(|&c| is_separator(c))
        .map(|i| from + i)
}

/// Where evaluation resumes once a brace alternative is consumed.
#[derive(Clone, Copy)]
struct Cont<'p> {
    rest: &'p [Node],
    parent: Option<usize>,
    /// Backtrack stack height at group entry; `None` keeps the
    /// alternative's choice points alive.
    cut: Option<usize>,
}

#[derive(Clone, Copy)]
struct State<'p> {
    nodes: &'p [Node],
    pos: usize,
    /// Index into the continuation arena.
    cont: Option<usize>,
}

/// A pending way to proceed, resumed on backtrack.
enum Choice<'p> {
    /// `*`: resume `rest` at `next`, growing one rune at a time until a
    /// separator is crossed.
    Span { rest: &'p [Node], next: usize },
    /// `**`: resume `rest` at the next separator at or after `from`.
    Separators { rest: &'p [Node], from: usize },
    /// Untried alternatives of a brace group, all starting at `pos`.
    Alternatives { alts: &'p [Vec<Node>], pos: usize },
}

impl<'p> Choice<'p> {
    fn advance(&mut self, runes: &[char]) -> Option<(&'p [Node], usize)> {
        match self {
            Choice::Span { rest, next } => {
                let at = *next;
                match runes.get(at.checked_sub(1)?) {
                    Some(&c) if !is_separator(c) => {}
                    _ => return None,
                }
                *next += 1;
                Some((*rest, at))
            }
            Choice::Separators { rest, from } => {
                let at = next_separator(runes, *from)?;
                *from = at + 1;
                Some((*rest, at))
            }
            Choice::Alternatives { alts, pos } => {
                let all: &'p [Vec<Node>] = *alts;
                let (alt, others) = all.split_first()?;
                *alts = others;
                Some((alt.as_slice(), *pos))
            }
        }
    }
}

struct Frame<'p> {
    choice: Choice<'p>,
    cont: Option<usize>,
    /// Arena length when the frame was pushed; continuations created
    /// after it are dead once it resumes.
    conts_len: usize,
}

enum Step {
    Next,
    Fail,
    Accept,
}

struct Matcher<'r, 'p> {
    runes: &'r [char],
    flags: MatchFlags,
    stack: SmallVec<[Frame<'p>; 16]>,
    conts: SmallVec<[Cont<'p>; 8]>,
}

impl<'r, 'p> Matcher<'r, 'p> {
    fn new(runes: &'r [char], flags: MatchFlags) -> Self {
        Matcher {
            runes,
            flags,
            stack: SmallVec::new(),
            conts: SmallVec::new(),
        }
    }

    #[inline]
    fn rune(&self, pos: usize) -> Option<char> {
        self.runes.get(pos).copied()
    }

    #[inline]
    fn is_separator_at(&self, pos: usize) -> bool {
        self.rune(pos).is_some_and(is_separator)
    }

    fn push_choice(&mut self, choice: Choice<'p>, cont: Option<usize>) -> Result<(), AllocError> {
        self.stack.try_reserve(1)?;
        self.stack.push(Frame {
            choice,
            cont,
            conts_len: self.conts.len(),
        });
        Ok(())
    }

    /// Evaluate `nodes` from rune index `pos` until some path reaches the
    /// end of the pattern, or every choice point is exhausted.
    fn run(&mut self, nodes: &'p [Node], pos: usize) -> Result<bool, AllocError> {
        let mut state = State {
            nodes,
            pos,
            cont: None,
        };
        loop {
            let nodes: &'p [Node] = state.nodes;
            let step = match nodes.split_first() {
                Some((node, rest)) => self.step(&mut state, node, rest)?,
                None => match state.cont {
                    Some(i) => {
                        let cont = self.conts[i];
                        if let Some(height) = cont.cut {
                            self.stack.truncate(height);
                        }
                        state.nodes = cont.rest;
                        state.cont = cont.parent;
                        Step::Next
                    }
                    None if !self.flags.full_match() || state.pos == self.runes.len() => {
                        Step::Accept
                    }
                    None => Step::Fail,
                },
            };
            match step {
                Step::Next => {}
                Step::Accept => return Ok(true),
                Step::Fail => match self.backtrack() {
                    Some(resumed) => state = resumed,
                    None => return Ok(false),
                },
            }
        }
    }

    /// Pop exhausted choice points until one yields a new state.
    fn backtrack(&mut self) -> Option<State<'p>> {
        while let Some(frame) = self.stack.last_mut() {
            if let Some((nodes, pos)) = frame.choice.advance(self.runes) {
                let cont = frame.cont;
                self.conts.truncate(frame.conts_len);
                return Some(State { nodes, pos, cont });
            }
            self.stack.pop();
        }
        None
    }

    fn step(
        &mut self,
        state: &mut State<'p>,
        node: &'p Node,
        rest: &'p [Node],
    ) -> Result<Step, AllocError> {
        let pos = state.pos;
        match node {
            Node::Symbol(Symbol::Slash) => {
                if !self.is_separator_at(pos) {
                    return Ok(Step::Fail);
                }
                state.pos += 1;
            }
            Node::Symbol(Symbol::AnyChar) => match self.rune(pos) {
                Some(c) if !is_separator(c) => state.pos += 1,
                _ => return Ok(Step::Fail),
            },
            Node::Symbol(Symbol::AnyText) => {
                // Zero width now, longer spans within the segment on retry.
                if self.rune(pos).is_some_and(|c| !is_separator(c)) {
                    self.push_choice(Choice::Span { rest, next: pos + 1 }, state.cont)?;
                }
            }
            Node::Symbol(Symbol::Globstar) => {
                if self.flags.legacy_globstar() {
                    // Separator positions only; with none left, carry on here.
                    if let Some(at) = next_separator(self.runes, pos) {
                        self.push_choice(Choice::Separators { rest, from: at + 1 }, state.cont)?;
                        state.pos = at;
                    }
                } else {
                    self.push_choice(Choice::Separators { rest, from: pos + 1 }, state.cont)?;
                }
            }
            Node::Literal(lit) => {
                let end = pos + lit.len();
                if self.runes.get(pos..end) != Some(&lit[..]) {
                    return Ok(Step::Fail);
                }
                state.pos = end;
            }
            Node::Range(lo, hi) => match self.rune(pos) {
                Some(c) if (*lo..=*hi).contains(&c) => state.pos += 1,
                _ => return Ok(Step::Fail),
            },
            Node::Group {
                patterns,
                negate: false,
            } => {
                let Some((first, others)) = patterns.split_first() else {
                    return Ok(Step::Fail);
                };
                let cut = (!self.flags.full_match()).then_some(self.stack.len());
                self.conts.try_reserve(1)?;
                self.conts.push(Cont {
                    rest,
                    parent: state.cont,
                    cut,
                });
                let cont = Some(self.conts.len() - 1);
                if !others.is_empty() {
                    self.push_choice(Choice::Alternatives { alts: others, pos }, cont)?;
                }
                state.nodes = first.as_slice();
                state.cont = cont;
                return Ok(Step::Next);
            }
            Node::Group {
                patterns,
                negate: true,
            } => {
                for alt in patterns {
                    if self.lookahead(alt, pos)? {
                        return Ok(Step::Fail);
                    }
                }
                if self.flags.legacy_negation() {
                    // Ends the enclosing sequence on the spot.
                    if state.cont.is_none() {
                        return Ok(Step::Accept);
                    }
                    state.nodes = &[];
                    return Ok(Step::Next);
                }
                if pos >= self.runes.len() {
                    return Ok(Step::Fail);
                }
                state.pos += 1;
            }
        }
        state.nodes = rest;
        Ok(Step::Next)
    }

    /// Whether `alt` on its own matches a prefix of the input at `pos`.
    fn lookahead(&self, alt: &[Node], pos: usize) -> Result<bool, AllocError> {
        Matcher::new(self.runes, self.flags.difference(MatchFlags::FULL_MATCH)).run(alt, pos)
    }
}
