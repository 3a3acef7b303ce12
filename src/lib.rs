//! # globrune
//!
//! Glob pattern compiler and backtracking matcher. Patterns compile once into
//! an immutable node sequence that can be matched against any number of
//! inputs. Matching works on code points, never touches the filesystem, and
//! treats both `/` and `\` in the input as path separators.
//!
//! ## Quick Start
//!
//! ```rust
//! use globrune::prelude::*;
//!
//! let glob = Glob::new("src/**/*.rs").unwrap();
//! assert!(glob.is_match("src/api/mod.rs").unwrap());
//! assert!(!glob.is_match("benches/bench.rs").unwrap());
//! ```
//!
//! ## Syntax
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `/` | one path separator (`/` or `\`) |
//! | `?` | one rune other than a separator |
//! | `*` | any run of runes inside one path segment |
//! | `**` | any number of path segments |
//! | `{a,b}` | the first alternative that matches on its own |
//! | `[ab]`, `[a-z]` | one rune from the set |
//! | `[!ab]` | one rune not in the set |
//! | `\x` | `x` literally |
//!
//! A brace group keeps the span of its first matching alternative even when
//! the rest of the pattern then fails: `*` closing an alternative matches
//! zero runes, so `{*}.rs` does not match `main.rs`.
//!
//! By default a pattern only has to match a prefix of the input; use
//! [`GlobBuilder::full_match`] to require the whole input. Under a full
//! match brace alternatives are retried against the rest of the pattern.
//! Braces nest at most [`parse::MAX_GROUP_DEPTH`] levels deep.
//!
//! ## Low-Level API
//!
//! ```rust
//! use globrune::exec::is_match;
//! use globrune::flags::MatchFlags;
//! use globrune::node::Node;
//! use globrune::parse::compile;
//!
//! let pattern = compile("[!c]at").unwrap();
//! assert_eq!(pattern.nodes()[1], Node::literal("at").unwrap());
//! assert!(is_match(&pattern, "bat", MatchFlags::empty()).unwrap());
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`parse`] | Pattern compiler |
//! | [`exec`] | Backtracking matcher |
//! | [`node`] | Compiled node types |
//! | [`flags`] | Match options |
//! | [`api`] | `Glob`, `GlobBuilder`, one-shot helpers |
//! | [`set`] | Matching against many globs at once |
//! | [`error`] | Error types |

pub mod api;
pub mod error;
pub mod exec;
pub mod flags;
pub mod node;
pub mod parse;
pub mod prelude;
pub mod set;

pub use api::{escape, is_match, Glob, GlobBuilder};
pub use error::{AllocError, CompileError, Error};
pub use flags::MatchFlags;
pub use set::GlobSet;
