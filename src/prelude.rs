// prelude.rs - Convenient re-exports for the glob API.
//
//! # Prelude
//!
//! ```
//! use globrune::prelude::*;
//!
//! let glob = Glob::new("*.{png,jpg}").unwrap();
//! assert!(glob.is_match("cat.jpg").unwrap());
//! ```

pub use crate::api::{escape, is_match, Glob, GlobBuilder};
pub use crate::error::{AllocError, CompileError, Error};
pub use crate::flags::MatchFlags;
pub use crate::set::GlobSet;
