// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A linear-time regular expression engine compatible with the RE2
//! dialect.
//!
//! Patterns are compiled to a flat NFA program and executed by a
//! lockstep simulation, so match time is O(n·m) in the subject length
//! and the program size for *every* pattern: there is no input that can
//! trigger catastrophic backtracking. The price is the RE2 trade-off:
//! backreferences are rejected at compile time rather than matched by a
//! backtracking fallback.
//!
//! # Example
//!
//! ```
//! use linregex::{Flags, Regex};
//!
//! let re = Regex::new(r"(?m)^(\w+): (\d+)$").unwrap();
//! let caps = re.captures("alpha: 7\nbeta: 9").unwrap();
//! assert_eq!(caps.pos(1), Some((0, 5)));
//! assert_eq!(caps.pos(2), Some((7, 8)));
//!
//! // Flags can also be passed explicitly.
//! let re = Regex::with_flags("caf\u{e9}", Flags::CASE_INSENSITIVE).unwrap();
//! assert!(re.is_match("Visit the CAF\u{c9}!"));
//! ```
//!
//! # Dialect notes
//!
//! * `\d`, `\s`, `\w` and the word boundary `\b` are ASCII, as in RE2.
//!   Unicode classes are available through `\p{...}` over a fixed set of
//!   general categories and scripts.
//! * Case folding is *simple* fold only: one code point maps to one
//!   code point, so `ß` never matches `ss`.
//! * `^` and `$` are text anchors unless `(?m)` is set, in which case
//!   they also match around `\n` (and only `\n`; there is no CRLF mode).
//! * Lookahead `(?=e)`/`(?!e)` is supported for any inner expression;
//!   lookbehind `(?<=e)`/`(?<!e)` requires a fixed-width inner
//!   expression and is rejected with an `Unsupported` error otherwise.
//! * Backreferences (`\1`, `(?P=name)`) are always rejected with an
//!   `Unsupported` error.
//!
//! Subjects are byte strings: the `*_bytes` entry points accept invalid
//! UTF-8 and treat each invalid byte as one U+FFFD replacement
//! character, which is never a word character and matches no literal.

#![deny(missing_docs)]

mod arena;
mod ast;
mod backtrack;
mod charclass;
mod compile;
mod error;
mod exec;
mod flags;
mod input;
mod inst;
mod literals;
mod nfa;
mod parse;
mod pool;
mod program;
mod re;
mod unicode;
mod utf8;

pub use crate::error::Error;
pub use crate::flags::Flags;
pub use crate::re::{
    match_string, Captures, FindMatches, PatternStats, Regex, Splits, DEFAULT_SIZE_LIMIT,
};

#[doc(hidden)]
pub use crate::exec::MatchEngine;
