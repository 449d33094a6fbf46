// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use crate::error::Error;
use crate::exec::{Executor, MatchEngine};
use crate::flags::Flags;

/// The default cap on compiled program size, in instructions.
pub const DEFAULT_SIZE_LIMIT: usize = 100_000;

/// A compiled regular expression.
///
/// A `Regex` is immutable once built and can be shared freely across
/// threads; concurrent matches borrow scratch space from an internal
/// pool, so no external locking is needed.
///
/// # Example
///
/// ```
/// use linregex::Regex;
///
/// let re = Regex::new(r"(\w+)-(\d+)").unwrap();
/// assert_eq!(re.find("see item-42 here"), Some((4, 11)));
/// let caps = re.captures("see item-42 here").unwrap();
/// assert_eq!(caps.pos(1), Some((4, 8)));
/// assert_eq!(caps.pos(2), Some((9, 11)));
/// ```
#[derive(Clone, Debug)]
pub struct Regex {
    exec: Executor,
}

impl fmt::Display for Regex {
    /// Shows the original pattern.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Summary numbers describing a compiled pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternStats {
    /// Number of nodes in the pattern's syntax tree.
    pub ast_nodes: usize,
    /// Number of capture groups, the implicit whole-match group
    /// included.
    pub capture_count: usize,
    /// Number of instructions in the compiled program.
    pub program_size: usize,
}

impl Regex {
    /// Compile a pattern with no flags set.
    pub fn new(re: &str) -> Result<Regex, Error> {
        Regex::with_flags(re, Flags::empty())
    }

    /// Compile a pattern with the given flag set. Equivalent to
    /// prefixing the pattern with the corresponding `(?...)` group.
    pub fn with_flags(re: &str, flags: Flags) -> Result<Regex, Error> {
        Regex::with_engine(MatchEngine::Automatic, DEFAULT_SIZE_LIMIT, re, flags)
    }

    /// Compile with an explicit engine preference and program size cap.
    ///
    /// N.B. This is exported for use in testing.
    #[doc(hidden)]
    pub fn with_engine(
        engine: MatchEngine,
        size_limit: usize,
        re: &str,
        flags: Flags,
    ) -> Result<Regex, Error> {
        Ok(Regex { exec: Executor::new(re, flags, engine, size_limit)? })
    }

    /// The original pattern text.
    pub fn as_str(&self) -> &str {
        &self.exec.prog().original
    }

    /// Returns true if and only if the subject contains a match.
    pub fn is_match(&self, text: &str) -> bool {
        self.is_match_bytes(text.as_bytes())
    }

    /// `is_match` over raw bytes. Invalid UTF-8 is tolerated: each bad
    /// byte is treated as one replacement character.
    pub fn is_match_bytes(&self, text: &[u8]) -> bool {
        self.exec.exec(&mut [], text, 0)
    }

    /// The byte offsets `(start, end)` of the leftmost match, if any.
    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        self.find_bytes(text.as_bytes())
    }

    /// `find` over raw bytes.
    pub fn find_bytes(&self, text: &[u8]) -> Option<(usize, usize)> {
        let mut caps = [None, None];
        if self.exec.exec(&mut caps, text, 0) {
            Some((caps[0]?, caps[1]?))
        } else {
            None
        }
    }

    /// Match and report all capture groups.
    pub fn captures(&self, text: &str) -> Option<Captures<'_>> {
        self.captures_bytes(text.as_bytes())
    }

    /// `captures` over raw bytes.
    pub fn captures_bytes(&self, text: &[u8]) -> Option<Captures<'_>> {
        let mut slots = self.exec.alloc_captures();
        if self.exec.exec(&mut slots, text, 0) {
            Some(Captures { names: self.exec.capture_names(), slots })
        } else {
            None
        }
    }

    /// Match the subject, writing capture offsets into a caller-owned
    /// slot array laid out as `[start0, end0, start1, end1, ...]`.
    ///
    /// A shorter array is allowed: captures beyond its length are simply
    /// not reported. Slots of unmatched groups are left `None`.
    pub fn read_captures(&self, text: &[u8], caps_out: &mut [Option<usize>]) -> bool {
        for slot in caps_out.iter_mut() {
            *slot = None;
        }
        self.exec.exec(caps_out, text, 0)
    }

    /// Like `find`, but gives up with `Error::Cancelled` after examining
    /// `max_steps` input positions. The budget is only checked at
    /// position boundaries, never inside an epsilon closure.
    pub fn find_bounded(
        &self,
        text: &str,
        max_steps: u64,
    ) -> Result<Option<(usize, usize)>, Error> {
        let mut caps = [None, None];
        if self.exec.exec_bounded(&mut caps, text.as_bytes(), 0, max_steps)? {
            Ok(caps[0].zip(caps[1]))
        } else {
            Ok(None)
        }
    }

    /// An iterator over every non-overlapping match, left to right.
    ///
    /// An empty match immediately at the end position of a previous
    /// match is skipped, so `a*` over `"aba"` yields `(0, 1)` and
    /// `(2, 3)` rather than an extra `(1, 1)`.
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> FindMatches<'r, 't> {
        FindMatches { re: self, text, last_end: 0, last_match: None }
    }

    /// An iterator over the substrings between matches, the way
    /// `find_iter` reports them. A trailing empty piece is produced when
    /// the final match ends at the end of the subject.
    pub fn split<'r, 't>(&'r self, text: &'t str) -> Splits<'r, 't> {
        Splits { finder: self.find_iter(text), last: 0, done: false }
    }

    /// The pattern's capture names. Index 0 is the whole match and is
    /// always unnamed; groups without a name are `None`.
    pub fn capture_names(&self) -> &[Option<String>] {
        self.exec.capture_names()
    }

    /// Summary numbers for this pattern.
    pub fn stats(&self) -> PatternStats {
        let prog = self.exec.prog();
        PatternStats {
            ast_nodes: prog.ast.len(),
            capture_count: prog.num_captures(),
            program_size: prog.insts.len(),
        }
    }
}

/// The capture offsets of one successful match.
#[derive(Clone, Debug)]
pub struct Captures<'r> {
    names: &'r [Option<String>],
    slots: Vec<Option<usize>>,
}

impl<'r> Captures<'r> {
    /// The `(start, end)` byte offsets of group `i`, or `None` when the
    /// group did not participate in the match. Group 0 is the whole
    /// match.
    pub fn pos(&self, i: usize) -> Option<(usize, usize)> {
        let start = *self.slots.get(2 * i)?;
        let end = *self.slots.get(2 * i + 1)?;
        start.zip(end)
    }

    /// The offsets of a named group.
    pub fn name(&self, name: &str) -> Option<(usize, usize)> {
        let i = self.names.iter().position(|n| n.as_deref() == Some(name))?;
        self.pos(i)
    }

    /// Number of groups, the whole match included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: group 0 exists for every match.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An iterator over all non-overlapping matches of a pattern in a
/// subject, as `(start, end)` byte offsets.
#[derive(Clone, Debug)]
pub struct FindMatches<'r, 't> {
    re: &'r Regex,
    text: &'t str,
    last_end: usize,
    last_match: Option<usize>,
}

impl<'r, 't> Iterator for FindMatches<'r, 't> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        loop {
            if self.last_end > self.text.len() {
                return None;
            }
            let mut caps = [None, None];
            if !self.re.exec.exec(&mut caps, self.text.as_bytes(), self.last_end) {
                return None;
            }
            let (s, e) = (caps[0]?, caps[1]?);
            if s == e {
                // An empty match must not hold up the scan: step past it,
                // and swallow it entirely when it sits at the end of the
                // previous match.
                self.last_end = e
                    + self.text[e..].chars().next().map_or(1, char::len_utf8);
                if Some(e) == self.last_match {
                    continue;
                }
            } else {
                self.last_end = e;
            }
            self.last_match = Some(e);
            return Some((s, e));
        }
    }
}

/// An iterator over the substrings of a subject separated by matches of
/// a pattern.
#[derive(Clone, Debug)]
pub struct Splits<'r, 't> {
    finder: FindMatches<'r, 't>,
    last: usize,
    done: bool,
}

impl<'r, 't> Iterator for Splits<'r, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.done {
            return None;
        }
        match self.finder.next() {
            None => {
                self.done = true;
                Some(&self.finder.text[self.last..])
            }
            Some((s, e)) => {
                let piece = &self.finder.text[self.last..s];
                self.last = e;
                Some(piece)
            }
        }
    }
}

/// One-shot convenience: compile `pattern`, match it against `subject`,
/// free it, and report whether a match exists.
///
/// ```
/// assert_eq!(linregex::match_string(r"\d+", "order 66"), Ok(true));
/// assert!(linregex::match_string(r"(unclosed", "x").is_err());
/// ```
pub fn match_string(pattern: &str, subject: &str) -> Result<bool, Error> {
    Ok(Regex::new(pattern)?.is_match(subject))
}
