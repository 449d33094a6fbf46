// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use log::debug;

use crate::backtrack::{self, Backtrack};
use crate::error::Error;
use crate::flags::Flags;
use crate::input::Input;
use crate::nfa::Nfa;
use crate::program::Program;

/// Executor manages the execution of a regular expression.
///
/// In particular, this manages the choice of which matching engine to
/// use to execute a regular expression on a given subject.
#[derive(Clone, Debug)]
pub struct Executor {
    /// The compiled program.
    prog: Program,
    /// A preference for matching engine selection.
    ///
    /// This defaults to Automatic, which means the matching engine is
    /// selected based on heuristics (such as the nature and size of the
    /// compiled program, in addition to the size of the subject).
    ///
    /// If either Nfa or Backtrack is set, then it is always used because
    /// either is capable of executing every compiled program on any
    /// input size.
    match_engine: MatchEngine,
}

/// The matching engines offered by this regex implementation.
///
/// N.B. This is exported for use in testing.
#[doc(hidden)]
#[derive(Clone, Copy, Debug)]
pub enum MatchEngine {
    /// Automatically choose the best matching engine based on
    /// heuristics.
    Automatic,
    /// A bounded backtracking implementation. About twice as fast as
    /// the NFA, but can only work on small regexes and small input.
    Backtrack,
    /// A full NFA simulation. Can always be employed but almost always
    /// the slowest choice.
    Nfa,
    /// If the entire regex is a literal and no capture groups have been
    /// requested, then we can degrade to a simple substring match.
    Literals,
}

impl Executor {
    /// Compile a pattern and wrap it with an engine preference.
    pub fn new(
        re: &str,
        flags: Flags,
        match_engine: MatchEngine,
        size_limit: usize,
    ) -> Result<Executor, Error> {
        let prog = Program::new(re, flags, size_limit)?;
        Ok(Executor { prog, match_engine })
    }

    /// The underlying program.
    pub fn prog(&self) -> &Program {
        &self.prog
    }

    /// The pattern's capture names, index 0 included.
    pub fn capture_names(&self) -> &[Option<String>] {
        &self.prog.cap_names
    }

    /// Allocate a full capture slot vector for this pattern.
    pub fn alloc_captures(&self) -> Vec<Option<usize>> {
        self.prog.alloc_captures()
    }

    /// Execute the pattern against `text`, starting the search at byte
    /// offset `start`. Populates `caps` (which may be shorter than the
    /// full slot count, down to empty) on a match.
    pub fn exec(&self, caps: &mut [Option<usize>], text: &[u8], start: usize) -> bool {
        match self.match_engine {
            MatchEngine::Nfa => self.exec_nfa(caps, text, start),
            MatchEngine::Backtrack => self.exec_backtrack(caps, text, start),
            MatchEngine::Literals => self.exec_literals(caps, text, start),
            MatchEngine::Automatic => self.exec_auto(caps, text, start),
        }
    }

    /// Execute with a step budget. Always runs the lockstep engine so
    /// the budget is checked exactly once per input position.
    pub fn exec_bounded(
        &self,
        caps: &mut [Option<usize>],
        text: &[u8],
        start: usize,
        limit: u64,
    ) -> Result<bool, Error> {
        Nfa::exec_bounded(&self.prog, caps, Input::new(text), start, limit)
    }

    fn exec_auto(&self, caps: &mut [Option<usize>], text: &[u8], start: usize) -> bool {
        if self.can_exec_literals(caps.len()) {
            self.exec_literals(caps, text, start)
        } else if backtrack::should_exec(self.prog.insts.len(), text.len()) {
            // We're only here if the input and regex combined are small.
            self.exec_backtrack(caps, text, start)
        } else {
            self.exec_nfa(caps, text, start)
        }
    }

    fn exec_nfa(&self, caps: &mut [Option<usize>], text: &[u8], start: usize) -> bool {
        debug!("engine: nfa, pattern: {}", self.prog.original);
        Nfa::exec(&self.prog, caps, Input::new(text), start)
    }

    fn exec_backtrack(&self, caps: &mut [Option<usize>], text: &[u8], start: usize) -> bool {
        debug!("engine: backtrack, pattern: {}", self.prog.original);
        Backtrack::exec(&self.prog, caps, Input::new(text), start)
    }

    fn exec_literals(&self, caps: &mut [Option<usize>], text: &[u8], start: usize) -> bool {
        if !self.can_exec_literals(caps.len()) {
            return self.exec_auto(caps, text, start);
        }
        debug!("engine: literals, pattern: {}", self.prog.original);
        match self.prog.prefixes.find(&text[start..]) {
            None => false,
            Some((s, e)) => {
                if caps.len() == 2 {
                    caps[0] = Some(start + s);
                    caps[1] = Some(start + e);
                }
                true
            }
        }
    }

    fn can_exec_literals(&self, cap_len: usize) -> bool {
        cap_len <= 2
            && self.prog.prefixes.at_match()
            && self.prog.prefixes.preserves_priority()
    }
}
