// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Literal prefix extraction and matching.
//!
//! If every match of a program must begin with one of a small set of
//! literals, the NFA can skip ahead with a substring search instead of
//! seeding a thread at every position. When the literals additionally
//! reach the Match instruction directly, a literal search *is* the whole
//! match and the engines can skip the simulation entirely.

use std::mem;

use aho_corasick::{AhoCorasick, MatchKind};
use memchr::{memchr, memmem};

use crate::charclass::CharClass;
use crate::inst::{Inst, InstIdx};

const NUM_PREFIX_LIMIT: usize = 30;
const PREFIX_LENGTH_LIMIT: usize = 15;

/// The set of alternate literal prefixes extracted from a program.
#[derive(Clone, Debug)]
pub struct AlternateLiterals {
    at_match: bool,
    literals: Vec<Vec<u8>>,
}

impl AlternateLiterals {
    fn empty() -> AlternateLiterals {
        AlternateLiterals { at_match: false, literals: vec![] }
    }

    /// Convert the extracted literals into a matcher.
    pub fn into_matcher(self) -> Literals {
        if self.literals.is_empty() {
            Literals::empty()
        } else {
            Literals { at_match: self.at_match, matcher: Matcher::new(self.literals) }
        }
    }

    fn add_alternates(&mut self, alts: AlternateLiterals) {
        self.at_match = self.at_match && alts.at_match;
        self.literals.extend(alts.literals);
    }

    /// Append one character to every alternate.
    fn add_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        let bytes = c.encode_utf8(&mut buf).as_bytes();
        for alt in &mut self.literals {
            alt.extend_from_slice(bytes);
        }
    }

    /// Append every character of a class to every alternate, by copying
    /// the existing alternates once per class member. Callers bound the
    /// product before calling.
    fn add_class(&mut self, cls: &CharClass) {
        let mut buf = [0u8; 4];
        let orig = mem::take(&mut self.literals);
        for r in cls.ranges() {
            for cp in (r.start as u32)..=(r.end as u32) {
                let Some(c) = char::from_u32(cp) else { continue };
                let bytes = c.encode_utf8(&mut buf).as_bytes();
                for alt in &orig {
                    let mut alt = alt.clone();
                    alt.extend_from_slice(bytes);
                    self.literals.push(alt);
                }
            }
        }
    }
}

/// Extracts literal prefixes from an instruction sequence.
pub struct BuildPrefixes<'a> {
    insts: &'a [Inst],
    classes: &'a [CharClass],
}

impl<'a> BuildPrefixes<'a> {
    /// Create a prefix builder for the given program.
    pub fn new(insts: &'a [Inst], classes: &'a [CharClass]) -> BuildPrefixes<'a> {
        BuildPrefixes { insts, classes }
    }

    /// Walk the program and collect its alternate prefixes. Returns an
    /// empty set when no useful prefixes exist.
    pub fn literals(&self) -> AlternateLiterals {
        let start = self.skip(0);
        if let Inst::Split(_) = self.insts[start] {
            let mut out = AlternateLiterals { at_match: true, literals: vec![] };
            let mut seen = vec![];
            if self.alternates(start, &mut out, &mut seen) {
                out
            } else {
                AlternateLiterals::empty()
            }
        } else {
            self.from_insts(start)
        }
    }

    /// Collect prefixes from every arm of a split tree. Returns false
    /// when any arm has no usable prefix, which poisons the whole set.
    fn alternates(
        &self,
        pc: InstIdx,
        out: &mut AlternateLiterals,
        seen: &mut Vec<InstIdx>,
    ) -> bool {
        let pc = self.skip(pc);
        match self.insts[pc] {
            Inst::Split(ref inst) => {
                // Nested repetition can route an arm back to an already
                // visited split; give up rather than loop.
                if seen.contains(&pc) {
                    return false;
                }
                seen.push(pc);
                self.alternates(inst.goto1, out, seen)
                    && self.alternates(inst.goto2, out, seen)
            }
            _ => {
                let alts = self.from_insts(pc);
                if alts.literals.is_empty() {
                    return false;
                }
                out.add_alternates(alts);
                out.literals.len() <= NUM_PREFIX_LIMIT
            }
        }
    }

    /// Collect the literal prefix of the straight-line flow starting at
    /// `pc`. Every alternate grows in lock step, so checking the first
    /// one against the length limit suffices.
    fn from_insts(&self, mut pc: InstIdx) -> AlternateLiterals {
        let mut alts = AlternateLiterals { at_match: false, literals: vec![vec![]] };
        loop {
            if alts.literals[0].len() > PREFIX_LENGTH_LIMIT {
                break;
            }
            match self.insts[pc] {
                Inst::Save(ref inst) => {
                    pc = inst.goto;
                }
                Inst::Jump(ref inst) => {
                    pc = inst.goto;
                }
                Inst::Char(ref inst) if !inst.casei => {
                    alts.add_char(inst.c);
                    pc = inst.goto;
                }
                Inst::Ranges(ref inst) => {
                    let cls = &self.classes[inst.class];
                    if alts.literals.len() * cls.num_chars() > NUM_PREFIX_LIMIT {
                        break;
                    }
                    alts.add_class(cls);
                    pc = inst.goto;
                }
                _ => {
                    alts.at_match = self.leads_to_match(pc);
                    break;
                }
            }
        }
        if alts.literals[0].is_empty() {
            AlternateLiterals::empty()
        } else {
            alts
        }
    }

    /// If pc is an index to a no-op instruction (Save or Jump), then
    /// return the next pc that is not a no-op instruction.
    fn skip(&self, mut pc: InstIdx) -> InstIdx {
        loop {
            match self.insts[pc] {
                Inst::Save(ref inst) => pc = inst.goto,
                Inst::Jump(ref inst) => pc = inst.goto,
                _ => return pc,
            }
        }
    }

    fn leads_to_match(&self, pc: InstIdx) -> bool {
        matches!(self.insts[self.skip(pc)], Inst::Match)
    }
}

/// A compiled literal prefix matcher.
#[derive(Clone, Debug)]
pub struct Literals {
    at_match: bool,
    matcher: Matcher,
}

#[derive(Clone, Debug)]
enum Matcher {
    /// No prefixes to search for.
    Empty,
    /// One single-byte literal.
    Byte(u8),
    /// One multi-byte literal.
    Single { finder: memmem::Finder<'static>, len: usize },
    /// Multiple literals, matched leftmost-first so that ties at the
    /// same position resolve in alternation order.
    Ac(AhoCorasick),
}

impl Matcher {
    fn new(literals: Vec<Vec<u8>>) -> Matcher {
        if literals.len() == 1 {
            let lit = &literals[0];
            if lit.len() == 1 {
                return Matcher::Byte(lit[0]);
            }
            return Matcher::Single {
                finder: memmem::Finder::new(lit).into_owned(),
                len: lit.len(),
            };
        }
        match AhoCorasick::builder().match_kind(MatchKind::LeftmostFirst).build(&literals) {
            Ok(ac) => Matcher::Ac(ac),
            Err(_) => Matcher::Empty,
        }
    }
}

impl Literals {
    /// A matcher that never matches.
    pub fn empty() -> Literals {
        Literals { at_match: false, matcher: Matcher::Empty }
    }

    /// True when there is nothing to search for.
    pub fn is_empty(&self) -> bool {
        matches!(self.matcher, Matcher::Empty)
    }

    /// True when finding a prefix is the same as finding a whole match.
    pub fn at_match(&self) -> bool {
        self.at_match
    }

    /// True when a prefix search reports the same match the simulation
    /// would. Holds for every non-empty matcher here: single literals
    /// trivially, multiple literals by leftmost-first construction.
    pub fn preserves_priority(&self) -> bool {
        !self.is_empty()
    }

    /// Find the earliest occurrence of any prefix, as `(start, end)`
    /// byte offsets into `haystack`.
    pub fn find(&self, haystack: &[u8]) -> Option<(usize, usize)> {
        match self.matcher {
            Matcher::Empty => None,
            Matcher::Byte(b) => memchr(b, haystack).map(|i| (i, i + 1)),
            Matcher::Single { ref finder, len } => {
                finder.find(haystack).map(|i| (i, i + len))
            }
            Matcher::Ac(ref ac) => ac.find(haystack).map(|m| (m.start(), m.end())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BuildPrefixes, Literals};
    use crate::compile::Compiler;
    use crate::flags::Flags;
    use crate::parse;

    fn prefixes(pattern: &str) -> Literals {
        let parsed = parse::parse(pattern, Flags::empty()).unwrap();
        let prog = Compiler::new(&parsed.ast, 100_000).compile(parsed.root).unwrap();
        BuildPrefixes::new(&prog.insts, &prog.classes).literals().into_matcher()
    }

    #[test]
    fn whole_literal_is_complete() {
        let lits = prefixes("abc");
        assert!(lits.at_match());
        assert_eq!(lits.find(b"xx abc yy"), Some((3, 6)));
        assert_eq!(lits.find(b"zz"), None);
    }

    #[test]
    fn single_byte_literal() {
        let lits = prefixes("a");
        assert!(lits.at_match());
        assert_eq!(lits.find(b"xya"), Some((2, 3)));
    }

    #[test]
    fn alternation_of_literals() {
        let lits = prefixes("abc|xyz");
        assert!(lits.at_match());
        assert_eq!(lits.find(b"__xyz__"), Some((2, 5)));
        assert_eq!(lits.find(b"_abc_xyz"), Some((1, 4)));
    }

    #[test]
    fn prefix_of_longer_pattern_is_incomplete() {
        let lits = prefixes("abc.*z");
        assert!(!lits.at_match());
        assert_eq!(lits.find(b"__abcz"), Some((2, 5)));
    }

    #[test]
    fn small_class_expands() {
        let lits = prefixes("[ab]c");
        assert!(!lits.is_empty());
        assert_eq!(lits.find(b"__bc"), Some((2, 4)));
        assert_eq!(lits.find(b"__ac"), Some((2, 4)));
    }

    #[test]
    fn unbounded_cases_are_empty() {
        // Case-insensitive chars, anchors and big classes stop extraction.
        assert!(prefixes("(?i)abc").is_empty());
        assert!(prefixes("^abc").is_empty());
        assert!(prefixes(r"\w+").is_empty());
        assert!(prefixes("(a|^)c").is_empty());
    }

    #[test]
    fn empty_branch_extends_through_the_tail() {
        let lits = prefixes("(a|)bc");
        assert!(lits.at_match());
        assert_eq!(lits.find(b"_abc"), Some((1, 4)));
        assert_eq!(lits.find(b"_bc"), Some((1, 3)));
    }

    #[test]
    fn nested_repetition_terminates() {
        // Must not recurse forever through the looped splits.
        let lits = prefixes("(?:a*)*b");
        // Whatever was extracted, finding must behave sanely.
        let _ = lits.find(b"zzab");
    }

    #[test]
    fn star_prefix_covers_both_paths() {
        let lits = prefixes("a*bc");
        assert!(!lits.at_match());
        // Every match starts with either `a` or `bc`.
        assert_eq!(lits.find(b"__bc"), Some((2, 4)));
        assert_eq!(lits.find(b"__abc"), Some((2, 3)));
    }
}
