// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sets of scalar values stored as sorted, disjoint, non-adjacent ranges.

use std::cmp::Ordering;

use crate::error::Error;
use crate::unicode;
use crate::utf8::Char;

/// One inclusive range of scalar values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassRange {
    /// First scalar value in the range.
    pub start: char,
    /// Last scalar value in the range (inclusive).
    pub end: char,
}

/// A set of scalar values.
///
/// The canonical form is maintained by every mutating operation: ranges
/// are sorted, non-overlapping and non-adjacent, so equality of sets is
/// equality of their range vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CharClass {
    ranges: Vec<ClassRange>,
}

/// The scalar value immediately after `c`, skipping the surrogate gap.
fn succ(c: char) -> Option<char> {
    match c {
        '\u{D7FF}' => Some('\u{E000}'),
        char::MAX => None,
        c => char::from_u32(c as u32 + 1),
    }
}

/// The scalar value immediately before `c`, skipping the surrogate gap.
fn pred(c: char) -> Option<char> {
    match c {
        '\u{E000}' => Some('\u{D7FF}'),
        '\0' => None,
        c => char::from_u32(c as u32 - 1),
    }
}

impl CharClass {
    /// Create an empty class.
    pub fn new() -> CharClass {
        CharClass { ranges: Vec::new() }
    }

    /// The class matching every scalar value, i.e. `(?s).`.
    pub fn any() -> CharClass {
        CharClass { ranges: vec![ClassRange { start: '\0', end: char::MAX }] }
    }

    /// The class matching every scalar value except `\n`, i.e. `.`.
    pub fn any_but_newline() -> CharClass {
        CharClass {
            ranges: vec![
                ClassRange { start: '\0', end: '\x09' },
                ClassRange { start: '\x0B', end: char::MAX },
            ],
        }
    }

    /// Build a class from a table of ranges, e.g. a Unicode property.
    pub fn from_ranges(ranges: &[(char, char)]) -> CharClass {
        let mut cls = CharClass::new();
        for &(start, end) in ranges {
            cls.ranges.push(ClassRange { start, end });
        }
        cls.canonicalize();
        cls
    }

    /// Add one inclusive range to the set.
    ///
    /// Fails when the range end precedes its start.
    pub fn push(&mut self, start: char, end: char) -> Result<(), Error> {
        if start > end {
            return Err(Error::Class {
                message: format!("invalid range: {:?} sorts after {:?}", start, end),
            });
        }
        self.ranges.push(ClassRange { start, end });
        self.canonicalize();
        Ok(())
    }

    /// The ranges of this class, in canonical order.
    pub fn ranges(&self) -> &[ClassRange] {
        &self.ranges
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if the class matches nothing.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of scalar values in the set.
    pub fn num_chars(&self) -> usize {
        self.ranges
            .iter()
            .map(|r| 1 + (r.end as usize) - (r.start as usize))
            .sum()
    }

    /// Restore the canonical form after raw pushes.
    fn canonicalize(&mut self) {
        self.ranges.sort_by_key(|r| r.start);
        let mut merged: Vec<ClassRange> = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..) {
            match merged.last_mut() {
                // Merge overlapping and exactly-adjacent ranges.
                Some(last) if r.start as u32 <= last.end as u32 + 1 => {
                    if r.end > last.end {
                        last.end = r.end;
                    }
                }
                _ => merged.push(r),
            }
        }
        self.ranges = merged;
    }

    /// Add every member of `other` to this set.
    pub fn union(&mut self, other: &CharClass) {
        self.ranges.extend_from_slice(&other.ranges);
        self.canonicalize();
    }

    /// The set of scalar values present in both classes.
    pub fn intersect(&self, other: &CharClass) -> CharClass {
        let mut out = CharClass::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let (a, b) = (self.ranges[i], other.ranges[j]);
            let start = a.start.max(b.start);
            let end = a.end.min(b.end);
            if start <= end {
                out.ranges.push(ClassRange { start, end });
            }
            if a.end < b.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        out.canonicalize();
        out
    }

    /// Complement the set over the scalar-value domain (surrogates are
    /// never members on either side).
    pub fn negate(&mut self) {
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        let mut next = Some('\0');
        for r in &self.ranges {
            if let Some(start) = next {
                if start < r.start {
                    if let Some(end) = pred(r.start) {
                        out.push(ClassRange { start, end });
                    }
                }
            }
            next = succ(r.end);
        }
        if let Some(start) = next {
            out.push(ClassRange { start, end: char::MAX });
        }
        self.ranges = out;
        self.canonicalize();
    }

    /// Expand the set with the simple-fold equivalence orbit of every
    /// member, so that membership becomes case-insensitive.
    pub fn case_fold(&mut self) {
        let mut extra: Vec<ClassRange> = Vec::new();
        for r in &self.ranges {
            for &(dlo, dhi) in unicode::FOLD_DOMAIN {
                let lo = (r.start as u32).max(dlo as u32);
                let hi = (r.end as u32).min(dhi as u32);
                for cp in lo..=hi {
                    let Some(c) = char::from_u32(cp) else { continue };
                    unicode::fold_orbit(c, |m| {
                        extra.push(ClassRange { start: m, end: m });
                    });
                }
            }
        }
        self.ranges.extend(extra);
        self.canonicalize();
    }

    /// Membership test for an input character. Absent characters are
    /// never members.
    #[inline(always)]
    pub fn matches(&self, c: Char) -> bool {
        match c.as_char() {
            Some(c) => self.contains(c),
            None => false,
        }
    }

    /// Membership test for a scalar value.
    ///
    /// The short linear scan catches the common case of matching a big
    /// Unicode class against mostly-ASCII text without a binary search.
    #[inline(always)]
    pub fn contains(&self, c: char) -> bool {
        for r in self.ranges.iter().take(4) {
            if c < r.start {
                return false;
            }
            if c <= r.end {
                return true;
            }
        }
        self.ranges
            .binary_search_by(|r| {
                if r.end < c {
                    Ordering::Less
                } else if r.start > c {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::CharClass;
    use crate::utf8::Char;

    fn class(ranges: &[(char, char)]) -> CharClass {
        CharClass::from_ranges(ranges)
    }

    #[test]
    fn canonical_merge() {
        let cls = class(&[('f', 'm'), ('a', 'c'), ('d', 'e'), ('k', 'z')]);
        assert_eq!(cls.ranges().len(), 2);
        assert_eq!((cls.ranges()[0].start, cls.ranges()[0].end), ('a', 'e'));
        assert_eq!((cls.ranges()[1].start, cls.ranges()[1].end), ('f', 'z'));
    }

    #[test]
    fn push_rejects_backwards_range() {
        let mut cls = CharClass::new();
        assert!(cls.push('z', 'a').is_err());
        assert!(cls.push('a', 'z').is_ok());
    }

    #[test]
    fn membership() {
        let cls = class(&[('a', 'c'), ('x', 'z'), ('\u{3B1}', '\u{3C9}')]);
        assert!(cls.contains('b'));
        assert!(cls.contains('y'));
        assert!(cls.contains('\u{3B4}'));
        assert!(!cls.contains('d'));
        assert!(!cls.matches(Char::none()));
    }

    #[test]
    fn negation_skips_surrogates() {
        let mut cls = class(&[('a', 'z')]);
        cls.negate();
        assert!(!cls.contains('m'));
        assert!(cls.contains('A'));
        assert!(cls.contains('\u{D7FF}'));
        assert!(cls.contains('\u{E000}'));
        // Double negation restores the original set.
        cls.negate();
        assert_eq!(cls, class(&[('a', 'z')]));
    }

    #[test]
    fn negate_full_domain_is_empty() {
        let mut cls = CharClass::any();
        cls.negate();
        assert!(cls.is_empty());
    }

    #[test]
    fn intersection() {
        let a = class(&[('a', 'm'), ('p', 'z')]);
        let b = class(&[('k', 'r')]);
        let i = a.intersect(&b);
        assert_eq!(i, class(&[('k', 'm'), ('p', 'r')]));
    }

    #[test]
    fn folding_adds_orbits() {
        let mut cls = class(&[('k', 'k')]);
        cls.case_fold();
        assert!(cls.contains('k'));
        assert!(cls.contains('K'));
        assert!(cls.contains('\u{212A}'));

        let mut cls = class(&[('\u{E9}', '\u{E9}')]);
        cls.case_fold();
        assert!(cls.contains('\u{C9}'));
    }

    #[test]
    fn folding_ignores_unfoldable_ranges() {
        let mut cls = class(&[('\u{4E00}', '\u{4E10}')]);
        let before = cls.clone();
        cls.case_fold();
        assert_eq!(cls, before);
    }
}
