// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bitflags::bitflags;

bitflags! {
    /// Match-time options for a compiled pattern.
    ///
    /// Each flag corresponds to one of the inline flag letters recognized
    /// in `(?ims-U)` groups. Passing flags to `Regex::with_flags` is
    /// equivalent to prefixing the pattern with the corresponding inline
    /// group.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// `i`: literals and classes match case-insensitively, using
        /// simple case folding only.
        const CASE_INSENSITIVE = 1 << 0;
        /// `m`: `^` and `$` match at `\n` boundaries in addition to the
        /// beginning and end of the text.
        const MULTI_LINE = 1 << 1;
        /// `s`: `.` matches `\n`.
        const DOT_ALL = 1 << 2;
        /// `U`: greedy and lazy quantifier defaults are swapped.
        const UNGREEDY = 1 << 3;
    }
}

impl Flags {
    /// Returns the flag for a single inline flag letter, if recognized.
    pub fn from_letter(c: char) -> Option<Flags> {
        match c {
            'i' => Some(Flags::CASE_INSENSITIVE),
            'm' => Some(Flags::MULTI_LINE),
            's' => Some(Flags::DOT_ALL),
            'U' => Some(Flags::UNGREEDY),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Flags;

    #[test]
    fn letters_round_trip() {
        assert_eq!(Flags::from_letter('i'), Some(Flags::CASE_INSENSITIVE));
        assert_eq!(Flags::from_letter('m'), Some(Flags::MULTI_LINE));
        assert_eq!(Flags::from_letter('s'), Some(Flags::DOT_ALL));
        assert_eq!(Flags::from_letter('U'), Some(Flags::UNGREEDY));
        assert_eq!(Flags::from_letter('x'), None);
    }
}
