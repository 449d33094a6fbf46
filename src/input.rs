// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An abstraction over the subject used in the matching engines.
//!
//! Subjects are raw byte strings decoded one code point at a time
//! through the UTF-8 codec, so invalid bytes are tolerated (they decode
//! to U+FFFD and advance one byte).

use crate::literals::Literals;
use crate::utf8::{self, Char};

/// The subject of a match.
#[derive(Clone, Copy, Debug)]
pub struct Input<'t> {
    text: &'t [u8],
}

impl<'t> Input<'t> {
    /// Wrap a byte string.
    pub fn new(text: &'t [u8]) -> Input<'t> {
        Input { text }
    }

    /// Length of the subject in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// The raw bytes of the subject.
    pub fn as_bytes(&self) -> &'t [u8] {
        self.text
    }

    /// Return an encoding of the position at byte offset `i`.
    #[inline(always)]
    pub fn at(&self, i: usize) -> InputAt {
        match utf8::decode(self.text, i) {
            Some(d) => InputAt { pos: i, c: Char::from(d.c), len: d.len },
            None => InputAt { pos: self.text.len(), c: Char::none(), len: 0 },
        }
    }

    /// The character at `at`, i.e. just after the position.
    pub fn next_char(&self, at: InputAt) -> Char {
        at.char()
    }

    /// The character just before the position, or absent at the start.
    pub fn previous_char(&self, at: InputAt) -> Char {
        match utf8::decode_last(self.text, at.pos()) {
            Some(d) => Char::from(d.c),
            None => Char::none(),
        }
    }

    /// Scan ahead for the literal prefixes and return the position of
    /// the earliest occurrence, if any.
    pub fn prefix_at(&self, prefixes: &Literals, at: InputAt) -> Option<InputAt> {
        prefixes.find(&self.text[at.pos()..]).map(|(s, _)| self.at(at.pos() + s))
    }

    /// Step backwards by `nchars` code points from byte offset `pos`.
    /// Returns `None` when the input starts before that many characters
    /// are available.
    pub fn walk_back(&self, mut pos: usize, nchars: u32) -> Option<usize> {
        for _ in 0..nchars {
            let d = utf8::decode_last(self.text, pos)?;
            pos -= d.len;
        }
        Some(pos)
    }
}

/// Represents a location in the input.
#[derive(Clone, Copy, Debug)]
pub struct InputAt {
    pos: usize,
    c: Char,
    len: usize,
}

impl InputAt {
    /// Returns true iff this position is at the beginning of the input.
    pub fn is_start(&self) -> bool {
        self.pos == 0
    }

    /// Returns true iff this position is at the end of the input.
    pub fn is_end(&self) -> bool {
        self.c.is_none()
    }

    /// Returns the character at this position. Absent when the position
    /// is at the end of the input.
    pub fn char(&self) -> Char {
        self.c
    }

    /// Returns the width in bytes of the character at this position.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the byte offset of this position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the byte offset of the next position in the input.
    pub fn next_pos(&self) -> usize {
        self.pos + self.len
    }
}
