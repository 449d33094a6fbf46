// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// An error that occurred while compiling or executing a regular expression.
///
/// Compilation errors (`Parse`, `Unsupported`, `ProgramTooLarge`, `Class`)
/// are returned from `Regex::new` and friends with no partial pattern.
/// `Cancelled` is only produced by the step-bounded match entry points.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed pattern text. The offset is the byte position in the
    /// pattern where the problem was detected.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the pattern text.
        offset: usize,
        /// Human readable description of the problem.
        message: String,
    },
    /// A feature that is recognized by the parser but deliberately not
    /// implemented, such as backreferences or variable-width lookbehind.
    #[error("unsupported feature at byte {offset}: {feature}")]
    Unsupported {
        /// Byte offset into the pattern text.
        offset: usize,
        /// The name of the unsupported construct.
        feature: String,
    },
    /// The compiled program exceeded the configured instruction cap.
    #[error("compiled program too big: {size} instructions (limit {limit})")]
    ProgramTooLarge {
        /// Number of instructions the program reached before compilation
        /// was aborted.
        size: usize,
        /// The configured instruction cap.
        limit: usize,
    },
    /// Invalid character class construction, e.g. a range whose end
    /// precedes its start.
    #[error("invalid character class: {message}")]
    Class {
        /// Human readable description of the problem.
        message: String,
    },
    /// The step budget given to a bounded match was exhausted.
    #[error("match cancelled after {steps} steps")]
    Cancelled {
        /// Number of input positions examined before cancellation.
        steps: u64,
    },
}

impl Error {
    /// Returns the byte offset into the pattern associated with this
    /// error, if there is one.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Error::Parse { offset, .. } | Error::Unsupported { offset, .. } => Some(offset),
            _ => None,
        }
    }
}
