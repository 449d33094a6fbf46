// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The abstract syntax of a parsed pattern.
//!
//! Nodes live in an `Arena` and reference their children by id, so the
//! whole tree is freed in one step with the compiled pattern and the
//! compiler can revisit a subtree (e.g. to expand `a{2,4}`) without
//! cloning it.

use crate::arena::{Arena, NodeId};
use crate::charclass::CharClass;

/// Id of an AST node within its pattern's arena.
pub type AstId = NodeId<Ast>;

/// A single node of the pattern syntax tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// Matches the empty string.
    Empty,
    /// A sequence of one or more literal characters. Adjacent literals
    /// are merged during parsing. When `casei` is set, each character
    /// has already been simple-folded and input is folded before
    /// comparison.
    Literal {
        /// The characters, in order.
        chars: Vec<char>,
        /// Case-insensitive comparison.
        casei: bool,
    },
    /// Matches one character in the class. Negation and case folding
    /// are applied during parsing, so the stored set is final.
    Class(CharClass),
    /// `.` under `(?s)`.
    AnyChar,
    /// `.` without `(?s)`.
    AnyCharNoNL,
    /// `^` under `(?m)`.
    StartLine,
    /// `$` under `(?m)`.
    EndLine,
    /// `\A`, or `^` without `(?m)`.
    StartText,
    /// `\z`, or `$` without `(?m)`.
    EndText,
    /// `\b`.
    WordBoundary,
    /// `\B`.
    NotWordBoundary,
    /// A capturing group. Non-capturing groups are dissolved during
    /// parsing and never appear in the tree.
    Group {
        /// The group body.
        child: AstId,
        /// 1-based capture index.
        index: u32,
        /// Present for `(?P<name>...)` groups.
        name: Option<String>,
    },
    /// Two or more nodes in sequence.
    Concat(Vec<AstId>),
    /// Two or more alternatives; earlier branches are preferred.
    Alternate(Vec<AstId>),
    /// `e*`.
    Star {
        /// The repeated node.
        child: AstId,
        /// Prefer consuming more when true.
        greedy: bool,
    },
    /// `e+`.
    Plus {
        /// The repeated node.
        child: AstId,
        /// Prefer consuming more when true.
        greedy: bool,
    },
    /// `e?`.
    Quest {
        /// The optional node.
        child: AstId,
        /// Prefer presence when true.
        greedy: bool,
    },
    /// `e{min}`, `e{min,}` or `e{min,max}`.
    Repeat {
        /// The repeated node.
        child: AstId,
        /// Minimum number of repetitions.
        min: u32,
        /// Maximum number of repetitions; `None` means unbounded.
        max: Option<u32>,
        /// Prefer consuming more when true.
        greedy: bool,
    },
    /// A lookaround assertion.
    Look {
        /// The asserted expression.
        child: AstId,
        /// Direction and polarity.
        kind: LookKind,
    },
}

/// Direction and polarity of a lookaround assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookKind {
    /// `(?=e)`.
    Ahead,
    /// `(?!e)`.
    AheadNegate,
    /// `(?<=e)`.
    Behind,
    /// `(?<!e)`.
    BehindNegate,
}

impl LookKind {
    /// True for the negative variants.
    pub fn is_negative(self) -> bool {
        matches!(self, LookKind::AheadNegate | LookKind::BehindNegate)
    }

    /// True for the lookbehind variants.
    pub fn is_behind(self) -> bool {
        matches!(self, LookKind::Behind | LookKind::BehindNegate)
    }
}

/// The number of code points a subtree always consumes, or `None` when
/// the width varies. Used to validate lookbehind at compile time.
pub fn fixed_width(arena: &Arena<Ast>, id: AstId) -> Option<u32> {
    match arena[id] {
        Ast::Empty
        | Ast::StartLine
        | Ast::EndLine
        | Ast::StartText
        | Ast::EndText
        | Ast::WordBoundary
        | Ast::NotWordBoundary
        | Ast::Look { .. } => Some(0),
        Ast::Literal { ref chars, .. } => u32::try_from(chars.len()).ok(),
        Ast::Class(_) | Ast::AnyChar | Ast::AnyCharNoNL => Some(1),
        Ast::Group { child, .. } => fixed_width(arena, child),
        Ast::Concat(ref children) => {
            let mut total: u32 = 0;
            for &child in children {
                total = total.checked_add(fixed_width(arena, child)?)?;
            }
            Some(total)
        }
        Ast::Alternate(ref children) => {
            let mut width = None;
            for &child in children {
                let w = fixed_width(arena, child)?;
                match width {
                    None => width = Some(w),
                    Some(prev) if prev != w => return None,
                    Some(_) => {}
                }
            }
            width
        }
        Ast::Star { .. } | Ast::Plus { .. } => None,
        Ast::Quest { child, .. } => {
            if fixed_width(arena, child)? == 0 {
                Some(0)
            } else {
                None
            }
        }
        Ast::Repeat { child, min, max, .. } => {
            if max != Some(min) {
                return None;
            }
            fixed_width(arena, child)?.checked_mul(min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fixed_width, Ast};
    use crate::arena::Arena;
    use crate::charclass::CharClass;

    #[test]
    fn widths() {
        let mut arena = Arena::new();
        let lit = arena.alloc(Ast::Literal { chars: vec!['a', 'b'], casei: false });
        let cls = arena.alloc(Ast::Class(CharClass::any()));
        let cat = arena.alloc(Ast::Concat(vec![lit, cls]));
        assert_eq!(fixed_width(&arena, cat), Some(3));

        let star = arena.alloc(Ast::Star { child: lit, greedy: true });
        assert_eq!(fixed_width(&arena, star), None);

        let alt_same = arena.alloc(Ast::Alternate(vec![lit, lit]));
        assert_eq!(fixed_width(&arena, alt_same), Some(2));
        let alt_mixed = arena.alloc(Ast::Alternate(vec![lit, cls]));
        assert_eq!(fixed_width(&arena, alt_mixed), None);

        let rep = arena.alloc(Ast::Repeat { child: lit, min: 3, max: Some(3), greedy: true });
        assert_eq!(fixed_width(&arena, rep), Some(6));
        let rep_open = arena.alloc(Ast::Repeat { child: lit, min: 3, max: None, greedy: true });
        assert_eq!(fixed_width(&arena, rep_open), None);
    }
}
