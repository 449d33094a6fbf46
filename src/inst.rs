use crate::ast::LookKind;
use crate::unicode;
use crate::utf8::Char;

/// InstIdx represents the index of an instruction in a regex program.
pub type InstIdx = usize;

/// Inst is an instruction code in a regex program.
///
/// Every instruction except `Match` carries the index of its successor
/// explicitly, so the executors never rely on instruction adjacency.
#[derive(Clone, Debug)]
pub enum Inst {
    /// Match indicates that the program has reached a match state.
    Match,
    /// Save causes the program to save the current location of the input
    /// in the slot indicated by InstSave.
    Save(InstSave),
    /// Jump is an unconditional epsilon transition.
    Jump(InstJump),
    /// Split causes the program to diverge to one of two paths in the
    /// program, preferring goto1 in InstSplit.
    Split(InstSplit),
    /// EmptyLook represents a zero-width assertion in a regex program. A
    /// zero-width assertion does not consume any of the input text.
    EmptyLook(InstEmptyLook),
    /// Char requires the regex program to match the character in InstChar
    /// at the current position in the input.
    Char(InstChar),
    /// Ranges requires the regex program to match the character at the
    /// current position in the input against the character class in the
    /// program's class pool identified by InstRanges.
    Ranges(InstRanges),
    /// Look is a zero-width lookaround assertion evaluated by an
    /// anchored sub-simulation of an out-of-line program region.
    Look(InstLook),
}

/// Representation of the Save instruction.
#[derive(Clone, Debug)]
pub struct InstSave {
    /// The next location to execute in the program.
    pub goto: InstIdx,
    /// The capture slot (there are two slots for every capture in a
    /// regex, including the zeroth capture for the entire match).
    pub slot: usize,
}

/// Representation of the Jump instruction.
#[derive(Clone, Debug)]
pub struct InstJump {
    /// The next location to execute in the program.
    pub goto: InstIdx,
}

/// Representation of the Split instruction.
#[derive(Clone, Debug)]
pub struct InstSplit {
    /// The first instruction to try. A match resulting from following
    /// goto1 has precedence over a match resulting from following goto2.
    pub goto1: InstIdx,
    /// The second instruction to try.
    pub goto2: InstIdx,
}

/// Representation of the EmptyLook instruction.
#[derive(Clone, Debug)]
pub struct InstEmptyLook {
    /// The next location to execute in the program if this instruction
    /// succeeds.
    pub goto: InstIdx,
    /// The type of zero-width assertion to check.
    pub look: EmptyLook,
}

/// The set of zero-width match instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyLook {
    /// Start of line or input.
    StartLine,
    /// End of line or input.
    EndLine,
    /// Start of input.
    StartText,
    /// End of input.
    EndText,
    /// Word character on one side and non-word character on other.
    WordBoundary,
    /// Word character on both sides or non-word character on both sides.
    NotWordBoundary,
}

impl InstEmptyLook {
    /// Tests whether the pair of characters around the current position
    /// matches this zero-width instruction.
    pub fn matches(&self, c1: Char, c2: Char) -> bool {
        use self::EmptyLook::*;
        match self.look {
            StartLine => c1.is_none() || c1 == '\n',
            EndLine => c2.is_none() || c2 == '\n',
            StartText => c1.is_none(),
            EndText => c2.is_none(),
            ref wbty => {
                let (w1, w2) = (c1.is_word_char(), c2.is_word_char());
                (*wbty == WordBoundary && w1 ^ w2)
                    || (*wbty == NotWordBoundary && !(w1 ^ w2))
            }
        }
    }
}

/// Representation of the Char instruction.
#[derive(Clone, Debug)]
pub struct InstChar {
    /// The next location to execute in the program if this instruction
    /// succeeds.
    pub goto: InstIdx,
    /// The character to test. Stored pre-folded when `casei` is set.
    pub c: char,
    /// Whether the input character is simple-folded before comparison.
    pub casei: bool,
}

impl InstChar {
    /// Tests whether the given input character matches this instruction.
    #[inline(always)]
    pub fn matches(&self, c: Char) -> bool {
        match c.as_char() {
            Some(c) => self.c == c || (self.casei && self.c == unicode::simple_fold(c)),
            None => false,
        }
    }
}

/// Representation of the Ranges instruction.
#[derive(Clone, Debug)]
pub struct InstRanges {
    /// The next location to execute in the program if this instruction
    /// succeeds.
    pub goto: InstIdx,
    /// Index of the character class in the program's class pool.
    /// Identical classes share one pool entry.
    pub class: usize,
}

/// Representation of the Look instruction.
#[derive(Clone, Debug)]
pub struct InstLook {
    /// The next location to execute in the program if the assertion
    /// holds.
    pub goto: InstIdx,
    /// Entry point of the assertion's sub-region within the same
    /// program. The region ends in its own Match instruction and is
    /// unreachable from the main flow.
    pub entry: InstIdx,
    /// Direction and polarity.
    pub kind: LookKind,
    /// Fixed code-point width of the inner expression. Only meaningful
    /// for lookbehind, where the compiler enforces a fixed width.
    pub width: u32,
}
