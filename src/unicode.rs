// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Unicode data: simple case folding and the range tables backing
//! predefined character classes.
//!
//! Folding is *simple* fold only: every scalar value maps to exactly one
//! scalar value, so `ß` does not expand to `ss`. Class folding uses the
//! full equivalence orbit of each member (e.g. `k`, `K` and U+212A KELVIN
//! SIGN are mutually equivalent).
//!
//! Perl classes (`\d`, `\s`, `\w`) and word boundaries are ASCII, matching
//! the RE2 dialect. `\p{...}` properties are Unicode, over a fixed name
//! set; unknown names are rejected by the parser.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Apply the simple case folding mapping to one scalar value.
///
/// Covers ASCII, Latin-1, Latin Extended-A, the regular stretches of
/// Latin Extended-B and Latin Extended Additional, Greek, Cyrillic,
/// Armenian, Roman numerals, circled letters, letterlike symbols,
/// fullwidth forms and Deseret. Everything else folds to itself.
pub fn simple_fold(c: char) -> char {
    let cp = c as u32;
    if cp < 0x80 {
        return c.to_ascii_lowercase();
    }
    let even = |cp: u32| if cp % 2 == 0 { cp + 1 } else { cp };
    let odd = |cp: u32| if cp % 2 == 1 { cp + 1 } else { cp };
    let folded = match cp {
        0xB5 => 0x3BC,
        0xC0..=0xD6 | 0xD8..=0xDE => cp + 0x20,
        0x100..=0x137 | 0x14A..=0x177 => even(cp),
        0x139..=0x148 | 0x179..=0x17E => odd(cp),
        0x178 => 0xFF,
        0x17F => 0x73,
        0x1F8..=0x21F | 0x222..=0x233 | 0x246..=0x24F => even(cp),
        0x345 => 0x3B9,
        0x386 => 0x3AC,
        0x388..=0x38A => cp + 0x25,
        0x38C => 0x3CC,
        0x38E..=0x38F => cp + 0x3F,
        0x391..=0x3A1 | 0x3A3..=0x3AB => cp + 0x20,
        0x3C2 => 0x3C3,
        0x3D0 => 0x3B2,
        0x3D1 => 0x3B8,
        0x3D5 => 0x3C6,
        0x3D6 => 0x3C0,
        0x3F0 => 0x3BA,
        0x3F1 => 0x3C1,
        0x3F5 => 0x3B5,
        0x400..=0x40F => cp + 0x50,
        0x410..=0x42F => cp + 0x20,
        0x460..=0x481 | 0x48A..=0x4BF | 0x4D0..=0x52F => even(cp),
        0x4C0 => 0x4CF,
        0x4C1..=0x4CD => odd(cp),
        0x531..=0x556 => cp + 0x30,
        0x1E00..=0x1E95 | 0x1EA0..=0x1EFF => even(cp),
        0x1E9E => 0xDF,
        0x2126 => 0x3C9,
        0x212A => 0x6B,
        0x212B => 0xE5,
        0x2160..=0x216F => cp + 0x10,
        0x24B6..=0x24CF => cp + 0x1A,
        0xFF21..=0xFF3A => cp + 0x20,
        0x10400..=0x10427 => cp + 0x28,
        _ => cp,
    };
    char::from_u32(folded).unwrap_or(c)
}

/// The regions of the codespace where `simple_fold` is not the identity
/// (plus their fold targets). Class folding only needs to enumerate
/// members inside these ranges.
pub const FOLD_DOMAIN: &[(char, char)] = &[
    ('\u{41}', '\u{24E9}'),
    ('\u{FF21}', '\u{FF5A}'),
    ('\u{10400}', '\u{1044F}'),
];

fn orbits() -> &'static HashMap<char, Vec<char>> {
    static ORBITS: OnceLock<HashMap<char, Vec<char>>> = OnceLock::new();
    ORBITS.get_or_init(|| {
        let mut map: HashMap<char, Vec<char>> = HashMap::new();
        for &(lo, hi) in FOLD_DOMAIN {
            for cp in (lo as u32)..=(hi as u32) {
                let Some(c) = char::from_u32(cp) else { continue };
                map.entry(simple_fold(c)).or_default().push(c);
            }
        }
        map
    })
}

/// Call `f` with every scalar value whose simple fold equals the simple
/// fold of `c`, including `c` itself.
pub fn fold_orbit<F: FnMut(char)>(c: char, mut f: F) {
    let folded = simple_fold(c);
    match orbits().get(&folded) {
        Some(members) => {
            if !members.contains(&folded) {
                f(folded);
            }
            for &m in members {
                f(m);
            }
        }
        None => {
            f(c);
            if folded != c {
                f(folded);
            }
        }
    }
}

/// `\d` in the RE2 dialect.
pub const PERL_DIGIT: &[(char, char)] = &[('0', '9')];

/// `\s` in the RE2 dialect.
pub const PERL_SPACE: &[(char, char)] = &[('\t', '\n'), ('\x0B', '\r'), (' ', ' ')];

/// `\w` in the RE2 dialect.
pub const PERL_WORD: &[(char, char)] = &[('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')];

/// True for ASCII word characters. This is the word-ness `\b` tests.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

const POSIX_ALPHA: &[(char, char)] = &[('A', 'Z'), ('a', 'z')];
const POSIX_ALNUM: &[(char, char)] = &[('0', '9'), ('A', 'Z'), ('a', 'z')];
const POSIX_BLANK: &[(char, char)] = &[('\t', '\t'), (' ', ' ')];
const POSIX_CNTRL: &[(char, char)] = &[('\0', '\x1F'), ('\x7F', '\x7F')];
const POSIX_GRAPH: &[(char, char)] = &[('!', '~')];
const POSIX_LOWER: &[(char, char)] = &[('a', 'z')];
const POSIX_PRINT: &[(char, char)] = &[(' ', '~')];
const POSIX_PUNCT: &[(char, char)] = &[('!', '/'), (':', '@'), ('[', '`'), ('{', '~')];
const POSIX_UPPER: &[(char, char)] = &[('A', 'Z')];
const POSIX_XDIGIT: &[(char, char)] = &[('0', '9'), ('A', 'F'), ('a', 'f')];

/// Look up a POSIX class name as used in `[[:alpha:]]`.
pub fn posix_class(name: &str) -> Option<&'static [(char, char)]> {
    Some(match name {
        "alpha" => POSIX_ALPHA,
        "alnum" => POSIX_ALNUM,
        "blank" => POSIX_BLANK,
        "cntrl" => POSIX_CNTRL,
        "digit" => PERL_DIGIT,
        "graph" => POSIX_GRAPH,
        "lower" => POSIX_LOWER,
        "print" => POSIX_PRINT,
        "punct" => POSIX_PUNCT,
        "space" => PERL_SPACE,
        "upper" => POSIX_UPPER,
        "word" => PERL_WORD,
        "xdigit" => POSIX_XDIGIT,
        _ => return None,
    })
}

// General category and script tables. These are curated over the
// most-used parts of the codespace rather than generated from the full
// UCD; the parser rejects names that are not listed here.

#[rustfmt::skip]
const CAT_LU: &[(char, char)] = &[
    ('A', 'Z'),
    ('\u{C0}', '\u{D6}'), ('\u{D8}', '\u{DE}'),
    ('\u{178}', '\u{179}'),
    ('\u{386}', '\u{386}'), ('\u{388}', '\u{38A}'), ('\u{38C}', '\u{38C}'),
    ('\u{38E}', '\u{38F}'), ('\u{391}', '\u{3A1}'), ('\u{3A3}', '\u{3AB}'),
    ('\u{400}', '\u{42F}'),
    ('\u{531}', '\u{556}'),
    ('\u{10A0}', '\u{10C5}'),
    ('\u{1E9E}', '\u{1E9E}'),
    ('\u{1F08}', '\u{1F0F}'), ('\u{1F18}', '\u{1F1D}'), ('\u{1F28}', '\u{1F2F}'),
    ('\u{2126}', '\u{2126}'), ('\u{212A}', '\u{212B}'),
    ('\u{FF21}', '\u{FF3A}'),
    ('\u{10400}', '\u{10427}'),
];

#[rustfmt::skip]
const CAT_LL: &[(char, char)] = &[
    ('a', 'z'),
    ('\u{B5}', '\u{B5}'),
    ('\u{DF}', '\u{F6}'), ('\u{F8}', '\u{FF}'),
    ('\u{17F}', '\u{17F}'),
    ('\u{3AC}', '\u{3CE}'),
    ('\u{430}', '\u{45F}'),
    ('\u{561}', '\u{586}'),
    ('\u{1E01}', '\u{1E01}'),
    ('\u{1F00}', '\u{1F07}'), ('\u{1F10}', '\u{1F15}'), ('\u{1F20}', '\u{1F27}'),
    ('\u{FF41}', '\u{FF5A}'),
    ('\u{10428}', '\u{1044F}'),
];

#[rustfmt::skip]
const CAT_L: &[(char, char)] = &[
    ('A', 'Z'), ('a', 'z'),
    ('\u{AA}', '\u{AA}'), ('\u{B5}', '\u{B5}'), ('\u{BA}', '\u{BA}'),
    ('\u{C0}', '\u{D6}'), ('\u{D8}', '\u{F6}'), ('\u{F8}', '\u{2C1}'),
    ('\u{370}', '\u{374}'), ('\u{376}', '\u{377}'), ('\u{37A}', '\u{37D}'),
    ('\u{37F}', '\u{37F}'), ('\u{386}', '\u{386}'), ('\u{388}', '\u{38A}'),
    ('\u{38C}', '\u{38C}'), ('\u{38E}', '\u{3A1}'), ('\u{3A3}', '\u{3F5}'),
    ('\u{3F7}', '\u{481}'), ('\u{48A}', '\u{52F}'),
    ('\u{531}', '\u{556}'), ('\u{561}', '\u{587}'),
    ('\u{5D0}', '\u{5EA}'), ('\u{5EF}', '\u{5F2}'),
    ('\u{620}', '\u{64A}'), ('\u{66E}', '\u{66F}'), ('\u{671}', '\u{6D3}'),
    ('\u{6FA}', '\u{6FC}'),
    ('\u{904}', '\u{939}'), ('\u{958}', '\u{961}'),
    ('\u{985}', '\u{98C}'), ('\u{98F}', '\u{990}'), ('\u{993}', '\u{9A8}'),
    ('\u{9AA}', '\u{9B0}'), ('\u{9B6}', '\u{9B9}'),
    ('\u{E01}', '\u{E30}'), ('\u{E40}', '\u{E46}'),
    ('\u{10A0}', '\u{10C5}'), ('\u{10D0}', '\u{10FA}'),
    ('\u{1100}', '\u{1159}'),
    ('\u{1E00}', '\u{1F15}'), ('\u{1F18}', '\u{1F1D}'), ('\u{1F20}', '\u{1F45}'),
    ('\u{1F48}', '\u{1F4D}'), ('\u{1F50}', '\u{1F57}'), ('\u{1F5F}', '\u{1F7D}'),
    ('\u{1F80}', '\u{1FB4}'),
    ('\u{2126}', '\u{2126}'), ('\u{212A}', '\u{212B}'),
    ('\u{2C60}', '\u{2C7F}'),
    ('\u{3041}', '\u{3096}'), ('\u{309D}', '\u{309F}'),
    ('\u{30A1}', '\u{30FA}'), ('\u{30FC}', '\u{30FF}'),
    ('\u{3105}', '\u{312F}'),
    ('\u{3400}', '\u{4DBF}'), ('\u{4E00}', '\u{9FFF}'),
    ('\u{A720}', '\u{A76F}'),
    ('\u{AC00}', '\u{D7A3}'),
    ('\u{F900}', '\u{FAD9}'),
    ('\u{FF21}', '\u{FF3A}'), ('\u{FF41}', '\u{FF5A}'),
    ('\u{FF66}', '\u{FFBE}'),
    ('\u{10400}', '\u{1044F}'),
];

#[rustfmt::skip]
const CAT_ND: &[(char, char)] = &[
    ('0', '9'),
    ('\u{660}', '\u{669}'), ('\u{6F0}', '\u{6F9}'),
    ('\u{966}', '\u{96F}'), ('\u{9E6}', '\u{9EF}'),
    ('\u{A66}', '\u{A6F}'), ('\u{AE6}', '\u{AEF}'),
    ('\u{B66}', '\u{B6F}'), ('\u{BE6}', '\u{BEF}'),
    ('\u{C66}', '\u{C6F}'), ('\u{CE6}', '\u{CEF}'),
    ('\u{D66}', '\u{D6F}'),
    ('\u{E50}', '\u{E59}'), ('\u{ED0}', '\u{ED9}'),
    ('\u{F20}', '\u{F29}'),
    ('\u{1040}', '\u{1049}'),
    ('\u{17E0}', '\u{17E9}'),
    ('\u{FF10}', '\u{FF19}'),
];

#[rustfmt::skip]
const CAT_N: &[(char, char)] = &[
    ('0', '9'),
    ('\u{B2}', '\u{B3}'), ('\u{B9}', '\u{B9}'), ('\u{BC}', '\u{BE}'),
    ('\u{660}', '\u{669}'), ('\u{6F0}', '\u{6F9}'),
    ('\u{966}', '\u{96F}'), ('\u{9E6}', '\u{9EF}'),
    ('\u{A66}', '\u{A6F}'), ('\u{AE6}', '\u{AEF}'),
    ('\u{B66}', '\u{B6F}'), ('\u{BE6}', '\u{BF2}'),
    ('\u{C66}', '\u{C6F}'), ('\u{CE6}', '\u{CEF}'),
    ('\u{D66}', '\u{D6F}'),
    ('\u{E50}', '\u{E59}'), ('\u{ED0}', '\u{ED9}'),
    ('\u{F20}', '\u{F33}'),
    ('\u{1040}', '\u{1049}'),
    ('\u{17E0}', '\u{17E9}'),
    ('\u{2070}', '\u{2070}'), ('\u{2074}', '\u{2079}'), ('\u{2080}', '\u{2089}'),
    ('\u{2150}', '\u{2182}'),
    ('\u{2460}', '\u{249B}'),
    ('\u{3007}', '\u{3007}'), ('\u{3021}', '\u{3029}'),
    ('\u{FF10}', '\u{FF19}'),
];

#[rustfmt::skip]
const CAT_P: &[(char, char)] = &[
    ('!', '#'), ('%', '*'), (',', '/'), (':', ';'), ('?', '@'),
    ('[', ']'), ('_', '_'), ('{', '{'), ('}', '}'),
    ('\u{A1}', '\u{A1}'), ('\u{A7}', '\u{A7}'), ('\u{AB}', '\u{AB}'),
    ('\u{B6}', '\u{B7}'), ('\u{BB}', '\u{BB}'), ('\u{BF}', '\u{BF}'),
    ('\u{37E}', '\u{37E}'), ('\u{387}', '\u{387}'),
    ('\u{5BE}', '\u{5BE}'), ('\u{5C0}', '\u{5C0}'), ('\u{5C3}', '\u{5C3}'),
    ('\u{60C}', '\u{60D}'), ('\u{61B}', '\u{61B}'), ('\u{61F}', '\u{61F}'),
    ('\u{964}', '\u{965}'),
    ('\u{2010}', '\u{2027}'), ('\u{2030}', '\u{205E}'),
    ('\u{3001}', '\u{3003}'), ('\u{3008}', '\u{3011}'), ('\u{3014}', '\u{301F}'),
    ('\u{FF01}', '\u{FF03}'), ('\u{FF05}', '\u{FF0A}'), ('\u{FF0C}', '\u{FF0F}'),
    ('\u{FF1A}', '\u{FF1B}'), ('\u{FF1F}', '\u{FF20}'),
    ('\u{FF3B}', '\u{FF3D}'), ('\u{FF3F}', '\u{FF3F}'),
    ('\u{FF5B}', '\u{FF5B}'), ('\u{FF5D}', '\u{FF5D}'),
];

#[rustfmt::skip]
const CAT_S: &[(char, char)] = &[
    ('$', '$'), ('+', '+'), ('<', '>'), ('^', '^'), ('`', '`'), ('|', '|'), ('~', '~'),
    ('\u{A2}', '\u{A6}'), ('\u{A8}', '\u{A9}'), ('\u{AC}', '\u{AC}'),
    ('\u{AE}', '\u{B1}'), ('\u{B4}', '\u{B4}'), ('\u{B8}', '\u{B8}'),
    ('\u{D7}', '\u{D7}'), ('\u{F7}', '\u{F7}'),
    ('\u{20A0}', '\u{20BF}'),
    ('\u{2190}', '\u{21FF}'), ('\u{2200}', '\u{22FF}'),
    ('\u{2300}', '\u{23FF}'), ('\u{25A0}', '\u{25FF}'),
    ('\u{2600}', '\u{26FF}'),
    ('\u{FF04}', '\u{FF04}'), ('\u{FF0B}', '\u{FF0B}'),
    ('\u{FF1C}', '\u{FF1E}'), ('\u{FF3E}', '\u{FF3E}'),
    ('\u{FF40}', '\u{FF40}'), ('\u{FF5C}', '\u{FF5C}'), ('\u{FF5E}', '\u{FF5E}'),
];

#[rustfmt::skip]
const CAT_Z: &[(char, char)] = &[
    (' ', ' '),
    ('\u{A0}', '\u{A0}'),
    ('\u{1680}', '\u{1680}'),
    ('\u{2000}', '\u{200A}'), ('\u{2028}', '\u{2029}'), ('\u{202F}', '\u{202F}'),
    ('\u{205F}', '\u{205F}'),
    ('\u{3000}', '\u{3000}'),
];

#[rustfmt::skip]
const SCRIPT_LATIN: &[(char, char)] = &[
    ('A', 'Z'), ('a', 'z'),
    ('\u{AA}', '\u{AA}'), ('\u{BA}', '\u{BA}'),
    ('\u{C0}', '\u{D6}'), ('\u{D8}', '\u{F6}'), ('\u{F8}', '\u{2B8}'),
    ('\u{1E00}', '\u{1EFF}'),
    ('\u{2C60}', '\u{2C7F}'),
    ('\u{A720}', '\u{A7FF}'),
    ('\u{FF21}', '\u{FF3A}'), ('\u{FF41}', '\u{FF5A}'),
];

#[rustfmt::skip]
const SCRIPT_GREEK: &[(char, char)] = &[
    ('\u{370}', '\u{373}'), ('\u{375}', '\u{377}'), ('\u{37A}', '\u{37D}'),
    ('\u{37F}', '\u{37F}'), ('\u{384}', '\u{384}'), ('\u{386}', '\u{386}'),
    ('\u{388}', '\u{38A}'), ('\u{38C}', '\u{38C}'), ('\u{38E}', '\u{3A1}'),
    ('\u{3A3}', '\u{3E1}'), ('\u{3F0}', '\u{3FF}'),
    ('\u{1F00}', '\u{1F15}'), ('\u{1F18}', '\u{1F1D}'), ('\u{1F20}', '\u{1F45}'),
    ('\u{1F48}', '\u{1F4D}'), ('\u{1F50}', '\u{1F57}'), ('\u{1F5F}', '\u{1F7D}'),
    ('\u{1F80}', '\u{1FB4}'), ('\u{1FB6}', '\u{1FC4}'), ('\u{1FC6}', '\u{1FD3}'),
];

const SCRIPT_CYRILLIC: &[(char, char)] = &[('\u{400}', '\u{484}'), ('\u{487}', '\u{52F}'), ('\u{1C80}', '\u{1C88}'), ('\u{2DE0}', '\u{2DFF}'), ('\u{A640}', '\u{A69F}')];

const SCRIPT_HAN: &[(char, char)] = &[
    ('\u{2E80}', '\u{2E99}'),
    ('\u{3005}', '\u{3005}'),
    ('\u{3400}', '\u{4DBF}'),
    ('\u{4E00}', '\u{9FFF}'),
    ('\u{F900}', '\u{FAD9}'),
    ('\u{20000}', '\u{2A6DF}'),
];

const SCRIPT_ARABIC: &[(char, char)] = &[('\u{600}', '\u{604}'), ('\u{606}', '\u{60B}'), ('\u{60D}', '\u{61A}'), ('\u{61E}', '\u{61E}'), ('\u{620}', '\u{63F}'), ('\u{641}', '\u{64A}'), ('\u{656}', '\u{66F}'), ('\u{671}', '\u{6DC}'), ('\u{6DE}', '\u{6FF}'), ('\u{750}', '\u{77F}')];

const SCRIPT_HEBREW: &[(char, char)] = &[('\u{591}', '\u{5C7}'), ('\u{5D0}', '\u{5EA}'), ('\u{5EF}', '\u{5F4}')];

const SCRIPT_HIRAGANA: &[(char, char)] = &[('\u{3041}', '\u{3096}'), ('\u{309D}', '\u{309F}'), ('\u{1B001}', '\u{1B11F}')];

const SCRIPT_KATAKANA: &[(char, char)] = &[('\u{30A1}', '\u{30FA}'), ('\u{30FD}', '\u{30FF}'), ('\u{31F0}', '\u{31FF}'), ('\u{FF66}', '\u{FF9D}')];

/// Look up a `\p{...}` property name. The name set is fixed; anything
/// else is a parse error.
pub fn property_ranges(name: &str) -> Option<&'static [(char, char)]> {
    Some(match name {
        "L" => CAT_L,
        "Lu" => CAT_LU,
        "Ll" => CAT_LL,
        "N" => CAT_N,
        "Nd" => CAT_ND,
        "P" => CAT_P,
        "S" => CAT_S,
        "Z" => CAT_Z,
        "Latin" => SCRIPT_LATIN,
        "Greek" => SCRIPT_GREEK,
        "Cyrillic" => SCRIPT_CYRILLIC,
        "Han" => SCRIPT_HAN,
        "Arabic" => SCRIPT_ARABIC,
        "Hebrew" => SCRIPT_HEBREW,
        "Hiragana" => SCRIPT_HIRAGANA,
        "Katakana" => SCRIPT_KATAKANA,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_fold() {
        assert_eq!(simple_fold('A'), 'a');
        assert_eq!(simple_fold('z'), 'z');
        assert_eq!(simple_fold('_'), '_');
    }

    #[test]
    fn latin1_fold() {
        assert_eq!(simple_fold('\u{C9}'), '\u{E9}'); // É -> é
        assert_eq!(simple_fold('\u{D7}'), '\u{D7}'); // multiplication sign
        assert_eq!(simple_fold('\u{DF}'), '\u{DF}'); // ß folds to itself
    }

    #[test]
    fn greek_and_cyrillic_fold() {
        assert_eq!(simple_fold('\u{391}'), '\u{3B1}'); // Α -> α
        assert_eq!(simple_fold('\u{3A3}'), '\u{3C3}'); // Σ -> σ
        assert_eq!(simple_fold('\u{3C2}'), '\u{3C3}'); // ς -> σ
        assert_eq!(simple_fold('\u{410}'), '\u{430}'); // А -> а
        assert_eq!(simple_fold('\u{401}'), '\u{451}'); // Ё -> ё
    }

    #[test]
    fn singleton_fold() {
        assert_eq!(simple_fold('\u{212A}'), 'k'); // KELVIN SIGN
        assert_eq!(simple_fold('\u{17F}'), 's'); // LONG S
        assert_eq!(simple_fold('\u{B5}'), '\u{3BC}'); // MICRO -> mu
    }

    #[test]
    fn orbit_of_k() {
        let mut orbit = vec![];
        fold_orbit('k', |c| orbit.push(c));
        orbit.sort();
        assert_eq!(orbit, vec!['K', 'k', '\u{212A}']);
    }

    #[test]
    fn orbit_of_sigma() {
        let mut orbit = vec![];
        fold_orbit('\u{3C3}', |c| orbit.push(c));
        assert!(orbit.contains(&'\u{3A3}'));
        assert!(orbit.contains(&'\u{3C2}'));
        assert!(orbit.contains(&'\u{3C3}'));
    }

    #[test]
    fn orbit_outside_domain_is_identity() {
        let mut orbit = vec![];
        fold_orbit('\u{4E2D}', |c| orbit.push(c));
        assert_eq!(orbit, vec!['\u{4E2D}']);
    }

    #[test]
    fn property_lookup() {
        assert!(property_ranges("L").is_some());
        assert!(property_ranges("Nd").is_some());
        assert!(property_ranges("Hiragana").is_some());
        assert!(property_ranges("Quaternary").is_none());
    }

    #[test]
    fn posix_lookup() {
        assert!(posix_class("alpha").is_some());
        assert!(posix_class("word").is_some());
        assert!(posix_class("alphanumeric").is_none());
    }
}
