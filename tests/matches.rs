// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use linregex::{match_string, Error, Flags, MatchEngine, Regex};

macro_rules! regex {
    ($re:expr) => {
        Regex::new($re).unwrap()
    };
}

// Asserts the spans of the whole match and any listed capture groups.
macro_rules! mat {
    ($name:ident, $re:expr, $text:expr, $($pos:expr),+) => {
        #[test]
        fn $name() {
            let expected: Vec<Option<(usize, usize)>> = vec![$($pos),+];
            let re = regex!($re);
            let caps = re
                .captures($text)
                .unwrap_or_else(|| panic!("no match of {:?} against {:?}", $re, $text));
            let got: Vec<Option<(usize, usize)>> =
                (0..expected.len()).map(|i| caps.pos(i)).collect();
            assert_eq!(
                expected, got,
                "wrong spans for {:?} against {:?}", $re, $text
            );
        }
    };
}

macro_rules! nomat {
    ($name:ident, $re:expr, $text:expr) => {
        #[test]
        fn $name() {
            assert!(
                !regex!($re).is_match($text),
                "unexpected match of {:?} against {:?}",
                $re,
                $text
            );
        }
    };
}

// The seed scenarios.
mat!(seed_substring, "hello", "hello world", Some((0, 5)));
nomat!(seed_anchored_miss, "^hello$", "hello world");
mat!(seed_alt_plus, r"a(b|c)+d", "abccbd", Some((0, 6)), Some((4, 5)));
mat!(seed_phone, r"\d{3}-\d{4}", "call 555-1212 now", Some((5, 13)));
mat!(seed_empty_star, "a*", "bbb", Some((0, 0)));
mat!(seed_word_boundary, r"\bword\b", "word", Some((0, 4)));
mat!(seed_lazy_plus, "a+?b", "aaab", Some((0, 4)));
mat!(seed_leftmost_first, "(a|ab)c", "abc", Some((0, 3)), Some((0, 2)));

#[test]
fn seed_case_fold_cafe() {
    let re = regex!(r"(?i)CAF\u{c9}");
    assert_eq!(re.find("Visit the caf\u{e9}!"), Some((10, 15)));
}

// Literals and alternation.
mat!(literal_at_end, "world", "hello world", Some((6, 11)));
mat!(alt_first_wins, "a|ab", "ab", Some((0, 1)));
mat!(alt_order_by_position, "xyz|b", "abc", Some((1, 2)));
mat!(alt_empty_branch, "(a|)c", "c", Some((0, 1)), Some((0, 0)));
nomat!(literal_missing, "quux", "hello world");

// Quantifiers.
mat!(greedy_star, "a*", "aaa", Some((0, 3)));
mat!(lazy_star, "a*?", "aaa", Some((0, 0)));
mat!(greedy_plus, "a+", "baaa", Some((1, 4)));
mat!(quest_present, "ab?", "ab", Some((0, 2)));
mat!(quest_absent, "ab?", "ac", Some((0, 1)));
mat!(counted_exact, "a{3}", "aaaa", Some((0, 3)));
mat!(counted_range_greedy, "a{2,4}", "aaaaa", Some((0, 4)));
mat!(counted_range_lazy, "a{2,4}?", "aaaaa", Some((0, 2)));
mat!(counted_open, "a{2,}", "aaaaa", Some((0, 5)));
mat!(counted_zero, "ab{0}c", "ac", Some((0, 2)));
nomat!(counted_too_few, "a{3}", "aa");
mat!(nested_star_terminates, "(?:a*)*b", "aaab", Some((0, 4)));
mat!(ungreedy_flag_swaps, "(?U)a+", "aaa", Some((0, 1)));
mat!(ungreedy_flag_lazy_marker, "(?U)a+?", "aaa", Some((0, 3)));

// Classes.
mat!(class_range, "[a-z]+", "012abc", Some((3, 6)));
mat!(class_negated, "[^0-9]+", "123abc", Some((3, 6)));
mat!(class_leading_close, "[]a]+", "]a]", Some((0, 3)));
mat!(class_dash_literal, "[-a]+", "-a-", Some((0, 3)));
mat!(class_perl_digit, r"[\d]+", "x42y", Some((1, 3)));
mat!(class_posix, "[[:xdigit:]]+", "zzCAFEzz", Some((2, 6)));
mat!(class_posix_negated, "[[:^digit:]]+", "12ab", Some((2, 4)));
nomat!(class_perl_space_miss, r"\s", "abc");

// Perl classes are ASCII in this dialect.
mat!(perl_word_ascii, r"\w+", "_ab1\u{e9}", Some((0, 4)));
nomat!(perl_digit_is_ascii, r"\d", "\u{660}");

// Unicode properties.
mat!(prop_letter, r"\p{L}+", "1日本語2", Some((1, 10)));
mat!(prop_greek, r"\p{Greek}+", "abc\u{3b1}\u{3b2}\u{3b3}x", Some((3, 9)));
mat!(prop_negated, r"\P{L}+", "ab!?cd", Some((2, 4)));
mat!(prop_digit_unicode, r"\p{Nd}", "x\u{660}", Some((1, 3)));
mat!(prop_short_form, r"\pL", "9a", Some((1, 2)));

// Anchors and boundaries.
mat!(anchor_both, "^abc$", "abc", Some((0, 3)));
nomat!(anchor_end_miss, "abc$", "abcd");
mat!(anchor_text_escapes, r"\Aabc\z", "abc", Some((0, 3)));
mat!(multiline_start, "(?m)^b", "a\nb", Some((2, 3)));
mat!(multiline_end, "(?m)a$", "a\nb", Some((0, 1)));
nomat!(no_multiline_start, "^b", "a\nb");
mat!(boundary_inside, r"\bcat\b", "the cat sat", Some((4, 7)));
nomat!(boundary_infix_miss, r"\bcat\b", "concatenate");
mat!(not_boundary, r"\Bnd\B", "bundle", Some((2, 4)));

// Dot and dotall.
mat!(dot_skips_newline, "a.c", "axc", Some((0, 3)));
nomat!(dot_newline_miss, "a.c", "a\nc");
mat!(dotall_matches_newline, "(?s)a.c", "a\nc", Some((0, 3)));
mat!(dot_is_one_code_point, "^.$", "\u{e9}", Some((0, 2)));

// Case folding.
mat!(fold_ascii, "(?i)abc", "xAbCy", Some((1, 4)));
mat!(fold_sigma_final, "(?i)\u{3a3}", "\u{3c2}", Some((0, 2)));
mat!(fold_kelvin, "(?i)k", "\u{212a}", Some((0, 3)));
mat!(fold_class, "(?i)[k]", "K", Some((0, 1)));
mat!(fold_scoped, "a(?i:b)c", "aBc", Some((0, 3)));
nomat!(fold_scope_ends, "(?:(?i)a)b", "AB");

// Captures.
mat!(
    caps_nested,
    "((a)(b))c",
    "abc",
    Some((0, 3)),
    Some((0, 2)),
    Some((0, 1)),
    Some((1, 2))
);
mat!(caps_unmatched_group, "(a)|(b)", "b", Some((0, 1)), None, Some((0, 1)));
mat!(caps_quest_absent, "(a)(b)?", "a", Some((0, 1)), Some((0, 1)), None);
mat!(caps_repeated_group, "(a|b)+", "ab", Some((0, 2)), Some((1, 2)));

#[test]
fn named_captures_resolve() {
    let re = regex!(r"(?P<key>\w+)=(?P<value>\d+)");
    let caps = re.captures("retries=7").unwrap();
    assert_eq!(caps.name("key"), Some((0, 7)));
    assert_eq!(caps.name("value"), Some((8, 9)));
    assert_eq!(caps.name("nope"), None);
    assert_eq!(re.capture_names()[1].as_deref(), Some("key"));
}

#[test]
fn read_captures_into_short_buffer() {
    let re = regex!("(a)(b)");
    // Only the whole-match slots are requested.
    let mut slots = [Some(99), Some(99)];
    assert!(re.read_captures(b"zab", &mut slots));
    assert_eq!(slots, [Some(1), Some(3)]);
    // And an empty buffer still reports the match.
    assert!(re.read_captures(b"zab", &mut []));
}

// Lookaround.
mat!(lookahead, r"\w+(?=;)", "a1; b2", Some((0, 2)));
mat!(lookahead_negative, "a(?!b)", "ab ac", Some((3, 4)));
mat!(lookbehind, "(?<=\\$)\\d+", "price $37 now", Some((7, 9)));
mat!(lookbehind_negative, "(?<!a)b", "ab cb", Some((4, 5)));
mat!(lookbehind_at_start, "(?<!x)a", "abc", Some((0, 1)));
mat!(lookbehind_alternation, "(?<=ab|cd)z", "cdz", Some((2, 3)));
nomat!(lookahead_blocks, "a(?=b)c", "abc");

#[test]
fn variable_width_lookbehind_rejected() {
    match Regex::new("(?<=a+)b") {
        Err(Error::Unsupported { .. }) => {}
        other => panic!("expected Unsupported, got {:?}", other.map(|r| r.as_str().to_owned())),
    }
}

// Empty pattern and empty subject.
mat!(empty_pattern, "", "abc", Some((0, 0)));
mat!(empty_subject_star, "a*", "", Some((0, 0)));
nomat!(empty_subject_literal, "a", "");

// Byte subjects with invalid UTF-8.
#[test]
fn invalid_utf8_is_replacement() {
    let re = regex!("a.c");
    assert!(re.is_match_bytes(&[b'a', 0xFF, b'c']));
    assert_eq!(re.find_bytes(&[b'a', 0xFF, b'c']), Some((0, 3)));
    // A bad byte is not a word character and not a digit.
    assert!(!regex!(r"\d").is_match_bytes(&[0xFF]));
    assert!(!regex!(r"a\bz").is_match_bytes(&[b'a', 0xFF]));
}

// Errors surface from the one-shot entry point too.
#[test]
fn match_string_round_trip() {
    assert_eq!(match_string("he..o", "hello"), Ok(true));
    assert_eq!(match_string("^x", "hello"), Ok(false));
    assert!(matches!(match_string("a{2,1}", "x"), Err(Error::Parse { .. })));
    assert!(matches!(match_string(r"(a)\1", "aa"), Err(Error::Unsupported { .. })));
}

#[test]
fn find_iter_scans_left_to_right() {
    let re = regex!(r"\d+");
    let spans: Vec<(usize, usize)> = re.find_iter("a1 b22 c333").collect();
    assert_eq!(spans, vec![(1, 2), (4, 6), (8, 11)]);
}

#[test]
fn find_iter_handles_empty_matches() {
    let re = regex!("a*");
    let spans: Vec<(usize, usize)> = re.find_iter("aba").collect();
    assert_eq!(spans, vec![(0, 1), (2, 3)]);
    let spans: Vec<(usize, usize)> = re.find_iter("b").collect();
    assert_eq!(spans, vec![(0, 0), (1, 1)]);
}

#[test]
fn split_yields_pieces() {
    let re = regex!("[,;]");
    let pieces: Vec<&str> = re.split("a,b;c").collect();
    assert_eq!(pieces, vec!["a", "b", "c"]);
    let pieces: Vec<&str> = re.split("nosep").collect();
    assert_eq!(pieces, vec!["nosep"]);
    let pieces: Vec<&str> = re.split("x,").collect();
    assert_eq!(pieces, vec!["x", ""]);
}

#[test]
fn stats_report_sizes() {
    let re = regex!("(a)(b|c)*d");
    let stats = re.stats();
    assert_eq!(stats.capture_count, 3);
    assert!(stats.ast_nodes >= 6);
    assert!(stats.program_size >= 8);
}

#[test]
fn cancellation_budget() {
    let re = regex!("a*b");
    let text = "a".repeat(10_000);
    match re.find_bounded(&text, 10) {
        Err(Error::Cancelled { steps }) => assert!(steps > 10),
        other => panic!("expected cancellation, got {:?}", other),
    }
    assert_eq!(re.find_bounded("aab", 1_000_000), Ok(Some((0, 3))));
}

// The same scenarios must hold on every engine.
#[test]
fn engines_agree() {
    let scenarios: &[(&str, &str, Option<(usize, usize)>)] = &[
        ("hello", "hello world", Some((0, 5))),
        ("^hello$", "hello world", None),
        (r"a(b|c)+d", "abccbd", Some((0, 6))),
        (r"\d{3}-\d{4}", "call 555-1212 now", Some((5, 13))),
        ("a*", "bbb", Some((0, 0))),
        ("a+?b", "aaab", Some((0, 4))),
        ("(a|ab)c", "abc", Some((0, 3))),
        (r"\bword\b", "word", Some((0, 4))),
        ("(?m)^b$", "a\nb", Some((2, 3))),
    ];
    for engine in [MatchEngine::Automatic, MatchEngine::Nfa, MatchEngine::Backtrack] {
        for &(pattern, text, expected) in scenarios {
            let re =
                Regex::with_engine(engine, 100_000, pattern, Flags::empty()).unwrap();
            assert_eq!(
                re.find(text),
                expected,
                "engine {:?} disagrees on {:?} against {:?}",
                engine,
                pattern,
                text
            );
        }
    }
}

#[test]
fn literal_engine_reports_spans() {
    let re = Regex::with_engine(MatchEngine::Literals, 100_000, "abc|xyz", Flags::empty())
        .unwrap();
    assert_eq!(re.find("__xyz__"), Some((2, 5)));
    assert!(!re.is_match("nothing here"));
}

#[test]
fn shared_regex_matches_concurrently() {
    use std::sync::Arc;
    use std::thread;

    let re = Arc::new(regex!(r"\w+-\d+"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let re = Arc::clone(&re);
            thread::spawn(move || {
                let text = format!("tick item-{} tock", i);
                re.find(&text)
            })
        })
        .collect();
    for h in handles {
        // "tick item-N tock": the match is always `item-N`.
        assert_eq!(h.join().unwrap(), Some((5, 11)));
    }
}
