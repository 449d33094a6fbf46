// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::arena::Arena;
use crate::ast::{Ast, AstId};
use crate::backtrack::BackCache;
use crate::charclass::CharClass;
use crate::compile::Compiler;
use crate::error::Error;
use crate::flags::Flags;
use crate::inst::{EmptyLook, Inst, InstIdx};
use crate::literals::{BuildPrefixes, Literals};
use crate::nfa::NfaCache;
use crate::parse;
use crate::pool::{Pool, PoolGuard};

/// Program represents a compiled regular expression. Once an expression
/// is compiled, its representation is immutable and will never change.
/// (Well, almost. In fact, the matching engines cache state that can be
/// reused on subsequent searches. But this is interior mutability that
/// shouldn't be observable by the caller.)
#[derive(Debug)]
pub struct Program {
    /// The original regular expression string.
    pub original: String,
    /// The flags the expression was compiled with.
    pub flags: Flags,
    /// The arena holding the syntax tree, kept for the lifetime of the
    /// pattern. Dropping the program frees the tree, the class pool and
    /// the instructions in one step.
    pub ast: Arena<Ast>,
    /// The root of the syntax tree.
    pub root: AstId,
    /// A sequence of instructions.
    pub insts: Vec<Inst>,
    /// The pool of character classes referenced by Ranges instructions.
    pub classes: Vec<CharClass>,
    /// The sequence of capture group names. There is an entry for each
    /// capture group index and a name exists only if the capture group
    /// is named.
    pub cap_names: Vec<Option<String>>,
    /// If the regular expression requires a literal prefix in order to
    /// have a match, that prefix is stored here.
    pub prefixes: Literals,
    /// True iff program is anchored at the beginning.
    pub anchored_begin: bool,
    /// True iff program is anchored at the end.
    pub anchored_end: bool,
    /// Index of the main flow's Match instruction. Lookaround
    /// sub-regions live after it.
    pub main_match: InstIdx,
    /// Cached NFA scratch.
    nfa_cache: Pool<NfaCache>,
    /// Cached backtracking scratch.
    backtrack_cache: Pool<BackCache>,
}

impl Program {
    /// Compiles a pattern into a program.
    pub fn new(re: &str, flags: Flags, size_limit: usize) -> Result<Program, Error> {
        let parsed = parse::parse(re, flags)?;
        let compiled = Compiler::new(&parsed.ast, size_limit).compile(parsed.root)?;
        let prefixes =
            BuildPrefixes::new(&compiled.insts, &compiled.classes).literals().into_matcher();
        let mut prog = Program {
            original: re.to_owned(),
            flags,
            ast: parsed.ast,
            root: parsed.root,
            insts: compiled.insts,
            classes: compiled.classes,
            cap_names: parsed.cap_names,
            prefixes,
            anchored_begin: false,
            anchored_end: false,
            main_match: compiled.main_match,
            nfa_cache: Pool::new(Box::new(NfaCache::new)),
            backtrack_cache: Pool::new(Box::new(BackCache::new)),
        };
        prog.anchored_begin = matches!(
            prog.insts[prog.skip(0)],
            Inst::EmptyLook(ref inst) if inst.look == EmptyLook::StartText
        );
        prog.anchored_end = prog.main_match >= 2
            && matches!(
                prog.insts[prog.main_match - 2],
                Inst::EmptyLook(ref inst) if inst.look == EmptyLook::EndText
            );
        Ok(prog)
    }

    /// If pc is an index to a no-op instruction (Save or Jump), then
    /// return the next pc that is not a no-op instruction.
    pub fn skip(&self, mut pc: InstIdx) -> InstIdx {
        loop {
            match self.insts[pc] {
                Inst::Save(ref inst) => pc = inst.goto,
                Inst::Jump(ref inst) => pc = inst.goto,
                _ => return pc,
            }
        }
    }

    /// Returns the total number of capture groups in the regular
    /// expression. This includes the zeroth capture.
    pub fn num_captures(&self) -> usize {
        self.cap_names.len()
    }

    /// Allocate new capture groups.
    pub fn alloc_captures(&self) -> Vec<Option<usize>> {
        vec![None; 2 * self.num_captures()]
    }

    /// Check NFA scratch out of the pattern's cache.
    pub fn cache_nfa(&self) -> PoolGuard<'_, NfaCache> {
        self.nfa_cache.get()
    }

    /// Check backtracking scratch out of the pattern's cache.
    pub fn cache_backtrack(&self) -> PoolGuard<'_, BackCache> {
        self.backtrack_cache.get()
    }
}

impl Clone for Program {
    fn clone(&self) -> Program {
        Program {
            original: self.original.clone(),
            flags: self.flags,
            ast: self.ast.clone(),
            root: self.root,
            insts: self.insts.clone(),
            classes: self.classes.clone(),
            cap_names: self.cap_names.clone(),
            prefixes: self.prefixes.clone(),
            anchored_begin: self.anchored_begin,
            anchored_end: self.anchored_end,
            main_match: self.main_match,
            nfa_cache: Pool::new(Box::new(NfaCache::new)),
            backtrack_cache: Pool::new(Box::new(BackCache::new)),
        }
    }
}
