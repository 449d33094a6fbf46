// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashMap;

use log::debug;

use crate::arena::Arena;
use crate::ast::{self, Ast, AstId};
use crate::charclass::CharClass;
use crate::error::Error;
use crate::inst::{
    EmptyLook, Inst, InstChar, InstEmptyLook, InstIdx, InstJump, InstLook, InstRanges, InstSave,
    InstSplit,
};

/// The output of compilation: the instruction vector, the pool of
/// deduplicated character classes it references, and the index of the
/// main flow's Match instruction (lookaround sub-regions follow it).
#[derive(Clone, Debug)]
pub struct Compiled {
    pub insts: Vec<Inst>,
    pub classes: Vec<CharClass>,
    pub main_match: InstIdx,
}

/// A regex compiler.
///
/// A regex compiler is responsible for turning a regex's AST into a
/// sequence of instructions using Thompson's construction. Split and
/// jump targets that are not known at emission time are patched in
/// afterwards.
pub struct Compiler<'a> {
    ast: &'a Arena<Ast>,
    size_limit: usize,
    insts: Vec<Inst>,
    classes: Vec<CharClass>,
    class_ids: HashMap<CharClass, usize>,
    pending_looks: Vec<(InstIdx, AstId)>,
}

impl<'a> Compiler<'a> {
    /// Creates a new compiler that limits the program to `size_limit`
    /// instructions.
    pub fn new(ast: &'a Arena<Ast>, size_limit: usize) -> Compiler<'a> {
        Compiler {
            ast,
            size_limit,
            insts: vec![],
            classes: vec![],
            class_ids: HashMap::new(),
            pending_looks: vec![],
        }
    }

    /// Compiles the AST rooted at `root` into a program. The root is
    /// wrapped in the implicit capture group 0.
    pub fn compile(mut self, root: AstId) -> Result<Compiled, Error> {
        self.push(Inst::Save(InstSave { goto: 1, slot: 0 }))?;
        self.c(root)?;
        let goto = self.insts.len() + 1;
        self.push(Inst::Save(InstSave { goto, slot: 1 }))?;
        let main_match = self.insts.len();
        self.push(Inst::Match)?;
        // Lookaround bodies are emitted after the main flow, each region
        // ending in its own Match. Regions can queue further regions.
        while let Some((look_pc, child)) = self.pending_looks.pop() {
            let entry = self.insts.len();
            match self.insts[look_pc] {
                Inst::Look(ref mut inst) => inst.entry = entry,
                _ => panic!("BUG: invalid look index."),
            }
            self.c(child)?;
            self.push(Inst::Match)?;
        }
        self.coalesce();
        debug!(
            "compiled {} instructions, {} pooled classes",
            self.insts.len(),
            self.classes.len()
        );
        Ok(Compiled { insts: self.insts, classes: self.classes, main_match })
    }

    fn c(&mut self, id: AstId) -> Result<(), Error> {
        match self.ast[id].clone() {
            Ast::Empty => {}
            Ast::Literal { chars, casei } => {
                for c in chars {
                    let goto = self.insts.len() + 1;
                    self.push(Inst::Char(InstChar { goto, c, casei }))?;
                }
            }
            Ast::Class(cls) => {
                if cls.len() == 1 && cls.ranges()[0].start == cls.ranges()[0].end {
                    let goto = self.insts.len() + 1;
                    let c = cls.ranges()[0].start;
                    self.push(Inst::Char(InstChar { goto, c, casei: false }))?;
                } else {
                    self.push_class(cls)?;
                }
            }
            Ast::AnyChar => self.push_class(CharClass::any())?,
            Ast::AnyCharNoNL => self.push_class(CharClass::any_but_newline())?,
            Ast::StartLine => self.push_look(EmptyLook::StartLine)?,
            Ast::EndLine => self.push_look(EmptyLook::EndLine)?,
            Ast::StartText => self.push_look(EmptyLook::StartText)?,
            Ast::EndText => self.push_look(EmptyLook::EndText)?,
            Ast::WordBoundary => self.push_look(EmptyLook::WordBoundary)?,
            Ast::NotWordBoundary => self.push_look(EmptyLook::NotWordBoundary)?,
            Ast::Group { child, index, .. } => {
                let slot = 2 * index as usize;
                let goto = self.insts.len() + 1;
                self.push(Inst::Save(InstSave { goto, slot }))?;
                self.c(child)?;
                let goto = self.insts.len() + 1;
                self.push(Inst::Save(InstSave { goto, slot: slot + 1 }))?;
            }
            Ast::Concat(children) => {
                for child in children {
                    self.c(child)?;
                }
            }
            Ast::Alternate(children) => self.alternate(&children)?,
            Ast::Quest { child, greedy } => {
                let split = self.empty_split()?;
                let j1 = self.insts.len();
                self.c(child)?;
                let j2 = self.insts.len();
                if greedy {
                    self.set_split(split, j1, j2);
                } else {
                    self.set_split(split, j2, j1);
                }
            }
            Ast::Star { child, greedy } => {
                let j1 = self.insts.len();
                let split = self.empty_split()?;
                let j2 = self.insts.len();
                self.c(child)?;
                let jmp = self.empty_jump()?;
                let j3 = self.insts.len();
                self.set_jump(jmp, j1);
                if greedy {
                    self.set_split(split, j2, j3);
                } else {
                    self.set_split(split, j3, j2);
                }
            }
            Ast::Plus { child, greedy } => {
                let j1 = self.insts.len();
                self.c(child)?;
                let split = self.empty_split()?;
                let j2 = self.insts.len();
                if greedy {
                    self.set_split(split, j1, j2);
                } else {
                    self.set_split(split, j2, j1);
                }
            }
            Ast::Repeat { child, min, max: None, greedy } => {
                for _ in 0..min {
                    self.c(child)?;
                }
                // Trailing unbounded tail compiles like `e*`.
                let j1 = self.insts.len();
                let split = self.empty_split()?;
                let j2 = self.insts.len();
                self.c(child)?;
                let jmp = self.empty_jump()?;
                let j3 = self.insts.len();
                self.set_jump(jmp, j1);
                if greedy {
                    self.set_split(split, j2, j3);
                } else {
                    self.set_split(split, j3, j2);
                }
            }
            Ast::Repeat { child, min, max: Some(max), greedy } => {
                for _ in 0..min {
                    self.c(child)?;
                }
                // Each optional tail copy compiles like `e?`, nested so
                // that a later copy is only reachable through the
                // previous one.
                let mut splits = Vec::with_capacity((max - min) as usize);
                for _ in min..max {
                    let split = self.empty_split()?;
                    let j1 = self.insts.len();
                    self.c(child)?;
                    splits.push((split, j1));
                }
                let end = self.insts.len();
                for (split, j1) in splits {
                    if greedy {
                        self.set_split(split, j1, end);
                    } else {
                        self.set_split(split, end, j1);
                    }
                }
            }
            Ast::Look { child, kind } => {
                let width = if kind.is_behind() {
                    match ast::fixed_width(self.ast, child) {
                        Some(w) => w,
                        None => {
                            return Err(Error::Unsupported {
                                offset: 0,
                                feature: "variable-width lookbehind".to_owned(),
                            });
                        }
                    }
                } else {
                    0
                };
                let goto = self.insts.len() + 1;
                let pc = self.insts.len();
                self.push(Inst::Look(InstLook { goto, entry: 0, kind, width }))?;
                self.pending_looks.push((pc, child));
            }
        }
        Ok(())
    }

    fn alternate(&mut self, branches: &[AstId]) -> Result<(), Error> {
        if branches.is_empty() {
            return Ok(());
        }
        if branches.len() == 1 {
            return self.c(branches[0]);
        }
        let split = self.empty_split()?;
        let j1 = self.insts.len();
        self.c(branches[0])?;
        let jmp = self.empty_jump()?;
        let j2 = self.insts.len();
        self.alternate(&branches[1..])?;
        let j3 = self.insts.len();
        self.set_split(split, j1, j2);
        self.set_jump(jmp, j3);
        Ok(())
    }

    /// Short-circuit chains of jumps and reduce splits whose arms agree.
    fn coalesce(&mut self) {
        fn resolve(insts: &[Inst], mut pc: InstIdx) -> InstIdx {
            let mut hops = 0;
            while hops <= insts.len() {
                match insts[pc] {
                    Inst::Jump(ref inst) => {
                        pc = inst.goto;
                        hops += 1;
                    }
                    _ => break,
                }
            }
            pc
        }
        for i in 0..self.insts.len() {
            let rewritten = match self.insts[i] {
                Inst::Match => continue,
                Inst::Save(ref inst) => {
                    Inst::Save(InstSave { goto: resolve(&self.insts, inst.goto), ..*inst })
                }
                Inst::Jump(ref inst) => {
                    Inst::Jump(InstJump { goto: resolve(&self.insts, inst.goto) })
                }
                Inst::Split(ref inst) => {
                    let goto1 = resolve(&self.insts, inst.goto1);
                    let goto2 = resolve(&self.insts, inst.goto2);
                    if goto1 == goto2 {
                        Inst::Jump(InstJump { goto: goto1 })
                    } else {
                        Inst::Split(InstSplit { goto1, goto2 })
                    }
                }
                Inst::EmptyLook(ref inst) => Inst::EmptyLook(InstEmptyLook {
                    goto: resolve(&self.insts, inst.goto),
                    ..*inst
                }),
                Inst::Char(ref inst) => {
                    Inst::Char(InstChar { goto: resolve(&self.insts, inst.goto), ..*inst })
                }
                Inst::Ranges(ref inst) => {
                    Inst::Ranges(InstRanges { goto: resolve(&self.insts, inst.goto), ..*inst })
                }
                Inst::Look(ref inst) => {
                    Inst::Look(InstLook { goto: resolve(&self.insts, inst.goto), ..*inst })
                }
            };
            self.insts[i] = rewritten;
        }
    }

    fn check_size(&self) -> Result<(), Error> {
        if self.insts.len() > self.size_limit {
            Err(Error::ProgramTooLarge { size: self.insts.len(), limit: self.size_limit })
        } else {
            Ok(())
        }
    }

    /// Appends the given instruction to the program.
    #[inline]
    fn push(&mut self, x: Inst) -> Result<(), Error> {
        self.insts.push(x);
        self.check_size()
    }

    fn push_look(&mut self, look: EmptyLook) -> Result<(), Error> {
        let goto = self.insts.len() + 1;
        self.push(Inst::EmptyLook(InstEmptyLook { goto, look }))
    }

    /// Appends a Ranges instruction, interning its class in the pool.
    fn push_class(&mut self, cls: CharClass) -> Result<(), Error> {
        let class = match self.class_ids.get(&cls) {
            Some(&id) => id,
            None => {
                let id = self.classes.len();
                self.classes.push(cls.clone());
                self.class_ids.insert(cls, id);
                id
            }
        };
        let goto = self.insts.len() + 1;
        self.push(Inst::Ranges(InstRanges { goto, class }))
    }

    /// Appends an *empty* `Split` instruction to the program and returns
    /// the index of that instruction. (The index can then be used to
    /// "patch" the actual locations of the split in later.)
    #[inline]
    fn empty_split(&mut self) -> Result<InstIdx, Error> {
        self.push(Inst::Split(InstSplit { goto1: 0, goto2: 0 }))?;
        Ok(self.insts.len() - 1)
    }

    /// Sets the left and right locations of a `Split` instruction at
    /// index `i` to `pc1` and `pc2`, respectively. If the instruction at
    /// index `i` isn't a `Split` instruction, then `panic!` is called.
    #[inline]
    fn set_split(&mut self, i: InstIdx, pc1: InstIdx, pc2: InstIdx) {
        match self.insts[i] {
            Inst::Split(ref mut inst) => {
                inst.goto1 = pc1;
                inst.goto2 = pc2;
            }
            _ => panic!("BUG: Invalid split index."),
        }
    }

    /// Appends an *empty* `Jump` instruction to the program and returns
    /// the index of that instruction.
    #[inline]
    fn empty_jump(&mut self) -> Result<InstIdx, Error> {
        self.push(Inst::Jump(InstJump { goto: 0 }))?;
        Ok(self.insts.len() - 1)
    }

    /// Sets the location of a `Jump` instruction at index `i` to `pc`.
    /// If the instruction at index `i` isn't a `Jump` instruction, then
    /// `panic!` is called.
    #[inline]
    fn set_jump(&mut self, i: InstIdx, pc: InstIdx) {
        match self.insts[i] {
            Inst::Jump(ref mut inst) => inst.goto = pc,
            _ => panic!("BUG: Invalid jump index."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Compiled, Compiler};
    use crate::error::Error;
    use crate::flags::Flags;
    use crate::inst::Inst;
    use crate::parse;

    fn compile(pattern: &str) -> Compiled {
        let parsed = parse::parse(pattern, Flags::empty()).unwrap();
        Compiler::new(&parsed.ast, 100_000).compile(parsed.root).unwrap()
    }

    fn compile_limited(pattern: &str, limit: usize) -> Result<Compiled, Error> {
        let parsed = parse::parse(pattern, Flags::empty()).unwrap();
        Compiler::new(&parsed.ast, limit).compile(parsed.root)
    }

    #[test]
    fn literal_program_shape() {
        let prog = compile("ab");
        // Save(0), Char a, Char b, Save(1), Match.
        assert_eq!(prog.insts.len(), 5);
        assert!(matches!(prog.insts[0], Inst::Save(ref s) if s.slot == 0));
        assert!(matches!(prog.insts[1], Inst::Char(ref c) if c.c == 'a'));
        assert!(matches!(prog.insts[2], Inst::Char(ref c) if c.c == 'b'));
        assert!(matches!(prog.insts[3], Inst::Save(ref s) if s.slot == 1));
        assert!(matches!(prog.insts[4], Inst::Match));
        assert_eq!(prog.main_match, 4);
    }

    #[test]
    fn star_prefers_loop_when_greedy() {
        let prog = compile("a*");
        let split = prog
            .insts
            .iter()
            .find_map(|i| match i {
                Inst::Split(s) => Some(s.clone()),
                _ => None,
            })
            .expect("star must compile to a split");
        assert!(matches!(prog.insts[split.goto1], Inst::Char(_)));

        let prog = compile("a*?");
        let split = prog
            .insts
            .iter()
            .find_map(|i| match i {
                Inst::Split(s) => Some(s.clone()),
                _ => None,
            })
            .unwrap();
        assert!(!matches!(prog.insts[split.goto1], Inst::Char(_)));
    }

    #[test]
    fn classes_are_pooled() {
        let prog = compile(r"\d\d\w\d");
        assert_eq!(prog.classes.len(), 2);
        let ids: Vec<usize> = prog
            .insts
            .iter()
            .filter_map(|i| match i {
                Inst::Ranges(r) => Some(r.class),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![0, 0, 1, 0]);
    }

    #[test]
    fn single_char_class_becomes_char() {
        let prog = compile("[x]");
        assert!(prog.insts.iter().any(|i| matches!(i, Inst::Char(c) if c.c == 'x')));
        assert!(prog.classes.is_empty());
    }

    #[test]
    fn counted_repeat_expands() {
        let two = compile("a{2}").insts.len();
        let four = compile("a{4}").insts.len();
        assert_eq!(four - two, 2);
        // `a{2,4}` is two mandatory chars plus two optional (split) tails.
        let prog = compile("a{2,4}");
        let chars = prog.insts.iter().filter(|i| matches!(i, Inst::Char(_))).count();
        let splits = prog.insts.iter().filter(|i| matches!(i, Inst::Split(_))).count();
        assert_eq!((chars, splits), (4, 2));
    }

    #[test]
    fn size_cap_aborts() {
        assert!(compile_limited("a{500}b{500}", 100_000).is_ok());
        match compile_limited("a{500}b{500}", 600) {
            Err(Error::ProgramTooLarge { limit: 600, .. }) => {}
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn jump_chains_are_short_circuited() {
        // Nested groups produce jump chains at the tails of alternations.
        let prog = compile("(?:(?:a|b)|c)d");
        for (i, inst) in prog.insts.iter().enumerate() {
            if let Inst::Jump(j) = inst {
                assert!(
                    !matches!(prog.insts[j.goto], Inst::Jump(_)),
                    "instruction {} still jumps to a jump",
                    i
                );
            }
        }
    }

    #[test]
    fn lookaround_compiles_out_of_line() {
        let prog = compile("(?=ab)a");
        let look = prog
            .insts
            .iter()
            .find_map(|i| match i {
                Inst::Look(l) => Some(l.clone()),
                _ => None,
            })
            .expect("look instruction");
        assert!(look.entry > prog.main_match);
        assert!(matches!(prog.insts[look.entry], Inst::Char(_)));
    }

    #[test]
    fn variable_width_lookbehind_is_rejected() {
        let parsed = parse::parse("(?<=a+)b", Flags::empty()).unwrap();
        let res = Compiler::new(&parsed.ast, 100_000).compile(parsed.root);
        assert!(matches!(res, Err(Error::Unsupported { .. })));
        // Fixed width is fine, including through alternation.
        compile("(?<=ab|cd)e");
    }
}
