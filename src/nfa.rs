// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The lockstep NFA simulation (a Pike VM).
//!
//! All live threads advance together, one input position at a time. A
//! generation-indexed sparse set keeps at most one thread per program
//! counter, so the total work per position is bounded by the program
//! size and the whole match is O(n*m) no matter what the pattern looks
//! like. Epsilon transitions are followed with an explicit stack rather
//! than recursion so deeply nested programs cannot overflow the call
//! stack.

use crate::error::Error;
use crate::input::{Input, InputAt};
use crate::inst::{Inst, InstIdx, InstLook};
use crate::program::Program;

/// An NFA simulation matching engine.
#[derive(Debug)]
pub struct Nfa<'r, 't> {
    prog: &'r Program,
    input: Input<'t>,
    /// Where threads are seeded. The main flow starts at 0; lookaround
    /// sub-simulations start at their region's entry.
    entry: InstIdx,
    /// When anchored, threads are seeded only at the starting position.
    anchored: bool,
    /// Whether the literal prefix machine may be used to skip ahead.
    use_prefix: bool,
}

/// A cached allocation that can be reused on each execution.
#[derive(Debug)]
pub struct NfaCache {
    clist: Threads,
    nlist: Threads,
    stack: Vec<FollowEpsilon>,
}

impl NfaCache {
    /// Create a new allocation used by the NFA machine to record
    /// execution and captures.
    pub fn new() -> Self {
        NfaCache { clist: Threads::new(), nlist: Threads::new(), stack: vec![] }
    }

    /// Size the thread sets for the given program dimensions.
    pub fn resize(&mut self, num_insts: usize, ncaps: usize) {
        self.clist.resize(num_insts, ncaps);
        self.nlist.resize(num_insts, ncaps);
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.clist, &mut self.nlist);
    }
}

impl Default for NfaCache {
    fn default() -> NfaCache {
        NfaCache::new()
    }
}

/// An explicit stack frame used when following epsilon transitions.
#[derive(Clone, Copy, Debug)]
enum FollowEpsilon {
    /// Follow transitions at the given instruction.
    Pc(InstIdx),
    /// Restore the capture slot to the given position.
    Capture { slot: usize, pos: Option<usize> },
}

impl<'r, 't> Nfa<'r, 't> {
    /// Execute the NFA matching engine.
    ///
    /// If there's a match, `exec` returns `true` and populates the given
    /// captures accordingly.
    pub fn exec(
        prog: &'r Program,
        caps: &mut [Option<usize>],
        input: Input<'t>,
        start: usize,
    ) -> bool {
        match Nfa::run(prog, caps, input, start, None) {
            Ok(matched) => matched,
            Err(_) => unreachable!("cancellation without a step budget"),
        }
    }

    /// Execute with a step budget checked once per input position.
    /// Returns `Error::Cancelled` when the budget runs out.
    pub fn exec_bounded(
        prog: &'r Program,
        caps: &mut [Option<usize>],
        input: Input<'t>,
        start: usize,
        limit: u64,
    ) -> Result<bool, Error> {
        Nfa::run(prog, caps, input, start, Some(limit))
    }

    fn run(
        prog: &'r Program,
        caps: &mut [Option<usize>],
        input: Input<'t>,
        start: usize,
        budget: Option<u64>,
    ) -> Result<bool, Error> {
        let mut cache = prog.cache_nfa();
        cache.resize(prog.insts.len(), prog.num_captures());
        let at = input.at(start);
        Nfa { prog, input, entry: 0, anchored: prog.anchored_begin, use_prefix: true }
            .exec_(&mut cache, caps, at, budget)
    }

    fn exec_(
        &mut self,
        q: &mut NfaCache,
        caps: &mut [Option<usize>],
        mut at: InputAt,
        budget: Option<u64>,
    ) -> Result<bool, Error> {
        let mut matched = false;
        let mut steps: u64 = 0;
        let start_pos = at.pos();
        q.clist.clear();
        q.nlist.clear();
        'LOOP: loop {
            if q.clist.size == 0 {
                // Three ways to bail out when our current set of threads
                // is empty.
                //
                // 1. We have a match, so we're done exploring any
                //    possible alternatives.
                //
                // 2. If the program is anchored and the last thread died
                //    past the starting position, nothing can start a
                //    match any more.
                if matched || (self.anchored && at.pos() > start_pos) {
                    break;
                }
                // 3. If there's a literal prefix for the program, try to
                //    jump ahead quickly. If it can't be found, then we
                //    can bail out early.
                if self.use_prefix && !self.anchored && !self.prog.prefixes.is_empty() {
                    at = match self.input.prefix_at(&self.prog.prefixes, at) {
                        None => break,
                        Some(at) => at,
                    };
                }
            }

            // This simulates a preceding '.*?' for every regex by adding
            // a thread at the current position for the program entry, but
            // only while we don't already have a match.
            if q.clist.size == 0 || (!self.anchored && !matched) {
                let NfaCache { clist, stack, .. } = q;
                self.add(clist, stack, caps, self.entry, at);
            }

            if let Some(limit) = budget {
                steps += 1;
                if steps > limit {
                    return Err(Error::Cancelled { steps });
                }
            }

            let at_next = self.input.at(at.next_pos());
            for i in 0..q.clist.size {
                let pc = q.clist.dense[i].pc;
                let NfaCache { clist, nlist, stack } = q;
                if self.step(nlist, stack, caps, &mut clist.dense[i].caps, pc, at, at_next) {
                    matched = true;
                    if caps.is_empty() {
                        // If we only care whether a match occurs (not its
                        // position), then we can quit right now.
                        break 'LOOP;
                    }
                    // We don't need to check the rest of the threads in
                    // this set because we've matched something
                    // ("leftmost-first"). However, we still need to check
                    // threads in the next set to support things like
                    // greedy matching.
                    break;
                }
            }
            if at.is_end() {
                break;
            }
            at = at_next;
            q.swap();
            q.nlist.clear();
        }
        Ok(matched)
    }

    fn step(
        &self,
        nlist: &mut Threads,
        stack: &mut Vec<FollowEpsilon>,
        caps: &mut [Option<usize>],
        thread_caps: &mut [Option<usize>],
        pc: usize,
        at: InputAt,
        at_next: InputAt,
    ) -> bool {
        match self.prog.insts[pc] {
            Inst::Match => {
                for (slot, val) in caps.iter_mut().zip(thread_caps.iter()) {
                    *slot = *val;
                }
                true
            }
            Inst::Char(ref inst) => {
                if inst.matches(at.char()) {
                    self.add(nlist, stack, thread_caps, inst.goto, at_next);
                }
                false
            }
            Inst::Ranges(ref inst) => {
                if self.prog.classes[inst.class].matches(at.char()) {
                    self.add(nlist, stack, thread_caps, inst.goto, at_next);
                }
                false
            }
            Inst::Save(_) | Inst::Jump(_) | Inst::Split(_) | Inst::EmptyLook(_)
            | Inst::Look(_) => false,
        }
    }

    /// Add a thread for `pc` to `nlist`, following epsilon transitions.
    fn add(
        &self,
        nlist: &mut Threads,
        stack: &mut Vec<FollowEpsilon>,
        thread_caps: &mut [Option<usize>],
        pc: InstIdx,
        at: InputAt,
    ) {
        stack.push(FollowEpsilon::Pc(pc));
        while let Some(frame) = stack.pop() {
            match frame {
                FollowEpsilon::Pc(pc) => {
                    self.add_step(nlist, stack, thread_caps, pc, at);
                }
                FollowEpsilon::Capture { slot, pos } => {
                    thread_caps[slot] = pos;
                }
            }
        }
    }

    fn add_step(
        &self,
        nlist: &mut Threads,
        stack: &mut Vec<FollowEpsilon>,
        thread_caps: &mut [Option<usize>],
        mut pc: InstIdx,
        at: InputAt,
    ) {
        loop {
            // The thread set keeps at most one thread per instruction:
            // the first arrival wins, which is also the highest-priority
            // arrival because preferred branches are followed first.
            if nlist.contains(pc) {
                return;
            }
            let ti = nlist.add(pc);
            match self.prog.insts[pc] {
                Inst::EmptyLook(ref inst) => {
                    let prev = self.input.previous_char(at);
                    let next = self.input.next_char(at);
                    if !inst.matches(prev, next) {
                        return;
                    }
                    pc = inst.goto;
                }
                Inst::Look(ref inst) => {
                    if !look_matches(self.prog, &self.input, inst, at) {
                        return;
                    }
                    pc = inst.goto;
                }
                Inst::Save(ref inst) => {
                    if inst.slot < thread_caps.len() {
                        stack.push(FollowEpsilon::Capture {
                            slot: inst.slot,
                            pos: thread_caps[inst.slot],
                        });
                        thread_caps[inst.slot] = Some(at.pos());
                    }
                    pc = inst.goto;
                }
                Inst::Jump(ref inst) => {
                    pc = inst.goto;
                }
                Inst::Split(ref inst) => {
                    stack.push(FollowEpsilon::Pc(inst.goto2));
                    pc = inst.goto1;
                }
                Inst::Match | Inst::Char(_) | Inst::Ranges(_) => {
                    let t = &mut nlist.dense[ti];
                    for (slot, val) in t.caps.iter_mut().zip(thread_caps.iter()) {
                        *slot = *val;
                    }
                    return;
                }
            }
        }
    }
}

/// Evaluate a lookaround instruction at the given position by running an
/// anchored sub-simulation over the assertion's program region.
pub fn look_matches(prog: &Program, input: &Input, inst: &InstLook, at: InputAt) -> bool {
    let start = if inst.kind.is_behind() {
        match input.walk_back(at.pos(), inst.width) {
            Some(pos) => pos,
            // Fewer characters before the position than the assertion
            // needs: a positive lookbehind fails, a negative one holds.
            None => return inst.kind.is_negative(),
        }
    } else {
        at.pos()
    };
    let mut caps: [Option<usize>; 0] = [];
    let mut cache = prog.cache_nfa();
    cache.resize(prog.insts.len(), prog.num_captures());
    let matched = Nfa {
        prog,
        input: *input,
        entry: inst.entry,
        anchored: true,
        use_prefix: false,
    }
    .exec_(&mut cache, &mut caps, input.at(start), None)
    .unwrap_or(false);
    matched != inst.kind.is_negative()
}

/// An ordered set of NFA threads indexed both densely (for iteration in
/// priority order) and sparsely by program counter (for constant-time
/// dedup), generation-style: clearing is O(1).
#[derive(Debug)]
struct Threads {
    dense: Vec<Thread>,
    sparse: Vec<usize>,
    size: usize,
}

#[derive(Clone, Debug)]
struct Thread {
    pc: usize,
    caps: Vec<Option<usize>>,
}

impl Threads {
    fn new() -> Threads {
        Threads { dense: vec![], sparse: vec![], size: 0 }
    }

    fn resize(&mut self, num_insts: usize, ncaps: usize) {
        let old_slots = self.dense.first().map_or(0, |t| t.caps.len());
        let new_slots = ncaps * 2;
        if num_insts != self.dense.len() || old_slots != new_slots {
            let t = Thread { pc: 0, caps: vec![None; new_slots] };
            *self = Threads {
                dense: vec![t; num_insts],
                sparse: vec![0; num_insts],
                size: 0,
            };
        }
    }

    fn add(&mut self, pc: usize) -> usize {
        let i = self.size;
        self.dense[i].pc = pc;
        self.sparse[pc] = i;
        self.size += 1;
        i
    }

    fn contains(&self, pc: usize) -> bool {
        let s = self.sparse[pc];
        s < self.size && self.dense[s].pc == pc
    }

    fn clear(&mut self) {
        self.size = 0;
    }
}
