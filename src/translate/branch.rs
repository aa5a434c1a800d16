//! Jumps, calls, returns and loops. Every emitter here closes the block.

use super::{Flow, Translator};
use crate::helper::ContextHelper;
use crate::ir::{imm, BinOp, Cond, MemSize, Reg, Terminator, Value};

/// Return-address register.
const RA: Reg = Reg::A(11);
/// Stack pointer.
const SP: Reg = Reg::A(10);

impl Translator<'_> {
    pub(super) fn jump(&self, target: u32) -> Flow {
        Flow::End(Terminator::Goto(target))
    }

    /// JL / JLA
    pub(super) fn jump_link(&mut self, target: u32) -> Flow {
        self.ir.mov(RA, imm(self.next_pc));
        self.jump(target)
    }

    /// Writes PC and leaves through `Dispatch`.
    fn dispatch_to(&mut self, target: impl Into<Value>) -> Flow {
        self.ir.mov(Reg::Pc, target);
        Flow::End(Terminator::Dispatch)
    }

    /// JI / JLI
    pub(super) fn jump_indirect(&mut self, a: Reg, link: bool) -> Flow {
        let target = self.ir.and(a, imm(!1));
        if link {
            self.ir.mov(RA, imm(self.next_pc));
        }
        self.dispatch_to(target)
    }

    /// CALL / CALLA
    pub(super) fn call(&mut self, target: u32) -> Flow {
        let ret = self.next_pc;
        self.context().call_save(ret);
        self.jump(target)
    }

    /// CALLI
    pub(super) fn call_indirect(&mut self, a: Reg) -> Flow {
        let target = self.ir.and(a, imm(!1));
        let ret = self.next_pc;
        self.context().call_save(ret);
        self.dispatch_to(target)
    }

    /// Pushes A11 and links to the next instruction.
    fn fcall_save(&mut self) {
        let sp = self.ir.sub(SP, imm(4));
        self.ir.store(sp, RA, MemSize::U32);
        self.ir.mov(RA, imm(self.next_pc));
        self.ir.mov(SP, sp);
    }

    /// FCALL / FCALLA
    pub(super) fn fcall(&mut self, target: u32) -> Flow {
        self.fcall_save();
        self.jump(target)
    }

    /// FCALLI
    pub(super) fn fcall_indirect(&mut self, a: Reg) -> Flow {
        let target = self.ir.and(a, imm(!1));
        self.fcall_save();
        self.dispatch_to(target)
    }

    /// FRET: return through A11 and pop the saved A11.
    pub(super) fn fret(&mut self) -> Flow {
        let target = self.ir.and(RA, imm(!1));
        self.ir.load_into(RA, SP, MemSize::U32);
        self.ir.set(SP, BinOp::Add, SP, imm(4));
        self.dispatch_to(target)
    }

    /// RET: the helper restores the upper context and writes PC.
    pub(super) fn ret(&mut self) -> Flow {
        self.context().ret();
        Flow::End(Terminator::Dispatch)
    }

    /// Two-way branch on `lhs cond rhs`, taken to `target`.
    pub(super) fn branch_to(&self, cond: Cond, lhs: impl Into<Value>, rhs: impl Into<Value>, target: u32) -> Flow {
        Flow::End(Terminator::branch(cond, lhs.into(), rhs.into(), target, self.next_pc))
    }

    /// PC-relative two-way branch.
    pub(super) fn branch(&self, cond: Cond, lhs: impl Into<Value>, rhs: impl Into<Value>, disp: i32) -> Flow {
        self.branch_to(cond, lhs, rhs, self.rel(disp))
    }

    /// JZ.T / JNZ.T
    pub(super) fn branch_bit(&mut self, src: Reg, n: u32, set: bool, disp: i32) -> Flow {
        let bit = self.ir.extract(src, n, 1, false);
        let cond = if set { Cond::Ne } else { Cond::Eq };
        self.branch(cond, bit, imm(0), disp)
    }

    /// JNED / JNEI: compares the old value, then steps `d` unconditionally.
    pub(super) fn branch_step(&mut self, d: Reg, rhs: impl Into<Value>, step: i32, disp: i32) -> Flow {
        let old = self.ir.copy(d);
        let rhs = self.ir.copy(rhs);
        self.ir.set(d, BinOp::Add, d, imm(step as u32));
        self.branch(Cond::Ne, old, rhs, disp)
    }

    /// LOOP: decrement `a`, taken unless it wrapped to all ones.
    pub(super) fn loop_back(&mut self, a: Reg, target: u32) -> Flow {
        self.ir.set(a, BinOp::Sub, a, imm(1));
        self.branch_to(Cond::Ne, a, imm(u32::MAX), target)
    }
}
