//! 16-bit instruction dispatch.
//!
//! The short encodings have implicit operands: D15/A15 as an extra source
//! or destination, A10 as the base of the SC loads and stores.

use super::addressing::AddrMode;
use super::arith::{Accumulate, BYTES, BYTES_U, HALVES, HALVES_U};
use super::mul::Mac;
use super::{Flow, Translator};
use crate::config::IsaVersion;
use crate::fault::Fault;
use crate::isa::fields::{Operands, Sb, Sbc, Sbr, Sbrn, Sc, Slr, Slro, Sr, Src, Sro, Srr, Srrs, Ssr, Ssro};
use crate::isa::opcodes::{op16, sr_accu, sr_system};
use crate::ir::{imm, BinOp, Cond, MemSize, Reg};

const D15: Reg = Reg::D(15);
const A15: Reg = Reg::A(15);
const A10: Reg = Reg::A(10);

/// Access size of a short load or store and its offset scale.
fn scaled(size: MemSize, off4: u32) -> i32 {
    (off4 * size.bytes()) as i32
}

impl Translator<'_> {
    pub(super) fn insn16(&mut self, op1: u32, ops: Operands) -> Result<Flow, Fault> {
        match ops {
            Operands::Sb(f) => self.sb(op1, f),
            Operands::Sbc(f) => self.sbc(op1, f),
            Operands::Sbr(f) => self.sbr(op1, f),
            Operands::Sbrn(f) => Ok(self.sbrn(op1, f)),
            Operands::Sc(f) => self.sc(op1, f).map(|()| Flow::Next),
            Operands::Slr(f) => self.slr(op1, f).map(|()| Flow::Next),
            Operands::Slro(f) => self.slro(op1, f).map(|()| Flow::Next),
            Operands::Sr(f) => self.sr(op1, f),
            Operands::Src(f) => self.src(op1, f).map(|()| Flow::Next),
            Operands::Sro(f) => self.sro(op1, f).map(|()| Flow::Next),
            Operands::Srr(f) => self.srr(op1, f).map(|()| Flow::Next),
            Operands::Srrs(f) => {
                self.addsc_a16(f);
                Ok(Flow::Next)
            }
            Operands::Ssr(f) => self.ssr(op1, f).map(|()| Flow::Next),
            Operands::Ssro(f) => self.ssro(op1, f).map(|()| Flow::Next),
            _ => Err(self.illegal()),
        }
    }

    fn src(&mut self, op1: u32, f: Src) -> Result<(), Fault> {
        let a = self.d(f.s1d);
        let c = imm(f.const4 as u32);
        match op1 {
            op16::SRC_ADD => self.add_d(a, a, c),
            op16::SRC_ADD_A15 => self.add_d(a, D15, c),
            op16::SRC_ADD_15A => self.add_d(D15, a, c),
            op16::SRC_ADD_A => {
                let aa = self.a(f.s1d);
                self.ir.set(aa, BinOp::Add, aa, c);
            }
            op16::SRC_CADD => self.cond_add(Cond::Ne, D15, a, a, c, false),
            op16::SRC_CADDN => self.cond_add(Cond::Eq, D15, a, a, c, false),
            op16::SRC_CMOV => self.select(Cond::Ne, D15, a, c, a),
            op16::SRC_CMOVN => self.select(Cond::Eq, D15, a, c, a),
            op16::SRC_EQ => self.compare(Accumulate::Set, Cond::Eq, D15, a, c),
            op16::SRC_LT => self.compare(Accumulate::Set, Cond::Lt, D15, a, c),
            op16::SRC_MOV => self.ir.mov(a, c),
            op16::SRC_MOV_A => {
                let aa = self.a(f.s1d);
                self.ir.mov(aa, imm(f.const4 as u32 & 0xf));
            }
            op16::SRC_MOV_E => {
                self.require(IsaVersion::V1_6)?;
                let (lo, hi) = self.e(f.s1d)?;
                self.ir.mov(lo, c);
                self.ir.mov(hi, imm(if f.const4 < 0 { u32::MAX } else { 0 }));
            }
            op16::SRC_SH => self.sh(a, a, c),
            op16::SRC_SHA => self.sha(a, a, c),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn srr(&mut self, op1: u32, f: Srr) -> Result<(), Fault> {
        let a = self.d(f.s1d);
        let b = self.d(f.s2);
        match op1 {
            op16::SRR_ADD => self.add_d(a, a, b),
            op16::SRR_ADD_A15 => self.add_d(a, D15, b),
            op16::SRR_ADD_15A => self.add_d(D15, a, b),
            op16::SRR_ADD_A => {
                let (aa, ab) = (self.a(f.s1d), self.a(f.s2));
                self.ir.set(aa, BinOp::Add, aa, ab);
            }
            op16::SRR_ADDS => self.add_sat(a, a, b, true, false),
            op16::SRR_AND => self.logic(BinOp::And, a, a, b),
            op16::SRR_CMOV => self.select(Cond::Ne, D15, a, b, a),
            op16::SRR_CMOVN => self.select(Cond::Eq, D15, a, b, a),
            op16::SRR_EQ => self.compare(Accumulate::Set, Cond::Eq, D15, a, b),
            op16::SRR_LT => self.compare(Accumulate::Set, Cond::Lt, D15, a, b),
            op16::SRR_MOV => self.ir.mov(a, b),
            op16::SRR_MOV_A => {
                let aa = self.a(f.s1d);
                self.ir.mov(aa, b);
            }
            op16::SRR_MOV_AA => {
                let (aa, ab) = (self.a(f.s1d), self.a(f.s2));
                self.ir.mov(aa, ab);
            }
            op16::SRR_MOV_D => {
                let ab = self.a(f.s2);
                self.ir.mov(a, ab);
            }
            op16::SRR_MUL => self.mac_word32(a, imm(0), a.into(), b.into(), true, Mac { sub: false, sat: false }),
            op16::SRR_OR => self.logic(BinOp::Or, a, a, b),
            op16::SRR_SUB => self.sub_d(a, a, b),
            op16::SRR_SUB_A15B => self.sub_d(a, D15, b),
            op16::SRR_SUB_15AB => self.sub_d(D15, a, b),
            op16::SRR_SUBS => self.add_sat(a, a, b, true, true),
            op16::SRR_XOR => self.logic(BinOp::Xor, a, a, b),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    /// ADDSC.A: `A[c] = A[b] + (D15 << n)`
    fn addsc_a16(&mut self, f: Srrs) {
        let dst = self.a(f.s1d);
        let base = self.a(f.s2);
        let scaled = self.ir.shl(D15, imm(f.n));
        self.ir.set(dst, BinOp::Add, base, scaled);
    }

    fn sc(&mut self, op1: u32, f: Sc) -> Result<(), Fault> {
        let k = f.const8;
        let sp_off = AddrMode::Offset { base: 10, off: (k * 4) as i32 };
        match op1 {
            op16::SC_AND => self.logic(BinOp::And, D15, D15, imm(k)),
            op16::SC_OR => self.logic(BinOp::Or, D15, D15, imm(k)),
            op16::SC_BISR => self.bisr(k)?,
            op16::SC_LD_A => self.ld(A15, MemSize::U32, sp_off)?,
            op16::SC_LD_W => self.ld(D15, MemSize::U32, sp_off)?,
            op16::SC_MOV => self.ir.mov(D15, imm(k)),
            op16::SC_ST_A => self.st(A15, MemSize::U32, sp_off)?,
            op16::SC_ST_W => self.st(D15, MemSize::U32, sp_off)?,
            op16::SC_SUB_A => self.ir.set(A10, BinOp::Sub, A10, imm(k)),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn slr(&mut self, op1: u32, f: Slr) -> Result<(), Fault> {
        let (dst, size, post) = match op1 {
            op16::SLR_LD_A => (self.a(f.d), MemSize::U32, false),
            op16::SLR_LD_A_POSTINC => (self.a(f.d), MemSize::U32, true),
            op16::SLR_LD_BU => (self.d(f.d), MemSize::U8, false),
            op16::SLR_LD_BU_POSTINC => (self.d(f.d), MemSize::U8, true),
            op16::SLR_LD_H => (self.d(f.d), MemSize::S16, false),
            op16::SLR_LD_H_POSTINC => (self.d(f.d), MemSize::S16, true),
            op16::SLR_LD_W => (self.d(f.d), MemSize::U32, false),
            op16::SLR_LD_W_POSTINC => (self.d(f.d), MemSize::U32, true),
            _ => return Err(self.illegal()),
        };
        let mode = if post {
            AddrMode::PostInc { base: f.s2, off: size.bytes() as i32 }
        } else {
            AddrMode::Offset { base: f.s2, off: 0 }
        };
        self.ld(dst, size, mode)
    }

    fn slro(&mut self, op1: u32, f: Slro) -> Result<(), Fault> {
        let (dst, size) = match op1 {
            op16::SLRO_LD_A => (self.a(f.d), MemSize::U32),
            op16::SLRO_LD_BU => (self.d(f.d), MemSize::U8),
            op16::SLRO_LD_H => (self.d(f.d), MemSize::S16),
            op16::SLRO_LD_W => (self.d(f.d), MemSize::U32),
            _ => return Err(self.illegal()),
        };
        self.ld(dst, size, AddrMode::Offset { base: 15, off: scaled(size, f.off4) })
    }

    fn sro(&mut self, op1: u32, f: Sro) -> Result<(), Fault> {
        let at = |size: MemSize| AddrMode::Offset { base: f.s2, off: scaled(size, f.off4) };
        match op1 {
            op16::SRO_LD_A => self.ld(A15, MemSize::U32, at(MemSize::U32)),
            op16::SRO_LD_BU => self.ld(D15, MemSize::U8, at(MemSize::U8)),
            op16::SRO_LD_H => self.ld(D15, MemSize::S16, at(MemSize::S16)),
            op16::SRO_LD_W => self.ld(D15, MemSize::U32, at(MemSize::U32)),
            op16::SRO_ST_A => self.st(A15, MemSize::U32, at(MemSize::U32)),
            op16::SRO_ST_B => self.st(D15, MemSize::U8, at(MemSize::U8)),
            op16::SRO_ST_H => self.st(D15, MemSize::U16, at(MemSize::U16)),
            op16::SRO_ST_W => self.st(D15, MemSize::U32, at(MemSize::U32)),
            _ => Err(self.illegal()),
        }
    }

    fn ssr(&mut self, op1: u32, f: Ssr) -> Result<(), Fault> {
        let (src, size, post) = match op1 {
            op16::SSR_ST_A => (self.a(f.s1), MemSize::U32, false),
            op16::SSR_ST_A_POSTINC => (self.a(f.s1), MemSize::U32, true),
            op16::SSR_ST_B => (self.d(f.s1), MemSize::U8, false),
            op16::SSR_ST_B_POSTINC => (self.d(f.s1), MemSize::U8, true),
            op16::SSR_ST_H => (self.d(f.s1), MemSize::U16, false),
            op16::SSR_ST_H_POSTINC => (self.d(f.s1), MemSize::U16, true),
            op16::SSR_ST_W => (self.d(f.s1), MemSize::U32, false),
            op16::SSR_ST_W_POSTINC => (self.d(f.s1), MemSize::U32, true),
            _ => return Err(self.illegal()),
        };
        let mode = if post {
            AddrMode::PostInc { base: f.s2, off: size.bytes() as i32 }
        } else {
            AddrMode::Offset { base: f.s2, off: 0 }
        };
        self.st(src, size, mode)
    }

    fn ssro(&mut self, op1: u32, f: Ssro) -> Result<(), Fault> {
        let (src, size) = match op1 {
            op16::SSRO_ST_A => (self.a(f.s1), MemSize::U32),
            op16::SSRO_ST_B => (self.d(f.s1), MemSize::U8),
            op16::SSRO_ST_H => (self.d(f.s1), MemSize::U16),
            op16::SSRO_ST_W => (self.d(f.s1), MemSize::U32),
            _ => return Err(self.illegal()),
        };
        self.st(src, size, AddrMode::Offset { base: 15, off: scaled(size, f.off4) })
    }

    fn sr(&mut self, op1: u32, f: Sr) -> Result<Flow, Fault> {
        let a = self.d(f.s1d);
        match op1 {
            op16::SR_JI => {
                let target = self.a(f.s1d);
                return Ok(self.jump_indirect(target, false));
            }
            op16::SR_NOT => self.ir.set(a, BinOp::Nor, a, a),
            op16::SR_SYSTEM => match f.op2 {
                sr_system::NOP | sr_system::DEBUG => {}
                sr_system::RET => return Ok(self.ret()),
                sr_system::RFE => return Ok(self.rfe()),
                sr_system::FRET => {
                    self.require(IsaVersion::V1_6)?;
                    return Ok(self.fret());
                }
                _ => return Err(self.illegal()),
            },
            op16::SR_ACCU => match f.op2 {
                sr_accu::RSUB => self.sub_d(a, imm(0), a),
                sr_accu::SAT_B => self.saturate(a, a, BYTES),
                sr_accu::SAT_BU => self.saturate(a, a, BYTES_U),
                sr_accu::SAT_H => self.saturate(a, a, HALVES),
                sr_accu::SAT_HU => self.saturate(a, a, HALVES_U),
                _ => return Err(self.illegal()),
            },
            _ => return Err(self.illegal()),
        }
        Ok(Flow::Next)
    }

    fn sb(&mut self, op1: u32, f: Sb) -> Result<Flow, Fault> {
        let target = self.rel(f.disp8);
        Ok(match op1 {
            op16::SB_J => self.jump(target),
            op16::SB_CALL => self.call(target),
            op16::SB_JZ => self.branch(Cond::Eq, D15, imm(0), f.disp8),
            op16::SB_JNZ => self.branch(Cond::Ne, D15, imm(0), f.disp8),
            _ => return Err(self.illegal()),
        })
    }

    fn sbc(&mut self, op1: u32, f: Sbc) -> Result<Flow, Fault> {
        let c = imm(f.const4 as u32);
        let disp = f.disp4 as i32;
        Ok(match op1 {
            op16::SBC_JEQ => self.branch(Cond::Eq, D15, c, disp),
            op16::SBC_JNE => self.branch(Cond::Ne, D15, c, disp),
            op16::SBC_JEQ2 => {
                self.require(IsaVersion::V1_6)?;
                self.branch(Cond::Eq, D15, c, disp + 16)
            }
            op16::SBC_JNE2 => {
                self.require(IsaVersion::V1_6)?;
                self.branch(Cond::Ne, D15, c, disp + 16)
            }
            _ => return Err(self.illegal()),
        })
    }

    fn sbrn(&mut self, op1: u32, f: Sbrn) -> Flow {
        let set = op1 == op16::SBRN_JNZ_T;
        self.branch_bit(D15, f.n, set, f.disp4 as i32)
    }

    fn sbr(&mut self, op1: u32, f: Sbr) -> Result<Flow, Fault> {
        let b = self.d(f.s2);
        let disp = f.disp4 as i32;
        Ok(match op1 {
            op16::SBR_JEQ => self.branch(Cond::Eq, b, D15, disp),
            op16::SBR_JNE => self.branch(Cond::Ne, b, D15, disp),
            op16::SBR_JEQ2 => {
                self.require(IsaVersion::V1_6)?;
                self.branch(Cond::Eq, b, D15, disp + 16)
            }
            op16::SBR_JNE2 => {
                self.require(IsaVersion::V1_6)?;
                self.branch(Cond::Ne, b, D15, disp + 16)
            }
            op16::SBR_JGEZ => self.branch(Cond::Ge, b, imm(0), disp),
            op16::SBR_JGTZ => self.branch(Cond::Gt, b, imm(0), disp),
            op16::SBR_JLEZ => self.branch(Cond::Le, b, imm(0), disp),
            op16::SBR_JLTZ => self.branch(Cond::Lt, b, imm(0), disp),
            op16::SBR_JZ => self.branch(Cond::Eq, b, imm(0), disp),
            op16::SBR_JNZ => self.branch(Cond::Ne, b, imm(0), disp),
            op16::SBR_JZ_A => self.branch(Cond::Eq, self.a(f.s2), imm(0), disp),
            op16::SBR_JNZ_A => self.branch(Cond::Ne, self.a(f.s2), imm(0), disp),
            // backward only: the displacement is biased by -16 halfwords
            op16::SBR_LOOP => self.loop_back(self.a(f.s2), self.rel(disp - 16)),
            _ => return Err(self.illegal()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Inst, Terminator};
    use crate::regfile::RegisterFile;

    fn run(word: u32) -> (Result<Flow, Fault>, Vec<Inst>) {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0x100);
        let r = Translator::new(&mut b, &regs, &cfg, 0x100, word).translate();
        (r, b.insts().to_vec())
    }

    #[test]
    fn sbr_loop_goes_backwards() {
        // LOOP A2, disp4 = 0 -> pc - 32
        let (r, _) = run(0x20fc);
        match r {
            Ok(Flow::End(t)) => assert_eq!(t.successors(), vec![0x100 - 32, 0x102]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn sc_load_scales_by_four() {
        // LD.W D15, [A10]8*4
        let (_, insts) = run(0x0858);
        assert!(insts.iter().any(|i| matches!(
            i,
            Inst::Binary { op: BinOp::Add, lhs, rhs, .. } if *lhs == Reg::A(10).into() && *rhs == imm(32)
        )));
    }

    #[test]
    fn sro_halfword_offset_is_scaled() {
        // LD.H D15, [A3]3 reads A3 + 6
        let (_, insts) = run(0x338c);
        assert!(insts.iter().any(|i| matches!(i, Inst::Binary { rhs, .. } if *rhs == imm(6))));
        assert!(insts.iter().any(|i| matches!(i, Inst::Load { size: MemSize::S16, .. })));
    }

    #[test]
    fn ji_masks_low_bit() {
        let (r, insts) = run(0x03dc);
        assert_eq!(r, Ok(Flow::End(Terminator::Dispatch)));
        assert!(matches!(insts[0], Inst::Binary { op: BinOp::And, rhs, .. } if rhs == imm(!1)));
    }
}
