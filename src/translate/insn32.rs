//! 32-bit instruction dispatch, one method per format and opcode group.

use super::addressing::AddrMode;
use super::arith::{Accumulate, BYTES, BYTES_U, HALVES, HALVES_U, WORD, WORD_U};
use super::divide::DvWidth;
use super::mul::{HalfMode, HalfPairing, LaneOps, Mac, QForm};
use super::{Flow, Translator};
use crate::config::IsaVersion;
use crate::fault::Fault;
use crate::helper::ContextIo;
use crate::isa::fields::{
    Abs, Absb, Bit, Bo, Bol, Brc, Brn, Brr, Operands, Rc, Rcpw, Rcr, Rcrr, Rcrw, Rlc, Rr, Rr1, Rr2, Rrpw, Rrr, Rrr1,
    Rrr2, Rrrr, Rrrw, Sys, B,
};
use crate::isa::opcodes::{
    abs_ld_q, abs_ldb, abs_ldmst_swap, abs_ldst_context, abs_ldw, abs_lea_lha, abs_store, abs_storeb_h, abs_storeq,
    absb, bit_acc, bit_insert, bit_logical_t2, bo_load, bo_mode, bo_rmw, bo_store, branch_op2, op32, rc_accumulator,
    rc_logical_shift, rc_mul, rc_serviceroutine, rcpw, rcr_cond_select, rcr_mac, rcrr, rcrw, rr1_mul, rr1_mulq, rr2_mul,
    rr_accumulator, rr_address, rr_divide, rr_idirect, rr_logical_shift, rrpw, rrpw_dextr, rrr1_mac_h, rrr1_mac_q,
    rrr2_mac, rrr_cond_select, rrr_divide, rrrr, rrrw, sys, sys_rstv,
};
use crate::ir::{imm, BinOp, BlockBuilder, CacheOp, Cond, FloatOp, MemSize, Temp, UnOp};

/// Compare-and-accumulate forms; the RC and RR accumulator groups share
/// these secondary opcodes.
fn accumulating_compare(op2: u32) -> Option<(Accumulate, Cond)> {
    use rr_accumulator as op;
    use Accumulate as A;
    Some(match op2 {
        op::EQ => (A::Set, Cond::Eq),
        op::NE => (A::Set, Cond::Ne),
        op::LT => (A::Set, Cond::Lt),
        op::LT_U => (A::Set, Cond::Ltu),
        op::GE => (A::Set, Cond::Ge),
        op::GE_U => (A::Set, Cond::Geu),
        op::AND_EQ => (A::And, Cond::Eq),
        op::AND_NE => (A::And, Cond::Ne),
        op::AND_LT => (A::And, Cond::Lt),
        op::AND_LT_U => (A::And, Cond::Ltu),
        op::AND_GE => (A::And, Cond::Ge),
        op::AND_GE_U => (A::And, Cond::Geu),
        op::OR_EQ => (A::Or, Cond::Eq),
        op::OR_NE => (A::Or, Cond::Ne),
        op::OR_LT => (A::Or, Cond::Lt),
        op::OR_LT_U => (A::Or, Cond::Ltu),
        op::OR_GE => (A::Or, Cond::Ge),
        op::OR_GE_U => (A::Or, Cond::Geu),
        op::XOR_EQ => (A::Xor, Cond::Eq),
        op::XOR_NE => (A::Xor, Cond::Ne),
        op::XOR_LT => (A::Xor, Cond::Lt),
        op::XOR_LT_U => (A::Xor, Cond::Ltu),
        op::XOR_GE => (A::Xor, Cond::Ge),
        op::XOR_GE_U => (A::Xor, Cond::Geu),
        op::SH_EQ => (A::Shift, Cond::Eq),
        op::SH_NE => (A::Shift, Cond::Ne),
        op::SH_LT => (A::Shift, Cond::Lt),
        op::SH_LT_U => (A::Shift, Cond::Ltu),
        op::SH_GE => (A::Shift, Cond::Ge),
        op::SH_GE_U => (A::Shift, Cond::Geu),
        _ => return None,
    })
}

fn lane_abs(ir: &mut BlockBuilder, x: Temp) -> Temp {
    let n = ir.neg(x);
    ir.movcond(Cond::Lt, x, imm(0), n, x)
}

fn lane_absdif(ir: &mut BlockBuilder, x: Temp, y: Temp) -> Temp {
    let d = ir.sub(x, y);
    lane_abs(ir, d)
}

impl Translator<'_> {
    pub(super) fn insn32(&mut self, op1: u32, ops: Operands) -> Result<Flow, Fault> {
        let next = |r: Result<(), Fault>| r.map(|()| Flow::Next);
        match ops {
            Operands::Abs(f) => next(self.abs(op1, f)),
            Operands::Absb(f) => next(self.absb(f)),
            Operands::B(f) => self.b(op1, f),
            Operands::Bit(f) => next(self.bit_op(op1, f)),
            Operands::Bo(f) => next(self.bo(op1, f)),
            Operands::Bol(f) => next(self.bol(op1, f)),
            Operands::Brc(f) => self.brc(op1, f),
            Operands::Brn(f) => self.brn(f),
            Operands::Brr(f) => self.brr(op1, f),
            Operands::Rc(f) => self.rc(op1, f),
            Operands::Rcpw(f) => next(self.rcpw(f)),
            Operands::Rcr(f) => next(self.rcr(op1, f)),
            Operands::Rcrr(f) => next(self.rcrr(f)),
            Operands::Rcrw(f) => next(self.rcrw(f)),
            Operands::Rlc(f) => next(self.rlc(op1, f)),
            Operands::Rr(f) => self.rr(op1, f),
            Operands::Rr1(f) => next(self.rr1(op1, f)),
            Operands::Rr2(f) => next(self.rr2(f)),
            Operands::Rrpw(f) => next(self.rrpw(op1, f)),
            Operands::Rrr(f) => next(self.rrr(op1, f)),
            Operands::Rrr1(f) => next(self.rrr1(op1, f)),
            Operands::Rrr2(f) => next(self.rrr2(op1, f)),
            Operands::Rrrr(f) => next(self.rrrr(f)),
            Operands::Rrrw(f) => next(self.rrrw(f)),
            Operands::Sys(f) => self.sys(op1, f),
            _ => Err(self.illegal()),
        }
    }

    // ---- absolute addressing ----

    fn abs(&mut self, op1: u32, f: Abs) -> Result<(), Fault> {
        let at = AddrMode::Absolute(f.address());
        let (d, a) = (self.d(f.s1d), self.a(f.s1d));
        match (op1, f.op2) {
            (op32::ABS_LDW, abs_ldw::LD_W) => self.ld(d, MemSize::U32, at),
            (op32::ABS_LDW, abs_ldw::LD_A) => self.ld(a, MemSize::U32, at),
            (op32::ABS_LDW, abs_ldw::LD_D) => {
                let pair = self.e(f.s1d)?;
                self.ld_pair(pair, at)
            }
            (op32::ABS_LDW, abs_ldw::LD_DA) => {
                let pair = self.p(f.s1d)?;
                self.ld_pair(pair, at)
            }
            (op32::ABS_LDB, abs_ldb::LD_B) => self.ld(d, MemSize::S8, at),
            (op32::ABS_LDB, abs_ldb::LD_BU) => self.ld(d, MemSize::U8, at),
            (op32::ABS_LDB, abs_ldb::LD_H) => self.ld(d, MemSize::S16, at),
            (op32::ABS_LDB, abs_ldb::LD_HU) => self.ld(d, MemSize::U16, at),
            (op32::ABS_LD_Q, abs_ld_q::LD_Q) => self.ld_q(d, at),
            (op32::ABS_LDMST_SWAP, abs_ldmst_swap::LDMST) => self.ldmst(f.s1d, at),
            (op32::ABS_LDMST_SWAP, abs_ldmst_swap::SWAP_W) => self.swap_w(f.s1d, at),
            (op32::ABS_LDST_CONTEXT, abs_ldst_context::LDLCX) => self.context_transfer(ContextIo::LoadLower, at),
            (op32::ABS_LDST_CONTEXT, abs_ldst_context::LDUCX) => self.context_transfer(ContextIo::LoadUpper, at),
            (op32::ABS_LDST_CONTEXT, abs_ldst_context::STLCX) => self.context_transfer(ContextIo::StoreLower, at),
            (op32::ABS_LDST_CONTEXT, abs_ldst_context::STUCX) => self.context_transfer(ContextIo::StoreUpper, at),
            (op32::ABS_STORE, abs_store::ST_W) => self.st(d, MemSize::U32, at),
            (op32::ABS_STORE, abs_store::ST_A) => self.st(a, MemSize::U32, at),
            (op32::ABS_STORE, abs_store::ST_D) => {
                let pair = self.e(f.s1d)?;
                self.st_pair(pair, at)
            }
            (op32::ABS_STORE, abs_store::ST_DA) => {
                let pair = self.p(f.s1d)?;
                self.st_pair(pair, at)
            }
            (op32::ABS_STOREB_H, abs_storeb_h::ST_B) => self.st(d, MemSize::U8, at),
            (op32::ABS_STOREB_H, abs_storeb_h::ST_H) => self.st(d, MemSize::U16, at),
            (op32::ABS_STOREQ, abs_storeq::ST_Q) => self.st_q(d, at),
            (op32::ABS_LEA_LHA, abs_lea_lha::LEA) => self.lea(a, at),
            (op32::ABS_LEA_LHA, abs_lea_lha::LHA) => {
                self.require(IsaVersion::V1_6_2)?;
                self.lha(a, f.off18);
                Ok(())
            }
            _ => Err(self.illegal()),
        }
    }

    fn absb(&mut self, f: Absb) -> Result<(), Fault> {
        if f.op2 != absb::ST_T {
            return Err(self.illegal());
        }
        self.st_t(f.address(), f.bpos3, f.b);
        Ok(())
    }

    // ---- branches ----

    fn b(&mut self, op1: u32, f: B) -> Result<Flow, Fault> {
        let rel = self.rel(f.sdisp24());
        let abs = f.absolute();
        Ok(match op1 {
            op32::B_J => self.jump(rel),
            op32::B_JA => self.jump(abs),
            op32::B_JL => self.jump_link(rel),
            op32::B_JLA => self.jump_link(abs),
            op32::B_CALL => self.call(rel),
            op32::B_CALLA => self.call(abs),
            op32::B_FCALL => {
                self.require(IsaVersion::V1_6)?;
                self.fcall(rel)
            }
            op32::B_FCALLA => {
                self.require(IsaVersion::V1_6)?;
                self.fcall(abs)
            }
            _ => return Err(self.illegal()),
        })
    }

    fn brc(&mut self, op1: u32, f: Brc) -> Result<Flow, Fault> {
        let a = self.d(f.s1);
        let s = imm(f.sconst4() as u32);
        let u = imm(f.const4);
        let disp = f.disp15;
        Ok(match (op1, f.op2) {
            (op32::BRC_EQ_NEQ, branch_op2::JEQ) => self.branch(Cond::Eq, a, s, disp),
            (op32::BRC_EQ_NEQ, branch_op2::JNE) => self.branch(Cond::Ne, a, s, disp),
            (op32::BRC_GE, branch_op2::JGE) => self.branch(Cond::Ge, a, s, disp),
            (op32::BRC_GE, branch_op2::JGE_U) => self.branch(Cond::Geu, a, u, disp),
            (op32::BRC_JLT, branch_op2::JLT) => self.branch(Cond::Lt, a, s, disp),
            (op32::BRC_JLT, branch_op2::JLT_U) => self.branch(Cond::Ltu, a, u, disp),
            (op32::BRC_JNE, branch_op2::JNED) => self.branch_step(a, s, -1, disp),
            (op32::BRC_JNE, branch_op2::JNEI) => self.branch_step(a, s, 1, disp),
            _ => return Err(self.illegal()),
        })
    }

    fn brr(&mut self, op1: u32, f: Brr) -> Result<Flow, Fault> {
        let (a, b) = (self.d(f.s1), self.d(f.s2));
        let (aa, ab) = (self.a(f.s1), self.a(f.s2));
        let disp = f.disp15;
        Ok(match (op1, f.op2) {
            (op32::BRR_EQ_NEQ, branch_op2::JEQ) => self.branch(Cond::Eq, a, b, disp),
            (op32::BRR_EQ_NEQ, branch_op2::JNE) => self.branch(Cond::Ne, a, b, disp),
            (op32::BRR_GE, branch_op2::JGE) => self.branch(Cond::Ge, a, b, disp),
            (op32::BRR_GE, branch_op2::JGE_U) => self.branch(Cond::Geu, a, b, disp),
            (op32::BRR_JLT, branch_op2::JLT) => self.branch(Cond::Lt, a, b, disp),
            (op32::BRR_JLT, branch_op2::JLT_U) => self.branch(Cond::Ltu, a, b, disp),
            (op32::BRR_JNE, branch_op2::JNED) => self.branch_step(a, b, -1, disp),
            (op32::BRR_JNE, branch_op2::JNEI) => self.branch_step(a, b, 1, disp),
            (op32::BRR_ADDR_EQ_NEQ, branch_op2::JEQ_A) => self.branch(Cond::Eq, aa, ab, disp),
            (op32::BRR_ADDR_EQ_NEQ, branch_op2::JNE_A) => self.branch(Cond::Ne, aa, ab, disp),
            (op32::BRR_JNZ, branch_op2::JZ_A) => self.branch(Cond::Eq, aa, imm(0), disp),
            (op32::BRR_JNZ, branch_op2::JNZ_A) => self.branch(Cond::Ne, aa, imm(0), disp),
            (op32::BRR_LOOP, branch_op2::LOOP) => {
                let target = self.rel(disp);
                self.loop_back(ab, target)
            }
            (op32::BRR_LOOP, branch_op2::LOOPU) => self.jump(self.rel(disp)),
            _ => return Err(self.illegal()),
        })
    }

    fn brn(&mut self, f: Brn) -> Result<Flow, Fault> {
        let a = self.d(f.s1);
        let set = match f.op2 {
            branch_op2::JZ_T => false,
            branch_op2::JNZ_T => true,
            _ => return Err(self.illegal()),
        };
        Ok(self.branch_bit(a, f.n, set, f.disp15))
    }

    // ---- bit operations ----

    fn bit_op(&mut self, op1: u32, f: Bit) -> Result<(), Fault> {
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        if op1 == op32::BIT_INSERT {
            let invert = match f.op2 {
                bit_insert::INS_T => false,
                bit_insert::INSN_T => true,
                _ => return Err(self.illegal()),
            };
            self.insert_bit(dst, a, f.pos1, b, f.pos2, invert);
            return Ok(());
        }
        let acc = match op1 {
            op32::BIT_LOGICAL_T1 | op32::BIT_LOGICAL_T2 => Accumulate::Set,
            op32::BIT_ANDACC => Accumulate::And,
            op32::BIT_ORAND => Accumulate::Or,
            op32::BIT_SH_LOGIC1 | op32::BIT_SH_LOGIC2 => Accumulate::Shift,
            _ => return Err(self.illegal()),
        };
        let op = if matches!(op1, op32::BIT_LOGICAL_T2 | op32::BIT_SH_LOGIC2) {
            match f.op2 {
                bit_logical_t2::NAND => BinOp::Nand,
                bit_logical_t2::ORN => BinOp::OrC,
                bit_logical_t2::XNOR => BinOp::Eqv,
                bit_logical_t2::XOR => BinOp::Xor,
                _ => return Err(self.illegal()),
            }
        } else {
            match f.op2 {
                bit_acc::AND => BinOp::And,
                bit_acc::OR => BinOp::Or,
                bit_acc::NOR => BinOp::Nor,
                bit_acc::ANDN => BinOp::AndC,
                _ => return Err(self.illegal()),
            }
        };
        self.bit_logic(acc, op, dst, a, f.pos1, b, f.pos2);
        Ok(())
    }

    // ---- base + offset ----

    fn bo(&mut self, op1: u32, f: Bo) -> Result<(), Fault> {
        let (base, off) = (f.s2, f.off10);
        let (mode_bits, kind) = (f.op2 >> 4, f.op2 & 0xf);
        let linear = matches!(
            op1,
            op32::BO_ADDRMODE_POST_PRE_BASE | op32::BO_ADDRMODE_LD_POST_PRE_BASE | op32::BO_ADDRMODE_STCTX_POST_PRE_BASE
        );
        let mode = if linear {
            match mode_bits {
                bo_mode::POSTINC => AddrMode::PostInc { base, off },
                bo_mode::PREINC => AddrMode::PreInc { base, off },
                bo_mode::SHORTOFF => AddrMode::Offset { base, off },
                _ => return Err(self.illegal()),
            }
        } else {
            match mode_bits {
                bo_mode::BITREVERSE => AddrMode::BitReverse { base },
                bo_mode::CIRCULAR => AddrMode::Circular { base, off },
                _ => return Err(self.illegal()),
            }
        };
        match op1 {
            op32::BO_ADDRMODE_POST_PRE_BASE | op32::BO_ADDRMODE_BITREVERSE_CIRCULAR => {
                self.bo_store(kind, f.s1d, mode, linear)
            }
            op32::BO_ADDRMODE_LD_POST_PRE_BASE | op32::BO_ADDRMODE_LD_BITREVERSE_CIRCULAR => {
                self.bo_load(kind, f.s1d, mode)
            }
            op32::BO_ADDRMODE_STCTX_POST_PRE_BASE | op32::BO_ADDRMODE_LDMST_BITREVERSE_CIRCULAR => {
                self.bo_rmw(kind, f.s1d, mode)
            }
            _ => Err(self.illegal()),
        }
    }

    fn bo_store(&mut self, kind: u32, r: u8, mode: AddrMode, linear: bool) -> Result<(), Fault> {
        let (d, a) = (self.d(r), self.a(r));
        match kind {
            bo_store::ST_B => self.st(d, MemSize::U8, mode),
            bo_store::ST_H => self.st(d, MemSize::U16, mode),
            bo_store::ST_W => self.st(d, MemSize::U32, mode),
            bo_store::ST_A => self.st(a, MemSize::U32, mode),
            bo_store::ST_Q => self.st_q(d, mode),
            bo_store::ST_D => {
                let pair = self.e(r)?;
                self.st_pair(pair, mode)
            }
            bo_store::ST_DA => {
                let pair = self.p(r)?;
                self.st_pair(pair, mode)
            }
            bo_store::CACHEA_W => self.cache_op(CacheOp::AddrWriteback, mode),
            bo_store::CACHEA_WI => self.cache_op(CacheOp::AddrWritebackInvalidate, mode),
            bo_store::CACHEA_I => self.cache_op(CacheOp::AddrInvalidate, mode),
            bo_store::CACHEI_W if linear => {
                self.require(IsaVersion::V1_3_1)?;
                self.cache_op(CacheOp::IndexWriteback, mode)
            }
            bo_store::CACHEI_WI if linear => {
                self.require(IsaVersion::V1_3_1)?;
                self.cache_op(CacheOp::IndexWritebackInvalidate, mode)
            }
            _ => Err(self.illegal()),
        }
    }

    fn bo_load(&mut self, kind: u32, r: u8, mode: AddrMode) -> Result<(), Fault> {
        let (d, a) = (self.d(r), self.a(r));
        match kind {
            bo_load::LD_B => self.ld(d, MemSize::S8, mode),
            bo_load::LD_BU => self.ld(d, MemSize::U8, mode),
            bo_load::LD_H => self.ld(d, MemSize::S16, mode),
            bo_load::LD_HU => self.ld(d, MemSize::U16, mode),
            bo_load::LD_W => self.ld(d, MemSize::U32, mode),
            bo_load::LD_A => self.ld(a, MemSize::U32, mode),
            bo_load::LD_Q => self.ld_q(d, mode),
            bo_load::LD_D => {
                let pair = self.e(r)?;
                self.ld_pair(pair, mode)
            }
            bo_load::LD_DA => {
                let pair = self.p(r)?;
                self.ld_pair(pair, mode)
            }
            _ => Err(self.illegal()),
        }
    }

    fn bo_rmw(&mut self, kind: u32, r: u8, mode: AddrMode) -> Result<(), Fault> {
        let short = matches!(mode, AddrMode::Offset { .. });
        match kind {
            bo_rmw::SWAP_W => self.swap_w(r, mode),
            bo_rmw::LDMST => self.ldmst(r, mode),
            bo_rmw::SWAPMSK_W => self.swapmsk_w(r, mode),
            bo_rmw::CMPSWAP_W => self.cmpswap_w(r, mode),
            bo_rmw::LDLCX if short => self.context_transfer(ContextIo::LoadLower, mode),
            bo_rmw::LDUCX if short => self.context_transfer(ContextIo::LoadUpper, mode),
            bo_rmw::STLCX if short => self.context_transfer(ContextIo::StoreLower, mode),
            bo_rmw::STUCX if short => self.context_transfer(ContextIo::StoreUpper, mode),
            bo_rmw::LEA if short => {
                let a = self.a(r);
                self.lea(a, mode)
            }
            _ => Err(self.illegal()),
        }
    }

    /// Long-offset forms; the byte, half-word and ST.A encodings came with 1.6.
    fn bol(&mut self, op1: u32, f: Bol) -> Result<(), Fault> {
        let at = AddrMode::Offset { base: f.s2, off: f.off16 };
        let (d, a) = (self.d(f.s1d), self.a(f.s1d));
        match op1 {
            op32::BOL_LD_W_LONGOFF => self.ld(d, MemSize::U32, at),
            op32::BOL_LD_A_LONGOFF => self.ld(a, MemSize::U32, at),
            op32::BOL_ST_W_LONGOFF => self.st(d, MemSize::U32, at),
            op32::BOL_LEA_LONGOFF => self.lea(a, at),
            _ => {
                self.require(IsaVersion::V1_6)?;
                match op1 {
                    op32::BOL_LD_B_LONGOFF => self.ld(d, MemSize::S8, at),
                    op32::BOL_LD_BU_LONGOFF => self.ld(d, MemSize::U8, at),
                    op32::BOL_LD_H_LONGOFF => self.ld(d, MemSize::S16, at),
                    op32::BOL_LD_HU_LONGOFF => self.ld(d, MemSize::U16, at),
                    op32::BOL_ST_B_LONGOFF => self.st(d, MemSize::U8, at),
                    op32::BOL_ST_H_LONGOFF => self.st(d, MemSize::U16, at),
                    op32::BOL_ST_A_LONGOFF => self.st(a, MemSize::U32, at),
                    _ => Err(self.illegal()),
                }
            }
        }
    }

    // ---- register + constant ----

    fn rc(&mut self, op1: u32, f: Rc) -> Result<Flow, Fault> {
        match op1 {
            op32::RC_LOGICAL_SHIFT => self.rc_logical_shift(f)?,
            op32::RC_ACCUMULATOR => self.rc_accumulator(f)?,
            op32::RC_MUL => self.rc_mul(f)?,
            op32::RC_SERVICEROUTINE => match f.op2 {
                rc_serviceroutine::BISR => self.bisr(f.const9)?,
                rc_serviceroutine::SYSCALL => return Ok(self.syscall(f.const9)),
                _ => return Err(self.illegal()),
            },
            _ => return Err(self.illegal()),
        }
        Ok(Flow::Next)
    }

    fn rc_logical_shift(&mut self, f: Rc) -> Result<(), Fault> {
        use rc_logical_shift as op;
        let (dst, a) = (self.d(f.d), self.d(f.s1));
        let k = imm(f.const9);
        match f.op2 {
            op::AND => self.logic(BinOp::And, dst, a, k),
            op::ANDN => self.logic(BinOp::AndC, dst, a, k),
            op::NAND => self.logic(BinOp::Nand, dst, a, k),
            op::NOR => self.logic(BinOp::Nor, dst, a, k),
            op::OR => self.logic(BinOp::Or, dst, a, k),
            op::ORN => self.logic(BinOp::OrC, dst, a, k),
            op::XNOR => self.logic(BinOp::Eqv, dst, a, k),
            op::XOR => self.logic(BinOp::Xor, dst, a, k),
            op::SH => self.sh(dst, a, k),
            op::SHA => self.sha(dst, a, k),
            op::SHAS => self.shas(dst, a, k),
            op::SH_H => self.sh_h(dst, a, k, false),
            op::SHA_H => self.sh_h(dst, a, k, true),
            op::SHUFFLE => {
                self.require(IsaVersion::V1_6_2)?;
                self.shuffle(dst, a, f.const9);
            }
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    /// `const9` is sign-extended except for the unsigned compares.
    fn rc_accumulator(&mut self, f: Rc) -> Result<(), Fault> {
        use rc_accumulator as op;
        let (dst, a) = (self.d(f.d), self.d(f.s1));
        let s = imm(f.sconst9() as u32);
        if let Some((acc, cond)) = accumulating_compare(f.op2) {
            let k = if matches!(cond, Cond::Ltu | Cond::Geu) { imm(f.const9) } else { s };
            self.compare(acc, cond, dst, a, k);
            return Ok(());
        }
        match f.op2 {
            op::ABSDIF => self.abs_d(dst, a, Some(s), false),
            op::ABSDIFS => self.abs_d(dst, a, Some(s), true),
            op::ADD => self.add_d(dst, a, s),
            op::ADDC => self.add_carry(dst, a, s, self.regs.flags.c.into()),
            op::ADDS => self.add_sat(dst, a, s, true, false),
            op::ADDS_U => self.add_sat(dst, a, s, false, false),
            op::ADDX => self.add_carry(dst, a, s, imm(0)),
            op::EQANY_B => self.eq_any(dst, a, s, BYTES),
            op::EQANY_H => self.eq_any(dst, a, s, HALVES),
            op::MAX => self.min_max(dst, a, s, true, true),
            op::MAX_U => self.min_max(dst, a, imm(f.const9), true, false),
            op::MIN => self.min_max(dst, a, s, false, true),
            op::MIN_U => self.min_max(dst, a, imm(f.const9), false, false),
            op::RSUB => self.sub_d(dst, s, a),
            op::RSUBS => self.add_sat(dst, s, a, true, true),
            op::RSUBS_U => self.add_sat(dst, s, a, false, true),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rc_mul(&mut self, f: Rc) -> Result<(), Fault> {
        let (dst, a) = (self.d(f.d), self.d(f.s1));
        let (s, u) = (imm(f.sconst9() as u32), imm(f.const9));
        let plain = Mac { sub: false, sat: false };
        let sat = Mac { sub: false, sat: true };
        match f.op2 {
            rc_mul::MUL_32 => self.mac_word32(dst, imm(0), a.into(), s, true, plain),
            rc_mul::MULS_32 => self.mac_word32(dst, imm(0), a.into(), s, true, sat),
            rc_mul::MULS_U_32 => self.mac_word32(dst, imm(0), a.into(), u, false, sat),
            rc_mul::MUL_64 => self.mac_word64(f.d, None, a.into(), s, true, plain)?,
            rc_mul::MUL_U_64 => self.mac_word64(f.d, None, a.into(), u, false, plain)?,
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rcpw(&mut self, f: Rcpw) -> Result<(), Fault> {
        let (pos, width) = (imm(f.pos), imm(f.width));
        match f.op2 {
            rcpw::IMASK => self.imask(f.d, imm(f.const4), pos, width),
            rcpw::INSERT => {
                let (dst, a) = (self.d(f.d), self.d(f.s1));
                self.insert(dst, a, imm(f.const4), pos, width);
                Ok(())
            }
            _ => Err(self.illegal()),
        }
    }

    fn rcr(&mut self, op1: u32, f: Rcr) -> Result<(), Fault> {
        match op1 {
            op32::RCR_COND_SELECT => {
                let (dst, a, sel) = (self.d(f.d), self.d(f.s1), self.d(f.s3));
                let k = imm(f.sconst9() as u32);
                match f.op2 {
                    rcr_cond_select::CADD => self.cond_add(Cond::Ne, sel, dst, a, k, false),
                    rcr_cond_select::CADDN => self.cond_add(Cond::Eq, sel, dst, a, k, false),
                    rcr_cond_select::SEL => self.select(Cond::Ne, sel, dst, a, k),
                    rcr_cond_select::SELN => self.select(Cond::Eq, sel, dst, a, k),
                    _ => return Err(self.illegal()),
                }
                Ok(())
            }
            op32::RCR_MADD => self.rcr_mac(false, f),
            op32::RCR_MSUB => self.rcr_mac(true, f),
            _ => Err(self.illegal()),
        }
    }

    /// MADD/MSUB with a constant factor: `const9` is zero-extended for the
    /// unsigned forms only.
    fn rcr_mac(&mut self, sub: bool, f: Rcr) -> Result<(), Fault> {
        let (dst, acc, a) = (self.d(f.d), self.d(f.s3), self.d(f.s1));
        let (s, u) = (imm(f.sconst9() as u32), imm(f.const9));
        let mac = |sat| Mac { sub, sat };
        match f.op2 {
            rcr_mac::MAC_32 => self.mac_word32(dst, acc.into(), a.into(), s, true, mac(false)),
            rcr_mac::MACS_32 => self.mac_word32(dst, acc.into(), a.into(), s, true, mac(true)),
            rcr_mac::MACS_U_32 => self.mac_word32(dst, acc.into(), a.into(), u, false, mac(true)),
            rcr_mac::MAC_64 => self.mac_word64(f.d, Some(f.s3), a.into(), s, true, mac(false))?,
            rcr_mac::MACS_64 => self.mac_word64(f.d, Some(f.s3), a.into(), s, true, mac(true))?,
            rcr_mac::MAC_U_64 => self.mac_word64(f.d, Some(f.s3), a.into(), u, false, mac(false))?,
            rcr_mac::MACS_U_64 => self.mac_word64(f.d, Some(f.s3), a.into(), u, false, mac(true))?,
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rcrr(&mut self, f: Rcrr) -> Result<(), Fault> {
        if f.op2 != rcrr::INSERT {
            return Err(self.illegal());
        }
        let (pos, width) = self.pos_width_pair(f.s3)?;
        let (dst, a) = (self.d(f.d), self.d(f.s1));
        self.insert(dst, a, imm(f.const4), pos, width);
        Ok(())
    }

    fn rcrw(&mut self, f: Rcrw) -> Result<(), Fault> {
        let pos = self.d(f.s3).into();
        let width = imm(f.width);
        match f.op2 {
            rcrw::IMASK => self.imask(f.d, imm(f.const4), pos, width),
            rcrw::INSERT => {
                let (dst, a) = (self.d(f.d), self.d(f.s1));
                self.insert(dst, a, imm(f.const4), pos, width);
                Ok(())
            }
            _ => Err(self.illegal()),
        }
    }

    fn rlc(&mut self, op1: u32, f: Rlc) -> Result<(), Fault> {
        let (dst, a) = (self.d(f.d), self.d(f.s1));
        let k = f.const16;
        match op1 {
            op32::RLC_ADDI => self.add_d(dst, a, imm(f.sconst16() as u32)),
            op32::RLC_ADDIH => self.add_d(dst, a, imm(k << 16)),
            op32::RLC_ADDIH_A => {
                let (ac, aa) = (self.a(f.d), self.a(f.s1));
                self.ir.set(ac, BinOp::Add, aa, imm(k << 16));
            }
            op32::RLC_MOV => self.ir.mov(dst, imm(f.sconst16() as u32)),
            op32::RLC_MOV_U => self.ir.mov(dst, imm(k)),
            op32::RLC_MOV_H => self.ir.mov(dst, imm(k << 16)),
            op32::RLC_MOVH_A => {
                let ac = self.a(f.d);
                self.ir.mov(ac, imm(k << 16));
            }
            op32::RLC_MOV_64 => {
                self.require(IsaVersion::V1_6)?;
                let (lo, hi) = self.e(f.d)?;
                let v = f.sconst16();
                self.ir.mov(lo, imm(v as u32));
                self.ir.mov(hi, imm(if v < 0 { u32::MAX } else { 0 }));
            }
            op32::RLC_MFCR => self.mfcr(dst, k as u16),
            op32::RLC_MTCR => self.mtcr(a, k as u16)?,
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    // ---- register + register ----

    fn rr(&mut self, op1: u32, f: Rr) -> Result<Flow, Fault> {
        match op1 {
            op32::RR_IDIRECT => return self.rr_idirect(f),
            op32::RR_LOGICAL_SHIFT => self.rr_logical_shift(f)?,
            op32::RR_ACCUMULATOR => self.rr_accumulator(f)?,
            op32::RR_ADDRESS => self.rr_address(f)?,
            op32::RR_DIVIDE => self.rr_divide(f)?,
            _ => return Err(self.illegal()),
        }
        Ok(Flow::Next)
    }

    fn rr_idirect(&mut self, f: Rr) -> Result<Flow, Fault> {
        let target = self.a(f.s1);
        Ok(match f.op2 {
            rr_idirect::JI => self.jump_indirect(target, false),
            rr_idirect::JLI => self.jump_indirect(target, true),
            rr_idirect::CALLI => self.call_indirect(target),
            rr_idirect::FCALLI => {
                self.require(IsaVersion::V1_6)?;
                self.fcall_indirect(target)
            }
            _ => return Err(self.illegal()),
        })
    }

    fn rr_logical_shift(&mut self, f: Rr) -> Result<(), Fault> {
        use rr_logical_shift as op;
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        match f.op2 {
            op::AND => self.logic(BinOp::And, dst, a, b),
            op::ANDN => self.logic(BinOp::AndC, dst, a, b),
            op::NAND => self.logic(BinOp::Nand, dst, a, b),
            op::NOR => self.logic(BinOp::Nor, dst, a, b),
            op::OR => self.logic(BinOp::Or, dst, a, b),
            op::ORN => self.logic(BinOp::OrC, dst, a, b),
            op::XNOR => self.logic(BinOp::Eqv, dst, a, b),
            op::XOR => self.logic(BinOp::Xor, dst, a, b),
            op::CLO => self.count(UnOp::Clo, dst, a),
            op::CLS => self.count(UnOp::Cls, dst, a),
            op::CLZ => self.count(UnOp::Clz, dst, a),
            op::CLO_H => self.count_h(UnOp::Clo, dst, a),
            op::CLS_H => self.count_h(UnOp::Cls, dst, a),
            op::CLZ_H => self.count_h(UnOp::Clz, dst, a),
            op::SH => self.sh(dst, a, b.into()),
            op::SHA => self.sha(dst, a, b.into()),
            op::SHAS => self.shas(dst, a, b.into()),
            op::SH_H => self.sh_h(dst, a, b.into(), false),
            op::SHA_H => self.sh_h(dst, a, b.into(), true),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rr_accumulator(&mut self, f: Rr) -> Result<(), Fault> {
        use rr_accumulator as op;
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        if let Some((acc, cond)) = accumulating_compare(f.op2) {
            self.compare(acc, cond, dst, a, b);
            return Ok(());
        }
        match f.op2 {
            op::ABS => self.abs_d(dst, b, None, false),
            op::ABSS => self.abs_d(dst, b, None, true),
            op::ABS_B => self.lanes_flagged(dst, b, imm(0), BYTES, false, |ir, x, _| lane_abs(ir, x)),
            op::ABS_H => self.lanes_flagged(dst, b, imm(0), HALVES, false, |ir, x, _| lane_abs(ir, x)),
            op::ABSS_H => self.lanes_flagged(dst, b, imm(0), HALVES, true, |ir, x, _| lane_abs(ir, x)),
            op::ABSDIF => self.abs_d(dst, a, Some(b.into()), false),
            op::ABSDIFS => self.abs_d(dst, a, Some(b.into()), true),
            op::ABSDIF_B => self.lanes_flagged(dst, a, b, BYTES, false, lane_absdif),
            op::ABSDIF_H => self.lanes_flagged(dst, a, b, HALVES, false, lane_absdif),
            op::ABSDIFS_H => self.lanes_flagged(dst, a, b, HALVES, true, lane_absdif),
            op::ADD => self.add_d(dst, a, b),
            op::ADDC => self.add_carry(dst, a, b, self.regs.flags.c.into()),
            op::ADDX => self.add_carry(dst, a, b, imm(0)),
            op::ADDS => self.add_sat(dst, a, b, true, false),
            op::ADDS_U => self.add_sat(dst, a, b, false, false),
            op::ADD_B => self.lanes_flagged(dst, a, b, BYTES, false, |ir, x, y| ir.add(x, y)),
            op::ADD_H => self.lanes_flagged(dst, a, b, HALVES, false, |ir, x, y| ir.add(x, y)),
            op::ADDS_H => self.lanes_flagged(dst, a, b, HALVES, true, |ir, x, y| ir.add(x, y)),
            op::ADDS_HU => self.lanes_flagged(dst, a, b, HALVES_U, true, |ir, x, y| ir.add(x, y)),
            op::SUB => self.sub_d(dst, a, b),
            op::SUBC => self.sub_carry(dst, a, b, true),
            op::SUBX => self.sub_carry(dst, a, b, false),
            op::SUBS => self.add_sat(dst, a, b, true, true),
            op::SUBS_U => self.add_sat(dst, a, b, false, true),
            op::SUB_B => self.lanes_flagged(dst, a, b, BYTES, false, |ir, x, y| ir.sub(x, y)),
            op::SUB_H => self.lanes_flagged(dst, a, b, HALVES, false, |ir, x, y| ir.sub(x, y)),
            op::SUBS_H => self.lanes_flagged(dst, a, b, HALVES, true, |ir, x, y| ir.sub(x, y)),
            op::SUBS_HU => self.lanes_flagged(dst, a, b, HALVES_U, true, |ir, x, y| ir.sub(x, y)),
            op::EQ_B => self.lanes_compare(dst, a, b, BYTES, Cond::Eq),
            op::EQ_H => self.lanes_compare(dst, a, b, HALVES, Cond::Eq),
            op::EQ_W => self.lanes_compare(dst, a, b, WORD, Cond::Eq),
            op::LT_B => self.lanes_compare(dst, a, b, BYTES, Cond::Lt),
            op::LT_BU => self.lanes_compare(dst, a, b, BYTES_U, Cond::Ltu),
            op::LT_H => self.lanes_compare(dst, a, b, HALVES, Cond::Lt),
            op::LT_HU => self.lanes_compare(dst, a, b, HALVES_U, Cond::Ltu),
            op::LT_W => self.lanes_compare(dst, a, b, WORD, Cond::Lt),
            op::LT_WU => self.lanes_compare(dst, a, b, WORD_U, Cond::Ltu),
            op::EQANY_B => self.eq_any(dst, a, b, BYTES),
            op::EQANY_H => self.eq_any(dst, a, b, HALVES),
            op::MAX => self.min_max(dst, a, b, true, true),
            op::MAX_U => self.min_max(dst, a, b, true, false),
            op::MIN => self.min_max(dst, a, b, false, true),
            op::MIN_U => self.min_max(dst, a, b, false, false),
            op::MAX_B => self.lanes_min_max(dst, a, b, BYTES, true),
            op::MAX_BU => self.lanes_min_max(dst, a, b, BYTES_U, true),
            op::MAX_H => self.lanes_min_max(dst, a, b, HALVES, true),
            op::MAX_HU => self.lanes_min_max(dst, a, b, HALVES_U, true),
            op::MIN_B => self.lanes_min_max(dst, a, b, BYTES, false),
            op::MIN_BU => self.lanes_min_max(dst, a, b, BYTES_U, false),
            op::MIN_H => self.lanes_min_max(dst, a, b, HALVES, false),
            op::MIN_HU => self.lanes_min_max(dst, a, b, HALVES_U, false),
            op::MOV => self.ir.mov(dst, b),
            op::MOV_64 => {
                self.require(IsaVersion::V1_6)?;
                let (lo, hi) = self.e(f.d)?;
                let v = self.ir.concat(b, a);
                self.ir.split(lo, hi, v);
            }
            op::MOVS_64 => {
                self.require(IsaVersion::V1_6)?;
                let (lo, hi) = self.e(f.d)?;
                let v = self.ir.widen(b, true);
                self.ir.split(lo, hi, v);
            }
            op::SAT_B => self.saturate(dst, a, BYTES),
            op::SAT_BU => self.saturate(dst, a, BYTES_U),
            op::SAT_H => self.saturate(dst, a, HALVES),
            op::SAT_HU => self.saturate(dst, a, HALVES_U),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rr_address(&mut self, f: Rr) -> Result<(), Fault> {
        use rr_address as op;
        let (ac, aa, ab) = (self.a(f.d), self.a(f.s1), self.a(f.s2));
        let (dc, da, db) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        match f.op2 {
            op::ADD_A => self.ir.set(ac, BinOp::Add, aa, ab),
            op::SUB_A => self.ir.set(ac, BinOp::Sub, aa, ab),
            op::ADDSC_A => {
                let scaled = self.ir.shl(da, imm(f.n));
                self.ir.set(ac, BinOp::Add, ab, scaled);
            }
            op::ADDSC_AT => {
                let scaled = self.ir.sar(da, imm(3));
                let sum = self.ir.add(ab, scaled);
                self.ir.set(ac, BinOp::And, sum, imm(!3));
            }
            op::EQ_A => self.compare(Accumulate::Set, Cond::Eq, dc, aa, ab),
            op::NE_A => self.compare(Accumulate::Set, Cond::Ne, dc, aa, ab),
            op::LT_A => self.compare(Accumulate::Set, Cond::Ltu, dc, aa, ab),
            op::GE_A => self.compare(Accumulate::Set, Cond::Geu, dc, aa, ab),
            op::EQZ => self.compare(Accumulate::Set, Cond::Eq, dc, aa, imm(0)),
            op::NEZ_A => self.compare(Accumulate::Set, Cond::Ne, dc, aa, imm(0)),
            op::MOV_A => self.ir.mov(ac, db),
            op::MOV_AA => self.ir.mov(ac, ab),
            op::MOV_D => self.ir.mov(dc, ab),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rr_divide(&mut self, f: Rr) -> Result<(), Fault> {
        use rr_divide as op;
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        match f.op2 {
            op::BMERGE => self.bmerge(dst, a, b),
            op::BSPLIT => {
                let (lo, hi) = self.e(f.d)?;
                self.bsplit(lo, hi, a);
            }
            op::PARITY => self.parity(dst, a),
            op::POPCNT_W => {
                self.require(IsaVersion::V1_6_2)?;
                self.count(UnOp::Popcnt, dst, a);
            }
            op::DVINIT => self.dvinit(f.d, a, b, DvWidth::Word, true)?,
            op::DVINIT_U => self.dvinit(f.d, a, b, DvWidth::Word, false)?,
            op::DVINIT_B => self.dvinit(f.d, a, b, DvWidth::Byte, true)?,
            op::DVINIT_BU => self.dvinit(f.d, a, b, DvWidth::Byte, false)?,
            op::DVINIT_H => self.dvinit(f.d, a, b, DvWidth::Half, true)?,
            op::DVINIT_HU => self.dvinit(f.d, a, b, DvWidth::Half, false)?,
            op::UNPACK => self.unpack(f.d, a)?,
            op::DIV => {
                self.require(IsaVersion::V1_6)?;
                self.div(f.d, a, b, true)?;
            }
            op::DIV_U => {
                self.require(IsaVersion::V1_6)?;
                self.div(f.d, a, b, false)?;
            }
            op::CRC32 => self.crc32(dst, a, b)?,
            op::CMP_F => self.float_op(FloatOp::Cmp, dst, &[a, b]),
            op::MUL_F => self.float_op(FloatOp::Mul, dst, &[a, b]),
            op::DIV_F => self.float_op(FloatOp::Div, dst, &[a, b]),
            op::FTOI => self.float_op(FloatOp::Ftoi, dst, &[a]),
            op::FTOIZ => self.float_op(FloatOp::Ftoiz, dst, &[a]),
            op::FTOUZ => self.float_op(FloatOp::Ftouz, dst, &[a]),
            op::ITOF => self.float_op(FloatOp::Itof, dst, &[a]),
            op::UTOF => self.float_op(FloatOp::Utof, dst, &[a]),
            op::QSEED_F => self.float_op(FloatOp::Qseed, dst, &[a]),
            op::UPDFL => self.update_fpu_flags(a),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    // ---- multiplies ----

    fn rr1(&mut self, op1: u32, f: Rr1) -> Result<(), Fault> {
        let (a, b) = (self.d(f.s1), self.d(f.s2));
        match op1 {
            op32::RR1_MUL => {
                let mode = match f.op2 & !3 {
                    rr1_mul::MUL_H_32 => HalfMode::Plain,
                    rr1_mul::MULM_H_64 => HalfMode::Merge,
                    rr1_mul::MULR_H_16 => HalfMode::Round,
                    _ => return Err(self.illegal()),
                };
                self.mul_h(mode, f.d, a, b, HalfPairing::from_op2(f.op2), f.n)
            }
            op32::RR1_MULQ => {
                use rr1_mulq as op;
                let (form, wide) = match f.op2 {
                    op::MUL_Q_32 => (QForm::Word, false),
                    op::MUL_Q_64 => (QForm::Word, true),
                    op::MUL_Q_32_L => (QForm::L, false),
                    op::MUL_Q_64_L => (QForm::L, true),
                    op::MUL_Q_32_U => (QForm::U, false),
                    op::MUL_Q_64_U => (QForm::U, true),
                    op::MUL_Q_32_LL => (QForm::LL, false),
                    op::MUL_Q_32_UU => (QForm::UU, false),
                    op::MULR_Q_32_L => {
                        self.mulr_q(f.d, a, b, QForm::LL, f.n);
                        return Ok(());
                    }
                    op::MULR_Q_32_U => {
                        self.mulr_q(f.d, a, b, QForm::UU, f.n);
                        return Ok(());
                    }
                    _ => return Err(self.illegal()),
                };
                self.mul_q(f.d, a, b, form, wide, f.n)
            }
            _ => Err(self.illegal()),
        }
    }

    fn rr2(&mut self, f: Rr2) -> Result<(), Fault> {
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        let plain = Mac { sub: false, sat: false };
        let sat = Mac { sub: false, sat: true };
        match f.op2 {
            rr2_mul::MUL_32 => self.mac_word32(dst, imm(0), a.into(), b.into(), true, plain),
            rr2_mul::MULS_32 => self.mac_word32(dst, imm(0), a.into(), b.into(), true, sat),
            rr2_mul::MULS_U_32 => self.mac_word32(dst, imm(0), a.into(), b.into(), false, sat),
            rr2_mul::MUL_64 => self.mac_word64(f.d, None, a.into(), b.into(), true, plain)?,
            rr2_mul::MUL_U_64 => self.mac_word64(f.d, None, a.into(), b.into(), false, plain)?,
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rrr1(&mut self, op1: u32, f: Rrr1) -> Result<(), Fault> {
        let ops = match op1 {
            op32::RRR1_MADD => LaneOps::MADD,
            op32::RRR1_MSUB_H => LaneOps::MSUB,
            op32::RRR1_MADDSU_H => LaneOps::MADDSU,
            op32::RRR1_MSUBAD_H => LaneOps::MSUBAD,
            op32::RRR1_MADDQ_H => return self.rrr1_mac_q(false, f),
            op32::RRR1_MSUB_Q => return self.rrr1_mac_q(true, f),
            _ => return Err(self.illegal()),
        };
        let mode = match f.op2 & !3 {
            rrr1_mac_h::MAC_H => HalfMode::Plain,
            rrr1_mac_h::MACS_H => HalfMode::Sat,
            rrr1_mac_h::MACM_H => HalfMode::Merge,
            rrr1_mac_h::MACMS_H => HalfMode::MergeSat,
            rrr1_mac_h::MACR_H => HalfMode::Round,
            rrr1_mac_h::MACRS_H => HalfMode::RoundSat,
            _ => return Err(self.illegal()),
        };
        let (a, b) = (self.d(f.s1), self.d(f.s2));
        self.mac_h(mode, ops, f.d, f.s3, a, b, HalfPairing::from_op2(f.op2), f.n)
    }

    fn rrr1_mac_q(&mut self, sub: bool, f: Rrr1) -> Result<(), Fault> {
        use rrr1_mac_q as op;
        let (a, b) = (self.d(f.s1), self.d(f.s2));
        let mac = |sat| Mac { sub, sat };
        let (form, wide, sat) = match f.op2 {
            op::MAC_Q_32 => (QForm::Word, false, false),
            op::MAC_Q_64 => (QForm::Word, true, false),
            op::MAC_Q_32_L => (QForm::L, false, false),
            op::MAC_Q_64_L => (QForm::L, true, false),
            op::MAC_Q_32_U => (QForm::U, false, false),
            op::MAC_Q_64_U => (QForm::U, true, false),
            op::MAC_Q_32_LL => (QForm::LL, false, false),
            op::MAC_Q_64_LL => (QForm::LL, true, false),
            op::MAC_Q_32_UU => (QForm::UU, false, false),
            op::MAC_Q_64_UU => (QForm::UU, true, false),
            op::MACS_Q_32 => (QForm::Word, false, true),
            op::MACS_Q_64 => (QForm::Word, true, true),
            op::MACS_Q_32_L => (QForm::L, false, true),
            op::MACS_Q_64_L => (QForm::L, true, true),
            op::MACS_Q_32_U => (QForm::U, false, true),
            op::MACS_Q_64_U => (QForm::U, true, true),
            op::MACS_Q_32_LL => (QForm::LL, false, true),
            op::MACS_Q_64_LL => (QForm::LL, true, true),
            op::MACS_Q_32_UU => (QForm::UU, false, true),
            op::MACS_Q_64_UU => (QForm::UU, true, true),
            op::MACR_H_64_UL | op::MACRS_H_64_UL => {
                // packed rounding MAC with a 64-bit accumulator
                let (lo, hi) = self.e(f.s3)?;
                let ops = if sub { LaneOps::MSUB } else { LaneOps::MADD };
                let dst = self.d(f.d);
                let sat = f.op2 == op::MACRS_H_64_UL;
                self.mac_h_round(sat, ops, dst, [lo.into(), hi.into()], a, b, HalfPairing::UL, f.n);
                return Ok(());
            }
            op::MACR_Q_32_LL | op::MACRS_Q_32_LL => {
                self.mac_q_round(f.d, f.s3, a, b, QForm::LL, mac(f.op2 == op::MACRS_Q_32_LL), f.n);
                return Ok(());
            }
            op::MACR_Q_32_UU | op::MACRS_Q_32_UU => {
                self.mac_q_round(f.d, f.s3, a, b, QForm::UU, mac(f.op2 == op::MACRS_Q_32_UU), f.n);
                return Ok(());
            }
            _ => return Err(self.illegal()),
        };
        self.mac_q(f.d, f.s3, a, b, form, wide, mac(sat), f.n)
    }

    fn rrr2(&mut self, op1: u32, f: Rrr2) -> Result<(), Fault> {
        let sub = match op1 {
            op32::RRR2_MADD => false,
            op32::RRR2_MSUB => true,
            _ => return Err(self.illegal()),
        };
        let (dst, acc, a, b) = (self.d(f.d), self.d(f.s3), self.d(f.s1), self.d(f.s2));
        let mac = |sat| Mac { sub, sat };
        match f.op2 {
            rrr2_mac::MAC_32 => self.mac_word32(dst, acc.into(), a.into(), b.into(), true, mac(false)),
            rrr2_mac::MACS_32 => self.mac_word32(dst, acc.into(), a.into(), b.into(), true, mac(true)),
            rrr2_mac::MACS_U_32 => self.mac_word32(dst, acc.into(), a.into(), b.into(), false, mac(true)),
            rrr2_mac::MAC_64 => self.mac_word64(f.d, Some(f.s3), a.into(), b.into(), true, mac(false))?,
            rrr2_mac::MACS_64 => self.mac_word64(f.d, Some(f.s3), a.into(), b.into(), true, mac(true))?,
            rrr2_mac::MAC_U_64 => self.mac_word64(f.d, Some(f.s3), a.into(), b.into(), false, mac(false))?,
            rrr2_mac::MACS_U_64 => self.mac_word64(f.d, Some(f.s3), a.into(), b.into(), false, mac(true))?,
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    // ---- three-register forms ----

    fn rrr(&mut self, op1: u32, f: Rrr) -> Result<(), Fault> {
        let (dst, a, b, sel) = (self.d(f.d), self.d(f.s1), self.d(f.s2), self.d(f.s3));
        match op1 {
            op32::RRR_COND_SELECT => match f.op2 {
                rrr_cond_select::CADD => self.cond_add(Cond::Ne, sel, dst, a, b, false),
                rrr_cond_select::CADDN => self.cond_add(Cond::Eq, sel, dst, a, b, false),
                rrr_cond_select::CSUB => self.cond_add(Cond::Ne, sel, dst, a, b, true),
                rrr_cond_select::CSUBN => self.cond_add(Cond::Eq, sel, dst, a, b, true),
                rrr_cond_select::SEL => self.select(Cond::Ne, sel, dst, a, b),
                rrr_cond_select::SELN => self.select(Cond::Eq, sel, dst, a, b),
                _ => return Err(self.illegal()),
            },
            op32::RRR_DIVIDE => match f.op2 {
                rrr_divide::DVADJ => self.dvadj(f.d, f.s3, b)?,
                rrr_divide::DVSTEP => self.dvstep(f.d, f.s3, b, true)?,
                rrr_divide::DVSTEP_U => self.dvstep(f.d, f.s3, b, false)?,
                rrr_divide::IXMAX => self.index_extreme(f.d, f.s3, b, true, true)?,
                rrr_divide::IXMAX_U => self.index_extreme(f.d, f.s3, b, true, false)?,
                rrr_divide::IXMIN => self.index_extreme(f.d, f.s3, b, false, true)?,
                rrr_divide::IXMIN_U => self.index_extreme(f.d, f.s3, b, false, false)?,
                rrr_divide::PACK => self.pack(f.d, f.s3, a)?,
                rrr_divide::ADD_F => self.float_op(FloatOp::Add, dst, &[a, sel]),
                rrr_divide::SUB_F => self.float_op(FloatOp::Sub, dst, &[a, sel]),
                rrr_divide::MADD_F => self.float_op(FloatOp::Madd, dst, &[a, b, sel]),
                rrr_divide::MSUB_F => self.float_op(FloatOp::Msub, dst, &[a, b, sel]),
                _ => return Err(self.illegal()),
            },
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    // ---- bit fields ----

    fn rrpw(&mut self, op1: u32, f: Rrpw) -> Result<(), Fault> {
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        let (pos, width) = (imm(f.pos), imm(f.width));
        match (op1, f.op2) {
            (op32::RRPW_EXTRACT_INSERT, rrpw::EXTR) => self.extr(dst, a, pos, width, true),
            (op32::RRPW_EXTRACT_INSERT, rrpw::EXTR_U) => self.extr(dst, a, pos, width, false),
            (op32::RRPW_EXTRACT_INSERT, rrpw::IMASK) => self.imask(f.d, b.into(), pos, width)?,
            (op32::RRPW_EXTRACT_INSERT, rrpw::INSERT) => self.insert(dst, a, b.into(), pos, width),
            (op32::RRPW_DEXTR, rrpw_dextr::DEXTR) => self.dextr(dst, a, b, pos),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rrrr(&mut self, f: Rrrr) -> Result<(), Fault> {
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        match f.op2 {
            rrrr::DEXTR => {
                let pos = self.d(f.s3);
                self.dextr(dst, a, b, pos.into());
            }
            rrrr::EXTR | rrrr::EXTR_U => {
                let (pos, width) = self.pos_width_pair(f.s3)?;
                self.extr(dst, a, pos, width, f.op2 == rrrr::EXTR);
            }
            rrrr::INSERT => {
                let (pos, width) = self.pos_width_pair(f.s3)?;
                self.insert(dst, a, b.into(), pos, width);
            }
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    fn rrrw(&mut self, f: Rrrw) -> Result<(), Fault> {
        let (dst, a, b) = (self.d(f.d), self.d(f.s1), self.d(f.s2));
        let pos = self.d(f.s3).into();
        let width = imm(f.width);
        match f.op2 {
            rrrw::EXTR => self.extr(dst, a, pos, width, true),
            rrrw::EXTR_U => self.extr(dst, a, pos, width, false),
            rrrw::IMASK => self.imask(f.d, b.into(), pos, width)?,
            rrrw::INSERT => self.insert(dst, a, b.into(), pos, width),
            _ => return Err(self.illegal()),
        }
        Ok(())
    }

    // ---- system ----

    fn sys(&mut self, op1: u32, f: Sys) -> Result<Flow, Fault> {
        if op1 == op32::SYS_RSTV {
            if f.op2 != sys_rstv::RSTV {
                return Err(self.illegal());
            }
            self.rstv();
            return Ok(Flow::Next);
        }
        let d = self.d(f.s1d);
        match f.op2 {
            sys::NOP | sys::DEBUG | sys::DSYNC | sys::ISYNC => {}
            sys::DISABLE => self.disable(None)?,
            sys::DISABLE_D => {
                self.require(IsaVersion::V1_6)?;
                self.disable(Some(d))?;
            }
            sys::ENABLE => self.enable()?,
            sys::RESTORE => {
                self.require(IsaVersion::V1_6)?;
                self.restore(d)?;
            }
            sys::SVLCX => self.lower_context(true),
            sys::RSLCX => self.lower_context(false),
            sys::RET => return Ok(self.ret()),
            sys::RFE => return Ok(self.rfe()),
            sys::RFM => return self.rfm(),
            sys::TRAPV => return Ok(self.trap_if(false)),
            sys::TRAPSV => return Ok(self.trap_if(true)),
            sys::FRET => {
                self.require(IsaVersion::V1_6)?;
                return Ok(self.fret());
            }
            _ => return Err(self.illegal()),
        }
        Ok(Flow::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{Dest, Helper, Inst, Reg, Terminator, Value};
    use crate::regfile::RegisterFile;

    fn run_with(cfg: &TranslateConfig, word: u32) -> (Result<Flow, Fault>, Vec<Inst>) {
        let regs = RegisterFile::new(cfg);
        let mut b = BlockBuilder::new(0x8000_0000);
        let r = Translator::new(&mut b, &regs, cfg, 0x8000_0000, word).translate();
        (r, b.insts().to_vec())
    }

    fn run(word: u32) -> (Result<Flow, Fault>, Vec<Inst>) {
        run_with(&TranslateConfig::default(), word)
    }

    #[test]
    fn rr_add_writes_destination_last() {
        // ADD D3, D1, D2
        let (r, insts) = run(0x3000_210b);
        assert_eq!(r, Ok(Flow::Next));
        assert_eq!(insts.last().and_then(Inst::dest), Some(Dest::from(Reg::D(3))));
    }

    #[test]
    fn mov_64_needs_1_6() {
        let word = (2 << 28) | (5 << 12) | 0xfb;
        let cfg = TranslateConfig { isa: IsaVersion::V1_3_1, ..Default::default() };
        assert_eq!(run_with(&cfg, word).0, Err(Fault::Decode { word }));
        assert_eq!(run(word).0, Ok(Flow::Next));
    }

    #[test]
    fn crc32_decodes_from_1_6_1() {
        // CRC32 D2, D0, D1
        let word = (2 << 28) | (0x03 << 20) | (1 << 12) | 0x4b;
        let cfg = TranslateConfig { isa: IsaVersion::V1_6, ..Default::default() };
        assert_eq!(run_with(&cfg, word).0, Err(Fault::Decode { word }));
        let (r, insts) = run(word);
        assert_eq!(r, Ok(Flow::Next));
        assert!(matches!(&insts[0], Inst::Call { helper: Helper::Crc32, args, .. }
            if args == &vec![Value::from(Reg::D(0)), Value::from(Reg::D(1))]));
    }

    #[test]
    fn float_add_reads_s1_and_s3() {
        // ADD.F D4, D1, D3
        let word = (4 << 28) | (3 << 24) | (0x02 << 20) | (2 << 12) | (1 << 8) | 0x6b;
        let (r, insts) = run(word);
        assert_eq!(r, Ok(Flow::Next));
        assert!(matches!(&insts[0], Inst::Call { helper: Helper::Float(FloatOp::Add), args, .. }
            if args == &vec![Value::from(Reg::D(1)), Value::from(Reg::D(3))]));
        assert_eq!(insts.last().and_then(Inst::dest), Some(Dest::from(Reg::D(4))));
    }

    #[test]
    fn bo_post_increment_updates_base_after_load() {
        // LD.W D4, [A2+]8
        let word = (0x04 << 22) | (8 << 16) | (2 << 12) | (4 << 8) | 0x09;
        let (r, insts) = run(word);
        assert_eq!(r, Ok(Flow::Next));
        let load = insts.iter().position(|i| matches!(i, Inst::Load { size: MemSize::U32, .. }));
        let update = insts.iter().rposition(|i| i.dest() == Some(Reg::A(2).into()));
        assert!(load.is_some() && update.is_some());
        assert!(load < update);
    }

    #[test]
    fn bo_context_transfer_is_short_offset_only() {
        // LDLCX in post-increment mode does not exist
        let word = (0x04 << 22) | (2 << 12) | 0x49;
        assert_eq!(run(word).0, Err(Fault::Decode { word }));
    }

    #[test]
    fn jned_compares_before_stepping() {
        // JNED D1, #2, +4
        let word = (1 << 31) | (4 << 16) | (2 << 12) | (1 << 8) | 0x9f;
        let (r, insts) = run(word);
        match r {
            Ok(Flow::End(t)) => assert_eq!(t.successors(), vec![0x8000_0008, 0x8000_0004]),
            other => panic!("unexpected {other:?}"),
        }
        assert!(insts
            .iter()
            .any(|i| matches!(i, Inst::Binary { op: BinOp::Add, rhs, .. } if *rhs == imm(u32::MAX))));
    }

    #[test]
    fn rstv_clears_four_flags() {
        let (r, insts) = run(0x0000_002f);
        assert_eq!(r, Ok(Flow::Next));
        assert_eq!(insts.len(), 4);
    }

    #[test]
    fn syscall_ends_block_with_trap() {
        // SYSCALL #0x12
        let word = (0x04 << 21) | (0x12 << 12) | 0xad;
        let (r, _) = run(word);
        assert!(matches!(r, Ok(Flow::End(Terminator::Trap(info))) if info.tin == 0x12));
    }

    #[test]
    fn shuffle_is_gated() {
        let word = (0x07 << 21) | 0x8f;
        let cfg = TranslateConfig { isa: IsaVersion::V1_6_1, ..Default::default() };
        assert_eq!(run_with(&cfg, word).0, Err(Fault::Decode { word }));
    }

    #[test]
    fn odd_pair_in_mul_64_is_alignment_fault() {
        // MUL E3, D1, D2
        let word = (3 << 28) | (0x6a << 16) | (2 << 12) | (1 << 8) | 0x73;
        assert_eq!(run(word).0, Err(Fault::Alignment { reg: 3 }));
    }
}
