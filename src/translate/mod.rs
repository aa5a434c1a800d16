//! Per-instruction semantic translation.
//!
//! [`Translator::translate`] classifies one instruction word, decodes its
//! operand fields and appends the instruction's IR to the open block. The
//! emitters are split by instruction category; all of them are methods on
//! [`Translator`] so they share the register model and the block.

mod addressing;
mod arith;
mod branch;
mod divide;
mod field;
mod flags;
mod float;
mod insn16;
mod insn32;
mod load_store;
mod logic;
mod mul;
mod system;

pub use addressing::AddrMode;
pub use mul::HalfPairing;

use tracing::trace;

use crate::config::{IsaVersion, Privilege, TranslateConfig};
use crate::fault::Fault;
use crate::helper::{
    AddressHelper, CacheHelper, ChecksumHelper, ContextHelper, DivideStepHelper, FloatHelper, PswHelper, TrapHelper,
};
use crate::isa::fields;
use crate::isa::format::{classify, Length};
use crate::ir::{BlockBuilder, Reg, Terminator};
use crate::regfile::RegisterFile;

/// What the driver does after an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep translating at `next_pc`.
    Next,
    /// Close the block with this terminator.
    End(Terminator),
}

pub struct Translator<'a> {
    pub ir: &'a mut BlockBuilder,
    pub regs: &'a RegisterFile,
    pub cfg: &'a TranslateConfig,
    /// Address of the instruction being translated.
    pub pc: u32,
    /// Address of the following instruction.
    pub next_pc: u32,
    pub word: u32,
}

impl<'a> Translator<'a> {
    pub fn new(
        ir: &'a mut BlockBuilder,
        regs: &'a RegisterFile,
        cfg: &'a TranslateConfig,
        pc: u32,
        word: u32,
    ) -> Self {
        let len = Length::of(word as u16);
        Self {
            ir,
            regs,
            cfg,
            pc,
            next_pc: pc.wrapping_add(len.bytes()),
            word,
        }
    }

    /// Appends the IR of one instruction. On `Err` the caller discards
    /// whatever this instruction already appended.
    pub fn translate(&mut self) -> Result<Flow, Fault> {
        let class = classify(self.word)?;
        trace!(pc = self.pc, format = ?class.format, op1 = class.op1, "decoded");
        let ops = fields::decode(self.word, class.format);
        match class.len {
            Length::Short => self.insn16(class.op1, ops),
            Length::Long => self.insn32(class.op1, ops),
        }
    }

    pub(crate) fn illegal(&self) -> Fault {
        Fault::Decode { word: self.word }
    }

    /// Encodings introduced with a later core revision decode as illegal on
    /// older ones.
    pub(crate) fn require(&self, isa: IsaVersion) -> Result<(), Fault> {
        if self.cfg.has(isa) {
            Ok(())
        } else {
            Err(self.illegal())
        }
    }

    /// Instructions restricted to `level` or above trap with a privilege
    /// fault otherwise.
    pub(crate) fn require_privilege(&self, level: Privilege) -> Result<(), Fault> {
        if self.regs.privilege() >= level {
            Ok(())
        } else {
            Err(Fault::PrivilegedInsn { word: self.word })
        }
    }

    #[inline]
    pub(crate) fn d(&self, n: u8) -> Reg {
        self.regs.d(n)
    }

    #[inline]
    pub(crate) fn a(&self, n: u8) -> Reg {
        self.regs.a(n)
    }

    /// `E[n]` as (low, high).
    #[inline]
    pub(crate) fn e(&self, n: u8) -> Result<(Reg, Reg), Fault> {
        self.regs.d_pair(n)
    }

    /// `P[n]` as (low, high).
    #[inline]
    pub(crate) fn p(&self, n: u8) -> Result<(Reg, Reg), Fault> {
        self.regs.a_pair(n)
    }

    /// Target of a PC-relative displacement counted in halfwords.
    #[inline]
    pub(crate) fn rel(&self, disp: i32) -> u32 {
        self.pc.wrapping_add((disp as u32).wrapping_mul(2))
    }

    // Out-of-line helpers are reached through these views of the block, one
    // capability each; emitters never call helpers on `ir` directly.

    pub(crate) fn psw(&mut self) -> &mut impl PswHelper {
        &mut *self.ir
    }

    pub(crate) fn divider(&mut self) -> &mut impl DivideStepHelper {
        &mut *self.ir
    }

    pub(crate) fn address_unit(&mut self) -> &mut impl AddressHelper {
        &mut *self.ir
    }

    pub(crate) fn context(&mut self) -> &mut impl ContextHelper {
        &mut *self.ir
    }

    pub(crate) fn cache_unit(&mut self) -> &mut impl CacheHelper {
        &mut *self.ir
    }

    pub(crate) fn fpu(&mut self) -> &mut impl FloatHelper {
        &mut *self.ir
    }

    pub(crate) fn checksum(&mut self) -> &mut impl ChecksumHelper {
        &mut *self.ir
    }

    pub(crate) fn traps(&mut self) -> &mut impl TrapHelper {
        &mut *self.ir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{imm, Helper, Inst, UnOp};
    use crate::ir::Ty;

    fn run(cfg: &TranslateConfig, word: u32) -> (Result<Flow, Fault>, Vec<Inst>) {
        let regs = RegisterFile::new(cfg);
        let mut b = BlockBuilder::new(0x100);
        let r = Translator::new(&mut b, &regs, cfg, 0x100, word).translate();
        (r, b.insts().to_vec())
    }

    #[test]
    fn mov_const4_is_one_move() {
        // MOV D1, #5
        let (r, insts) = run(&TranslateConfig::default(), 0x5182);
        assert_eq!(r, Ok(Flow::Next));
        assert_eq!(
            insts,
            vec![Inst::Unary { op: UnOp::Mov, ty: Ty::I32, dst: Reg::D(1).into(), src: imm(5) }]
        );
    }

    #[test]
    fn next_pc_follows_length() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        assert_eq!(Translator::new(&mut b, &regs, &cfg, 0x10, 0x5182).next_pc, 0x12);
        assert_eq!(Translator::new(&mut b, &regs, &cfg, 0x10, 0x0000_0001).next_pc, 0x14);
    }

    #[test]
    fn gated_encoding_is_illegal_on_old_core() {
        // FRET (16-bit) needs 1.6
        let cfg = TranslateConfig { isa: IsaVersion::V1_3, privilege: Privilege::User0, ..Default::default() };
        let (r, _) = run(&cfg, 0x7000);
        assert_eq!(r, Err(Fault::Decode { word: 0x7000 }));
    }

    #[test]
    fn helper_views_emit_one_call_each() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        t.divider().divide(true, imm(7), imm(2));
        t.checksum().crc32(imm(0), imm(0));
        t.psw().psw_read();
        let helpers: Vec<Helper> = b
            .insts()
            .iter()
            .filter_map(|i| match i {
                Inst::Call { helper, .. } => Some(*helper),
                _ => None,
            })
            .collect();
        assert_eq!(helpers, vec![Helper::Divide, Helper::Crc32, Helper::PswRead]);
        assert_eq!(b.insts().len(), 3);
    }
}
