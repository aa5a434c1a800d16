//! Core special-function register access, interrupt control, traps and
//! the context-switch instructions.

use super::{Flow, Translator};
use crate::config::{IsaVersion, Privilege};
use crate::fault::Fault;
use crate::helper::{ContextHelper, PswHelper, TrapHelper};
use crate::ir::{imm, tin, BinOp, Reg, Terminator, TrapClass};
use crate::regfile::CsfrSlot;

impl Translator<'_> {
    /// Position of ICR.IE, which moved with 1.6.
    fn ie_bit(&self) -> u32 {
        if self.cfg.has(IsaVersion::V1_6) {
            15
        } else {
            8
        }
    }

    /// MFCR
    pub(super) fn mfcr(&mut self, dst: Reg, offset: u16) {
        match self.regs.csfr_read(offset) {
            CsfrSlot::Psw => {
                let psw = self.psw().psw_read();
                self.ir.mov(dst, psw);
            }
            CsfrSlot::Pc => self.ir.mov(dst, imm(self.pc)),
            CsfrSlot::Reg(r) => self.ir.mov(dst, r),
            CsfrSlot::None => self.ir.mov(dst, imm(0)),
        }
    }

    /// MTCR
    pub(super) fn mtcr(&mut self, src: Reg, offset: u16) -> Result<(), Fault> {
        match self.regs.csfr_write(offset)? {
            CsfrSlot::Psw => self.psw().psw_write(src.into()),
            CsfrSlot::Reg(r) => self.ir.mov(r, src),
            CsfrSlot::Pc | CsfrSlot::None => {}
        }
        Ok(())
    }

    /// RSTV: clears V, SV, AV and SAV.
    pub(super) fn rstv(&mut self) {
        let f = self.regs.flags;
        for r in [f.v, f.sv, f.av, f.sav] {
            self.ir.mov(r, imm(0));
        }
    }

    /// DISABLE, or DISABLE D[a] which first saves the old enable bit.
    pub(super) fn disable(&mut self, save: Option<Reg>) -> Result<(), Fault> {
        self.require_privilege(Privilege::User1)?;
        let ie = self.ie_bit();
        if let Some(d) = save {
            let old = self.ir.extract(Reg::Icr, ie, 1, false);
            self.ir.mov(d, old);
        }
        self.ir.set(Reg::Icr, BinOp::And, Reg::Icr, imm(!(1 << ie)));
        Ok(())
    }

    /// ENABLE
    pub(super) fn enable(&mut self) -> Result<(), Fault> {
        self.require_privilege(Privilege::User1)?;
        let ie = self.ie_bit();
        self.ir.set(Reg::Icr, BinOp::Or, Reg::Icr, imm(1 << ie));
        Ok(())
    }

    /// RESTORE: ICR.IE from bit 0 of `d`.
    pub(super) fn restore(&mut self, d: Reg) -> Result<(), Fault> {
        self.require_privilege(Privilege::User1)?;
        let ie = self.ie_bit();
        self.ir.deposit_into(Reg::Icr, Reg::Icr, d, ie, 1);
        Ok(())
    }

    /// BISR
    pub(super) fn bisr(&mut self, level: u32) -> Result<(), Fault> {
        self.require_privilege(Privilege::Supervisor)?;
        self.context().bisr(level & 0xff);
        Ok(())
    }

    /// SYSCALL: system-call trap carrying the 8-bit immediate as TIN.
    pub(super) fn syscall(&mut self, code: u32) -> Flow {
        let pc = self.pc;
        Flow::End(self.traps().trap(TrapClass::Syscall, code & 0xff, pc))
    }

    /// TRAPV / TRAPSV
    pub(super) fn trap_if(&mut self, sticky: bool) -> Flow {
        let f = self.regs.flags;
        let (flag, code) = if sticky { (f.sv, tin::SOVF) } else { (f.v, tin::OVF) };
        let (pc, next) = (self.pc, self.next_pc);
        Flow::End(self.traps().trap_on_flag(flag, TrapClass::Assert, code, pc, next))
    }

    /// RFE
    pub(super) fn rfe(&mut self) -> Flow {
        self.context().rfe();
        Flow::End(Terminator::Dispatch)
    }

    /// RFM
    pub(super) fn rfm(&mut self) -> Result<Flow, Fault> {
        self.require_privilege(Privilege::Supervisor)?;
        self.context().rfm();
        Ok(Flow::End(Terminator::Dispatch))
    }

    /// SVLCX / RSLCX
    pub(super) fn lower_context(&mut self, save: bool) {
        if save {
            self.context().svlcx();
        } else {
            self.context().rslcx();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Inst};
    use crate::regfile::{csfr, RegisterFile};

    fn with<R>(cfg: TranslateConfig, f: impl FnOnce(&mut Translator<'_>) -> R) -> (R, Vec<Inst>) {
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0x200);
        let r = f(&mut Translator::new(&mut b, &regs, &cfg, 0x200, 0x0000_000d));
        (r, b.insts().to_vec())
    }

    #[test]
    fn unknown_csfr_reads_zero() {
        let (_, insts) = with(TranslateConfig::default(), |t| t.mfcr(Reg::D(3), 0x0042));
        assert_eq!(insts.len(), 1);
        assert_eq!(insts[0].dest(), Some(Reg::D(3).into()));
    }

    #[test]
    fn mtcr_in_user_mode_faults() {
        let cfg = TranslateConfig { privilege: Privilege::User0, ..Default::default() };
        let (r, insts) = with(cfg, |t| t.mtcr(Reg::D(1), csfr::ICR));
        assert_eq!(r, Err(Fault::Privilege { offset: csfr::ICR }));
        assert!(insts.is_empty());
    }

    #[test]
    fn syscall_traps_at_its_own_pc() {
        let (flow, _) = with(TranslateConfig::default(), |t| t.syscall(0x1ff));
        assert_eq!(
            flow,
            Flow::End(Terminator::Trap(crate::ir::TrapInfo { class: TrapClass::Syscall, tin: 0xff, pc: 0x200 }))
        );
    }

    #[test]
    fn enable_sets_the_versioned_ie_bit() {
        let old = TranslateConfig { isa: IsaVersion::V1_3, ..Default::default() };
        let (_, insts) = with(old, |t| t.enable());
        assert!(matches!(insts[0], Inst::Binary { rhs, .. } if rhs == imm(0x100)));
        let (_, insts) = with(TranslateConfig::default(), |t| t.enable());
        assert!(matches!(insts[0], Inst::Binary { rhs, .. } if rhs == imm(0x8000)));
    }
}
