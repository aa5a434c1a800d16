//! Guest register model seen by the emitters.

use crate::config::{IsaVersion, Privilege, TranslateConfig};
use crate::fault::Fault;
use crate::ir::{Flag, Reg};

/// The flag pseudo-registers every flag-affecting emitter writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagState {
    pub c: Reg,
    pub v: Reg,
    pub sv: Reg,
    pub av: Reg,
    pub sav: Reg,
}

impl Default for FlagState {
    fn default() -> Self {
        Self {
            c: Reg::Psw(Flag::C),
            v: Reg::Psw(Flag::V),
            sv: Reg::Psw(Flag::SV),
            av: Reg::Psw(Flag::AV),
            sav: Reg::Psw(Flag::SAV),
        }
    }
}

/// CSFR access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    Unrestricted,
    /// Writable only with ENDINIT cleared. There is no watchdog model, so
    /// these are treated as [`Access::Unrestricted`].
    Endinit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Csfr {
    pub offset: u16,
    pub name: &'static str,
    pub access: Access,
    pub since: IsaVersion,
}

pub mod csfr {
    pub const PCXI: u16 = 0xfe00;
    pub const PSW: u16 = 0xfe04;
    pub const PC: u16 = 0xfe08;
    pub const SYSCON: u16 = 0xfe14;
    pub const CPU_ID: u16 = 0xfe18;
    pub const CORE_ID: u16 = 0xfe1c;
    pub const BIV: u16 = 0xfe20;
    pub const BTV: u16 = 0xfe24;
    pub const ISP: u16 = 0xfe28;
    pub const ICR: u16 = 0xfe2c;
    pub const FCX: u16 = 0xfe38;
    pub const LCX: u16 = 0xfe3c;
    pub const COMPAT: u16 = 0x9400;
}

const CSFRS: &[Csfr] = &[
    Csfr { offset: csfr::PCXI, name: "PCXI", access: Access::Unrestricted, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::PSW, name: "PSW", access: Access::Unrestricted, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::PC, name: "PC", access: Access::ReadOnly, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::SYSCON, name: "SYSCON", access: Access::Unrestricted, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::CPU_ID, name: "CPU_ID", access: Access::ReadOnly, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::CORE_ID, name: "CORE_ID", access: Access::ReadOnly, since: IsaVersion::V1_6_1 },
    Csfr { offset: csfr::BIV, name: "BIV", access: Access::Endinit, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::BTV, name: "BTV", access: Access::Endinit, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::ISP, name: "ISP", access: Access::Endinit, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::ICR, name: "ICR", access: Access::Unrestricted, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::FCX, name: "FCX", access: Access::Unrestricted, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::LCX, name: "LCX", access: Access::Unrestricted, since: IsaVersion::V1_3 },
    Csfr { offset: csfr::COMPAT, name: "COMPAT", access: Access::Endinit, since: IsaVersion::V1_3_1 },
];

/// Where an MFCR reads from or an MTCR writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsfrSlot {
    /// Goes through the PSW pack/unpack helpers.
    Psw,
    /// The address of the executing instruction.
    Pc,
    Reg(Reg),
    /// Unknown or unavailable: reads yield zero, writes are dropped.
    None,
}

#[derive(Debug, Clone)]
pub struct RegisterFile {
    pub flags: FlagState,
    isa: IsaVersion,
    privilege: Privilege,
}

impl RegisterFile {
    pub fn new(cfg: &TranslateConfig) -> Self {
        Self {
            flags: FlagState::default(),
            isa: cfg.isa,
            privilege: cfg.privilege,
        }
    }

    #[inline]
    pub fn d(&self, n: u8) -> Reg {
        Reg::D(n & 0xf)
    }

    #[inline]
    pub fn a(&self, n: u8) -> Reg {
        Reg::A(n & 0xf)
    }

    /// Low and high halves of the data register pair `E[n]`.
    pub fn d_pair(&self, n: u8) -> Result<(Reg, Reg), Fault> {
        if n & 1 != 0 {
            return Err(Fault::Alignment { reg: n });
        }
        Ok((Reg::D(n), Reg::D(n + 1)))
    }

    /// Low and high halves of the address register pair `P[n]`.
    pub fn a_pair(&self, n: u8) -> Result<(Reg, Reg), Fault> {
        if n & 1 != 0 {
            return Err(Fault::Alignment { reg: n });
        }
        Ok((Reg::A(n), Reg::A(n + 1)))
    }

    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    pub fn lookup(&self, offset: u16) -> Option<&'static Csfr> {
        CSFRS.iter().find(|c| c.offset == offset && self.isa >= c.since)
    }

    fn slot(offset: u16) -> CsfrSlot {
        match offset {
            csfr::PSW => CsfrSlot::Psw,
            csfr::PC => CsfrSlot::Pc,
            csfr::ICR => CsfrSlot::Reg(Reg::Icr),
            _ => CsfrSlot::Reg(Reg::Csfr(offset)),
        }
    }

    pub fn csfr_read(&self, offset: u16) -> CsfrSlot {
        match self.lookup(offset) {
            Some(c) => Self::slot(c.offset),
            None => CsfrSlot::None,
        }
    }

    /// MTCR is a supervisor instruction; read-only registers ignore writes.
    pub fn csfr_write(&self, offset: u16) -> Result<CsfrSlot, Fault> {
        if self.privilege != Privilege::Supervisor {
            return Err(Fault::Privilege { offset });
        }
        Ok(match self.lookup(offset) {
            Some(c) if c.access != Access::ReadOnly => Self::slot(c.offset),
            _ => CsfrSlot::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rf(isa: IsaVersion, privilege: Privilege) -> RegisterFile {
        RegisterFile::new(&TranslateConfig { isa, privilege, ..Default::default() })
    }

    #[test]
    fn pairs_must_be_even() {
        let r = rf(IsaVersion::V1_6, Privilege::Supervisor);
        assert_eq!(r.d_pair(4), Ok((Reg::D(4), Reg::D(5))));
        assert_eq!(r.d_pair(3), Err(Fault::Alignment { reg: 3 }));
        assert_eq!(r.a_pair(15), Err(Fault::Alignment { reg: 15 }));
        assert_eq!(r.a_pair(14), Ok((Reg::A(14), Reg::A(15))));
    }

    #[test]
    fn csfr_reads() {
        let r = rf(IsaVersion::V1_6, Privilege::User0);
        assert_eq!(r.csfr_read(csfr::PSW), CsfrSlot::Psw);
        assert_eq!(r.csfr_read(csfr::ICR), CsfrSlot::Reg(Reg::Icr));
        assert_eq!(r.csfr_read(csfr::FCX), CsfrSlot::Reg(Reg::Csfr(csfr::FCX)));
        assert_eq!(r.csfr_read(0x1234), CsfrSlot::None);
        // introduced with 1.6.1
        assert_eq!(r.csfr_read(csfr::CORE_ID), CsfrSlot::None);
    }

    #[test]
    fn csfr_writes() {
        let sup = rf(IsaVersion::V1_6_1, Privilege::Supervisor);
        assert_eq!(sup.csfr_write(csfr::PC), Ok(CsfrSlot::None));
        assert_eq!(sup.csfr_write(csfr::BIV), Ok(CsfrSlot::Reg(Reg::Csfr(csfr::BIV))));
        assert_eq!(sup.csfr_write(0x0042), Ok(CsfrSlot::None));

        let user = rf(IsaVersion::V1_6_1, Privilege::User1);
        assert_eq!(user.csfr_write(csfr::ICR), Err(Fault::Privilege { offset: csfr::ICR }));
    }
}
