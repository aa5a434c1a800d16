use thiserror::Error;

use crate::ir::{tin, TrapClass};

/// Per-instruction translation faults. Each one becomes a trap terminator.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("illegal opcode {word:#010x}")]
    Decode { word: u32 },
    #[error("register pair starting at odd index {reg}")]
    Alignment { reg: u8 },
    #[error("write to csfr {offset:#06x} needs supervisor mode")]
    Privilege { offset: u16 },
    #[error("instruction {word:#010x} not allowed at the current privilege level")]
    PrivilegedInsn { word: u32 },
}

impl Fault {
    pub const fn trap(&self) -> (TrapClass, u32) {
        match self {
            Fault::Decode { .. } => (TrapClass::Insn, tin::IOPC),
            Fault::Alignment { .. } => (TrapClass::Insn, tin::OPD),
            Fault::Privilege { .. } | Fault::PrivilegedInsn { .. } => (TrapClass::Prot, tin::PRIV),
        }
    }
}
