use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of an IR value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ty {
    I32,
    I64,
}

impl Ty {
    pub const fn bits(self) -> u32 {
        match self {
            Ty::I32 => 32,
            Ty::I64 => 64,
        }
    }

    pub const fn mask(self) -> u64 {
        match self {
            Ty::I32 => 0xffff_ffff,
            Ty::I64 => u64::MAX,
        }
    }
}

/// Block-local SSA-ish temporary. Temps may be reassigned by `movcond`-style
/// updates but never outlive their block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Temp {
    pub index: u32,
    pub ty: Ty,
}

/// PSW flag pseudo-registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    /// Carry, held as 0 or 1.
    C,
    /// Overflow, bit 31.
    V,
    /// Sticky overflow, bit 31.
    SV,
    /// Advanced overflow, bit 31.
    AV,
    /// Sticky advanced overflow, bit 31.
    SAV,
}

/// Guest architectural state visible to the IR. All registers are 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reg {
    D(u8),
    A(u8),
    Psw(Flag),
    Pc,
    Icr,
    /// Any other core special-function register, by CSFR offset.
    Csfr(u16),
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::D(n) => write!(f, "d{n}"),
            Reg::A(n) => write!(f, "a{n}"),
            Reg::Psw(flag) => write!(f, "psw.{flag:?}"),
            Reg::Pc => f.write_str("pc"),
            Reg::Icr => f.write_str("icr"),
            Reg::Csfr(off) => write!(f, "csfr[{off:#06x}]"),
        }
    }
}

/// Operand of an IR instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Imm(u64),
    Temp(Temp),
    Reg(Reg),
}

impl Value {
    pub const fn ty(&self) -> Ty {
        match self {
            Value::Imm(_) | Value::Reg(_) => Ty::I32,
            Value::Temp(t) => t.ty,
        }
    }
}

impl From<Temp> for Value {
    fn from(t: Temp) -> Self {
        Value::Temp(t)
    }
}

impl From<Reg> for Value {
    fn from(r: Reg) -> Self {
        Value::Reg(r)
    }
}

/// 32-bit immediate operand.
#[inline]
pub const fn imm(v: u32) -> Value {
    Value::Imm(v as u64)
}

/// 64-bit immediate operand.
#[inline]
pub const fn imm64(v: u64) -> Value {
    Value::Imm(v)
}

/// Write target of an IR instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dest {
    Temp(Temp),
    Reg(Reg),
}

impl From<Temp> for Dest {
    fn from(t: Temp) -> Self {
        Dest::Temp(t)
    }
}

impl From<Reg> for Dest {
    fn from(r: Reg) -> Self {
        Dest::Reg(r)
    }
}
