use serde::{Deserialize, Serialize};

use super::value::{Dest, Ty, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    Mov,
    Not,
    Neg,
    Ext8S,
    Ext8U,
    Ext16S,
    Ext16U,
    /// Count leading zeros (width when the input is zero).
    Clz,
    /// Count leading ones.
    Clo,
    /// Count leading redundant sign bits, excluding the sign bit itself.
    Cls,
    Popcnt,
}

/// Shift amounts at or beyond the operand width yield 0 (`Shl`, `Shr`) or a
/// sign fill (`Sar`); rotate amounts are taken modulo the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    And,
    Or,
    Xor,
    /// `lhs & !rhs`
    AndC,
    /// `lhs | !rhs`
    OrC,
    Nand,
    Nor,
    /// `!(lhs ^ rhs)`
    Eqv,
    Shl,
    Shr,
    Sar,
    Rotl,
    Rotr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cond {
    Eq,
    Ne,
    Lt,
    Ge,
    Le,
    Gt,
    Ltu,
    Geu,
    Leu,
    Gtu,
}

impl Cond {
    pub const fn invert(self) -> Self {
        match self {
            Cond::Eq => Cond::Ne,
            Cond::Ne => Cond::Eq,
            Cond::Lt => Cond::Ge,
            Cond::Ge => Cond::Lt,
            Cond::Le => Cond::Gt,
            Cond::Gt => Cond::Le,
            Cond::Ltu => Cond::Geu,
            Cond::Geu => Cond::Ltu,
            Cond::Leu => Cond::Gtu,
            Cond::Gtu => Cond::Leu,
        }
    }

    /// Evaluates the condition on values of width `ty`.
    pub fn eval(self, ty: Ty, lhs: u64, rhs: u64) -> bool {
        let (a, b) = (lhs & ty.mask(), rhs & ty.mask());
        let (sa, sb) = match ty {
            Ty::I32 => (a as u32 as i32 as i64, b as u32 as i32 as i64),
            Ty::I64 => (a as i64, b as i64),
        };
        match self {
            Cond::Eq => a == b,
            Cond::Ne => a != b,
            Cond::Lt => sa < sb,
            Cond::Ge => sa >= sb,
            Cond::Le => sa <= sb,
            Cond::Gt => sa > sb,
            Cond::Ltu => a < b,
            Cond::Geu => a >= b,
            Cond::Leu => a <= b,
            Cond::Gtu => a > b,
        }
    }
}

/// Memory access width and extension. Little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemSize {
    U8,
    S8,
    U16,
    S16,
    U32,
    U64,
}

impl MemSize {
    pub const fn bytes(self) -> u32 {
        match self {
            MemSize::U8 | MemSize::S8 => 1,
            MemSize::U16 | MemSize::S16 => 2,
            MemSize::U32 => 4,
            MemSize::U64 => 8,
        }
    }
}

/// Cache maintenance flavours. They only matter to a back end with a cache
/// model; the address side effects are emitted as ordinary IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheOp {
    AddrInvalidate,
    AddrWriteback,
    AddrWritebackInvalidate,
    IndexWriteback,
    IndexWritebackInvalidate,
}

/// Single-precision operations. Each reads and updates the FPU status bits
/// of the PSW, which only the back end models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `acc + a * b`
    Madd,
    /// `acc - a * b`
    Msub,
    Cmp,
    Ftoi,
    /// float to int, rounding towards zero
    Ftoiz,
    /// float to unsigned, rounding towards zero
    Ftouz,
    Itof,
    Utof,
    /// Sets the PSW FPU flags from a register operand.
    Updfl,
    /// Reciprocal square root seed.
    Qseed,
}

impl FloatOp {
    pub const fn name(self) -> &'static str {
        match self {
            FloatOp::Add => "fadd",
            FloatOp::Sub => "fsub",
            FloatOp::Mul => "fmul",
            FloatOp::Div => "fdiv",
            FloatOp::Madd => "fmadd",
            FloatOp::Msub => "fmsub",
            FloatOp::Cmp => "fcmp",
            FloatOp::Ftoi => "ftoi",
            FloatOp::Ftoiz => "ftoiz",
            FloatOp::Ftouz => "ftouz",
            FloatOp::Itof => "itof",
            FloatOp::Utof => "utof",
            FloatOp::Updfl => "updfl",
            FloatOp::Qseed => "qseed",
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            FloatOp::Madd | FloatOp::Msub => 3,
            FloatOp::Add | FloatOp::Sub | FloatOp::Mul | FloatOp::Div | FloatOp::Cmp => 2,
            _ => 1,
        }
    }
}

/// Out-of-line routines the back end provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Helper {
    /// Packs the PSW from the flag registers and the rest of the PSW.
    PswRead,
    /// Unpacks a PSW value into the flag registers.
    PswWrite,
    /// Saves the upper context and links to the return address argument.
    Call,
    Ret,
    Rfe,
    Rfm,
    Bisr,
    Svlcx,
    Rslcx,
    Ldlcx,
    Lducx,
    Stlcx,
    Stucx,
    /// DVINIT.B dividend/remainder setup.
    DvInitB,
    DvInitH,
    DvStep,
    DvStepU,
    DvAdj,
    Divide,
    DivideU,
    /// Bit-reversed increment of the index half of an address register.
    BrUpdate,
    /// Circular-buffer index advance by a signed displacement.
    CircUpdate,
    Cache(CacheOp),
    /// CRC-32 of a data word (big-endian byte order) continuing a running
    /// checksum.
    Crc32,
    Float(FloatOp),
}

impl Helper {
    pub const fn name(self) -> &'static str {
        match self {
            Helper::PswRead => "psw_read",
            Helper::PswWrite => "psw_write",
            Helper::Call => "call",
            Helper::Ret => "ret",
            Helper::Rfe => "rfe",
            Helper::Rfm => "rfm",
            Helper::Bisr => "bisr",
            Helper::Svlcx => "svlcx",
            Helper::Rslcx => "rslcx",
            Helper::Ldlcx => "ldlcx",
            Helper::Lducx => "lducx",
            Helper::Stlcx => "stlcx",
            Helper::Stucx => "stucx",
            Helper::DvInitB => "dvinit_b",
            Helper::DvInitH => "dvinit_h",
            Helper::DvStep => "dvstep",
            Helper::DvStepU => "dvstep_u",
            Helper::DvAdj => "dvadj",
            Helper::Divide => "divide",
            Helper::DivideU => "divide_u",
            Helper::BrUpdate => "br_update",
            Helper::CircUpdate => "circ_update",
            Helper::Cache(_) => "cache",
            Helper::Crc32 => "crc32",
            Helper::Float(op) => op.name(),
        }
    }

    /// Number of arguments the helper takes.
    pub const fn arity(self) -> usize {
        match self {
            Helper::PswRead | Helper::Ret | Helper::Rfe | Helper::Rfm => 0,
            Helper::Svlcx | Helper::Rslcx => 0,
            Helper::PswWrite | Helper::Call | Helper::Bisr => 1,
            Helper::Ldlcx | Helper::Lducx | Helper::Stlcx | Helper::Stucx => 1,
            Helper::Cache(_) => 1,
            Helper::DvInitB | Helper::DvInitH => 2,
            Helper::Divide | Helper::DivideU => 2,
            Helper::BrUpdate => 1,
            Helper::CircUpdate => 2,
            Helper::Crc32 => 2,
            Helper::Float(op) => op.arity(),
            // 64-bit dividend pair followed by the divisor
            Helper::DvStep | Helper::DvStepU | Helper::DvAdj => 2,
        }
    }

    /// Result width, if the helper returns a value.
    pub const fn ret(self) -> Option<Ty> {
        match self {
            Helper::PswRead | Helper::BrUpdate | Helper::CircUpdate | Helper::Crc32 => Some(Ty::I32),
            Helper::Float(FloatOp::Updfl) => None,
            Helper::Float(_) => Some(Ty::I32),
            Helper::DvInitB
            | Helper::DvInitH
            | Helper::DvStep
            | Helper::DvStepU
            | Helper::DvAdj
            | Helper::Divide
            | Helper::DivideU => Some(Ty::I64),
            _ => None,
        }
    }

    /// Whether the helper may redirect control flow by writing PC.
    pub const fn writes_pc(self) -> bool {
        matches!(self, Helper::Ret | Helper::Rfe | Helper::Rfm)
    }
}

/// One IR operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inst {
    Unary {
        op: UnOp,
        ty: Ty,
        dst: Dest,
        src: Value,
    },
    Binary {
        op: BinOp,
        ty: Ty,
        dst: Dest,
        lhs: Value,
        rhs: Value,
    },
    /// `dst = (lhs cond rhs) as u32`
    SetCond {
        cond: Cond,
        ty: Ty,
        dst: Dest,
        lhs: Value,
        rhs: Value,
    },
    /// `dst = if lhs cond rhs { then_ } else { else_ }`, compared at `ty`;
    /// `then_` and `else_` have the width of `dst`.
    MovCond {
        cond: Cond,
        ty: Ty,
        dst: Dest,
        lhs: Value,
        rhs: Value,
        then_: Value,
        else_: Value,
    },
    /// 32-bit: `base` with bits `pos..pos+len` replaced by the low bits of `field`.
    Deposit {
        dst: Dest,
        base: Value,
        field: Value,
        pos: u32,
        len: u32,
    },
    /// 32-bit: bits `pos..pos+len` of `src`, zero- or sign-extended.
    Extract {
        dst: Dest,
        src: Value,
        pos: u32,
        len: u32,
        signed: bool,
    },
    /// `dst:i64 = hi:lo`
    Concat {
        dst: Dest,
        lo: Value,
        hi: Value,
    },
    /// `lo = src[31:0]; hi = src[63:32]`
    Split {
        lo: Dest,
        hi: Dest,
        src: Value,
    },
    /// i32 to i64.
    Widen {
        dst: Dest,
        src: Value,
        signed: bool,
    },
    /// i64 to i32, low or high word.
    Narrow {
        dst: Dest,
        src: Value,
        high: bool,
    },
    Load {
        dst: Dest,
        addr: Value,
        size: MemSize,
    },
    Store {
        addr: Value,
        src: Value,
        size: MemSize,
    },
    Call {
        helper: Helper,
        args: Vec<Value>,
        ret: Option<Dest>,
    },
}

impl Inst {
    /// The destination written, if any (the low half for `Split`).
    pub fn dest(&self) -> Option<Dest> {
        match self {
            Inst::Unary { dst, .. }
            | Inst::Binary { dst, .. }
            | Inst::SetCond { dst, .. }
            | Inst::MovCond { dst, .. }
            | Inst::Deposit { dst, .. }
            | Inst::Extract { dst, .. }
            | Inst::Concat { dst, .. }
            | Inst::Widen { dst, .. }
            | Inst::Narrow { dst, .. }
            | Inst::Load { dst, .. } => Some(*dst),
            Inst::Split { lo, .. } => Some(*lo),
            Inst::Store { .. } => None,
            Inst::Call { ret, .. } => *ret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cond_eval_signedness() {
        assert!(Cond::Lt.eval(Ty::I32, 0xffff_ffff, 0));
        assert!(!Cond::Ltu.eval(Ty::I32, 0xffff_ffff, 0));
        assert!(Cond::Gtu.eval(Ty::I64, u64::MAX, 1));
        assert!(Cond::Lt.eval(Ty::I64, u64::MAX, 1));
        // upper bits ignored at 32-bit width
        assert!(Cond::Eq.eval(Ty::I32, 0x1_0000_0005, 5));
    }

    #[test]
    fn cond_invert_round_trips() {
        for c in [Cond::Eq, Cond::Lt, Cond::Geu, Cond::Leu, Cond::Gt] {
            assert_eq!(c.invert().invert(), c);
        }
    }

    #[test]
    fn helper_signatures() {
        assert_eq!(Helper::Divide.ret(), Some(Ty::I64));
        assert_eq!(Helper::Call.arity(), 1);
        assert_eq!(Helper::Ret.ret(), None);
        assert!(Helper::Rfe.writes_pc());
        assert_eq!(Helper::DvInitH.name(), "dvinit_h");
    }
}
