//! Reference interpreter for translated blocks.
//!
//! Runs a [`Block`] against a concrete [`Cpu`] and a [`Bus`]. It is slow and
//! straightforward on purpose: tests use it as the oracle for the
//! translator's IR.

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::TranslateConfig;
use crate::cpu::Cpu;
use crate::driver::{translate_block, TranslateError};
use crate::ir::{BinOp, Block, Dest, Helper, Inst, MemSize, Terminator, TrapInfo, Ty, UnOp, Value};
use crate::memory::Bus;
use crate::runtime;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("bus error at {addr:#010x}: {source}")]
    Bus {
        addr: u32,
        #[source]
        source: anyhow::Error,
    },
    #[error("helper `{0}` needs a context save area model")]
    UnsupportedHelper(&'static str),
    #[error("temp t{0} read before it was written")]
    UndefinedTemp(u32),
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// How a block left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Continue at this address; `cpu.pc` already holds it.
    Jump(u32),
    /// The block raised a trap; `cpu.pc` is the trapping instruction.
    Trap(TrapInfo),
}

struct Machine<'a, B: Bus + ?Sized> {
    cpu: &'a mut Cpu,
    bus: &'a mut B,
    temps: Vec<Option<u64>>,
}

fn sext(v: u64, bits: u32) -> u64 {
    let shift = 64 - bits;
    (((v << shift) as i64) >> shift) as u64
}

fn low_mask(len: u32) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

fn unop(op: UnOp, ty: Ty, x: u64) -> u64 {
    let bits = ty.bits();
    let x = x & ty.mask();
    let r = match op {
        UnOp::Mov => x,
        UnOp::Not => !x,
        UnOp::Neg => x.wrapping_neg(),
        UnOp::Ext8S => sext(x & 0xff, 8),
        UnOp::Ext8U => x & 0xff,
        UnOp::Ext16S => sext(x & 0xffff, 16),
        UnOp::Ext16U => x & 0xffff,
        UnOp::Clz => (x << (64 - bits)).leading_zeros().min(bits) as u64,
        UnOp::Clo => ((x << (64 - bits)).leading_ones()).min(bits) as u64,
        UnOp::Cls => {
            let top = x << (64 - bits);
            let run = if (top as i64) < 0 { top.leading_ones() } else { top.leading_zeros() };
            (run.min(bits) - 1) as u64
        }
        UnOp::Popcnt => x.count_ones() as u64,
    };
    r & ty.mask()
}

fn binop(op: BinOp, ty: Ty, a: u64, b: u64) -> u64 {
    let bits = ty.bits() as u64;
    let (a, b) = (a & ty.mask(), b & ty.mask());
    let r = match op {
        BinOp::Add => a.wrapping_add(b),
        BinOp::Sub => a.wrapping_sub(b),
        BinOp::Mul => a.wrapping_mul(b),
        BinOp::And => a & b,
        BinOp::Or => a | b,
        BinOp::Xor => a ^ b,
        BinOp::AndC => a & !b,
        BinOp::OrC => a | !b,
        BinOp::Nand => !(a & b),
        BinOp::Nor => !(a | b),
        BinOp::Eqv => !(a ^ b),
        BinOp::Shl if b >= bits => 0,
        BinOp::Shl => a << b,
        BinOp::Shr if b >= bits => 0,
        BinOp::Shr => a >> b,
        BinOp::Sar => {
            let s = sext(a, bits as u32) as i64;
            (s >> b.min(bits - 1)) as u64
        }
        BinOp::Rotl | BinOp::Rotr => {
            let n = b % bits;
            let n = if op == BinOp::Rotr { (bits - n) % bits } else { n };
            if n == 0 {
                a
            } else {
                (a << n) | (a >> (bits - n))
            }
        }
    };
    r & ty.mask()
}

impl<B: Bus + ?Sized> Machine<'_, B> {
    fn get(&self, v: Value) -> Result<u64, ExecError> {
        match v {
            Value::Imm(x) => Ok(x),
            Value::Reg(r) => Ok(self.cpu.read(r) as u64),
            Value::Temp(t) => self
                .temps
                .get(t.index as usize)
                .copied()
                .flatten()
                .ok_or(ExecError::UndefinedTemp(t.index)),
        }
    }

    fn put(&mut self, dst: Dest, v: u64) {
        match dst {
            Dest::Reg(r) => self.cpu.write(r, v as u32),
            Dest::Temp(t) => {
                let i = t.index as usize;
                if self.temps.len() <= i {
                    self.temps.resize(i + 1, None);
                }
                self.temps[i] = Some(v & t.ty.mask());
            }
        }
    }

    fn bus_err(addr: u32) -> impl FnOnce(anyhow::Error) -> ExecError {
        move |source| ExecError::Bus { addr, source }
    }

    fn load(&mut self, addr: u32, size: MemSize) -> Result<u64, ExecError> {
        let err = Self::bus_err(addr);
        Ok(match size {
            MemSize::U8 => self.bus.read_u8(addr).map_err(err)? as u64,
            MemSize::S8 => self.bus.read_u8(addr).map_err(err)? as i8 as i32 as u32 as u64,
            MemSize::U16 => self.bus.read_u16(addr).map_err(err)? as u64,
            MemSize::S16 => self.bus.read_u16(addr).map_err(err)? as i16 as i32 as u32 as u64,
            MemSize::U32 => self.bus.read_u32(addr).map_err(err)? as u64,
            MemSize::U64 => {
                let lo = self.bus.read_u32(addr).map_err(err)? as u64;
                let hi_addr = addr.wrapping_add(4);
                let hi = self.bus.read_u32(hi_addr).map_err(Self::bus_err(hi_addr))? as u64;
                (hi << 32) | lo
            }
        })
    }

    fn store(&mut self, addr: u32, v: u64, size: MemSize) -> Result<(), ExecError> {
        let err = Self::bus_err(addr);
        match size {
            MemSize::U8 | MemSize::S8 => self.bus.write_u8(addr, v as u8).map_err(err),
            MemSize::U16 | MemSize::S16 => self.bus.write_u16(addr, v as u16).map_err(err),
            MemSize::U32 => self.bus.write_u32(addr, v as u32).map_err(err),
            MemSize::U64 => {
                self.bus.write_u32(addr, v as u32).map_err(err)?;
                let hi_addr = addr.wrapping_add(4);
                self.bus.write_u32(hi_addr, (v >> 32) as u32).map_err(Self::bus_err(hi_addr))
            }
        }
    }

    fn helper(&mut self, helper: Helper, args: &[u64]) -> Result<Option<u64>, ExecError> {
        let arg = |i: usize| args.get(i).copied().unwrap_or(0);
        let (a0, a1) = (arg(0) as u32, arg(1) as u32);
        Ok(match helper {
            Helper::PswRead => Some(self.cpu.psw_read() as u64),
            Helper::PswWrite => {
                self.cpu.psw_write(a0);
                None
            }
            Helper::DvInitB => Some(runtime::dvinit_b(a0, a1)),
            Helper::DvInitH => Some(runtime::dvinit_h(a0, a1)),
            Helper::DvStep => Some(runtime::dvstep(arg(0), a1)),
            Helper::DvStepU => Some(runtime::dvstep_u(arg(0), a1)),
            Helper::DvAdj => Some(runtime::dvadj(arg(0), a1)),
            Helper::Divide => Some(runtime::divide(a0, a1)),
            Helper::DivideU => Some(runtime::divide_u(a0, a1)),
            Helper::BrUpdate => Some(runtime::br_update(a0) as u64),
            Helper::CircUpdate => Some(runtime::circ_update(a0, a1) as u64),
            Helper::Cache(_) => None,
            Helper::Crc32 => Some(runtime::crc32(a0, a1) as u64),
            Helper::Call
            | Helper::Ret
            | Helper::Rfe
            | Helper::Rfm
            | Helper::Bisr
            | Helper::Svlcx
            | Helper::Rslcx
            | Helper::Ldlcx
            | Helper::Lducx
            | Helper::Stlcx
            | Helper::Stucx
            | Helper::Float(_) => return Err(ExecError::UnsupportedHelper(helper.name())),
        })
    }

    fn exec(&mut self, inst: &Inst) -> Result<(), ExecError> {
        trace!(?inst, "exec");
        match inst {
            Inst::Unary { op, ty, dst, src } => {
                let v = unop(*op, *ty, self.get(*src)?);
                self.put(*dst, v);
            }
            Inst::Binary { op, ty, dst, lhs, rhs } => {
                let v = binop(*op, *ty, self.get(*lhs)?, self.get(*rhs)?);
                self.put(*dst, v);
            }
            Inst::SetCond { cond, ty, dst, lhs, rhs } => {
                let v = cond.eval(*ty, self.get(*lhs)?, self.get(*rhs)?);
                self.put(*dst, v as u64);
            }
            Inst::MovCond { cond, ty, dst, lhs, rhs, then_, else_ } => {
                let pick = if cond.eval(*ty, self.get(*lhs)?, self.get(*rhs)?) { then_ } else { else_ };
                let v = self.get(*pick)?;
                self.put(*dst, v);
            }
            Inst::Deposit { dst, base, field, pos, len } => {
                let mask = (low_mask(*len) << pos) & 0xffff_ffff;
                let base = self.get(*base)?;
                let field = self.get(*field)? << pos;
                self.put(*dst, (base & !mask) | (field & mask));
            }
            Inst::Extract { dst, src, pos, len, signed } => {
                let raw = (self.get(*src)? & 0xffff_ffff) >> pos;
                let v = match (*len, *signed) {
                    (0, _) => 0,
                    (l, true) => sext(raw & low_mask(l), l) & 0xffff_ffff,
                    (l, false) => raw & low_mask(l),
                };
                self.put(*dst, v);
            }
            Inst::Concat { dst, lo, hi } => {
                let v = (self.get(*hi)? << 32) | (self.get(*lo)? & 0xffff_ffff);
                self.put(*dst, v);
            }
            Inst::Split { lo, hi, src } => {
                let v = self.get(*src)?;
                self.put(*lo, v & 0xffff_ffff);
                self.put(*hi, v >> 32);
            }
            Inst::Widen { dst, src, signed } => {
                let v = self.get(*src)? & 0xffff_ffff;
                self.put(*dst, if *signed { sext(v, 32) } else { v });
            }
            Inst::Narrow { dst, src, high } => {
                let v = self.get(*src)?;
                self.put(*dst, if *high { v >> 32 } else { v & 0xffff_ffff });
            }
            Inst::Load { dst, addr, size } => {
                let addr = self.get(*addr)? as u32;
                let v = self.load(addr, *size)?;
                self.put(*dst, v);
            }
            Inst::Store { addr, src, size } => {
                let addr = self.get(*addr)? as u32;
                let v = self.get(*src)?;
                self.store(addr, v, *size)?;
            }
            Inst::Call { helper, args, ret } => {
                let args = args.iter().map(|a| self.get(*a)).collect::<Result<Vec<_>, _>>()?;
                let r = self.helper(*helper, &args)?;
                if let (Some(dst), Some(v)) = (ret, r) {
                    self.put(*dst, v);
                }
            }
        }
        Ok(())
    }

    fn leave(&mut self, term: &Terminator) -> Result<Exit, ExecError> {
        match term {
            Terminator::Goto(pc) => {
                self.cpu.pc = *pc;
                Ok(Exit::Jump(*pc))
            }
            Terminator::Dispatch => Ok(Exit::Jump(self.cpu.pc)),
            Terminator::Trap(info) => {
                self.cpu.pc = info.pc;
                Ok(Exit::Trap(*info))
            }
            Terminator::If { cond, lhs, rhs, then_, else_ } => {
                let taken = cond.eval(Ty::I32, self.get(*lhs)?, self.get(*rhs)?);
                self.leave(if taken { then_ } else { else_ })
            }
        }
    }
}

/// Executes `block` and follows its terminator.
pub fn run_block<B: Bus + ?Sized>(cpu: &mut Cpu, bus: &mut B, block: &Block) -> Result<Exit, ExecError> {
    let mut m = Machine { cpu, bus, temps: vec![None; block.temps as usize] };
    for inst in &block.insts {
        m.exec(inst)?;
    }
    let exit = m.leave(&block.terminator)?;
    debug!(start = block.start, ?exit, "block done");
    Ok(exit)
}

/// Translates the block at `cpu.pc` and runs it.
pub fn step<B: Bus + ?Sized>(cpu: &mut Cpu, bus: &mut B, cfg: &TranslateConfig) -> Result<Exit, ExecError> {
    let block = translate_block(bus, cpu.pc, cfg)?;
    run_block(cpu, bus, &block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FloatOp;

    #[test]
    fn shifts_saturate_at_width() {
        assert_eq!(binop(BinOp::Shl, Ty::I32, 1, 32), 0);
        assert_eq!(binop(BinOp::Sar, Ty::I32, 0x8000_0000, 40), 0xffff_ffff);
        assert_eq!(binop(BinOp::Sar, Ty::I64, 1 << 63, 63), u64::MAX);
        assert_eq!(binop(BinOp::Rotr, Ty::I32, 1, 1), 0x8000_0000);
        assert_eq!(binop(BinOp::Rotl, Ty::I32, 0x8000_0000, 33), 1);
    }

    #[test]
    fn leading_bit_counts() {
        assert_eq!(unop(UnOp::Clz, Ty::I32, 0), 32);
        assert_eq!(unop(UnOp::Clz, Ty::I32, 1), 31);
        assert_eq!(unop(UnOp::Clo, Ty::I32, 0xf000_0000), 4);
        assert_eq!(unop(UnOp::Cls, Ty::I32, 0xffff_ffff), 31);
        assert_eq!(unop(UnOp::Cls, Ty::I32, 0x4000_0000), 0);
        assert_eq!(unop(UnOp::Popcnt, Ty::I32, 0xf0f0), 8);
    }

    #[test]
    fn context_helpers_are_unsupported() {
        let mut cpu = Cpu::new();
        let mut mem = crate::memory::LinearMemory::new(4);
        let mut m = Machine { cpu: &mut cpu, bus: &mut mem, temps: Vec::new() };
        assert!(matches!(m.helper(Helper::Ret, &[]), Err(ExecError::UnsupportedHelper("ret"))));
    }

    #[test]
    fn float_helpers_need_an_fpu() {
        let mut cpu = Cpu::new();
        let mut mem = crate::memory::LinearMemory::new(4);
        let mut m = Machine { cpu: &mut cpu, bus: &mut mem, temps: Vec::new() };
        let r = m.helper(Helper::Float(FloatOp::Add), &[0x3f80_0000, 0x3f80_0000]);
        assert!(matches!(r, Err(ExecError::UnsupportedHelper("fadd"))));
        assert_eq!(m.helper(Helper::Crc32, &[0, 0]).unwrap(), Some(0x2144_df1c));
    }
}
