//! Effective addresses and base-register side effects.
//!
//! A load or store resolves its [`AddrMode`] to an [`Access`] before touching
//! memory and commits the access afterwards. Every register update is
//! computed from the old register values up front and written back only at
//! commit, so a loaded value that lands in the base register is overwritten
//! by the update.

use super::Translator;
use crate::fault::Fault;
use crate::helper::AddressHelper;
use crate::ir::{imm, Reg, Value};

/// Addressing modes of the load/store formats. Offsets are already
/// sign-extended and scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// `A[base] + off`, no side effect.
    Offset { base: u8, off: i32 },
    /// Access at `A[base]`, then `A[base] += off`.
    PostInc { base: u8, off: i32 },
    /// `A[base] += off`, then access at the new value.
    PreInc { base: u8, off: i32 },
    /// `A[base] + A[base+1].index`, then a bit-reversed index increment.
    BitReverse { base: u8 },
    /// `A[base] + A[base+1].index`, then the index advances by `off` modulo
    /// the buffer length.
    Circular { base: u8, off: i32 },
    /// Already mapped from the 18-bit ABS field.
    Absolute(u32),
}

/// A resolved address with its deferred register update.
#[derive(Debug, Clone, Copy)]
pub(super) struct Access {
    pub ea: Value,
    update: Option<(Reg, Value)>,
}

impl Translator<'_> {
    fn base_index(&self, base: u8) -> Result<(Reg, Reg), Fault> {
        self.p(base)
    }

    /// `A[base] + (index_reg & 0xffff)`
    fn indexed(&mut self, base: Reg, index_reg: impl Into<Value>) -> Value {
        let index = self.ir.and(index_reg, imm(0xffff));
        self.ir.add(base, index).into()
    }

    pub(super) fn resolve(&mut self, mode: AddrMode) -> Result<Access, Fault> {
        Ok(match mode {
            AddrMode::Offset { base, off } => {
                let b = self.a(base);
                let ea = if off == 0 { b.into() } else { self.ir.add(b, imm(off as u32)).into() };
                Access { ea, update: None }
            }
            AddrMode::PostInc { base, off } => {
                let b = self.a(base);
                let ea = self.ir.copy(b);
                let next = self.ir.add(b, imm(off as u32));
                Access { ea: ea.into(), update: Some((b, next.into())) }
            }
            AddrMode::PreInc { base, off } => {
                let b = self.a(base);
                let next = self.ir.add(b, imm(off as u32));
                Access { ea: next.into(), update: Some((b, next.into())) }
            }
            AddrMode::BitReverse { base } => {
                let (b, idx) = self.base_index(base)?;
                let ea = self.indexed(b, idx);
                let next = self.address_unit().br_update(idx.into());
                Access { ea, update: Some((idx, next.into())) }
            }
            AddrMode::Circular { base, off } => {
                let (b, idx) = self.base_index(base)?;
                let ea = self.indexed(b, idx);
                let next = self.address_unit().circ_update(idx.into(), imm(off as u32));
                Access { ea, update: Some((idx, next.into())) }
            }
            AddrMode::Absolute(addr) => Access { ea: imm(addr), update: None },
        })
    }

    /// Like [`resolve`](Self::resolve), plus the address of the second word
    /// of a 64-bit access. Circular buffers wrap between the two words.
    pub(super) fn resolve_wide(&mut self, mode: AddrMode) -> Result<(Access, Value), Fault> {
        let acc = self.resolve(mode)?;
        let second = match mode {
            AddrMode::Circular { base, .. } => {
                let (b, idx) = self.base_index(base)?;
                let wrapped = self.address_unit().circ_update(idx.into(), imm(4));
                self.indexed(b, wrapped)
            }
            _ => self.ir.add(acc.ea, imm(4)).into(),
        };
        Ok((acc, second))
    }

    /// Writes the deferred register update.
    pub(super) fn commit(&mut self, acc: Access) {
        if let Some((reg, value)) = acc.update {
            self.ir.mov(reg, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Helper, Inst, MemSize};
    use crate::regfile::RegisterFile;

    #[test]
    fn post_increment_updates_after_the_access() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        let acc = t.resolve(AddrMode::PostInc { base: 2, off: 4 }).unwrap();
        t.ir.load_into(Reg::A(2), acc.ea, MemSize::U32);
        t.commit(acc);
        let last = b.insts().last().cloned().unwrap();
        assert_eq!(last.dest(), Some(Reg::A(2).into()));
        assert!(matches!(last, Inst::Unary { .. }));
    }

    #[test]
    fn circular_needs_even_base() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        assert_eq!(
            t.resolve(AddrMode::Circular { base: 3, off: 2 }).map(|_| ()),
            Err(Fault::Alignment { reg: 3 })
        );
        let (_, _) = t.resolve_wide(AddrMode::Circular { base: 4, off: 8 }).unwrap();
        let circ = b
            .insts()
            .iter()
            .filter(|i| matches!(i, Inst::Call { helper: Helper::CircUpdate, .. }))
            .count();
        assert_eq!(circ, 2);
    }
}
