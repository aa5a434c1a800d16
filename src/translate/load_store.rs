//! Loads, stores, read-modify-write memory operations and the address-only
//! instructions (LEA, LHA, cache maintenance).

use super::addressing::AddrMode;
use super::Translator;
use crate::fault::Fault;
use crate::helper::{CacheHelper, ContextHelper, ContextIo};
use crate::ir::{imm, BinOp, CacheOp, Cond, MemSize, Reg, Value};

impl Translator<'_> {
    /// LD.B/BU/H/HU/W/A
    pub(super) fn ld(&mut self, dst: Reg, size: MemSize, mode: AddrMode) -> Result<(), Fault> {
        let acc = self.resolve(mode)?;
        self.ir.load_into(dst, acc.ea, size);
        self.commit(acc);
        Ok(())
    }

    /// LD.Q: half-word into the upper half, lower half cleared.
    pub(super) fn ld_q(&mut self, dst: Reg, mode: AddrMode) -> Result<(), Fault> {
        let acc = self.resolve(mode)?;
        let h = self.ir.load(acc.ea, MemSize::U16);
        self.ir.set(dst, BinOp::Shl, h, imm(16));
        self.commit(acc);
        Ok(())
    }

    /// LD.D / LD.DA
    pub(super) fn ld_pair(&mut self, (lo, hi): (Reg, Reg), mode: AddrMode) -> Result<(), Fault> {
        let (acc, second) = self.resolve_wide(mode)?;
        let l = self.ir.load(acc.ea, MemSize::U32);
        let h = self.ir.load(second, MemSize::U32);
        self.ir.mov(lo, l);
        self.ir.mov(hi, h);
        self.commit(acc);
        Ok(())
    }

    /// ST.B/H/W/A
    pub(super) fn st(&mut self, src: Reg, size: MemSize, mode: AddrMode) -> Result<(), Fault> {
        let acc = self.resolve(mode)?;
        self.ir.store(acc.ea, src, size);
        self.commit(acc);
        Ok(())
    }

    /// ST.Q: the upper half-word of `src`.
    pub(super) fn st_q(&mut self, src: Reg, mode: AddrMode) -> Result<(), Fault> {
        let acc = self.resolve(mode)?;
        let h = self.ir.shr(src, imm(16));
        self.ir.store(acc.ea, h, MemSize::U16);
        self.commit(acc);
        Ok(())
    }

    /// ST.D / ST.DA
    pub(super) fn st_pair(&mut self, (lo, hi): (Reg, Reg), mode: AddrMode) -> Result<(), Fault> {
        let (acc, second) = self.resolve_wide(mode)?;
        self.ir.store(acc.ea, lo, MemSize::U32);
        self.ir.store(second, hi, MemSize::U32);
        self.commit(acc);
        Ok(())
    }

    /// LEA: the effective address itself.
    pub(super) fn lea(&mut self, dst: Reg, mode: AddrMode) -> Result<(), Fault> {
        let acc = self.resolve(mode)?;
        self.ir.mov(dst, acc.ea);
        self.commit(acc);
        Ok(())
    }

    /// `(m & !mask) | (value & mask)`
    fn merge_masked(&mut self, m: impl Into<Value>, value: Reg, mask: Reg) -> Value {
        let keep = self.ir.binary(BinOp::AndC, m, mask);
        let ins = self.ir.and(value, mask);
        self.ir.or(keep, ins).into()
    }

    /// LDMST: `M(EA) = (M(EA) & !E[a].hi) | (E[a].lo & E[a].hi)`
    pub(super) fn ldmst(&mut self, a: u8, mode: AddrMode) -> Result<(), Fault> {
        let (value, mask) = self.e(a)?;
        let acc = self.resolve(mode)?;
        let m = self.ir.load(acc.ea, MemSize::U32);
        let merged = self.merge_masked(m, value, mask);
        self.ir.store(acc.ea, merged, MemSize::U32);
        self.commit(acc);
        Ok(())
    }

    /// SWAP.W
    pub(super) fn swap_w(&mut self, a: u8, mode: AddrMode) -> Result<(), Fault> {
        let d = self.d(a);
        let acc = self.resolve(mode)?;
        let m = self.ir.load(acc.ea, MemSize::U32);
        self.ir.store(acc.ea, d, MemSize::U32);
        self.ir.mov(d, m);
        self.commit(acc);
        Ok(())
    }

    /// CMPSWAP.W: stores `E[a].lo` when memory equals `E[a].hi`; the old
    /// memory word lands in `E[a].lo` either way.
    pub(super) fn cmpswap_w(&mut self, a: u8, mode: AddrMode) -> Result<(), Fault> {
        let (value, expected) = self.e(a)?;
        let acc = self.resolve(mode)?;
        let m = self.ir.load(acc.ea, MemSize::U32);
        let out = self.ir.movcond(Cond::Eq, m, expected, value, m);
        self.ir.store(acc.ea, out, MemSize::U32);
        self.ir.mov(value, m);
        self.commit(acc);
        Ok(())
    }

    /// SWAPMSK.W: masked store of `E[a].lo` under `E[a].hi`, old word to
    /// `E[a].lo`.
    pub(super) fn swapmsk_w(&mut self, a: u8, mode: AddrMode) -> Result<(), Fault> {
        let (value, mask) = self.e(a)?;
        let acc = self.resolve(mode)?;
        let m = self.ir.load(acc.ea, MemSize::U32);
        let merged = self.merge_masked(m, value, mask);
        self.ir.store(acc.ea, merged, MemSize::U32);
        self.ir.mov(value, m);
        self.commit(acc);
        Ok(())
    }

    /// ST.T: sets bit `bpos` of the byte at `addr` to `b`.
    pub(super) fn st_t(&mut self, addr: u32, bpos: u32, b: u32) {
        let byte = self.ir.load(imm(addr), MemSize::U8);
        let cleared = self.ir.and(byte, imm(!(1u32 << bpos)));
        let out = self.ir.or(cleared, imm((b & 1) << bpos));
        self.ir.store(imm(addr), out, MemSize::U8);
    }

    /// LHA: `off18` moved into the top of the address register.
    pub(super) fn lha(&mut self, dst: Reg, off18: u32) {
        self.ir.mov(dst, imm(off18 << 14));
    }

    /// LDLCX/LDUCX/STLCX/STUCX
    pub(super) fn context_transfer(&mut self, kind: ContextIo, mode: AddrMode) -> Result<(), Fault> {
        let acc = self.resolve(mode)?;
        self.context().context_io(kind, acc.ea);
        self.commit(acc);
        Ok(())
    }

    /// CACHEA.* / CACHEI.*: the addressing side effects happen as for a load.
    pub(super) fn cache_op(&mut self, op: CacheOp, mode: AddrMode) -> Result<(), Fault> {
        let acc = self.resolve(mode)?;
        self.cache_unit().cache(op, acc.ea);
        self.commit(acc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Inst};
    use crate::regfile::RegisterFile;

    #[test]
    fn st_t_touches_one_byte() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        t.st_t(0xd000_0010, 3, 1);
        let sizes: Vec<_> = b
            .insts()
            .iter()
            .filter_map(|i| match i {
                Inst::Load { size, .. } | Inst::Store { size, .. } => Some(*size),
                _ => None,
            })
            .collect();
        assert_eq!(sizes, vec![MemSize::U8, MemSize::U8]);
    }

    #[test]
    fn ldmst_checks_pair() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        assert_eq!(t.ldmst(5, AddrMode::Absolute(0x100)), Err(Fault::Alignment { reg: 5 }));
        assert!(b.insts().is_empty());
    }
}
