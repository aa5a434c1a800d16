//! Single-precision instructions and CRC32. Neither has inline semantics:
//! each instruction is one named helper call whose result lands in `D[c]`.

use super::Translator;
use crate::config::IsaVersion;
use crate::fault::Fault;
use crate::helper::{ChecksumHelper, FloatHelper};
use crate::ir::{FloatOp, Reg, Value};

impl Translator<'_> {
    /// `dst = op(args)`; `args` in the helper's operand order.
    pub(super) fn float_op(&mut self, op: FloatOp, dst: Reg, args: &[Reg]) {
        let args: Vec<Value> = args.iter().map(|&r| r.into()).collect();
        let r = self.fpu().float(op, args);
        self.ir.mov(dst, r);
    }

    /// UPDFL
    pub(super) fn update_fpu_flags(&mut self, src: Reg) {
        self.fpu().update_fpu_flags(src.into());
    }

    /// CRC32: `D[c] = crc32(D[a], running checksum D[b])`.
    pub(super) fn crc32(&mut self, dst: Reg, data: Reg, crc: Reg) -> Result<(), Fault> {
        self.require(IsaVersion::V1_6_1)?;
        let r = self.checksum().crc32(data.into(), crc.into());
        self.ir.mov(dst, r);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslateConfig;
    use crate::ir::{BlockBuilder, Helper, Inst};
    use crate::regfile::RegisterFile;

    #[test]
    fn fused_multiply_add_passes_three_operands() {
        let cfg = TranslateConfig::default();
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 1);
        t.float_op(FloatOp::Madd, Reg::D(4), &[Reg::D(3), Reg::D(1), Reg::D(2)]);
        match &b.insts()[0] {
            Inst::Call { helper, args, ret } => {
                assert_eq!(*helper, Helper::Float(FloatOp::Madd));
                assert_eq!(args, &vec![Value::from(Reg::D(3)), Value::from(Reg::D(1)), Value::from(Reg::D(2))]);
                assert!(ret.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(b.insts()[1].dest(), Some(Reg::D(4).into()));
    }

    #[test]
    fn crc32_is_gated_on_1_6_1() {
        let cfg = TranslateConfig { isa: IsaVersion::V1_6, ..Default::default() };
        let regs = RegisterFile::new(&cfg);
        let mut b = BlockBuilder::new(0);
        let mut t = Translator::new(&mut b, &regs, &cfg, 0, 0x0030_004b);
        assert_eq!(t.crc32(Reg::D(0), Reg::D(1), Reg::D(2)), Err(Fault::Decode { word: 0x0030_004b }));
        assert!(b.insts().is_empty());
    }
}
