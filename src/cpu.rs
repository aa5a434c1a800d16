use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ir::{Flag, Reg};
use crate::regfile::csfr;
use crate::runtime::{self, FlagRegs};

/// Concrete architectural state the reference interpreter runs blocks on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: u32,
    pub d: [u32; 16],
    pub a: [u32; 16],
    pub flags: FlagRegs,
    /// PSW bits other than the user status flags.
    pub psw: u32,
    pub icr: u32,
    /// Remaining core special-function registers, by offset.
    pub csfr: BTreeMap<u16, u32>,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, reset_pc: u32) {
        *self = Self { pc: reset_pc, ..Self::default() };
    }

    pub fn read(&self, reg: Reg) -> u32 {
        match reg {
            Reg::D(n) => self.d[n as usize & 0xf],
            Reg::A(n) => self.a[n as usize & 0xf],
            Reg::Psw(flag) => *self.flag(flag),
            Reg::Pc => self.pc,
            Reg::Icr => self.icr,
            Reg::Csfr(off) => self.csfr.get(&off).copied().unwrap_or(0),
        }
    }

    pub fn write(&mut self, reg: Reg, value: u32) {
        match reg {
            Reg::D(n) => self.d[n as usize & 0xf] = value,
            Reg::A(n) => self.a[n as usize & 0xf] = value,
            Reg::Psw(flag) => *self.flag_mut(flag) = value,
            Reg::Pc => self.pc = value,
            Reg::Icr => self.icr = value,
            Reg::Csfr(csfr::PSW) => self.psw_write(value),
            Reg::Csfr(off) => {
                self.csfr.insert(off, value);
            }
        }
    }

    fn flag(&self, flag: Flag) -> &u32 {
        match flag {
            Flag::C => &self.flags.c,
            Flag::V => &self.flags.v,
            Flag::SV => &self.flags.sv,
            Flag::AV => &self.flags.av,
            Flag::SAV => &self.flags.sav,
        }
    }

    fn flag_mut(&mut self, flag: Flag) -> &mut u32 {
        match flag {
            Flag::C => &mut self.flags.c,
            Flag::V => &mut self.flags.v,
            Flag::SV => &mut self.flags.sv,
            Flag::AV => &mut self.flags.av,
            Flag::SAV => &mut self.flags.sav,
        }
    }

    pub fn psw_read(&self) -> u32 {
        runtime::psw_pack(self.psw, &self.flags)
    }

    pub fn psw_write(&mut self, value: u32) {
        let (rest, flags) = runtime::psw_unpack(value);
        self.psw = rest;
        self.flags = flags;
    }

    /// `E[n]` as a 64-bit value.
    pub fn e(&self, n: u8) -> u64 {
        let n = (n & 0xe) as usize;
        ((self.d[n + 1] as u64) << 32) | self.d[n] as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_travel_through_psw() {
        let mut cpu = Cpu::new();
        cpu.write(Reg::Psw(Flag::V), 1 << 31);
        cpu.write(Reg::Psw(Flag::C), 1);
        assert_eq!(cpu.psw_read() >> 30, 0b11);
        cpu.psw_write(0);
        assert_eq!(cpu.read(Reg::Psw(Flag::V)), 0);
    }

    #[test]
    fn unknown_csfr_reads_zero() {
        let mut cpu = Cpu::new();
        assert_eq!(cpu.read(Reg::Csfr(csfr::FCX)), 0);
        cpu.write(Reg::Csfr(csfr::FCX), 0x10);
        assert_eq!(cpu.read(Reg::Csfr(csfr::FCX)), 0x10);
    }
}
