#![allow(dead_code)]

use tricore_ir::runtime::PswFlags;
use tricore_ir::{step, Bus, Cpu, Exit, LinearMemory, TranslateConfig};

pub const DATA: u32 = 0x8000;

// ---- 16-bit formats ----

pub fn enc_src(op1: u32, d: u32, const4: i32) -> u16 {
    (((const4 as u32 & 0xf) << 12) | ((d & 0xf) << 8) | (op1 & 0xff)) as u16
}

pub fn enc_srr(op1: u32, d: u32, s2: u32) -> u16 {
    (((s2 & 0xf) << 12) | ((d & 0xf) << 8) | (op1 & 0xff)) as u16
}

pub fn enc_sb(op1: u32, disp8: i32) -> u16 {
    (((disp8 as u32 & 0xff) << 8) | (op1 & 0xff)) as u16
}

// ---- 32-bit formats ----

pub fn enc_rr(op1: u32, op2: u32, d: u32, s1: u32, s2: u32) -> u32 {
    ((d & 0xf) << 28) | ((op2 & 0xff) << 20) | ((s2 & 0xf) << 12) | ((s1 & 0xf) << 8) | (op1 & 0xff)
}

pub fn enc_rr2(op1: u32, op2: u32, d: u32, s1: u32, s2: u32) -> u32 {
    ((d & 0xf) << 28) | ((op2 & 0xfff) << 16) | ((s2 & 0xf) << 12) | ((s1 & 0xf) << 8) | (op1 & 0xff)
}

/// RR1 carries the multiplier shift `n` beside a 10-bit op2.
pub fn enc_rr1(op1: u32, op2: u32, d: u32, s1: u32, s2: u32, n: u32) -> u32 {
    ((d & 0xf) << 28)
        | ((op2 & 0x3ff) << 18)
        | ((n & 0x3) << 16)
        | ((s2 & 0xf) << 12)
        | ((s1 & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_rc(op1: u32, op2: u32, d: u32, s1: u32, const9: u32) -> u32 {
    ((d & 0xf) << 28) | ((op2 & 0x7f) << 21) | ((const9 & 0x1ff) << 12) | ((s1 & 0xf) << 8) | (op1 & 0xff)
}

pub fn enc_rlc(op1: u32, d: u32, s1: u32, const16: u32) -> u32 {
    ((d & 0xf) << 28) | ((const16 & 0xffff) << 12) | ((s1 & 0xf) << 8) | (op1 & 0xff)
}

/// `disp15` counts halfwords.
pub fn enc_brr(op1: u32, op2: u32, s1: u32, s2: u32, disp15: i32) -> u32 {
    ((op2 & 1) << 31)
        | ((disp15 as u32 & 0x7fff) << 16)
        | ((s2 & 0xf) << 12)
        | ((s1 & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_brc(op1: u32, op2: u32, s1: u32, const4: i32, disp15: i32) -> u32 {
    enc_brr(op1, op2, s1, const4 as u32 & 0xf, disp15)
}

pub fn enc_bo(op1: u32, op2: u32, s1d: u32, base: u32, off10: i32) -> u32 {
    let off = off10 as u32 & 0x3ff;
    ((off >> 6) << 28)
        | ((op2 & 0x3f) << 22)
        | ((off & 0x3f) << 16)
        | ((base & 0xf) << 12)
        | ((s1d & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_rrr(op1: u32, op2: u32, d: u32, s1: u32, s2: u32, s3: u32) -> u32 {
    ((d & 0xf) << 28)
        | ((s3 & 0xf) << 24)
        | ((op2 & 0xf) << 20)
        | ((s2 & 0xf) << 12)
        | ((s1 & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_rrr1(op1: u32, op2: u32, d: u32, s1: u32, s2: u32, s3: u32, n: u32) -> u32 {
    ((d & 0xf) << 28)
        | ((s3 & 0xf) << 24)
        | ((op2 & 0x3f) << 18)
        | ((n & 0x3) << 16)
        | ((s2 & 0xf) << 12)
        | ((s1 & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_rrr2(op1: u32, op2: u32, d: u32, s1: u32, s2: u32, s3: u32) -> u32 {
    ((d & 0xf) << 28)
        | ((s3 & 0xf) << 24)
        | ((op2 & 0xff) << 16)
        | ((s2 & 0xf) << 12)
        | ((s1 & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_rrpw(op1: u32, op2: u32, d: u32, s1: u32, s2: u32, pos: u32, width: u32) -> u32 {
    ((d & 0xf) << 28)
        | ((pos & 0x1f) << 23)
        | ((op2 & 0x3) << 21)
        | ((width & 0x1f) << 16)
        | ((s2 & 0xf) << 12)
        | ((s1 & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_rrrr(op1: u32, op2: u32, d: u32, s1: u32, s2: u32, s3: u32) -> u32 {
    ((d & 0xf) << 28)
        | ((s3 & 0xf) << 24)
        | ((op2 & 0x7) << 21)
        | ((s2 & 0xf) << 12)
        | ((s1 & 0xf) << 8)
        | (op1 & 0xff)
}

pub fn enc_sys(op1: u32, op2: u32, s1d: u32) -> u32 {
    ((op2 & 0x3f) << 22) | ((s1d & 0xf) << 8) | (op1 & 0xff)
}

/// A small program in RAM plus the machine that runs it. `halt` plants a
/// jump-to-self that stops [`Harness::run`].
pub struct Harness {
    pub cpu: Cpu,
    pub mem: LinearMemory,
    pub cfg: TranslateConfig,
    cursor: u32,
    halt: Option<u32>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(TranslateConfig::default())
    }

    pub fn with_config(cfg: TranslateConfig) -> Self {
        Self { cpu: Cpu::new(), mem: LinearMemory::new(0x10000), cfg, cursor: 0, halt: None }
    }

    pub fn pc(&self) -> u32 {
        self.cursor
    }

    pub fn org(&mut self, addr: u32) -> &mut Self {
        self.cursor = addr;
        self
    }

    pub fn emit16(&mut self, h: u16) -> &mut Self {
        self.mem.write_u16(self.cursor, h).unwrap();
        self.cursor += 2;
        self
    }

    pub fn emit32(&mut self, w: u32) -> &mut Self {
        self.mem.write_u32(self.cursor, w).unwrap();
        self.cursor += 4;
        self
    }

    pub fn halt(&mut self) -> &mut Self {
        self.halt = Some(self.cursor);
        // J +0
        self.emit16(enc_sb(0x3c, 0))
    }

    /// Runs blocks from address 0 until the halt address or a trap.
    pub fn run(&mut self) -> Exit {
        self.cpu.pc = 0;
        for _ in 0..1000 {
            let exit = step(&mut self.cpu, &mut self.mem, &self.cfg).unwrap();
            match exit {
                Exit::Jump(pc) if Some(pc) == self.halt => return exit,
                Exit::Trap(_) => return exit,
                Exit::Jump(_) => {}
            }
        }
        panic!("program did not halt, pc {:#x}", self.cpu.pc);
    }

    pub fn psw(&self) -> PswFlags {
        PswFlags::from_bits_truncate(self.cpu.psw_read())
    }
}
