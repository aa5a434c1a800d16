use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Little-endian guest memory as seen by code fetch and the interpreter.
pub trait Bus {
    fn read_u8(&mut self, addr: u32) -> Result<u8>;
    fn read_u16(&mut self, addr: u32) -> Result<u16>;
    fn read_u32(&mut self, addr: u32) -> Result<u32>;
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<()>;
    fn write_u16(&mut self, addr: u32, val: u16) -> Result<()>;
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<()>;
}

/// One contiguous RAM window at `base`. Accesses outside it fail.
#[derive(Clone, Serialize, Deserialize)]
pub struct LinearMemory {
    pub mem: Vec<u8>,
    pub base: u32,
}

impl LinearMemory {
    pub fn new(size: usize) -> Self {
        Self::at(0, size)
    }

    pub fn at(base: u32, size: usize) -> Self {
        Self { mem: vec![0; size], base }
    }

    /// Copies `bytes` to guest address `addr`.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) -> Result<()> {
        let off = self.offset(addr, bytes.len())?;
        self.mem[off..off + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn offset(&self, addr: u32, len: usize) -> Result<usize> {
        let off = addr.wrapping_sub(self.base) as usize;
        match off.checked_add(len) {
            Some(end) if addr >= self.base && end <= self.mem.len() => Ok(off),
            _ => bail!("access of {len} bytes at {addr:#010x} is outside memory"),
        }
    }

    fn bytes<const N: usize>(&self, addr: u32) -> Result<[u8; N]> {
        let off = self.offset(addr, N)?;
        let mut b = [0; N];
        b.copy_from_slice(&self.mem[off..off + N]);
        Ok(b)
    }

    fn store<const N: usize>(&mut self, addr: u32, b: [u8; N]) -> Result<()> {
        let off = self.offset(addr, N)?;
        self.mem[off..off + N].copy_from_slice(&b);
        Ok(())
    }
}

impl Bus for LinearMemory {
    fn read_u8(&mut self, addr: u32) -> Result<u8> {
        Ok(self.bytes::<1>(addr)?[0])
    }
    fn read_u16(&mut self, addr: u32) -> Result<u16> {
        self.bytes(addr).map(u16::from_le_bytes)
    }
    fn read_u32(&mut self, addr: u32) -> Result<u32> {
        self.bytes(addr).map(u32::from_le_bytes)
    }
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<()> {
        self.store(addr, [val])
    }
    fn write_u16(&mut self, addr: u32, val: u16) -> Result<()> {
        self.store(addr, val.to_le_bytes())
    }
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<()> {
        self.store(addr, val.to_le_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_window() {
        let mut m = LinearMemory::at(0xd000_0000, 16);
        m.write_u32(0xd000_0004, 0x1122_3344).unwrap();
        assert_eq!(m.read_u8(0xd000_0004).unwrap(), 0x44);
        assert_eq!(m.read_u16(0xd000_0006).unwrap(), 0x1122);
        assert!(m.read_u32(0xd000_000e).is_err());
        assert!(m.read_u8(0xcfff_ffff).is_err());
    }
}
