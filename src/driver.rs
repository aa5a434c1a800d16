//! Block translation: fetches instructions from a [`CodeSource`] and feeds
//! them through the [`Translator`] until something closes the block.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TranslateConfig;
use crate::ir::{Block, BlockBuilder, Terminator, TrapInfo};
use crate::isa::format::Length;
use crate::memory::Bus;
use crate::regfile::RegisterFile;
use crate::translate::{Flow, Translator};

/// Where instruction halfwords come from.
pub trait CodeSource {
    fn fetch_u16(&mut self, addr: u32) -> anyhow::Result<u16>;
}

impl<B: Bus + ?Sized> CodeSource for B {
    fn fetch_u16(&mut self, addr: u32) -> anyhow::Result<u16> {
        self.read_u16(addr)
    }
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("cannot fetch code at {pc:#010x}: {source}")]
    Fetch {
        pc: u32,
        #[source]
        source: anyhow::Error,
    },
}

/// Fetches one instruction, low halfword first.
fn fetch_insn<C: CodeSource + ?Sized>(code: &mut C, pc: u32) -> anyhow::Result<(u32, Length)> {
    let lo = code.fetch_u16(pc)?;
    let len = Length::of(lo);
    let word = match len {
        Length::Short => lo as u32,
        Length::Long => {
            let hi = code.fetch_u16(pc.wrapping_add(2))?;
            ((hi as u32) << 16) | lo as u32
        }
    };
    Ok((word, len))
}

#[derive(Debug, Clone, Copy)]
enum CloseReason {
    Terminator,
    Fault,
    Limit,
    Page,
    Fetch,
}

fn close(ir: BlockBuilder, end: u32, terminator: Terminator, reason: CloseReason) -> Block {
    debug!(start = ir.start(), end, insns = ir.guest_insns(), ?reason, "block closed");
    ir.finish(end, terminator)
}

/// Translates the block starting at `pc`.
///
/// The block ends at the first control transfer or fault, after
/// `cfg.max_insns` instructions, or before an instruction that would reach
/// into the next `cfg.page_size` page. Only a fetch failure at `pc` itself is
/// an error; later ones end the block with `Goto` to the unreadable address.
pub fn translate_block<C: CodeSource + ?Sized>(
    code: &mut C,
    pc: u32,
    cfg: &TranslateConfig,
) -> Result<Block, TranslateError> {
    let regs = RegisterFile::new(cfg);
    let mut ir = BlockBuilder::new(pc);
    let page_mask = !(cfg.page_size.max(4) - 1);
    let page = pc & page_mask;
    let max_insns = cfg.max_insns.max(1);
    let mut cur = pc;

    loop {
        let (word, len) = match fetch_insn(code, cur) {
            Ok(insn) => insn,
            Err(source) if ir.guest_insns() == 0 => return Err(TranslateError::Fetch { pc: cur, source }),
            Err(err) => {
                debug!(pc = cur, %err, "code fetch failed, ending block");
                return Ok(close(ir, cur, Terminator::Goto(cur), CloseReason::Fetch));
            }
        };
        let last_byte = cur.wrapping_add(len.bytes() - 1);
        if ir.guest_insns() > 0 && last_byte & page_mask != page {
            return Ok(close(ir, cur, Terminator::Goto(cur), CloseReason::Page));
        }
        debug!(pc = cur, word, ?len, "translate");

        let mark = ir.mark();
        let mut t = Translator::new(&mut ir, &regs, cfg, cur, word);
        let next = t.next_pc;
        let flow = t.translate();
        ir.count_guest_insn();
        match flow {
            Ok(Flow::Next) => {}
            Ok(Flow::End(term)) => return Ok(close(ir, next, term, CloseReason::Terminator)),
            Err(fault) => {
                ir.rollback(mark);
                let (class, tin) = fault.trap();
                warn!(pc = cur, word, %fault, "instruction faulted");
                let trap = Terminator::Trap(TrapInfo { class, tin, pc: cur });
                return Ok(close(ir, next, trap, CloseReason::Fault));
            }
        }

        cur = next;
        if ir.guest_insns() >= max_insns {
            return Ok(close(ir, cur, Terminator::Goto(cur), CloseReason::Limit));
        }
        if cur & page_mask != page {
            return Ok(close(ir, cur, Terminator::Goto(cur), CloseReason::Page));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TrapClass;
    use crate::memory::LinearMemory;

    fn mem_with(halfwords: &[u16]) -> LinearMemory {
        let mut m = LinearMemory::new(0x100);
        let bytes: Vec<u8> = halfwords.iter().flat_map(|h| h.to_le_bytes()).collect();
        m.load(0, &bytes).unwrap();
        m
    }

    #[test]
    fn straight_line_runs_to_the_limit() {
        // MOV D1, #5 repeated
        let mut m = mem_with(&[0x5182; 8]);
        let cfg = TranslateConfig { max_insns: 3, ..Default::default() };
        let b = translate_block(&mut m, 0, &cfg).unwrap();
        assert_eq!(b.guest_insns, 3);
        assert_eq!(b.end, 6);
        assert_eq!(b.terminator, Terminator::Goto(6));
    }

    #[test]
    fn illegal_opcode_rolls_back_to_a_trap() {
        // MOV D1, #5; then 16-bit opcode 0x18, which is unassigned
        let mut m = mem_with(&[0x5182, 0x0018]);
        let b = translate_block(&mut m, 0, &TranslateConfig::default()).unwrap();
        assert_eq!(b.guest_insns, 2);
        assert_eq!(b.insts.len(), 1);
        match b.terminator {
            Terminator::Trap(info) => {
                assert_eq!(info.class, TrapClass::Insn);
                assert_eq!(info.pc, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn first_fetch_failure_is_an_error() {
        let mut m = LinearMemory::new(4);
        assert!(matches!(
            translate_block(&mut m, 0x40, &TranslateConfig::default()),
            Err(TranslateError::Fetch { pc: 0x40, .. })
        ));
    }

    #[test]
    fn later_fetch_failure_ends_block() {
        let mut m = mem_with(&[0x5182]);
        m.mem.truncate(2);
        let b = translate_block(&mut m, 0, &TranslateConfig::default()).unwrap();
        assert_eq!(b.terminator, Terminator::Goto(2));
        assert_eq!(b.guest_insns, 1);
    }

    #[test]
    fn translation_outputs_are_send() {
        fn send<T: Send>() {}
        send::<Block>();
        send::<TranslateError>();
        send::<TranslateConfig>();
    }

    #[test]
    fn blocks_stop_at_page_boundary() {
        let mut m = mem_with(&[0x5182; 0x80]);
        let cfg = TranslateConfig { page_size: 0x10, ..Default::default() };
        let b = translate_block(&mut m, 0x0a, &cfg).unwrap();
        assert_eq!(b.end, 0x10);
        assert_eq!(b.guest_insns, 3);
    }
}
