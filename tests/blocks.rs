mod common;

use common::*;
use pretty_assertions::assert_eq;
use tricore_ir::ir::{FloatOp, Helper, Inst, Terminator};
use tricore_ir::{translate_block, run_block, Block, CodeSource, Cpu, ExecError, TranslateConfig, TranslateError};

/// Code served from a halfword slice, as a loader might before memory exists.
struct Rom {
    base: u32,
    halfwords: Vec<u16>,
}

impl CodeSource for Rom {
    fn fetch_u16(&mut self, addr: u32) -> anyhow::Result<u16> {
        let idx = (addr.wrapping_sub(self.base) / 2) as usize;
        self.halfwords
            .get(idx)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no code at {addr:#x}"))
    }
}

fn words(ws: &[u32]) -> Vec<u16> {
    ws.iter().flat_map(|w| [*w as u16, (w >> 16) as u16]).collect()
}

#[test]
fn conditional_branch_has_two_successors() {
    let mut rom = Rom {
        base: 0x8000_0000,
        // JEQ D0, D1, +8
        halfwords: words(&[enc_brr(0x5f, 0, 0, 1, 4)]),
    };
    let b = translate_block(&mut rom, 0x8000_0000, &TranslateConfig::default()).unwrap();
    assert_eq!(b.guest_insns, 1);
    assert_eq!(b.end, 0x8000_0004);
    assert_eq!(b.terminator.successors(), vec![0x8000_0008, 0x8000_0004]);
}

#[test]
fn unreadable_entry_is_a_fetch_error() {
    let mut rom = Rom { base: 0, halfwords: Vec::new() };
    let err = translate_block(&mut rom, 0x100, &TranslateConfig::default()).unwrap_err();
    assert!(matches!(err, TranslateError::Fetch { pc: 0x100, .. }));
}

#[test]
fn block_survives_json() {
    let mut rom = Rom {
        base: 0,
        halfwords: vec![enc_src(0x82, 1, 3), enc_src(0xc2, 1, 1), enc_sb(0x3c, 0)],
    };
    let b = translate_block(&mut rom, 0, &TranslateConfig::default()).unwrap();
    let text = serde_json::to_string(&b).unwrap();
    let back: Block = serde_json::from_str(&text).unwrap();
    assert_eq!(back, b);
    assert_eq!(back.terminator, Terminator::Goto(4));
}

#[test]
fn call_needs_a_context_model() {
    let mut rom = Rom {
        base: 0,
        // CALL +0x10
        halfwords: vec![enc_sb(0x5c, 8)],
    };
    let b = translate_block(&mut rom, 0, &TranslateConfig::default()).unwrap();
    assert!(b.insts.iter().any(|i| matches!(i, Inst::Call { helper: Helper::Call, .. })));
    assert_eq!(b.terminator, Terminator::Goto(0x10));

    let mut cpu = Cpu::new();
    let mut mem = tricore_ir::LinearMemory::new(0x20);
    assert!(matches!(
        run_block(&mut cpu, &mut mem, &b),
        Err(ExecError::UnsupportedHelper("call"))
    ));
}

#[test]
fn float_ops_are_named_helper_calls() {
    let mut rom = Rom {
        base: 0,
        // ADD.F D4, D1, D3; UPDFL D4
        halfwords: words(&[enc_rrr(0x6b, 0x02, 4, 1, 2, 3), enc_rr(0x4b, 0x0c, 0, 4, 0)]),
    };
    let b = translate_block(&mut rom, 0, &TranslateConfig::default()).unwrap();
    let helpers: Vec<Helper> = b
        .insts
        .iter()
        .filter_map(|i| match i {
            Inst::Call { helper, .. } => Some(*helper),
            _ => None,
        })
        .collect();
    assert_eq!(helpers, vec![Helper::Float(FloatOp::Add), Helper::Float(FloatOp::Updfl)]);

    let mut cpu = Cpu::new();
    let mut mem = tricore_ir::LinearMemory::new(0x20);
    assert!(matches!(
        run_block(&mut cpu, &mut mem, &b),
        Err(ExecError::UnsupportedHelper("fadd"))
    ));
}

#[test]
fn instruction_limit_splits_straight_line_code() {
    let mut h = Harness::with_config(TranslateConfig { max_insns: 2, ..Default::default() });
    for _ in 0..5 {
        h.emit16(enc_src(0xc2, 0, 1));
    }
    h.halt();
    h.run();
    assert_eq!(h.cpu.d[0], 5);
}
