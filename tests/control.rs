mod common;

use common::*;
use pretty_assertions::assert_eq;
use tricore_ir::ir::TrapClass;
use tricore_ir::{Exit, IsaVersion, Privilege, TranslateConfig};

const SRC_MOV: u32 = 0x82;
const SRC_ADD: u32 = 0xc2;
const BRR_EQ_NEQ: u32 = 0x5f;
const BRR_LOOP: u32 = 0xfd;
const BRC_JNE: u32 = 0x9f;
const RR_IDIRECT: u32 = 0x2d;
const RC_SERVICEROUTINE: u32 = 0xad;
const RLC_MTCR: u32 = 0xcd;
const RLC_MOV_64: u32 = 0xfb;
const ICR: u32 = 0xfe2c;

/// MOV D0,#5; MOV D1,#`d1`; JEQ D0,D1,skip; MOV D3,#1; skip: MOV D2,#2
fn jeq_program(d1: i32) -> Harness {
    let mut h = Harness::new();
    h.emit16(enc_src(SRC_MOV, 0, 5))
        .emit16(enc_src(SRC_MOV, 1, d1))
        // at 4, target 10
        .emit32(enc_brr(BRR_EQ_NEQ, 0, 0, 1, 3))
        .emit16(enc_src(SRC_MOV, 3, 1))
        .emit16(enc_src(SRC_MOV, 2, 2))
        .halt();
    h
}

#[test]
fn jeq_taken_skips_the_fallthrough() {
    let mut h = jeq_program(5);
    h.run();
    assert_eq!(h.cpu.d[2], 2);
    assert_eq!(h.cpu.d[3], 0);
}

#[test]
fn jeq_not_taken_falls_through() {
    let mut h = jeq_program(4);
    h.run();
    assert_eq!(h.cpu.d[2], 2);
    assert_eq!(h.cpu.d[3], 1);
}

#[test]
fn loop_runs_count_plus_one_times() {
    let mut h = Harness::new();
    h.cpu.a[2] = 3;
    h.emit16(enc_src(SRC_MOV, 0, 0))
        // 2: ADD D0,#1
        .emit16(enc_src(SRC_ADD, 0, 1))
        // 4: LOOP A2, 2
        .emit32(enc_brr(BRR_LOOP, 0, 0, 2, -1))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[0], 4);
    assert_eq!(h.cpu.a[2], u32::MAX);
}

#[test]
fn jned_counts_down_to_the_constant() {
    let mut h = Harness::new();
    h.cpu.d[4] = 6;
    h.emit16(enc_src(SRC_MOV, 0, 0))
        .emit16(enc_src(SRC_ADD, 0, 1))
        // 4: JNED D4, #2, 2
        .emit32(enc_brc(BRC_JNE, 1, 4, 2, -1))
        .halt();
    h.run();
    // D4 is compared before each decrement: 6, 5, 4, 3, 2
    assert_eq!(h.cpu.d[0], 5);
    assert_eq!(h.cpu.d[4], 1);
}

#[test]
fn indirect_jump_dispatches_through_pc() {
    let mut h = Harness::new();
    h.cpu.a[3] = 0x40;
    // JI A3
    h.emit32(enc_rr(RR_IDIRECT, 0x03, 0, 3, 0));
    h.emit16(enc_src(SRC_MOV, 1, 1));
    h.org(0x40).emit16(enc_src(SRC_MOV, 2, 7)).halt();
    h.run();
    assert_eq!(h.cpu.d[1], 0);
    assert_eq!(h.cpu.d[2], 7);
}

#[test]
fn syscall_traps_with_its_number() {
    let mut h = Harness::new();
    h.emit16(enc_src(SRC_MOV, 0, 1))
        .emit32(enc_rc(RC_SERVICEROUTINE, 0x04, 0, 0, 0x21))
        .halt();
    match h.run() {
        Exit::Trap(trap) => {
            assert_eq!(trap.class, TrapClass::Syscall);
            assert_eq!(trap.tin, 0x21);
            assert_eq!(trap.pc, 2);
        }
        other => panic!("expected a trap, got {other:?}"),
    }
    // the instruction before the trap still ran
    assert_eq!(h.cpu.d[0], 1);
    assert_eq!(h.cpu.pc, 2);
}

#[test]
fn user_mode_csfr_write_is_a_protection_trap() {
    let cfg = TranslateConfig { privilege: Privilege::User0, ..Default::default() };
    let mut h = Harness::with_config(cfg);
    h.cpu.d[1] = 0x8000;
    h.emit16(enc_src(SRC_MOV, 0, 3))
        .emit32(enc_rlc(RLC_MTCR, 0, 1, ICR))
        .halt();
    match h.run() {
        Exit::Trap(trap) => {
            assert_eq!(trap.class, TrapClass::Prot);
            assert_eq!(trap.pc, 2);
        }
        other => panic!("expected a trap, got {other:?}"),
    }
    assert_eq!(h.cpu.icr, 0);
    assert_eq!(h.cpu.d[0], 3);
}

#[test]
fn supervisor_csfr_write_lands_in_icr() {
    let mut h = Harness::new();
    h.cpu.d[1] = 0x8000;
    h.emit32(enc_rlc(RLC_MTCR, 0, 1, ICR)).halt();
    h.run();
    assert_eq!(h.cpu.icr, 0x8000);
}

#[test]
fn newer_instruction_traps_on_older_core() {
    let cfg = TranslateConfig { isa: IsaVersion::V1_3_1, ..Default::default() };
    let mut h = Harness::with_config(cfg);
    // MOV E2, #-1
    h.emit32(enc_rlc(RLC_MOV_64, 2, 0, 0xffff)).halt();
    match h.run() {
        Exit::Trap(trap) => assert_eq!(trap.class, TrapClass::Insn),
        other => panic!("expected a trap, got {other:?}"),
    }

    let mut h = Harness::new();
    h.emit32(enc_rlc(RLC_MOV_64, 2, 0, 0xffff)).halt();
    h.run();
    assert_eq!(h.cpu.e(2), u64::MAX);
}
