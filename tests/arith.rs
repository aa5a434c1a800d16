mod common;

use common::*;
use pretty_assertions::assert_eq;
use tricore_ir::runtime::PswFlags;

const SRC_MOV: u32 = 0x82;
const SRC_ADD: u32 = 0xc2;
const RR_ACC: u32 = 0x0b;
const RLC_MOV_U: u32 = 0xbb;
const RLC_ADDIH: u32 = 0x9b;

#[test]
fn mov_then_add_immediate() {
    let mut h = Harness::new();
    h.emit16(enc_src(SRC_MOV, 3, 5))
        .emit16(enc_src(SRC_ADD, 3, -2))
        .emit32(enc_rlc(RLC_MOV_U, 4, 0, 0xbeef))
        .emit32(enc_rlc(RLC_ADDIH, 4, 4, 0xdead))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[3], 3);
    assert_eq!(h.cpu.d[4], 0xdead_beef);
}

#[test]
fn add_overflow_sets_sticky_flags() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x7fff_ffff;
    h.cpu.d[1] = 1;
    // ADD D2, D0, D1 overflows
    h.emit32(enc_rr(RR_ACC, 0x00, 2, 0, 1)).halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x8000_0000);
    assert_eq!(h.psw(), PswFlags::V | PswFlags::SV | PswFlags::AV | PswFlags::SAV);
}

#[test]
fn sticky_flags_survive_a_clean_add() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x7fff_ffff;
    h.cpu.d[1] = 1;
    h.emit32(enc_rr(RR_ACC, 0x00, 2, 0, 1))
        .emit32(enc_rr(RR_ACC, 0x00, 3, 1, 1))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[3], 2);
    assert_eq!(h.psw(), PswFlags::SV | PswFlags::SAV);
}

#[test]
fn saturating_add_clamps_and_flags() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x7fff_fff0;
    h.cpu.d[1] = 0x100;
    h.cpu.d[5] = 0xffff_fff0;
    // ADDS D2, D0, D1; ADDS.U D3, D5, D1
    h.emit32(enc_rr(RR_ACC, 0x02, 2, 0, 1))
        .emit32(enc_rr(RR_ACC, 0x03, 3, 5, 1))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x7fff_ffff);
    assert_eq!(h.cpu.d[3], 0xffff_ffff);
    assert!(h.psw().contains(PswFlags::V | PswFlags::SV));
}

#[test]
fn addx_and_addc_chain_a_carry() {
    let mut h = Harness::new();
    // 64-bit add of 0x1_ffff_ffff + 0x1
    h.cpu.d[0] = 0xffff_ffff;
    h.cpu.d[1] = 1;
    h.cpu.d[2] = 1;
    h.cpu.d[3] = 0;
    // ADDX D4, D0, D2; ADDC D5, D1, D3
    h.emit32(enc_rr(RR_ACC, 0x04, 4, 0, 2))
        .emit32(enc_rr(RR_ACC, 0x05, 5, 1, 3))
        .halt();
    h.run();
    assert_eq!(h.cpu.e(4), 0x2_0000_0000);
    assert_eq!(h.cpu.flags.c, 0);
}

#[test]
fn compare_accumulates_into_destination() {
    let mut h = Harness::new();
    h.cpu.d[0] = 3;
    h.cpu.d[1] = 7;
    h.cpu.d[2] = 0b10;
    // LT D4, D0, D1; SH.LT D2, D0, D1
    h.emit32(enc_rr(RR_ACC, 0x12, 4, 0, 1))
        .emit32(enc_rr(RR_ACC, 0x39, 2, 0, 1))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[4], 1);
    assert_eq!(h.cpu.d[2], 0b101);
}

#[test]
fn packed_halfword_add() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x0001_ffff;
    h.cpu.d[1] = 0x0002_0001;
    // ADD.H D2, D0, D1: lanes wrap independently
    h.emit32(enc_rr(RR_ACC, 0x60, 2, 0, 1)).halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x0003_0000);
}
