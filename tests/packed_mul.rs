mod common;

use common::*;
use pretty_assertions::assert_eq;
use tricore_ir::runtime::PswFlags;

const RR1_MUL: u32 = 0xb3;
const RR1_MULQ: u32 = 0x93;
const RRR1_MADD: u32 = 0x83;
const RRR1_MSUB_H: u32 = 0xa3;
const RRR1_MADDQ_H: u32 = 0x43;

// low two bits: 0 UL, 1 LU, 2 LL, 3 UU
const MUL_H_LL: u32 = 0x1a;
const MUL_H_UU: u32 = 0x1b;
const MULR_H_LL: u32 = 0x0e;
const MAC_H_LL: u32 = 0x1a;
const MACS_H_LL: u32 = 0x3a;

const MUL_Q_32_LL: u32 = 0x05;
const MULR_Q_32_L: u32 = 0x07;
const MACR_Q_32_LL: u32 = 0x07;

#[test]
fn mul_h_multiplies_each_lane() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x0003_0002;
    h.cpu.d[1] = 5;
    // MUL.H E2, D0, D1LL, #0; MUL.H E4, D0, D1LL, #1
    h.emit32(enc_rr1(RR1_MUL, MUL_H_LL, 2, 0, 1, 0))
        .emit32(enc_rr1(RR1_MUL, MUL_H_LL, 4, 0, 1, 1))
        .halt();
    h.run();
    assert_eq!((h.cpu.d[2], h.cpu.d[3]), (10, 15));
    assert_eq!((h.cpu.d[4], h.cpu.d[5]), (20, 30));
    assert!(!h.psw().intersects(PswFlags::V | PswFlags::AV));
}

#[test]
fn mul_h_saturates_minus_one_squared() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x8000_8000;
    h.cpu.d[1] = 0x8000_8000;
    // MUL.H E2, D0, D1UU, #1
    h.emit32(enc_rr1(RR1_MUL, MUL_H_UU, 2, 0, 1, 1)).halt();
    h.run();
    assert_eq!((h.cpu.d[2], h.cpu.d[3]), (0x7fff_ffff, 0x7fff_ffff));
    let psw = h.psw();
    assert!(!psw.contains(PswFlags::V));
    assert!(psw.contains(PswFlags::AV | PswFlags::SAV));
}

#[test]
fn mulr_h_rounds_each_lane() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x4000_0001;
    h.cpu.d[1] = 0x0000_4000;
    // MULR.H D2, D0, D1LL, #1: the low lane product 0x8000 rounds up to 1
    h.emit32(enc_rr1(RR1_MUL, MULR_H_LL, 2, 0, 1, 1)).halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x2000_0001);
    assert!(!h.psw().contains(PswFlags::V));
}

#[test]
fn madd_h_and_msub_h_accumulate_per_lane() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x0003_0002;
    h.cpu.d[1] = 5;
    h.cpu.d[4] = 100;
    h.cpu.d[5] = 200;
    // MADD.H E2, E4, D0, D1LL, #0; MSUB.H E6, E4, D0, D1LL, #0
    h.emit32(enc_rrr1(RRR1_MADD, MAC_H_LL, 2, 0, 1, 4, 0))
        .emit32(enc_rrr1(RRR1_MSUB_H, MAC_H_LL, 6, 0, 1, 4, 0))
        .halt();
    h.run();
    assert_eq!((h.cpu.d[2], h.cpu.d[3]), (110, 215));
    assert_eq!((h.cpu.d[6], h.cpu.d[7]), (90, 185));
    assert!(!h.psw().contains(PswFlags::V));
}

#[test]
fn madds_h_clamps_the_overflowing_lane() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x0003_0002;
    h.cpu.d[1] = 5;
    h.cpu.d[4] = 0x7fff_fffa;
    h.cpu.d[5] = 200;
    // MADDS.H E2, E4, D0, D1LL, #0
    h.emit32(enc_rrr1(RRR1_MADD, MACS_H_LL, 2, 0, 1, 4, 0)).halt();
    h.run();
    assert_eq!((h.cpu.d[2], h.cpu.d[3]), (0x7fff_ffff, 215));
    assert!(h.psw().contains(PswFlags::V | PswFlags::SV));
}

#[test]
fn msubs_h_clamps_downwards() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x0003_0002;
    h.cpu.d[1] = 5;
    h.cpu.d[4] = 0x8000_0004;
    h.cpu.d[5] = 200;
    // MSUBS.H E2, E4, D0, D1LL, #0
    h.emit32(enc_rrr1(RRR1_MSUB_H, MACS_H_LL, 2, 0, 1, 4, 0)).halt();
    h.run();
    assert_eq!((h.cpu.d[2], h.cpu.d[3]), (0x8000_0000, 185));
    assert!(h.psw().contains(PswFlags::V));
}

#[test]
fn mul_q_minus_one_squared_saturates_without_overflow() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x8000;
    h.cpu.d[1] = 0x8000;
    // MUL.Q D2, D0L, D1L, #1
    h.emit32(enc_rr1(RR1_MULQ, MUL_Q_32_LL, 2, 0, 1, 1)).halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x7fff_ffff);
    let psw = h.psw();
    assert!(!psw.contains(PswFlags::V));
    assert!(psw.contains(PswFlags::AV));
}

#[test]
fn mulr_q_keeps_the_rounded_upper_half() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x8000;
    h.cpu.d[1] = 0x8000;
    h.cpu.d[4] = 0x4000;
    h.cpu.d[5] = 1;
    // MULR.Q D2, D0L, D1L, #1; MULR.Q D3, D4L, D5L, #1
    h.emit32(enc_rr1(RR1_MULQ, MULR_Q_32_L, 2, 0, 1, 1))
        .emit32(enc_rr1(RR1_MULQ, MULR_Q_32_L, 3, 4, 5, 1))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x7fff_0000);
    // 0x8000 + 0x8000 carries into the upper half
    assert_eq!(h.cpu.d[3], 0x0001_0000);
    assert!(!h.psw().contains(PswFlags::V));
}

#[test]
fn maddr_q_rounds_the_sum() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x4000;
    h.cpu.d[1] = 1;
    h.cpu.d[3] = 0x0001_0000;
    // MADDR.Q D2, D3, D0L, D1L, #1
    h.emit32(enc_rrr1(RRR1_MADDQ_H, MACR_Q_32_LL, 2, 0, 1, 3, 1)).halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x0002_0000);
    assert!(!h.psw().contains(PswFlags::V));
}

#[test]
fn maddr_q_overflow_sets_v() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x4000;
    h.cpu.d[1] = 0x4000;
    h.cpu.d[3] = 0x7fff_0000;
    // MADDR.Q D2, D3, D0L, D1L, #1
    h.emit32(enc_rrr1(RRR1_MADDQ_H, MACR_Q_32_LL, 2, 0, 1, 3, 1)).halt();
    h.run();
    assert!(h.psw().contains(PswFlags::V | PswFlags::SV));
}
