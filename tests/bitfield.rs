mod common;

use common::*;
use pretty_assertions::assert_eq;

const RRPW_EXTRACT_INSERT: u32 = 0x37;
const RRPW_DEXTR: u32 = 0x77;
const RRRR_EXTRACT_INSERT: u32 = 0x17;

const INSERT: u32 = 0x00;
const EXTR: u32 = 0x02;
const EXTR_U: u32 = 0x03;

#[test]
fn constant_extract_signed_and_unsigned() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x0000_0f80;
    h.emit32(enc_rrpw(RRPW_EXTRACT_INSERT, EXTR, 2, 0, 0, 4, 8))
        .emit32(enc_rrpw(RRPW_EXTRACT_INSERT, EXTR_U, 3, 0, 0, 4, 8))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0xffff_fff8);
    assert_eq!(h.cpu.d[3], 0xf8);
}

#[test]
fn constant_insert() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0xffff_ffff;
    h.cpu.d[1] = 0x5;
    h.emit32(enc_rrpw(RRPW_EXTRACT_INSERT, INSERT, 3, 0, 1, 8, 4)).halt();
    h.run();
    assert_eq!(h.cpu.d[3], 0xffff_f5ff);
}

#[test]
fn register_field_is_cut_at_bit_31() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0xabcd_0000;
    // E6 = {pos 24, width 16}: only 8 bits fit
    h.cpu.d[6] = 24;
    h.cpu.d[7] = 16;
    h.emit32(enc_rrrr(RRRR_EXTRACT_INSERT, EXTR_U, 5, 0, 0, 6)).halt();
    h.run();
    assert_eq!(h.cpu.d[5], 0xab);
}

#[test]
fn register_insert_matches_constant_insert() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x1234_5678;
    h.cpu.d[1] = 0xff;
    h.cpu.d[6] = 12;
    h.cpu.d[7] = 8;
    h.emit32(enc_rrrr(RRRR_EXTRACT_INSERT, INSERT, 4, 0, 1, 6))
        .emit32(enc_rrpw(RRPW_EXTRACT_INSERT, INSERT, 5, 0, 1, 12, 8))
        .halt();
    h.run();
    assert_eq!(h.cpu.d[4], 0x123f_f678);
    assert_eq!(h.cpu.d[5], h.cpu.d[4]);
}

#[test]
fn double_word_extract() {
    let mut h = Harness::new();
    h.cpu.d[0] = 0x1234_5678;
    h.cpu.d[1] = 0x9abc_def0;
    h.emit32(enc_rrpw(RRPW_DEXTR, 0, 2, 0, 1, 8, 0)).halt();
    h.run();
    assert_eq!(h.cpu.d[2], 0x3456_789a);
}
