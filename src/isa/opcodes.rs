//! Primary and secondary opcode values.
//!
//! `op16` / `op32` hold major opcodes (bits 0..7). The remaining modules hold
//! secondary opcode values, one module per major opcode group.

pub mod op16 {
    pub const SR_SYSTEM: u32 = 0x00;
    pub const SR_ACCU: u32 = 0x32;
    pub const SRC_ADD: u32 = 0xc2;
    pub const SRC_ADD_A15: u32 = 0x92;
    pub const SRC_ADD_15A: u32 = 0x9a;
    pub const SRR_ADD: u32 = 0x42;
    pub const SRR_ADD_A15: u32 = 0x12;
    pub const SRR_ADD_15A: u32 = 0x1a;
    pub const SRC_ADD_A: u32 = 0xb0;
    pub const SRR_ADD_A: u32 = 0x30;
    pub const SRR_ADDS: u32 = 0x22;
    pub const SRRS_ADDSC_A: u32 = 0x10;
    pub const SC_AND: u32 = 0x16;
    pub const SRR_AND: u32 = 0x26;
    pub const SC_BISR: u32 = 0xe0;
    pub const SRC_CADD: u32 = 0x8a;
    pub const SRC_CADDN: u32 = 0xca;
    pub const SB_CALL: u32 = 0x5c;
    pub const SRC_CMOV: u32 = 0xaa;
    pub const SRR_CMOV: u32 = 0x2a;
    pub const SRC_CMOVN: u32 = 0xea;
    pub const SRR_CMOVN: u32 = 0x6a;
    pub const SRC_EQ: u32 = 0xba;
    pub const SRR_EQ: u32 = 0x3a;
    pub const SB_J: u32 = 0x3c;
    pub const SBC_JEQ: u32 = 0x1e;
    pub const SBC_JEQ2: u32 = 0x9e;
    pub const SBR_JEQ: u32 = 0x3e;
    pub const SBR_JEQ2: u32 = 0xbe;
    pub const SBR_JGEZ: u32 = 0xce;
    pub const SBR_JGTZ: u32 = 0x4e;
    pub const SR_JI: u32 = 0xdc;
    pub const SBR_JLEZ: u32 = 0x8e;
    pub const SBR_JLTZ: u32 = 0x0e;
    pub const SBC_JNE: u32 = 0x5e;
    pub const SBC_JNE2: u32 = 0xde;
    pub const SBR_JNE: u32 = 0x7e;
    pub const SBR_JNE2: u32 = 0xfe;
    pub const SB_JNZ: u32 = 0xee;
    pub const SBR_JNZ: u32 = 0xf6;
    pub const SBR_JNZ_A: u32 = 0x7c;
    pub const SBRN_JNZ_T: u32 = 0xae;
    pub const SB_JZ: u32 = 0x6e;
    pub const SBR_JZ: u32 = 0x76;
    pub const SBR_JZ_A: u32 = 0xbc;
    pub const SBRN_JZ_T: u32 = 0x2e;
    pub const SC_LD_A: u32 = 0xd8;
    pub const SLR_LD_A: u32 = 0xd4;
    pub const SLR_LD_A_POSTINC: u32 = 0xc4;
    pub const SLRO_LD_A: u32 = 0xc8;
    pub const SRO_LD_A: u32 = 0xcc;
    pub const SLR_LD_BU: u32 = 0x14;
    pub const SLR_LD_BU_POSTINC: u32 = 0x04;
    pub const SLRO_LD_BU: u32 = 0x08;
    pub const SRO_LD_BU: u32 = 0x0c;
    pub const SLR_LD_H: u32 = 0x94;
    pub const SLR_LD_H_POSTINC: u32 = 0x84;
    pub const SLRO_LD_H: u32 = 0x88;
    pub const SRO_LD_H: u32 = 0x8c;
    pub const SC_LD_W: u32 = 0x58;
    pub const SLR_LD_W: u32 = 0x54;
    pub const SLR_LD_W_POSTINC: u32 = 0x44;
    pub const SLRO_LD_W: u32 = 0x48;
    pub const SRO_LD_W: u32 = 0x4c;
    pub const SBR_LOOP: u32 = 0xfc;
    pub const SRC_LT: u32 = 0xfa;
    pub const SRR_LT: u32 = 0x7a;
    pub const SC_MOV: u32 = 0xda;
    pub const SRC_MOV: u32 = 0x82;
    pub const SRR_MOV: u32 = 0x02;
    pub const SRC_MOV_E: u32 = 0xd2;
    pub const SRC_MOV_A: u32 = 0xa0;
    pub const SRR_MOV_A: u32 = 0x60;
    pub const SRR_MOV_AA: u32 = 0x40;
    pub const SRR_MOV_D: u32 = 0x80;
    pub const SRR_MUL: u32 = 0xe2;
    pub const SR_NOT: u32 = 0x46;
    pub const SC_OR: u32 = 0x96;
    pub const SRR_OR: u32 = 0xa6;
    pub const SRC_SH: u32 = 0x06;
    pub const SRC_SHA: u32 = 0x86;
    pub const SC_ST_A: u32 = 0xf8;
    pub const SRO_ST_A: u32 = 0xec;
    pub const SSR_ST_A: u32 = 0xf4;
    pub const SSR_ST_A_POSTINC: u32 = 0xe4;
    pub const SSRO_ST_A: u32 = 0xe8;
    pub const SRO_ST_B: u32 = 0x2c;
    pub const SSR_ST_B: u32 = 0x34;
    pub const SSR_ST_B_POSTINC: u32 = 0x24;
    pub const SSRO_ST_B: u32 = 0x28;
    pub const SRO_ST_H: u32 = 0xac;
    pub const SSR_ST_H: u32 = 0xb4;
    pub const SSR_ST_H_POSTINC: u32 = 0xa4;
    pub const SSRO_ST_H: u32 = 0xa8;
    pub const SC_ST_W: u32 = 0x78;
    pub const SRO_ST_W: u32 = 0x6c;
    pub const SSR_ST_W: u32 = 0x74;
    pub const SSR_ST_W_POSTINC: u32 = 0x64;
    pub const SSRO_ST_W: u32 = 0x68;
    pub const SRR_SUB: u32 = 0xa2;
    pub const SRR_SUB_A15B: u32 = 0x52;
    pub const SRR_SUB_15AB: u32 = 0x5a;
    pub const SC_SUB_A: u32 = 0x20;
    pub const SRR_SUBS: u32 = 0x62;
    pub const SRR_XOR: u32 = 0xc6;
}

/// SR system group (op2 in bits 12..15).
pub mod sr_system {
    pub const NOP: u32 = 0x00;
    pub const RET: u32 = 0x09;
    pub const RFE: u32 = 0x08;
    pub const DEBUG: u32 = 0x0a;
    pub const FRET: u32 = 0x07;
}

pub mod sr_accu {
    pub const RSUB: u32 = 0x05;
    pub const SAT_B: u32 = 0x00;
    pub const SAT_BU: u32 = 0x01;
    pub const SAT_H: u32 = 0x02;
    pub const SAT_HU: u32 = 0x03;
}

pub mod op32 {
    pub const ABS_LDW: u32 = 0x85;
    pub const ABS_LDB: u32 = 0x05;
    pub const ABS_LDMST_SWAP: u32 = 0xe5;
    pub const ABS_LDST_CONTEXT: u32 = 0x15;
    pub const ABS_STORE: u32 = 0xa5;
    pub const ABS_STOREB_H: u32 = 0x25;
    pub const ABS_STOREQ: u32 = 0x65;
    pub const ABS_LD_Q: u32 = 0x45;
    pub const ABS_LEA_LHA: u32 = 0xc5;
    pub const ABSB_ST_T: u32 = 0xd5;
    pub const B_CALL: u32 = 0x6d;
    pub const B_CALLA: u32 = 0xed;
    pub const B_FCALL: u32 = 0x61;
    pub const B_FCALLA: u32 = 0xe1;
    pub const B_J: u32 = 0x1d;
    pub const B_JA: u32 = 0x9d;
    pub const B_JL: u32 = 0x5d;
    pub const B_JLA: u32 = 0xdd;
    pub const BIT_ANDACC: u32 = 0x47;
    pub const BIT_LOGICAL_T1: u32 = 0x87;
    pub const BIT_INSERT: u32 = 0x67;
    pub const BIT_LOGICAL_T2: u32 = 0x07;
    pub const BIT_ORAND: u32 = 0xc7;
    pub const BIT_SH_LOGIC1: u32 = 0x27;
    pub const BIT_SH_LOGIC2: u32 = 0xa7;
    pub const BO_ADDRMODE_POST_PRE_BASE: u32 = 0x89;
    pub const BO_ADDRMODE_BITREVERSE_CIRCULAR: u32 = 0xa9;
    pub const BO_ADDRMODE_LD_POST_PRE_BASE: u32 = 0x09;
    pub const BO_ADDRMODE_LD_BITREVERSE_CIRCULAR: u32 = 0x29;
    pub const BO_ADDRMODE_STCTX_POST_PRE_BASE: u32 = 0x49;
    pub const BO_ADDRMODE_LDMST_BITREVERSE_CIRCULAR: u32 = 0x69;
    pub const BOL_LD_A_LONGOFF: u32 = 0x99;
    pub const BOL_LD_W_LONGOFF: u32 = 0x19;
    pub const BOL_LEA_LONGOFF: u32 = 0xd9;
    pub const BOL_ST_W_LONGOFF: u32 = 0x59;
    pub const BOL_ST_A_LONGOFF: u32 = 0xb5;
    pub const BOL_LD_B_LONGOFF: u32 = 0x79;
    pub const BOL_LD_BU_LONGOFF: u32 = 0x39;
    pub const BOL_LD_H_LONGOFF: u32 = 0xc9;
    pub const BOL_LD_HU_LONGOFF: u32 = 0xb9;
    pub const BOL_ST_B_LONGOFF: u32 = 0xe9;
    pub const BOL_ST_H_LONGOFF: u32 = 0xf9;
    pub const BRC_EQ_NEQ: u32 = 0xdf;
    pub const BRC_GE: u32 = 0xff;
    pub const BRC_JLT: u32 = 0xbf;
    pub const BRC_JNE: u32 = 0x9f;
    pub const BRN_JTT: u32 = 0x6f;
    pub const BRR_EQ_NEQ: u32 = 0x5f;
    pub const BRR_ADDR_EQ_NEQ: u32 = 0x7d;
    pub const BRR_GE: u32 = 0x7f;
    pub const BRR_JLT: u32 = 0x3f;
    pub const BRR_JNE: u32 = 0x1f;
    pub const BRR_JNZ: u32 = 0xbd;
    pub const BRR_LOOP: u32 = 0xfd;
    pub const RC_LOGICAL_SHIFT: u32 = 0x8f;
    pub const RC_ACCUMULATOR: u32 = 0x8b;
    pub const RC_SERVICEROUTINE: u32 = 0xad;
    pub const RC_MUL: u32 = 0x53;
    pub const RCPW_MASK_INSERT: u32 = 0xb7;
    pub const RCR_COND_SELECT: u32 = 0xab;
    pub const RCR_MADD: u32 = 0x13;
    pub const RCR_MSUB: u32 = 0x33;
    pub const RCRR_INSERT: u32 = 0x97;
    pub const RCRW_MASK_INSERT: u32 = 0xd7;
    pub const RLC_ADDI: u32 = 0x1b;
    pub const RLC_ADDIH: u32 = 0x9b;
    pub const RLC_ADDIH_A: u32 = 0x11;
    pub const RLC_MFCR: u32 = 0x4d;
    pub const RLC_MOV: u32 = 0x3b;
    pub const RLC_MOV_64: u32 = 0xfb;
    pub const RLC_MOV_U: u32 = 0xbb;
    pub const RLC_MOV_H: u32 = 0x7b;
    pub const RLC_MOVH_A: u32 = 0x91;
    pub const RLC_MTCR: u32 = 0xcd;
    pub const RR_LOGICAL_SHIFT: u32 = 0x0f;
    pub const RR_ACCUMULATOR: u32 = 0x0b;
    pub const RR_ADDRESS: u32 = 0x01;
    pub const RR_DIVIDE: u32 = 0x4b;
    pub const RR_IDIRECT: u32 = 0x2d;
    pub const RR1_MUL: u32 = 0xb3;
    pub const RR1_MULQ: u32 = 0x93;
    pub const RR2_MUL: u32 = 0x73;
    pub const RRPW_EXTRACT_INSERT: u32 = 0x37;
    pub const RRPW_DEXTR: u32 = 0x77;
    pub const RRR_COND_SELECT: u32 = 0x2b;
    pub const RRR_DIVIDE: u32 = 0x6b;
    pub const RRR1_MADD: u32 = 0x83;
    pub const RRR1_MADDQ_H: u32 = 0x43;
    pub const RRR1_MADDSU_H: u32 = 0xc3;
    pub const RRR1_MSUB_H: u32 = 0xa3;
    pub const RRR1_MSUB_Q: u32 = 0x63;
    pub const RRR1_MSUBAD_H: u32 = 0xe3;
    pub const RRR2_MADD: u32 = 0x03;
    pub const RRR2_MSUB: u32 = 0x23;
    pub const RRRR_EXTRACT_INSERT: u32 = 0x17;
    pub const RRRW_EXTRACT_INSERT: u32 = 0x57;
    pub const SYS_INTERRUPTS: u32 = 0x0d;
    pub const SYS_RSTV: u32 = 0x2f;
}

pub mod abs_ldw {
    pub const LD_A: u32 = 0x02;
    pub const LD_D: u32 = 0x01;
    pub const LD_DA: u32 = 0x03;
    pub const LD_W: u32 = 0x00;
}

pub mod abs_ldb {
    pub const LD_B: u32 = 0x00;
    pub const LD_BU: u32 = 0x01;
    pub const LD_H: u32 = 0x02;
    pub const LD_HU: u32 = 0x03;
}

pub mod abs_ldmst_swap {
    pub const LDMST: u32 = 0x01;
    pub const SWAP_W: u32 = 0x00;
}

pub mod abs_ldst_context {
    pub const LDLCX: u32 = 0x02;
    pub const LDUCX: u32 = 0x03;
    pub const STLCX: u32 = 0x00;
    pub const STUCX: u32 = 0x01;
}

pub mod abs_store {
    pub const ST_A: u32 = 0x02;
    pub const ST_D: u32 = 0x01;
    pub const ST_DA: u32 = 0x03;
    pub const ST_W: u32 = 0x00;
}

pub mod abs_storeb_h {
    pub const ST_B: u32 = 0x00;
    pub const ST_H: u32 = 0x02;
}

pub mod abs_ld_q {
    pub const LD_Q: u32 = 0x00;
}

pub mod abs_storeq {
    pub const ST_Q: u32 = 0x00;
}

pub mod absb {
    pub const ST_T: u32 = 0x00;
}

pub mod abs_lea_lha {
    pub const LEA: u32 = 0x00;
    pub const LHA: u32 = 0x01;
}

/// Shared by the BIT accumulate groups: AND.*.T, OR.*.T, SH.*.T.
pub mod bit_acc {
    pub const AND: u32 = 0x00;
    pub const OR: u32 = 0x01;
    pub const NOR: u32 = 0x02;
    pub const ANDN: u32 = 0x03;
}

pub mod bit_logical_t2 {
    pub const NAND: u32 = 0x00;
    pub const ORN: u32 = 0x01;
    pub const XNOR: u32 = 0x02;
    pub const XOR: u32 = 0x03;
}

pub mod bit_insert {
    pub const INS_T: u32 = 0x00;
    pub const INSN_T: u32 = 0x01;
}

/// BO addressing mode, bits 4..5 of op2. The first three apply to the
/// 0x09/0x49/0x89 groups, the last two to 0x29/0x69/0xa9.
pub mod bo_mode {
    pub const POSTINC: u32 = 0x0;
    pub const PREINC: u32 = 0x1;
    pub const SHORTOFF: u32 = 0x2;
    pub const BITREVERSE: u32 = 0x0;
    pub const CIRCULAR: u32 = 0x1;
}

/// BO store kinds, bits 0..3 of op2.
pub mod bo_store {
    pub const ST_B: u32 = 0x0;
    pub const ST_H: u32 = 0x2;
    pub const ST_W: u32 = 0x4;
    pub const ST_D: u32 = 0x5;
    pub const ST_A: u32 = 0x6;
    pub const ST_DA: u32 = 0x7;
    pub const ST_Q: u32 = 0x8;
    pub const CACHEI_W: u32 = 0xb;
    pub const CACHEA_W: u32 = 0xc;
    pub const CACHEA_WI: u32 = 0xd;
    pub const CACHEA_I: u32 = 0xe;
    pub const CACHEI_WI: u32 = 0xf;
}

pub mod bo_load {
    pub const LD_B: u32 = 0x0;
    pub const LD_BU: u32 = 0x1;
    pub const LD_H: u32 = 0x2;
    pub const LD_HU: u32 = 0x3;
    pub const LD_W: u32 = 0x4;
    pub const LD_D: u32 = 0x5;
    pub const LD_A: u32 = 0x6;
    pub const LD_DA: u32 = 0x7;
    pub const LD_Q: u32 = 0x8;
}

/// Read-modify-write and context kinds of the 0x49/0x69 groups. The
/// context transfers and LEA exist in short-offset mode only.
pub mod bo_rmw {
    pub const SWAP_W: u32 = 0x0;
    pub const LDMST: u32 = 0x1;
    pub const SWAPMSK_W: u32 = 0x2;
    pub const CMPSWAP_W: u32 = 0x3;
    pub const LDLCX: u32 = 0x4;
    pub const LDUCX: u32 = 0x5;
    pub const STLCX: u32 = 0x6;
    pub const STUCX: u32 = 0x7;
    pub const LEA: u32 = 0x8;
}

/// Bit 31 of the BRC/BRR/BRN encodings.
pub mod branch_op2 {
    pub const JEQ: u32 = 0;
    pub const JNE: u32 = 1;
    pub const JGE: u32 = 0;
    pub const JGE_U: u32 = 1;
    pub const JLT: u32 = 0;
    pub const JLT_U: u32 = 1;
    pub const JNEI: u32 = 0;
    pub const JNED: u32 = 1;
    pub const JEQ_A: u32 = 0;
    pub const JNE_A: u32 = 1;
    pub const JZ_A: u32 = 0;
    pub const JNZ_A: u32 = 1;
    pub const LOOP: u32 = 0;
    pub const LOOPU: u32 = 1;
    pub const JZ_T: u32 = 0;
    pub const JNZ_T: u32 = 1;
}

pub mod rc_logical_shift {
    pub const AND: u32 = 0x08;
    pub const ANDN: u32 = 0x0e;
    pub const NAND: u32 = 0x09;
    pub const NOR: u32 = 0x0b;
    pub const OR: u32 = 0x0a;
    pub const ORN: u32 = 0x0f;
    pub const SH: u32 = 0x00;
    pub const SH_H: u32 = 0x40;
    pub const SHA: u32 = 0x01;
    pub const SHA_H: u32 = 0x41;
    pub const SHAS: u32 = 0x02;
    pub const XNOR: u32 = 0x0d;
    pub const XOR: u32 = 0x0c;
    pub const SHUFFLE: u32 = 0x07;
}

/// Compare-and-accumulate encodings match [`rr_accumulator`] and are
/// decoded through it.
pub mod rc_accumulator {
    pub const ABSDIF: u32 = 0x0e;
    pub const ABSDIFS: u32 = 0x0f;
    pub const ADD: u32 = 0x00;
    pub const ADDC: u32 = 0x05;
    pub const ADDS: u32 = 0x02;
    pub const ADDS_U: u32 = 0x03;
    pub const ADDX: u32 = 0x04;
    pub const EQANY_B: u32 = 0x56;
    pub const EQANY_H: u32 = 0x76;
    pub const MAX: u32 = 0x1a;
    pub const MAX_U: u32 = 0x1b;
    pub const MIN: u32 = 0x18;
    pub const MIN_U: u32 = 0x19;
    pub const RSUB: u32 = 0x08;
    pub const RSUBS: u32 = 0x0a;
    pub const RSUBS_U: u32 = 0x0b;
}

pub mod rc_serviceroutine {
    pub const BISR: u32 = 0x00;
    pub const SYSCALL: u32 = 0x04;
}

/// RC.MUL, RRR2.MADD and RRR2.MSUB share the width/signedness layout of their
/// low nibble; only the RC encodings are listed here.
pub mod rc_mul {
    pub const MUL_32: u32 = 0x01;
    pub const MUL_64: u32 = 0x03;
    pub const MULS_32: u32 = 0x05;
    pub const MUL_U_64: u32 = 0x02;
    pub const MULS_U_32: u32 = 0x04;
}

pub mod rcpw {
    pub const IMASK: u32 = 0x01;
    pub const INSERT: u32 = 0x00;
}

pub mod rcr_cond_select {
    pub const CADD: u32 = 0x00;
    pub const CADDN: u32 = 0x01;
    pub const SEL: u32 = 0x04;
    pub const SELN: u32 = 0x05;
}

/// RCR.MADD and RCR.MSUB.
pub mod rcr_mac {
    pub const MAC_32: u32 = 0x01;
    pub const MAC_64: u32 = 0x03;
    pub const MACS_32: u32 = 0x05;
    pub const MACS_64: u32 = 0x07;
    pub const MAC_U_64: u32 = 0x02;
    pub const MACS_U_32: u32 = 0x04;
    pub const MACS_U_64: u32 = 0x06;
}

pub mod rcrr {
    pub const INSERT: u32 = 0x00;
}

pub mod rcrw {
    pub const IMASK: u32 = 0x01;
    pub const INSERT: u32 = 0x00;
}

pub mod rr_logical_shift {
    pub const AND: u32 = 0x08;
    pub const ANDN: u32 = 0x0e;
    pub const CLO: u32 = 0x1c;
    pub const CLO_H: u32 = 0x7d;
    pub const CLS: u32 = 0x1d;
    pub const CLS_H: u32 = 0x7e;
    pub const CLZ: u32 = 0x1b;
    pub const CLZ_H: u32 = 0x7c;
    pub const NAND: u32 = 0x09;
    pub const NOR: u32 = 0x0b;
    pub const OR: u32 = 0x0a;
    pub const ORN: u32 = 0x0f;
    pub const SH: u32 = 0x00;
    pub const SH_H: u32 = 0x40;
    pub const SHA: u32 = 0x01;
    pub const SHA_H: u32 = 0x41;
    pub const SHAS: u32 = 0x02;
    pub const XNOR: u32 = 0x0d;
    pub const XOR: u32 = 0x0c;
}

pub mod rr_accumulator {
    pub const ABS: u32 = 0x1c;
    pub const ABS_B: u32 = 0x5c;
    pub const ABS_H: u32 = 0x7c;
    pub const ABSDIF: u32 = 0x0e;
    pub const ABSDIF_B: u32 = 0x4e;
    pub const ABSDIF_H: u32 = 0x6e;
    pub const ABSDIFS: u32 = 0x0f;
    pub const ABSDIFS_H: u32 = 0x6f;
    pub const ABSS: u32 = 0x1d;
    pub const ABSS_H: u32 = 0x7d;
    pub const ADD: u32 = 0x00;
    pub const ADD_B: u32 = 0x40;
    pub const ADD_H: u32 = 0x60;
    pub const ADDC: u32 = 0x05;
    pub const ADDS: u32 = 0x02;
    pub const ADDS_H: u32 = 0x62;
    pub const ADDS_HU: u32 = 0x63;
    pub const ADDS_U: u32 = 0x03;
    pub const ADDX: u32 = 0x04;
    pub const AND_EQ: u32 = 0x20;
    pub const AND_GE: u32 = 0x24;
    pub const AND_GE_U: u32 = 0x25;
    pub const AND_LT: u32 = 0x22;
    pub const AND_LT_U: u32 = 0x23;
    pub const AND_NE: u32 = 0x21;
    pub const EQ: u32 = 0x10;
    pub const EQ_B: u32 = 0x50;
    pub const EQ_H: u32 = 0x70;
    pub const EQ_W: u32 = 0x90;
    pub const EQANY_B: u32 = 0x56;
    pub const EQANY_H: u32 = 0x76;
    pub const GE: u32 = 0x14;
    pub const GE_U: u32 = 0x15;
    pub const LT: u32 = 0x12;
    pub const LT_U: u32 = 0x13;
    pub const LT_B: u32 = 0x52;
    pub const LT_BU: u32 = 0x53;
    pub const LT_H: u32 = 0x72;
    pub const LT_HU: u32 = 0x73;
    pub const LT_W: u32 = 0x92;
    pub const LT_WU: u32 = 0x93;
    pub const MAX: u32 = 0x1a;
    pub const MAX_U: u32 = 0x1b;
    pub const MAX_B: u32 = 0x5a;
    pub const MAX_BU: u32 = 0x5b;
    pub const MAX_H: u32 = 0x7a;
    pub const MAX_HU: u32 = 0x7b;
    pub const MIN: u32 = 0x18;
    pub const MIN_U: u32 = 0x19;
    pub const MIN_B: u32 = 0x58;
    pub const MIN_BU: u32 = 0x59;
    pub const MIN_H: u32 = 0x78;
    pub const MIN_HU: u32 = 0x79;
    pub const MOV: u32 = 0x1f;
    pub const MOVS_64: u32 = 0x80;
    pub const MOV_64: u32 = 0x81;
    pub const NE: u32 = 0x11;
    pub const OR_EQ: u32 = 0x27;
    pub const OR_GE: u32 = 0x2b;
    pub const OR_GE_U: u32 = 0x2c;
    pub const OR_LT: u32 = 0x29;
    pub const OR_LT_U: u32 = 0x2a;
    pub const OR_NE: u32 = 0x28;
    pub const SAT_B: u32 = 0x5e;
    pub const SAT_BU: u32 = 0x5f;
    pub const SAT_H: u32 = 0x7e;
    pub const SAT_HU: u32 = 0x7f;
    pub const SH_EQ: u32 = 0x37;
    pub const SH_GE: u32 = 0x3b;
    pub const SH_GE_U: u32 = 0x3c;
    pub const SH_LT: u32 = 0x39;
    pub const SH_LT_U: u32 = 0x3a;
    pub const SH_NE: u32 = 0x38;
    pub const SUB: u32 = 0x08;
    pub const SUB_B: u32 = 0x48;
    pub const SUB_H: u32 = 0x68;
    pub const SUBC: u32 = 0x0d;
    pub const SUBS: u32 = 0x0a;
    pub const SUBS_U: u32 = 0x0b;
    pub const SUBS_H: u32 = 0x6a;
    pub const SUBS_HU: u32 = 0x6b;
    pub const SUBX: u32 = 0x0c;
    pub const XOR_EQ: u32 = 0x2f;
    pub const XOR_GE: u32 = 0x33;
    pub const XOR_GE_U: u32 = 0x34;
    pub const XOR_LT: u32 = 0x31;
    pub const XOR_LT_U: u32 = 0x32;
    pub const XOR_NE: u32 = 0x30;
}

pub mod rr_address {
    pub const ADD_A: u32 = 0x01;
    pub const ADDSC_A: u32 = 0x60;
    pub const ADDSC_AT: u32 = 0x62;
    pub const EQ_A: u32 = 0x40;
    pub const EQZ: u32 = 0x48;
    pub const GE_A: u32 = 0x43;
    pub const LT_A: u32 = 0x42;
    pub const MOV_A: u32 = 0x63;
    pub const MOV_AA: u32 = 0x00;
    pub const MOV_D: u32 = 0x4c;
    pub const NE_A: u32 = 0x41;
    pub const NEZ_A: u32 = 0x49;
    pub const SUB_A: u32 = 0x02;
}

pub mod rr_divide {
    pub const BMERGE: u32 = 0x01;
    pub const BSPLIT: u32 = 0x09;
    pub const DVINIT_B: u32 = 0x5a;
    pub const DVINIT_BU: u32 = 0x4a;
    pub const DVINIT_H: u32 = 0x3a;
    pub const DVINIT_HU: u32 = 0x2a;
    pub const DVINIT: u32 = 0x1a;
    pub const DVINIT_U: u32 = 0x0a;
    pub const PARITY: u32 = 0x02;
    pub const UNPACK: u32 = 0x08;
    pub const POPCNT_W: u32 = 0x22;
    pub const DIV: u32 = 0x20;
    pub const DIV_U: u32 = 0x21;
    pub const CRC32: u32 = 0x03;
    // single-precision
    pub const CMP_F: u32 = 0x00;
    pub const MUL_F: u32 = 0x04;
    pub const DIV_F: u32 = 0x05;
    pub const UPDFL: u32 = 0x0c;
    pub const FTOI: u32 = 0x10;
    pub const FTOIZ: u32 = 0x13;
    pub const ITOF: u32 = 0x14;
    pub const UTOF: u32 = 0x16;
    pub const FTOUZ: u32 = 0x17;
    pub const QSEED_F: u32 = 0x19;
}

pub mod rr_idirect {
    pub const JI: u32 = 0x03;
    pub const JLI: u32 = 0x02;
    pub const CALLI: u32 = 0x00;
    pub const FCALLI: u32 = 0x01;
}

/// RR1.MUL (MUL.H / MULM.H / MULR.H). The low two bits select the pairing.
pub mod rr1_mul {
    pub const MUL_H_32: u32 = 0x18;
    pub const MULM_H_64: u32 = 0x1c;
    pub const MULR_H_16: u32 = 0x0c;
}

pub mod rr1_mulq {
    pub const MUL_Q_32: u32 = 0x02;
    pub const MUL_Q_64: u32 = 0x1b;
    pub const MUL_Q_32_L: u32 = 0x01;
    pub const MUL_Q_64_L: u32 = 0x19;
    pub const MUL_Q_32_U: u32 = 0x00;
    pub const MUL_Q_64_U: u32 = 0x18;
    pub const MUL_Q_32_LL: u32 = 0x05;
    pub const MUL_Q_32_UU: u32 = 0x04;
    pub const MULR_Q_32_L: u32 = 0x07;
    pub const MULR_Q_32_U: u32 = 0x06;
}

pub mod rr2_mul {
    pub const MUL_32: u32 = 0x0a;
    pub const MUL_64: u32 = 0x6a;
    pub const MULS_32: u32 = 0x8a;
    pub const MUL_U_64: u32 = 0x68;
    pub const MULS_U_32: u32 = 0x88;
}

pub mod rrpw {
    pub const EXTR: u32 = 0x02;
    pub const EXTR_U: u32 = 0x03;
    pub const IMASK: u32 = 0x01;
    pub const INSERT: u32 = 0x00;
}

pub mod rrr_cond_select {
    pub const CADD: u32 = 0x00;
    pub const CADDN: u32 = 0x01;
    pub const CSUB: u32 = 0x02;
    pub const CSUBN: u32 = 0x03;
    pub const SEL: u32 = 0x04;
    pub const SELN: u32 = 0x05;
}

pub mod rrr_divide {
    pub const DVADJ: u32 = 0x0d;
    pub const DVSTEP: u32 = 0x0f;
    pub const DVSTEP_U: u32 = 0x0e;
    pub const IXMAX: u32 = 0x0a;
    pub const IXMAX_U: u32 = 0x0b;
    pub const IXMIN: u32 = 0x08;
    pub const IXMIN_U: u32 = 0x09;
    pub const PACK: u32 = 0x00;
    pub const ADD_F: u32 = 0x02;
    pub const SUB_F: u32 = 0x03;
    pub const MADD_F: u32 = 0x06;
    pub const MSUB_F: u32 = 0x07;
}

/// Half-word MAC groups of RRR1 (MADD/MSUB/MADDSU/MSUBAD). Bits 2..5 of op2
/// pick the variant, bits 0..1 the half-word pairing.
pub mod rrr1_mac_h {
    pub const MAC_H: u32 = 0x18;
    pub const MACS_H: u32 = 0x38;
    pub const MACM_H: u32 = 0x1c;
    pub const MACMS_H: u32 = 0x3c;
    pub const MACR_H: u32 = 0x0c;
    pub const MACRS_H: u32 = 0x2c;
}

/// Q-format groups of RRR1 (MADDQ_H and MSUB_Q share these values).
pub mod rrr1_mac_q {
    pub const MAC_Q_32: u32 = 0x02;
    pub const MAC_Q_64: u32 = 0x1b;
    pub const MAC_Q_32_L: u32 = 0x01;
    pub const MAC_Q_64_L: u32 = 0x19;
    pub const MAC_Q_32_U: u32 = 0x00;
    pub const MAC_Q_64_U: u32 = 0x18;
    pub const MAC_Q_32_LL: u32 = 0x05;
    pub const MAC_Q_64_LL: u32 = 0x1d;
    pub const MAC_Q_32_UU: u32 = 0x04;
    pub const MAC_Q_64_UU: u32 = 0x1c;
    pub const MACS_Q_32: u32 = 0x22;
    pub const MACS_Q_64: u32 = 0x3b;
    pub const MACS_Q_32_L: u32 = 0x21;
    pub const MACS_Q_64_L: u32 = 0x39;
    pub const MACS_Q_32_U: u32 = 0x20;
    pub const MACS_Q_64_U: u32 = 0x38;
    pub const MACS_Q_32_LL: u32 = 0x25;
    pub const MACS_Q_64_LL: u32 = 0x3d;
    pub const MACS_Q_32_UU: u32 = 0x24;
    pub const MACS_Q_64_UU: u32 = 0x3c;
    pub const MACR_H_64_UL: u32 = 0x1e;
    pub const MACRS_H_64_UL: u32 = 0x3e;
    pub const MACR_Q_32_LL: u32 = 0x07;
    pub const MACR_Q_32_UU: u32 = 0x06;
    pub const MACRS_Q_32_LL: u32 = 0x27;
    pub const MACRS_Q_32_UU: u32 = 0x26;
}

/// RRR2.MADD and RRR2.MSUB.
pub mod rrr2_mac {
    pub const MAC_32: u32 = 0x0a;
    pub const MAC_64: u32 = 0x6a;
    pub const MACS_32: u32 = 0x8a;
    pub const MACS_64: u32 = 0xea;
    pub const MAC_U_64: u32 = 0x68;
    pub const MACS_U_32: u32 = 0x88;
    pub const MACS_U_64: u32 = 0xe8;
}

pub mod rrpw_dextr {
    pub const DEXTR: u32 = 0x00;
}

pub mod rrrr {
    pub const DEXTR: u32 = 0x04;
    pub const EXTR: u32 = 0x02;
    pub const EXTR_U: u32 = 0x03;
    pub const INSERT: u32 = 0x00;
}

pub mod rrrw {
    pub const EXTR: u32 = 0x02;
    pub const EXTR_U: u32 = 0x03;
    pub const IMASK: u32 = 0x01;
    pub const INSERT: u32 = 0x00;
}

pub mod sys_rstv {
    pub const RSTV: u32 = 0x00;
}

pub mod sys {
    pub const DEBUG: u32 = 0x04;
    pub const DISABLE: u32 = 0x0d;
    pub const DISABLE_D: u32 = 0x0f;
    pub const DSYNC: u32 = 0x12;
    pub const ENABLE: u32 = 0x0c;
    pub const ISYNC: u32 = 0x13;
    pub const NOP: u32 = 0x00;
    pub const RET: u32 = 0x06;
    pub const RFE: u32 = 0x07;
    pub const RFM: u32 = 0x05;
    pub const RSLCX: u32 = 0x09;
    pub const SVLCX: u32 = 0x08;
    pub const TRAPSV: u32 = 0x15;
    pub const TRAPV: u32 = 0x14;
    pub const RESTORE: u32 = 0x0e;
    pub const FRET: u32 = 0x03;
}
