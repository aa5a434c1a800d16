//! Architecture-neutral micro-op IR.
//!
//! A translated block is a list of [`Inst`] over 32/64-bit values plus one
//! [`Terminator`]. Guest registers appear as [`Reg`] operands; everything
//! else lives in block-local [`Temp`]s.

mod block;
mod inst;
mod value;

pub use block::{tin, Block, BlockBuilder, Mark, Terminator, TrapClass, TrapInfo};
pub use inst::{BinOp, CacheOp, Cond, FloatOp, Helper, Inst, MemSize, UnOp};
pub use value::{imm, imm64, Dest, Flag, Reg, Temp, Ty, Value};
