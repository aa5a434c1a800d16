pub mod bitfield;
pub mod config;
pub mod cpu;
pub mod driver;
pub mod fault;
pub mod helper;
pub mod interp;
pub mod ir;
pub mod memory;
pub mod regfile;
pub mod runtime;
pub mod translate;

pub mod isa {
    pub mod fields;
    pub mod format;
    pub mod opcodes;
}

pub use config::{IsaVersion, Privilege, TranslateConfig};
pub use cpu::Cpu;
pub use driver::{translate_block, CodeSource, TranslateError};
pub use fault::Fault;
pub use interp::{run_block, step, ExecError, Exit};
pub use ir::Block;
pub use memory::{Bus, LinearMemory};
