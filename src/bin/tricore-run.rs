use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tricore_ir::{
    run_block, translate_block, Cpu, Exit, IsaVersion, LinearMemory, TranslateConfig,
};

fn parse_addr(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("bad address `{s}`: {e}"))
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Translate a raw TriCore image into IR blocks and optionally run them"
)]
struct Opts {
    /// Raw little-endian code image.
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Load address of the image.
    #[arg(short, long, value_parser = parse_addr, default_value = "0")]
    base: u32,
    /// First instruction; defaults to the load address.
    #[arg(short, long, value_parser = parse_addr)]
    entry: Option<u32>,
    /// Bytes of RAM mapped at the load address.
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    mem_size: usize,
    /// Translation settings as JSON; flags below override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(long)]
    isa: Option<IsaVersion>,
    #[arg(long)]
    max_insns: Option<u32>,
    /// Print each translated block as JSON.
    #[arg(long)]
    dump_ir: bool,
    /// Execute up to this many blocks on the reference interpreter.
    #[arg(long, value_name = "BLOCKS")]
    run: Option<u64>,
}

fn load_config(opts: &Opts) -> Result<TranslateConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => TranslateConfig::default(),
    };
    if let Some(isa) = opts.isa {
        cfg.isa = isa;
    }
    if let Some(n) = opts.max_insns {
        cfg.max_insns = n;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let cfg = load_config(&opts)?;

    let bytes = std::fs::read(&opts.input).with_context(|| format!("reading {}", opts.input.display()))?;
    let mut mem = LinearMemory::at(opts.base, opts.mem_size.max(bytes.len()));
    mem.load(opts.base, &bytes)?;

    let mut cpu = Cpu::new();
    cpu.reset(opts.entry.unwrap_or(opts.base));

    // Without --run, translate the entry block only.
    let blocks = opts.run.unwrap_or(1);
    for _ in 0..blocks {
        let block = translate_block(&mut mem, cpu.pc, &cfg)?;
        if opts.dump_ir {
            println!("{}", serde_json::to_string_pretty(&block)?);
        }
        if opts.run.is_none() {
            break;
        }
        match run_block(&mut cpu, &mut mem, &block)? {
            Exit::Jump(pc) => info!(pc, "next block"),
            Exit::Trap(trap) => {
                eprintln!("TRAP: {:?} tin {} at {:#010x}", trap.class, trap.tin, trap.pc);
                break;
            }
        }
    }

    if opts.run.is_some() {
        println!("{}", serde_json::to_string_pretty(&cpu)?);
    }
    Ok(())
}
