use ls8::compiler::{compiler, loader};
use ls8::computer::{Computer, Console};

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, WrapErr};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[command(name = "ls8", about = "Runs an 8-bit LS-8 program")]
struct Cli {
    /// Program to run: binary literals (.ls8) or assembly (.asm)
    program: PathBuf,
    #[arg(long)]
    /// Treat the program as assembly regardless of its extension
    asm: bool,
    #[arg(short, long)]
    /// Log a register dump before every instruction
    trace: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    /// Raise log verbosity (-v info, -vv debug)
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (cli.trace, cli.verbose) {
        (true, _) => LevelFilter::Trace,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    SimpleLogger::new().with_level(level).init()?;

    let source = fs::read_to_string(&cli.program)
        .wrap_err_with(|| format!("could not read {}", cli.program.display()))?;

    let is_asm = cli.asm || cli.program.extension().is_some_and(|ext| ext == "asm");
    let image = if is_asm {
        compiler::compile(&source).wrap_err("could not assemble program")?
    } else {
        loader::load(&source)
    };

    let mut computer = Computer::new();
    computer.load(&image).wrap_err("could not load program")?;
    computer.run(&mut Console::stdout())?;

    Ok(())
}
