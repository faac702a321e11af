pub mod alu;
pub mod error;
mod instructions;
pub mod memory;
pub mod output;
pub mod registers;
pub mod trace;

use log::{debug, info, log_enabled, trace, Level};

use crate::compiler::instructions::OPCODE;
pub use error::{Fault, RunError};
use memory::Ram;
pub use output::{Console, Output};
use registers::Registers;

pub struct Computer {
    flag: bool,
    program_counter: usize,
    registers: Registers,
    running: bool,

    ram: Ram,
}

impl Computer {
    pub fn new() -> Computer {
        Computer {
            flag: false,
            program_counter: 0,
            registers: Registers::new(),
            running: true,
            ram: Ram::new(),
        }
    }

    pub fn load(&mut self, program: &[u8]) -> Result<(), Fault> {
        self.ram.load(program)
    }

    /// Fetches, decodes and executes the instruction at the program counter.
    /// Does nothing once the machine has halted.
    pub fn step(&mut self, output: &mut dyn Output) -> Result<(), RunError> {
        if !self.running {
            return Ok(());
        }

        let pc = self.program_counter;
        let opcode = self
            .ram
            .read(pc)
            .map_err(|_| RunError::ProgramCounterOutOfRange(pc))?;
        let instruction = *OPCODE
            .get(&opcode)
            .ok_or(RunError::UnknownInstruction { opcode, pc })?;

        self.execute(instruction, output)
            .map_err(|fault| RunError::Fault { opcode, pc, fault })
    }

    /// Runs until HLT. Any error halts the machine for good.
    pub fn run(&mut self, output: &mut dyn Output) -> Result<(), RunError> {
        while self.running {
            if log_enabled!(Level::Trace) {
                trace!("{}", self.trace());
            }

            if let Err(err) = self.step(output) {
                self.halt();
                debug!("stopped: {err}");
                return Err(err);
            }
        }

        info!("halted at {:#04X}", self.program_counter);
        Ok(())
    }

    pub fn halt(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn flag(&self) -> bool {
        self.flag
    }

    pub fn register(&self, index: u8) -> Result<u8, Fault> {
        self.registers.get(index)
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }
}

impl Default for Computer {
    fn default() -> Self {
        Computer::new()
    }
}
