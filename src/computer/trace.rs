use std::fmt;

use crate::computer::registers::REGISTER_COUNT;
use crate::computer::Computer;

/// Read-only snapshot of the machine between two instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub program_counter: usize,
    /// The opcode and the two bytes after it, `None` past the end of RAM.
    pub bytes: [Option<u8>; 3],
    pub registers: [u8; REGISTER_COUNT],
}

impl Computer {
    pub fn trace(&self) -> Trace {
        let pc = self.program_counter;
        let bytes = [0, 1, 2].map(|offset| self.ram.read(pc + offset).ok());

        Trace {
            program_counter: pc,
            bytes,
            registers: self.registers.as_array(),
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRACE: {:02X} |", self.program_counter)?;
        for byte in self.bytes {
            match byte {
                Some(byte) => write!(f, " {byte:02X}")?,
                None => write!(f, " --")?,
            }
        }
        write!(f, " |")?;
        for register in self.registers {
            write!(f, " {register:02X}")?;
        }
        Ok(())
    }
}
