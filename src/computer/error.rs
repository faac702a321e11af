use std::{error, fmt, io};

/// Something an instruction handler ran into while executing.
#[derive(Debug)]
pub enum Fault {
    AddressOutOfRange(usize),
    InvalidRegister(u8),
    UnsupportedAluOperation(u8),
    Output(io::Error),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Fault::*;
        match self {
            AddressOutOfRange(address) => write!(f, "address {address:#04X} is out of range"),
            InvalidRegister(index) => write!(f, "register index {index} is out of range"),
            UnsupportedAluOperation(opcode) => {
                write!(f, "unsupported ALU operation {opcode:#010b}")
            }
            Output(err) => write!(f, "could not write output: {err}"),
        }
    }
}

impl error::Error for Fault {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Fault::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Fault::Output(err)
    }
}

/// Why the execution loop stopped before reaching HLT.
#[derive(Debug)]
pub enum RunError {
    /// No handler is registered for the byte at `pc`.
    UnknownInstruction { opcode: u8, pc: usize },
    /// The handler for `opcode` was found but failed.
    Fault { opcode: u8, pc: usize, fault: Fault },
    ProgramCounterOutOfRange(usize),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::UnknownInstruction { opcode, pc } => {
                write!(f, "unknown instruction {opcode:#010b} at {pc:#04X}")
            }
            RunError::Fault { opcode, pc, fault } => {
                write!(f, "instruction {opcode:#010b} at {pc:#04X} faulted: {fault}")
            }
            RunError::ProgramCounterOutOfRange(pc) => write!(f, "program counter {pc:#04X} is out of range"),
        }
    }
}

impl error::Error for RunError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            RunError::Fault { fault, .. } => Some(fault),
            _ => None,
        }
    }
}
