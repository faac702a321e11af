use phf::phf_map;

/// Every instruction the machine understands. The discriminant is the
/// assembled opcode byte.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opcode {
    Add = 0xA0,
    Call = 0x50,
    Compare = 0xA7,
    Halt = 0x01,
    Jump = 0x54,
    JumpIfEqual = 0x55,
    JumpIfNotEqual = 0x56,
    LoadImmediate = 0x82,
    Multiply = 0xA2,
    Pop = 0x46,
    Print = 0x47,
    Push = 0x45,
    Return = 0x11,
}

/// Kind of byte an operand slot holds in the assembled program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Register,
    Immediate,
}

impl Opcode {
    pub fn byte(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Call => "CALL",
            Opcode::Compare => "CMP",
            Opcode::Halt => "HLT",
            Opcode::Jump => "JMP",
            Opcode::JumpIfEqual => "JEQ",
            Opcode::JumpIfNotEqual => "JNE",
            Opcode::LoadImmediate => "LDI",
            Opcode::Multiply => "MUL",
            Opcode::Pop => "POP",
            Opcode::Print => "PRN",
            Opcode::Push => "PUSH",
            Opcode::Return => "RET",
        }
    }

    /// Operand bytes the assembler emits after the opcode.
    pub fn operands(self) -> &'static [Operand] {
        use Operand::*;

        match self {
            Opcode::LoadImmediate => &[Register, Immediate],
            Opcode::Add | Opcode::Multiply | Opcode::Compare => &[Register, Register],
            Opcode::Print
            | Opcode::Push
            | Opcode::Pop
            | Opcode::Call
            | Opcode::Jump
            | Opcode::JumpIfEqual
            | Opcode::JumpIfNotEqual => &[Register],
            Opcode::Halt | Opcode::Return => &[],
        }
    }

    /// Encoded size in bytes, opcode included.
    pub fn width(self) -> usize {
        1 + self.operands().len()
    }
}

/// Dispatch table: opcode byte to instruction.
pub static OPCODE: phf::Map<u8, Opcode> = phf_map! {
    0xA0u8 => Opcode::Add,
    0x50u8 => Opcode::Call,
    0xA7u8 => Opcode::Compare,
    0x01u8 => Opcode::Halt,
    0x54u8 => Opcode::Jump,
    0x55u8 => Opcode::JumpIfEqual,
    0x56u8 => Opcode::JumpIfNotEqual,
    0x82u8 => Opcode::LoadImmediate,
    0xA2u8 => Opcode::Multiply,
    0x46u8 => Opcode::Pop,
    0x47u8 => Opcode::Print,
    0x45u8 => Opcode::Push,
    0x11u8 => Opcode::Return,
};

pub static INSTRUCTION: phf::Map<&'static str, Opcode> = phf_map! {
    "ADD" => Opcode::Add,
    "CALL" => Opcode::Call,
    "CMP" => Opcode::Compare,
    "HLT" => Opcode::Halt,
    "JMP" => Opcode::Jump,
    "JEQ" => Opcode::JumpIfEqual,
    "JNE" => Opcode::JumpIfNotEqual,
    "LDI" => Opcode::LoadImmediate,
    "MUL" => Opcode::Multiply,
    "POP" => Opcode::Pop,
    "PRN" => Opcode::Print,
    "PUSH" => Opcode::Push,
    "RET" => Opcode::Return,
};
