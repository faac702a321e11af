use crate::compiler::instructions::{Opcode, Operand, INSTRUCTION};
use crate::computer::memory::RAM_SIZE;
use crate::computer::registers::REGISTER_COUNT;

use ahash::AHashMap;
use smallvec::SmallVec;
use std::{error, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileErrorKind {
    UnknownMnemonic(String),
    ArityMismatch {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
    ExpectedRegister(String),
    InvalidImmediate(String),
    InvalidLabel(String),
    DuplicateLabel(String),
    UndefinedLabel(String),
    ProgramTooLarge(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError {
    pub line: usize,
    pub kind: CompileErrorKind,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompileErrorKind::*;
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            UnknownMnemonic(name) => write!(f, "unknown instruction {name}"),
            ArityMismatch {
                mnemonic,
                expected,
                found,
            } => write!(f, "{mnemonic} takes {expected} operand(s), got {found}"),
            ExpectedRegister(operand) => write!(f, "expected a register R0-R7, got {operand}"),
            InvalidImmediate(operand) => write!(f, "{operand} is not a byte value"),
            InvalidLabel(label) => write!(f, "invalid label {label:?}"),
            DuplicateLabel(label) => write!(f, "label {label} is already defined"),
            UndefinedLabel(label) => write!(f, "undefined label {label}"),
            ProgramTooLarge(size) => write!(f, "program is {size} bytes, RAM holds {RAM_SIZE}"),
        }
    }
}

impl error::Error for CompileError {}

enum Statement<'a> {
    Instruction(Opcode, SmallVec<[&'a str; 2]>),
    Byte(&'a str),
}

struct Line<'a> {
    number: usize,
    statement: Statement<'a>,
}

fn compile_error(line: usize, kind: CompileErrorKind) -> CompileError {
    CompileError { line, kind }
}

/// First pass: strips comments, records label addresses and checks that
/// every instruction has the right number of operands.
fn parse_source(source: &str) -> Result<(Vec<Line<'_>>, AHashMap<&str, usize>), CompileError> {
    let mut lines = Vec::new();
    let mut labels = AHashMap::new();
    let mut address = 0;

    for (i, raw) in source.lines().enumerate() {
        let number = i + 1;
        let mut code = raw.split([';', '#']).next().unwrap_or("").trim();

        if let Some((label, rest)) = code.split_once(':') {
            let label = label.trim();
            if label.is_empty() || !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(compile_error(number, CompileErrorKind::InvalidLabel(label.to_string())));
            }
            if labels.insert(label, address).is_some() {
                return Err(compile_error(number, CompileErrorKind::DuplicateLabel(label.to_string())));
            }
            code = rest.trim();
        }

        if code.is_empty() {
            continue;
        }

        let (mnemonic, rest) = code.split_once(char::is_whitespace).unwrap_or((code, ""));
        let operands: SmallVec<[&str; 2]> = match rest.trim() {
            "" => SmallVec::new(),
            rest => rest.split(',').map(str::trim).collect(),
        };

        let mnemonic = mnemonic.to_ascii_uppercase();
        let statement = if mnemonic == "DB" {
            if operands.len() != 1 {
                return Err(compile_error(
                    number,
                    CompileErrorKind::ArityMismatch {
                        mnemonic: "DB",
                        expected: 1,
                        found: operands.len(),
                    },
                ));
            }
            address += 1;
            Statement::Byte(operands[0])
        } else {
            let opcode = *INSTRUCTION
                .get(mnemonic.as_str())
                .ok_or_else(|| compile_error(number, CompileErrorKind::UnknownMnemonic(mnemonic.clone())))?;
            if operands.len() != opcode.operands().len() {
                return Err(compile_error(
                    number,
                    CompileErrorKind::ArityMismatch {
                        mnemonic: opcode.mnemonic(),
                        expected: opcode.operands().len(),
                        found: operands.len(),
                    },
                ));
            }
            address += opcode.width();
            Statement::Instruction(opcode, operands)
        };

        if address > RAM_SIZE {
            return Err(compile_error(number, CompileErrorKind::ProgramTooLarge(address)));
        }

        lines.push(Line { number, statement });
    }

    Ok((lines, labels))
}

fn parse_register(line: usize, operand: &str) -> Result<u8, CompileError> {
    operand
        .strip_prefix(['R', 'r'])
        .and_then(|index| index.parse::<u8>().ok())
        .filter(|&index| (index as usize) < REGISTER_COUNT)
        .ok_or_else(|| compile_error(line, CompileErrorKind::ExpectedRegister(operand.to_string())))
}

fn parse_immediate(
    line: usize,
    operand: &str,
    labels: &AHashMap<&str, usize>,
) -> Result<u8, CompileError> {
    let invalid = || compile_error(line, CompileErrorKind::InvalidImmediate(operand.to_string()));

    if !operand.starts_with(|c: char| c.is_ascii_digit()) {
        if !operand.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }
        let address = labels
            .get(operand)
            .ok_or_else(|| compile_error(line, CompileErrorKind::UndefinedLabel(operand.to_string())))?;
        return u8::try_from(*address).map_err(|_| invalid());
    }

    let parsed = if let Some(hex) = operand.strip_prefix("0x").or(operand.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else if let Some(binary) = operand.strip_prefix("0b").or(operand.strip_prefix("0B")) {
        u8::from_str_radix(binary, 2)
    } else {
        operand.parse::<u8>()
    };

    parsed.map_err(|_| invalid())
}

/// Second pass: emits bytes with every label resolved.
fn transpile_to_machine_code(
    lines: Vec<Line<'_>>,
    labels: AHashMap<&str, usize>,
) -> Result<Vec<u8>, CompileError> {
    let mut machine_code = Vec::with_capacity(RAM_SIZE);

    for line in lines {
        match line.statement {
            Statement::Byte(value) => {
                machine_code.push(parse_immediate(line.number, value, &labels)?);
            }
            Statement::Instruction(opcode, operands) => {
                machine_code.push(opcode.byte());
                for (kind, operand) in opcode.operands().iter().zip(operands) {
                    machine_code.push(match kind {
                        Operand::Register => parse_register(line.number, operand)?,
                        Operand::Immediate => parse_immediate(line.number, operand, &labels)?,
                    });
                }
            }
        }
    }

    Ok(machine_code)
}

/// Assembles mnemonic source into a memory image starting at address 0.
///
/// ```text
/// main:
///     LDI R1, Double   ; labels resolve to addresses
///     LDI R0, 0x0A
///     CALL R1
///     HLT
/// Double:
///     ADD R0, R0
///     PRN R0
///     RET
/// ```
pub fn compile(source: &str) -> Result<Vec<u8>, CompileError> {
    let (lines, labels) = parse_source(source)?;
    transpile_to_machine_code(lines, labels)
}
