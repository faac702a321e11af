use crate::compiler::instructions::Opcode;
use crate::computer::error::Fault;
use crate::computer::Computer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Multiply,
    Compare,
}

impl AluOp {
    pub fn from_opcode(opcode: u8) -> Result<AluOp, Fault> {
        match opcode {
            op if op == Opcode::Add.byte() => Ok(AluOp::Add),
            op if op == Opcode::Multiply.byte() => Ok(AluOp::Multiply),
            op if op == Opcode::Compare.byte() => Ok(AluOp::Compare),
            op => Err(Fault::UnsupportedAluOperation(op)),
        }
    }
}

impl Computer {
    /// Runs `opcode` over registers `a` and `b`, then steps past the
    /// three-byte instruction. Results wrap modulo 256.
    ///
    /// Compare only ever sets the flag; an unequal pair leaves it as it was.
    pub(crate) fn alu(&mut self, opcode: u8, a: u8, b: u8) -> Result<(), Fault> {
        let op = AluOp::from_opcode(opcode)?;
        let lhs = self.registers.get(a)?;
        let rhs = self.registers.get(b)?;

        match op {
            AluOp::Add => self.registers.set(a, lhs.wrapping_add(rhs))?,
            AluOp::Multiply => self.registers.set(a, lhs.wrapping_mul(rhs))?,
            AluOp::Compare => {
                if lhs == rhs {
                    self.flag = true;
                }
            }
        }

        self.program_counter += 3;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer_with(values: &[(u8, u8)]) -> Computer {
        let mut computer = Computer::new();
        for &(index, value) in values {
            computer.registers.set(index, value).unwrap();
        }
        computer
    }

    #[test]
    fn add_wraps() {
        let mut computer = computer_with(&[(0, 200), (1, 100)]);
        computer.alu(Opcode::Add.byte(), 0, 1).unwrap();
        assert_eq!(computer.register(0).unwrap(), 44);
        assert_eq!(computer.register(1).unwrap(), 100);
        assert_eq!(computer.program_counter(), 3);
    }

    #[test]
    fn multiply_wraps() {
        let mut computer = computer_with(&[(2, 16), (3, 17)]);
        computer.alu(Opcode::Multiply.byte(), 2, 3).unwrap();
        assert_eq!(computer.register(2).unwrap(), 16);
    }

    #[test]
    fn compare_is_sticky() {
        let mut computer = computer_with(&[(0, 5), (1, 5), (2, 6)]);
        computer.alu(Opcode::Compare.byte(), 0, 1).unwrap();
        assert!(computer.flag());
        computer.alu(Opcode::Compare.byte(), 0, 2).unwrap();
        assert!(computer.flag());
        assert_eq!(computer.program_counter(), 6);
    }

    #[test]
    fn compare_unequal_leaves_clear_flag_clear() {
        let mut computer = computer_with(&[(0, 5), (1, 6)]);
        computer.alu(Opcode::Compare.byte(), 0, 1).unwrap();
        assert!(!computer.flag());
    }

    #[test]
    fn non_alu_opcode_is_unsupported() {
        let mut computer = Computer::new();
        let result = computer.alu(Opcode::LoadImmediate.byte(), 0, 1);
        assert!(matches!(result, Err(Fault::UnsupportedAluOperation(0x82))));
        assert_eq!(computer.program_counter(), 0);
    }
}
