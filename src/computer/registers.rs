use crate::computer::error::Fault;

pub const REGISTER_COUNT: usize = 8;
/// R7 holds the stack pointer by convention.
pub const STACK_POINTER: u8 = 7;
/// Reset value of the stack pointer; the stack grows down from here.
pub const STACK_TOP: u8 = 0xF4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    slots: [u8; REGISTER_COUNT],
}

impl Registers {
    pub fn new() -> Registers {
        let mut slots = [0; REGISTER_COUNT];
        slots[STACK_POINTER as usize] = STACK_TOP;

        Registers { slots }
    }

    pub fn get(&self, index: u8) -> Result<u8, Fault> {
        self.slots
            .get(index as usize)
            .copied()
            .ok_or(Fault::InvalidRegister(index))
    }

    pub fn set(&mut self, index: u8, value: u8) -> Result<(), Fault> {
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(Fault::InvalidRegister(index))?;
        *slot = value;
        Ok(())
    }

    pub fn stack_pointer(&self) -> u8 {
        self.slots[STACK_POINTER as usize]
    }

    pub fn set_stack_pointer(&mut self, value: u8) {
        self.slots[STACK_POINTER as usize] = value;
    }

    pub fn as_array(&self) -> [u8; REGISTER_COUNT] {
        self.slots
    }
}

impl Default for Registers {
    fn default() -> Self {
        Registers::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_state() {
        let registers = Registers::new();
        assert_eq!(registers.as_array(), [0, 0, 0, 0, 0, 0, 0, 0xF4]);
        assert_eq!(registers.stack_pointer(), STACK_TOP);
    }

    #[test]
    fn stack_pointer_is_an_ordinary_register() {
        let mut registers = Registers::new();
        registers.set(7, 0x10).unwrap();
        assert_eq!(registers.stack_pointer(), 0x10);
    }

    #[test]
    fn index_past_r7_is_rejected() {
        let mut registers = Registers::new();
        assert!(matches!(registers.get(8), Err(Fault::InvalidRegister(8))));
        assert!(matches!(registers.set(0x82, 1), Err(Fault::InvalidRegister(0x82))));
    }
}
