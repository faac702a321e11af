use crate::computer::error::Fault;

pub const RAM_SIZE: usize = 256;

/// Flat, fixed-size byte store shared by code, data and the stack.
#[derive(Clone, Debug)]
pub struct Ram {
    cells: [u8; RAM_SIZE],
}

impl Ram {
    pub fn new() -> Ram {
        Ram {
            cells: [0; RAM_SIZE],
        }
    }

    pub fn read(&self, address: usize) -> Result<u8, Fault> {
        self.cells
            .get(address)
            .copied()
            .ok_or(Fault::AddressOutOfRange(address))
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(Fault::AddressOutOfRange(address))?;
        *cell = value;
        Ok(())
    }

    /// Copies `image` verbatim starting at address 0. Nothing is written if
    /// the image does not fit.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Fault> {
        if image.len() > RAM_SIZE {
            return Err(Fault::AddressOutOfRange(RAM_SIZE));
        }
        self.cells[..image.len()].copy_from_slice(image);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Ram {
    fn default() -> Self {
        Ram::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        assert!(Ram::new().as_slice().iter().all(|&cell| cell == 0));
    }

    #[test]
    fn write_then_read() {
        let mut ram = Ram::new();
        ram.write(0xFF, 42).unwrap();
        assert_eq!(ram.read(0xFF).unwrap(), 42);
        assert_eq!(ram.read(0xFE).unwrap(), 0);
    }

    #[test]
    fn rejects_addresses_past_the_end() {
        let mut ram = Ram::new();
        assert!(matches!(ram.read(256), Err(Fault::AddressOutOfRange(256))));
        assert!(matches!(ram.write(300, 1), Err(Fault::AddressOutOfRange(300))));
    }

    #[test]
    fn load_places_image_at_zero() {
        let mut ram = Ram::new();
        ram.load(&[1, 2, 3]).unwrap();
        assert_eq!(&ram.as_slice()[..4], &[1, 2, 3, 0]);
    }

    #[test]
    fn load_refuses_oversized_image() {
        let mut ram = Ram::new();
        let image = vec![7; RAM_SIZE + 1];
        assert!(matches!(ram.load(&image), Err(Fault::AddressOutOfRange(RAM_SIZE))));
        assert_eq!(ram.read(0).unwrap(), 0);
    }
}
