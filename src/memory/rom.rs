use crate::error::Error;
use crate::memory::bank::Bank;
use crate::vaddr::Vaddr;

/// A Bank loaded once from an iterator of bytes; every write after that,
/// including a second `load`, fails with `ReadOnly`.
pub struct Rom {
    base: Vaddr,
    data: Vec<u8>,
    loaded: bool,
}

impl Rom {
    /// Builds an unloaded Rom of the given size; all reads return 0 until
    /// `load` is called.
    pub fn new(base: Vaddr, size: usize) -> Self {
        Rom {
            base,
            data: vec![0; size],
            loaded: false,
        }
    }

    /// Populates the underlying storage exactly once. `bytes` is copied in
    /// starting at offset 0 and must not exceed the Rom's size.
    pub fn load<I: IntoIterator<Item = u8>>(&mut self, bytes: I) -> Result<(), Error> {
        if self.loaded {
            return Err(Error::ReadOnly);
        }
        for (index, byte) in bytes.into_iter().enumerate() {
            self.data[index] = byte;
        }
        self.loaded = true;
        Ok(())
    }
}

impl Bank for Rom {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn base_address(&self) -> Vaddr {
        self.base
    }

    fn read(&self, index: usize) -> u8 {
        self.data[index]
    }

    fn write(&mut self, _index: usize, _value: u8) -> Result<(), Error> {
        Err(Error::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_then_read() {
        let mut rom = Rom::new(Vaddr::ZERO, 4);
        rom.load(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(rom.read(0), 1);
        assert_eq!(rom.read(3), 4);
    }

    #[test]
    fn second_load_fails() {
        let mut rom = Rom::new(Vaddr::ZERO, 2);
        rom.load(vec![9, 9]).unwrap();
        assert_eq!(rom.load(vec![1, 1]).unwrap_err(), Error::ReadOnly);
    }

    #[test]
    fn write_always_fails() {
        let mut rom = Rom::new(Vaddr::ZERO, 2);
        assert_eq!(rom.write(0, 1).unwrap_err(), Error::ReadOnly);
    }
}
