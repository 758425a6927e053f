use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;
use crate::memory::bank::Bank;
use crate::vaddr::Vaddr;

/// Cartridge-side collaborator translating CPU virtual addresses to the
/// Bank that owns them. A Mapper must be total over 0x0000-0xFFFF;
/// unmapped regions are conventionally represented by an all-zero,
/// write-ignoring pseudo-Bank rather than by returning `UnmappedAddress`.
pub trait Mapper {
    fn map_to_hardware(&self, addr: Vaddr) -> Result<Rc<RefCell<dyn Bank>>, Error>;

    /// Reads `v` and `v+1` through the mapper and assembles them
    /// little-endian. Used for interrupt/reset vectors and the `indirect`
    /// addressing mode's pointer fetch.
    fn load_vector(&self, v: Vaddr) -> Result<Vaddr, Error> {
        let bank = self.map_to_hardware(v)?;
        let lo = bank.borrow().read((v.get() - bank.borrow().base_address().get()) as usize);
        let hi_addr = v.wrapping_add(1);
        let hi_bank = self.map_to_hardware(hi_addr)?;
        let hi = hi_bank
            .borrow()
            .read((hi_addr.get() - hi_bank.borrow().base_address().get()) as usize);
        Ok(Vaddr::from_bytes(lo, hi))
    }
}
