//! A thin cartridge/mapper collaborator: just enough to run the CPU core
//! end to end in tests and examples. Full iNES header parsing, a mapper
//! registry, and bank-switched mappers are out of scope; see SPEC_FULL.md
//! §4.11.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;
use crate::memory::{Bank, Mapper, MirroredRam, Ram};
use crate::vaddr::Vaddr;

/// Backs the entire 64KiB address space with ordinary RAM. Used by unit
/// and property tests that want every address writable, with no mapper
/// quirks to account for.
pub struct FlatMapper {
    ram: Rc<RefCell<dyn Bank>>,
}

impl FlatMapper {
    pub fn new() -> Self {
        FlatMapper {
            ram: Rc::new(RefCell::new(Ram::new(Vaddr::ZERO, 0x10000))),
        }
    }

    /// Convenience accessor for tests: writes directly through the single
    /// backing Bank without going through the Mmu.
    pub fn write(&self, addr: Vaddr, value: u8) -> Result<(), Error> {
        self.ram.borrow_mut().write(addr.get() as usize, value)
    }

    pub fn read(&self, addr: Vaddr) -> u8 {
        self.ram.borrow().read(addr.get() as usize)
    }
}

impl Default for FlatMapper {
    fn default() -> Self {
        FlatMapper::new()
    }
}

impl Mapper for FlatMapper {
    fn map_to_hardware(&self, _addr: Vaddr) -> Result<Rc<RefCell<dyn Bank>>, Error> {
        Ok(Rc::clone(&self.ram))
    }
}

/// A pseudo-Bank for unmapped ranges: reads as zero, silently ignores
/// writes. Used by NromMapper to cover the PPU/APU/expansion window
/// without modeling those coprocessors.
struct OpenBus {
    base: Vaddr,
    size: usize,
}

impl Bank for OpenBus {
    fn size(&self) -> usize {
        self.size
    }

    fn base_address(&self) -> Vaddr {
        self.base
    }

    fn read(&self, _index: usize) -> u8 {
        0
    }

    fn write(&mut self, _index: usize, _value: u8) -> Result<(), Error> {
        Ok(())
    }
}

/// A minimal iNES mapper-0 (NROM) collaborator: 2KiB internal RAM mirrored
/// four times over 0x0000-0x1FFF, a 16KiB or 32KiB PRG-ROM window at
/// 0x8000-0xFFFF (16KiB cartridges are mirrored across both halves), and
/// an open-bus pseudo-Bank for everything else.
pub struct NromMapper {
    work_ram: Rc<RefCell<dyn Bank>>,
    prg_rom: Rc<RefCell<dyn Bank>>,
    open_bus: Rc<RefCell<dyn Bank>>,
    prg_rom_size: usize,
}

impl NromMapper {
    /// `prg_rom` must be 0x4000 (16KiB, mirrored) or 0x8000 (32KiB) bytes.
    pub fn new(prg_rom: Vec<u8>) -> Result<Self, Error> {
        let size = prg_rom.len();
        if size != 0x4000 && size != 0x8000 {
            return Err(Error::MirroringConfig(format!(
                "NROM PRG-ROM must be 16KiB or 32KiB, got {} bytes",
                size
            )));
        }
        let mut rom = crate::memory::Rom::new(Vaddr::new(0x8000), size);
        rom.load(prg_rom)?;
        Ok(NromMapper {
            work_ram: Rc::new(RefCell::new(MirroredRam::new(Vaddr::ZERO, 0x0800 * 4, 4)?)),
            prg_rom: Rc::new(RefCell::new(rom)),
            open_bus: Rc::new(RefCell::new(OpenBus {
                base: Vaddr::new(0x2000),
                size: 0x6000,
            })),
            prg_rom_size: size,
        })
    }
}

impl Mapper for NromMapper {
    fn map_to_hardware(&self, addr: Vaddr) -> Result<Rc<RefCell<dyn Bank>>, Error> {
        match addr.get() {
            0x0000..=0x1FFF => Ok(Rc::clone(&self.work_ram)),
            0x8000..=0xFFFF => Ok(Rc::clone(&self.prg_rom)),
            _ => Ok(Rc::clone(&self.open_bus)),
        }
    }

    fn load_vector(&self, v: Vaddr) -> Result<Vaddr, Error> {
        let lo = self.read_prg(v);
        let hi = self.read_prg(v.wrapping_add(1));
        Ok(Vaddr::from_bytes(lo, hi))
    }
}

impl NromMapper {
    fn read_prg(&self, addr: Vaddr) -> u8 {
        let offset = (addr.get() as usize - 0x8000) % self.prg_rom_size;
        self.prg_rom.borrow().read(offset)
    }
}
