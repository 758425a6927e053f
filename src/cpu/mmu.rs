use crate::error::Error;
use crate::memory::{Mapper, Reference};
use crate::vaddr::Vaddr;

/// Implements the eleven addressing modes that yield a memory Reference
/// (accumulator and implied touch no memory and are handled directly by
/// instruction handlers). The Mmu holds only a Mapper; per the design
/// notes, X and Y are passed in at each call site rather than captured by
/// reference, since the Mmu does not outlive any single addressing-mode
/// resolution.
pub struct Mmu<'a> {
    mapper: &'a dyn Mapper,
}

/// The resolved effective address plus whether computing it crossed a
/// 256-byte page boundary, for the caller to apply the conditional +1
/// cycle penalty on qualifying read instructions.
pub struct Resolved {
    pub reference: Reference,
    pub page_crossed: bool,
}

impl<'a> Mmu<'a> {
    pub fn new(mapper: &'a dyn Mapper) -> Self {
        Mmu { mapper }
    }

    fn reference_at(&self, addr: Vaddr) -> Result<Reference, Error> {
        let bank = self.mapper.map_to_hardware(addr)?;
        let index = (addr.get() - bank.borrow().base_address().get()) as usize;
        Ok(Reference::new(bank, index))
    }

    fn read(&self, addr: Vaddr) -> Result<u8, Error> {
        Ok(self.reference_at(addr)?.read())
    }

    pub fn load_vector(&self, v: Vaddr) -> Result<Vaddr, Error> {
        self.mapper.load_vector(v)
    }

    pub fn absolute(&self, v: Vaddr) -> Result<Resolved, Error> {
        Ok(Resolved {
            reference: self.reference_at(v)?,
            page_crossed: false,
        })
    }

    pub fn absolute_x(&self, v: Vaddr, x: u8) -> Result<Resolved, Error> {
        let effective = v.wrapping_add(x as u16);
        Ok(Resolved {
            reference: self.reference_at(effective)?,
            page_crossed: !effective.same_page(v),
        })
    }

    pub fn absolute_y(&self, v: Vaddr, y: u8) -> Result<Resolved, Error> {
        let effective = v.wrapping_add(y as u16);
        Ok(Resolved {
            reference: self.reference_at(effective)?,
            page_crossed: !effective.same_page(v),
        })
    }

    /// Dereferences the pointer at `v` to get the effective address,
    /// reproducing the infamous hardware bug: if `v`'s low byte is 0xFF,
    /// the high byte is fetched from `v & 0xFF00` rather than `v + 1`.
    /// Exposed separately from `indirect` so JMP(ind) can read the raw
    /// target without wrapping it in another `absolute` Reference.
    pub fn indirect_address(&self, v: Vaddr) -> Result<Vaddr, Error> {
        let lo = self.read(v)?;
        let hi_addr = if v.lo() == 0xFF {
            Vaddr::from_bytes(0, v.hi())
        } else {
            v.wrapping_add(1)
        };
        let hi = self.read(hi_addr)?;
        Ok(Vaddr::from_bytes(lo, hi))
    }

    pub fn indirect(&self, v: Vaddr) -> Result<Resolved, Error> {
        let effective = self.indirect_address(v)?;
        self.absolute(effective)
    }

    /// (zp,X): the pointer itself lives on the zeropage, both bytes
    /// wrapping within page 0.
    pub fn x_indexed_indirect(&self, v: Vaddr, x: u8) -> Result<Resolved, Error> {
        let ptr_lo = Vaddr::zeropage_wrapping_add(v.lo(), x);
        let lo = self.read(Vaddr::new(ptr_lo as u16))?;
        let hi = self.read(Vaddr::new(ptr_lo.wrapping_add(1) as u16))?;
        let effective = Vaddr::from_bytes(lo, hi);
        Ok(Resolved {
            reference: self.reference_at(effective)?,
            page_crossed: false,
        })
    }

    /// (zp),Y: the pointer is fetched from the zeropage (wrapping within
    /// page 0), then Y is added to the 16-bit pointer, which may cross a
    /// page.
    pub fn indirect_y_indexed(&self, v: Vaddr, y: u8) -> Result<Resolved, Error> {
        let ptr_lo = v.lo();
        let lo = self.read(Vaddr::new(ptr_lo as u16))?;
        let hi = self.read(Vaddr::new(ptr_lo.wrapping_add(1) as u16))?;
        let base = Vaddr::from_bytes(lo, hi);
        let effective = base.wrapping_add(y as u16);
        Ok(Resolved {
            reference: self.reference_at(effective)?,
            page_crossed: !effective.same_page(base),
        })
    }

    pub fn zeropage(&self, v: Vaddr) -> Result<Resolved, Error> {
        Ok(Resolved {
            reference: self.reference_at(Vaddr::new(v.lo() as u16))?,
            page_crossed: false,
        })
    }

    pub fn zeropage_x(&self, v: Vaddr, x: u8) -> Result<Resolved, Error> {
        let idx = Vaddr::zeropage_wrapping_add(v.lo(), x);
        Ok(Resolved {
            reference: self.reference_at(Vaddr::new(idx as u16))?,
            page_crossed: false,
        })
    }

    pub fn zeropage_y(&self, v: Vaddr, y: u8) -> Result<Resolved, Error> {
        let idx = Vaddr::zeropage_wrapping_add(v.lo(), y);
        Ok(Resolved {
            reference: self.reference_at(Vaddr::new(idx as u16))?,
            page_crossed: false,
        })
    }
}
