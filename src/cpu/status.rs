use bitflags::bitflags;

bitflags! {
    /// The 8-bit processor status register (SR), bit 7 to bit 0:
    /// N V - B D I Z C. The unused bit always reads as 1.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const CARRY             = 0b0000_0001;
        const ZERO              = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL           = 0b0000_1000;
        const BREAK             = 0b0001_0000;
        const UNUSED            = 0b0010_0000;
        const OVERFLOW          = 0b0100_0000;
        const NEGATIVE          = 0b1000_0000;
    }
}

impl Status {
    /// The value RESET loads into SR: I set, unused bit set, everything
    /// else clear.
    pub const RESET_VALUE: Status =
        Status::from_bits_truncate(Status::INTERRUPT_DISABLE.bits() | Status::UNUSED.bits());

    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.set(flag, value);
    }

    pub fn is_set(&self, flag: Status) -> bool {
        self.contains(flag)
    }

    /// Sets N from bit 7 of `value` and Z from whether `value == 0`, the
    /// `set_nz` convention used throughout the instruction semantics.
    pub fn set_nz(&mut self, value: u8) {
        self.set_flag(Status::NEGATIVE, value & 0b1000_0000 != 0);
        self.set_flag(Status::ZERO, value == 0);
    }

    /// The byte pushed to the stack by PHP and by BRK: the unused bit and
    /// the break bit are always set in the pushed copy.
    pub fn to_pushed_byte(self) -> u8 {
        (self | Status::BREAK | Status::UNUSED).bits()
    }

    /// The byte pushed by a hardware IRQ/NMI service: break is clear,
    /// unused is set.
    pub fn to_pushed_byte_hardware(self) -> u8 {
        ((self | Status::UNUSED) & !Status::BREAK).bits()
    }

    /// SR as restored by PLP/RTI: break and unused are not real latches on
    /// real hardware, but the unused bit always reads back as 1.
    pub fn from_pulled_byte(byte: u8) -> Status {
        Status::from_bits_truncate(byte) | Status::UNUSED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_value_sets_interrupt_disable_and_unused() {
        assert_eq!(
            Status::RESET_VALUE.bits(),
            Status::INTERRUPT_DISABLE.bits() | Status::UNUSED.bits()
        );
    }

    #[test]
    fn set_nz_tracks_zero_and_negative() {
        let mut sr = Status::empty();
        sr.set_nz(0x00);
        assert!(sr.is_set(Status::ZERO));
        assert!(!sr.is_set(Status::NEGATIVE));
        sr.set_nz(0x80);
        assert!(!sr.is_set(Status::ZERO));
        assert!(sr.is_set(Status::NEGATIVE));
    }

    #[test]
    fn pushed_byte_always_sets_break_and_unused() {
        let sr = Status::empty();
        assert_eq!(
            sr.to_pushed_byte(),
            (Status::BREAK | Status::UNUSED).bits()
        );
    }

    #[test]
    fn pulled_byte_forces_unused_but_not_break() {
        let restored = Status::from_pulled_byte(0x00);
        assert!(restored.is_set(Status::UNUSED));
        assert!(!restored.is_set(Status::BREAK));
    }
}
