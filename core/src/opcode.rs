/// # Opcodes
///
/// Instructions are 16 bits wide and fetched big-endian. The most significant nibble picks the
/// instruction family; four families (0x0, 0x8, 0xE, 0xF) pick the instruction within the family
/// from their low nibble or low byte.
///
/// The remaining nibbles carry operands:
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an immediate byte assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx, or the range of registers V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a sprite height
pub trait Opcode {
    /// The instruction family.
    /// `[f___]`
    fn family(&self) -> u8;

    /// Index of the register Vx.
    /// `[_x__]`
    fn x(&self) -> usize;

    /// Index of the register Vy.
    /// `[__y_]`
    fn y(&self) -> usize;

    /// The least significant nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// Everything but the family.
    /// `[_adr]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_fields() {
        let op: u16 = 0xABCD;
        assert_eq!(op.family(), 0xA);
        assert_eq!(op.x(), 0xB);
        assert_eq!(op.y(), 0xC);
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0x7F3C;
        assert_eq!(op.kk(), 0x3C);
    }

    #[test]
    fn test_addr() {
        let op: u16 = 0x2FFE;
        assert_eq!(op.addr(), 0x0FFE);
    }

    #[test]
    fn test_family_of_high_opcodes() {
        let op: u16 = 0xF065;
        assert_eq!(op.family(), 0xF);
        assert_eq!(op.x(), 0x0);
    }
}
