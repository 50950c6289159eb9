/// # Quirks
/// Historical interpreters disagree on a couple of instructions and ROMs are written
/// against one convention or the other, so both are selectable per loaded program.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    pub shift: ShiftQuirk,
    pub load_store: LoadStoreQuirk,
}

/// Source register of `8xy6` (SHR) and `8xyE` (SHL)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShiftQuirk {
    /// Vx = Vy shifted; VF takes the bit shifted out of Vy
    ShiftVy,
    /// Vx is shifted in place and Vy is ignored
    ShiftVx,
}

impl Default for ShiftQuirk {
    fn default() -> Self {
        ShiftQuirk::ShiftVy
    }
}

/// Index register side effect of `Fx55` (store) and `Fx65` (load)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadStoreQuirk {
    /// I += x + 1 after the transfer
    AdvanceIndex,
    /// I is left untouched
    KeepIndex,
}

impl Default for LoadStoreQuirk {
    fn default() -> Self {
        LoadStoreQuirk::AdvanceIndex
    }
}
