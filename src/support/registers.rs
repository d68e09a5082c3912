//! Memory mapped register blocks.
//!
//! Blocks are plain `#[repr(C)]` structs of [`VolatileCell`]s: the firmware
//! casts a fixed base address to a `&'static` block, tests build one on the
//! stack and pass a reference instead.

use bitflags::bitflags;
use vcell::VolatileCell;

bitflags! {
    /// TCSRx bits of the AXI timer
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Tcsr: u32 {
        /// Capture mode
        const MDT = 1 << 0;
        /// Count down
        const UDT = 1 << 1;
        /// External generate signal
        const GENT = 1 << 2;
        const CAPT = 1 << 3;
        /// Auto reload
        const ARHT = 1 << 4;
        /// Load counter from TLRx
        const LOAD = 1 << 5;
        const ENIT = 1 << 6;
        /// Enable timer
        const ENT = 1 << 7;
        const TINT = 1 << 8;
        /// PWM coupling of both channels
        const PWMA = 1 << 9;
        const ENALL = 1 << 10;
        const CASC = 1 << 11;
    }
}

impl Tcsr {
    /// External generate, down counter, auto reload, enabled, PWM coupled
    pub const PWM_RUN: Self = Self::UDT
        .union(Self::GENT)
        .union(Self::ARHT)
        .union(Self::ENT)
        .union(Self::PWMA);
}

/// One counter: TCSRx @ 0x00, TLRx @ 0x04, TCRx @ 0x08
#[repr(C)]
pub struct TimerChannel {
    pub tcsr: VolatileCell<u32>,
    pub tlr: VolatileCell<u32>,
    pub tcr: VolatileCell<u32>,
    _reserved: VolatileCell<u32>,
}

impl TimerChannel {
    pub const fn new() -> Self {
        Self {
            tcsr: VolatileCell::new(0),
            tlr: VolatileCell::new(0),
            tcr: VolatileCell::new(0),
            _reserved: VolatileCell::new(0),
        }
    }
}

/// AXI timer: channel 0 @ 0x00, channel 1 @ 0x10
#[repr(C)]
pub struct TmrCtr {
    pub ch: [TimerChannel; 2],
}

impl TmrCtr {
    pub const fn new() -> Self {
        Self {
            ch: [TimerChannel::new(), TimerChannel::new()],
        }
    }

    /// # Safety
    /// `addr` must be the base of a timer peripheral that nothing else touches.
    pub unsafe fn from_addr(addr: usize) -> &'static Self {
        &*(addr as *const Self)
    }
}

/// IO switch: pin routing word @ 0x00, control @ 0x04
#[repr(C)]
pub struct SwitchRegs {
    pub config: VolatileCell<u32>,
    pub control: VolatileCell<u32>,
}

impl SwitchRegs {
    pub const fn new() -> Self {
        Self {
            config: VolatileCell::new(0),
            control: VolatileCell::new(0),
        }
    }

    /// # Safety
    /// `addr` must be the base of the IO switch.
    pub unsafe fn from_addr(addr: usize) -> &'static Self {
        &*(addr as *const Self)
    }
}
