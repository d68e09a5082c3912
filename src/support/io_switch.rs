use super::registers::SwitchRegs;

/// Signal routed to one pmod pin
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PinFn {
    /// GPIO line 0..=7
    Gpio(u8),
    Pwm,
}

impl PinFn {
    fn selector(self) -> u32 {
        match self {
            PinFn::Gpio(n) => (n & 0x07) as u32,
            PinFn::Pwm => 0x8,
        }
    }
}

/// Pin 0 driven by the timer, the rest stay GPIO
pub const PWM_ROUTING: [PinFn; 8] = [
    PinFn::Pwm,
    PinFn::Gpio(1),
    PinFn::Gpio(2),
    PinFn::Gpio(3),
    PinFn::Gpio(4),
    PinFn::Gpio(5),
    PinFn::Gpio(6),
    PinFn::Gpio(7),
];

const COMMIT: u32 = 1 << 31;

pub struct IoSwitch<'a> {
    regs: &'a SwitchRegs,
}

impl<'a> IoSwitch<'a> {
    pub fn new(regs: &'a SwitchRegs) -> Self {
        Self { regs }
    }

    /// 4 bit selector per pin, pin 0 in the low nibble
    pub fn routing_word(pins: &[PinFn; 8]) -> u32 {
        pins.iter()
            .enumerate()
            .fold(0, |acc, (i, p)| acc | (p.selector() << (4 * i)))
    }

    pub fn configure(&mut self, pins: &[PinFn; 8]) {
        let word = Self::routing_word(pins);

        // isolate, load, commit
        self.regs.control.set(0);
        self.regs.config.set(word);
        self.regs.control.set(COMMIT);

        debug!("io switch routed: {:#x}", word);
    }
}
