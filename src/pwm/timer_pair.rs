use fugit::{ExtU32, MicrosDurationU32};

use super::pwm_calc::PwmTicks;
use crate::config::{BOOT_HIGH_LOAD, BOOT_PERIOD_LOAD};
use crate::support::{Tcsr, TimerChannel, TmrCtr};

const PERIOD: usize = 0;
const HIGH_TIME: usize = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairState {
    Disabled,
    Running,
    /// Channels hold different control words
    Inconsistent,
}

/// Two AXI timer channels coupled into one PWM output.
///
/// Channel 0 counts the period, channel 1 the high time. Both are always
/// written together and with the same control word; all state lives in the
/// registers.
pub struct TimerPair<'a> {
    regs: &'a TmrCtr,
}

impl<'a> TimerPair<'a> {
    pub fn new(regs: &'a TmrCtr) -> Self {
        Self { regs }
    }

    fn period_ch(&self) -> &TimerChannel {
        &self.regs.ch[PERIOD]
    }

    fn high_ch(&self) -> &TimerChannel {
        &self.regs.ch[HIGH_TIME]
    }

    /// Boot defaults, then start
    pub fn init(&mut self) {
        self.write_pair(PwmTicks {
            period: BOOT_PERIOD_LOAD,
            high: BOOT_HIGH_LOAD,
        });
        info!(
            "pwm started with boot loads {}/{}",
            BOOT_PERIOD_LOAD, BOOT_HIGH_LOAD
        );
    }

    /// Stop counting. Loads are kept.
    pub fn disable(&mut self) {
        self.period_ch().tcsr.set(0);
        self.high_ch().tcsr.set(0);
        debug!("pwm stopped");
    }

    pub fn configure_and_run(&mut self, period_us: u16, duty_percent: u8) {
        let ticks = PwmTicks::from_us(period_us, duty_percent);
        debug!(
            "pwm {} us {}% -> {}/{} ticks",
            period_us, duty_percent, ticks.period, ticks.high
        );
        self.write_pair(ticks);
    }

    /// Loads first, then the same run word into both channels. The new
    /// values are picked up at the next reload.
    pub fn write_pair(&mut self, ticks: PwmTicks) {
        self.write_loads(ticks);
        self.start();
    }

    /// Control words untouched
    pub fn write_loads(&mut self, ticks: PwmTicks) {
        self.period_ch().tlr.set(ticks.period);
        self.high_ch().tlr.set(ticks.high);
    }

    /// Same run word into both channels
    pub fn start(&mut self) {
        let run = Tcsr::PWM_RUN.bits();
        self.period_ch().tcsr.set(run);
        self.high_ch().tcsr.set(run);
    }

    pub fn loads(&self) -> PwmTicks {
        PwmTicks {
            period: self.period_ch().tlr.get(),
            high: self.high_ch().tlr.get(),
        }
    }

    /// Live counter values (period, high time)
    pub fn counters(&self) -> (u32, u32) {
        (self.period_ch().tcr.get(), self.high_ch().tcr.get())
    }

    pub fn period(&self) -> MicrosDurationU32 {
        self.loads().period_us().micros()
    }

    pub fn state(&self) -> PairState {
        let p = self.period_ch().tcsr.get();
        let h = self.high_ch().tcsr.get();

        if p != h {
            PairState::Inconsistent
        } else if p == Tcsr::PWM_RUN.bits() {
            PairState::Running
        } else if p == 0 {
            PairState::Disabled
        } else {
            PairState::Inconsistent
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == PairState::Running
    }
}

impl embedded_hal::PwmPin for TimerPair<'_> {
    type Duty = u8;

    fn disable(&mut self) {
        TimerPair::disable(self)
    }

    /// Restart with whatever is in the load registers
    fn enable(&mut self) {
        self.start();
    }

    fn get_duty(&self) -> u8 {
        self.loads().duty_percent()
    }

    fn get_max_duty(&self) -> u8 {
        100
    }

    /// Period load and run state stay as they are
    fn set_duty(&mut self, duty: u8) {
        let ticks = self.loads().with_duty(duty);
        self.write_loads(ticks);
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::PwmPin;

    use super::*;
    use crate::config::PWM_CONTROL_WORD;

    fn tcsr(regs: &TmrCtr) -> (u32, u32) {
        (regs.ch[0].tcsr.get(), regs.ch[1].tcsr.get())
    }

    fn tlr(regs: &TmrCtr) -> (u32, u32) {
        (regs.ch[0].tlr.get(), regs.ch[1].tlr.get())
    }

    #[test]
    fn boot_defaults() {
        let regs = TmrCtr::new();
        let mut pair = TimerPair::new(&regs);
        pair.init();

        assert_eq!(tlr(&regs), (99_998, 49_998));
        assert_eq!(tcsr(&regs), (PWM_CONTROL_WORD, PWM_CONTROL_WORD));
        assert_eq!(pair.state(), PairState::Running);
    }

    #[test]
    fn configure_writes_both_channels() {
        let regs = TmrCtr::new();
        let mut pair = TimerPair::new(&regs);

        pair.configure_and_run(1000, 33);

        assert_eq!(tlr(&regs), (100_000, 33_000));
        assert_eq!(tcsr(&regs), (0x296, 0x296));
        assert!(pair.is_running());
    }

    #[test]
    fn disable_twice_keeps_loads() {
        let regs = TmrCtr::new();
        let mut pair = TimerPair::new(&regs);
        pair.configure_and_run(250, 40);

        pair.disable();
        assert_eq!(tcsr(&regs), (0, 0));
        assert_eq!(tlr(&regs), (25_000, 10_000));

        pair.disable();
        assert_eq!(tcsr(&regs), (0, 0));
        assert_eq!(tlr(&regs), (25_000, 10_000));
        assert_eq!(pair.state(), PairState::Disabled);
    }

    #[test]
    fn reconfigure_after_stop() {
        let regs = TmrCtr::new();
        let mut pair = TimerPair::new(&regs);
        pair.init();
        pair.disable();

        pair.configure_and_run(20, 75);
        assert_eq!(tlr(&regs), (2_000, 1_500));
        assert!(pair.is_running());
    }

    #[test]
    fn mismatched_control_words() {
        let regs = TmrCtr::new();
        regs.ch[0].tcsr.set(0x296);
        assert_eq!(TimerPair::new(&regs).state(), PairState::Inconsistent);
    }

    #[test]
    fn counters_read_back() {
        let regs = TmrCtr::new();
        regs.ch[0].tcr.set(1234);
        regs.ch[1].tcr.set(56);
        assert_eq!(TimerPair::new(&regs).counters(), (1234, 56));
    }

    #[test]
    fn pwm_pin_keeps_period() {
        let regs = TmrCtr::new();
        let mut pair = TimerPair::new(&regs);
        pair.configure_and_run(2000, 10);

        pair.set_duty(60);
        assert_eq!(tlr(&regs), (200_000, 120_000));
        assert_eq!(pair.get_duty(), 60);
        assert_eq!(pair.get_max_duty(), 100);

        PwmPin::disable(&mut pair);
        assert!(!pair.is_running());
        pair.enable();
        assert!(pair.is_running());
        assert_eq!(tlr(&regs), (200_000, 120_000));
    }

    #[test]
    fn set_duty_while_stopped_stays_stopped() {
        let regs = TmrCtr::new();
        let mut pair = TimerPair::new(&regs);
        pair.configure_and_run(1000, 20);
        PwmPin::disable(&mut pair);

        pair.set_duty(50);
        assert_eq!(pair.state(), PairState::Disabled);
        assert_eq!(tlr(&regs), (100_000, 50_000));

        pair.enable();
        assert_eq!(pair.state(), PairState::Running);
        assert_eq!(tlr(&regs), (100_000, 50_000));
    }

    #[test]
    fn set_duty_keeps_raw_boot_period() {
        let regs = TmrCtr::new();
        let mut pair = TimerPair::new(&regs);
        pair.init();

        pair.set_duty(50);
        assert_eq!(tlr(&regs), (99_998, 49_999));
        assert!(pair.is_running());
    }

    #[test]
    fn set_duty_saturates_high_time() {
        let regs = TmrCtr::new();
        regs.ch[0].tlr.set(u32::MAX);
        let mut pair = TimerPair::new(&regs);

        pair.set_duty(127);
        assert_eq!(tlr(&regs), (u32::MAX, u32::MAX));
    }
}
