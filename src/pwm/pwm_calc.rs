use fugit::MicrosDurationU32;

use crate::config::{PIPELINE_LATENCY_TICKS, TICKS_PER_US};

/// Raw TLR values of the period and high time counters
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTicks {
    pub period: u32,
    pub high: u32,
}

impl PwmTicks {
    /// high_us = duty * period / 100, truncated. No range checks: duty over
    /// 100 gives a high time longer than the period.
    pub fn from_us(period_us: u16, duty_percent: u8) -> Self {
        let period_us = period_us as u32;
        let high_us = duty_percent as u32 * period_us / 100;

        Self {
            period: us_to_ticks(period_us),
            high: us_to_ticks(high_us),
        }
    }

    /// Any duration is accepted, loads saturate at `u32::MAX`.
    pub fn from_duration(period: MicrosDurationU32, duty_percent: u8) -> Self {
        let period_us = period.to_micros() as u64;
        let high_us = duty_percent as u64 * period_us / 100;

        Self {
            period: saturate(period_us * TICKS_PER_US as u64),
            high: saturate(high_us * TICKS_PER_US as u64),
        }
    }

    /// Keep the period load, derive the high time from its raw ticks
    pub fn with_duty(self, duty_percent: u8) -> Self {
        Self {
            period: self.period,
            high: saturate(self.period as u64 * duty_percent as u64 / 100),
        }
    }

    pub fn period_us(&self) -> u32 {
        self.period / TICKS_PER_US
    }

    pub fn high_us(&self) -> u32 {
        self.high / TICKS_PER_US
    }

    /// Ticks the hardware actually spends per period
    pub fn realized_period(&self) -> u32 {
        self.period.saturating_add(PIPELINE_LATENCY_TICKS)
    }

    pub fn realized_high(&self) -> u32 {
        self.high.saturating_add(PIPELINE_LATENCY_TICKS)
    }

    /// Duty in whole percent as the loads stand, 0 for an empty period
    pub fn duty_percent(&self) -> u8 {
        if self.period == 0 {
            return 0;
        }
        (self.high as u64 * 100 / self.period as u64).min(u8::MAX as u64) as u8
    }
}

pub fn us_to_ticks(us: u32) -> u32 {
    us.saturating_mul(TICKS_PER_US)
}

fn saturate(v: u64) -> u32 {
    v.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use fugit::ExtU32;

    use super::*;
    use crate::config;

    #[test]
    fn third_of_a_millisecond() {
        let t = PwmTicks::from_us(1000, 33);
        assert_eq!(t.period, 100_000);
        assert_eq!(t.high, 33_000);
        assert_eq!(t.duty_percent(), 33);
    }

    #[test]
    fn high_time_truncates() {
        // 7 * 33 / 100 = 2.31 us
        let t = PwmTicks::from_us(7, 33);
        assert_eq!(t.high, 200);
        assert_eq!(t.period, 700);
    }

    #[test]
    fn over_100_percent_exceeds_period() {
        let t = PwmTicks::from_us(1000, 127);
        assert_eq!(t.high, 127_000);
        assert!(t.high > t.period);
    }

    #[test]
    fn largest_word_fits() {
        let t = PwmTicks::from_us(u16::MAX, 127);
        assert_eq!(t.period, 6_553_500);
        assert_eq!(t.high, 127 * 65535 / 100 * 100);
    }

    #[test]
    fn zero_period() {
        let t = PwmTicks::from_us(0, 50);
        assert_eq!(t, PwmTicks { period: 0, high: 0 });
        assert_eq!(t.duty_percent(), 0);
    }

    #[test]
    fn boot_loads_half_duty() {
        let boot = PwmTicks {
            period: config::BOOT_PERIOD_LOAD,
            high: config::BOOT_HIGH_LOAD,
        };
        assert_eq!(boot.realized_period(), 100_000);
        assert_eq!(boot.realized_high() * 2, boot.realized_period());
    }

    #[test]
    fn duration_matches_micros() {
        assert_eq!(
            PwmTicks::from_duration(2000u32.micros(), 25),
            PwmTicks::from_us(2000, 25)
        );
    }

    #[test]
    fn long_duration_saturates() {
        let t = PwmTicks::from_duration(50_000_000u32.micros(), 50);
        assert_eq!(t.period, u32::MAX);
        assert_eq!(t.high, u32::MAX);

        let t = PwmTicks::from_duration(30_000_000u32.micros(), 10);
        assert_eq!(t.period, 3_000_000_000);
        assert_eq!(t.high, 300_000_000);
        assert_eq!(us_to_ticks(u32::MAX), u32::MAX);
    }

    #[test]
    fn with_duty_keeps_period_ticks() {
        let t = PwmTicks {
            period: 99_998,
            high: 49_998,
        }
        .with_duty(25);
        assert_eq!(t, PwmTicks { period: 99_998, high: 24_999 });
    }
}
