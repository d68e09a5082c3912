use crate::pwm::CommandPolicy;
use crate::support::Tcsr;

//-----------------------------------------------------------------------------

/// Timer clock is 100 MHz
pub const TICKS_PER_US: u32 = 100;

/// realized interval = (TLRx + 2) * tick
pub const PIPELINE_LATENCY_TICKS: u32 = 2;

//-----------------------------------------------------------------------------

/// 0010 1001 0110 => no cascade, no all timers, enable pwm, enable timer,
/// no interrupt, no load, auto reload, no capture, enable external generate,
/// down counter, generate mode
pub const PWM_CONTROL_WORD: u32 = Tcsr::PWM_RUN.bits();

//-----------------------------------------------------------------------------

/// 100 ms period
pub const BOOT_PERIOD_LOAD: u32 = 99_998;
/// 50% duty cycle
pub const BOOT_HIGH_LOAD: u32 = 49_998;

//-----------------------------------------------------------------------------

pub const MIN_DUTY_PERCENT: u8 = 1;
pub const MAX_DUTY_PERCENT: u8 = 99;

pub const DEFAULT_POLICY: CommandPolicy = CommandPolicy::PassThrough;

//-----------------------------------------------------------------------------

pub const MAILBOX_CMD_ADDR: usize = 0x0000_7FFC;
pub const TMRCTR_BASE_ADDR: usize = 0x4180_0000;
pub const SWITCH_BASE_ADDR: usize = 0x4400_0000;

//-----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub struct ServiceConfig {
    pub policy: CommandPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            policy: DEFAULT_POLICY,
        }
    }
}
