use core::fmt;

use crate::config::{MAX_DUTY_PERCENT, MIN_DUTY_PERCENT};

const STOP_BIT: u32 = 0x01;
const DUTY_SHIFT: u32 = 1;
const DUTY_MASK: u32 = 0x7F;
const PERIOD_SHIFT: u32 = 16;
const PERIOD_MASK: u32 = 0xFFFF;

/// Decoded mailbox word
///
/// bits 31:16 => period in us
/// bits 15:8 is not used
/// bits 7:1 => duty cycle in %, valid range is 1 to 99
/// bit 0 => stop
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Stop,
    Configure { period_us: u16, duty_percent: u8 },
}

impl Command {
    /// Never fails: the stop bit wins over everything else, other fields are
    /// taken as is.
    pub fn decode(cmd: u32) -> Self {
        if cmd & STOP_BIT != 0 {
            return Command::Stop;
        }

        Command::Configure {
            period_us: ((cmd >> PERIOD_SHIFT) & PERIOD_MASK) as u16,
            duty_percent: ((cmd >> DUTY_SHIFT) & DUTY_MASK) as u8,
        }
    }

    /// Requester side. Duty above 127 is truncated to 7 bits.
    pub fn encode(&self) -> u32 {
        match *self {
            Command::Stop => STOP_BIT,
            Command::Configure {
                period_us,
                duty_percent,
            } => {
                ((period_us as u32 & PERIOD_MASK) << PERIOD_SHIFT)
                    | ((duty_percent as u32 & DUTY_MASK) << DUTY_SHIFT)
            }
        }
    }
}

impl From<u32> for Command {
    fn from(cmd: u32) -> Self {
        Command::decode(cmd)
    }
}

impl From<Command> for u32 {
    fn from(cmd: Command) -> Self {
        cmd.encode()
    }
}

//-----------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidCommand {
    ZeroPeriod,
    DutyOutOfRange(u8),
}

impl fmt::Display for InvalidCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidCommand::ZeroPeriod => write!(f, "period is 0 us"),
            InvalidCommand::DutyOutOfRange(d) => write!(
                f,
                "duty {}% outside {}..={}",
                d, MIN_DUTY_PERCENT, MAX_DUTY_PERCENT
            ),
        }
    }
}

/// What to do with a Configure outside 1..=99 % or with a zero period.
///
/// Nothing is ever reported back to the requester, whichever policy is used.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandPolicy {
    /// Hand the values to the timers unchanged
    PassThrough,
    /// Pull duty into 1..=99 and period up to 1 us
    Clamp,
    /// Drop the command
    Reject,
}

impl CommandPolicy {
    pub fn apply(self, cmd: Command) -> Result<Command, InvalidCommand> {
        let (period_us, duty_percent) = match cmd {
            Command::Stop => return Ok(cmd),
            Command::Configure {
                period_us,
                duty_percent,
            } => (period_us, duty_percent),
        };

        match self {
            CommandPolicy::PassThrough => Ok(cmd),
            CommandPolicy::Clamp => Ok(Command::Configure {
                period_us: period_us.max(1),
                duty_percent: num::clamp(duty_percent, MIN_DUTY_PERCENT, MAX_DUTY_PERCENT),
            }),
            CommandPolicy::Reject => {
                if period_us == 0 {
                    Err(InvalidCommand::ZeroPeriod)
                } else if !(MIN_DUTY_PERCENT..=MAX_DUTY_PERCENT).contains(&duty_percent) {
                    Err(InvalidCommand::DutyOutOfRange(duty_percent))
                } else {
                    Ok(cmd)
                }
            }
        }
    }
}
