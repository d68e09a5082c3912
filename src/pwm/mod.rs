mod command;
pub use command::{Command, CommandPolicy, InvalidCommand};

mod pwm_calc;
pub use pwm_calc::{us_to_ticks, PwmTicks};

mod timer_pair;
pub use timer_pair::{PairState, TimerPair};
