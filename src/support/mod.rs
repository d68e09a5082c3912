mod registers;
pub use registers::{SwitchRegs, Tcsr, TimerChannel, TmrCtr};

mod mailbox;
pub use mailbox::{mailbox_at, Mailbox};

mod io_switch;
pub use io_switch::{IoSwitch, PinFn, PWM_ROUTING};
