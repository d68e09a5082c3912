#![no_std]

mod fmt;

pub mod config;
pub mod pwm;
pub mod support;

mod service;

pub use config::ServiceConfig;
pub use pwm::{Command, CommandPolicy, InvalidCommand, PairState, PwmTicks, TimerPair};
pub use service::PwmService;
pub use support::{IoSwitch, Mailbox, PinFn, SwitchRegs, TmrCtr};
