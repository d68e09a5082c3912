#![no_main]
#![no_std]

use panic_abort as _;

use cortex_m_rt::entry;

use pmod_pwm::support::mailbox_at;
use pmod_pwm::*;

//-----------------------------------------------------------------------------

#[entry]
fn main() -> ! {
    // pure polling, nothing may preempt the pair writes
    cortex_m::interrupt::disable();

    let (timers, switch, mailbox) = unsafe {
        (
            TmrCtr::from_addr(config::TMRCTR_BASE_ADDR),
            SwitchRegs::from_addr(config::SWITCH_BASE_ADDR),
            mailbox_at(config::MAILBOX_CMD_ADDR),
        )
    };

    let mut service = PwmService::new(mailbox, TimerPair::new(timers), ServiceConfig::default());
    service.boot(&mut IoSwitch::new(switch));

    service.run()
}
