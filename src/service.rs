use crate::config::ServiceConfig;
use crate::pwm::{Command, TimerPair};
use crate::support::{IoSwitch, Mailbox, PWM_ROUTING};

/// Mailbox driven PWM: wait for a word, act on it, clear the mailbox.
pub struct PwmService<'a, M> {
    mailbox: M,
    timers: TimerPair<'a>,
    config: ServiceConfig,
}

impl<'a, M: Mailbox> PwmService<'a, M> {
    pub fn new(mailbox: M, timers: TimerPair<'a>, config: ServiceConfig) -> Self {
        Self {
            mailbox,
            timers,
            config,
        }
    }

    /// Start the boot waveform and route it to pin 0
    pub fn boot(&mut self, switch: &mut IoSwitch<'_>) {
        self.timers.init();
        switch.configure(&PWM_ROUTING);
    }

    /// Apply one raw word. Returns what reached the timers, `None` if the
    /// policy dropped it.
    pub fn handle(&mut self, cmd: u32) -> Option<Command> {
        trace!("mailbox: {:#x}", cmd);

        let decoded = Command::decode(cmd);
        let cmd = match self.config.policy.apply(decoded) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("command {:#x} dropped: {}", cmd, e);
                return None;
            }
        };

        match cmd {
            Command::Stop => self.timers.disable(),
            Command::Configure {
                period_us,
                duty_percent,
            } => self.timers.configure_and_run(period_us, duty_percent),
        }
        Some(cmd)
    }

    /// Block until the next command, run it and acknowledge
    pub fn service_once(&mut self) -> Option<Command> {
        let cmd = self.mailbox.wait_command();
        let res = self.handle(cmd);
        self.mailbox.clear();
        res
    }

    pub fn run(mut self) -> ! {
        loop {
            self.service_once();
        }
    }

    pub fn timers(&self) -> &TimerPair<'a> {
        &self.timers
    }

    pub fn mailbox(&self) -> &M {
        &self.mailbox
    }
}
