use vcell::VolatileCell;

/// Command word shared with the requester.
///
/// Zero means "no command". The requester posts a non-zero word and waits
/// until it reads zero again; the core clears it once the command is done.
pub trait Mailbox {
    fn read(&self) -> u32;
    fn clear(&self);

    /// Spins until a command is posted. There is no timeout.
    fn wait_command(&self) -> u32 {
        loop {
            let cmd = self.read();
            if cmd != 0 {
                return cmd;
            }
            core::hint::spin_loop();
        }
    }
}

impl Mailbox for VolatileCell<u32> {
    fn read(&self) -> u32 {
        self.get()
    }

    fn clear(&self) {
        self.set(0);
    }
}

impl<M: Mailbox + ?Sized> Mailbox for &M {
    fn read(&self) -> u32 {
        (**self).read()
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn wait_command(&self) -> u32 {
        (**self).wait_command()
    }
}

/// # Safety
/// `addr` must point to the mailbox command word.
pub unsafe fn mailbox_at(addr: usize) -> &'static VolatileCell<u32> {
    &*(addr as *const VolatileCell<u32>)
}
