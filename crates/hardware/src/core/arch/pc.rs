//! Program counter with delay-slot aware redirection.
//!
//! Every OpenRISC control transfer executes the instruction that follows it (the delay
//! slot) before control reaches the target. Fetch advances the counter after each fetch;
//! Execute redirects it once the transfer resolves. When the redirect arrives before the
//! delay slot has been fetched, which is always the case when stages run one at a time,
//! the target is parked until Fetch consumes the delay slot.

use crate::common::INSTRUCTION_SIZE;

/// A resolved control transfer waiting for its delay slot to be fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingRedirect {
    delay_slot: u32,
    target: u32,
}

/// The architectural program counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgramCounter {
    pc: u32,
    pending: Option<PendingRedirect>,
}

impl ProgramCounter {
    /// Creates a program counter pointing at `entry`.
    pub const fn new(entry: u32) -> Self {
        Self {
            pc: entry,
            pending: None,
        }
    }

    /// Address of the next instruction to fetch.
    #[inline(always)]
    pub const fn current(&self) -> u32 {
        self.pc
    }

    /// Returns `true` while a redirect is waiting for its delay slot.
    pub const fn has_pending_redirect(&self) -> bool {
        self.pending.is_some()
    }

    /// Moves past the instruction fetched at `fetched_at`.
    ///
    /// If that instruction is the delay slot of a resolved transfer, control continues at
    /// the transfer's target; otherwise it continues sequentially.
    pub fn advance(&mut self, fetched_at: u32) {
        match self.pending {
            Some(p) if p.delay_slot == fetched_at => {
                self.pc = p.target;
                self.pending = None;
            }
            _ => self.pc = fetched_at.wrapping_add(INSTRUCTION_SIZE),
        }
    }

    /// Applies a taken control transfer whose delay slot lives at `delay_slot`.
    pub fn redirect(&mut self, delay_slot: u32, target: u32) {
        if self.pc == delay_slot {
            self.pending = Some(PendingRedirect { delay_slot, target });
        } else {
            self.pc = target;
        }
    }
}
