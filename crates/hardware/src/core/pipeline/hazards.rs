//! Data and Control Hazard Detection.
//!
//! This module implements the combinational hazard unit consulted in pipelined mode. It is
//! evaluated once per cycle from the latches committed at the end of the previous cycle,
//! before any stage propagates, so its outcome does not depend on stage order. It provides:
//! 1. **Data Hazards:** The instruction in IF/ID reads a register or the flag that an older,
//!    still in-flight instruction will write. There is no forwarding path, so Decode stalls.
//! 2. **Control Hazards:** A control transfer sits in ID/EX and resolves this cycle, so Fetch
//!    inserts a bubble instead of fetching past the delay slot.

use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::stages::decode::control_signals;
use crate::isa::decode::InstructionDecoder;

/// Stall requests produced by the hazard unit for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardSignals {
    /// Decode must emit a bubble and hold IF/ID; Fetch must hold.
    pub data_stall: bool,
    /// Fetch must emit a bubble while a control transfer resolves.
    pub control_stall: bool,
}

impl HazardSignals {
    /// Returns `true` if any stall is requested.
    pub const fn any(self) -> bool {
        self.data_stall || self.control_stall
    }
}

/// Checks whether the instruction waiting in IF/ID must stall on an in-flight writer.
///
/// A register read conflicts with any valid ID/EX, EX/MEM or MEM/WB entry writing the same
/// register; `r0` never conflicts. A flag read conflicts with any in-flight flag writer.
/// Undecodable words never stall; Decode reports them.
///
/// # Examples
///
/// ```
/// use pipesim_core::core::pipeline::hazards::need_stall_data;
/// use pipesim_core::core::pipeline::latches::{IdExEntry, IfIdEntry, Latches};
/// use pipesim_core::core::pipeline::signals::ControlSignals;
///
/// // l.addi r1,r0,5 in ID/EX; l.add r3,r2,r1 in IF/ID.
/// let latches = Latches {
///     if_id: Some(IfIdEntry { pc: 4, inst: 0xe062_0800 }),
///     id_ex: Some(IdExEntry {
///         rd: 1,
///         ctrl: ControlSignals { reg_write: true, ..Default::default() },
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert!(need_stall_data(&latches));
/// ```
pub fn need_stall_data(latches: &Latches) -> bool {
    let Some(entry) = latches.if_id else {
        return false;
    };
    let decoder = InstructionDecoder::new(entry.inst);
    let Ok(ctrl) = control_signals(&decoder) else {
        return false;
    };

    let src_a = (ctrl.reads_a && decoder.a() != 0).then_some(decoder.a());
    let src_b = (ctrl.reads_b && decoder.b() != 0).then_some(decoder.b());

    latches.in_flight().any(|(rd, older)| {
        let reg_conflict = older.reg_write && rd != 0 && (src_a == Some(rd) || src_b == Some(rd));
        let flag_conflict = older.flag_write && ctrl.reads_flag;
        reg_conflict || flag_conflict
    })
}

/// Checks whether a control transfer resolves in Execute this cycle.
pub fn need_stall_control(latches: &Latches) -> bool {
    latches.id_ex.is_some_and(|e| e.ctrl.control.is_transfer())
}

/// Evaluates both hazard conditions for the coming cycle.
pub fn detect(latches: &Latches) -> HazardSignals {
    HazardSignals {
        data_stall: need_stall_data(latches),
        control_stall: need_stall_control(latches),
    }
}
