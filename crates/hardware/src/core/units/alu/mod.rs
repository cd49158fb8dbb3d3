//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 32-bit integer ALU used in the Execute stage. The unit is
//! configured through two operand ports and an operation port, then queried for its
//! result; it keeps no state between uses beyond those three inputs.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulu, Div, Divu
//! - [`logic`]:      And, Or, Xor, extensions, find-bit and compares
//! - [`shifts`]:     Sll, Srl, Sra, Ror

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical, extension and comparison operations.
pub mod logic;

/// Shift and rotate operations.
pub mod shifts;

use crate::common::SimError;
use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit for integer operations.
///
/// # Examples
///
/// ```
/// use pipesim_core::core::units::alu::Alu;
/// use pipesim_core::core::pipeline::signals::AluOp;
///
/// let mut alu = Alu::new();
/// alu.set_a(5);
/// alu.set_b(7);
/// alu.set_op(AluOp::Add);
/// assert_eq!(alu.result(), Ok(12));
///
/// // Unset operations fail only when the result is requested.
/// assert!(Alu::new().result().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Alu {
    a: u32,
    b: u32,
    op: Option<AluOp>,
}

impl Alu {
    /// Creates an ALU with zero operands and no operation selected.
    pub const fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            op: None,
        }
    }

    /// Drives operand A.
    pub fn set_a(&mut self, a: u32) {
        self.a = a;
    }

    /// Drives operand B.
    pub fn set_b(&mut self, b: u32) {
        self.b = b;
    }

    /// Selects the operation.
    pub fn set_op(&mut self, op: AluOp) {
        self.op = Some(op);
    }

    /// Computes the result of the configured operation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::IllegalInstruction`] when no operation has been selected.
    pub fn result(&self) -> Result<u32, SimError> {
        self.op
            .map(|op| Self::execute(op, self.a, self.b))
            .ok_or_else(|| SimError::IllegalInstruction("ALU operation not set".to_string()))
    }

    /// Executes an integer ALU operation.
    ///
    /// Dispatches to the appropriate submodule based on the operation type.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also used as shift amount)
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::core::pipeline::signals::{AluOp, Condition};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Sll, 1, 36), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Compare(Condition::Lts), -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 7), 14);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Mulu | AluOp::Div | AluOp::Divu => {
                arithmetic::execute(op, a, b)
            }

            AluOp::And
            | AluOp::Or
            | AluOp::Xor
            | AluOp::Exths
            | AluOp::Extbs
            | AluOp::Exthz
            | AluOp::Extbz
            | AluOp::Ff1
            | AluOp::Fl1
            | AluOp::Compare(_) => logic::execute(op, a, b),

            AluOp::Sll | AluOp::Srl | AluOp::Sra | AluOp::Ror => shifts::execute(op, a, b),

            AluOp::PassB => b,
        }
    }
}
