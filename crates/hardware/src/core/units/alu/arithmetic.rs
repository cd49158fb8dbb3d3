//! ALU arithmetic operations.
//!
//! Implements wrapping addition, subtraction and multiplication, plus signed and
//! unsigned division. All results are truncated to the 32-bit word.
//!
//! Division by zero produces 0; the simulator has no range exception model.
//! Signed `i32::MIN / -1` wraps to `i32::MIN`.

use crate::core::pipeline::signals::AluOp;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 32-bit result. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => (a as i32).wrapping_mul(b as i32) as u32,
        AluOp::Mulu => a.wrapping_mul(b),
        AluOp::Div => {
            if b == 0 {
                0
            } else {
                (a as i32).wrapping_div(b as i32) as u32
            }
        }
        AluOp::Divu => a.checked_div(b).unwrap_or(0),
        _ => 0,
    }
}
