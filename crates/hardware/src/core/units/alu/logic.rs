//! ALU logical, extension and comparison operations.
//!
//! Implements bitwise AND/OR/XOR, byte and half-word extension, find-first/last-one,
//! and the ten compare conditions. Compares return 1 or 0; write-back moves that
//! value into the flag.

use crate::core::pipeline::signals::{AluOp, Condition};

/// Evaluates a compare condition on two words.
pub const fn compare(cond: Condition, a: u32, b: u32) -> bool {
    let (sa, sb) = (a as i32, b as i32);
    match cond {
        Condition::Eq => a == b,
        Condition::Ne => a != b,
        Condition::Gtu => a > b,
        Condition::Geu => a >= b,
        Condition::Ltu => a < b,
        Condition::Leu => a <= b,
        Condition::Gts => sa > sb,
        Condition::Ges => sa >= sb,
        Condition::Lts => sa < sb,
        Condition::Les => sa <= sb,
    }
}

/// Executes a logical, extension or comparison operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform.
/// * `a`  - First operand (the only input of extension and find-bit operations).
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 32-bit result. Returns `0` for opcodes outside this group.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Exths => a as u16 as i16 as i32 as u32,
        AluOp::Extbs => a as u8 as i8 as i32 as u32,
        AluOp::Exthz => a & 0xFFFF,
        AluOp::Extbz => a & 0xFF,
        AluOp::Ff1 => {
            if a == 0 {
                0
            } else {
                a.trailing_zeros() + 1
            }
        }
        AluOp::Fl1 => u32::BITS - a.leading_zeros(),
        AluOp::Compare(cond) => compare(cond, a, b) as u32,
        _ => 0,
    }
}
