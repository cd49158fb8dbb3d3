//! ALU operation tests.
//!
//! Deterministic edge cases for every operation plus algebraic properties checked over
//! random operands.

use pipesim_core::core::pipeline::signals::{AluOp, Condition};
use pipesim_core::core::units::alu::Alu;
use proptest::prelude::*;
use rstest::rstest;

const NEG1: u32 = u32::MAX;
const I32_MIN: u32 = 0x8000_0000;
const I32_MAX: u32 = 0x7FFF_FFFF;

#[rstest]
#[case::add_wraps(AluOp::Add, NEG1, 1, 0)]
#[case::sub_wraps(AluOp::Sub, 0, 1, NEG1)]
#[case::mul_signed(AluOp::Mul, -3_i32 as u32, 7, -21_i32 as u32)]
#[case::mul_low_bits(AluOp::Mul, 0x1_0000, 0x1_0000, 0)]
#[case::mulu(AluOp::Mulu, 0xFFFF, 0xFFFF, 0xFFFE_0001)]
#[case::div_truncates_toward_zero(AluOp::Div, -7_i32 as u32, 2, -3_i32 as u32)]
#[case::div_by_zero(AluOp::Div, 42, 0, 0)]
#[case::div_overflow(AluOp::Div, I32_MIN, NEG1, I32_MIN)]
#[case::divu(AluOp::Divu, NEG1, 2, I32_MAX)]
#[case::divu_by_zero(AluOp::Divu, 42, 0, 0)]
#[case::and(AluOp::And, 0xF0F0, 0xFF00, 0xF000)]
#[case::or(AluOp::Or, 0xF0F0, 0x0F0F, 0xFFFF)]
#[case::xor(AluOp::Xor, 0xFFFF, 0x00FF, 0xFF00)]
#[case::sll(AluOp::Sll, 1, 31, I32_MIN)]
#[case::sll_masks_amount(AluOp::Sll, 1, 33, 2)]
#[case::srl(AluOp::Srl, I32_MIN, 31, 1)]
#[case::sra(AluOp::Sra, I32_MIN, 31, NEG1)]
#[case::ror(AluOp::Ror, 1, 1, I32_MIN)]
#[case::exths(AluOp::Exths, 0x1234_8000, 0, 0xFFFF_8000)]
#[case::extbs(AluOp::Extbs, 0x80, 0, 0xFFFF_FF80)]
#[case::exthz(AluOp::Exthz, 0xFFFF_8000, 0, 0x8000)]
#[case::extbz(AluOp::Extbz, 0xFFFF_FF80, 0, 0x80)]
#[case::ff1(AluOp::Ff1, 0b1000, 0, 4)]
#[case::ff1_zero(AluOp::Ff1, 0, 0, 0)]
#[case::fl1(AluOp::Fl1, I32_MIN, 0, 32)]
#[case::fl1_zero(AluOp::Fl1, 0, 0, 0)]
#[case::pass_b(AluOp::PassB, 1, 2, 2)]
fn operation(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[rstest]
#[case::eq(Condition::Eq, 5, 5, true)]
#[case::ne(Condition::Ne, 5, 5, false)]
#[case::gtu_treats_negative_as_large(Condition::Gtu, NEG1, 1, true)]
#[case::gts_treats_negative_as_small(Condition::Gts, NEG1, 1, false)]
#[case::geu_equal(Condition::Geu, 3, 3, true)]
#[case::ltu(Condition::Ltu, 1, NEG1, true)]
#[case::lts(Condition::Lts, NEG1, 1, true)]
#[case::leu(Condition::Leu, 4, 3, false)]
#[case::ges(Condition::Ges, I32_MIN, I32_MAX, false)]
#[case::les(Condition::Les, I32_MIN, I32_MAX, true)]
fn compare(#[case] cond: Condition, #[case] a: u32, #[case] b: u32, #[case] taken: bool) {
    assert_eq!(Alu::execute(AluOp::Compare(cond), a, b), u32::from(taken));
}

#[test]
fn result_requires_an_operation() {
    let mut alu = Alu::new();
    alu.set_a(1);
    alu.set_b(2);
    assert!(alu.result().is_err());
    alu.set_op(AluOp::Sub);
    assert_eq!(alu.result(), Ok(NEG1));
}

proptest! {
    #[test]
    fn add_then_sub_restores(a in any::<u32>(), b in any::<u32>()) {
        let sum = Alu::execute(AluOp::Add, a, b);
        prop_assert_eq!(Alu::execute(AluOp::Sub, sum, b), a);
    }

    #[test]
    fn xor_is_self_inverse(a in any::<u32>(), b in any::<u32>()) {
        let x = Alu::execute(AluOp::Xor, a, b);
        prop_assert_eq!(Alu::execute(AluOp::Xor, x, b), a);
    }

    #[test]
    fn signed_and_unsigned_products_agree_on_low_bits(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(Alu::execute(AluOp::Mul, a, b), Alu::execute(AluOp::Mulu, a, b));
    }

    #[test]
    fn rotate_by_full_width_is_identity(a in any::<u32>()) {
        prop_assert_eq!(Alu::execute(AluOp::Ror, a, 32), a);
    }

    #[test]
    fn divu_reconstructs_dividend(a in any::<u32>(), b in 1..=u32::MAX) {
        let q = Alu::execute(AluOp::Divu, a, b);
        prop_assert_eq!(q.wrapping_mul(b) + a % b, a);
    }

    #[test]
    fn compare_conditions_are_complementary(a in any::<u32>(), b in any::<u32>()) {
        let cmp = |c| Alu::execute(AluOp::Compare(c), a, b);
        prop_assert_eq!(cmp(Condition::Eq) ^ cmp(Condition::Ne), 1);
        prop_assert_eq!(cmp(Condition::Ltu) ^ cmp(Condition::Geu), 1);
        prop_assert_eq!(cmp(Condition::Gts) ^ cmp(Condition::Les), 1);
    }
}
