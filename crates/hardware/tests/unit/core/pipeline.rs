//! Pipeline timing tests.
//!
//! Cycle counts follow from the two timing disciplines: one stage per cycle in round-robin
//! mode, and a five-cycle fill plus one cycle per instruction and per stall when pipelined.
//! The cycle that discovers the end of the program is never counted.

use pipesim_core::core::pipeline::ExecutionMode;
use pipesim_core::isa::orbis32::funct::{SF_EQ, SF_NE};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;

#[test]
fn round_robin_spends_five_cycles_per_instruction() {
    let run = TestContext::new()
        .program(&[addi(1, 0, 1), addi(2, 0, 2), addi(3, 0, 3)])
        .run();
    let stats = run.stats();
    assert!(run.completed);
    assert_eq!(stats.cycles, 15);
    assert_eq!(stats.instructions_issued, 3);
    assert_eq!(stats.instructions_completed, 3);
    assert_eq!(stats.stalls(), 0);
    assert_eq!(run.processor.pipeline().current_stage(), 0);
}

#[test]
fn pipelined_overlaps_independent_instructions() {
    let run = TestContext::new()
        .pipelined()
        .program(&[addi(1, 0, 1), addi(2, 0, 2), addi(3, 0, 3)])
        .run();
    let stats = run.stats();
    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.instructions_completed, 3);
    assert_eq!(stats.stalls(), 0);
    assert!(run.processor.pipeline().latches().is_empty());
    assert_eq!((run.reg(1), run.reg(2), run.reg(3)), (1, 2, 3));
}

#[test]
fn read_after_write_stalls_three_cycles() {
    let ctx = TestContext::new().program(&[addi(1, 0, 5), add(2, 1, 1)]);

    let pipelined = ctx.clone().pipelined().run();
    let stats = pipelined.stats();
    assert_eq!(pipelined.reg(2), 10);
    assert_eq!(stats.stalls_data, 3);
    assert_eq!(stats.stalls_control, 0);
    assert_eq!(stats.cycles, 9);
    assert_eq!(stats.instructions_issued, 2);

    let sequential = ctx.run();
    assert_eq!(sequential.reg(2), 10);
    assert_eq!(sequential.stats().cycles, 10);
    assert_eq!(sequential.stats().stalls(), 0);
}

#[test]
fn jump_inserts_one_control_bubble() {
    // 0: l.j 12; 4: delay slot; 8: skipped; 12: target
    let program = [j(3), addi(1, 0, 1), addi(2, 0, 2), addi(3, 0, 3)];

    let pipelined = TestContext::new().pipelined().program(&program).run();
    let stats = pipelined.stats();
    assert_eq!(stats.stalls_control, 1);
    assert_eq!(stats.stalls_data, 0);
    assert_eq!(stats.instructions_completed, 3);
    assert_eq!(stats.cycles, 8);

    let sequential = TestContext::new().program(&program).run();
    assert_eq!(sequential.stats().cycles, 15);

    for run in [&pipelined, &sequential] {
        assert_eq!((run.reg(1), run.reg(2), run.reg(3)), (1, 0, 3));
    }
}

#[test]
fn stalled_delay_slot_counts_as_data_stall() {
    // 0: r1 = 1; 4: l.j 16; 8: delay slot reads r1; 12: skipped; 16: target
    let program = [
        addi(1, 0, 1),
        j(3),
        add(2, 1, 1),
        addi(3, 0, 7),
        addi(4, 0, 9),
    ];

    let run = TestContext::new().pipelined().program(&program).run();
    let stats = run.stats();
    // The jump resolves while the delay slot waits on r1, so no cycle is stalled for
    // control alone.
    assert_eq!(stats.stalls_data, 2);
    assert_eq!(stats.stalls_control, 0);
    assert_eq!(stats.stalls(), 2);
    assert_eq!((run.reg(2), run.reg(3), run.reg(4)), (2, 0, 9));
}

#[rstest]
fn delay_slot_executes_on_taken_branch(
    #[values(ExecutionMode::RoundRobin, ExecutionMode::Pipelined)] mode: ExecutionMode,
) {
    let run = TestContext::new()
        .mode(mode)
        .program(&[
            sfi(SF_EQ, 0, 0),
            bf(3),
            addi(1, 0, 1),
            addi(2, 0, 2),
            addi(3, 0, 3),
        ])
        .run();
    assert!(run.processor.flag());
    assert_eq!((run.reg(1), run.reg(2), run.reg(3)), (1, 0, 3));
}

#[rstest]
fn untaken_branch_falls_through(
    #[values(ExecutionMode::RoundRobin, ExecutionMode::Pipelined)] mode: ExecutionMode,
) {
    let run = TestContext::new()
        .mode(mode)
        .program(&[
            sfi(SF_EQ, 0, 0),
            bnf(3),
            addi(1, 0, 1),
            addi(2, 0, 2),
            addi(3, 0, 3),
        ])
        .run();
    assert_eq!((run.reg(1), run.reg(2), run.reg(3)), (1, 2, 3));
}

#[rstest]
fn call_and_return_through_link_register(
    #[values(ExecutionMode::RoundRobin, ExecutionMode::Pipelined)] mode: ExecutionMode,
) {
    let run = TestContext::new()
        .mode(mode)
        .program(&[
            jal(5),        // 0: call 20, r9 = 8
            addi(1, 0, 1), // 4: delay slot
            addi(2, 0, 2), // 8: return point
            j(5),          // 12: to the end marker at 32
            nop(),         // 16: delay slot
            addi(3, 0, 3), // 20: subroutine
            jr(9),         // 24: return
            addi(4, 0, 4), // 28: delay slot
        ])
        .run();
    assert!(run.completed);
    assert_eq!(run.reg(9), 8);
    assert_eq!(
        [run.reg(1), run.reg(2), run.reg(3), run.reg(4)],
        [1, 2, 3, 4]
    );
    assert_eq!(run.stats().instructions_completed, 8);
}

#[rstest]
fn conditional_move_follows_flag(
    #[values(ExecutionMode::RoundRobin, ExecutionMode::Pipelined)] mode: ExecutionMode,
) {
    let run = TestContext::new()
        .mode(mode)
        .program(&[
            addi(1, 0, 11),
            addi(2, 0, 22),
            sfi(SF_EQ, 0, 0),
            cmov(3, 1, 2),
            sfi(SF_NE, 0, 0),
            cmov(4, 1, 2),
        ])
        .run();
    assert_eq!((run.reg(3), run.reg(4)), (11, 22));
}

/// Sums 5 + 4 + 3 + 2 + 1 into r2.
fn countdown_loop() -> Vec<u32> {
    vec![
        addi(1, 0, 5),
        addi(2, 0, 0),
        add(2, 2, 1),     // 8: loop
        addi(1, 1, -1),
        sfi(SF_NE, 1, 0),
        bf(-3),
        nop(),
    ]
}

#[test]
fn loop_gives_same_result_in_both_modes() {
    let ctx = TestContext::new().program(&countdown_loop());
    let sequential = ctx.clone().run();
    let pipelined = ctx.pipelined().run();

    assert_eq!(sequential.reg(2), 15);
    assert_eq!(sequential.regs(), pipelined.regs());
    assert_eq!(
        sequential.stats().instructions_completed,
        pipelined.stats().instructions_completed
    );
    assert_eq!(sequential.stats().instructions_completed, 27);
    assert_eq!(sequential.stats().cycles, 5 * 27);

    let stats = pipelined.stats();
    assert!(stats.cycles < sequential.stats().cycles);
    assert!(stats.stalls_data > 0);
    assert_eq!(stats.stalls_control, 5);
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Addi(u8, u8, i16),
    Add(u8, u8, u8),
    Sub(u8, u8, u8),
    Xor(u8, u8, u8),
    Mul(u8, u8, u8),
    Slli(u8, u8, u8),
}

impl Op {
    fn encode(self) -> u32 {
        match self {
            Self::Addi(d, a, k) => addi(d, a, i32::from(k)),
            Self::Add(d, a, b) => add(d, a, b),
            Self::Sub(d, a, b) => sub(d, a, b),
            Self::Xor(d, a, b) => xor(d, a, b),
            Self::Mul(d, a, b) => mul(d, a, b),
            Self::Slli(d, a, k) => slli(d, a, u32::from(k)),
        }
    }
}

fn op() -> impl Strategy<Value = Op> {
    let reg = || 0u8..8;
    prop_oneof![
        (reg(), reg(), any::<i16>()).prop_map(|(d, a, k)| Op::Addi(d, a, k)),
        (reg(), reg(), reg()).prop_map(|(d, a, b)| Op::Add(d, a, b)),
        (reg(), reg(), reg()).prop_map(|(d, a, b)| Op::Sub(d, a, b)),
        (reg(), reg(), reg()).prop_map(|(d, a, b)| Op::Xor(d, a, b)),
        (reg(), reg(), reg()).prop_map(|(d, a, b)| Op::Mul(d, a, b)),
        (reg(), reg(), 0u8..32).prop_map(|(d, a, k)| Op::Slli(d, a, k)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn straight_line_code_is_mode_independent(ops in prop::collection::vec(op(), 1..24)) {
        let program: Vec<u32> = ops.iter().map(|op| op.encode()).collect();
        let ctx = TestContext::new().program(&program);
        let sequential = ctx.clone().run();
        let pipelined = ctx.pipelined().run();

        prop_assert!(sequential.completed && pipelined.completed);
        prop_assert_eq!(sequential.regs(), pipelined.regs());
        prop_assert_eq!(sequential.reg(0), 0);
        prop_assert_eq!(sequential.stats().cycles, 5 * program.len() as u64);
        prop_assert_eq!(sequential.stats().bytes_read, pipelined.stats().bytes_read);
        prop_assert_eq!(sequential.stats().bytes_written, pipelined.stats().bytes_written);
        prop_assert_eq!(
            pipelined.stats().cycles,
            program.len() as u64 + 4 + pipelined.stats().stalls()
        );
    }
}
