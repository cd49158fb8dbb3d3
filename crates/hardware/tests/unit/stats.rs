use pipesim_core::stats::SimStats;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;

#[test]
fn report_layout() {
    let stats = SimStats {
        cycles: 20,
        instructions_issued: 5,
        instructions_completed: 4,
        stalls_data: 3,
        stalls_control: 1,
        bytes_read: 24,
        bytes_written: 4,
        pipelined: true,
    };
    assert_eq!(
        stats.to_string(),
        "20 clock cycles, 5 instructions issued, 4 instructions completed.\n\
         4 stall cycles inserted.\n\
         24 bytes read, 4 bytes written.\n"
    );
    assert!((stats.cpi() - 5.0).abs() < f64::EPSILON);
}

#[test]
fn empty_run_has_zero_cpi() {
    assert!(SimStats::default().cpi().abs() < f64::EPSILON);
}

#[test]
fn counters_serialize_to_json() {
    let stats = SimStats {
        cycles: 7,
        ..Default::default()
    };
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["cycles"], 7);
    assert_eq!(json["stalls_data"], 0);
    assert_eq!(json["pipelined"], false);
}

#[test]
fn processor_reports_mode_in_stats() {
    let program = [addi(1, 0, 1)];
    let sequential = TestContext::new().program(&program).run().stats();
    let pipelined = TestContext::new().pipelined().program(&program).run().stats();
    assert!(!sequential.pipelined);
    assert!(pipelined.pipelined);
    assert!(pipelined.to_string().contains("stall cycles inserted"));
    assert!(!sequential.to_string().contains("stall"));
}
