use crate::Error;
use crate::topo::{DragonflyParams, checked_tri, tri};

fn params(g: u64, h: u64, a: u64, p: u64, k: u64) -> DragonflyParams {
    DragonflyParams {
        global_width: g,
        global_weight: h,
        local_width: a,
        local_weight: p,
        concentration: k,
    }
}

#[test]
fn tri_counts_unordered_pairs() {
    assert_eq!(tri(0), 0);
    assert_eq!(tri(1), 0);
    assert_eq!(tri(2), 1);
    assert_eq!(tri(4), 6);
    assert_eq!(tri(7), 21);
}

#[test]
fn tri_handles_large_inputs_without_overflow() {
    // 2^31 * (2^32 - 1) 仍在 u64 内
    assert_eq!(tri(1 << 32), (1 << 31) * ((1 << 32) - 1));
    assert_eq!(checked_tri(1 << 33), None);
    assert_eq!(tri(1 << 33), u64::MAX);
    assert_eq!(tri(u64::MAX), u64::MAX);
}

#[test]
fn dragonfly_small_instance_matches_hand_computation() {
    let m = params(4, 1, 4, 1, 2).compute().expect("valid dragonfly");
    assert_eq!(m.terminals, 32);
    assert_eq!(m.routers, 16);
    assert_eq!(m.radix, 6);
    assert_eq!(m.channels, [32, 24, 6]);
    assert_eq!(m.bisections, [0.25, 1.0]);
}

#[test]
fn dragonfly_global_ports_round_up_across_group() {
    // (g-1)*h = 3 global links per group spread over 2 routers -> 2 ports each
    let m = params(4, 1, 2, 1, 1).compute().expect("valid dragonfly");
    assert_eq!(m.radix, 1 + 1 + 2);

    let m = params(5, 3, 4, 2, 3).compute().expect("valid dragonfly");
    assert_eq!(m.terminals, 60);
    assert_eq!(m.routers, 20);
    assert_eq!(m.radix, 3 + 6 + 3);
    assert_eq!(m.channels, [60, 60, 30]);
    assert!((m.bisections[0] - 0.625).abs() < 1e-12);
    assert!((m.bisections[1] - 8.0 / 6.0).abs() < 1e-12);
}

#[test]
fn dragonfly_terminal_channels_equal_terminals() {
    for (g, h, a, p, k) in [(2, 1, 2, 1, 1), (9, 2, 8, 1, 4), (33, 1, 16, 3, 8)] {
        let m = params(g, h, a, p, k).compute().expect("valid dragonfly");
        assert_eq!(m.terminals, k * a * g);
        assert_eq!(m.channels[0], m.terminals);
    }
}

#[test]
fn dragonfly_rejects_out_of_bounds_parameters() {
    let cases = [
        (params(1, 1, 4, 1, 2), "global width"),
        (params(4, 0, 4, 1, 2), "global weight"),
        (params(4, 1, 1, 1, 2), "local width"),
        (params(4, 1, 4, 0, 2), "local weight"),
        (params(4, 1, 4, 1, 0), "concentration"),
    ];
    for (p, expected) in cases {
        match p.compute() {
            Err(Error::OutOfBounds { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected {expected} to be rejected, got {other:?}"),
        }
    }
}

#[test]
fn dragonfly_report_is_column_aligned() {
    let report = params(4, 1, 4, 1, 2).report().expect("valid dragonfly");
    assert_eq!(
        report.header_line(),
        "GlobalWidth GlobalWeight LocalWidth LocalWeight Concentration Terminals Routers Radix Channels  Bisections       "
    );
    assert_eq!(
        report.value_line(),
        "4           1            4          1           2             32        16      6     [32,24,6] [0.25000,1.00000]"
    );
}
