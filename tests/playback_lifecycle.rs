//! Playback driver lifecycle tests on virtual time.

use proptest::prelude::*;
use sortviz::playback::SharedDriver;
use sortviz::prelude::*;
use sortviz::replay::{TraceFile, TraceScrubber};
use std::collections::BTreeSet;
use std::time::Duration;

const MS: fn(u64) -> Duration = Duration::from_millis;

fn config(seed: u64, size: usize) -> VisualizerConfig {
    VisualizerConfig::builder().seed(seed).size(size).build()
}

fn run_to_end(driver: &mut PlaybackDriver) {
    while let Some(tick) = driver.pending_tick() {
        driver.poll(tick.due);
    }
}

/// Indices named by `Sorted` steps among the first `cursor` steps.
fn applied_sorted(trace: &Trace, cursor: usize) -> BTreeSet<usize> {
    trace.steps()[..cursor]
        .iter()
        .filter(|s| s.kind() == StepKind::Sorted)
        .flat_map(|s| s.indices().iter().copied())
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Resume,
    Toggle,
    Reset,
    Step,
    Advance(u64),
    SetSpeed(u8),
    SetAlgorithm(usize),
    Seek(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Toggle),
        1 => Just(Op::Reset),
        2 => Just(Op::Step),
        6 => (0u64..3_000).prop_map(Op::Advance),
        1 => (1u8..=100).prop_map(Op::SetSpeed),
        1 => (0usize..6).prop_map(Op::SetAlgorithm),
        1 => (0usize..200).prop_map(Op::Seek),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Falsification: after any sequence of operations, the sorted set holds
    /// an index that no applied `Sorted` step named, without the run having
    /// completed.
    #[test]
    fn prop_sorted_set_only_from_applied_steps(
        seed in 0u64..1_000,
        ops in prop::collection::vec(arb_op(), 1..60)
    ) {
        let mut driver = PlaybackDriver::new(config(seed, 12)).expect("driver");
        let mut now = Duration::ZERO;

        for op in ops {
            match op {
                Op::Start => { let _ = driver.start(now); }
                Op::Pause => { driver.pause(); }
                Op::Resume => { driver.resume(now); }
                Op::Toggle => { let _ = driver.toggle(now); }
                Op::Reset => driver.reset(),
                Op::Step => { let _ = driver.step_once(); }
                Op::Advance(ms) => {
                    now += Duration::from_millis(ms);
                    driver.poll(now);
                }
                Op::SetSpeed(s) => driver.set_speed(Speed::new(s)),
                Op::SetAlgorithm(i) => { let _ = driver.set_algorithm(AlgorithmId::ALL[i]); }
                Op::Seek(target) => { let _ = driver.seek(target); }
            }

            let state = driver.state();
            prop_assert!(state.cursor <= driver.total_steps());
            prop_assert_eq!(state.values.len(), driver.input().len());

            match driver.play_state() {
                PlayState::Completed => {
                    prop_assert!(state.is_fully_sorted());
                    prop_assert!(driver.pending_tick().is_none());
                }
                PlayState::Running => prop_assert!(driver.pending_tick().is_some()),
                PlayState::Idle => {
                    prop_assert_eq!(state.cursor, 0);
                    prop_assert!(state.sorted.is_empty());
                    prop_assert!(driver.pending_tick().is_none());
                }
                PlayState::Paused => prop_assert!(driver.pending_tick().is_none()),
            }

            if driver.play_state() != PlayState::Completed {
                if let Some(trace) = driver.trace() {
                    prop_assert!(state.sorted.is_subset(&applied_sorted(trace, state.cursor)));
                } else {
                    prop_assert!(state.sorted.is_empty());
                }
            }
        }
    }

    /// Falsification: a live run and a scrubbed seek disagree at some cursor.
    #[test]
    fn prop_seek_matches_live_playback(seed in 0u64..1_000, size in 10usize..40) {
        let mut live = PlaybackDriver::new(config(seed, size)).expect("driver");
        live.set_algorithm(AlgorithmId::Heap).expect("idle");
        let mut scrubbed = live.clone();

        live.start(MS(0)).expect("start");
        scrubbed.step_once().expect("step");

        let mut cursor_states = Vec::new();
        while let Some(tick) = live.pending_tick() {
            live.poll(tick.due);
            cursor_states.push(live.state().clone());
        }

        // Skip the final state: completion marks every index sorted.
        for (i, expected) in cursor_states.iter().enumerate().rev().skip(1).step_by(7) {
            scrubbed.seek(i + 1).expect("seek");
            prop_assert_eq!(scrubbed.state(), expected);
        }
    }
}

#[test]
fn idle_running_completed_for_every_algorithm() {
    for id in AlgorithmId::ALL {
        let mut driver = PlaybackDriver::new(config(7, 30)).expect("driver");
        driver.set_algorithm(id).expect("idle");
        driver.start(MS(0)).expect("start");
        assert_eq!(driver.play_state(), PlayState::Running);
        run_to_end(&mut driver);

        let frame = driver.frame();
        assert_eq!(frame.play_state, PlayState::Completed, "{id}");
        assert_eq!(frame.cursor, frame.total_steps);
        assert_eq!(frame.sorted.len(), 30);
        assert!(frame.comparing.is_empty() && frame.swapping.is_empty());
        let mut expected = driver.input().to_vec();
        expected.sort_unstable();
        assert_eq!(frame.values, expected, "{id}");
    }
}

#[test]
fn empty_array_completes_on_same_tick() {
    let mut driver = PlaybackDriver::with_values(VisualizerConfig::default(), Vec::new())
        .expect("driver");
    assert_eq!(driver.play_state(), PlayState::Idle);
    driver.start(MS(0)).expect("start");
    let frame = driver.frame();
    assert_eq!(frame.play_state, PlayState::Completed);
    assert!(frame.values.is_empty());
    assert!(frame.comparing.is_empty() && frame.swapping.is_empty() && frame.sorted.is_empty());
    assert_eq!(frame.total_steps, 0);
    assert!((frame.progress() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn pause_keeps_progress_across_long_gaps() {
    let mut driver = PlaybackDriver::with_values(config(1, 10), vec![9, 8, 7, 6, 5])
        .expect("driver");
    driver.start(MS(0)).expect("start");
    for t in 1..=3 {
        assert!(driver.poll(MS(100 * t)));
    }
    driver.pause();
    let frozen = driver.frame();

    // Nothing moves while paused, however much time passes.
    assert!(!driver.poll(MS(60_000)));
    assert_eq!(driver.frame(), frozen);

    driver.resume(MS(60_000));
    assert!(!driver.poll(MS(60_099)));
    assert!(driver.poll(MS(60_100)));
    assert_eq!(driver.state().cursor, 4);
}

#[test]
fn slowest_speed_uses_max_interval() {
    let mut driver = PlaybackDriver::with_values(config(1, 10), vec![2, 1]).expect("driver");
    driver.set_speed(Speed::MIN);
    driver.start(MS(0)).expect("start");
    assert_eq!(driver.pending_tick().map(|t| t.due), Some(MS(991)));
    assert!(!driver.poll(MS(990)));
    assert!(driver.poll(MS(991)));
}

#[test]
fn reset_discards_trace_from_any_state() {
    let mut driver = PlaybackDriver::new(config(5, 20)).expect("driver");

    driver.reset();
    assert_eq!(driver.play_state(), PlayState::Idle);

    driver.start(MS(0)).expect("start");
    driver.reset();
    assert!(driver.trace().is_none());

    driver.step_once().expect("step");
    driver.reset();
    assert_eq!(driver.state().cursor, 0);

    driver.start(MS(0)).expect("start");
    run_to_end(&mut driver);
    driver.reset();
    assert_eq!(driver.play_state(), PlayState::Idle);
    assert!(driver.state().sorted.is_empty());
}

#[test]
fn shared_driver_serializes_ticks() {
    let shared = SharedDriver::new(PlaybackDriver::new(config(9, 25)).expect("driver"));
    shared.with(|d| d.start(MS(0))).expect("start");
    let mut now = MS(0);
    while shared.frame().play_state == PlayState::Running {
        now += MS(100);
        shared.poll(now);
    }
    assert_eq!(shared.frame().sorted.len(), 25);
}

#[test]
fn exported_trace_replays_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.json");

    let mut driver = PlaybackDriver::new(config(11, 40)).expect("driver");
    driver.set_algorithm(AlgorithmId::Merge).expect("idle");
    driver.start(MS(0)).expect("start");
    run_to_end(&mut driver);

    let trace = driver.trace().expect("trace").clone();
    TraceFile::new(AlgorithmId::Merge, Some(driver.seed()), trace.clone())
        .save(&path)
        .expect("save");

    let loaded = TraceFile::load(&path).expect("load");
    assert_eq!(loaded.trace, trace);
    assert_eq!(loaded.seed, Some(11));

    let mut scrubber = TraceScrubber::new(loaded.trace, 16);
    let end = scrubber.seek_to(trace.len()).expect("seek");
    assert_eq!(end.values, driver.state().values);
}
