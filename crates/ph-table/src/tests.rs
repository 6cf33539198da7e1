//! Tests for ph-table: builder validation and whole dinners.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use ph_core::{AgentId, PhError, State, TableConfig, Variant};
use ph_monitor::{
    Admission, BasicMonitor, Coordinator, FloorGrant, MonitorError, MonitorResult,
    MonitorSnapshot, Op,
};

use crate::phrases::{PHRASES, say_something};
use crate::{DiningTable, NoopObserver, TableBuilder, TableError, TableObserver, TableReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn quick_config(variant: Variant) -> TableConfig {
    TableConfig {
        philosophers:      5,
        dining_steps:      20,
        time_to_waste_ms:  2,
        seed:              7,
        talk_probability:  0.5,
        sleep_probability: 0.25,
        variant,
        max_run_ms:        None,
    }
}

/// Checks the coordinator's tables from inside every callback and counts
/// anything that should never be seen.
struct Inspector<'a> {
    coordinator: &'a dyn Coordinator,
    events:      Mutex<Vec<(AgentId, &'static str)>>,
    violations:  AtomicUsize,
    finished:    AtomicUsize,
}

impl<'a> Inspector<'a> {
    fn new(coordinator: &'a dyn Coordinator) -> Self {
        Self {
            coordinator,
            events:     Mutex::new(Vec::new()),
            violations: AtomicUsize::new(0),
            finished:   AtomicUsize::new(0),
        }
    }

    fn record(&self, agent: AgentId, event: &'static str) {
        self.events.lock().unwrap().push((agent, event));
    }

    fn check(&self, ok: impl FnOnce(&MonitorSnapshot) -> bool) {
        let snap = self.coordinator.snapshot().unwrap();
        if !(snap.no_adjacent_eaters() && snap.ledger_consistent() && ok(&snap)) {
            self.violations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn count(&self, event: &str) -> usize {
        self.events.lock().unwrap().iter().filter(|(_, e)| *e == event).count()
    }
}

impl TableObserver for Inspector<'_> {
    fn on_start(&self, snapshot: &MonitorSnapshot) {
        if snapshot.states.iter().any(|s| *s != State::Thinking) {
            self.violations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn on_eating(&self, agent: AgentId, _admission: Admission) {
        self.record(agent, "eating");
        self.check(|s| s.state(agent) == State::Eating);
    }

    fn on_talking(&self, agent: AgentId, grant: FloorGrant, phrase: &str) {
        self.record(agent, "talking");
        if phrase.is_empty() {
            self.violations.fetch_add(1, Ordering::Relaxed);
        }
        // Only the exclusive floor has a holder to check.
        if self.coordinator.sleep_gate().is_some() {
            assert_eq!(grant, FloorGrant::Granted);
            self.check(|s| s.floor_holder == Some(agent));
        }
    }

    fn on_sleeping(&self, agent: AgentId) {
        self.record(agent, "sleeping");
        self.check(|s| s.state(agent) == State::Sleeping);
    }

    fn on_cancelled(&self, agent: AgentId, _op: Op) {
        self.record(agent, "cancelled");
    }

    fn on_finished(&self, _report: &TableReport) {
        self.finished.fetch_add(1, Ordering::Relaxed);
    }
}

/// Panics when `victim` starts eating.
struct PanicOnEating {
    victim: AgentId,
}

impl TableObserver for PanicOnEating {
    fn on_eating(&self, agent: AgentId, _admission: Admission) {
        if agent == self.victim {
            panic!("{agent} choked");
        }
    }
}

/// Basic coordinator that refuses to let `victim` put its chopsticks down.
struct StuckChopsticks {
    inner:  BasicMonitor,
    victim: AgentId,
}

impl Coordinator for StuckChopsticks {
    fn agent_count(&self) -> usize {
        self.inner.agent_count()
    }

    fn acquire_resources(&self, agent: AgentId) -> MonitorResult<Admission> {
        self.inner.acquire_resources(agent)
    }

    fn release_resources(&self, agent: AgentId) -> MonitorResult<()> {
        if agent == self.victim {
            return Err(MonitorError::IllegalState {
                agent,
                op:    Op::ReleaseResources,
                state: State::Thinking,
            });
        }
        self.inner.release_resources(agent)
    }

    fn request_floor(&self, agent: AgentId) -> MonitorResult<FloorGrant> {
        self.inner.request_floor(agent)
    }

    fn release_floor(&self, agent: AgentId) -> MonitorResult<()> {
        self.inner.release_floor(agent)
    }

    fn cancel(&self, agent: AgentId) -> MonitorResult<()> {
        self.inner.cancel(agent)
    }

    fn clear_cancel(&self, agent: AgentId) -> MonitorResult<()> {
        self.inner.clear_cancel(agent)
    }

    fn snapshot(&self) -> MonitorResult<MonitorSnapshot> {
        self.inner.snapshot()
    }
}

// ── TableBuilder validation ───────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_both_variants() {
        for variant in [Variant::Basic, Variant::Advanced] {
            let table = TableBuilder::new(quick_config(variant)).build().unwrap();
            assert_eq!(table.coordinator().agent_count(), 5);
            assert_eq!(table.config().variant, variant);
            assert_eq!(table.coordinator().sleep_gate().is_some(), variant == Variant::Advanced);
        }
    }

    #[test]
    fn zero_philosophers_rejected() {
        let config = TableConfig { philosophers: 0, ..quick_config(Variant::Advanced) };
        let err = TableBuilder::new(config).build().err().unwrap();
        assert!(matches!(err, TableError::Config(PhError::InvalidAgentCount(0))));
    }

    #[test]
    fn bad_probability_rejected() {
        let config = TableConfig { talk_probability: 1.5, ..quick_config(Variant::Basic) };
        let err = TableBuilder::new(config).build().err().unwrap();
        assert!(matches!(err, TableError::Config(PhError::Config(_))));
    }

    #[test]
    fn basic_variant_refuses_priorities() {
        let err = TableBuilder::new(quick_config(Variant::Basic))
            .priorities(vec![0, 1, 2, 3, 4])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, TableError::Config(PhError::Config(_))));
    }

    #[test]
    fn explicit_priorities_are_used() {
        let table = TableBuilder::new(quick_config(Variant::Advanced))
            .priorities(vec![2, 4, 1, 0, 3])
            .build()
            .unwrap();
        let snap = table.coordinator().snapshot().unwrap();
        assert_eq!(snap.ranks, Some(vec![2, 4, 1, 0, 3]));
    }

    #[test]
    fn non_permutation_priorities_rejected() {
        let err = TableBuilder::new(quick_config(Variant::Advanced))
            .priorities(vec![0, 0, 1, 2, 3])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, TableError::Monitor(MonitorError::InvalidPriorities(_))));
    }

    #[test]
    fn seeded_priorities_follow_the_seed() {
        let ranks = |seed| {
            let config = TableConfig { seed, ..quick_config(Variant::Advanced) };
            let table = TableBuilder::new(config).build().unwrap();
            table.coordinator().snapshot().unwrap().ranks.unwrap()
        };
        assert_eq!(ranks(11), ranks(11));
        let mut sorted = ranks(11);
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }
}

// ── Phrases ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod phrase_tests {
    use super::*;
    use ph_core::AgentRng;

    #[test]
    fn phrases_come_from_the_list_or_name_the_seat() {
        let agent = AgentId(2);
        let mut rng = AgentRng::new(3, agent);
        let mut saw_number = false;
        for _ in 0..500 {
            let phrase = say_something(agent, &mut rng);
            if phrase == "My number is 3" {
                saw_number = true;
            } else {
                assert!(PHRASES.contains(&phrase.as_str()), "unexpected phrase {phrase:?}");
            }
        }
        assert!(saw_number);
    }
}

// ── Whole dinners ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod dinner_tests {
    use super::*;

    fn dine(config: TableConfig) -> (TableReport, usize, usize, usize) {
        let steps = config.dining_steps;
        let table = TableBuilder::new(config).build().unwrap();
        let inspector = Inspector::new(table.coordinator());
        let report = table.run(&inspector).unwrap();

        assert!(!report.stopped_early());
        for tally in &report.tallies {
            assert_eq!(tally.meals, steps);
            assert!(tally.waited_meals <= tally.meals);
        }
        assert_eq!(inspector.violations.load(Ordering::Relaxed), 0);
        assert_eq!(inspector.finished.load(Ordering::Relaxed), 1);
        assert_eq!(inspector.count("cancelled"), 0);
        assert_eq!(inspector.count("eating") as u64, report.total_meals());

        let snap = table.coordinator().snapshot().unwrap();
        assert!(snap.states.iter().all(|s| *s == State::Thinking));
        assert!(snap.chopsticks.iter().all(Option::is_none));
        assert_eq!(snap.floor_holder, None);

        let talks = inspector.count("talking");
        let naps = inspector.count("sleeping");
        (report, talks, naps, inspector.count("eating"))
    }

    #[test]
    fn advanced_dinner_completes() {
        let (report, talks, naps, meals) = dine(quick_config(Variant::Advanced));
        assert_eq!(report.variant, Variant::Advanced);
        assert_eq!(meals, 100);
        assert_eq!(talks as u64, report.total_talks());
        assert_eq!(naps as u64, report.total_naps());
        assert!(report.tallies.iter().all(|t| t.timed_out_talks == 0));
    }

    #[test]
    fn basic_dinner_completes_without_naps() {
        let (report, talks, naps, _) = dine(quick_config(Variant::Basic));
        assert_eq!(report.variant, Variant::Basic);
        assert_eq!(talks as u64, report.total_talks());
        assert_eq!(naps, 0);
        assert_eq!(report.total_naps(), 0);
    }

    #[test]
    fn zero_time_to_waste_runs_flat_out() {
        let config = TableConfig {
            time_to_waste_ms: 0,
            dining_steps:     200,
            ..quick_config(Variant::Advanced)
        };
        let (report, ..) = dine(config);
        assert_eq!(report.total_meals(), 1_000);
    }

    #[test]
    fn single_philosopher_dines_alone() {
        let config = TableConfig { philosophers: 1, ..quick_config(Variant::Advanced) };
        let (report, ..) = dine(config);
        assert_eq!(report.tallies.len(), 1);
        assert_eq!(report.tallies[0].waited_meals, 0);
    }

    #[test]
    fn decisions_are_reproducible_from_the_seed() {
        // Without pauses, every draw a philosopher makes is a decision.
        let config = TableConfig {
            time_to_waste_ms: 0,
            ..quick_config(Variant::Advanced)
        };
        let decisions = |r: &TableReport| {
            r.tallies.iter().map(|t| (t.talks + t.timed_out_talks, t.naps)).collect::<Vec<_>>()
        };
        let first = TableBuilder::new(config.clone()).build().unwrap().run(&NoopObserver).unwrap();
        let second = TableBuilder::new(config).build().unwrap().run(&NoopObserver).unwrap();
        assert_eq!(decisions(&first), decisions(&second));
    }

    #[test]
    fn paired_observers_both_hear_everything() {
        let table = TableBuilder::new(quick_config(Variant::Advanced)).build().unwrap();
        let first = Inspector::new(table.coordinator());
        let second = Inspector::new(table.coordinator());
        table.run(&(&first, &second)).unwrap();

        for event in ["eating", "talking", "sleeping"] {
            assert_eq!(first.count(event), second.count(event));
        }
        assert_eq!(first.finished.load(Ordering::Relaxed), 1);
        assert_eq!(second.finished.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn certain_talk_and_sleep_happen_every_step() {
        let config = TableConfig {
            talk_probability:  1.0,
            sleep_probability: 1.0,
            dining_steps:      5,
            ..quick_config(Variant::Advanced)
        };
        let (report, ..) = dine(config);
        for tally in &report.tallies {
            assert_eq!(tally.talks, 5);
            assert_eq!(tally.naps, 5);
        }
    }
}

// ── Stopping early ────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop_tests {
    use super::*;

    #[test]
    fn watchdog_stops_a_long_dinner() {
        let config = TableConfig {
            dining_steps:     1_000_000,
            time_to_waste_ms: 20,
            max_run_ms:       Some(200),
            ..quick_config(Variant::Advanced)
        };
        let table = TableBuilder::new(config).build().unwrap();
        let started = Instant::now();
        let report = table.run(&NoopObserver).unwrap();

        assert!(started.elapsed() < Duration::from_secs(20));
        assert!(report.stopped_early());
        assert!(report.tallies.iter().all(|t| t.stopped_early));
        let snap = table.coordinator().snapshot().unwrap();
        assert!(snap.chopsticks.iter().all(Option::is_none));
        assert!(snap.states.iter().all(|s| *s == State::Thinking));
    }

    #[test]
    fn watchdog_leaves_no_cancellation_behind() {
        let config = TableConfig {
            dining_steps:     1_000_000,
            time_to_waste_ms: 5,
            max_run_ms:       Some(100),
            ..quick_config(Variant::Advanced)
        };
        let table = TableBuilder::new(config).build().unwrap();
        assert!(table.run(&NoopObserver).unwrap().stopped_early());

        // A blocked acquire waits for its neighbour instead of failing
        // straight away.
        let coordinator = table.coordinator();
        coordinator.acquire_resources(AgentId(0)).unwrap();
        std::thread::scope(|s| {
            let (tx, rx) = std::sync::mpsc::channel();
            s.spawn(move || tx.send(coordinator.acquire_resources(AgentId(1))).unwrap());
            assert!(rx.recv_timeout(Duration::from_millis(150)).is_err());
            coordinator.release_resources(AgentId(0)).unwrap();
            let admission = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
            assert!(admission.waited);
        });
    }

    #[test]
    fn pending_cancellations_are_withdrawn_before_a_run() {
        let table = TableBuilder::new(quick_config(Variant::Advanced)).build().unwrap();
        table.coordinator().cancel_all().unwrap();
        let report = table.run(&NoopObserver).unwrap();
        assert!(!report.stopped_early());
        assert!(report.tallies.iter().all(|t| t.meals == 20));
    }

    #[test]
    fn watchdog_stays_quiet_when_dinner_ends_in_time() {
        let config = TableConfig {
            max_run_ms: Some(60_000),
            ..quick_config(Variant::Basic)
        };
        let started = Instant::now();
        let report = TableBuilder::new(config).build().unwrap().run(&NoopObserver).unwrap();
        assert!(!report.stopped_early());
        assert!(started.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn failing_philosopher_stops_the_table() {
        let config = TableConfig { dining_steps: 1_000, ..quick_config(Variant::Basic) };
        let coordinator = StuckChopsticks {
            inner:  BasicMonitor::new(5, config.time_to_waste()).unwrap(),
            victim: AgentId(2),
        };
        let table = DiningTable::new(config, Box::new(coordinator));
        let err = table.run(&NoopObserver).err().unwrap();
        assert!(matches!(
            err,
            TableError::Monitor(MonitorError::IllegalState { agent: AgentId(2), .. })
        ));
    }

    #[test]
    fn panicking_philosopher_stops_the_table() {
        let config = TableConfig { dining_steps: 1_000, ..quick_config(Variant::Advanced) };
        let table = TableBuilder::new(config).build().unwrap();
        let err = table.run(&PanicOnEating { victim: AgentId(0) }).err().unwrap();
        assert!(matches!(err, TableError::Panicked(AgentId(0))));
    }

    #[test]
    fn sleep_gate_is_reachable_through_the_table() {
        let table = TableBuilder::new(quick_config(Variant::Advanced)).build().unwrap();
        let gate = table.coordinator().sleep_gate().unwrap();
        gate.request_sleep(AgentId(1)).unwrap();
        assert_eq!(table.coordinator().snapshot().unwrap().state(AgentId(1)), State::Sleeping);
        gate.end_sleep(AgentId(1)).unwrap();
    }
}
