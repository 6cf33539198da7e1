//! The per-seat lifecycle loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use ph_core::{AgentId, AgentRng, TableConfig};
use ph_monitor::{Coordinator, FloorGrant, MonitorResult};

use crate::phrases::say_something;
use crate::{PhilosopherTally, TableObserver, TableResult};

/// One philosopher: eat, think, maybe talk, maybe nap; `dining_steps` times.
///
/// Durations are drawn uniformly from `[0, time_to_waste)` milliseconds with
/// the seat's own [`AgentRng`], so a run's decisions are reproducible from
/// the seed even though the interleaving is not.
pub struct Philosopher<'a> {
    agent:       AgentId,
    coordinator: &'a dyn Coordinator,
    observer:    &'a dyn TableObserver,
    config:      &'a TableConfig,
    stop:        &'a AtomicBool,
    rng:         AgentRng,
}

impl<'a> Philosopher<'a> {
    pub fn new(
        agent:       AgentId,
        coordinator: &'a dyn Coordinator,
        observer:    &'a dyn TableObserver,
        config:      &'a TableConfig,
        stop:        &'a AtomicBool,
    ) -> Self {
        Self {
            agent,
            coordinator,
            observer,
            config,
            stop,
            rng: AgentRng::new(config.seed, agent),
        }
    }

    /// Run every dining step.
    ///
    /// A cancelled wait ends the loop early with `stopped_early` set; any
    /// other coordinator error is returned.  The loop also stops at the top
    /// of a step once the table's stop flag is raised.
    pub fn run(mut self) -> TableResult<PhilosopherTally> {
        let mut tally = PhilosopherTally::new(self.agent);

        for _ in 0..self.config.dining_steps {
            if self.stop.load(Ordering::Acquire) {
                tally.stopped_early = true;
                break;
            }
            if let Err(e) = self.step(&mut tally) {
                let Some(op) = e.cancelled_op() else {
                    return Err(e.into());
                };
                self.observer.on_cancelled(self.agent, op);
                tally.stopped_early = true;
                break;
            }
        }
        Ok(tally)
    }

    fn step(&mut self, tally: &mut PhilosopherTally) -> MonitorResult<()> {
        let agent = self.agent;

        // ── Eat ───────────────────────────────────────────────────────────
        self.observer.on_hungry(agent);
        let admission = self.coordinator.acquire_resources(agent)?;
        tally.meals += 1;
        if admission.waited {
            tally.waited_meals += 1;
        }
        self.observer.on_eating(agent, admission);
        self.pause();
        self.coordinator.release_resources(agent)?;
        self.observer.on_done_eating(agent);

        // ── Think ─────────────────────────────────────────────────────────
        self.observer.on_thinking(agent);
        self.pause();

        // ── Talk ──────────────────────────────────────────────────────────
        if self.rng.gen_bool(self.config.talk_probability) {
            let grant = self.coordinator.request_floor(agent)?;
            match grant {
                FloorGrant::Granted  => tally.talks += 1,
                FloorGrant::TimedOut => tally.timed_out_talks += 1,
            }
            let phrase = say_something(agent, &mut self.rng);
            self.observer.on_talking(agent, grant, &phrase);
            self.pause();
            self.coordinator.release_floor(agent)?;
            self.observer.on_done_talking(agent);
        } else {
            self.observer.on_nothing_to_say(agent);
        }

        // ── Nap ───────────────────────────────────────────────────────────
        if let Some(gate) = self.coordinator.sleep_gate() {
            if self.rng.gen_bool(self.config.sleep_probability) {
                gate.request_sleep(agent)?;
                tally.naps += 1;
                self.observer.on_sleeping(agent);
                self.pause();
                gate.end_sleep(agent)?;
                self.observer.on_awake(agent);
            }
        }

        Ok(())
    }

    fn pause(&mut self) {
        let max = self.config.time_to_waste_ms;
        if max == 0 {
            return;
        }
        let ms = self.rng.gen_range(0..max);
        thread::sleep(Duration::from_millis(ms));
    }
}
