//! Central-mass stability search
//!
//! Sweeps the mass of the central body upward from `initial_mass`, multiplying by
//! `growth` after every trial. Each trial replays the same starting system
//! (the baseline captured by [`StabilitySearch::start`]) and is judged by the
//! [oracle](super::oracle): it fails as soon as a body leaves its distance band
//! and succeeds once it survives `trial_duration` simulated seconds. After either
//! outcome the live system and the clock are rolled back to the trial start and
//! the next candidate is applied. Once the candidate passes `ceiling` the search
//! finishes and produces a [`SearchReport`].
//!
//! The harness never advances the bodies itself. The owning
//! [`Scenario`](crate::Scenario) calls [`StabilitySearch::begin_tick`] before the
//! integrator runs and [`StabilitySearch::end_tick`] after it.

use tracing::{debug, info, warn};

use super::oracle::{classify, Verdict};
use super::report::SearchReport;
use crate::configuration::config::SearchConfig;
use crate::simulation::clock::Clock;
use crate::simulation::scenario::ScenarioError;
use crate::simulation::snapshot::SystemSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    /// Survived the full trial duration
    Stable,
    /// A body left its distance band
    Unstable,
    /// The state became non-finite; counted as a failed trial
    Diverged,
}

/// Emitted by [`StabilitySearch::end_tick`] whenever a trial is decided
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResolved {
    pub trial: usize, // 1-based trial number
    pub mass: f64, // candidate mass that was tested (kg)
    pub outcome: TrialOutcome,
    pub report: Option<SearchReport>, // set when this trial ended the search
}

#[derive(Debug, Clone)]
pub struct StabilitySearch {
    config: SearchConfig,
    phase: SearchPhase,
    step: i32, // candidate index, candidate = initial * growth^step
    candidate_mass: f64,
    trial_start: f64, // clock total time at trial start
    start_pending: bool, // trial start not yet sampled from the clock
    successful_masses: Vec<f64>,
    trials: usize,
    diverged: usize,
    display_multiplier: f64, // restored when the search ends
    last_report: Option<SearchReport>,
}

impl StabilitySearch {
    pub fn new(config: SearchConfig) -> Result<Self, ScenarioError> {
        config.validate()?;
        let candidate_mass = config.initial_mass;
        Ok(Self {
            config,
            phase: SearchPhase::Idle,
            step: 0,
            candidate_mass,
            trial_start: 0.0,
            start_pending: false,
            successful_masses: Vec::new(),
            trials: 0,
            diverged: 0,
            display_multiplier: 1.0,
            last_report: None,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SearchPhase::Running
    }

    pub fn candidate_mass(&self) -> f64 {
        self.candidate_mass
    }

    pub fn trial_start(&self) -> f64 {
        self.trial_start
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn successful_masses(&self) -> &[f64] {
        &self.successful_masses
    }

    /// Report from the most recently finished search
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Idle -> Running. Freezes the current live system as the baseline.
    /// Returns false if a search is already running.
    pub fn start(&mut self, snapshot: &mut SystemSnapshot, clock: &mut Clock) -> bool {
        if self.is_running() {
            debug!("search already running, start ignored");
            return false;
        }

        snapshot.capture();
        self.step = 0;
        self.candidate_mass = self.config.initial_mass;
        self.successful_masses.clear();
        self.trials = 0;
        self.diverged = 0;
        self.trial_start = 0.0;
        self.start_pending = true;
        self.display_multiplier = clock.multiplier();
        clock.set_multiplier(self.config.multiplier);
        self.phase = SearchPhase::Running;

        info!(
            initial_mass = self.config.initial_mass,
            growth = self.config.growth,
            ceiling = self.config.ceiling,
            "stability search started"
        );
        true
    }

    /// Runs before the integrator: samples the trial start on the first tick
    /// and puts the candidate mass on the central body.
    pub fn begin_tick(&mut self, snapshot: &mut SystemSnapshot, clock: &Clock) {
        if !self.is_running() {
            return;
        }
        if self.start_pending {
            self.trial_start = clock.total_time();
            self.start_pending = false;
        }
        self.apply_candidate(snapshot);
    }

    /// Runs after the integrator: judges the trial and, if it is decided,
    /// rolls back and moves on to the next candidate.
    pub fn end_tick(&mut self, snapshot: &mut SystemSnapshot, clock: &mut Clock) -> Option<TrialResolved> {
        if !self.is_running() {
            return None;
        }

        let verdict = match snapshot.baseline() {
            Some(baseline) => classify(baseline, snapshot.live()),
            None => return None,
        };

        // Without a central body the candidate mass was never applied
        if snapshot.live().central_body().is_none() {
            warn!(central = snapshot.live().central, "central body missing, trial failed");
            return Some(self.resolve(TrialOutcome::Unstable, snapshot, clock));
        }

        let outcome = match verdict {
            Verdict::Diverged => TrialOutcome::Diverged,
            Verdict::Breached { index, ratio } => {
                debug!(body = index, ratio, "body left its distance band");
                TrialOutcome::Unstable
            }
            Verdict::Holding => {
                if clock.total_time() >= self.trial_start + self.config.trial_duration {
                    TrialOutcome::Stable
                } else {
                    return None;
                }
            }
        };

        Some(self.resolve(outcome, snapshot, clock))
    }

    fn resolve(&mut self, outcome: TrialOutcome, snapshot: &mut SystemSnapshot, clock: &mut Clock) -> TrialResolved {
        let mass = self.candidate_mass;
        self.trials += 1;
        let trial = self.trials;

        match outcome {
            TrialOutcome::Stable => {
                self.successful_masses.push(mass);
                info!(trial, mass, "trial stable");
            }
            TrialOutcome::Unstable => info!(trial, mass, "trial unstable"),
            TrialOutcome::Diverged => {
                self.diverged += 1;
                warn!(trial, mass, "trial diverged to non-finite state");
            }
        }

        // Roll back to the trial start and load the next candidate
        snapshot.restore();
        clock.set_total_time(self.trial_start);
        self.step += 1;
        self.candidate_mass = self.config.initial_mass * self.config.growth.powi(self.step);
        self.apply_candidate(snapshot);

        let report = if self.candidate_mass > self.config.ceiling {
            Some(self.finish(snapshot, clock))
        } else {
            None
        };

        TrialResolved {
            trial,
            mass,
            outcome,
            report,
        }
    }

    /// Running -> Idle. Restores the display speed and the baseline system.
    fn finish(&mut self, snapshot: &mut SystemSnapshot, clock: &mut Clock) -> SearchReport {
        self.phase = SearchPhase::Idle;
        clock.set_multiplier(self.display_multiplier);
        snapshot.restore();

        let report = SearchReport::new(self.trials, self.diverged, self.successful_masses.clone());
        match &report.summary {
            Some(s) => info!(
                trials = report.trials,
                stable = report.successful_masses.len(),
                min = s.min,
                max = s.max,
                range = s.range,
                ratio = s.ratio,
                mean = s.mean,
                "stability search finished"
            ),
            None => info!(trials = report.trials, "stability search finished, no stable mass found"),
        }

        self.last_report = Some(report.clone());
        report
    }

    fn apply_candidate(&self, snapshot: &mut SystemSnapshot) {
        match snapshot.live_mut().central_body_mut() {
            Some(central) => central.m = self.candidate_mass,
            None => debug!(mass = self.candidate_mass, "no central body to apply candidate to"),
        }
    }
}
