//! Baseline / live copies of the body set
//!
//! `live` is what the integrator advances each frame and what display code reads.
//! `baseline` is a frozen copy taken when a search starts; rolling back replaces
//! `live` wholesale so no reader ever sees a half-restored system.

use super::states::System;

#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    baseline: Option<System>,
    live: System,
}

impl SystemSnapshot {
    pub fn new(live: System) -> Self {
        Self { baseline: None, live }
    }

    /// Freeze the current live state as the baseline, replacing any earlier one
    pub fn capture(&mut self) {
        self.baseline = Some(self.live.clone());
    }

    /// Replace the live state with a fresh copy of the baseline.
    /// Returns false (and leaves `live` alone) when nothing has been captured.
    pub fn restore(&mut self) -> bool {
        match &self.baseline {
            Some(baseline) => {
                self.live = baseline.clone();
                true
            }
            None => false,
        }
    }

    pub fn baseline(&self) -> Option<&System> {
        self.baseline.as_ref()
    }

    pub fn live(&self) -> &System {
        &self.live
    }

    pub fn live_mut(&mut self) -> &mut System {
        &mut self.live
    }
}
