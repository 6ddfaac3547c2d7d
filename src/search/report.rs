//! Summary of a finished stability search

use std::fmt;

/// Statistics over the stable candidate masses (kg)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassSummary {
    pub min: f64,
    pub max: f64,
    pub range: f64, // max - min
    pub ratio: f64, // max / min
    pub mean: f64,
}

impl MassSummary {
    /// `None` for an empty slice. Expects ascending order, as the sweep produces.
    pub fn from_sorted(masses: &[f64]) -> Option<Self> {
        let (&min, &max) = (masses.first()?, masses.last()?);
        let mean = masses.iter().sum::<f64>() / masses.len() as f64;
        Some(Self {
            min,
            max,
            range: max - min,
            ratio: max / min,
            mean,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub trials: usize, // trials resolved
    pub diverged: usize, // trials ended by non-finite state
    pub successful_masses: Vec<f64>, // ascending
    pub summary: Option<MassSummary>,
}

impl SearchReport {
    pub fn new(trials: usize, diverged: usize, successful_masses: Vec<f64>) -> Self {
        let summary = MassSummary::from_sorted(&successful_masses);
        Self {
            trials,
            diverged,
            successful_masses,
            summary,
        }
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "search finished: {} trials, {} stable, {} diverged",
            self.trials,
            self.successful_masses.len(),
            self.diverged
        )?;
        match &self.summary {
            Some(s) => {
                writeln!(f, "min stable mass:  {:e} kg", s.min)?;
                writeln!(f, "max stable mass:  {:e} kg", s.max)?;
                writeln!(f, "range:            {:e} kg", s.range)?;
                writeln!(f, "max/min ratio:    {}", s.ratio)?;
                write!(f, "mean stable mass: {:e} kg", s.mean)
            }
            None => write!(f, "no stable mass found"),
        }
    }
}
