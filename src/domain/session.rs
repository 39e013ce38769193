use std::fmt;

use super::{Coordinate, geo_math};

pub const DEFAULT_RELOCATION_THRESHOLD_KM: f64 = 0.8;
pub const RETAINED_ANSWERS: usize = 2;

/// Historical-narration state for one listener.
///
/// `base` is the spot the listener has been lingering around; `revisit_count`
/// counts consecutive requests near it since the last relocation. The first
/// two answers given at a spot are retained so later prompts can steer away
/// from repeating them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    base: Coordinate,
    revisit_count: u32,
    prior_answers: [Option<String>; RETAINED_ANSWERS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    Started,
    Relocated,
    Revisited,
}

impl Session {
    pub fn start(base: Coordinate) -> Self {
        Self {
            base,
            revisit_count: 0,
            prior_answers: [None, None],
        }
    }

    pub fn base(&self) -> Coordinate {
        self.base
    }

    pub fn revisit_count(&self) -> u32 {
        self.revisit_count
    }

    pub fn stage(&self) -> VisitStage {
        VisitStage::from_count(self.revisit_count)
    }

    pub fn prior_answer(&self, slot: usize) -> Option<&str> {
        self.prior_answers.get(slot).and_then(|a| a.as_deref())
    }

    pub fn prior_answers(&self) -> impl Iterator<Item = &str> {
        self.prior_answers.iter().filter_map(|a| a.as_deref())
    }

    /// Applies one request at `at`. Moving further than `threshold_km` from
    /// the base starts over at the new spot; otherwise the revisit count grows
    /// and the base stays put.
    pub fn observe(&mut self, at: Coordinate, threshold_km: f64) -> VisitOutcome {
        if geo_math::distance_km(self.base, at) > threshold_km {
            *self = Self::start(at);
            VisitOutcome::Relocated
        } else {
            self.revisit_count = self.revisit_count.saturating_add(1);
            VisitOutcome::Revisited
        }
    }

    /// Keeps the answer when it was produced on the first or second revisit.
    /// Returns whether it was retained.
    pub fn record_answer(&mut self, answer: String) -> bool {
        let Some(slot) = self.revisit_count.checked_sub(1) else {
            return false;
        };
        match self.prior_answers.get_mut(slot as usize) {
            Some(entry) => {
                *entry = Some(answer);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStage {
    Fresh,
    FirstVisit,
    SecondVisit,
    Saturated,
}

impl VisitStage {
    pub fn from_count(revisit_count: u32) -> Self {
        match revisit_count {
            0 => Self::Fresh,
            1 => Self::FirstVisit,
            2 => Self::SecondVisit,
            _ => Self::Saturated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "FRESH",
            Self::FirstVisit => "FIRST_VISIT",
            Self::SecondVisit => "SECOND_VISIT",
            Self::Saturated => "SATURATED",
        }
    }
}

impl fmt::Display for VisitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
