//! ScoringSchedule: per-stage point values, and the errors scoring can raise.

use crate::models::fixture::{Fixture, Stage};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Points cannot be computed because the schedule does not cover a stage.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ScheduleError {
    /// A finished fixture's stage has no schedule entry.
    #[error("no scoring schedule entry for stage {0}")]
    StageMissing(Stage),
    /// A knockout entry has no knockout-winner value.
    #[error("scoring schedule entry for stage {0} has no knockout winner points")]
    KnockoutPointsMissing(Stage),
}

/// Point values for one stage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StagePoints {
    /// Both predicted scores match.
    pub exact_score_both: u32,
    /// Exactly one predicted score matches.
    pub exact_score_one: u32,
    /// Predicted outcome matches.
    pub result: u32,
    /// Knockout stages only: correct side through after extra time or penalties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knockout_winner: Option<u32>,
}

impl StagePoints {
    pub fn group(exact_score_both: u32, exact_score_one: u32, result: u32) -> Self {
        Self {
            exact_score_both,
            exact_score_one,
            result,
            knockout_winner: None,
        }
    }

    pub fn knockout(
        exact_score_both: u32,
        exact_score_one: u32,
        result: u32,
        knockout_winner: u32,
    ) -> Self {
        Self {
            exact_score_both,
            exact_score_one,
            result,
            knockout_winner: Some(knockout_winner),
        }
    }
}

/// Per-stage point table. Loaded once, never mutated while scoring.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringSchedule {
    stages: BTreeMap<Stage, StagePoints>,
}

impl ScoringSchedule {
    /// Empty schedule; every lookup fails until entries are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in schedule: group 5/2/1, every knockout stage 5/2/1 plus 3 for the tie-break winner.
    pub fn standard() -> Self {
        let mut schedule = Self::new();
        for stage in Stage::ALL {
            let points = if stage.is_knockout() {
                StagePoints::knockout(5, 2, 1, 3)
            } else {
                StagePoints::group(5, 2, 1)
            };
            schedule.set(stage, points);
        }
        schedule
    }

    /// Add or replace the entry for a stage.
    pub fn set(&mut self, stage: Stage, points: StagePoints) {
        self.stages.insert(stage, points);
    }

    pub fn with(mut self, stage: Stage, points: StagePoints) -> Self {
        self.set(stage, points);
        self
    }

    pub fn get(&self, stage: Stage) -> Option<&StagePoints> {
        self.stages.get(&stage)
    }

    /// Entry for a stage, or `StageMissing`.
    pub fn points_for(&self, stage: Stage) -> Result<&StagePoints, ScheduleError> {
        self.get(stage).ok_or(ScheduleError::StageMissing(stage))
    }

    pub fn stages(&self) -> impl Iterator<Item = (Stage, &StagePoints)> {
        self.stages.iter().map(|(s, p)| (*s, p))
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Check the schedule covers every stage in `fixtures` (and that knockout
    /// entries carry knockout-winner points). Returns every problem found, in stage order.
    pub fn validate_for(&self, fixtures: &[Fixture]) -> Result<(), Vec<ScheduleError>> {
        let stages: BTreeSet<Stage> = fixtures.iter().map(|f| f.stage).collect();
        let problems: Vec<ScheduleError> = stages
            .into_iter()
            .filter_map(|stage| match self.get(stage) {
                None => Some(ScheduleError::StageMissing(stage)),
                Some(p) if stage.is_knockout() && p.knockout_winner.is_none() => {
                    Some(ScheduleError::KnockoutPointsMissing(stage))
                }
                Some(_) => None,
            })
            .collect();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
