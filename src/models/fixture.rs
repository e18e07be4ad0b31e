//! Fixture (scheduled match), Stage, and the result types shared with predictions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type MatchId = Uuid;

/// Phase of the tournament a fixture belongs to, in bracket order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Group,
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

impl Stage {
    /// Every stage, group first.
    pub const ALL: [Stage; 7] = [
        Stage::Group,
        Stage::RoundOf32,
        Stage::RoundOf16,
        Stage::QuarterFinal,
        Stage::SemiFinal,
        Stage::ThirdPlace,
        Stage::Final,
    ];

    /// Position in the tournament (Group = 0). Used to order pending work.
    pub fn order(self) -> u8 {
        match self {
            Stage::Group => 0,
            Stage::RoundOf32 => 1,
            Stage::RoundOf16 => 2,
            Stage::QuarterFinal => 3,
            Stage::SemiFinal => 4,
            Stage::ThirdPlace => 5,
            Stage::Final => 6,
        }
    }

    pub fn is_knockout(self) -> bool {
        self != Stage::Group
    }

    /// Config / wire name (same as the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Group => "group",
            Stage::RoundOf32 => "round_of32",
            Stage::RoundOf16 => "round_of16",
            Stage::QuarterFinal => "quarter_final",
            Stage::SemiFinal => "semi_final",
            Stage::ThirdPlace => "third_place",
            Stage::Final => "final",
        }
    }

    /// Parse a stage name as written in schedule files. Accepts the serde name
    /// plus a few common short forms ("r16", "qf", "sf").
    pub fn parse(name: &str) -> Option<Stage> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let stage = match normalized.as_str() {
            "group" | "groups" => Stage::Group,
            "round_of32" | "round_of_32" | "r32" => Stage::RoundOf32,
            "round_of16" | "round_of_16" | "r16" => Stage::RoundOf16,
            "quarter_final" | "quarterfinal" | "qf" => Stage::QuarterFinal,
            "semi_final" | "semifinal" | "sf" => Stage::SemiFinal,
            "third_place" | "third" => Stage::ThirdPlace,
            "final" => Stage::Final,
            _ => return None,
        };
        Some(stage)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a fixture is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InPlay,
    Finished,
}

/// Home or away side of a fixture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Home,
    Away,
}

/// How a knockout fixture level after regulation was settled.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum DecidedBy {
    #[serde(rename = "ET")]
    ExtraTime,
    #[serde(rename = "PENS")]
    Penalties,
}

/// Result from the home side's perspective.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_scores(home: u32, away: u32) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Regulation score.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_scores(self.home, self.away)
    }
}

/// A scheduled fixture as supplied by the data source. Read-only to the engine.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: MatchId,
    pub stage: Stage,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    pub kickoff_utc: DateTime<Utc>,
    #[serde(default)]
    pub status: MatchStatus,
    /// Present once the fixture has started scoring.
    #[serde(default)]
    pub score: Option<Score>,
    /// Knockout only: who went through after a regulation draw.
    #[serde(default)]
    pub winner: Option<Side>,
    #[serde(default)]
    pub decided_by: Option<DecidedBy>,
    /// Last time the data source changed the score or status. Finished
    /// fixtures without it count as updated at kickoff.
    #[serde(default)]
    pub result_updated_utc: Option<DateTime<Utc>>,
}

impl Fixture {
    /// A scheduled fixture with no teams or result yet.
    pub fn new(stage: Stage, kickoff_utc: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage,
            home_team: String::new(),
            away_team: String::new(),
            kickoff_utc,
            status: MatchStatus::Scheduled,
            score: None,
            winner: None,
            decided_by: None,
            result_updated_utc: None,
        }
    }

    pub fn with_teams(mut self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.home_team = home.into();
        self.away_team = away.into();
        self
    }

    /// Mark the fixture finished with the given regulation score.
    pub fn finished(mut self, home: u32, away: u32) -> Self {
        self.status = MatchStatus::Finished;
        self.score = Some(Score::new(home, away));
        self
    }

    /// Record how a level knockout fixture was settled.
    pub fn settled_by(mut self, winner: Side, decided_by: DecidedBy) -> Self {
        self.winner = Some(winner);
        self.decided_by = Some(decided_by);
        self
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Display label, "Home vs Away"; falls back to the stage name when teams are unknown.
    pub fn label(&self) -> String {
        if self.home_team.is_empty() && self.away_team.is_empty() {
            return self.stage.to_string();
        }
        format!("{} vs {}", self.home_team, self.away_team)
    }
}
