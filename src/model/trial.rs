//! Show trial: a five-phase public prosecution culminating in a sentence.
//!
//! Phase checks are gated purely by elapsed turns. The sentence and the
//! terminal metrics are computed once, on entry to `Sentencing`; world
//! counters are only touched when the record reaches `Completed`. A
//! completed record is immutable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::detention::{ConfessionKind, PsycheView};
use super::effects::Fate;
use super::weighted_pick;

const EXTRACTION_TURNS: u64 = 2;
const PUBLIC_TRIAL_TURNS: u64 = 5;
const SENTENCING_TURNS: u64 = 7;
const COMPLETION_TURNS: u64 = 9;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrialPhase {
    Accusation,
    ConfessionExtraction,
    PublicTrial,
    Sentencing,
    Completed,
}

impl TrialPhase {
    pub fn index(self) -> usize {
        match self {
            TrialPhase::Accusation => 0,
            TrialPhase::ConfessionExtraction => 1,
            TrialPhase::PublicTrial => 2,
            TrialPhase::Sentencing => 3,
            TrialPhase::Completed => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charge {
    Treason,
    Sabotage,
    Espionage,
    Corruption,
    Conspiracy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentence {
    Execution,
    Imprisonment { years: u8 },
    Exile,
    Demotion,
}

impl Sentence {
    pub fn fate(self) -> Fate {
        match self {
            Sentence::Execution => Fate::Executed,
            Sentence::Imprisonment { .. } => Fate::Imprisoned,
            Sentence::Exile => Fate::Exiled,
            Sentence::Demotion => Fate::Demoted,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Sentence::Execution => "execution",
            Sentence::Imprisonment { years: 25 } => "imprisonment_25",
            Sentence::Imprisonment { years: 15 } => "imprisonment_15",
            Sentence::Imprisonment { .. } => "imprisonment_10",
            Sentence::Exile => "exile",
            Sentence::Demotion => "demotion",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrialEvent {
    PhaseAdvanced(TrialPhase),
    ConfessionExtracted(ConfessionKind),
    SentencePassed(Sentence),
    Completed {
        sentence: Sentence,
        intimidation_gained: i32,
        condemnation: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub id: u64,
    pub defendant: u64,
    pub charges: Vec<Charge>,
    pub phase: TrialPhase,
    pub confession: Option<ConfessionKind>,
    pub sentence: Option<Sentence>,
    pub started_turn: u64,
    pub intimidation_gained: i32,
    pub condemnation: i32,
}

impl TrialRecord {
    pub fn new(
        id: u64,
        defendant: u64,
        charges: Vec<Charge>,
        confession: Option<ConfessionKind>,
        turn: u64,
    ) -> Self {
        Self {
            id,
            defendant,
            charges,
            phase: TrialPhase::Accusation,
            confession,
            sentence: None,
            started_turn: turn,
            intimidation_gained: 0,
            condemnation: 0,
        }
    }

    pub fn elapsed(&self, turn: u64) -> u64 {
        turn.saturating_sub(self.started_turn)
    }

    pub fn is_active(&self) -> bool {
        self.phase != TrialPhase::Completed
    }

    /// Drive the trial one phase-check forward.
    pub fn advance(
        &mut self,
        turn: u64,
        rng: &mut impl Rng,
        psyche: PsycheView,
        defendant_rank: u8,
    ) -> Vec<TrialEvent> {
        if !self.is_active() {
            return Vec::new();
        }
        let elapsed = self.elapsed(turn);
        let mut events = Vec::new();

        match self.phase {
            TrialPhase::Accusation => {
                if elapsed >= EXTRACTION_TURNS {
                    self.enter(TrialPhase::ConfessionExtraction, &mut events);
                }
            }
            TrialPhase::ConfessionExtraction => {
                if elapsed >= PUBLIC_TRIAL_TURNS {
                    // A confession carried over from detention stands.
                    let kind = self
                        .confession
                        .unwrap_or_else(|| draw_confession(rng, psyche));
                    self.confession = Some(kind);
                    events.push(TrialEvent::ConfessionExtracted(kind));
                    self.enter(TrialPhase::PublicTrial, &mut events);
                }
            }
            TrialPhase::PublicTrial => {
                if elapsed >= SENTENCING_TURNS {
                    let confession = self.confession.unwrap_or(ConfessionKind::Resisted);
                    let sentence = draw_sentence(rng, confession, defendant_rank);
                    self.sentence = Some(sentence);
                    self.intimidation_gained = intimidation_gained(sentence, defendant_rank);
                    self.condemnation = condemnation(confession, defendant_rank);
                    events.push(TrialEvent::SentencePassed(sentence));
                    self.enter(TrialPhase::Sentencing, &mut events);
                }
            }
            TrialPhase::Sentencing => {
                if elapsed >= COMPLETION_TURNS {
                    self.enter(TrialPhase::Completed, &mut events);
                    // Sentence was fixed on entry to Sentencing.
                    let sentence = self.sentence.unwrap_or(Sentence::Demotion);
                    events.push(TrialEvent::Completed {
                        sentence,
                        intimidation_gained: self.intimidation_gained,
                        condemnation: self.condemnation,
                    });
                }
            }
            TrialPhase::Completed => {}
        }

        events
    }

    fn enter(&mut self, next: TrialPhase, events: &mut Vec<TrialEvent>) {
        debug_assert!(next.index() > self.phase.index(), "phase must move forward");
        self.phase = next;
        events.push(TrialEvent::PhaseAdvanced(next));
    }
}

/// Confession weighting shared with detention: loyalty and paranoia harden
/// the defendant, ambition makes cooperation more likely.
fn draw_confession(rng: &mut impl Rng, psyche: PsycheView) -> ConfessionKind {
    let weights = [
        (
            ConfessionKind::Compliant,
            (35 + psyche.ambition / 5 - psyche.loyalty / 5).max(5),
        ),
        (
            ConfessionKind::Resisted,
            (20 + psyche.loyalty / 3 + psyche.paranoia / 5).max(5),
        ),
        (
            ConfessionKind::Recanted,
            (10 + psyche.paranoia / 5).max(5),
        ),
        (
            ConfessionKind::ImplicatedOthers,
            (20 + psyche.ambition / 3).max(5),
        ),
    ];
    *weighted_pick(rng, &weights)
}

fn draw_sentence(rng: &mut impl Rng, confession: ConfessionKind, rank: u8) -> Sentence {
    let rank = rank as i32;
    let defiant = matches!(
        confession,
        ConfessionKind::Resisted | ConfessionKind::Recanted
    );
    let lenient = confession == ConfessionKind::ImplicatedOthers;

    let weights = [
        (
            Sentence::Execution,
            (20 + if defiant { 40 } else { 0 } + rank * 3 - if lenient { 15 } else { 0 })
                .max(5),
        ),
        (Sentence::Imprisonment { years: 25 }, (20 + rank).max(5)),
        (Sentence::Imprisonment { years: 15 }, 15),
        (
            Sentence::Imprisonment { years: 10 },
            (10 + if lenient { 10 } else { 0 }).max(5),
        ),
        (
            Sentence::Exile,
            (10 + if lenient { 10 } else { 0 } - rank).max(5),
        ),
        (
            Sentence::Demotion,
            (10 + if confession == ConfessionKind::Compliant { 5 } else { 0 } - rank).max(5),
        ),
    ];
    *weighted_pick(rng, &weights)
}

fn intimidation_gained(sentence: Sentence, rank: u8) -> i32 {
    5 + rank as i32 + if sentence == Sentence::Execution { 5 } else { 0 }
}

/// Defiance in the dock creates a martyr abroad.
fn condemnation(confession: ConfessionKind, rank: u8) -> i32 {
    match confession {
        ConfessionKind::Resisted | ConfessionKind::Recanted => 10 + rank as i32,
        _ => 2,
    }
}
