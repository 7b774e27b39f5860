use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LifelineKind {
    FiftyFifty,
    SkipQuestion,
    AskAudience,
}

impl LifelineKind {
    pub const ALL: [LifelineKind; 3] = [
        LifelineKind::FiftyFifty,
        LifelineKind::SkipQuestion,
        LifelineKind::AskAudience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifelineKind::FiftyFifty => "fifty_fifty",
            LifelineKind::SkipQuestion => "skip_question",
            LifelineKind::AskAudience => "ask_audience",
        }
    }
}

impl fmt::Display for LifelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind allotment as configured for a deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LifelineAllotment {
    pub uses: u32,
    pub available: bool,
}

impl LifelineAllotment {
    pub fn new(uses: u32, available: bool) -> Self {
        Self { uses, available }
    }
}

/// Remaining-uses bookkeeping for one session. Counters only ever decrease,
/// by exactly one per successful invocation.
#[derive(Debug, Clone)]
pub struct LifelineBank {
    slots: BTreeMap<LifelineKind, LifelineAllotment>,
}

impl LifelineBank {
    pub fn new(slots: BTreeMap<LifelineKind, LifelineAllotment>) -> Self {
        Self { slots }
    }

    pub fn is_available(&self, kind: LifelineKind) -> bool {
        self.slots
            .get(&kind)
            .map(|slot| slot.available && slot.uses > 0)
            .unwrap_or(false)
    }

    pub fn remaining(&self, kind: LifelineKind) -> u32 {
        self.slots
            .get(&kind)
            .filter(|slot| slot.available)
            .map(|slot| slot.uses)
            .unwrap_or(0)
    }

    /// Spends one use. Callers check [`Self::is_available`] first; spending
    /// an empty slot is a bug.
    pub fn consume(&mut self, kind: LifelineKind) {
        let slot = self
            .slots
            .get_mut(&kind)
            .expect("consume called for an unconfigured lifeline");
        debug_assert!(slot.available && slot.uses > 0);
        slot.uses = slot.uses.saturating_sub(1);
    }
}

/// Simulated audience poll: one percentage per shuffled option, summing to
/// exactly 100.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AudiencePoll {
    pub percentages: Vec<u32>,
}

impl AudiencePoll {
    pub fn total(&self) -> u32 {
        self.percentages.iter().sum()
    }
}

/// Outcome of a successful lifeline invocation, as applied to the round.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum LifelineEffect {
    OptionsEliminated { eliminated: Vec<usize> },
    QuestionSkipped,
    AudiencePolled { poll: AudiencePoll },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(uses: u32, available: bool) -> LifelineBank {
        let mut slots = BTreeMap::new();
        slots.insert(
            LifelineKind::FiftyFifty,
            LifelineAllotment::new(uses, available),
        );
        LifelineBank::new(slots)
    }

    #[test]
    fn exhausted_slot_is_unavailable() {
        let mut slots = bank(1, true);
        assert!(slots.is_available(LifelineKind::FiftyFifty));
        slots.consume(LifelineKind::FiftyFifty);
        assert!(!slots.is_available(LifelineKind::FiftyFifty));
        assert_eq!(slots.remaining(LifelineKind::FiftyFifty), 0);
    }

    #[test]
    fn disabled_slot_is_unavailable_with_uses_left() {
        let slots = bank(2, false);
        assert!(!slots.is_available(LifelineKind::FiftyFifty));
        assert_eq!(slots.remaining(LifelineKind::FiftyFifty), 0);
    }

    #[test]
    fn unconfigured_kind_reports_unavailable() {
        let slots = bank(1, true);
        assert!(!slots.is_available(LifelineKind::AskAudience));
    }
}
