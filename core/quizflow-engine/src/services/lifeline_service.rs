use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult};
use crate::models::lifeline::{AudiencePoll, LifelineAllotment, LifelineBank, LifelineKind};
use crate::utils::rng::{pick_between, pick_index, shuffle, RandomSource};

/// Lower and upper bound for the audience's share on the correct answer.
const AUDIENCE_CORRECT_MIN: u32 = 40;
const AUDIENCE_CORRECT_MAX: u32 = 70;

/// Applies the three lifeline effects and tracks remaining uses per kind.
/// Every entry point checks availability before doing anything; a use is
/// consumed only when the effect actually happened.
#[derive(Debug, Clone)]
pub struct LifelineEngine {
    bank: LifelineBank,
}

impl LifelineEngine {
    pub fn new(slots: BTreeMap<LifelineKind, LifelineAllotment>) -> Self {
        Self {
            bank: LifelineBank::new(slots),
        }
    }

    pub fn is_available(&self, kind: LifelineKind) -> bool {
        self.bank.is_available(kind)
    }

    pub fn remaining(&self, kind: LifelineKind) -> u32 {
        self.bank.remaining(kind)
    }

    /// Eliminates exactly two incorrect options. Refused without consuming a
    /// use when fewer than two eliminable incorrect options exist (boolean
    /// questions, or repeat invocations on an already thinned round).
    pub fn fifty_fifty(
        &mut self,
        correct_option: usize,
        option_count: usize,
        already_eliminated: &BTreeSet<usize>,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<Vec<usize>> {
        self.ensure_available(LifelineKind::FiftyFifty)?;

        let mut eliminable: Vec<usize> = (0..option_count)
            .filter(|&i| i != correct_option && !already_eliminated.contains(&i))
            .collect();
        if eliminable.len() < 2 {
            tracing::debug!(
                "50:50 refused: only {} eliminable options",
                eliminable.len()
            );
            return Err(EngineError::LifelineUnavailable(LifelineKind::FiftyFifty));
        }

        shuffle(rng, &mut eliminable);
        let mut eliminated = vec![eliminable[0], eliminable[1]];
        eliminated.sort_unstable();

        self.bank.consume(LifelineKind::FiftyFifty);
        tracing::info!("50:50 eliminated options {:?}", eliminated);
        Ok(eliminated)
    }

    /// Consumes a skip. The caller advances the session without resolving
    /// the current round; there is no score or streak change.
    pub fn skip(&mut self) -> EngineResult<()> {
        self.ensure_available(LifelineKind::SkipQuestion)?;
        self.bank.consume(LifelineKind::SkipQuestion);
        tracing::info!("Question skipped via lifeline");
        Ok(())
    }

    /// Simulated crowd response: the correct option draws 40-70%, the rest of
    /// the budget is spread over the incorrect options and any leftover lands
    /// on a random incorrect option, so the total is exactly 100.
    pub fn ask_audience(
        &mut self,
        correct_option: usize,
        option_count: usize,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<AudiencePoll> {
        self.ensure_available(LifelineKind::AskAudience)?;
        debug_assert!(correct_option < option_count);

        let mut percentages = vec![0u32; option_count];
        percentages[correct_option] =
            pick_between(rng, AUDIENCE_CORRECT_MIN, AUDIENCE_CORRECT_MAX);
        let mut remaining = 100 - percentages[correct_option];

        let others: Vec<usize> = (0..option_count).filter(|&i| i != correct_option).collect();
        for &index in &others {
            if remaining == 0 {
                break;
            }
            let amount = pick_between(rng, 0, remaining);
            percentages[index] = amount;
            remaining -= amount;
        }

        if remaining > 0 {
            let index = others[pick_index(rng, others.len())];
            percentages[index] += remaining;
        }

        self.bank.consume(LifelineKind::AskAudience);
        tracing::info!("Audience poll generated: {:?}", percentages);
        Ok(AudiencePoll { percentages })
    }

    fn ensure_available(&self, kind: LifelineKind) -> EngineResult<()> {
        if self.bank.is_available(kind) {
            Ok(())
        } else {
            Err(EngineError::LifelineUnavailable(kind))
        }
    }
}
