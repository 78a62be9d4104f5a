/// Curriculum — several sequencing runs sharing one learner.
///
/// Each unit (typically one video) is sequenced in turn; words learned in
/// earlier units are known when later units are sequenced.

use serde::{Deserialize, Serialize};

use crate::core::pipeline::Sequencer;
use crate::core::sequencer::RunSummary;
use crate::schema::selection::SelectionRecord;
use crate::schema::sentence::Sentence;

/// The sequenced output of one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSequence {
    pub name: String,
    /// Numbered from 1 within the unit.
    pub records: Vec<SelectionRecord>,
    pub summary: RunSummary,
}

/// Runs units in order against a single `Sequencer`.
#[derive(Debug)]
pub struct Curriculum {
    sequencer: Sequencer,
    units: Vec<UnitSequence>,
}

impl Curriculum {
    pub fn new(sequencer: Sequencer) -> Self {
        Self {
            sequencer,
            units: Vec::new(),
        }
    }

    /// Sequence one unit and keep its output.
    pub fn add_unit<I>(&mut self, name: impl Into<String>, sentences: I) -> &UnitSequence
    where
        I: IntoIterator<Item = Sentence>,
    {
        let name = name.into();
        let run = self.sequencer.sequence(sentences);
        tracing::info!(
            unit = %name,
            selected = run.summary.selected,
            known = self.sequencer.known().len(),
            "unit sequenced"
        );
        self.units.push(UnitSequence {
            name,
            records: run.records,
            summary: run.summary,
        });
        &self.units[self.units.len() - 1]
    }

    pub fn units(&self) -> &[UnitSequence] {
        &self.units
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Every unit's records concatenated in unit order, keeping each
    /// unit's own numbering.
    pub fn master_list(&self) -> Vec<SelectionRecord> {
        self.units
            .iter()
            .flat_map(|unit| unit.records.iter().cloned())
            .collect()
    }

    /// Summary totals across all units.
    pub fn totals(&self) -> RunSummary {
        let mut totals = RunSummary::default();
        for (i, unit) in self.units.iter().enumerate() {
            let s = &unit.summary;
            if i == 0 {
                totals.known_before = s.known_before;
            }
            totals.selected += s.selected;
            totals.review += s.review;
            totals.above_ceiling += s.above_ceiling;
            totals.words_introduced += s.words_introduced;
            totals.excluded_empty += s.excluded_empty;
            totals.excluded_duplicates += s.excluded_duplicates;
            totals.known_after = s.known_after;
        }
        totals
    }

    pub fn into_sequencer(self) -> Sequencer {
        self.sequencer
    }
}
