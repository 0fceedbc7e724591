use serde::{Serialize, Deserialize};

use std::fmt;

use crate::sample::Record;
use crate::metrics::{information_gain, gain_ratio};
use crate::tie_break::{self, TieBreak};
use crate::error::{Id3Error, Result};


/// Splitting criteria for growing an ID3 tree.
/// * `SplitBy::InformationGain` maximizes the information gain.
/// * `SplitBy::GainRatio` maximizes the information gain
///     normalized by the split information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitBy {
    /// Information gain.
    #[default]
    InformationGain,
    /// Gain ratio.
    GainRatio,
}


impl fmt::Display for SplitBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InformationGain => "Information gain",
            Self::GainRatio => "Gain ratio",
        };

        write!(f, "{name}")
    }
}


impl SplitBy {
    /// Returns the score of splitting `records` by `attribute`.
    /// A degenerate split scores `f64::NEG_INFINITY` under `GainRatio`.
    pub fn score<B>(
        &self,
        records: &[&Record],
        attribute: &str,
        target: &str,
        tie: &mut B,
    ) -> Result<f64>
        where B: TieBreak + ?Sized
    {
        match self {
            Self::InformationGain => {
                information_gain(records, attribute, target, tie)
            },
            Self::GainRatio => {
                match gain_ratio(records, attribute, target, tie) {
                    Err(Id3Error::DegenerateSplit(_)) => Ok(f64::NEG_INFINITY),
                    res => res,
                }
            },
        }
    }


    /// Returns the attribute with the best score.
    ///
    /// Every candidate is scored; all attributes attaining
    /// the maximal score are collected and one of them
    /// is chosen by `tie`.
    pub fn best_attribute<'a, B>(
        &self,
        records: &[&Record],
        candidates: &[&'a str],
        target: &str,
        tie: &mut B,
    ) -> Result<&'a str>
        where B: TieBreak + ?Sized
    {
        let mut best_score = f64::NEG_INFINITY;
        let mut tied: Vec<&'a str> = Vec::new();

        for &attribute in candidates {
            let score = self.score(records, attribute, target, tie)?;

            if score > best_score || tied.is_empty() {
                best_score = score;
                tied.clear();
                tied.push(attribute);
            } else if score == best_score {
                tied.push(attribute);
            }
        }

        tie_break::pick(tie, &tied)
            .copied()
            .ok_or(Id3Error::NoCandidate)
    }
}
