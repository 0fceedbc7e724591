//! Impurity measures used to score a split.
//!
//! All functions work on a view `&[&Record]` of a dataset
//! and are pure, except that `information_gain` consults a [`TieBreak`]
//! when missing entries have to be merged into a tied majority value.

use std::collections::HashMap;

use crate::sample::{Record, Value};
use crate::tie_break::{self, TieBreak};
use crate::error::{Id3Error, Result};


/// Subsets of records sharing one value, in first-seen order of the value.
pub(crate) type Partition<'a> = Vec<(&'a Value, Vec<&'a Record>)>;


/// Partition `records` by the value of `attribute`.
pub(crate) fn partition<'a>(records: &[&'a Record], attribute: &str)
    -> Result<Partition<'a>>
{
    let mut index: HashMap<&Value, usize> = HashMap::new();
    let mut subsets: Partition<'a> = Vec::new();
    for &record in records {
        let value = record.value(attribute)?;
        match index.get(value) {
            Some(&k) => { subsets[k].1.push(record); },
            None => {
                index.insert(value, subsets.len());
                subsets.push((value, vec![record]));
            },
        }
    }
    Ok(subsets)
}


/// Count the values of `attribute`, in first-seen order.
pub(crate) fn frequencies<'a>(records: &[&'a Record], attribute: &str)
    -> Result<Vec<(&'a Value, usize)>>
{
    let counts = partition(records, attribute)?
        .into_iter()
        .map(|(value, subset)| (value, subset.len()))
        .collect();
    Ok(counts)
}


/// Returns `-Σ p log2 p` over the given counts.
#[inline(always)]
fn weighted_log_sum<I>(counts: I, total: usize) -> f64
    where I: IntoIterator<Item = usize>
{
    let total = total as f64;
    counts.into_iter()
        .map(|count| {
            let p = count as f64 / total;
            if p <= 0f64 { 0f64 } else { -p * p.log2() }
        })
        .sum::<f64>()
}


/// Entropy (in bits) of the `target` labels of `records`.
pub fn entropy(records: &[&Record], target: &str) -> Result<f64> {
    if records.is_empty() {
        return Err(Id3Error::EmptySample("entropy"));
    }
    let counts = frequencies(records, target)?;
    let entropy = weighted_log_sum(
        counts.into_iter().map(|(_, c)| c), records.len()
    );
    Ok(entropy)
}


/// Information gain of splitting `records` by `attribute`.
///
/// Records holding the missing sentinel for `attribute`
/// are merged into the subset of the most frequent non-missing value;
/// ties among the most frequent values are broken by `tie`.
pub fn information_gain<B>(
    records: &[&Record],
    attribute: &str,
    target: &str,
    tie: &mut B,
) -> Result<f64>
    where B: TieBreak + ?Sized
{
    if records.is_empty() {
        return Err(Id3Error::EmptySample("information gain"));
    }
    let n_sample = records.len() as f64;

    let mut subsets = partition(records, attribute)?;
    merge_missing(&mut subsets, tie);

    let mut gain = entropy(records, target)?;
    for (_, subset) in subsets.iter() {
        let ratio = subset.len() as f64 / n_sample;
        gain -= ratio * entropy(subset, target)?;
    }
    Ok(gain)
}


/// Move the missing-value subset into the largest non-missing subset.
/// If every value is missing, the partition is left as is.
fn merge_missing<B>(subsets: &mut Partition<'_>, tie: &mut B)
    where B: TieBreak + ?Sized
{
    let Some(pos) = subsets.iter().position(|(v, _)| v.is_missing()) else {
        return;
    };

    let mut tied = Vec::new();
    let mut max_size = 0_usize;
    for (k, (value, subset)) in subsets.iter().enumerate() {
        if value.is_missing() { continue; }
        if subset.len() > max_size {
            max_size = subset.len();
            tied.clear();
            tied.push(k);
        } else if subset.len() == max_size {
            tied.push(k);
        }
    }

    let Some(&k) = tie_break::pick(tie, &tied) else { return; };
    let (_, missing) = subsets.remove(pos);
    let k = if k > pos { k - 1 } else { k };
    subsets[k].1.extend(missing);
}


/// Split information of `attribute`.
///
/// This is `1 - Σ p log2 p` over the value distribution of `attribute`,
/// that is, one plus the textbook split information.
/// The offset is kept so that gain ratios match the reference results.
pub fn split_information(records: &[&Record], attribute: &str)
    -> Result<f64>
{
    if records.is_empty() {
        return Err(Id3Error::EmptySample("split information"));
    }
    let counts = frequencies(records, attribute)?;
    let info = 1f64 + weighted_log_sum(
        counts.into_iter().map(|(_, c)| c), records.len()
    );
    Ok(info)
}


/// Gain ratio of splitting `records` by `attribute`.
/// Returns `Id3Error::DegenerateSplit` if the split information is zero.
pub fn gain_ratio<B>(
    records: &[&Record],
    attribute: &str,
    target: &str,
    tie: &mut B,
) -> Result<f64>
    where B: TieBreak + ?Sized
{
    let info = split_information(records, attribute)?;
    if info == 0f64 {
        return Err(Id3Error::DegenerateSplit(attribute.to_string()));
    }
    let gain = information_gain(records, attribute, target, tie)?;
    Ok(gain / info)
}


/// The most common value of `target` among `records`.
/// Ties are broken by `tie`.
pub fn majority<'a, B>(records: &[&'a Record], target: &str, tie: &mut B)
    -> Result<&'a Value>
    where B: TieBreak + ?Sized
{
    let counts = frequencies(records, target)?;
    let max_count = counts.iter()
        .map(|(_, c)| *c)
        .max()
        .ok_or(Id3Error::EmptySample("majority label"))?;
    let tied = counts.into_iter()
        .filter_map(|(v, c)| (c == max_count).then_some(v))
        .collect::<Vec<_>>();

    tie_break::pick(tie, &tied)
        .copied()
        .ok_or(Id3Error::EmptySample("majority label"))
}
