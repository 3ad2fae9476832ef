//! Weighted phoneme-sequence alignment.
//!
//! A Levenshtein DP with similarity-aware substitution costs. A similar
//! replace (1) always beats delete+insert (5), and a dissimilar replace
//! (4) still beats the split unless a better path exists, so the
//! alignment prefers genuine one-to-one correspondences. The oracle runs
//! in non-strict, no-word-context mode here; strictness belongs to the
//! scorer so the alignment stays stable across words.

use std::ops::Range;

use crate::rules::similar;

const COST_MATCH: usize = 0;
const COST_SIMILAR_REPLACE: usize = 1;
const COST_INSERT: usize = 2;
const COST_DELETE: usize = 3;
const COST_DISSIMILAR_REPLACE: usize = 4;

/// Levenshtein opcode kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// A run of identical opcodes with index ranges over both sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub kind: EditKind,
    pub target_range: Range<usize>,
    pub actual_range: Range<usize>,
}

/// Aligns the target phoneme sequence against the decoded one.
pub fn align(target: &[String], actual: &[String]) -> Vec<EditOperation> {
    let m = target.len();
    let n = actual.len();
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        dp[i][0] = i * COST_DELETE;
    }
    for j in 1..=n {
        dp[0][j] = j * COST_INSERT;
    }
    for i in 1..=m {
        for j in 1..=n {
            let diagonal = dp[i - 1][j - 1] + substitution_cost(&target[i - 1], &actual[j - 1]);
            let delete = dp[i - 1][j] + COST_DELETE;
            let insert = dp[i][j - 1] + COST_INSERT;
            dp[i][j] = diagonal.min(delete).min(insert);
        }
    }
    merge_ops(backtrack(&dp, target, actual))
}

fn substitution_cost(target: &str, actual: &str) -> usize {
    if target == actual {
        COST_MATCH
    } else if similar(target, actual, None, false, false) {
        COST_SIMILAR_REPLACE
    } else {
        COST_DISSIMILAR_REPLACE
    }
}

/// Walks the table back from the corner, preferring match/replace over
/// delete over insert on cost ties.
fn backtrack(dp: &[Vec<usize>], target: &[String], actual: &[String]) -> Vec<(EditKind, usize, usize)> {
    let mut ops = Vec::new();
    let mut i = target.len();
    let mut j = actual.len();
    while i > 0 || j > 0 {
        let here = dp[i][j];
        if i > 0 && j > 0 {
            let cost = substitution_cost(&target[i - 1], &actual[j - 1]);
            if here == dp[i - 1][j - 1] + cost {
                let kind = if cost == COST_MATCH {
                    EditKind::Equal
                } else {
                    EditKind::Replace
                };
                ops.push((kind, i - 1, j - 1));
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && here == dp[i - 1][j] + COST_DELETE {
            ops.push((EditKind::Delete, i - 1, j));
            i -= 1;
            continue;
        }
        ops.push((EditKind::Insert, i, j - 1));
        j -= 1;
    }
    ops.reverse();
    ops
}

fn merge_ops(ops: Vec<(EditKind, usize, usize)>) -> Vec<EditOperation> {
    let mut merged: Vec<EditOperation> = Vec::new();
    for (kind, ti, ai) in ops {
        let (target_range, actual_range) = match kind {
            EditKind::Equal | EditKind::Replace => (ti..ti + 1, ai..ai + 1),
            EditKind::Delete => (ti..ti + 1, ai..ai),
            EditKind::Insert => (ti..ti, ai..ai + 1),
        };
        if let Some(last) = merged.last_mut() {
            if last.kind == kind
                && last.target_range.end == target_range.start
                && last.actual_range.end == actual_range.start
            {
                last.target_range.end = target_range.end;
                last.actual_range.end = actual_range.end;
                continue;
            }
        }
        merged.push(EditOperation {
            kind,
            target_range,
            actual_range,
        });
    }
    merged
}
