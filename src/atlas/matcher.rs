//! Glyph column to atlas position matching
//!
//! A glyph column usually matches several atlas positions. Picking them
//! independently would split the glyph into many one-pixel strips, so the
//! matcher prefers positions that continue a run started by a neighbour:
//!
//! 1. Columns with a single candidate are fixed immediately.
//! 2. Unassigned columns adjacent to an assigned one take the candidate
//!    that extends that neighbour's run. Sweeps repeat until one makes no
//!    assignment.
//! 3. When stuck, the first unassigned column takes its lowest candidate
//!    and step 2 resumes.
//!
//! Step 3 always shrinks the unassigned set, so the loop terminates, and
//! nothing depends on hash order or randomness, so the result is stable.

use super::column::Column;
use super::lookup::LookUp;
use crate::error::GenerateError;
use log::{debug, trace};

/// Resolve every column of `glyph` to an atlas position
///
/// Returns one atlas index per glyph column. Fails with
/// [`GenerateError::UnknownColumn`] if any column does not occur in the
/// atlas at all.
pub fn fit_to_atlas(
    name: &str,
    glyph: &[Column],
    lut: &LookUp,
) -> Result<Vec<usize>, GenerateError> {
    let candidates = glyph
        .iter()
        .enumerate()
        .map(|(x, column)| {
            lut.candidates(column)
                .ok_or_else(|| GenerateError::UnknownColumn {
                    glyph: name.to_string(),
                    column: x,
                })
        })
        .collect::<Result<Vec<&[usize]>, _>>()?;

    let mut result: Vec<Option<usize>> = candidates
        .iter()
        .map(|c| if c.len() == 1 { Some(c[0]) } else { None })
        .collect();

    let mut forced = 0usize;
    while result.iter().any(Option::is_none) {
        if propagate_adjacent(&candidates, &mut result) {
            continue;
        }

        if let Some(x) = result.iter().position(Option::is_none) {
            trace!("'{}': forcing column {} -> {}", name, x, candidates[x][0]);
            result[x] = Some(candidates[x][0]);
            forced += 1;
        }
    }

    debug!(
        "'{}': matched {} columns ({} forced picks)",
        name,
        glyph.len(),
        forced
    );

    Ok(result.into_iter().flatten().collect())
}

/// One left-to-right sweep extending runs into unassigned neighbours.
/// Returns whether anything was assigned.
fn propagate_adjacent(candidates: &[&[usize]], result: &mut [Option<usize>]) -> bool {
    let mut progress = false;

    for x in 0..result.len() {
        if result[x].is_some() {
            continue;
        }
        let cands = candidates[x];

        let from_left = x
            .checked_sub(1)
            .and_then(|l| result[l])
            .map(|i| i + 1)
            .filter(|i| cands.contains(i));

        let from_right = || {
            result
                .get(x + 1)
                .copied()
                .flatten()
                .and_then(|j| j.checked_sub(1))
                .filter(|j| cands.contains(j))
        };

        if let Some(i) = from_left.or_else(from_right) {
            result[x] = Some(i);
            progress = true;
        }
    }

    progress
}
