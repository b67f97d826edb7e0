//! Skill-overlap ranking over the candidate index.
//!
//! Algorithm:
//! 1. Lower-case the query skills into a set.
//! 2. Drop candidates whose readiness differs from the requested one (if any).
//! 3. score = number of the candidate's skill entries present in the set.
//!    Entries are not deduplicated, so a skill listed twice counts twice.
//! 4. Drop candidates below `minimum_score` (when it is above zero).
//! 5. Sort by score descending, then by candidate id ascending.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::index::models::{CandidateIndexEntry, ReadinessStatus};

/// A validated recruiter query.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub skills: Vec<String>,
    /// `None` disables the readiness filter.
    pub readiness: Option<ReadinessStatus>,
    /// Zero disables the score floor.
    pub minimum_score: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub candidate: CandidateIndexEntry,
    pub score: usize,
}

/// Ranks `candidates` against `query`. An empty result is a valid answer.
pub fn rank<'a, I>(candidates: I, query: &SearchQuery) -> Vec<SearchResult>
where
    I: IntoIterator<Item = &'a CandidateIndexEntry>,
{
    let wanted: HashSet<String> = query.skills.iter().map(|s| s.to_lowercase()).collect();

    let mut results: Vec<SearchResult> = candidates
        .into_iter()
        .filter(|c| query.readiness.map_or(true, |r| r == c.readiness_status))
        .filter_map(|c| {
            let score = skill_score(&c.skills, &wanted);
            if query.minimum_score > 0 && score < query.minimum_score {
                return None;
            }
            Some(SearchResult {
                candidate: c.clone(),
                score,
            })
        })
        .collect();

    results.sort_by(compare_ranked);
    results
}

/// Counts skill entries whose lower-cased form is in `wanted`.
fn skill_score(skills: &[String], wanted: &HashSet<String>) -> usize {
    if wanted.is_empty() {
        return 0;
    }
    skills
        .iter()
        .filter(|s| wanted.contains(&s.to_lowercase()))
        .count()
}

fn compare_ranked(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.candidate.id.cmp(&b.candidate.id))
}
