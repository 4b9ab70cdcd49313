//! Fuzzy ranking of prompts by name.
//!
//! Scoring is delegated to the skim matcher, case-insensitive. Matches are
//! sorted by score, then by shorter name, then by name. The empty query
//! keeps every prompt with equal score.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Prompt;
use crate::store::PromptStore;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Reverse;

use super::list::EMPTY_MESSAGE;

/// Indices into `prompts` of the matches for `query`, best first.
pub fn rank(prompts: &[Prompt], query: &str) -> Vec<usize> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(usize, i64)> = prompts
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            if query.is_empty() {
                return Some((i, 0));
            }
            matcher.fuzzy_match(&p.name, query).map(|s| (i, s))
        })
        .collect();

    scored.sort_by_key(|&(i, score)| {
        let name = &prompts[i].name;
        (Reverse(score), name.chars().count(), name.clone())
    });
    scored.into_iter().map(|(i, _)| i).collect()
}

/// All prompts ranked against `query`.
pub fn run<S: PromptStore>(store: &S, query: &str) -> Result<CmdResult> {
    let prompts = store.list()?;
    if prompts.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info(EMPTY_MESSAGE)));
    }

    let ranked = rank(&prompts, query)
        .into_iter()
        .map(|i| prompts[i].clone())
        .collect();
    Ok(CmdResult::default().with_listed_prompts(ranked))
}
