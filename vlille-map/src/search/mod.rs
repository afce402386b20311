//! Fuzzy station-name search.
//!
//! Finds stations whose names approximately match free text, tolerant of
//! typos, and optionally re-ranks the matches by distance from a reference
//! point. Like [`crate::nearby`], everything here is pure and synchronous.

mod config;
mod fuzzy;
mod names;


pub use config::SearchConfig;
pub use fuzzy::{CONTAINMENT_PENALTY, FuzzyQuery, normalize};
pub use names::{ScoredStation, best_match_near, search, search_near, search_scored};
