//! Priority-based best-file selection
//!
//! Keeps one file per note name within a directory: the one with the
//! smallest `(duration_rank, dynamic_rank)` key. Candidates are offered one
//! at a time in listing order and the registry reports which file has to go.
//!
//! **Tie-break:** on equal duration rank, a candidate whose dynamic rank is
//! less than *or equal to* the incumbent's replaces it, so among fully equal
//! keys the file offered last survives.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use sndkit_common::NoteName;

use super::file_classifier::Candidate;

/// Result of offering a candidate to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// First file seen for this note
    Registered,
    /// Candidate displaced the previous best, which must be removed
    Replaced { superseded: Candidate },
    /// Candidate lost to the current best and must be removed
    Rejected { loser: Candidate, incumbent: String },
}

/// Current best file per note name for one directory
#[derive(Debug, Default)]
pub struct BestFileRegistry {
    best: HashMap<NoteName, Candidate>,
}

impl BestFileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `candidate` and return what happened
    ///
    /// **Algorithm:**
    /// 1. Unseen note: register, nothing to remove
    /// 2. Strictly lower duration rank: candidate wins
    /// 3. Equal duration rank and dynamic rank `<=` incumbent's: candidate wins
    /// 4. Otherwise the candidate loses
    pub fn offer(&mut self, candidate: Candidate) -> Selection {
        match self.best.entry(candidate.note.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
                Selection::Registered
            }
            Entry::Occupied(mut slot) => {
                if Self::beats(&candidate, slot.get()) {
                    let superseded = slot.insert(candidate);
                    Selection::Replaced { superseded }
                } else {
                    Selection::Rejected {
                        incumbent: slot.get().file_name.clone(),
                        loser: candidate,
                    }
                }
            }
        }
    }

    fn beats(candidate: &Candidate, incumbent: &Candidate) -> bool {
        let (dur, dyn_rank) = candidate.rank();
        let (best_dur, best_dyn) = incumbent.rank();
        dur < best_dur || (dur == best_dur && dyn_rank <= best_dyn)
    }

    pub fn get(&self, note: &NoteName) -> Option<&Candidate> {
        self.best.get(note)
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Winning files, sorted by file name
    pub fn into_survivors(self) -> Vec<Candidate> {
        let mut survivors: Vec<Candidate> = self.best.into_values().collect();
        survivors.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        survivors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sndkit_common::TagMatch;

    fn candidate(file_name: &str, note: &str, duration_rank: usize, dynamic_rank: usize) -> Candidate {
        Candidate {
            file_name: file_name.to_string(),
            note: NoteName::extract(note).unwrap(),
            tags: TagMatch {
                duration: format!("d{}", duration_rank),
                duration_rank,
                dynamic: format!("y{}", dynamic_rank),
                dynamic_rank,
            },
        }
    }

    #[test]
    fn test_first_file_registered() {
        let mut registry = BestFileRegistry::new();
        assert_eq!(registry.offer(candidate("a", "A4", 1, 1)), Selection::Registered);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lower_duration_rank_wins_in_either_order() {
        let mut registry = BestFileRegistry::new();
        registry.offer(candidate("long", "A4", 0, 5));
        let selection = registry.offer(candidate("short", "A4", 1, 0));
        assert!(matches!(selection, Selection::Rejected { ref incumbent, .. } if incumbent == "long"));

        let mut registry = BestFileRegistry::new();
        registry.offer(candidate("short", "A4", 1, 0));
        let selection = registry.offer(candidate("long", "A4", 0, 5));
        assert!(matches!(selection, Selection::Replaced { ref superseded } if superseded.file_name == "short"));

        let note = NoteName::extract("A4").unwrap();
        assert_eq!(registry.get(&note).unwrap().file_name, "long");
    }

    #[test]
    fn test_lower_dynamic_rank_wins_on_equal_duration() {
        let mut registry = BestFileRegistry::new();
        registry.offer(candidate("mezzo", "C5", 1, 1));
        let selection = registry.offer(candidate("piano", "C5", 1, 2));
        assert!(matches!(selection, Selection::Rejected { .. }));

        let mut registry = BestFileRegistry::new();
        registry.offer(candidate("piano", "C5", 1, 2));
        let selection = registry.offer(candidate("mezzo", "C5", 1, 1));
        assert!(matches!(selection, Selection::Replaced { .. }));
    }

    #[test]
    fn test_equal_keys_later_file_wins() {
        let mut registry = BestFileRegistry::new();
        registry.offer(candidate("first", "G3", 2, 2));
        let selection = registry.offer(candidate("second", "G3", 2, 2));
        assert!(matches!(selection, Selection::Replaced { ref superseded } if superseded.file_name == "first"));

        let survivors = registry.into_survivors();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].file_name, "second");
    }

    #[test]
    fn test_notes_are_independent() {
        let mut registry = BestFileRegistry::new();
        registry.offer(candidate("b", "B4", 3, 3));
        assert_eq!(registry.offer(candidate("a", "A4", 0, 0)), Selection::Registered);

        let names: Vec<String> = registry
            .into_survivors()
            .into_iter()
            .map(|c| c.file_name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_running_minimum_over_many_files() {
        let mut registry = BestFileRegistry::new();
        let mut removed = 0;
        for (i, (dur, dyn_rank)) in [(3, 0), (1, 4), (1, 2), (2, 0), (1, 2), (1, 3)].iter().enumerate() {
            match registry.offer(candidate(&format!("f{}", i), "E2", *dur, *dyn_rank)) {
                Selection::Registered => {}
                _ => removed += 1,
            }
        }
        assert_eq!(removed, 5);
        // f4 ties f2 at (1, 2) and arrives later
        assert_eq!(registry.into_survivors()[0].file_name, "f4");
    }
}
