use serde::Serialize;

use crate::destination::DestinationRecord;

/// Completion counters derived from a collection snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Records marked completed.
    pub completed: usize,
    /// All records.
    pub total: usize,
    /// `100 * completed / total`, or 0 for an empty collection.
    pub percentage: f64,
}

impl Progress {
    pub fn of(records: &[DestinationRecord]) -> Self {
        let completed = records.iter().filter(|r| r.completed).count();
        let total = records.len();
        let percentage = if total == 0 {
            0.0
        } else {
            (100.0 * completed as f64 / total as f64).clamp(0.0, 100.0)
        };
        Self {
            completed,
            total,
            percentage,
        }
    }

    pub fn is_all_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// Percentage rounded for display, e.g. `"67% Complete"`.
    pub fn label(&self) -> String {
        format!("{:.0}% Complete", self.percentage)
    }
}

/// Badge unlocked by completing destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Achievement {
    /// At least one completion.
    Explorer,
    /// At least five completions.
    Adventurer,
    /// At least ten completions.
    Globetrotter,
    /// Every destination completed.
    DreamAchiever,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::Explorer,
        Achievement::Adventurer,
        Achievement::Globetrotter,
        Achievement::DreamAchiever,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Achievement::Explorer => "Explorer",
            Achievement::Adventurer => "Adventurer",
            Achievement::Globetrotter => "Globetrotter",
            Achievement::DreamAchiever => "Dream Achiever",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Achievement::Explorer => "🎯",
            Achievement::Adventurer => "🏃‍♂️",
            Achievement::Globetrotter => "🌍",
            Achievement::DreamAchiever => "🏆",
        }
    }

    pub fn is_unlocked(self, progress: &Progress) -> bool {
        match self {
            Achievement::Explorer => progress.completed >= 1,
            Achievement::Adventurer => progress.completed >= 5,
            Achievement::Globetrotter => progress.completed >= 10,
            Achievement::DreamAchiever => progress.is_all_done(),
        }
    }
}

/// Unlocked tiers in ascending order.
pub fn achievements(progress: &Progress) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| a.is_unlocked(progress))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::DestinationId;

    fn rec(n: usize, completed: bool) -> DestinationRecord {
        DestinationRecord {
            id: DestinationId::from(format!("d{n}")),
            lat: 0.0,
            lng: 0.0,
            title: String::new(),
            description: String::new(),
            emoji: "📍".to_string(),
            completed,
            date_added: Utc::now(),
        }
    }

    fn list(done: usize, open: usize) -> Vec<DestinationRecord> {
        (0..done)
            .map(|n| rec(n, true))
            .chain((done..done + open).map(|n| rec(n, false)))
            .collect()
    }

    #[test]
    fn empty_collection_is_zero_percent() {
        let p = Progress::of(&[]);
        assert_eq!((p.completed, p.total), (0, 0));
        assert_eq!(p.percentage, 0.0);
        assert!(achievements(&p).is_empty());
    }

    #[test]
    fn percentage_follows_ratio() {
        let p = Progress::of(&list(1, 2));
        assert!((p.percentage - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(p.label(), "33% Complete");
    }

    #[test]
    fn tiers_unlock_at_thresholds() {
        assert_eq!(achievements(&Progress::of(&list(1, 1))), vec![Achievement::Explorer]);
        assert_eq!(
            achievements(&Progress::of(&list(5, 1))),
            vec![Achievement::Explorer, Achievement::Adventurer]
        );
        assert_eq!(
            achievements(&Progress::of(&list(10, 0))),
            Achievement::ALL.to_vec()
        );
    }

    #[test]
    fn dream_achiever_needs_everything_done() {
        assert_eq!(
            achievements(&Progress::of(&list(1, 0))),
            vec![Achievement::Explorer, Achievement::DreamAchiever]
        );
        assert!(!achievements(&Progress::of(&list(4, 1))).contains(&Achievement::DreamAchiever));
    }
}
