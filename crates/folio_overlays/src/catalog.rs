//! Overlay kinds and what each one shows and plays.

use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every overlay the shell can put on screen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverlayKind {
    /// Halloween celebration card.
    Halloween,
    /// Christmas celebration card.
    Christmas,
    /// Diwali celebration card.
    Diwali,
    /// Hidden celebration unlocked by the cheat code.
    CheatCode,
    /// The tic-tac-toe game modal.
    TicTacToe,
}

/// A looping background track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct AudioCue {
    /// Track identifier understood by the audio sink.
    #[new(into)]
    pub track: String,
    /// Initial volume, 0.0 to 1.0.
    pub volume: f32,
}

/// Content for one overlay kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, new)]
pub struct OverlaySpec {
    /// Flavor text; one entry is drawn per activation.
    #[serde(default)]
    pub messages: Vec<String>,
    /// Track started while the overlay is open.
    #[serde(default)]
    pub audio: Option<AudioCue>,
}

impl OverlaySpec {
    /// Draws one message uniformly at random, or `None` for an empty pool.
    pub fn pick_message<R: Rng>(&self, rng: &mut R) -> Option<String> {
        if self.messages.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.messages.len());
        self.messages.get(index).cloned()
    }
}

/// Overlay content keyed by kind. Kinds without an entry open with no
/// message and no audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayCatalog {
    entries: HashMap<OverlayKind, OverlaySpec>,
}

impl OverlayCatalog {
    /// A catalog with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock messages and tracks.
    pub fn builtin() -> Self {
        let pool = |messages: &[&str]| -> Vec<String> {
            messages.iter().map(|m| (*m).to_string()).collect()
        };

        Self::empty()
            .with(
                OverlayKind::Halloween,
                OverlaySpec::new(
                    pool(&[
                        "💀 QUEST UNLOCKED: Shadow Realm Entry 💀",
                        "You gained +66 Spookiness XP! 🎃",
                        "Monster defeated! 🍬 Loot: Candy + Courage!",
                        "Beware... The full moon watches you 🌕✨",
                        "New title earned: The Fearless Coder 🧙",
                    ]),
                    None,
                ),
            )
            .with(
                OverlayKind::Christmas,
                OverlaySpec::new(
                    pool(&[
                        "🎁 QUEST COMPLETED: Gift of Productivity Unlocked!",
                        "You gained +100 Holiday Spirit XP! ✨",
                        "Santa approves your code! 🎅💻",
                        "New title unlocked: The Jolly Developer ❄️",
                        "Bonus reward: +1 Hot Chocolate & +5 Motivation ☕",
                    ]),
                    None,
                ),
            )
            .with(
                OverlayKind::Diwali,
                OverlaySpec::new(
                    pool(&[
                        "✨ QUEST COMPLETE: Light Victory! ✨",
                        "You unlocked +100 Happiness XP! 💥",
                        "Darkness defeated! 🌟 Keep shining, Player 1!",
                        "Loot Collected: Laughter, Sparkles, Joy! 🎁",
                    ]),
                    None,
                ),
            )
            .with(
                OverlayKind::CheatCode,
                OverlaySpec::new(Vec::new(), Some(AudioCue::new("cheat_code_theme", 0.5))),
            )
            .with(
                OverlayKind::TicTacToe,
                OverlaySpec::new(Vec::new(), Some(AudioCue::new("halloween_bg_music", 0.3))),
            )
    }

    /// Sets the content for `kind`, replacing any previous entry.
    pub fn with(mut self, kind: OverlayKind, spec: OverlaySpec) -> Self {
        self.insert(kind, spec);
        self
    }

    /// Sets the content for `kind`, returning the previous entry.
    pub fn insert(&mut self, kind: OverlayKind, spec: OverlaySpec) -> Option<OverlaySpec> {
        self.entries.insert(kind, spec)
    }

    /// Content for `kind`.
    pub fn get(&self, kind: OverlayKind) -> Option<&OverlaySpec> {
        self.entries.get(&kind)
    }

    /// Overwrites entries with those from `other`.
    pub fn merge(mut self, other: OverlayCatalog) -> Self {
        self.entries.extend(other.entries);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_builtin_pools() {
        let catalog = OverlayCatalog::builtin();
        let len = |kind| catalog.get(kind).map(|s| s.messages.len());
        assert_eq!(len(OverlayKind::Halloween), Some(5));
        assert_eq!(len(OverlayKind::Christmas), Some(5));
        assert_eq!(len(OverlayKind::Diwali), Some(4));
        assert_eq!(
            catalog
                .get(OverlayKind::CheatCode)
                .and_then(|s| s.audio.as_ref())
                .map(|a| a.volume),
            Some(0.5)
        );
        assert!(OverlayKind::iter().all(|kind| catalog.get(kind).is_some()));
    }

    #[test]
    fn test_pick_covers_whole_pool() {
        let spec = OverlaySpec::new(vec!["a".into(), "b".into(), "c".into()], None);
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<String> = (0..200).filter_map(|_| spec.pick_message(&mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_empty_pool_has_no_message() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(OverlaySpec::default().pick_message(&mut rng), None);
    }

    #[test]
    fn test_kind_names_are_snake_case() {
        assert_eq!(OverlayKind::CheatCode.to_string(), "cheat_code");
        assert_eq!(OverlayKind::from_str("tic_tac_toe"), Ok(OverlayKind::TicTacToe));
    }

    #[test]
    fn test_merge_overrides_entries() {
        let custom = OverlayCatalog::empty().with(
            OverlayKind::Diwali,
            OverlaySpec::new(vec!["only".into()], None),
        );
        let merged = OverlayCatalog::builtin().merge(custom);
        assert_eq!(
            merged.get(OverlayKind::Diwali).map(|s| s.messages.clone()),
            Some(vec!["only".to_string()])
        );
        assert!(merged.get(OverlayKind::Halloween).is_some());
    }
}
