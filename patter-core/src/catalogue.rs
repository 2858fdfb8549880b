//! The move catalogue: ready-made motions discovered on disk.
//!
//! Motion files (`.qianim`, the Pepper animation format) live in a data
//! directory, one subdirectory per group. The scan turns each file into a
//! [`MoveAction`] whose name is the file stem and whose group is the parent
//! directory name. Session assembly overlays catalogue entries onto authored
//! move placeholders by name (see [`crate::session`]); the web layer lists
//! the catalogue by group.

use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::action::MoveAction;
use crate::error::Result;
use crate::types::ActionId;

/// File extension of a motion definition.
const MOTION_EXT: &str = "qianim";

/// A flat, name-addressable catalogue of pre-scanned moves.
#[derive(Debug, Clone, Default)]
pub struct MoveCatalogue {
    moves: Vec<MoveAction>,
}

impl MoveCatalogue {
    /// Scan `data_dir` recursively for motion files.
    ///
    /// Entries are sorted by path so the catalogue order is stable across
    /// scans. Unreadable directory entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatterError::Io`] when `data_dir` is not a readable
    /// directory.
    pub fn scan(data_dir: &Path) -> Result<Self> {
        // Surface a missing data directory instead of scanning into nothing.
        std::fs::read_dir(data_dir)?;

        let mut moves = Vec::new();

        for entry in WalkDir::new(data_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(MOTION_EXT)
            {
                continue;
            }

            // Parent folder is the motion group, file stem the motion name.
            let group = path
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = path
                .file_stem()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            moves.push(MoveAction {
                id: ActionId::new(),
                name,
                file_path: Some(path.to_path_buf()),
                delay: std::time::Duration::ZERO,
                group,
            });
        }

        info!(dir = %data_dir.display(), moves = moves.len(), "move catalogue scanned");
        Ok(Self { moves })
    }

    /// Build a catalogue from already-discovered moves, e.g. a different
    /// scanner implementation or a test fixture.
    #[must_use]
    pub fn from_moves(moves: Vec<MoveAction>) -> Self {
        Self { moves }
    }

    /// Look up a move by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MoveAction> {
        self.moves.iter().find(|m| m.name == name)
    }

    /// All distinct group labels, sorted.
    #[must_use]
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.moves.iter().map(|m| m.group.clone()).collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Iterate over the catalogue in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &MoveAction> {
        self.moves.iter()
    }

    /// Number of catalogued moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn seed_motion(dir: &Path, group: &str, name: &str) {
        let group_dir = dir.join(group);
        fs::create_dir_all(&group_dir).expect("mkdir");
        fs::write(group_dir.join(format!("{name}.{MOTION_EXT}")), b"<motion/>").expect("write");
    }

    #[test]
    fn scan_discovers_motions_with_group_and_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_motion(dir.path(), "greetings", "hello_a010");
        seed_motion(dir.path(), "questions", "question_right_hand_a001");
        // Non-motion files are ignored.
        fs::write(dir.path().join("notes.txt"), b"ignore me").expect("write");

        let catalogue = MoveCatalogue::scan(dir.path()).expect("scan");
        assert_eq!(catalogue.len(), 2);

        let hello = catalogue.get("hello_a010").expect("hello_a010");
        assert_eq!(hello.group, "greetings");
        assert!(!hello.id.is_nil());
        assert!(
            hello
                .file_path
                .as_ref()
                .is_some_and(|p| p.ends_with("greetings/hello_a010.qianim"))
        );
    }

    #[test]
    fn groups_are_sorted_and_distinct() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_motion(dir.path(), "questions", "q1");
        seed_motion(dir.path(), "greetings", "hello");
        seed_motion(dir.path(), "greetings", "wave");

        let catalogue = MoveCatalogue::scan(dir.path()).expect("scan");
        assert_eq!(catalogue.groups(), vec!["greetings", "questions"]);
    }

    #[test]
    fn unknown_name_is_none() {
        let catalogue = MoveCatalogue::from_moves(Vec::new());
        assert!(catalogue.get("missing").is_none());
        assert!(catalogue.is_empty());
    }
}
