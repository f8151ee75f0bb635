//! Directory indexing for dataset files.
//!
//! Dataset files are located by a filename substring and identified by the
//! participant and scene numbers encoded in their directory path (e.g.
//! `participant_3/scene_07/...`). Filesystem enumeration order is not
//! deterministic, so the index is explicitly sorted by identity before it is
//! returned; that sort is the only ordering guarantee consumers may rely on.

use crate::catalog::UNIQUE_OBJECTS_THRESHOLD;
use crate::error::DatasetError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Participant and scene numbers recovered from a file's directory path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId {
    pub participant: u32,
    pub scene: u32,
}

/// A dataset file together with the identity extracted from its path.
#[derive(Debug, Clone)]
pub struct IndexedFile {
    pub id: SceneId,
    pub path: PathBuf,
}

/// Recover a [`SceneId`] from a directory path: the first maximal digit run
/// is the participant number, the second the scene number.
fn scene_id_from_dir(dir: &Path) -> Option<SceneId> {
    let text = dir.to_string_lossy();
    let mut runs = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty());

    let participant = runs.next()?.parse().ok()?;
    let scene = runs.next()?.parse().ok()?;
    Some(SceneId { participant, scene })
}

/// Find every file under `root` whose filename contains `target` (case
/// sensitive), paired with the identity taken from its directory path
/// relative to `root`.
///
/// With `unique_only`, only first scenes of participants at or above
/// [`UNIQUE_OBJECTS_THRESHOLD`] are kept (earlier participants packed
/// repeated objects in their first scene).
///
/// The result is stably sorted ascending by (participant, scene); ties keep
/// discovery order.
pub fn index_files(
    root: &Path,
    target: &str,
    unique_only: bool,
) -> Result<Vec<IndexedFile>, DatasetError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().contains(target) {
            continue;
        }

        // Identity comes from the directory structure beneath the root, not
        // from the filename and not from wherever the root itself happens to
        // live.
        let id = entry
            .path()
            .parent()
            .and_then(|dir| dir.strip_prefix(root).ok())
            .and_then(scene_id_from_dir)
            .ok_or_else(|| DatasetError::MalformedPath(entry.path().to_path_buf()))?;

        if unique_only && (id.scene != 1 || id.participant < UNIQUE_OBJECTS_THRESHOLD) {
            continue;
        }

        entries.push(IndexedFile {
            id,
            path: entry.into_path(),
        });
    }

    // Stable sort: removes filesystem enumeration order, keeps discovery
    // order for identical identities.
    entries.sort_by_key(|file| file.id);

    debug!(
        "indexed {} files matching '{}' under {}",
        entries.len(),
        target,
        root.display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, b"[]").expect("write");
    }

    #[test]
    fn scene_id_takes_first_two_digit_runs() {
        let id = scene_id_from_dir(Path::new("participant_12/scene_3/extra_99")).expect("id");
        assert_eq!(
            id,
            SceneId {
                participant: 12,
                scene: 3
            }
        );
    }

    #[test]
    fn scene_id_requires_two_runs() {
        assert!(scene_id_from_dir(Path::new("participant_12")).is_none());
        assert!(scene_id_from_dir(Path::new("no digits here")).is_none());
    }

    #[test]
    fn index_sorts_by_participant_then_scene() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        touch(&root.join("participant_10/scene_2/PickPlace_dataset.json"));
        touch(&root.join("participant_2/scene_1/PickPlace_dataset.json"));
        touch(&root.join("participant_10/scene_1/PickPlace_dataset.json"));
        touch(&root.join("participant_2/scene_1/other.txt"));

        let files = index_files(root, "PickPlace_dataset", false).expect("index");
        let ids: Vec<(u32, u32)> = files
            .iter()
            .map(|f| (f.id.participant, f.id.scene))
            .collect();
        assert_eq!(ids, vec![(2, 1), (10, 1), (10, 2)]);
    }

    #[test]
    fn unique_only_keeps_first_scenes_above_threshold() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        for participant in [25, 26, 27] {
            for scene in [1, 2] {
                touch(&root.join(format!(
                    "participant_{participant}/scene_{scene}/PickPlace_dataset.json"
                )));
            }
        }

        let files = index_files(root, "PickPlace_dataset", true).expect("index");
        let ids: Vec<(u32, u32)> = files
            .iter()
            .map(|f| (f.id.participant, f.id.scene))
            .collect();
        assert_eq!(ids, vec![(26, 1), (27, 1)]);
    }

    #[test]
    fn path_without_identity_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        touch(&root.join("misplaced/PickPlace_dataset.json"));

        let err = index_files(root, "PickPlace_dataset", false).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedPath(_)));
    }
}
