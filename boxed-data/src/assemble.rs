//! Record assembly: turns indexed files into the dataset tree.
//!
//! Assembly runs in two passes. The first pass parses every pick-place
//! descriptor into participants, scenes and objects. The second pass indexes
//! the trajectory files, splits camera trajectories from object
//! trajectories, and attaches both to the scenes built in the first pass.

use crate::dataset::LoadOptions;
use crate::error::DatasetError;
use crate::index::{IndexedFile, SceneId, index_files};
use crate::normalize::canonical_name;
use crate::types::{PackedObject, Participant, Pose, Scene, TimedPose};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Filename marker of per-scene pick-place descriptor files.
pub const PICK_PLACE_MARKER: &str = "PickPlace_dataset";
/// Filename marker shared by object and camera trajectory files.
pub const TRAJECTORY_MARKER: &str = "trajectory";
/// Path marker distinguishing camera trajectory files from object ones.
pub const CAMERA_MARKER: &str = "main_camera_trajectory";

/// One element of a pick-place descriptor file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PickPlaceRecord {
    id: String,
    pick_rotation: [[f32; 3]; 3],
    pick_translation: [f32; 3],
    place_rotation: [[f32; 3]; 3],
    place_translation: [f32; 3],
}

/// One element of a trajectory file (object or camera).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrajectoryRecord {
    rotation: [[f32; 3]; 3],
    translation: [f32; 3],
    time_stamp: i64,
}

/// Open, fully read and close one JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| DatasetError::RecordParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// The unique object ID is the integer value of the raw id's last 4
/// characters.
fn parse_unique_id(raw: &str) -> Option<u32> {
    if raw.len() < 4 {
        return None;
    }
    raw.get(raw.len() - 4..)?.parse().ok()
}

fn build_object(record: PickPlaceRecord, path: &Path) -> Result<PackedObject, DatasetError> {
    let unique_id = parse_unique_id(&record.id).ok_or_else(|| DatasetError::RecordParse {
        path: path.to_path_buf(),
        reason: format!("object id '{}' does not end in 4 digits", record.id),
    })?;

    Ok(PackedObject {
        name: canonical_name(&record.id).to_string(),
        unique_id,
        pick: Pose::from_rows(record.pick_rotation, record.pick_translation),
        place: Pose::from_rows(record.place_rotation, record.place_translation),
        trajectory: Vec::new(),
    })
}

/// Parse one pick-place descriptor into a scene, preserving the file's
/// element order as packing order.
fn load_scene(file: &IndexedFile) -> Result<Scene, DatasetError> {
    let records: Vec<PickPlaceRecord> = read_json(&file.path)?;
    let mut objects = Vec::with_capacity(records.len());
    for record in records {
        objects.push(build_object(record, &file.path)?);
    }

    debug!(
        "participant {} scene {}: {} objects",
        file.id.participant,
        file.id.scene,
        objects.len()
    );
    Ok(Scene {
        number: file.id.scene,
        objects,
        camera_trajectory: Vec::new(),
    })
}

fn load_trajectory(path: &Path) -> Result<Vec<TimedPose>, DatasetError> {
    let records: Vec<TrajectoryRecord> = read_json(path)?;
    // File order is the chronological order; no re-sorting.
    Ok(records
        .into_iter()
        .map(|r| TimedPose {
            pose: Pose::from_rows(r.rotation, r.translation),
            time_ms: r.time_stamp,
        })
        .collect())
}

/// Match each object of `scene` to the first trajectory file whose filename
/// contains the object's canonical name.
///
/// Matched files stay in the candidate pool: when one object's name is a
/// substring of another's, both can resolve to the same file. This mirrors
/// the recording pipeline's matching exactly and must not be tightened.
fn attach_object_trajectories(
    scene: &mut Scene,
    files: &[&IndexedFile],
    participant: u32,
    strict: bool,
) -> Result<(), DatasetError> {
    for object in &mut scene.objects {
        let hit = files.iter().find(|f| {
            f.path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().contains(&object.name))
        });

        match hit {
            Some(file) => object.trajectory = load_trajectory(&file.path)?,
            None if strict => {
                return Err(DatasetError::TrajectoryNotFound {
                    name: object.name.clone(),
                    participant,
                    scene: scene.number,
                });
            }
            None => debug!(
                "no trajectory file for '{}' (participant {}, scene {})",
                object.name, participant, scene.number
            ),
        }
    }
    Ok(())
}

/// Second pass: bucket trajectory files by participant, split out camera
/// files, and attach trajectories to the already-built scenes.
fn attach_trajectories(
    root: &Path,
    participants: &mut [Participant],
    options: &LoadOptions,
) -> Result<(), DatasetError> {
    let trajectories = index_files(root, TRAJECTORY_MARKER, false)?;

    let mut object_files: BTreeMap<u32, Vec<&IndexedFile>> = BTreeMap::new();
    let mut camera_files: BTreeMap<SceneId, &IndexedFile> = BTreeMap::new();
    for file in &trajectories {
        if file.path.to_string_lossy().contains(CAMERA_MARKER) {
            // With duplicate camera files for one scene, the first in index
            // order wins, same as object-trajectory matching.
            camera_files.entry(file.id).or_insert(file);
        } else {
            object_files.entry(file.id.participant).or_default().push(file);
        }
    }

    for participant in participants.iter_mut() {
        let bucket = object_files
            .get(&participant.number)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for scene in &mut participant.scenes {
            let scene_files: Vec<&IndexedFile> = bucket
                .iter()
                .copied()
                .filter(|f| f.id.scene == scene.number)
                .collect();
            attach_object_trajectories(
                scene,
                &scene_files,
                participant.number,
                options.strict_trajectories,
            )?;

            // Camera trajectories can be very large; loading them is opt-in.
            if options.load_camera_trajectories {
                let id = SceneId {
                    participant: participant.number,
                    scene: scene.number,
                };
                let file =
                    camera_files
                        .get(&id)
                        .ok_or_else(|| DatasetError::TrajectoryNotFound {
                            name: CAMERA_MARKER.to_string(),
                            participant: id.participant,
                            scene: id.scene,
                        })?;
                scene.camera_trajectory = load_trajectory(&file.path)?;
            }
        }
    }
    Ok(())
}

/// Build the full participant tree from the files under `root`.
pub(crate) fn assemble(
    root: &Path,
    options: &LoadOptions,
) -> Result<Vec<Participant>, DatasetError> {
    let pick_place = index_files(root, PICK_PLACE_MARKER, false)?;

    // The index is sorted by (participant, scene), so files of one
    // participant form a contiguous run and scenes come out ascending.
    let mut participants = Vec::new();
    for run in pick_place.chunk_by(|a, b| a.id.participant == b.id.participant) {
        let mut scenes = Vec::with_capacity(run.len());
        for file in run {
            scenes.push(load_scene(file)?);
        }
        participants.push(Participant {
            number: run[0].id.participant,
            scenes,
        });
    }

    info!(
        "assembled {} participants from pick-place files",
        participants.len()
    );

    attach_trajectories(root, &mut participants, options)?;
    Ok(participants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_id_is_last_four_characters() {
        assert_eq!(parse_unique_id("011 banana-0042"), Some(42));
        assert_eq!(parse_unique_id("29932"), Some(9932));
        assert_eq!(parse_unique_id("011 banana-00x2"), None);
        assert_eq!(parse_unique_id("abc"), None);
    }

    #[test]
    fn pick_place_record_parses_camel_case_fields() {
        let json = r#"{
            "id": "011 banana(Clone)-0007",
            "pickRotation": [[1,0,0],[0,1,0],[0,0,1]],
            "pickTranslation": [0.5, 0.0, 0.1],
            "placeRotation": [[1,0,0],[0,1,0],[0,0,1]],
            "placeTranslation": [0.0, 0.2, 0.0]
        }"#;
        let record: PickPlaceRecord = serde_json::from_str(json).expect("parse");
        assert_eq!(record.id, "011 banana(Clone)-0007");
        assert_eq!(record.pick_translation, [0.5, 0.0, 0.1]);

        let object = build_object(record, Path::new("scene.json")).expect("object");
        assert_eq!(object.name, "011 banana");
        assert_eq!(object.unique_id, 7);
        assert!(object.trajectory.is_empty());
    }

    #[test]
    fn trajectory_record_parses_time_stamp() {
        let json = r#"[{
            "rotation": [[1,0,0],[0,1,0],[0,0,1]],
            "translation": [1.0, 2.0, 3.0],
            "timeStamp": 1250
        }]"#;
        let records: Vec<TrajectoryRecord> = serde_json::from_str(json).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time_stamp, 1250);
    }

    #[test]
    fn malformed_record_is_rejected() {
        let json = r#"[{ "id": "011 banana-0007" }]"#;
        let err = serde_json::from_str::<Vec<PickPlaceRecord>>(json).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
