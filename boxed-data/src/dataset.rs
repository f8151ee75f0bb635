//! The assembled dataset and its query helpers.

use crate::assemble::assemble;
use crate::catalog::{ObjectCatalog, START_TOKEN};
use crate::error::DatasetError;
use crate::types::{PackedObject, Participant, Pose};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Knobs for [`Dataset::load`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Load per-scene camera trajectories. They are large, so this is off by
    /// default.
    pub load_camera_trajectories: bool,
    /// Error out when an object has no matching trajectory file instead of
    /// leaving its trajectory empty.
    pub strict_trajectories: bool,
}

/// Which grasp pose a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraspKind {
    Pick,
    Place,
}

impl FromStr for GraspKind {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pick" => Ok(Self::Pick),
            "place" => Ok(Self::Place),
            other => Err(DatasetError::InvalidObjectName(format!(
                "grasp kind must be 'pick' or 'place', got '{other}'"
            ))),
        }
    }
}

/// Target objects for a grasp-pose query.
#[derive(Debug, Clone)]
pub enum ObjectSelection {
    /// Every object in the catalog.
    All,
    /// A specific set of names, validated against the catalog.
    Named(Vec<String>),
}

impl ObjectSelection {
    /// Select a single object by name.
    pub fn one(name: impl Into<String>) -> Self {
        Self::Named(vec![name.into()])
    }
}

/// The assembled dataset: every participant, their scenes and objects.
///
/// Built once by [`Dataset::load`] and read-only afterwards. Queries are
/// thin projections over the tree; none of them mutate it.
#[derive(Debug)]
pub struct Dataset {
    root: PathBuf,
    options: LoadOptions,
    catalog: ObjectCatalog,
    participants: Vec<Participant>,
}

impl Dataset {
    /// Read and assemble the whole dataset from `root`.
    ///
    /// Walks the tree twice (pick-place descriptors, then trajectory files)
    /// and builds the participant/scene/object tree. Any assembly failure
    /// aborts the load; a partial dataset is never returned.
    pub fn load(root: impl AsRef<Path>, options: LoadOptions) -> Result<Self, DatasetError> {
        Self::load_with_catalog(root, options, ObjectCatalog::default())
    }

    /// Like [`Dataset::load`], with an explicit object catalog.
    pub fn load_with_catalog(
        root: impl AsRef<Path>,
        options: LoadOptions,
        catalog: ObjectCatalog,
    ) -> Result<Self, DatasetError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DatasetError::InvalidRoot(root.to_path_buf()));
        }

        let participants = assemble(root, &options)?;
        info!(
            "loaded {} participants from {}",
            participants.len(),
            root.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            options,
            catalog,
            participants,
        })
    }

    /// Root folder the dataset was loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Options the dataset was loaded with.
    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// The object catalog used for query validation.
    pub fn catalog(&self) -> &ObjectCatalog {
        &self.catalog
    }

    /// All participants, ascending by participant number.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// The ordered sequences in which objects were packed into the box, one
    /// per scene, in participant/scene order.
    ///
    /// With `unique_objs_only`, only first scenes of participants at or
    /// above the catalog's unique-objects threshold are returned (those are
    /// the scenes guaranteed to contain no repeated objects). With
    /// `prepend_start_token`, every sequence starts with [`START_TOKEN`].
    pub fn sequences(&self, unique_objs_only: bool, prepend_start_token: bool) -> Vec<Vec<String>> {
        let mut sequences = Vec::new();
        for participant in &self.participants {
            if unique_objs_only && participant.number < self.catalog.unique_objects_threshold {
                continue;
            }
            for scene in &participant.scenes {
                if unique_objs_only && scene.number >= 2 {
                    continue;
                }
                let mut sequence = Vec::with_capacity(scene.objects.len() + 1);
                if prepend_start_token {
                    sequence.push(START_TOKEN.to_string());
                }
                sequence.extend(scene.objects.iter().map(|o| o.name.clone()));
                sequences.push(sequence);
            }
        }
        sequences
    }

    /// Duration of every box-packing in milliseconds, in participant/scene
    /// order: last timestamp of the last packed object minus first timestamp
    /// of the first.
    pub fn scene_durations(&self) -> Result<Vec<i64>, DatasetError> {
        let empty = |object: &PackedObject, participant: u32, scene: u32| {
            DatasetError::EmptyTrajectory {
                name: object.name.clone(),
                participant,
                scene,
            }
        };

        let mut durations = Vec::new();
        for participant in &self.participants {
            for scene in &participant.scenes {
                let (Some(first), Some(last)) = (scene.objects.first(), scene.objects.last())
                else {
                    return Err(DatasetError::EmptyTrajectory {
                        name: "<no objects>".to_string(),
                        participant: participant.number,
                        scene: scene.number,
                    });
                };
                let start = first
                    .trajectory
                    .first()
                    .ok_or_else(|| empty(first, participant.number, scene.number))?;
                let end = last
                    .trajectory
                    .last()
                    .ok_or_else(|| empty(last, participant.number, scene.number))?;
                durations.push(end.time_ms - start.time_ms);
            }
        }
        Ok(durations)
    }

    /// All grasp poses for the selected objects.
    ///
    /// Scans every object in participant/scene/packing order and appends the
    /// pick or place pose to its name's list in that traversal order. Every
    /// selected name must be in the catalog.
    pub fn grasp_poses(
        &self,
        kind: GraspKind,
        selection: &ObjectSelection,
    ) -> Result<BTreeMap<String, Vec<Pose>>, DatasetError> {
        let targets: Vec<&str> = match selection {
            ObjectSelection::All => self.catalog.names().iter().map(String::as_str).collect(),
            ObjectSelection::Named(names) => {
                for name in names {
                    if !self.catalog.contains(name) {
                        return Err(DatasetError::InvalidObjectName(name.clone()));
                    }
                }
                names.iter().map(String::as_str).collect()
            }
        };

        let mut poses: BTreeMap<String, Vec<Pose>> = BTreeMap::new();
        for participant in &self.participants {
            for scene in &participant.scenes {
                for object in &scene.objects {
                    if targets.iter().any(|t| *t == object.name) {
                        let pose = match kind {
                            GraspKind::Pick => object.pick,
                            GraspKind::Place => object.place,
                        };
                        poses.entry(object.name.clone()).or_default().push(pose);
                    }
                }
            }
        }
        Ok(poses)
    }
}
