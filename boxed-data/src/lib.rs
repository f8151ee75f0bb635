//! BoxED Data Crate
//!
//! Loader and query helpers for the "Box packing with Everyday items
//! Dataset" (BoxED): per-scene JSON files holding the pick and place poses
//! and motion trajectories of objects that participants packed into a box.
//!
//! ## Modules
//!
//! - [`index`]: directory walking and participant/scene identity recovery
//! - [`normalize`]: raw object-name cleanup
//! - [`assemble`]: JSON record parsing and dataset-tree assembly
//! - [`dataset`]: the assembled [`Dataset`] and its query helpers
//! - [`catalog`]: the fixed object-name catalog and dataset constants

pub mod assemble;
pub mod catalog;
pub mod dataset;
pub mod error;
pub mod index;
pub mod normalize;
pub mod types;

pub use catalog::{ALL_OBJECT_NAMES, ObjectCatalog, START_TOKEN, UNIQUE_OBJECTS_THRESHOLD};
pub use dataset::{Dataset, GraspKind, LoadOptions, ObjectSelection};
pub use error::DatasetError;
pub use index::{IndexedFile, SceneId, index_files};
pub use normalize::canonical_name;
pub use types::{PackedObject, Participant, Pose, Scene, TimedPose};
