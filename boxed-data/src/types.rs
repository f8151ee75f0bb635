//! Core data types for the assembled dataset tree.
//!
//! These are plain owned values: the dataset exclusively owns its
//! participants, a participant its scenes, a scene its objects, and an
//! object its poses and trajectory. The tree is built once during load and
//! read-only afterwards.

use glam::{Mat3, Vec3};

/// A 6-DoF pose: 3x3 rotation matrix plus translation vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Rotation in world space.
    pub rotation: Mat3,
    /// Translation in world space.
    pub translation: Vec3,
}

impl Pose {
    /// Create a pose from raw parts.
    pub fn new(rotation: Mat3, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Build a pose from the dataset's row-major 3x3 rotation array and
    /// translation triple.
    pub fn from_rows(rotation: [[f32; 3]; 3], translation: [f32; 3]) -> Self {
        Self {
            // from_cols_array_2d reads the outer arrays as columns; the
            // dataset stores rows.
            rotation: Mat3::from_cols_array_2d(&rotation).transpose(),
            translation: Vec3::from_array(translation),
        }
    }
}

/// A pose stamped on the scene-local master clock.
///
/// Timestamps are in milliseconds and start at 0 at scene start; object and
/// camera trajectories within one scene share the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPose {
    pub pose: Pose,
    /// Milliseconds since scene start.
    pub time_ms: i64,
}

impl TimedPose {
    /// Create a timed pose from raw parts.
    pub fn new(pose: Pose, time_ms: i64) -> Self {
        Self { pose, time_ms }
    }
}

/// One object packed during a scene.
#[derive(Debug, Clone)]
pub struct PackedObject {
    /// Canonical name (clone markers and instance IDs stripped).
    pub name: String,
    /// Unique object ID, parsed from the last 4 characters of the raw name.
    pub unique_id: u32,
    /// Grasp pose at pick-up.
    pub pick: Pose,
    /// Placement pose inside the box.
    pub place: Pose,
    /// Chronological motion samples; empty when no trajectory file matched.
    pub trajectory: Vec<TimedPose>,
}

/// A scene: the set of objects one participant packed into the box, in
/// packing order (source-file order, which is the temporal pick order).
#[derive(Debug, Clone)]
pub struct Scene {
    pub number: u32,
    pub objects: Vec<PackedObject>,
    /// Head-camera samples; empty unless camera loading was requested.
    pub camera_trajectory: Vec<TimedPose>,
}

/// All scenes recorded for one participant, ascending by scene number.
#[derive(Debug, Clone)]
pub struct Participant {
    pub number: u32,
    pub scenes: Vec<Scene>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_preserves_row_major_layout() {
        let pose = Pose::from_rows(
            [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
            [0.1, 0.2, 0.3],
        );
        // Multiplying by a basis vector selects a column of the row-major
        // matrix.
        assert_eq!(pose.rotation * Vec3::X, Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(pose.rotation * Vec3::Y, Vec3::new(2.0, 5.0, 8.0));
        assert_eq!(pose.translation, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn identity_rotation_round_trips() {
        let pose = Pose::from_rows(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [0.0, 0.0, 0.0],
        );
        assert_eq!(pose.rotation, Mat3::IDENTITY);
    }
}
