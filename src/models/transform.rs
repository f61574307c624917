use serde::{Deserialize, Serialize};

/// Position in scene space, meters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Orientation, either a quaternion or euler angles depending on what the
/// client's tracking stack reports. Untagged: a quaternion is recognized by
/// the presence of `w`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Rotation {
    Quaternion { x: f32, y: f32, z: f32, w: f32 },
    Euler { x: f32, y: f32, z: f32 },
}

/// Position + optional orientation of one tracked point.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub position: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
}

/// Full avatar pose: head plus optional hand controllers. Hand poses stay
/// absent until the controller reports data. Overwritten wholesale on each
/// update, never merged field by field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub head: Pose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_hand: Option<Pose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_hand: Option<Pose>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            head: Pose {
                position: Vec3::default(),
                rotation: None,
            },
            left_hand: None,
            right_hand: None,
        }
    }
}
