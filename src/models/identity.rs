use serde::{Deserialize, Serialize};

/// User identity as handed over by the platform's auth layer. The hub treats
/// it as opaque display data attached to a connection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: String,
}
