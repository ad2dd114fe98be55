use serde::{Deserialize, Serialize};

/// Meshes found in the loaded scene asset, in traversal order.
/// Sent by the browser once the model has been decoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneManifest {
    pub meshes: Vec<MeshDescriptor>,
}

/// One mesh of the scene asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDescriptor {
    /// Opaque mesh name from the asset (e.g. "Object_8").
    pub name: String,
    /// World-space position baked into the asset.
    #[serde(default)]
    pub position: [f32; 3],
    /// World-space scale baked into the asset.
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Bounding-sphere radius of the mesh geometry, before scaling.
    #[serde(default = "unit_radius")]
    pub bounding_radius: f32,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn unit_radius() -> f32 {
    1.0
}

impl MeshDescriptor {
    /// Distance of the baked position from the origin.
    pub fn world_radius(&self) -> f32 {
        let [x, y, z] = self.position;
        (x * x + y * y + z * z).sqrt()
    }
}

impl SceneManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
