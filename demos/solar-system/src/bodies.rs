/// Body catalog: which mesh of the scene asset is which body.
///
/// Mesh names come from the decoded model (`Object_4` … `Object_32`).
/// Keys match the data asset (`solarSystem.*` tables use the French
/// spellings "mercure" and "saturne").

use orrery_engine::*;
use glam::Vec3;

/// Mesh of the sun in the scene asset.
pub const SUN_MESH: &str = "Object_20";
/// Any mesh baked closer to the origin than this is the sun too.
pub const SUN_RADIUS_THRESHOLD: f32 = 1.0;
/// Non-sun bodies are tiny in the asset; they are scaled up for readability.
pub const BODY_SCALE: f32 = 12.0;

/// Saturn and its ring turn ten times slower than the other planets, with
/// no index phase.
pub const RINGED_PACING: OrbitPacing = OrbitPacing { base_angular_speed: 0.00002, phased: false };

/// Body name of Saturn's ring (its info key is still "saturne").
pub const RING_NAME: &str = "saturne-ring";

/// One catalog row.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub mesh: &'static str,
    /// Key into the data asset tables.
    pub key: &'static str,
    pub role: OrbitalRole,
    /// Key of the body this one is attached to (moons, rings).
    pub parent: Option<&'static str>,
}

const fn entry(mesh: &'static str, key: &'static str, role: OrbitalRole) -> CatalogEntry {
    CatalogEntry { mesh, key, role, parent: None }
}

pub const CATALOG: [CatalogEntry; 15] = [
    entry("Object_4", "mercure", OrbitalRole::Planet),
    entry("Object_6", "venus", OrbitalRole::Planet),
    entry("Object_8", "earth", OrbitalRole::Planet),
    entry("Object_10", "mars", OrbitalRole::Planet),
    entry("Object_12", "jupiter", OrbitalRole::Planet),
    entry("Object_14", "saturne", OrbitalRole::PlanetWithRing),
    entry("Object_16", "uranus", OrbitalRole::Planet),
    entry("Object_18", "neptune", OrbitalRole::Planet),
    entry(SUN_MESH, "sun", OrbitalRole::Star),
    CatalogEntry { mesh: "Object_22", key: "moon", role: OrbitalRole::Moon, parent: Some("earth") },
    entry("Object_24", "ceres", OrbitalRole::DwarfPlanet),
    entry("Object_26", "eris", OrbitalRole::DwarfPlanet),
    entry("Object_28", "haumea", OrbitalRole::DwarfPlanet),
    entry("Object_30", "makemake", OrbitalRole::DwarfPlanet),
    CatalogEntry { mesh: "Object_32", key: "saturne", role: OrbitalRole::RingOnly, parent: Some("saturne") },
];

/// Catalog row for a mesh name.
pub fn catalog_entry(mesh: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.mesh == mesh)
}

/// Data-asset key shown when a mesh is clicked.
pub fn info_key(mesh: &str) -> Option<&'static str> {
    catalog_entry(mesh).map(|e| e.key)
}

pub fn is_sun(mesh: &MeshDescriptor) -> bool {
    mesh.name == SUN_MESH || mesh.world_radius() < SUN_RADIUS_THRESHOLD
}

/// Build a body from one manifest mesh.
fn body_for(id: BodyId, mesh: &MeshDescriptor) -> CelestialBody {
    let (name, role) = if is_sun(mesh) {
        ("sun", OrbitalRole::Star)
    } else {
        match catalog_entry(&mesh.name) {
            Some(e) if e.role == OrbitalRole::RingOnly => (RING_NAME, e.role),
            Some(e) => (e.key, e.role),
            None => {
                log::warn!("{}: not in the body catalog, animated with fallbacks", mesh.name);
                (mesh.name.as_str(), OrbitalRole::Planet)
            }
        }
    };

    let mut scale = Vec3::from(mesh.scale);
    if role != OrbitalRole::Star {
        scale *= BODY_SCALE;
    }

    let body = CelestialBody::new(id, name, role)
        .with_mesh(mesh.name.as_str())
        .with_position(Vec3::from(mesh.position))
        .with_scale(scale)
        .with_bounding_radius(mesh.bounding_radius * scale.max_element());
    if role == OrbitalRole::PlanetWithRing {
        body.with_pacing(RINGED_PACING)
    } else {
        body
    }
}

/// Replace the registry contents with one body per manifest mesh, in
/// manifest order, then resolve moon and ring parents by key.
/// Returns the number of bodies spawned.
pub fn populate(ctx: &mut EngineContext, manifest: &SceneManifest) -> usize {
    ctx.registry.clear();
    for mesh in &manifest.meshes {
        let id = ctx.next_id();
        ctx.registry.spawn(body_for(id, mesh));
    }

    let links: Vec<(BodyId, &'static str)> = ctx
        .registry
        .iter()
        .filter_map(|b| {
            let mesh = b.mesh.as_deref()?;
            let parent = catalog_entry(mesh)?.parent?;
            Some((b.id, parent))
        })
        .collect();

    for (id, parent_key) in links {
        let parent = ctx
            .registry
            .iter()
            .find(|b| b.name == parent_key && b.role.is_primary())
            .map(|b| b.id);
        match (parent, ctx.registry.get_mut(id)) {
            (Some(parent), Some(body)) => body.parent = Some(parent),
            (None, Some(body)) => {
                log::warn!("{}: parent {} not in scene", body.name, parent_key);
            }
            _ => {}
        }
    }

    let stars = ctx.registry.iter().filter(|b| b.role == OrbitalRole::Star).count();
    if stars != 1 {
        log::warn!("scene has {} stars, expected exactly one", stars);
    }

    ctx.registry.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> SceneManifest {
        SceneManifest::from_json(
            r#"{ "meshes": [
                { "name": "Object_4", "position": [50, 0, 0], "scale": [0.5, 0.5, 0.5] },
                { "name": "Object_8", "position": [100, 0, 0], "scale": [1, 1, 1] },
                { "name": "Object_14", "position": [400, 0, 0], "scale": [2, 2, 2] },
                { "name": "Object_20", "position": [0, 0, 0], "scale": [40, 40, 40] },
                { "name": "Object_22", "position": [110, 0, 0], "scale": [0.3, 0.3, 0.3] },
                { "name": "Object_32", "position": [400, 0, 0], "scale": [2, 2, 2], "bounding_radius": 2.5 }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn populates_in_manifest_order() {
        let mut ctx = EngineContext::new();
        assert_eq!(populate(&mut ctx, &manifest()), 6);

        let names: Vec<_> = ctx.registry.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["mercure", "earth", "saturne", "sun", "moon", RING_NAME]);
        assert_eq!(ctx.registry.star().map(|b| b.mesh.as_deref()), Some(Some(SUN_MESH)));
    }

    #[test]
    fn bodies_are_scaled_except_the_sun() {
        let mut ctx = EngineContext::new();
        populate(&mut ctx, &manifest());

        let earth = ctx.registry.find_by_name("earth").unwrap();
        assert_eq!(earth.transform.scale, Vec3::splat(12.0));
        assert_eq!(earth.bounding_radius, 12.0);

        let sun = ctx.registry.find_by_name("sun").unwrap();
        assert_eq!(sun.transform.scale, Vec3::splat(40.0));

        let ring = ctx.registry.find_by_name(RING_NAME).unwrap();
        assert_eq!(ring.bounding_radius, 2.5 * 24.0);
    }

    #[test]
    fn parents_are_resolved_by_key() {
        let mut ctx = EngineContext::new();
        populate(&mut ctx, &manifest());

        let earth = ctx.registry.find_by_name("earth").unwrap().id;
        let saturn = ctx.registry.find_by_name("saturne").unwrap().id;
        assert_eq!(ctx.registry.find_by_name("moon").unwrap().parent, Some(earth));
        assert_eq!(ctx.registry.find_by_name(RING_NAME).unwrap().parent, Some(saturn));
    }

    #[test]
    fn only_the_ringed_planet_is_slowed() {
        let mut ctx = EngineContext::new();
        populate(&mut ctx, &manifest());
        assert_eq!(ctx.registry.find_by_name("saturne").unwrap().pacing, Some(RINGED_PACING));
        assert_eq!(ctx.registry.find_by_name("earth").unwrap().pacing, None);
        assert_eq!(ctx.registry.find_by_name(RING_NAME).unwrap().pacing, None);
    }

    #[test]
    fn mesh_near_origin_is_the_sun() {
        let manifest = SceneManifest::from_json(
            r#"{ "meshes": [ { "name": "Object_99", "position": [0.2, 0, 0.1] } ] }"#,
        )
        .unwrap();
        let mut ctx = EngineContext::new();
        populate(&mut ctx, &manifest);
        assert_eq!(ctx.registry.at(0).unwrap().role, OrbitalRole::Star);
    }

    #[test]
    fn unknown_mesh_becomes_a_fallback_planet() {
        let manifest = SceneManifest::from_json(
            r#"{ "meshes": [ { "name": "Object_99", "position": [700, 0, 0] } ] }"#,
        )
        .unwrap();
        let mut ctx = EngineContext::new();
        populate(&mut ctx, &manifest);
        let body = ctx.registry.at(0).unwrap();
        assert_eq!(body.name, "Object_99");
        assert_eq!(body.role, OrbitalRole::Planet);
    }

    #[test]
    fn ring_click_shows_saturn() {
        assert_eq!(info_key("Object_32"), Some("saturne"));
        assert_eq!(info_key("Object_22"), Some("moon"));
        assert_eq!(info_key("Object_1"), None);
    }
}
