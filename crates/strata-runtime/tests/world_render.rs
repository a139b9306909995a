use std::path::PathBuf;

use strata_blocks::MaterialCatalog;
use strata_chunk::ResourceError;
use strata_geom::Mat4;
use strata_render::RecordingBackend;
use strata_runtime::{AssetSource, World, WorldError, WorldOptions};
use strata_world::{RenderMode, TerrainGen, WorldGenParams};

fn assets() -> AssetSource {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
    AssetSource::load(root).unwrap()
}

fn opts(chunks_x: usize, chunks_z: usize, mode: RenderMode, cross: bool) -> WorldOptions {
    WorldOptions {
        chunks_x,
        chunks_z,
        mode,
        cross_chunk_culling: cross,
    }
}

fn terrain(seed: i32) -> TerrainGen {
    TerrainGen::new(seed, WorldGenParams::default())
}

// 16x32x16 solid box minus its 14x30x14 core
const SHELL: usize = 16 * 32 * 16 - 14 * 30 * 14;

#[test]
fn seed_1000_single_chunk_renders() {
    let assets = assets();
    let mut backend = RecordingBackend::new();
    let mut world = World::generate(
        terrain(1000),
        opts(1, 1, RenderMode::PerVoxel, false),
        &assets,
        &mut backend,
    )
    .unwrap();
    assert_eq!(world.chunks().len(), 1);
    assert_eq!(world.chunks()[0].solid_count(), 16 * 32 * 16);

    let stats = world.render_all(&mut backend);
    assert_eq!(stats.chunks, 1);
    assert_eq!(stats.visible_voxels, SHELL);
    assert_eq!(stats.draw_calls, SHELL);
    let first = backend.take_draws();

    world.render_all(&mut backend);
    assert_eq!(backend.take_draws(), first);

    // every draw is a pure translation of the shared cube
    let cube = world.resources().cube().unwrap();
    for d in &first {
        assert_eq!(d.geometry, cube);
        let t = d.model.translation();
        assert_eq!(Mat4::from_translation(t), d.model);
        assert_eq!(t.x % 2.0, 0.0);
    }
    assert_eq!(first[0].model.translation(), strata_geom::Vec3::ZERO);

    world.release(&mut backend);
    assert_eq!(backend.live_geometry() + backend.live_textures(), 0);
    assert_eq!(backend.invalid_releases, 0);
}

#[test]
fn draw_sequence_is_deterministic_across_builds() {
    let assets = assets();
    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut backend = RecordingBackend::new();
        let mut world = World::generate(
            terrain(42),
            opts(2, 3, RenderMode::Batched, false),
            &assets,
            &mut backend,
        )
        .unwrap();
        world.render_all(&mut backend);
        runs.push(backend.take_draws());
        world.release(&mut backend);
    }
    assert!(!runs[0].is_empty());
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn batched_draws_follow_chunk_then_material_order() {
    let assets = assets();
    let mut backend = RecordingBackend::new();
    let mut world = World::generate(
        terrain(1000),
        opts(2, 2, RenderMode::Batched, false),
        &assets,
        &mut backend,
    )
    .unwrap();
    let stats = world.render_all(&mut backend);
    assert_eq!(stats.chunks, 4);
    assert_eq!(stats.visible_voxels, 4 * SHELL);

    let geometry = world.resources().chunk_geometry();
    let coords: Vec<_> = geometry.iter().map(|c| (c.coord.cx, c.coord.cz)).collect();
    assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    for chunk in geometry {
        let mids: Vec<_> = chunk.parts.iter().map(|p| p.material).collect();
        let mut sorted = mids.clone();
        sorted.sort();
        assert_eq!(mids, sorted);
        let faces: usize = chunk.parts.iter().map(|p| p.vertices / 6).sum();
        assert_eq!(faces, 2 * (16 * 32) * 2 + 2 * (16 * 16));
        for part in &chunk.parts {
            assert_eq!(backend.geometry_vertices(part.geometry), Some(part.vertices));
        }
    }
    let draws = backend.take_draws();
    assert_eq!(draws.len(), stats.draw_calls);
    assert!(draws.iter().all(|d| d.model == Mat4::IDENTITY));
    world.release(&mut backend);
}

#[test]
fn cross_chunk_culling_hides_seam_voxels() {
    let assets = assets();
    let mut backend = RecordingBackend::new();
    let mut plain = World::generate(
        terrain(5),
        opts(2, 1, RenderMode::PerVoxel, false),
        &assets,
        &mut backend,
    )
    .unwrap();
    let mut culled = World::generate(
        terrain(5),
        opts(2, 1, RenderMode::PerVoxel, true),
        &assets,
        &mut backend,
    )
    .unwrap();
    let a = plain.render_all(&mut backend);
    let b = culled.render_all(&mut backend);
    assert_eq!(a.visible_voxels, 2 * SHELL);
    // each side of the seam loses its 30x14 interior face
    assert_eq!(a.visible_voxels - b.visible_voxels, 2 * 30 * 14);
    plain.release(&mut backend);
    culled.release(&mut backend);
    assert_eq!(backend.live_geometry() + backend.live_textures(), 0);
}

#[test]
fn texture_failure_releases_every_created_handle() {
    let assets = assets();
    let mut backend = RecordingBackend::new().failing_texture_at(1);
    let err = World::generate(
        terrain(1000),
        opts(2, 2, RenderMode::PerVoxel, false),
        &assets,
        &mut backend,
    )
    .err()
    .unwrap();
    match err {
        WorldError::Generation(e) => {
            assert_eq!((e.coord.cx, e.coord.cz), (0, 0));
            assert!(matches!(e.source, ResourceError::TextureUpload { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.textures_created, 2);
    assert_eq!(backend.textures_released, 1);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.invalid_releases, 0);
}

#[test]
fn geometry_failure_releases_textures_and_earlier_batches() {
    let assets = assets();
    let mut backend = RecordingBackend::new().failing_geometry_at(3);
    let err = World::generate(
        terrain(1000),
        opts(3, 1, RenderMode::Batched, false),
        &assets,
        &mut backend,
    )
    .err()
    .unwrap();
    assert!(matches!(
        err,
        WorldError::Geometry(ResourceError::GeometryUpload { .. })
    ));
    assert_eq!(backend.live_geometry(), 0);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.geometry_released, 3);
    assert_eq!(backend.invalid_releases, 0);
}

#[test]
fn missing_texture_asset_aborts_before_any_upload() {
    let mut catalog = MaterialCatalog::new();
    for key in ["dirt", "grass", "stone", "water"] {
        catalog
            .insert(key, vec![format!("missing/{key}.png").into()])
            .unwrap();
    }
    let assets = AssetSource::new(env!("CARGO_MANIFEST_DIR"), catalog);
    let mut backend = RecordingBackend::new();
    let err = World::generate(terrain(1000), WorldOptions::default(), &assets, &mut backend)
        .err()
        .unwrap();
    let WorldError::Generation(e) = err else {
        panic!("expected a generation error");
    };
    assert!(matches!(e.source, ResourceError::MissingAsset { .. }));
    assert_eq!(backend.textures_created, 0);
}

#[test]
fn release_is_idempotent() {
    let assets = assets();
    let mut backend = RecordingBackend::new();
    let mut world =
        World::generate(terrain(3), WorldOptions::default(), &assets, &mut backend).unwrap();
    let first = world.release(&mut backend);
    assert!(first.geometry > 0 && first.textures > 0);
    assert_eq!(world.release(&mut backend).geometry, 0);
    assert_eq!(backend.invalid_releases, 0);
    assert_eq!(world.render_all(&mut backend).draw_calls, 0);
}
