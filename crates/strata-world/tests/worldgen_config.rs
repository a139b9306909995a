use strata_world::{ConfigError, RenderMode, WorldGenConfig, WorldGenParams};

#[test]
fn empty_file_uses_defaults() {
    let cfg = WorldGenConfig::from_toml_str("").unwrap();
    assert_eq!(cfg.world.seed, 1000);
    assert_eq!((cfg.world.chunks_x, cfg.world.chunks_z), (1, 1));
    assert_eq!(cfg.render.mode, RenderMode::Batched);
    assert!(!cfg.render.cross_chunk_culling);

    let p = WorldGenParams::from_config(&cfg);
    assert_eq!(p.chunk_width, 16);
    assert_eq!(p.chunk_height, 32);
    assert_eq!(p.water_level, 20);
    assert_eq!(p.subsurface_depth, 4);
    assert_eq!(p.horizontal_scale, 20.0);
    assert_eq!(p.layers.surface, "grass");
    assert_eq!(p.layers.rock, "stone");
}

#[test]
fn partial_sections_override_only_named_fields() {
    let cfg = WorldGenConfig::from_toml_str(
        r#"
        [world]
        seed = 7
        chunks_x = 3

        [water]
        level = 12

        [render]
        mode = "per_voxel"
        cross_chunk_culling = true
        "#,
    )
    .unwrap();
    assert_eq!(cfg.world.seed, 7);
    assert_eq!(cfg.world.chunks_x, 3);
    assert_eq!(cfg.world.chunks_z, 1);
    assert_eq!(cfg.water.level, 12);
    assert_eq!(cfg.render.mode, RenderMode::PerVoxel);
    assert!(cfg.render.cross_chunk_culling);
}

#[test]
fn zero_sized_world_is_rejected() {
    let err = WorldGenConfig::from_toml_str("[world]\nchunks_z = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn non_positive_scale_is_rejected() {
    let err = WorldGenConfig::from_toml_str("[height]\nscale = 0.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = WorldGenConfig::from_toml_str("[world\nseed = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_reports_path() {
    let path = std::path::Path::new("/definitely/not/here/worldgen.toml");
    let err = WorldGenConfig::from_path(path).unwrap_err();
    match err {
        ConfigError::Read { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error {other:?}"),
    }
}
