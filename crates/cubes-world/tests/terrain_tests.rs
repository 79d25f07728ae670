use cubes_blocks::AtlasConfig;
use cubes_geom::IVec3;
use cubes_world::{
    BlockTypePolicy, ConfigError, FlatHeight, HeightNoise, NoiseHeight, TerrainConfig,
    TerrainGenerator, TerrainMode, WorldConfig,
};

fn small_config() -> WorldConfig {
    let mut cfg = WorldConfig::default();
    cfg.chunk.width = 4;
    cfg.chunk.height = 4;
    cfg.chunk.depth = 4;
    cfg.chunk.count = 2;
    cfg
}

#[test]
fn constant_half_height_splits_two_by_two_by_one() {
    let tg = TerrainGenerator::new((2, 2, 1), 3, Box::new(FlatHeight(0.5)));
    let grid = tg.generate();
    for x in 0..2 {
        // y_norm = 0 is below 0.5; y_norm = 0.5 is not strictly below it
        assert!(grid.is_visible(IVec3::new(x, 0, 0)));
        assert!(!grid.is_visible(IVec3::new(x, 1, 0)));
        assert!(grid.is_solid(IVec3::new(x, 0, 0)));
        assert!(grid.is_solid(IVec3::new(x, 1, 0)));
    }
}

#[test]
fn every_cell_is_solid() {
    let grid = TerrainGenerator::from_config(&small_config())
        .unwrap()
        .generate();
    assert!(grid.blocks().iter().all(|b| b.solid));
    assert_eq!(grid.dims(), (8, 8, 8));
}

#[test]
fn noise_height_is_deterministic() {
    let params = TerrainConfig::default();
    let a = NoiseHeight::new(&params);
    let b = NoiseHeight::new(&params);
    for i in 0..32 {
        let (x, z) = (i as f32 / 32.0, (31 - i) as f32 / 32.0);
        let h = a.height(x, z);
        assert_eq!(h, a.height(x, z));
        assert_eq!(h, b.height(x, z));
        assert!((0.0..=1.0).contains(&h));
    }
}

#[test]
fn generation_is_repeatable() {
    let cfg = small_config();
    let first = TerrainGenerator::from_config(&cfg).unwrap().generate();
    let second = TerrainGenerator::from_config(&cfg).unwrap().generate();
    assert_eq!(first, second);

    let mut layered = cfg.clone();
    layered.terrain.block_types = BlockTypePolicy::Layered;
    let a = TerrainGenerator::from_config(&layered).unwrap().generate();
    let b = TerrainGenerator::from_config(&layered).unwrap().generate();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_change_the_surface() {
    let mut a = small_config();
    a.chunk.count = 4;
    let mut b = a.clone();
    b.terrain.seed = a.terrain.seed.wrapping_add(1);
    let ga = TerrainGenerator::from_config(&a).unwrap().generate();
    let gb = TerrainGenerator::from_config(&b).unwrap().generate();
    assert_ne!(ga, gb);
}

#[test]
fn flat_mode_uses_flat_level() {
    let mut cfg = small_config();
    cfg.terrain.mode = TerrainMode::Flat;
    cfg.terrain.flat_level = 0.25;
    let grid = TerrainGenerator::from_config(&cfg).unwrap().generate();
    // height 8: y in {0, 1} are below 0.25
    assert_eq!(grid.visible_count(), 8 * 8 * 2);
}

#[test]
fn block_types_stay_below_count() {
    let cfg = small_config();
    let grid = TerrainGenerator::from_config(&cfg).unwrap().generate();
    assert!(
        grid.blocks()
            .iter()
            .all(|b| u32::from(b.block_type) < cfg.atlas.block_type_count)
    );
}

#[test]
fn config_parses_with_defaults() {
    let cfg = WorldConfig::from_toml_str(
        r#"
        [chunk]
        width = 8
        count = 3

        [terrain]
        mode = "flat"
        block_types = "layered"
    "#,
    )
    .unwrap();
    assert_eq!(cfg.chunk.width, 8);
    assert_eq!(cfg.chunk.height, 16);
    assert_eq!(cfg.chunk.count, 3);
    assert_eq!(cfg.atlas, AtlasConfig::new(2, 2, 3));
    assert_eq!(cfg.terrain.mode, TerrainMode::Flat);
    assert_eq!(cfg.terrain.block_types, BlockTypePolicy::Layered);
    assert_eq!(cfg.grid_dims(), (24, 48, 48));
    assert_eq!(cfg.chunk_coords().len(), 27);
}

#[test]
fn empty_config_is_the_default_world() {
    let cfg = WorldConfig::from_toml_str("").unwrap();
    assert_eq!(cfg.grid_dims(), (160, 160, 160));
    assert!(cfg.validate().is_ok());
}

#[test]
fn validation_rejects_bad_values() {
    let mut cfg = small_config();
    cfg.chunk.depth = 0;
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::ZeroChunkExtent { axis: "depth" })
    );

    let mut cfg = small_config();
    cfg.chunk.count = 0;
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroChunkCount));

    let mut cfg = small_config();
    cfg.atlas = AtlasConfig::new(2, 2, 5);
    assert!(matches!(cfg.validate(), Err(ConfigError::Atlas(_))));
    assert!(TerrainGenerator::from_config(&cfg).is_err());

    let mut cfg = small_config();
    cfg.terrain.min_ratio = 0.9;
    cfg.terrain.max_ratio = 0.1;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvertedHeightRange { .. })
    ));

    let mut cfg = small_config();
    cfg.terrain.flat_level = 1.5;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::RatioOutOfRange { name: "flat_level", .. })
    ));

    let mut cfg = small_config();
    cfg.terrain.octaves = 0;
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroOctaves));

    let mut cfg = small_config();
    cfg.terrain.frequency = 0.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonPositive { name: "frequency", .. })
    ));
}

#[test]
fn validation_rejects_unaddressable_worlds() {
    // Cell count overflows usize.
    let mut cfg = small_config();
    cfg.chunk.width = 1 << 22;
    cfg.chunk.height = 1 << 22;
    cfg.chunk.depth = 1 << 22;
    cfg.chunk.count = 1;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::WorldTooLarge { .. })
    ));
    assert!(TerrainGenerator::from_config(&cfg).is_err());

    // One axis past the i32 coordinate range.
    let mut cfg = small_config();
    cfg.chunk.width = 1 << 20;
    cfg.chunk.count = 1 << 12;
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::WorldTooLarge {
            width: 1 << 20,
            height: 4,
            depth: 4,
            count: 1 << 12
        })
    );

    // The largest single-axis world still validates.
    let mut cfg = small_config();
    cfg.chunk.width = i32::MAX as usize;
    cfg.chunk.height = 1;
    cfg.chunk.depth = 1;
    cfg.chunk.count = 1;
    assert!(cfg.validate().is_ok());
}

#[test]
fn round_robin_covers_every_representable_type() {
    let count = cubes_blocks::MAX_BLOCK_TYPES;
    let tg = TerrainGenerator::new((count as usize + 1, 1, 1), count, Box::new(FlatHeight(1.0)));
    let grid = tg.generate();
    assert_eq!(grid.block_type(IVec3::new(65535, 0, 0)), 65535);
    // Wraps back to the first type after the last id.
    assert_eq!(grid.block_type(IVec3::new(65536, 0, 0)), 0);

    let mut cfg = small_config();
    cfg.atlas = AtlasConfig::new(256, 257, count + 1);
    assert!(matches!(cfg.validate(), Err(ConfigError::Atlas(_))));
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(WorldConfig::from_toml_str("[chunk]\nwidth = \"wide\"").is_err());
    assert!(WorldConfig::from_toml_str("[terrain]\nmode = \"caves\"").is_err());
}
