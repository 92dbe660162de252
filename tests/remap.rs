use std::path::{Path, PathBuf};

use tileset_unifier::model::{FLAG_MASK, GeometryKey, ProcessedProject, RawProject};
use tileset_unifier::parser::{load_map, load_project, map_from_json, tileset_from_json};
use tileset_unifier::processor::catalog::Catalogs;
use tileset_unifier::processor::error::RemapError;
use tileset_unifier::processor::registry::RemapRegistry;
use tileset_unifier::processor::{self, RemapOptions};
use tileset_unifier::writer;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load() -> RawProject {
    let root = fixtures();
    load_project(&root.join("maps"), &root.join("tilesets")).expect("fixtures load")
}

fn remap() -> ProcessedProject {
    processor::run(load(), &RemapOptions::default()).expect("fixtures remap")
}

#[test]
fn shared_geometry_starts_at_one_in_every_map() {
    let processed = remap();
    let names: Vec<_> = processed.maps.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["field.json", "ruins.json"]);

    for doc in &processed.maps {
        let small = doc
            .map
            .tilesets
            .iter()
            .find(|t| t.source.ends_with("merged-16x16.json"))
            .expect("16x16 class in use");
        assert_eq!(small.firstgid, 1, "{}", doc.name);
    }
}

#[test]
fn layers_are_rewritten_with_flags() {
    let processed = remap();
    let field = &processed.maps[0].map;
    let ruins = &processed.maps[1].map;

    // 16x16 = a:0..3 then water:0,7 (6 tiles); 32x32 = forest:0,1 dungeon:0,1.
    assert_eq!(
        field.layers[0].data.as_deref(),
        Some(&[1, 2, 0, 7, 0x8000_0000 | 3, 8][..])
    );
    assert!(field.layers[1].data.is_none());

    assert_eq!(
        ruins.layers[0].data.as_deref(),
        Some(&[3, 4, 9, 5, 0x4000_0000 | 1][..])
    );
    assert_eq!(ruins.layers[1].data.as_deref(), Some(&[10, 0][..]));

    let gids: Vec<_> = ruins.tilesets.iter().map(|t| t.firstgid).collect();
    assert_eq!(gids, vec![1, 7]);
}

#[test]
fn flags_and_empty_cells_are_preserved() {
    let before = load();
    let after = remap();

    for (old, new) in before.maps.iter().zip(&after.maps) {
        for (old_layer, new_layer) in old.map.layers.iter().zip(&new.map.layers) {
            let (Some(old_data), Some(new_data)) = (&old_layer.data, &new_layer.data) else {
                continue;
            };
            for (&o, &n) in old_data.iter().zip(new_data) {
                assert_eq!(o & FLAG_MASK, n & FLAG_MASK);
                assert_eq!(o == 0, n == 0);
            }
        }
    }
}

#[test]
fn animation_frame_never_painted_is_numbered() {
    let raw = load();
    let mut registry = RemapRegistry::new(Catalogs::new(raw.tilesets).expect("unique"));
    for map in &raw.maps {
        registry.ingest_map(map).expect("ingest");
    }
    let registry = registry.finalize();

    let small = GeometryKey::new(16, 16);
    assert_eq!(registry.unified_index(&small, "water.json", 7), Some(5));
    assert_eq!(registry.tile_count(&small), 6);
    assert_eq!(
        registry
            .remapped_id(&small, "water.json", 1, 0x2000_0000, 7)
            .expect("frame resolves"),
        0x2000_0000 | 6
    );
}

#[test]
fn first_gid_ranges_do_not_overlap() {
    let processed = remap();
    for doc in &processed.maps {
        let mut next = 1;
        for tileset in &doc.map.tilesets {
            assert_eq!(tileset.firstgid, next, "{}", doc.name);
            let key = tileset
                .source
                .trim_start_matches("./data/tilesets/merged-")
                .trim_end_matches(".json");
            let geometry = processed
                .manifest
                .geometries
                .iter()
                .find(|g| g.key.as_str() == key)
                .expect("manifest entry");
            next += geometry.tile_count;
        }
    }
}

#[test]
fn unknown_tileset_aborts_the_batch() {
    let tilesets = vec![
        tileset_from_json("a.json", r#"{ "tilewidth": 16, "tileheight": 16 }"#).expect("a"),
    ];
    let maps = vec![
        map_from_json(
            "ok.json",
            r#"{ "tilesets": [{ "firstgid": 1, "source": "a.json" }], "layers": [{ "data": [1] }] }"#,
        )
        .expect("ok"),
        map_from_json(
            "bad.json",
            r#"{ "tilesets": [{ "firstgid": 1, "source": "lost.json" }], "layers": [{ "data": [1] }] }"#,
        )
        .expect("bad"),
    ];

    let err = processor::run(RawProject { tilesets, maps }, &RemapOptions::default()).unwrap_err();
    match err {
        RemapError::UnknownTileset { map, tileset } => {
            assert_eq!(map, "bad.json");
            assert_eq!(tileset, "lost.json");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn writers_emit_maps_and_manifest() {
    let processed = remap();
    let out = tempfile::tempdir().expect("tempdir");

    writer::maps::emit(&processed, out.path(), false).expect("maps written");
    writer::manifest::emit(&processed, out.path(), "manifest.json", false).expect("manifest");

    let field = load_map(&out.path().join("field.json")).expect("field readable");
    assert_eq!(field.map.tilesets[0].source, "./data/tilesets/merged-16x16.json");
    assert_eq!(field.map.extra["orientation"], "orthogonal");
    assert_eq!(field.map.layers[1].extra["name"], "spawns");

    let manifest: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("manifest.json")).expect("manifest readable"),
    )
    .expect("manifest json");
    assert_eq!(manifest["geometries"][0]["key"], "16x16");
    assert_eq!(manifest["geometries"][0]["tile_count"], 6);
    assert_eq!(manifest["geometries"][0]["tiles"][5]["source"], "water.json");
    assert_eq!(manifest["geometries"][0]["tiles"][5]["local"], 7);
}
