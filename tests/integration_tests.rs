use collection_etl::domain::ports::Pipeline;
use collection_etl::{BuildConfig, CollectionPipeline, EtlEngine, EtlError, LocalStorage};
use std::fs;
use std::time::UNIX_EPOCH;
use tempfile::TempDir;

const ALL_COLUMNS: &str = "catalogNumber,order,family,genus,scientificName,specificEpithet,stateProvince,municipality,locality,eventDate,preparations,decimalLatitude,decimalLongitude";

fn config(csv: &str, out: &str) -> BuildConfig {
    BuildConfig {
        csv_path: csv.to_string(),
        output_path: out.to_string(),
        verbose: false,
        monitor: false,
    }
}

fn storage_for(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap().to_string())
}

#[test]
fn test_end_to_end_build() {
    let temp_dir = TempDir::new().unwrap();
    let csv_content = format!(
        "{}\n{}\n{}\n",
        ALL_COLUMNS,
        "IBS-0001,Squamata,Dipsadidae,Helicops,Helicops angulatus,angulatus,Roraima,Boa Vista,Rio Branco margin,2019-03-11,alcohol,2.8195,-60.6714",
        "IBS-0002,Anura,Hylidae,Boana,Boana boans,boans,Roraima,Caracaraí,Viruá,2020-01-25,alcohol,1.4851,-61.0061"
    );
    fs::write(temp_dir.path().join("colecao.csv"), &csv_content).unwrap();

    let storage = storage_for(&temp_dir);
    let pipeline = CollectionPipeline::new(
        storage,
        config("colecao.csv", "site/data/collection-data.js"),
    );
    let engine = EtlEngine::new(pipeline);

    let report = engine.run().unwrap();

    assert_eq!(report.output_path, "site/data/collection-data.js");
    assert_eq!(report.record_count, 2);

    // Parent directories are created on the way.
    let output_file = temp_dir.path().join("site/data/collection-data.js");
    assert!(output_file.exists());

    let script = fs::read_to_string(&output_file).unwrap();
    assert!(script.starts_with("// Auto-generated. Do not edit manually.\n"));
    assert!(script.contains("window.COLLECTION_DATA = ["));
    assert!(script.contains("\"recordCount\":2"));

    // Accented Portuguese place names survive as literal UTF-8.
    assert!(script.contains("Caracaraí"));
    assert!(script.contains("Viruá"));
    assert!(!script.contains("\\u"));
}

#[test]
fn test_generated_at_is_source_mtime() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("colecao.csv");
    fs::write(&csv_path, "catalogNumber\nIBS-0001\n").unwrap();

    let expected_ns = fs::metadata(&csv_path)
        .unwrap()
        .modified()
        .unwrap()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();

    let storage = storage_for(&temp_dir);
    let pipeline = CollectionPipeline::new(storage, config("colecao.csv", "collection-data.js"));
    EtlEngine::new(pipeline).run().unwrap();

    let script = fs::read_to_string(temp_dir.path().join("collection-data.js")).unwrap();
    assert!(script.contains(&format!("\"generatedAt\":{}", expected_ns)));
}

#[test]
fn test_header_only_export_yields_empty_data() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("colecao.csv"),
        format!("{}\n", ALL_COLUMNS),
    )
    .unwrap();

    let storage = storage_for(&temp_dir);
    let pipeline = CollectionPipeline::new(storage, config("colecao.csv", "collection-data.js"));

    let report = EtlEngine::new(pipeline).run().unwrap();

    assert_eq!(report.record_count, 0);

    let script = fs::read_to_string(temp_dir.path().join("collection-data.js")).unwrap();
    assert!(script.contains("window.COLLECTION_DATA = [];"));
    assert!(script.contains("\"recordCount\":0"));
}

#[test]
fn test_missing_input_aborts_without_output() {
    let temp_dir = TempDir::new().unwrap();

    let storage = storage_for(&temp_dir);
    let pipeline = CollectionPipeline::new(storage, config("colecao.csv", "collection-data.js"));

    let result = EtlEngine::new(pipeline).run();

    match result {
        Err(EtlError::InputNotFound { path }) => assert_eq!(path, "colecao.csv"),
        other => panic!("expected InputNotFound, got {:?}", other.map(|r| r.record_count)),
    }
    assert!(!temp_dir.path().join("collection-data.js").exists());
}

#[test]
fn test_missing_input_leaves_previous_output_untouched() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("collection-data.js"), "previous build").unwrap();

    let storage = storage_for(&temp_dir);
    let pipeline = CollectionPipeline::new(storage, config("colecao.csv", "collection-data.js"));

    assert!(EtlEngine::new(pipeline).run().is_err());

    let untouched = fs::read_to_string(temp_dir.path().join("collection-data.js")).unwrap();
    assert_eq!(untouched, "previous build");
}

#[test]
fn test_existing_output_is_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("colecao.csv"),
        "catalogNumber\nIBS-0001\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("collection-data.js"), "stale content").unwrap();

    let storage = storage_for(&temp_dir);
    let pipeline = CollectionPipeline::new(storage, config("colecao.csv", "collection-data.js"));
    EtlEngine::new(pipeline).run().unwrap();

    let script = fs::read_to_string(temp_dir.path().join("collection-data.js")).unwrap();
    assert!(script.starts_with("// Auto-generated. Do not edit manually.\n"));
    assert!(!script.contains("stale content"));
}

#[test]
fn test_extract_preserves_row_order() {
    let temp_dir = TempDir::new().unwrap();
    let mut csv_content = String::from("catalogNumber\n");
    for i in 0..25 {
        csv_content.push_str(&format!("IBS-{:04}\n", i));
    }
    fs::write(temp_dir.path().join("colecao.csv"), &csv_content).unwrap();

    let storage = storage_for(&temp_dir);
    let pipeline = CollectionPipeline::new(storage, config("colecao.csv", "collection-data.js"));

    let records = pipeline.extract().unwrap();

    assert_eq!(records.len(), 25);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.catalog_number, format!("IBS-{:04}", i));
    }
}
