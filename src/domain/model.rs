use serde::{Deserialize, Serialize};

/// One collection entry, narrowed to the Darwin Core style columns the site
/// renders in its table and map.
///
/// Field declaration order is the serialization order of the generated JSON,
/// independent of the column order in the source CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub catalog_number: String,
    pub order: String,
    pub family: String,
    pub genus: String,
    pub scientific_name: String,
    pub specific_epithet: String,
    pub state_province: String,
    pub municipality: String,
    pub locality: String,
    pub event_date: String,
    pub preparations: String,
    pub decimal_latitude: String,
    pub decimal_longitude: String,
}

/// Summary metadata exposed alongside the records.
///
/// `generated_at` carries the source CSV's last-modified time in nanoseconds
/// since the Unix epoch, not the wall-clock time of the build. The front-end
/// relies on this to tell whether the published data is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMeta {
    pub generated_at: u128,
    pub record_count: usize,
}

/// Product of the transform phase, handed to the load phase.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub records: Vec<CollectionRecord>,
    pub meta: CollectionMeta,
    pub script: String,
}

/// What a successful run reports back to the invoker.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_path: String,
    pub record_count: usize,
}
