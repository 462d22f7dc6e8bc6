use crate::core::{
    BuildReport, BuildResult, CollectionMeta, CollectionRecord, ConfigProvider, Pipeline, Storage,
};
use crate::utils::error::{EtlError, Result};
use csv::StringRecord;

/// First line of the generated file, marking it as machine-written.
const GENERATED_HEADER: &str = "// Auto-generated. Do not edit manually.";
/// Globals the site reads from the included script.
const DATA_GLOBAL: &str = "window.COLLECTION_DATA";
const META_GLOBAL: &str = "window.COLLECTION_META";

pub struct CollectionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CollectionPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Positions of the known columns within one export's header row, resolved
/// once per run. Exports routinely drop or reorder columns between
/// spreadsheet revisions.
struct ColumnIndex {
    catalog_number: Option<usize>,
    order: Option<usize>,
    family: Option<usize>,
    genus: Option<usize>,
    scientific_name: Option<usize>,
    specific_epithet: Option<usize>,
    state_province: Option<usize>,
    municipality: Option<usize>,
    locality: Option<usize>,
    event_date: Option<usize>,
    preparations: Option<usize>,
    decimal_latitude: Option<usize>,
    decimal_longitude: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);

        Self {
            catalog_number: find("catalogNumber"),
            order: find("order"),
            family: find("family"),
            genus: find("genus"),
            scientific_name: find("scientificName"),
            specific_epithet: find("specificEpithet"),
            state_province: find("stateProvince"),
            municipality: find("municipality"),
            locality: find("locality"),
            event_date: find("eventDate"),
            preparations: find("preparations"),
            decimal_latitude: find("decimalLatitude"),
            decimal_longitude: find("decimalLongitude"),
        }
    }

    /// Missing columns and short rows both come out as empty strings.
    fn record(&self, row: &StringRecord) -> CollectionRecord {
        let cell = |column: Option<usize>| {
            column
                .and_then(|i| row.get(i))
                .unwrap_or("")
                .to_string()
        };

        CollectionRecord {
            catalog_number: cell(self.catalog_number),
            order: cell(self.order),
            family: cell(self.family),
            genus: cell(self.genus),
            scientific_name: cell(self.scientific_name),
            specific_epithet: cell(self.specific_epithet),
            state_province: cell(self.state_province),
            municipality: cell(self.municipality),
            locality: cell(self.locality),
            event_date: cell(self.event_date),
            preparations: cell(self.preparations),
            decimal_latitude: cell(self.decimal_latitude),
            decimal_longitude: cell(self.decimal_longitude),
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CollectionPipeline<S, C> {
    fn extract(&self) -> Result<Vec<CollectionRecord>> {
        let csv_path = self.config.csv_path();
        tracing::debug!("Reading collection export from {}", csv_path);

        let bytes = self.storage.read_file(csv_path).map_err(|e| match e {
            EtlError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                EtlError::InputNotFound {
                    path: csv_path.to_string(),
                }
            }
            other => other,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes.as_slice());
        let index = ColumnIndex::resolve(reader.headers()?);

        let mut records = Vec::new();
        for row in reader.records() {
            records.push(index.record(&row?));
        }

        Ok(records)
    }

    fn transform(&self, records: Vec<CollectionRecord>) -> Result<BuildResult> {
        // The published timestamp is the export's mtime, not the build time.
        let generated_at = self.storage.modified_ns(self.config.csv_path())?;

        if let Some(ts) = chrono::DateTime::from_timestamp(
            (generated_at / 1_000_000_000) as i64,
            (generated_at % 1_000_000_000) as u32,
        ) {
            tracing::debug!("Source export last modified at {}", ts.to_rfc3339());
        }

        let meta = CollectionMeta {
            generated_at,
            record_count: records.len(),
        };

        let payload = serde_json::to_string(&records)?;
        let meta_json = serde_json::to_string(&meta)?;
        let script = format!(
            "{}\n{} = {};\n{} = {};\n",
            GENERATED_HEADER, DATA_GLOBAL, payload, META_GLOBAL, meta_json
        );

        Ok(BuildResult {
            records,
            meta,
            script,
        })
    }

    fn load(&self, result: BuildResult) -> Result<BuildReport> {
        let output_path = self.config.output_path().to_string();

        tracing::debug!("Writing {} bytes to {}", result.script.len(), output_path);
        self.storage.write_file(&output_path, result.script.as_bytes())?;

        Ok(BuildReport {
            output_path,
            record_count: result.meta.record_count,
        })
    }
}
