use crate::core::Pipeline;
use crate::domain::model::BuildReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<BuildReport> {
        tracing::info!("Extracting records...");
        let records = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", records.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Transforming records...");
        let result = self.pipeline.transform(records)?;
        tracing::info!("Rendered script for {} records", result.meta.record_count);
        self.monitor.log_stats("Transform");

        tracing::info!("Loading output...");
        let report = self.pipeline.load(result)?;
        tracing::info!("Output saved to: {}", report.output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(report)
    }
}
