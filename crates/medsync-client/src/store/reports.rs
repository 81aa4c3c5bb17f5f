//! # Report Store
//!
//! Holds the last generated report per family and drives the server-side
//! export actions. Exports produce a downloadable file and leave the
//! cached reports untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use medsync_core::{DateRange, Report, ReportType};

use crate::error::SyncResult;
use crate::export::ExportFile;
use crate::service::{DataSource, SupplyService};

#[derive(Debug, Default)]
struct ReportsState {
    reports: HashMap<ReportType, Report>,
    loading: bool,
    error: Option<String>,
}

/// Owns the generated-report cache.
pub struct ReportStore {
    service: Arc<SupplyService>,
    state: RwLock<ReportsState>,
}

impl ReportStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        ReportStore {
            service,
            state: RwLock::new(ReportsState::default()),
        }
    }

    /// The last generated report of the given family, if any.
    pub async fn report(&self, report_type: ReportType) -> Option<Report> {
        self.state.read().await.reports.get(&report_type).cloned()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Generates a report and caches it under its family.
    pub async fn generate(
        &self,
        report_type: ReportType,
        range: Option<DateRange>,
    ) -> SyncResult<DataSource> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.service.generate_report(report_type, range).await {
            Ok(fetched) => {
                let mut state = self.state.write().await;
                state.reports.insert(report_type, fetched.data);
                state.loading = false;
                Ok(fetched.source)
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Server-rendered XLSX export.
    pub async fn export_excel(
        &self,
        report_type: ReportType,
        range: Option<DateRange>,
    ) -> SyncResult<ExportFile> {
        self.export(report_type, range, true).await
    }

    /// Server-rendered PDF export.
    pub async fn export_pdf(
        &self,
        report_type: ReportType,
        range: Option<DateRange>,
    ) -> SyncResult<ExportFile> {
        self.export(report_type, range, false).await
    }

    async fn export(
        &self,
        report_type: ReportType,
        range: Option<DateRange>,
        excel: bool,
    ) -> SyncResult<ExportFile> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = if excel {
            self.service.export_report_as_excel(report_type, range).await
        } else {
            self.service.export_report_as_pdf(report_type, range).await
        };

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(file) => Ok(file),
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
