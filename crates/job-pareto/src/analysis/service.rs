use super::domain::{
    x_min_domain, AnalysisError, CountRecord, ParameterDomain, SortedSeries, ALPHA_DOMAIN,
    THRESHOLD_DOMAIN,
};
use super::report::{ConcentrationReport, ReportParameters};
use super::ConcentrationAnalyzer;
use crate::config::AnalysisConfig;
use crate::source::{CountSourceImporter, SourceImportError};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::info;

/// Optional per-request overrides of the configured defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverrides {
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub x_min: Option<f64>,
    #[serde(default)]
    pub alpha: Option<f64>,
    #[serde(default)]
    pub knee: Option<f64>,
    #[serde(default)]
    pub knee_share: Option<f64>,
    #[serde(default)]
    pub resolution: Option<usize>,
}

impl ParameterOverrides {
    pub fn apply(&self, defaults: &ReportParameters) -> ReportParameters {
        ReportParameters {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            x_min: self.x_min.or(defaults.x_min),
            alpha: self.alpha.unwrap_or(defaults.alpha),
            knee: self.knee.unwrap_or(defaults.knee),
            knee_share: self.knee_share.unwrap_or(defaults.knee_share),
            resolution: self.resolution.unwrap_or(defaults.resolution),
        }
    }
}

/// Report request carrying its own data (inline records or CSV text). With
/// neither, the cached dataset is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub records: Option<Vec<CountRecord>>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(flatten)]
    pub parameters: ParameterOverrides,
}

/// Slider domains a front end needs to render the parameter controls.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterCatalog {
    pub threshold: ParameterDomain,
    pub alpha: ParameterDomain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_min: Option<ParameterDomain>,
    pub defaults: ReportParameters,
}

#[derive(Debug, thiserror::Error)]
pub enum ConcentrationServiceError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Source(#[from] SourceImportError),
    #[error("no dataset loaded; send records or csv with the request")]
    NoDataset,
    #[error("send either records or csv, not both")]
    AmbiguousSource,
}

impl ConcentrationServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Analysis(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Source(_) | Self::AmbiguousSource => StatusCode::BAD_REQUEST,
            Self::NoDataset => StatusCode::NOT_FOUND,
        }
    }
}

/// Runs reports against request data or a dataset cached at startup.
#[derive(Debug, Clone, Default)]
pub struct ConcentrationService {
    dataset: Option<Vec<CountRecord>>,
    defaults: ReportParameters,
}

impl ConcentrationService {
    pub fn new(defaults: ReportParameters) -> Self {
        Self {
            dataset: None,
            defaults,
        }
    }

    pub fn with_dataset(mut self, records: Vec<CountRecord>) -> Self {
        self.dataset = Some(records);
        self
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self, SourceImportError> {
        let service = Self::new(config.defaults);
        match &config.data_csv {
            Some(path) => {
                let records = CountSourceImporter::from_path(path)?;
                info!(path = %path.display(), entities = records.len(), "dataset cached");
                Ok(service.with_dataset(records))
            }
            None => Ok(service),
        }
    }

    pub fn defaults(&self) -> &ReportParameters {
        &self.defaults
    }

    pub fn dataset(&self) -> Option<&[CountRecord]> {
        self.dataset.as_deref()
    }

    pub fn report(
        &self,
        request: ReportRequest,
    ) -> Result<ConcentrationReport, ConcentrationServiceError> {
        let parameters = request.parameters.apply(&self.defaults);
        let records = match (request.records, request.csv) {
            (Some(_), Some(_)) => return Err(ConcentrationServiceError::AmbiguousSource),
            (Some(records), None) => records,
            (None, Some(csv)) => CountSourceImporter::from_reader(Cursor::new(csv.into_bytes()))?,
            (None, None) => self
                .dataset
                .clone()
                .ok_or(ConcentrationServiceError::NoDataset)?,
        };

        let analyzer = ConcentrationAnalyzer::new(records)?;
        Ok(analyzer.report(&parameters)?)
    }

    pub fn cached_report(
        &self,
        overrides: ParameterOverrides,
    ) -> Result<ConcentrationReport, ConcentrationServiceError> {
        self.report(ReportRequest {
            records: None,
            csv: None,
            parameters: overrides,
        })
    }

    pub fn parameter_catalog(&self) -> ParameterCatalog {
        let x_min = self
            .dataset
            .as_deref()
            .and_then(|records| x_min_domain(&SortedSeries::from_records(records)));

        ParameterCatalog {
            threshold: THRESHOLD_DOMAIN,
            alpha: ALPHA_DOMAIN,
            x_min,
            defaults: self.defaults,
        }
    }
}
