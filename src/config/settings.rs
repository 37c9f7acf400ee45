use std::path::{Path, PathBuf};

use crate::grading::WeightingScheme;

#[derive(Debug, Clone)]
pub struct GradingSettings {
    pub weighting_scheme: WeightingScheme,
    /// Records below this percentage count as failing in subject views,
    /// independent of the F grade cutoff.
    pub pass_threshold: f64,
    pub subject_top_count: usize,
    pub dashboard_rank_count: usize,
    pub topper_count: usize,
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self {
            weighting_scheme: WeightingScheme::QuarterWeighted,
            pass_threshold: 60.0,
            subject_top_count: 10,
            dashboard_rank_count: 10,
            topper_count: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl StorageSettings {
    pub fn database_path(&self, semester_number: u8) -> PathBuf {
        self.data_dir.join(format!("eduboard_sem{}.db", semester_number))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub grading: GradingSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            grading: GradingSettings::default(),
            storage: StorageSettings::default(),
        }
    }

    pub fn with_data_dir<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.storage.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_weighting_scheme(mut self, scheme: WeightingScheme) -> Self {
        self.grading.weighting_scheme = scheme;
        self
    }
}
