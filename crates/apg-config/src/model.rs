use std::path::{Path, PathBuf};

use apg_domain::{SourceEntry, SourceList};
use serde::{Deserialize, Serialize};

/// Stores the application's persistent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_form_key")]
    pub form_storage_key: String,
    #[serde(default = "AppConfig::default_sources_key")]
    pub sources_storage_key: String,
    #[serde(default)]
    pub default_sources: DefaultSources,
    #[serde(default = "AppConfig::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for stored form and source blobs.
    /// Defaults to `<base>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            form_storage_key: Self::default_form_key(),
            sources_storage_key: Self::default_sources_key(),
            default_sources: DefaultSources::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn default_form_key() -> String {
        "ritsumei_prompt_generator_data".into()
    }

    pub fn default_sources_key() -> String {
        "ritsumei_prompt_generator_sources".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }
}

/// Built-in handbook and application-page entries used until the user
/// stores their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSources {
    pub handbook: SourceEntry,
    pub application_page: SourceEntry,
}

impl Default for DefaultSources {
    fn default() -> Self {
        Self {
            handbook: SourceEntry::new(
                "https://en.ritsumei.ac.jp/e-ug/apply/aohb26.pdf",
                "Admissions Handbook 2026",
            ),
            application_page: SourceEntry::new(
                "https://en.ritsumei.ac.jp/e-ug/apply/howto.html/?version=English",
                "Application Procedures",
            ),
        }
    }
}

impl DefaultSources {
    /// Fresh source list with no additional entries.
    pub fn to_source_list(&self) -> SourceList {
        SourceList::new(self.handbook.clone(), self.application_page.clone())
    }
}
