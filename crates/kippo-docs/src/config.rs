//! Configuration file (docs.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kippo_docs_codeblock::DEFAULT_THEME;
use kippo_docs_static::BuildConfig;
use serde::Deserialize;

/// Configuration file structure (docs.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub dir: String,
    pub output: String,
    pub title: String,
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: "docs".to_string(),
            output: "dist".to_string(),
            title: "Documentation".to_string(),
            base_url: "/".to_string(),
            styles: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_numbers: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            line_numbers: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self { minify: true }
    }
}

impl ConfigFile {
    /// Load configuration if the file exists.
    ///
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Builder settings, with command-line overrides applied.
    pub fn build_config(self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            docs_dir: PathBuf::from(self.docs.dir),
            output_dir: output.unwrap_or_else(|| PathBuf::from(self.docs.output)),
            minify: minify.unwrap_or(self.build.minify),
            base_url: self.docs.base_url,
            title: self.docs.title,
            styles: self.docs.styles,
            theme: self.highlight.theme,
            line_numbers: self.highlight.line_numbers,
        }
    }
}
