use clickhero_ports::storage::{SettingsDto, StorageError, StoragePort};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";
const CHARTS_DIR: &str = "charts";
const REPORTS_DIR: &str = "reports";

fn io_err(err: std::io::Error) -> StorageError {
    StorageError::Io(err.to_string())
}

// Layout under the base dir:
//   settings.json
//   charts/<name>.json
//   reports/<chart-slug>-<n>/
pub struct FsStorage {
    base_dir: PathBuf,
}

impl FsStorage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_base_dir() -> Result<PathBuf, StorageError> {
        let base = dirs_next::config_dir()
            .ok_or_else(|| StorageError::Io("config dir not found".to_string()))?;
        Ok(base.join("ClickHero"))
    }

    pub fn settings_path(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE)
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.base_dir.join(CHARTS_DIR)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join(REPORTS_DIR)
    }

    /// Chart files in the library, sorted by name. A missing library is empty.
    pub fn list_charts(&self) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.charts_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut charts = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                charts.push(path);
            }
        }
        charts.sort();
        Ok(charts)
    }

    pub fn resolve_chart(&self, name: &str) -> Option<PathBuf> {
        let path = self.charts_dir().join(format!("{name}.json"));
        path.is_file().then_some(path)
    }

    /// First unused `reports/<slug>-<n>` directory for a chart title. The
    /// directory itself is created by whoever writes the report.
    pub fn next_report_dir(&self, chart_title: &str) -> PathBuf {
        let slug = slugify(chart_title);
        let reports = self.reports_dir();
        (1u32..)
            .map(|n| reports.join(format!("{slug}-{n}")))
            .find(|dir| !dir.exists())
            .unwrap_or(reports)
    }

    // Writes next to the target and renames, so a crash mid-save never leaves
    // a truncated settings file behind.
    fn replace_file(path: &Path, data: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, data).map_err(io_err)?;
        fs::rename(&staging, path).map_err(io_err)
    }
}

impl Default for FsStorage {
    fn default() -> Self {
        let base_dir = Self::default_base_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { base_dir }
    }
}

impl StoragePort for FsStorage {
    fn load_settings(&self) -> Result<SettingsDto, StorageError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(SettingsDto::default());
        }
        let data = fs::read(&path).map_err(io_err)?;
        serde_json::from_slice(&data).map_err(|e| StorageError::Serde(e.to_string()))
    }

    fn save_settings(&self, s: &SettingsDto) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(s).map_err(|e| StorageError::Serde(e.to_string()))?;
        Self::replace_file(&self.settings_path(), &data)
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("session");
    }
    slug
}
