use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Csv2QifError, Result};

pub const DEFAULT_ACCOUNT_TYPE: &str = "Bank";

/// Zero-based CSV column index for each QIF field. `None` means the field
/// is not mapped and is never read from a row. Keys are PascalCase; the
/// camelCase spellings used by the command-line flags are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    #[serde(rename = "CsvColumnDate", alias = "csvColumnDate", with = "column_index")]
    pub date: Option<usize>,
    #[serde(rename = "CsvColumnAmount", alias = "csvColumnAmount", with = "column_index")]
    pub amount: Option<usize>,
    #[serde(rename = "CsvColumnMemo", alias = "csvColumnMemo", with = "column_index")]
    pub memo: Option<usize>,
    #[serde(rename = "CsvColumnPayee", alias = "csvColumnPayee", with = "column_index")]
    pub payee: Option<usize>,
    #[serde(rename = "CsvColumnCategory", alias = "csvColumnCategory", with = "column_index")]
    pub category: Option<usize>,
    #[serde(rename = "CsvColumnAddress", alias = "csvColumnAddress", with = "column_index")]
    pub address: Option<usize>,
    #[serde(rename = "CsvColumnRefNumber", alias = "csvColumnRefNumber", with = "column_index")]
    pub ref_number: Option<usize>,
    #[serde(rename = "CsvColumnCleared", alias = "csvColumnCleared", with = "column_index")]
    pub cleared: Option<usize>,
    #[serde(rename = "CsvColumnReimburseFlag", alias = "csvColumnReimburseFlag", with = "column_index")]
    pub reimburse_flag: Option<usize>,
    #[serde(rename = "CsvColumnSplitCategory", alias = "csvColumnSplitCategory", with = "column_index")]
    pub split_category: Option<usize>,
    #[serde(rename = "CsvColumnSplitMemo", alias = "csvColumnSplitMemo", with = "column_index")]
    pub split_memo: Option<usize>,
    #[serde(rename = "CsvColumnSplitAmount", alias = "csvColumnSplitAmount", with = "column_index")]
    pub split_amount: Option<usize>,
    #[serde(rename = "CsvColumnSplitPercentage", alias = "csvColumnSplitPercentage", with = "column_index")]
    pub split_percentage: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConversionOptions {
    #[serde(alias = "csvHasHeader")]
    pub csv_has_header: bool,
    #[serde(alias = "csvDateFormat")]
    pub csv_date_format: String,
    #[serde(alias = "csvReverseAmountSign")]
    pub csv_reverse_amount_sign: bool,
    #[serde(alias = "qifAccountType")]
    pub qif_account_type: String,
    #[serde(alias = "qifDateFormat")]
    pub qif_date_format: String,
}

impl ConversionOptions {
    /// Account type for the `!Type:` header, `Bank` when unset.
    pub fn account_type(&self) -> &str {
        if self.qif_account_type.is_empty() {
            DEFAULT_ACCOUNT_TYPE
        } else {
            &self.qif_account_type
        }
    }
}

/// Everything a conversion run needs. Built once at startup and passed by
/// reference; the JSON form is a single flat object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub options: ConversionOptions,
    #[serde(flatten)]
    pub columns: ColumnMapping,
}

// JSON configs use -1 for "no column"; null and missing keys mean the same.
mod column_index {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<usize>, s: S) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(idx) => s.serialize_u64(*idx as u64),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<usize>, D::Error> {
        let raw = Option::<i64>::deserialize(d)?;
        Ok(raw.and_then(|v| usize::try_from(v).ok()))
    }
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|e| Csv2QifError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| Csv2QifError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    let save_err = |reason: String| Csv2QifError::ConfigSave {
        path: path.to_path_buf(),
        reason,
    };
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| save_err(e.to_string()))?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|e| save_err(e.to_string()))?;
    std::fs::write(path, format!("{json}\n")).map_err(|e| save_err(e.to_string()))?;
    Ok(())
}

pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches('/'));
            }
        }
    }
    PathBuf::from(path)
}
