use crate::error::{Result, VacancyError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vacancy_search_common::RegexTemplates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 検索対象の列名
    pub text_column: String,
    /// 近接パターンのテンプレート
    pub regex_templates: RegexTemplates,
    /// 出力シート名
    pub output_sheet: String,
    /// 記号・数字の置換文字
    pub replacement: String,
    pub stop_words_sheet: String,
    pub special_characters_sheet: String,
    pub others_sheet: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_column: "job_description".into(),
            regex_templates: RegexTemplates::default(),
            output_sheet: "text_search".into(),
            replacement: " ".into(),
            stop_words_sheet: "stop_words".into(),
            special_characters_sheet: "special_characters".into(),
            others_sheet: "others".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.regex_templates
            .validate()
            .map_err(|e| VacancyError::Config(e.to_string()))?;
        if self.text_column.trim().is_empty() {
            return Err(VacancyError::Config("text_column が空です".into()));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VacancyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("vacancy-search").join("config.json"))
    }
}
