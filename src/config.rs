use crate::error::{OvdMatchError, Result};
use ovd_match_common::decision::{DEFAULT_DECISION_THRESHOLD, DEFAULT_INCLUSION_THRESHOLD};
use ovd_match_common::{AddressMatcher, MatchPolicy, StopwordSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_INCLUSION_THRESHOLD: &str = "OVD_MATCH_INCLUSION_THRESHOLD";
const ENV_DECISION_THRESHOLD: &str = "OVD_MATCH_DECISION_THRESHOLD";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 平均に採用するフィールドスコアの下限
    pub inclusion_threshold: f64,
    /// 一致と判定する総合スコアの下限
    pub decision_threshold: f64,
    /// カスタムストップワードファイル（JSON配列）
    pub stopwords_path: Option<PathBuf>,
    /// ストップワードプリセット（indian/none）
    pub stopword_preset: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inclusion_threshold: DEFAULT_INCLUSION_THRESHOLD,
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            stopwords_path: None,
            stopword_preset: None,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書きする
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// 指定パスから読み込み（無ければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OvdMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ovd-match").join("config.json"))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = read_env_f64(ENV_INCLUSION_THRESHOLD)? {
            self.inclusion_threshold = value;
        }
        if let Some(value) = read_env_f64(ENV_DECISION_THRESHOLD)? {
            self.decision_threshold = value;
        }
        Ok(())
    }

    /// 閾値を検証して判定ポリシーを作る
    pub fn policy(&self) -> Result<MatchPolicy> {
        Ok(MatchPolicy::new(self.inclusion_threshold, self.decision_threshold)?)
    }

    /// ストップワード集合を作る（ファイル > プリセット > 組み込み）
    pub fn stopwords(&self) -> Result<StopwordSet> {
        if let Some(path) = &self.stopwords_path {
            if !path.exists() {
                return Err(OvdMatchError::FileNotFound(path.display().to_string()));
            }
            return Ok(StopwordSet::from_file(path)?);
        }

        match &self.stopword_preset {
            Some(name) => StopwordSet::from_preset(name)
                .ok_or_else(|| OvdMatchError::Config(format!("不明なストップワードプリセット: {}", name))),
            None => Ok(StopwordSet::indian_default()),
        }
    }

    /// 設定から照合エンジンを組み立てる
    pub fn build_matcher(&self) -> Result<AddressMatcher> {
        Ok(AddressMatcher::new(self.stopwords()?, self.policy()?))
    }
}

fn read_env_f64(name: &str) -> Result<Option<f64>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| OvdMatchError::Config(format!("{} が数値ではありません: {}", name, raw))),
        Err(_) => Ok(None),
    }
}
