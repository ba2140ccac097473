//! Configuration Types
//!
//! 定义所有配置结构体

use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;

use crate::application::engine::{EditorSettings, DEFAULT_NOTICE_TTL_SECS};
use crate::domain::manuscript::{ExportFormat, DEFAULT_SPLIT_MARKER};

/// 临时提示持续时间上限（秒）
pub const MAX_NOTICE_TTL_SECS: u64 = 24 * 60 * 60;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 编辑器配置
    #[serde(default)]
    pub editor: EditorConfig,

    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 转换为编辑引擎设置
    pub fn editor_settings(&self) -> EditorSettings {
        let notice_ttl_secs = self.editor.notice_ttl_secs.min(MAX_NOTICE_TTL_SECS);
        EditorSettings {
            split_marker: self.editor.split_marker.clone(),
            notice_ttl: Duration::seconds(notice_ttl_secs as i64),
            export: ExportFormat {
                filename_suffix: self.export.filename_suffix.clone(),
                extension: self.export.extension.clone(),
            },
        }
    }
}

/// 编辑器配置
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// 拆分标记（章节内容中每一处出现都是拆分点）
    #[serde(default = "default_split_marker")]
    pub split_marker: String,

    /// 临时提示持续时间（秒），不超过 `MAX_NOTICE_TTL_SECS`
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_secs: u64,
}

fn default_split_marker() -> String {
    DEFAULT_SPLIT_MARKER.to_string()
}

fn default_notice_ttl() -> u64 {
    DEFAULT_NOTICE_TTL_SECS
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            split_marker: default_split_marker(),
            notice_ttl_secs: default_notice_ttl(),
        }
    }
}

/// 导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// 导出文件名后缀（拼接在文稿标题之后）
    #[serde(default = "default_filename_suffix")]
    pub filename_suffix: String,

    /// 导出文件扩展名（不含点）
    #[serde(default = "default_extension")]
    pub extension: String,

    /// 导出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_filename_suffix() -> String {
    "_edited".to_string()
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_suffix: default_filename_suffix(),
            extension: default_extension(),
            output_dir: default_output_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
