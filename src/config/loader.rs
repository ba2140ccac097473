//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（novel-editor.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, MAX_NOTICE_TTL_SECS};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["novel-editor", "novel-editor.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "NOVEL_EDITOR";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NOVEL_EDITOR_`，层级分隔符 `__`）
/// 2. 配置文件（novel-editor.toml 或 novel-editor.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NOVEL_EDITOR_EDITOR__SPLIT_MARKER=<<<cut>>>`
/// - `NOVEL_EDITOR_EXPORT__OUTPUT_DIR=/tmp/out`
/// - `NOVEL_EDITOR_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("editor.split_marker", crate::domain::manuscript::DEFAULT_SPLIT_MARKER)?
        .set_default("editor.notice_ttl_secs", 3)?
        .set_default("export.filename_suffix", "_edited")?
        .set_default("export.extension", "txt")?
        .set_default("export.output_dir", ".")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: NOVEL_EDITOR_EDITOR__NOTICE_TTL_SECS=5
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.editor.split_marker.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Split marker cannot be empty".to_string(),
        ));
    }

    if config.editor.notice_ttl_secs > MAX_NOTICE_TTL_SECS {
        return Err(ConfigError::ValidationError(format!(
            "Notice TTL cannot exceed {}s",
            MAX_NOTICE_TTL_SECS
        )));
    }

    if config.export.extension.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Export extension cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Editor Configuration ===");
    tracing::debug!("Split Marker: {}", config.editor.split_marker);
    tracing::debug!("Notice TTL: {}s", config.editor.notice_ttl_secs);
    tracing::debug!(
        "Export: *{}.{} -> {:?}",
        config.export.filename_suffix,
        config.export.extension,
        config.export.output_dir
    );
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("============================");
}
