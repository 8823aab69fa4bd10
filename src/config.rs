use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
///
/// 优先级：环境变量 > TOML 配置文件 > 默认值
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 实时数据库配置 ---
    /// 数据库根地址，例如 `https://xxx.firebaseio.com`
    pub database_url: String,
    /// 数据库访问密钥（可选，作为 `auth` 参数发送）
    pub database_secret: Option<String>,
    /// 参与者集合名称
    pub participant_collection: String,
    // --- 模板配置 ---
    /// 模板地址：以 `http://` / `https://` 开头时走网络，否则视为本地目录
    pub template_base: String,
    // --- 输出配置 ---
    /// 生成文件的输出目录
    pub output_dir: String,
    /// 同时处理的参与者数量（1 表示严格顺序处理）
    pub max_concurrency: usize,
    /// 模板中出现字段映射里不存在的占位符时是否报错
    pub strict_placeholders: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            database_secret: None,
            participant_collection: "peserta".to_string(),
            template_base: "templates".to_string(),
            output_dir: "output".to_string(),
            max_concurrency: 1,
            strict_placeholders: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 仅从环境变量加载（未设置的项使用默认值）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_env()
    }

    /// 从 TOML 文件加载，再用环境变量覆盖
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)?.merge_env()
    }

    /// 解析 TOML 内容（缺失的项使用默认值）
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 用环境变量覆盖当前配置
    pub fn merge_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = std::env::var("DATABASE_URL") {
            self.database_url = v;
        }
        if let Ok(v) = std::env::var("DATABASE_SECRET") {
            self.database_secret = Some(v).filter(|s| !s.is_empty());
        }
        if let Ok(v) = std::env::var("PARTICIPANT_COLLECTION") {
            self.participant_collection = v;
        }
        if let Ok(v) = std::env::var("TEMPLATE_BASE") {
            self.template_base = v;
        }
        if let Ok(v) = std::env::var("OUTPUT_DIR") {
            self.output_dir = v;
        }
        if let Some(v) = parse_env::<usize>("MAX_CONCURRENCY", "usize")? {
            self.max_concurrency = v;
        }
        if let Some(v) = parse_env::<bool>("STRICT_PLACEHOLDERS", "bool")? {
            self.strict_placeholders = v;
        }
        if let Some(v) = parse_env::<bool>("VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = v;
        }
        Ok(self)
    }

    /// 检查必需的配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Missing("database_url".to_string()));
        }
        if self.template_base.trim().is_empty() {
            return Err(ConfigError::Missing("template_base".to_string()));
        }
        Ok(())
    }

    /// 模板是否通过网络获取
    pub fn templates_are_remote(&self) -> bool {
        self.template_base.starts_with("http://") || self.template_base.starts_with("https://")
    }
}

fn parse_env<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str_keeps_defaults_for_missing_keys() {
        let config = Config::from_toml_str(
            r#"
            database_url = "https://lpk-demo.firebaseio.com"
            max_concurrency = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url, "https://lpk-demo.firebaseio.com");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.participant_collection, "peserta");
        assert!(config.strict_placeholders);
        assert!(config.database_secret.is_none());
    }

    #[test]
    fn test_from_toml_str_rejects_wrong_types() {
        let result = Config::from_toml_str("max_concurrency = \"banyak\"");
        assert!(matches!(result, Err(ConfigError::TomlParseFailed(_))));
    }

    #[test]
    fn test_validate_requires_database_url() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));

        let config = Config {
            database_url: "https://lpk-demo.firebaseio.com".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_templates_are_remote() {
        let mut config = Config::default();
        assert!(!config.templates_are_remote());

        config.template_base = "https://lpk.example.id/templates".to_string();
        assert!(config.templates_are_remote());
    }
}
