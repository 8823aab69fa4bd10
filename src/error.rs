use std::fmt;
use thiserror::Error;

/// 应用程序错误类型
///
/// 只用于批次级别的失败（ID 列表获取、归档、写文件等）。
/// 单个参与者的失败永远不会变成 `AppError`，而是记录在
/// [`GenerationResult::Failure`](crate::models::GenerationResult) 中。
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 归档错误
    #[error("归档错误: {0}")]
    Archive(#[from] ArchiveError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 数据存储错误（记录库与模板库共用）
#[derive(Debug, Error)]
pub enum StoreError {
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回非成功状态码
    #[error("服务端返回错误状态 ({url}): {status}")]
    BadStatus { url: String, status: u16 },
    /// 资源不存在
    #[error("资源不存在: {name}")]
    NotFound { name: String },
    /// JSON 解析失败
    #[error("JSON解析失败 ({context}): {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// 本地文件读取失败
    #[error("读取文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 单个参与者的生成错误
///
/// 每一种错误只影响当前参与者，批处理会继续处理后续的参与者。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// 参与者记录不存在
    #[error("参与者不存在: {id}")]
    NotFound { id: String },
    /// 培训套餐缺失或无法识别
    #[error("参与者 {id} 的培训套餐缺失或无效: '{paket}'")]
    InvalidPackage { id: String, paket: String },
    /// 模板文件获取失败
    #[error("无法获取模板 {template}: {reason}")]
    TemplateFetch { template: String, reason: String },
    /// 模板渲染失败
    #[error("模板 {template} 渲染失败: {source}")]
    TemplateRender {
        template: String,
        #[source]
        source: RenderError,
    },
    /// 其他错误
    #[error("未知错误: {0}")]
    Unknown(String),
}

/// 模板渲染错误，汇总了渲染过程中发现的全部占位符错误
#[derive(Debug, Clone, PartialEq)]
pub struct RenderError {
    pub errors: Vec<PlaceholderError>,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for RenderError {}

impl RenderError {
    pub fn single(error: PlaceholderError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// 单个占位符 / 模板结构错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    /// `{` 之后没有对应的 `}`
    #[error("标签未闭合 ({part}): '{fragment}'")]
    UnclosedTag { part: String, fragment: String },
    /// `}` 之前没有对应的 `{`
    #[error("多余的闭合括号 ({part}): '{fragment}'")]
    UnopenedTag { part: String, fragment: String },
    /// `{}`
    #[error("空标签 ({part})")]
    EmptyTag { part: String },
    /// 字段映射中不存在该占位符（严格模式）
    #[error("未知占位符 ({part}): {{{name}}}")]
    UnknownPlaceholder { part: String, name: String },
    /// `{#name}` 没有对应的 `{/name}`
    #[error("区块未闭合 ({part}): {{#{name}}}")]
    UnclosedSection { part: String, name: String },
    /// `{/name}` 没有对应的开始标签
    #[error("区块缺少开始标签 ({part}): {{/{name}}}")]
    UnopenedSection { part: String, name: String },
    /// 闭合标签与开始标签不一致
    #[error("区块闭合标签不匹配 ({part}): 期望 {{/{expected}}}, 实际 {{/{found}}}")]
    MismatchedSection {
        part: String,
        expected: String,
        found: String,
    },
    /// 模板不是合法的文档压缩包
    #[error("模板不是合法的 docx 文件: {reason}")]
    InvalidArchive { reason: String },
    /// 模板缺少 word/document.xml
    #[error("模板缺少正文部分: {part}")]
    MissingPart { part: String },
    /// XML 部分不是合法的 UTF-8
    #[error("模板内容编码错误 ({part})")]
    InvalidEncoding { part: String },
    /// 写出生成的文档失败
    #[error("生成文档失败: {reason}")]
    WriteFailed { reason: String },
}

/// 归档错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 写入压缩包条目失败
    #[error("写入压缩包条目失败 ({entry}): {reason}")]
    EntryFailed { entry: String, reason: String },
    /// 完成压缩包失败
    #[error("完成压缩包失败: {0}")]
    FinishFailed(String),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 缺少必需的配置项
    #[error("缺少配置项: {0}")]
    Missing(String),
}

// ========== 便捷构造函数 ==========

impl StoreError {
    /// 创建网络请求失败错误
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        StoreError::RequestFailed {
            url: url.into(),
            source,
        }
    }

    /// 创建文件读取错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否为"资源不存在"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl GenerationError {
    /// 错误分类名称（用于日志和汇总）
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::NotFound { .. } => "not_found",
            GenerationError::InvalidPackage { .. } => "invalid_package",
            GenerationError::TemplateFetch { .. } => "template_fetch",
            GenerationError::TemplateRender { .. } => "template_render",
            GenerationError::Unknown(_) => "unknown",
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
