//! 模板库 - 基础设施层
//!
//! 按模板名称返回 `.docx` 文件的原始字节

use crate::error::StoreError;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use tracing::debug;

/// 模板库
pub trait TemplateStore: Send + Sync {
    /// 获取模板字节，模板不存在时返回 [`StoreError::NotFound`]
    fn fetch(&self, template_name: &str)
        -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send;
}

/// 本地目录模板库：`<dir>/<name>.docx`
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    dir: PathBuf,
}

impl DirTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateStore for DirTemplateStore {
    async fn fetch(&self, template_name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.dir.join(format!("{}.docx", template_name));
        debug!("读取本地模板: {}", path.display());

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                name: path.display().to_string(),
            }),
            Err(e) => Err(StoreError::io(path.display().to_string(), e)),
        }
    }
}

/// 内存模板库（测试使用）
#[derive(Debug, Default, Clone)]
pub struct MemoryTemplateStore {
    templates: HashMap<String, Vec<u8>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.templates.insert(name.into(), bytes);
        self
    }
}

impl TemplateStore for MemoryTemplateStore {
    async fn fetch(&self, template_name: &str) -> Result<Vec<u8>, StoreError> {
        self.templates
            .get(template_name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                name: format!("{}.docx", template_name),
            })
    }
}
