/// 模板静态文件客户端
///
/// 模板以静态文件形式发布在 `<base_url>/<name>.docx`
use crate::error::StoreError;
use crate::infrastructure::TemplateStore;
use tracing::debug;

/// 模板库（HTTP）
pub struct HttpTemplateStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTemplateStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, template_name: &str) -> String {
        format!("{}/{}.docx", self.base_url, template_name)
    }
}

impl TemplateStore for HttpTemplateStore {
    async fn fetch(&self, template_name: &str) -> Result<Vec<u8>, StoreError> {
        let url = self.url(template_name);
        debug!("下载模板: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::request_failed(&url, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound { name: url });
        }
        if !status.is_success() {
            return Err(StoreError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoreError::request_failed(&url, e))?;
        debug!("模板下载完成: {} ({} 字节)", url, bytes.len());

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let store = HttpTemplateStore::new("https://lpk.example.id/templates/");
        assert_eq!(
            store.url("paket2"),
            "https://lpk.example.id/templates/paket2.docx"
        );
    }
}
