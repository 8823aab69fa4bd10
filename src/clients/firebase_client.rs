/// 实时数据库 REST 客户端
///
/// 读取 `<database_url>/<collection>/<id>.json`，记录不存在时服务端返回 `null`
use crate::config::Config;
use crate::error::StoreError;
use crate::infrastructure::RecordStore;
use crate::models::Participant;
use serde_json::Value;
use tracing::{debug, warn};

/// 数据库 key 中不允许出现的字符
const FORBIDDEN_KEY_CHARS: [char; 6] = ['.', '#', '$', '[', ']', '/'];

/// 参与者记录库（实时数据库）
pub struct FirebaseRecordStore {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    secret: Option<String>,
}

impl FirebaseRecordStore {
    /// 创建新的记录库客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.database_url.trim_end_matches('/').to_string(),
            collection: config.participant_collection.trim_matches('/').to_string(),
            secret: config.database_secret.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    /// GET 一个 JSON 节点
    async fn get_json(&self, path: &str) -> Result<Value, StoreError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let mut request = self.http.get(&url);
        if let Some(secret) = &self.secret {
            request = request.query(&[("auth", secret)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::request_failed(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::request_failed(&url, e))
    }
}

impl RecordStore for FirebaseRecordStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Participant>, StoreError> {
        if !is_valid_key(id) {
            warn!("参与者ID不合法，视为不存在: '{}'", id);
            return Ok(None);
        }

        let node = self
            .get_json(&format!("{}/{}", self.collection, id))
            .await?;
        parse_record(id, node)
    }

    async fn get_all(&self) -> Result<Vec<Participant>, StoreError> {
        let node = self.get_json(&self.collection).await?;
        Ok(parse_collection(node))
    }
}

fn is_valid_key(id: &str) -> bool {
    !id.trim().is_empty() && !id.contains(FORBIDDEN_KEY_CHARS)
}

/// 解析单条记录，正文中缺少 `id` 时使用 key
fn parse_record(key: &str, node: Value) -> Result<Option<Participant>, StoreError> {
    if node.is_null() {
        return Ok(None);
    }

    let mut participant: Participant =
        serde_json::from_value(node).map_err(|source| StoreError::Decode {
            context: key.to_string(),
            source,
        })?;
    if participant.id.is_empty() {
        participant.id = key.to_string();
    }
    Ok(Some(participant))
}

/// 解析整个集合
///
/// 集合通常是以 key 为索引的对象；当 key 全为连续数字时服务端会返回数组（空位为 `null`）。
/// 无法解析的单条记录记日志后跳过，不影响其他记录。
fn parse_collection(node: Value) -> Vec<Participant> {
    let entries: Vec<(String, Value)> = match node {
        Value::Null => Vec::new(),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        other => {
            warn!("集合节点不是对象: {}", other);
            Vec::new()
        }
    };

    let mut participants = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match parse_record(&key, value) {
            Ok(Some(participant)) => participants.push(participant),
            Ok(None) => {}
            Err(e) => warn!("⚠️ 跳过无法解析的参与者记录 '{}': {}", key, e),
        }
    }
    participants
}
