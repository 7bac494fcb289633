//! 提示服务 - 业务能力层
//!
//! 把提示缓存和提示接口组合成"按题目ID取提示"这一个能力

use crate::clients::ApiClient;
use crate::error::AppResult;
use crate::services::hint_cache::{HintCache, HintEntry};
use std::sync::Arc;

/// 提示服务
pub struct HintService {
    client: Arc<ApiClient>,
    cache: HintCache,
}

impl HintService {
    /// 创建新的提示服务
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: HintCache::new(),
        }
    }

    /// 获取题目提示
    ///
    /// # 参数
    /// - `question_id`: 题目ID
    ///
    /// 缓存命中时直接返回，不发请求；失败可重试
    pub async fn get_hint(&self, question_id: &str) -> AppResult<String> {
        let client = self.client.clone();
        let id = question_id.to_string();

        let entry = self
            .cache
            .get_or_fetch(question_id, || async move { client.get_hint(&id).await })
            .await?;

        Ok(entry.text)
    }

    /// 只读查询缓存
    pub async fn peek(&self, question_id: &str) -> Option<HintEntry> {
        self.cache.peek(question_id).await
    }

    /// 已缓存的提示数量
    pub async fn cached_count(&self) -> usize {
        self.cache.len().await
    }

    /// 清空缓存（离开测验页时调用）
    pub async fn clear(&self) {
        self.cache.clear().await;
    }
}
