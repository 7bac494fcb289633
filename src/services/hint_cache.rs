//! 提示缓存 - 业务能力层
//!
//! 职责：
//! - 以题目ID为键记忆提示文本，命中时同步返回
//! - 同一题目的并发请求合并为一次网络调用（in-flight 去重）
//! - 获取失败不写入缓存，调用方可直接重试
//! - 不关心提示的展示/隐藏（那是纯展示状态）

use crate::error::AppResult;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

/// 缓存条目
///
/// 每个题目ID唯一，会话内不淘汰，离开测验页时整体清空
#[derive(Debug, Clone)]
pub struct HintEntry {
    /// 题目ID
    pub question_id: String,
    /// 提示文本
    pub text: String,
    /// 获取时间
    pub fetched_at: DateTime<Local>,
}

/// 提示缓存
///
/// 不同题目的请求完全独立，可以同时在途；
/// 只有相同题目的并发请求会被合并
pub struct HintCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<HintEntry>>>>,
}

impl HintCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 取提示；缓存未命中时执行 fetch 并写入
    ///
    /// # 参数
    /// - `question_id`: 题目ID
    /// - `fetch`: 缓存未命中时用来获取提示文本的异步操作
    ///
    /// 同一题目的后续并发调用会等待第一个在途请求的结果，
    /// 不会发起重复请求；fetch 失败时缓存保持为空
    pub async fn get_or_fetch<F, Fut>(&self, question_id: &str, fetch: F) -> AppResult<HintEntry>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<String>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries
                .entry(question_id.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let question_id = question_id.to_string();
        let entry = cell
            .get_or_try_init(|| async {
                debug!("提示缓存未命中，发起请求: {}", question_id);
                let text = fetch().await?;
                AppResult::Ok(HintEntry {
                    question_id: question_id.clone(),
                    text,
                    fetched_at: Local::now(),
                })
            })
            .await?;

        Ok(entry.clone())
    }

    /// 只读查询缓存（不触发请求）
    pub async fn peek(&self, question_id: &str) -> Option<HintEntry> {
        let entries = self.entries.lock().await;
        entries
            .get(question_id)
            .and_then(|cell| cell.get())
            .cloned()
    }

    /// 已缓存的提示数量（不含在途请求）
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    /// 是否为空
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 清空缓存（离开测验页）
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.clear();
    }
}

impl Default for HintCache {
    fn default() -> Self {
        Self::new()
    }
}
