//! 提示缓存测试
//!
//! 核心验证点：同一题目的并发请求只发起一次获取，
//! 不同题目相互独立，失败不写缓存

use quizpro_client::error::AppError;
use quizpro_client::services::HintCache;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::assert_err;

#[tokio::test]
async fn test_cache_hit_returns_without_fetch() {
    let cache = HintCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = calls.clone();
        let entry = cache
            .get_or_fetch("q1", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("think about chlorophyll".to_string())
            })
            .await
            .unwrap();
        assert_eq!(entry.text, "think about chlorophyll");
    }

    // 第一次之后全部命中缓存
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_same_id_coalesces_to_one_fetch() {
    let cache = Arc::new(HintCache::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let fetch = |calls: Arc<AtomicUsize>| async move {
        calls.fetch_add(1, Ordering::SeqCst);
        // 拖长在途窗口，保证两个调用重叠
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok("same hint".to_string())
    };

    let (a, b) = tokio::join!(
        cache.get_or_fetch("q1", || fetch(calls.clone())),
        cache.get_or_fetch("q1", || fetch(calls.clone())),
    );

    // 两个调用都拿到结果，但只发起了一次获取
    assert_eq!(a.unwrap().text, "same hint");
    assert_eq!(b.unwrap().text, "same hint");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_distinct_ids_fetch_independently() {
    let cache = Arc::new(HintCache::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let fetch = |calls: Arc<AtomicUsize>, text: &'static str| async move {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(text.to_string())
    };

    let (a, b) = tokio::join!(
        cache.get_or_fetch("q1", || fetch(calls.clone(), "hint one")),
        cache.get_or_fetch("q2", || fetch(calls.clone(), "hint two")),
    );

    assert_eq!(a.unwrap().text, "hint one");
    assert_eq!(b.unwrap().text, "hint two");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_failed_fetch_does_not_populate_cache() {
    // 场景 C: 获取失败后缓存保持为空，下一次调用重新发起请求
    let cache = HintCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let failing = {
        let calls = calls.clone();
        || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Other("模拟网络错误".to_string()))
        }
    };

    let result = cache.get_or_fetch("q1", failing).await;
    assert_err!(result);
    assert!(cache.peek("q1").await.is_none());
    assert_eq!(cache.len().await, 0);

    // 重试发起新请求并成功写入
    let calls2 = calls.clone();
    let entry = cache
        .get_or_fetch("q1", || async move {
            calls2.fetch_add(1, Ordering::SeqCst);
            Ok("recovered".to_string())
        })
        .await
        .unwrap();

    assert_eq!(entry.text, "recovered");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_clear_empties_cache() {
    let cache = HintCache::new();
    cache
        .get_or_fetch("q1", || async { Ok("hint".to_string()) })
        .await
        .unwrap();
    assert_eq!(cache.len().await, 1);

    // 离开测验页
    cache.clear().await;
    assert!(cache.is_empty().await);
    assert!(cache.peek("q1").await.is_none());
}
