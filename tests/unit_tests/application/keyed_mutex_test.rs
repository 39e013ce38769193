use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hereabouts::application::services::KeyedMutex;

#[tokio::test]
async fn given_released_guard_when_dropped_then_entry_removed() {
    let locks: KeyedMutex<String> = KeyedMutex::new();

    let guard = locks.lock(&"a".to_string()).await;
    assert_eq!(locks.len(), 1);
    drop(guard);

    assert!(locks.is_empty());
}

#[tokio::test]
async fn given_same_key_when_locked_concurrently_then_never_overlap() {
    let locks = Arc::new(KeyedMutex::<u32>::new());
    let inside = Arc::new(AtomicUsize::new(0));
    let max_inside = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let locks = Arc::clone(&locks);
        let inside = Arc::clone(&inside);
        let max_inside = Arc::clone(&max_inside);
        handles.push(tokio::spawn(async move {
            let _guard = locks.lock(&7).await;
            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
            max_inside.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            inside.fetch_sub(1, Ordering::SeqCst);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    assert!(locks.is_empty());
}

#[tokio::test]
async fn given_different_keys_when_locked_then_both_held_at_once() {
    let locks: KeyedMutex<&'static str> = KeyedMutex::new();

    let a = locks.lock(&"a").await;
    let b = tokio::time::timeout(Duration::from_millis(100), locks.lock(&"b"))
        .await
        .expect("distinct key must not block");

    assert_eq!(locks.len(), 2);
    drop(a);
    drop(b);
}
