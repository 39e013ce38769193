use std::time::Duration;

use hereabouts::application::ports::SessionStore;
use hereabouts::domain::{Coordinate, Session, UserId};
use hereabouts::infrastructure::session::InMemorySessionStore;

fn user(id: &str) -> UserId {
    UserId::parse(id).unwrap()
}

fn session() -> Session {
    Session::start(Coordinate::new(41.5292, -71.4188).unwrap())
}

#[tokio::test]
async fn given_stored_session_when_getting_then_returned() {
    let store = InMemorySessionStore::default();
    store.put(&user("u1"), session()).await.unwrap();

    assert_eq!(store.get(&user("u1")).await.unwrap(), Some(session()));
    assert_eq!(store.get(&user("u2")).await.unwrap(), None);
}

#[tokio::test]
async fn given_idle_session_when_getting_then_expired_and_removed() {
    let store = InMemorySessionStore::new(Some(Duration::from_millis(10)), None);
    store.put(&user("u1"), session()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(store.get(&user("u1")).await.unwrap(), None);
    assert!(store.is_empty());
}

#[tokio::test]
async fn given_capacity_exceeded_when_putting_then_least_recent_evicted() {
    let store = InMemorySessionStore::new(None, Some(2));

    store.put(&user("a"), session()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    store.put(&user("b"), session()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    store.put(&user("c"), session()).await.unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&user("a")).await.unwrap(), None);
    assert!(store.get(&user("b")).await.unwrap().is_some());
    assert!(store.get(&user("c")).await.unwrap().is_some());
}

#[tokio::test]
async fn given_capacity_of_one_when_putting_then_current_user_kept() {
    let store = InMemorySessionStore::new(None, Some(1));

    store.put(&user("a"), session()).await.unwrap();
    store.put(&user("b"), session()).await.unwrap();

    assert_eq!(store.len(), 1);
    assert!(store.get(&user("b")).await.unwrap().is_some());
}
