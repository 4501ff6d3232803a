//! Daikon Client Integration Tests
//!
//! Integration tests for the client against a live Redis server.
//!
//! To run these tests:
//! 1. Start a Redis server on 127.0.0.1:6379
//! 2. Run: cargo test --test integration_test -- --ignored

use std::time::Duration;

use daikon_client::{ClientError, ClientOptions, Command, DaikonClient, LockOptions};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

const TEST_SERVER_URL: &str = "redis://127.0.0.1:6379";

async fn create_client() -> anyhow::Result<DaikonClient> {
    // A fresh namespace per test keeps runs independent
    let header = format!("daikon-test:{}:", uuid::Uuid::new_v4());
    let options = ClientOptions::new(&header)
        .with_default_expire_time(60)
        .with_default_retry_delay(Duration::from_millis(20));
    Ok(DaikonClient::connect(TEST_SERVER_URL, options).await?)
}

// ============== Strings and namespacing ==============

#[tokio::test]
#[ignore]
async fn test_set_get_roundtrip_with_header() -> anyhow::Result<()> {
    let client = create_client().await?;

    client.set("greeting", "hello", None).await?;
    assert_eq!(client.get("greeting").await?.as_deref(), Some("hello"));

    // The stored key carries the configured header
    let full_key = client.keyspace().with_header("greeting");
    let mut conn = client.connection();
    let raw: Option<String> = conn.get(&full_key).await?;
    assert_eq!(raw.as_deref(), Some("hello"));

    println!("✓ set/get round-trip with header rewriting");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_mutating_command_applies_default_ttl() -> anyhow::Result<()> {
    let client = create_client().await?;

    client.set("session", "token", None).await?;
    let ttl = client.keys().ttl("session").await?;
    assert!(ttl > 0 && ttl <= 60, "unexpected ttl {ttl}");

    client.set("pinned", "value", Some(-1)).await?;
    let ttl = client.keys().ttl("pinned").await?;
    assert_eq!(ttl, -1);

    println!("✓ default expiration policy");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_incr_and_mget() -> anyhow::Result<()> {
    let client = create_client().await?;

    assert_eq!(client.strings().incr("counter", None).await?, 1);
    assert_eq!(client.strings().incr("counter", None).await?, 2);

    client.strings().mset(&[("a", "1"), ("b", "2")], None).await?;
    let values = client.strings().mget(&["a", "b", "missing"]).await?;
    assert_eq!(
        values,
        vec![Some("1".to_string()), Some("2".to_string()), None]
    );

    println!("✓ incr and mset/mget");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_json_roundtrip() -> anyhow::Result<()> {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Job {
        id: u32,
        name: String,
    }

    let client = create_client().await?;
    let job = Job {
        id: 42,
        name: "index-rebuild".to_string(),
    };

    client.set_json("job", &job, None).await?;
    let loaded: Option<Job> = client.get_json("job").await?;
    assert_eq!(loaded, Some(job));

    // Content that is not valid JSON surfaces a serialization error
    client.set("broken", "{not json", None).await?;
    let err = client.get_json::<Job>("broken").await.unwrap_err();
    assert!(matches!(err, ClientError::Serialization(_)));

    println!("✓ JSON round-trip");
    Ok(())
}

// ============== Collections ==============

#[tokio::test]
#[ignore]
async fn test_collection_smoke() -> anyhow::Result<()> {
    let client = create_client().await?;

    client.lists().rpush("queue", &["a", "b", "c"], None).await?;
    assert_eq!(client.lists().llen("queue").await?, 3);
    assert_eq!(
        client.lists().lrange("queue", 0, -1).await?,
        vec!["a", "b", "c"]
    );

    client.hashes().hset("user", "name", "alice", None).await?;
    assert_eq!(
        client.hashes().hget("user", "name").await?.as_deref(),
        Some("alice")
    );

    client.sets().sadd("tags", &["x", "y"], None).await?;
    assert!(client.sets().sismember("tags", "x").await?);
    assert_eq!(client.sets().scard("tags").await?, 2);

    client.sorted_sets().zadd("board", "alice", 10.0, None).await?;
    client.sorted_sets().zadd("board", "bob", 20.0, None).await?;
    assert_eq!(
        client.sorted_sets().zrange("board", 0, -1).await?,
        vec!["alice", "bob"]
    );

    println!("✓ list/hash/set/sorted-set smoke");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_transaction_exec_rewrites_keys() -> anyhow::Result<()> {
    let client = create_client().await?;

    let commands = vec![
        Command::new(["SET", "txn-key", "v1"]),
        Command::new(["GET", "txn-key"]),
    ];
    let results = client.transactions().exec(&commands).await?;
    assert_eq!(results.len(), 2);

    // The SET went through the namespaced key
    assert_eq!(client.get("txn-key").await?.as_deref(), Some("v1"));

    println!("✓ MULTI/EXEC with key rewriting");
    Ok(())
}

// ============== Locks ==============

#[tokio::test]
#[ignore]
async fn test_lock_contention_and_release() -> anyhow::Result<()> {
    let client = create_client().await?;
    let lock = client.lock();

    assert!(lock.acquire("job-1", &LockOptions::new()).await?);
    assert!(!lock.acquire("job-1", &LockOptions::new()).await?);

    lock.release("job-1").await?;
    assert!(lock.acquire("job-1", &LockOptions::new()).await?);

    println!("✓ non-blocking contention and release");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_lock_expires_and_frees_itself() -> anyhow::Result<()> {
    let client = create_client().await?;
    let lock = client.lock();
    let options = LockOptions::new().with_seconds(1);

    assert!(lock.acquire("job-42", &options).await?);
    assert!(!lock.acquire("job-42", &options).await?);

    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert!(lock.acquire("job-42", &options).await?);

    println!("✓ lock frees itself after TTL expiry");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_blocking_lock_times_out() -> anyhow::Result<()> {
    let client = create_client().await?;
    let lock = client.lock();

    assert!(lock.acquire("busy", &LockOptions::new()).await?);

    let options = LockOptions::new()
        .with_blocking(true)
        .with_max_retry_times(2)
        .with_retry_delay(Duration::from_millis(10));
    let err = lock.acquire("busy", &options).await.unwrap_err();
    assert!(matches!(err, ClientError::LockTimeout { .. }));

    println!("✓ blocking acquire times out");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_blocking_lock_waits_for_concurrent_holder() -> anyhow::Result<()> {
    let client = create_client().await?;
    let holder = client.lock();

    assert!(holder.acquire("shared", &LockOptions::new()).await?);

    let releaser = client.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        releaser.lock().release("shared").await
    });

    let options = LockOptions::new()
        .with_blocking(true)
        .with_timeout(Duration::from_secs(5))
        .with_retry_delay(Duration::from_millis(20));
    assert!(client.lock().acquire("shared", &options).await?);

    handle.await??;
    println!("✓ blocking acquire succeeds once the holder releases");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_token_guarded_release() -> anyhow::Result<()> {
    let client = create_client().await?;
    let lock = client.lock();

    let token = lock
        .acquire_with_token("guarded", &LockOptions::new())
        .await?
        .expect("uncontended acquire must yield a token");

    // A wrong token must not release the lock
    lock.release_with_token("guarded", "not-the-token").await?;
    assert!(!lock.acquire("guarded", &LockOptions::new()).await?);

    lock.release_with_token("guarded", &token).await?;
    assert!(lock.acquire("guarded", &LockOptions::new()).await?);

    println!("✓ token-guarded release");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_stale_token_after_expiry_is_noop() -> anyhow::Result<()> {
    let client = create_client().await?;
    let lock = client.lock();

    let stale = lock
        .acquire_with_token("handoff", &LockOptions::new().with_seconds(1))
        .await?
        .expect("first holder must acquire");

    tokio::time::sleep(Duration::from_millis(1200)).await;

    let live = lock
        .acquire_with_token("handoff", &LockOptions::new().with_seconds(30))
        .await?
        .expect("second holder must acquire after expiry");

    lock.release_with_token("handoff", &stale).await?;
    assert!(!lock.acquire("handoff", &LockOptions::new()).await?);

    lock.release_with_token("handoff", &live).await?;
    assert!(lock.acquire("handoff", &LockOptions::new()).await?);

    println!("✓ stale token cannot release a successor's lock");
    Ok(())
}
