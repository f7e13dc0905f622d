//! Adapter tests against real Redis and Postgres containers.
//!
//! They need a Docker daemon: `cargo test -p enlist_service -- --ignored`.

use std::sync::Arc;
use std::time::Duration;

use enlist_adapters::{
    PostgresUserStore, RedisTtlStore,
    config::{PostgresSettings, RedisSettings},
};
use enlist_application::{PENDING_REGISTRATION_PREFIX, PendingRegistrationRepository};
use enlist_core::{
    DisplayName, Email, NewUser, Password, PendingRegistration, TtlStore, UserStore,
    UserStoreError, VerificationToken,
};
use enlist_service::{configure_postgresql, configure_redis};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use secrecy::Secret;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::redis::{REDIS_PORT, Redis};
use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};
use tokio::sync::RwLock;

async fn redis_store() -> (ContainerAsync<Redis>, RedisTtlStore) {
    let container = Redis::default().start().await.unwrap();
    let settings = RedisSettings {
        host_name: container.get_host().await.unwrap().to_string(),
        port: container.get_host_port_ipv4(REDIS_PORT).await.unwrap(),
        password: None,
    };
    let conn = configure_redis(&settings).unwrap();
    (container, RedisTtlStore::new(Arc::new(RwLock::new(conn))))
}

async fn postgres_store() -> (ContainerAsync<Postgres>, PostgresUserStore) {
    let container = Postgres::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let settings = PostgresSettings {
        url: Secret::new(format!("postgres://postgres:postgres@{host}:{port}/postgres")),
        max_connections: 5,
    };
    let pool = configure_postgresql(&settings).await.unwrap();
    (container, PostgresUserStore::new(pool))
}

fn random_email() -> Email {
    Email::try_from(Secret::new(SafeEmail().fake::<String>())).unwrap()
}

fn new_user(email: Email) -> NewUser {
    NewUser::new(
        email,
        DisplayName::try_from("Miner".to_string()).unwrap(),
        Password::try_from(Secret::new("correct-horse".to_string())).unwrap(),
    )
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn redis_store_expires_entries() {
    let (_container, store) = redis_store().await;

    store
        .set("k", b"v".to_vec(), Duration::from_millis(300))
        .await
        .unwrap();
    assert_eq!(store.get("k").await.unwrap(), b"v".to_vec());

    tokio::time::sleep(Duration::from_millis(600)).await;

    assert!(store.get("k").await.unwrap_err().is_absent());
    assert!(!store.exists("k").await.unwrap());
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn redis_store_scans_by_literal_prefix() {
    let (_container, store) = redis_store().await;
    let minute = Duration::from_secs(60);
    store.set("email_verification:a", vec![], minute).await.unwrap();
    store.set("email_verification:b", vec![], minute).await.unwrap();
    store.set("email_verificationXc", vec![], minute).await.unwrap();
    store.set("*:d", vec![], minute).await.unwrap();

    let mut keys = store.keys_matching("email_verification:").await.unwrap();
    keys.sort();

    assert_eq!(keys, vec!["email_verification:a", "email_verification:b"]);
    assert_eq!(store.keys_matching("*").await.unwrap(), vec!["*:d"]);
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn pending_registrations_round_trip_through_redis() {
    let (_container, store) = redis_store().await;
    let repository = PendingRegistrationRepository::new(store.clone());
    let token = VerificationToken::from_entropy([9; 32]);
    let record = PendingRegistration::new(
        random_email(),
        DisplayName::try_from("Miner".to_string()).unwrap(),
        Password::try_from(Secret::new("correct-horse".to_string())).unwrap(),
    );

    repository.save(&token, &record).await.unwrap();

    let found = repository.find_by_email(&record.email).await.unwrap();
    assert_eq!(found.0, token);
    assert_eq!(found.1.display_name, record.display_name);
    let raw = store
        .get(&format!("{PENDING_REGISTRATION_PREFIX}{token}"))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(json["name"], "Miner");

    repository.delete(&token).await.unwrap();
    assert!(!repository.exists(&token).await.unwrap());
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn postgres_store_enforces_unique_emails() {
    let (_container, store) = postgres_store().await;
    let email = random_email();

    let created = store.create_user(new_user(email.clone())).await.unwrap();
    let duplicate = store.create_user(new_user(email.clone())).await;

    assert_eq!(duplicate, Err(UserStoreError::UserAlreadyExists));
    let found = store.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.display_name, created.display_name);
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn postgres_store_returns_none_for_unknown_email() {
    let (_container, store) = postgres_store().await;

    assert_eq!(store.find_by_email(&random_email()).await.unwrap(), None);
}
