//! Integration tests for the request gate and the request scope.

use chrono::{Duration, Utc};
use vigil_auth::{OperationRegistry, OperationRequirement, RequestGate, SessionAuthority};
use vigil_core::error::VigilError;
use vigil_core::models::session::SessionRecord;
use vigil_core::models::tenant::Tenant;
use vigil_core::models::user::{User, UserRole, UserStatus};
use vigil_store::{MemDirectoryStore, MemSessionStore};

fn seeded_stores() -> (MemSessionStore, MemDirectoryStore) {
    let sessions = MemSessionStore::new();
    let directory = MemDirectoryStore::new();

    directory.insert_tenant(Tenant {
        id: "T1".into(),
        name: "Tenant One".into(),
        created_at: Utc::now(),
    });
    directory.insert_user(User {
        id: "U1".into(),
        tenant_id: "T1".into(),
        username: "alice".into(),
        email: "alice@example.com".into(),
        role: UserRole::Member,
        status: UserStatus::Active,
        created_at: Utc::now(),
    });
    directory.insert_user(User {
        id: "U2".into(),
        tenant_id: "T1".into(),
        username: "root".into(),
        email: "root@example.com".into(),
        role: UserRole::Admin,
        status: UserStatus::Active,
        created_at: Utc::now(),
    });

    let now = Utc::now();
    sessions.insert(SessionRecord {
        id: "abc123".into(),
        tenant_id: "T1".into(),
        user_id: "U1".into(),
        is_admin: false,
        created_at: now,
        expires_at: now + Duration::hours(1),
    });
    sessions.insert(SessionRecord {
        id: "root-token".into(),
        tenant_id: "T1".into(),
        user_id: "U2".into(),
        is_admin: true,
        created_at: now,
        expires_at: now + Duration::hours(1),
    });

    (sessions, directory)
}

fn gate() -> RequestGate<MemSessionStore, MemDirectoryStore> {
    let (sessions, directory) = seeded_stores();
    let authority = SessionAuthority::new(sessions, directory);

    let mut registry = OperationRegistry::new();
    registry
        .register("system.health", OperationRequirement::NoAuth)
        .register("readings.page", OperationRequirement::RequireSession)
        .register("directory.tenants", OperationRequirement::RequireAdmin);

    RequestGate::new(registry, authority)
}

#[tokio::test]
async fn no_auth_operation_admits_without_a_session() {
    let gate = gate();

    let scope = gate.admit("system.health", None).await.unwrap();
    assert!(!scope.is_authenticated());

    // Accessors on an anonymous scope are a wiring bug, surfaced loudly.
    let err = scope.tenant_id().unwrap_err();
    assert!(matches!(err, VigilError::Unauthenticated { .. }));
}

#[tokio::test]
async fn session_operation_attaches_the_verified_context() {
    let gate = gate();

    let scope = gate.admit("readings.page", Some("abc123")).await.unwrap();
    assert!(scope.is_authenticated());
    assert_eq!(scope.tenant_id().unwrap(), "T1");
    assert_eq!(scope.user_id().unwrap(), "U1");
    assert_eq!(scope.session_id().unwrap(), "abc123");
    assert!(!scope.is_admin().unwrap());
}

#[tokio::test]
async fn session_operation_without_a_token_is_unauthenticated() {
    let gate = gate();

    let err = gate.admit("readings.page", None).await.unwrap_err();
    assert!(matches!(err, VigilError::Unauthenticated { .. }));

    let err = gate.admit("readings.page", Some("")).await.unwrap_err();
    assert!(matches!(err, VigilError::Unauthenticated { .. }));
}

#[tokio::test]
async fn admin_operation_with_member_session_is_forbidden() {
    let gate = gate();

    // Valid session, wrong role: Forbidden, not Unauthenticated.
    let err = gate
        .admit("directory.tenants", Some("abc123"))
        .await
        .unwrap_err();
    assert!(matches!(err, VigilError::Forbidden { .. }), "got: {err:?}");
}

#[tokio::test]
async fn admin_operation_without_a_session_is_unauthenticated() {
    let gate = gate();

    let err = gate.admit("directory.tenants", None).await.unwrap_err();
    assert!(matches!(err, VigilError::Unauthenticated { .. }));
}

#[tokio::test]
async fn admin_operation_with_admin_session_succeeds() {
    let gate = gate();

    let scope = gate
        .admit("directory.tenants", Some("root-token"))
        .await
        .unwrap();
    assert!(scope.is_admin().unwrap());
    assert_eq!(scope.user_id().unwrap(), "U2");
}

#[tokio::test]
async fn unregistered_operation_is_rejected() {
    let gate = gate();

    let err = gate.admit("readings.export", Some("abc123")).await.unwrap_err();
    assert!(matches!(err, VigilError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn scope_invalidation_logs_out_the_current_session() {
    let (sessions, directory) = seeded_stores();
    let authority = SessionAuthority::new(sessions.clone(), directory);
    let mut registry = OperationRegistry::new();
    registry.register("sessions.revoke", OperationRequirement::RequireSession);
    let gate = RequestGate::new(registry, authority);

    let scope = gate.admit("sessions.revoke", Some("abc123")).await.unwrap();

    // Issuance side deletes the record; the cache alone keeps it alive.
    sessions.remove("abc123");
    gate.admit("sessions.revoke", Some("abc123")).await.unwrap();

    scope.invalidate_session(gate.authority()).unwrap();

    let err = gate
        .admit("sessions.revoke", Some("abc123"))
        .await
        .unwrap_err();
    assert!(matches!(err, VigilError::Unauthenticated { .. }));
}
