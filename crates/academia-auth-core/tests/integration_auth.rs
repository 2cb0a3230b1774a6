//! End-to-end auth flows against in-memory credential sources
//!
//! Covers login, refresh, password change and the interactions between
//! them: fresh-role-on-refresh, chained credential sources, store timeouts.

mod common;

use std::sync::Arc;
use std::time::Duration;

use academia_auth_core::{AuthConfig, AuthError, AuthService, SigningKey, TokenKind};
use academia_db::{CredentialChain, CredentialSource};
use academia_types::{Role, SubjectId};

use common::mock_store::MockCredentialSource;

fn service_with(store: MockCredentialSource) -> AuthService<MockCredentialSource> {
    AuthService::new(common::test_config(), Arc::new(store))
}

fn store_with_alice() -> MockCredentialSource {
    let store = MockCredentialSource::new();
    store.insert(common::credential(
        1,
        "alice",
        Some("alice@academia.edu"),
        Some("11222333"),
        "wonderland",
        "PROFESOR",
    ));
    store
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_tokens_and_subject_summary() {
    let service = service_with(store_with_alice());

    let outcome = service.login("alice", "wonderland").await.unwrap();

    assert_eq!(outcome.subject.id, SubjectId(1));
    assert_eq!(outcome.subject.username, "alice");
    assert_eq!(outcome.subject.role, Role::Profesor);
    // Signed tokens are three dot-separated segments
    assert_eq!(outcome.access_token.matches('.').count(), 2);
    assert_eq!(outcome.refresh_token.matches('.').count(), 2);

    // The access token round-trips with the same subject and role
    let claims = service
        .verifier()
        .verify(&outcome.access_token, TokenKind::Access)
        .unwrap();
    assert_eq!(claims.sub, "1");
    assert_eq!(claims.role, Some(Role::Profesor));
}

#[tokio::test]
async fn test_login_by_email_and_by_dni() {
    let service = service_with(store_with_alice());

    let by_email = service.login("alice@academia.edu", "wonderland").await.unwrap();
    assert_eq!(by_email.subject.id, SubjectId(1));

    let by_dni = service.login("11222333", "wonderland").await.unwrap();
    assert_eq!(by_dni.subject.id, SubjectId(1));
}

#[tokio::test]
async fn test_login_wrong_password_is_invalid_credentials() {
    let service = service_with(store_with_alice());

    let err = service.login("alice", "through-the-looking-glass").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_unknown_identifier_is_same_error_kind() {
    let service = service_with(store_with_alice());

    let unknown = service.login("nobody", "wonderland").await.unwrap_err();
    let wrong_password = service.login("alice", "nope").await.unwrap_err();

    // Uniform error: callers cannot tell which part was wrong
    assert_eq!(unknown.error_code(), wrong_password.error_code());
}

#[tokio::test]
async fn test_login_unknown_role_in_store_fails_closed() {
    let store = MockCredentialSource::new();
    store.insert(common::credential(9, "weird", None, None, "pw", "SUPERUSER"));
    let service = service_with(store);

    let err = service.login("weird", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Internal(_)));
}

// ============================================================================
// Chained sources
// ============================================================================

#[tokio::test]
async fn test_student_login_through_chain() {
    let staff = MockCredentialSource::new();
    staff.insert(common::credential(1, "alice", None, None, "wonderland", "PROFESOR"));

    let students = MockCredentialSource::new();
    students.insert(common::credential(
        200,
        "40111222",
        Some("bob@academia.edu"),
        Some("40111222"),
        "sekreto",
        "ALUMNO",
    ));

    let chain = CredentialChain::new()
        .with_source(Arc::new(staff))
        .with_source(Arc::new(students));
    let service = AuthService::new(common::test_config(), Arc::new(chain));

    let outcome = service.login("40111222", "sekreto").await.unwrap();
    assert_eq!(outcome.subject.role, Role::Alumno);
    assert_eq!(outcome.subject.id, SubjectId(200));
}

#[tokio::test]
async fn test_chain_prefers_earlier_source() {
    let staff = MockCredentialSource::new();
    staff.insert(common::credential(1, "shared", None, None, "staff-pw", "SECRETARIA"));

    let students = MockCredentialSource::new();
    students.insert(common::credential(2, "shared", None, None, "student-pw", "ALUMNO"));

    let chain = CredentialChain::new()
        .with_source(Arc::new(staff))
        .with_source(Arc::new(students));

    let row = chain.find_by_identifier("shared").await.unwrap().unwrap();
    assert_eq!(row.id, 1);
    assert_eq!(row.role, "SECRETARIA");
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_yields_working_access_token() {
    let service = service_with(store_with_alice());
    let outcome = service.login("alice", "wonderland").await.unwrap();

    let access = service.refresh(&outcome.refresh_token).await.unwrap();
    let claims = service.verifier().verify(&access, TokenKind::Access).unwrap();

    assert_eq!(claims.sub, "1");
    assert_eq!(claims.role, Some(Role::Profesor));
}

#[tokio::test]
async fn test_refresh_picks_up_role_change() {
    let store = store_with_alice();
    let service = service_with(store.clone());
    let outcome = service.login("alice", "wonderland").await.unwrap();

    // Promotion after the refresh token was issued
    store.set_role(1, "ADMINISTRADOR");

    let access = service.refresh(&outcome.refresh_token).await.unwrap();
    let claims = service.verifier().verify(&access, TokenKind::Access).unwrap();
    assert_eq!(claims.role, Some(Role::Administrador));
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let service = service_with(store_with_alice());
    let outcome = service.login("alice", "wonderland").await.unwrap();

    let err = service.refresh(&outcome.access_token).await.unwrap_err();
    assert!(matches!(err, AuthError::WrongTokenType));
}

#[tokio::test]
async fn test_refresh_for_deleted_subject_is_subject_not_found() {
    let store = store_with_alice();
    let service = service_with(store.clone());
    let outcome = service.login("alice", "wonderland").await.unwrap();

    store.remove(1);

    let err = service.refresh(&outcome.refresh_token).await.unwrap_err();
    assert!(matches!(err, AuthError::SubjectNotFound));
}

#[tokio::test]
async fn test_refresh_token_is_reusable_until_expiry() {
    // No rotation in this design: the same refresh token redeems repeatedly
    let service = service_with(store_with_alice());
    let outcome = service.login("alice", "wonderland").await.unwrap();

    let first = service.refresh(&outcome.refresh_token).await.unwrap();
    let second = service.refresh(&outcome.refresh_token).await.unwrap();

    let verifier = service.verifier();
    assert!(verifier.verify(&first, TokenKind::Access).is_ok());
    assert!(verifier.verify(&second, TokenKind::Access).is_ok());
}

#[tokio::test]
async fn test_expired_access_token_rejected() {
    let store = store_with_alice();
    let config = AuthConfig::new(SigningKey::generate()).with_access_ttl(Duration::ZERO);
    let service = AuthService::new(config, Arc::new(store));

    let outcome = service.login("alice", "wonderland").await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let err = service
        .verifier()
        .verify(&outcome.access_token, TokenKind::Access)
        .unwrap_err();
    assert!(matches!(err, AuthError::ExpiredToken));
}

// ============================================================================
// Password change
// ============================================================================

#[tokio::test]
async fn test_change_password_swaps_the_hash() {
    let service = service_with(store_with_alice());

    service
        .change_password(SubjectId(1), "wonderland", "looking-glass")
        .await
        .unwrap();

    // Old password no longer works, new one does
    let err = service.login("alice", "wonderland").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(service.login("alice", "looking-glass").await.is_ok());
}

#[tokio::test]
async fn test_change_password_rejects_wrong_current() {
    let service = service_with(store_with_alice());

    let err = service
        .change_password(SubjectId(1), "wrong", "new-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    // The stored credential is untouched
    assert!(service.login("alice", "wonderland").await.is_ok());
}

#[tokio::test]
async fn test_change_password_for_unknown_subject() {
    let service = service_with(store_with_alice());

    let err = service
        .change_password(SubjectId(404), "whatever", "new")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::SubjectNotFound));
}

// ============================================================================
// Profile and store failures
// ============================================================================

#[tokio::test]
async fn test_profile_roundtrip() {
    let service = service_with(store_with_alice());

    let subject = service.profile(SubjectId(1)).await.unwrap();
    assert_eq!(subject.username, "alice");
    assert_eq!(subject.role, Role::Profesor);

    let err = service.profile(SubjectId(404)).await.unwrap_err();
    assert!(matches!(err, AuthError::SubjectNotFound));
}

#[tokio::test]
async fn test_slow_store_fails_closed_as_backend_unavailable() {
    let store = MockCredentialSource::with_delay(Duration::from_millis(200));
    store.insert(common::credential(1, "alice", None, None, "wonderland", "PROFESOR"));

    let config = common::test_config().with_store_timeout(Duration::from_millis(50));
    let service = AuthService::new(config, Arc::new(store));

    let err = service.login("alice", "wonderland").await.unwrap_err();
    assert!(matches!(err, AuthError::BackendUnavailable));
}
