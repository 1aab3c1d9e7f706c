use super::*;

#[test]
fn test_invalid_credentials_become_unauthorized() {
    let err: SyncError = AuthError::InvalidCredentials.into();

    assert!(matches!(err, SyncError::Unauthorized));
}

#[test]
fn test_github_failures_stay_upstream() {
    let err: SyncError = AuthError::GitHubError(github_client::Error::RateLimitExceeded).into();

    match err {
        SyncError::Upstream(github_client::Error::RateLimitExceeded) => {}
        other => panic!("Expected Upstream(RateLimitExceeded), got {other:?}"),
    }
}

#[test]
fn test_sync_error_messages() {
    assert_eq!(
        SyncError::MissingCredentials {
            login: "octocat".to_string()
        }
        .to_string(),
        "Account 'octocat' has no stored credential"
    );
    assert_eq!(
        SyncError::AccountExists {
            login: "mona".to_string()
        }
        .to_string(),
        "Account 'mona' already exists"
    );
    assert_eq!(
        SyncError::from(StoreError::NotFound {
            login: "ghost".to_string()
        })
        .to_string(),
        "Persistence failed: Account 'ghost' not found"
    );
}

#[test]
fn test_store_io_error_names_path() {
    let err = StoreError::Io {
        path: PathBuf::from("/data/octocat.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    assert_eq!(err.to_string(), "I/O error on '/data/octocat.json': denied");
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<SyncError>();
    assert_send_sync::<StoreError>();
}
