//! Access-level management integration tests.

#[cfg(test)]
mod tests {
    use bucketview_core::BrowseError;
    use bucketview_core::store::StoreErrorCode;
    use bucketview_model::{AccessLevel, AclCapability};

    use crate::{view_with_store, view_without_acls};

    #[tokio::test]
    async fn test_should_roundtrip_access_level_updates() {
        let (view, store) = view_with_store("access");
        store.seed("docs/a.txt", "x");

        assert_eq!(
            view.get_access_level("docs/a.txt").await.expect("get"),
            AccessLevel::Private
        );

        for level in [
            AccessLevel::PublicRead,
            AccessLevel::PublicReadWrite,
            AccessLevel::AuthenticatedRead,
            AccessLevel::Private,
        ] {
            view.set_access_level("docs/a.txt", level)
                .await
                .expect("set");
            assert_eq!(
                view.get_access_level("docs/a.txt").await.expect("get"),
                level
            );
        }
    }

    #[tokio::test]
    async fn test_should_enforce_capability_on_set() {
        let (view, store) = view_without_acls("access-noacl");
        store.seed("docs/a.txt", "x");

        let err = view
            .set_access_level("docs/a.txt", AccessLevel::PublicRead)
            .await
            .expect_err("unsupported bucket");
        assert!(matches!(err, BrowseError::AclUnsupported));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_should_report_missing_object_on_set() {
        let (view, _store) = view_with_store("access-missing");
        let err = view
            .set_access_level("nope.txt", AccessLevel::Private)
            .await
            .expect_err("missing object");
        assert!(matches!(err, BrowseError::ObjectNotFound { .. }));
    }

    #[tokio::test]
    async fn test_should_recover_capability_after_transient_probe_failure() {
        let (view, store) = view_with_store("access-transient");
        store.seed("docs/a.txt", "x");
        store.fail_bucket_acl(StoreErrorCode::ServiceUnavailable);

        // Transient probe failure: capability stays unknown, nothing cached.
        assert_eq!(
            view.bucket_info().await.acl_capability,
            AclCapability::Unknown
        );

        // The store recovers; the next consumer sees the terminal state.
        store.clear_bucket_acl_failure();
        view.set_access_level("docs/a.txt", AccessLevel::PublicRead)
            .await
            .expect("set after recovery");
        assert_eq!(
            view.bucket_info().await.acl_capability,
            AclCapability::Supported
        );
    }

    #[tokio::test]
    async fn test_should_surface_unreachable_store_on_get() {
        let (view, store) = view_with_store("access-down");
        store.seed("docs/a.txt", "x");
        store.fail_object_acl("docs/a.txt", StoreErrorCode::ServiceUnavailable);

        let err = view
            .get_access_level("docs/a.txt")
            .await
            .expect_err("store down");
        assert!(matches!(err, BrowseError::BucketUnreachable { .. }));
        assert!(err.is_retryable());
    }
}
