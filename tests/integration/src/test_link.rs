//! Download-link integration tests.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bucketview_core::{BrowseError, Config};

    use crate::{view_with_config, view_with_store};

    #[tokio::test]
    async fn test_should_issue_signed_link() {
        let (view, store) = view_with_store("links");
        store.seed("docs/report.pdf", "pdf bytes");

        let url = view
            .get_download_link("docs/report.pdf", None)
            .await
            .expect("link");
        assert!(url.starts_with("https://links."));
        assert!(url.contains("docs/report.pdf"));
        assert!(url.contains("X-Amz-Signature="));
        assert!(url.contains("X-Amz-Expires=3600"));
    }

    #[tokio::test]
    async fn test_should_fail_before_signing_for_missing_key() {
        let (view, store) = view_with_store("links-missing");

        let err = view
            .get_download_link("ghost.pdf", None)
            .await
            .expect_err("missing key");
        assert!(matches!(err, BrowseError::ObjectNotFound { .. }));
        assert_eq!(store.presign_calls(), 0, "no presign call may happen");
    }

    #[tokio::test]
    async fn test_should_bound_ttl() {
        let config = Config::builder().max_link_ttl_secs(300).build();
        let (view, store) = view_with_config("links-ttl", config);
        store.seed("a.txt", "x");

        assert!(matches!(
            view.get_download_link("a.txt", Some(Duration::ZERO)).await,
            Err(BrowseError::InvalidTtl { .. })
        ));
        assert!(matches!(
            view.get_download_link("a.txt", Some(Duration::from_secs(3600)))
                .await,
            Err(BrowseError::InvalidTtl { .. })
        ));

        let url = view
            .get_download_link("a.txt", Some(Duration::from_secs(300)))
            .await
            .expect("ttl at the bound is fine");
        assert!(url.contains("X-Amz-Expires=300"));
    }
}
