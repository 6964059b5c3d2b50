//! Upload integration tests.

#[cfg(test)]
mod tests {
    use bucketview_core::store::StoreErrorCode;
    use bucketview_core::{Config, UploadFile, UploadRequest};
    use bucketview_model::{AccessLevel, AclCapability, UploadStatus};

    use crate::{view_with_config, view_with_store, view_without_acls};

    fn files(names: &[&str]) -> Vec<UploadFile> {
        names
            .iter()
            .map(|n| UploadFile::from_bytes(*n, format!("contents of {n}")))
            .collect()
    }

    #[tokio::test]
    async fn test_should_upload_and_list_back() {
        let (view, _store) = view_with_store("upload");

        let outcomes = view
            .upload_files(UploadRequest::new("incoming", files(&["a.txt", "b.txt"])))
            .await;
        assert!(outcomes.iter().all(|o| o.is_success()));

        let page = view.list_files("incoming/", None).await.expect("list");
        assert_eq!(page.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_should_report_middle_failure_in_order() {
        let (view, store) = view_with_store("upload-partial");
        store.fail_put("batch/two.bin", StoreErrorCode::InternalError);

        let outcomes = view
            .upload_files(UploadRequest::new(
                "batch",
                files(&["one.bin", "two.bin", "three.bin"]),
            ))
            .await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].name, "one.bin");
        assert_eq!(outcomes[1].name, "two.bin");
        assert_eq!(outcomes[2].name, "three.bin");
        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
        assert!(outcomes[2].is_success());

        // The failed sibling did not block the others.
        assert!(store.body_of("batch/one.bin").is_some());
        assert!(store.body_of("batch/two.bin").is_none());
        assert!(store.body_of("batch/three.bin").is_some());
    }

    #[tokio::test]
    async fn test_should_fail_oversized_file_only() {
        let config = Config::builder().max_upload_size(16).build();
        let (view, _store) = view_with_config("upload-cap", config);

        let batch = vec![
            UploadFile::from_bytes("ok.txt", "short"),
            UploadFile::from_bytes("huge.txt", "this payload is much longer than sixteen bytes"),
            UploadFile::from_bytes("also-ok.txt", "tiny"),
        ];
        let outcomes = view.upload_files(UploadRequest::new("", batch)).await;

        assert!(outcomes[0].is_success());
        match &outcomes[1].status {
            UploadStatus::Failure { reason } => {
                assert!(reason.contains("exceeds maximum size"), "{reason}");
            }
            UploadStatus::Success { .. } => panic!("oversized file must fail"),
        }
        assert!(outcomes[2].is_success());
    }

    #[tokio::test]
    async fn test_should_upload_public_read_when_supported() {
        let (view, store) = view_with_store("upload-acl");

        let outcomes = view
            .upload_files(
                UploadRequest::new("shared", files(&["doc.pdf"]))
                    .with_access_level(AccessLevel::PublicRead),
            )
            .await;

        assert!(outcomes[0].is_success());
        assert_eq!(
            store.level_of("shared/doc.pdf"),
            Some(AccessLevel::PublicRead)
        );
    }

    #[tokio::test]
    async fn test_should_degrade_to_store_default_when_acls_disabled() {
        let (view, store) = view_without_acls("upload-noacl");

        let outcomes = view
            .upload_files(
                UploadRequest::new("shared", files(&["doc.pdf"]))
                    .with_access_level(AccessLevel::PublicRead),
            )
            .await;

        // No ACL error surfaces; the object is written with the store default.
        assert!(outcomes[0].is_success());
        assert!(store.body_of("shared/doc.pdf").is_some());
        assert_eq!(
            view.bucket_info().await.acl_capability,
            AclCapability::Unsupported
        );
    }

    #[tokio::test]
    async fn test_should_stream_chunked_payloads() -> anyhow::Result<()> {
        let (view, store) = view_with_store("upload-stream");

        let chunks: Vec<Result<bytes::Bytes, std::io::Error>> = vec![
            Ok(bytes::Bytes::from_static(b"first ")),
            Ok(bytes::Bytes::from_static(b"second ")),
            Ok(bytes::Bytes::from_static(b"third")),
        ];
        let body = Box::pin(futures::stream::iter(chunks));
        let file = UploadFile::new("streamed.txt", body, None);

        let outcomes = view
            .upload_files(UploadRequest::new("in", vec![file]))
            .await;
        assert!(outcomes[0].is_success());
        assert_eq!(
            store.body_of("in/streamed.txt").as_deref(),
            Some(b"first second third".as_slice())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_should_fail_file_whose_stream_errors() {
        let (view, store) = view_with_store("upload-stream-err");

        let chunks: Vec<Result<bytes::Bytes, std::io::Error>> = vec![
            Ok(bytes::Bytes::from_static(b"partial")),
            Err(std::io::Error::other("connection reset by client")),
        ];
        let body = Box::pin(futures::stream::iter(chunks));
        let file = UploadFile::new("broken.txt", body, Some(100));

        let outcomes = view
            .upload_files(UploadRequest::new("in", vec![file]))
            .await;
        match &outcomes[0].status {
            UploadStatus::Failure { reason } => {
                assert!(reason.contains("connection reset"), "{reason}");
            }
            UploadStatus::Success { .. } => panic!("broken stream must fail"),
        }
        assert!(store.body_of("in/broken.txt").is_none());
    }

    #[tokio::test]
    async fn test_should_keep_outcome_order_with_mixed_validity() {
        let (view, _store) = view_with_store("upload-mixed");

        let batch = vec![
            UploadFile::from_bytes("good.txt", "x"),
            UploadFile::from_bytes("bad/name.txt", "x"),
            UploadFile::from_bytes("", "x"),
            UploadFile::from_bytes("fine.txt", "x"),
        ];
        let outcomes = view.upload_files(UploadRequest::new("in", batch)).await;

        let flags: Vec<bool> = outcomes.iter().map(|o| o.is_success()).collect();
        assert_eq!(flags, vec![true, false, false, true]);
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["good.txt", "bad/name.txt", "", "fine.txt"]);
    }
}
