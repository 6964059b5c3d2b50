//! Folder-creation integration tests.

#[cfg(test)]
mod tests {
    use bucketview_core::BrowseError;
    use bucketview_model::ListingEntry;

    use crate::view_with_store;

    #[tokio::test]
    async fn test_should_create_and_browse_folder() {
        let (view, _store) = view_with_store("folders");

        let key = view.create_folder("", "projects").await.expect("create");
        assert_eq!(key, "projects/");

        let root = view.list_files("", None).await.expect("list root");
        assert_eq!(root.entries.len(), 1);
        match &root.entries[0] {
            ListingEntry::Folder { name, prefix } => {
                assert_eq!(name, "projects");
                assert_eq!(prefix, "projects/");
            }
            other => panic!("expected folder entry, got {other:?}"),
        }

        // The marker itself never shows up inside the folder.
        let inside = view.list_files("projects/", None).await.expect("list inside");
        assert!(inside.entries.is_empty());
    }

    #[tokio::test]
    async fn test_should_refuse_duplicate_folder() {
        let (view, _store) = view_with_store("folders-dup");

        view.create_folder("docs", "archive").await.expect("create");
        let err = view
            .create_folder("docs", "archive")
            .await
            .expect_err("duplicate");
        assert!(matches!(err, BrowseError::FolderAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_should_treat_implicit_folder_as_existing() {
        let (view, store) = view_with_store("folders-implicit");
        store.seed("docs/archive/old.txt", "x");

        // No marker object exists, but keys live under the prefix.
        let err = view
            .create_folder("docs", "archive")
            .await
            .expect_err("implicit folder");
        assert!(matches!(err, BrowseError::FolderAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_should_reject_unsafe_folder_names() {
        let (view, _store) = view_with_store("folders-names");
        for name in ["nested/name", "..", "white space", ""] {
            let err = view
                .create_folder("", name)
                .await
                .expect_err("unsafe name");
            assert!(matches!(err, BrowseError::InvalidPath { .. }), "{name:?}");
        }
    }

    #[tokio::test]
    async fn test_should_nest_folders() {
        let (view, _store) = view_with_store("folders-nested");

        view.create_folder("", "a").await.expect("create a");
        view.create_folder("a", "b").await.expect("create a/b");

        let page = view.list_files("a/", None).await.expect("list");
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].name(), "b");
        assert!(page.entries[0].is_folder());
    }
}
