//! Listing integration tests.

#[cfg(test)]
mod tests {
    use bucketview_core::store::MemoryStore;
    use bucketview_core::{BucketView, Config};
    use bucketview_model::{AccessLevel, ListingEntry};
    use std::sync::Arc;

    use crate::{view_with_store, view_without_acls};

    #[tokio::test]
    async fn test_should_map_flat_keys_to_folder_view() {
        let (view, store) = view_with_store("listing");
        store.seed("docs/a.txt", "0123456789");
        store.seed("docs/sub/b.txt", "x");

        let page = view.list_files("docs/", None).await.expect("list");

        assert_eq!(page.prefix, "docs/");
        assert_eq!(page.entries.len(), 2);
        match &page.entries[0] {
            ListingEntry::Folder { name, prefix } => {
                assert_eq!(name, "sub");
                assert_eq!(prefix, "docs/sub/");
            }
            other => panic!("expected folder first, got {other:?}"),
        }
        match &page.entries[1] {
            ListingEntry::Object { key, size, .. } => {
                assert_eq!(key, "docs/a.txt");
                assert_eq!(*size, 10);
            }
            other => panic!("expected object second, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_should_distinguish_empty_folder_from_missing_parent() {
        let (view, store) = view_with_store("listing-empty");
        store.seed("docs/a.txt", "x");

        // Empty folder: a successful page with no entries.
        let page = view.list_files("docs/nothing-here/", None).await.expect("list");
        assert!(page.entries.is_empty());
        assert!(page.next_token.is_none());

        // Missing parent: the store signals not-found, the core maps it.
        store.fail_listing(bucketview_core::store::StoreErrorCode::NoSuchBucket);
        let err = view.list_files("gone/", None).await.expect_err("not found");
        assert!(matches!(
            err,
            bucketview_core::BrowseError::PrefixNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_should_paginate_full_sweep_without_gaps() {
        let store = Arc::new(MemoryStore::new("listing-pages").with_page_size(7));
        for i in 0..100 {
            store.seed(&format!("obj{i:03}"), "x");
        }
        let config = Config::builder().max_listing_entries(25).build();
        let view = BucketView::new(store, config);

        let mut token: Option<String> = None;
        let mut seen = Vec::new();
        let mut pages = 0;
        loop {
            let page = view
                .list_files("", token.as_deref())
                .await
                .expect("list page");
            pages += 1;
            assert!(page.entries.len() <= 25);
            for entry in &page.entries {
                match entry {
                    ListingEntry::Object { key, .. } => seen.push(key.clone()),
                    ListingEntry::Folder { .. } => panic!("no folders seeded"),
                }
            }
            match page.next_token {
                Some(t) => token = Some(t),
                None => break,
            }
        }

        assert_eq!(pages, 4);
        let expected: Vec<String> = (0..100).map(|i| format!("obj{i:03}")).collect();
        assert_eq!(seen, expected, "no duplicate or skipped keys");
    }

    #[tokio::test]
    async fn test_should_sort_folders_before_objects_lexicographically() {
        let (view, store) = view_with_store("listing-order");
        // Seeded out of order on purpose; the aggregator must sort.
        store.seed("zzz.txt", "x");
        store.seed("beta/b.txt", "x");
        store.seed("aaa.txt", "x");
        store.seed("alpha/a.txt", "x");

        let page = view.list_files("", None).await.expect("list");
        let names: Vec<&str> = page.entries.iter().map(ListingEntry::name).collect();
        assert_eq!(names, vec!["alpha", "beta", "aaa.txt", "zzz.txt"]);
    }

    #[tokio::test]
    async fn test_should_annotate_levels_only_when_bucket_supports_acls() {
        let (view, store) = view_with_store("listing-acl");
        store.seed_with_level("public.txt", "x", AccessLevel::PublicRead);
        store.seed("private.txt", "x");

        let page = view.list_files("", None).await.expect("list");
        let levels: Vec<(&str, Option<AccessLevel>)> = page
            .entries
            .iter()
            .filter_map(|e| match e {
                ListingEntry::Object {
                    key, access_level, ..
                } => Some((key.as_str(), *access_level)),
                ListingEntry::Folder { .. } => None,
            })
            .collect();
        assert_eq!(
            levels,
            vec![
                ("private.txt", Some(AccessLevel::Private)),
                ("public.txt", Some(AccessLevel::PublicRead)),
            ]
        );

        let (view, store) = view_without_acls("listing-noacl");
        store.seed("a.txt", "x");
        let page = view.list_files("", None).await.expect("list");
        assert!(matches!(
            page.entries[0],
            ListingEntry::Object {
                access_level: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_should_serialize_page_for_the_wire() -> anyhow::Result<()> {
        let (view, store) = view_with_store("listing-wire");
        store.seed("docs/sub/a.txt", "x");
        store.seed("docs/b.txt", "xx");

        let page = view.list_files("docs/", None).await?;
        let json = serde_json::to_value(&page)?;

        assert_eq!(json["prefix"], "docs/");
        assert_eq!(json["entries"][0]["type"], "folder");
        assert_eq!(json["entries"][0]["prefix"], "docs/sub/");
        assert_eq!(json["entries"][1]["type"], "object");
        assert_eq!(json["entries"][1]["key"], "docs/b.txt");
        assert_eq!(json["entries"][1]["size"], 2);
        assert!(json.get("nextToken").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_should_exclude_folder_marker_objects() {
        let (view, store) = view_with_store("listing-markers");
        store.seed("docs/", "");
        store.seed("docs/a.txt", "x");

        let page = view.list_files("docs/", None).await.expect("list");
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].name(), "a.txt");
    }
}
