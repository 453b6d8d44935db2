//! Tests for `MemoryStore`.

use std::sync::Arc;

use favs_core::{
  Error,
  asset::{Asset, Audience, Chart, Insight},
  store::FavoritesStore,
  user::User,
};

use crate::MemoryStore;

async fn store_with_users(ids: &[&str]) -> MemoryStore {
  let s = MemoryStore::new();
  for id in ids {
    s.create_user(User::new(*id)).await.unwrap();
  }
  s
}

fn chart(id: &str) -> Asset { Chart::new(id, "Sales").into() }

async fn favorite(s: &MemoryStore, user_id: &str, asset: Asset) {
  if s.get_asset(asset.id()).await.is_err() {
    s.create_asset(asset.clone()).await.unwrap();
  }
  s.add_favorite(user_id, &asset).await.unwrap();
}

// ─── Assets ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_asset() {
  let s = MemoryStore::new();
  s.create_asset(chart("chart1")).await.unwrap();

  let fetched = s.get_asset("chart1").await.unwrap();
  assert_eq!(fetched.id(), "chart1");
}

#[tokio::test]
async fn create_duplicate_asset_fails() {
  let s = MemoryStore::new();
  s.create_asset(chart("chart1")).await.unwrap();
  let err = s.create_asset(chart("chart1")).await.unwrap_err();
  assert!(matches!(err, Error::AssetAlreadyExists(id) if id == "chart1"));
}

#[tokio::test]
async fn get_missing_asset_fails() {
  let s = MemoryStore::new();
  let err = s.get_asset("nope").await.unwrap_err();
  assert!(matches!(err, Error::AssetNotFound(_)));
}

#[tokio::test]
async fn update_missing_asset_fails() {
  let s = MemoryStore::new();
  let err = s.update_asset(chart("nope")).await.unwrap_err();
  assert!(matches!(err, Error::AssetNotFound(_)));
}

#[tokio::test]
async fn update_asset_stamps_updated_at() {
  let s = MemoryStore::new();
  s.create_asset(chart("chart1")).await.unwrap();
  let before = s.get_asset("chart1").await.unwrap();

  let mut edited = Arc::unwrap_or_clone(Arc::clone(&before));
  edited.set_updated_at(before.created_at());
  s.update_asset(edited).await.unwrap();

  let after = s.get_asset("chart1").await.unwrap();
  assert!(after.updated_at() >= before.updated_at());
  assert!(after.updated_at() >= after.created_at());
}

#[tokio::test]
async fn list_assets_pages_in_id_order() {
  let s = MemoryStore::new();
  for id in ["c", "a", "b", "d"] {
    s.create_asset(chart(id)).await.unwrap();
  }

  let page = s.list_assets(2, 1).await.unwrap();
  let ids: Vec<_> = page.iter().map(|a| a.id()).collect();
  assert_eq!(ids, ["b", "c"]);

  assert!(s.list_assets(10, 4).await.unwrap().is_empty());
  assert!(s.list_assets(10, 100).await.unwrap().is_empty());
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_user_is_idempotent_upsert() {
  let s = MemoryStore::new();
  s.create_user(User::new("user1")).await.unwrap();
  favorite(&s, "user1", chart("chart1")).await;

  s.create_user(User::with_profile("user1", "a@example.com", "A"))
    .await
    .unwrap();

  let user = s.get_user("user1").await.unwrap();
  assert_eq!(user.email.as_deref(), Some("a@example.com"));
  // Re-creating a user keeps its favorites.
  assert_eq!(s.get_favorite_count("user1").await.unwrap(), 1);
}

#[tokio::test]
async fn get_missing_user_fails() {
  let s = MemoryStore::new();
  let err = s.get_user("ghost").await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}

// ─── Favorites ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_get_remove_favorite() {
  let s = store_with_users(&["user1"]).await;
  s.create_asset(chart("chart1")).await.unwrap();

  s.add_favorite("user1", &chart("chart1")).await.unwrap();
  let favs = s.get_user_favorites("user1", 10, 0).await.unwrap();
  assert_eq!(favs.len(), 1);
  assert_eq!(favs[0].asset_id, "chart1");
  assert_eq!(favs[0].user_id, "user1");
  assert_eq!(favs[0].added_at, favs[0].updated_at);

  s.remove_favorite("user1", "chart1").await.unwrap();
  assert!(s.get_user_favorites("user1", 10, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_favorite_twice_conflicts() {
  let s = store_with_users(&["user1"]).await;
  favorite(&s, "user1", chart("chart1")).await;

  let err = s.add_favorite("user1", &chart("chart1")).await.unwrap_err();
  assert!(matches!(err, Error::FavoriteAlreadyExists { .. }));
  assert_eq!(s.get_favorite_count("user1").await.unwrap(), 1);
}

#[tokio::test]
async fn add_favorite_requires_user_and_asset() {
  let s = store_with_users(&["user1"]).await;
  s.create_asset(chart("chart1")).await.unwrap();

  let err = s.add_favorite("ghost", &chart("chart1")).await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));

  let err = s.add_favorite("user1", &chart("missing")).await.unwrap_err();
  assert!(matches!(err, Error::AssetNotFound(_)));

  // Users are never created implicitly.
  assert!(s.get_user("ghost").await.is_err());
}

#[tokio::test]
async fn add_favorite_links_the_stored_asset() {
  let s = store_with_users(&["user1"]).await;
  let mut stored = Chart::new("chart1", "Stored");
  stored.meta.description = "canonical".into();
  s.create_asset(stored.into()).await.unwrap();

  s.add_favorite("user1", &Asset::from(Chart::new("chart1", "Caller copy")))
    .await
    .unwrap();

  let favs = s.get_user_favorites("user1", 10, 0).await.unwrap();
  assert_eq!(favs[0].asset.description(), "canonical");
}

#[tokio::test]
async fn remove_favorite_errors() {
  let s = store_with_users(&["user1"]).await;

  let err = s.remove_favorite("ghost", "chart1").await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));

  let err = s.remove_favorite("user1", "chart1").await.unwrap_err();
  assert!(matches!(err, Error::FavoriteNotFound { .. }));
}

#[tokio::test]
async fn unknown_user_asymmetry() {
  let s = MemoryStore::new();
  assert!(!s.is_favorite("nosuch", "x").await.unwrap());
  assert_eq!(s.get_favorite_count("nosuch").await.unwrap(), 0);

  let err = s.get_user_favorites("nosuch", 10, 0).await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn favorites_page_in_insertion_order() {
  let s = store_with_users(&["user1"]).await;
  favorite(&s, "user1", chart("c")).await;
  favorite(&s, "user1", Insight::new("a", "content").into()).await;
  favorite(&s, "user1", Audience::new("b").into()).await;

  let page = s.get_user_favorites("user1", 2, 1).await.unwrap();
  let ids: Vec<_> = page.iter().map(|f| f.asset_id.as_str()).collect();
  assert_eq!(ids, ["a", "b"]);

  assert!(s.get_user_favorites("user1", 10, 3).await.unwrap().is_empty());
  assert!(s.get_user_favorites("user1", 10, 50).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_asset_cascades_to_every_favorite() {
  let s = store_with_users(&["user1", "user2"]).await;
  favorite(&s, "user1", chart("chart1")).await;
  favorite(&s, "user2", chart("chart1")).await;

  let mut edited = Arc::unwrap_or_clone(s.get_asset("chart1").await.unwrap());
  edited.set_description("Quarterly");
  s.update_asset(edited).await.unwrap();

  for user in ["user1", "user2"] {
    let favs = s.get_user_favorites(user, 10, 0).await.unwrap();
    assert_eq!(favs[0].asset.description(), "Quarterly", "stale for {user}");
    assert!(favs[0].updated_at >= favs[0].added_at);
  }
  assert_eq!(s.get_asset("chart1").await.unwrap().description(), "Quarterly");
}

#[tokio::test]
async fn delete_asset_cascades_to_every_favorite() {
  let s = store_with_users(&["user1", "user2"]).await;
  favorite(&s, "user1", chart("chart1")).await;
  favorite(&s, "user2", chart("chart1")).await;
  favorite(&s, "user2", chart("chart2")).await;

  s.delete_asset("chart1").await.unwrap();

  assert!(!s.is_favorite("user1", "chart1").await.unwrap());
  assert!(!s.is_favorite("user2", "chart1").await.unwrap());
  assert!(s.get_user_favorites("user1", 10, 0).await.unwrap().is_empty());
  assert_eq!(s.get_favorite_count("user2").await.unwrap(), 1);
  assert!(matches!(
    s.delete_asset("chart1").await.unwrap_err(),
    Error::AssetNotFound(_)
  ));
}

#[tokio::test]
async fn update_favorite_asset_is_scoped_to_one_user() {
  let s = store_with_users(&["user1", "user2"]).await;
  favorite(&s, "user1", chart("chart1")).await;
  favorite(&s, "user2", chart("chart1")).await;

  let mut edited = Chart::new("chart1", "Sales");
  edited.meta.description = "only mine".into();
  s.update_favorite_asset("user1", "chart1", edited.into())
    .await
    .unwrap();

  let mine = s.get_user_favorites("user1", 10, 0).await.unwrap();
  let theirs = s.get_user_favorites("user2", 10, 0).await.unwrap();
  assert_eq!(mine[0].asset.description(), "only mine");
  assert_eq!(theirs[0].asset.description(), "");
  assert_eq!(s.get_asset("chart1").await.unwrap().description(), "");
}

#[tokio::test]
async fn update_favorite_asset_errors() {
  let s = store_with_users(&["user1"]).await;

  let err = s
    .update_favorite_asset("ghost", "chart1", chart("chart1"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));

  let err = s
    .update_favorite_asset("user1", "chart1", chart("chart1"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::FavoriteNotFound { .. }));
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_lose_nothing() {
  const N: usize = 64;
  let s = store_with_users(&["user1"]).await;

  let handles: Vec<_> = (0..N)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        let asset = chart(&format!("chart{i}"));
        s.create_asset(asset.clone()).await.unwrap();
        s.add_favorite("user1", &asset).await.unwrap();
      })
    })
    .collect();
  for h in handles {
    h.await.unwrap();
  }

  assert_eq!(s.get_favorite_count("user1").await.unwrap(), N);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_adds_admit_exactly_one() {
  let s = store_with_users(&["user1"]).await;
  s.create_asset(chart("chart1")).await.unwrap();

  let handles: Vec<_> = (0..16)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move { s.add_favorite("user1", &chart("chart1")).await })
    })
    .collect();

  let mut ok = 0;
  for h in handles {
    match h.await.unwrap() {
      Ok(()) => ok += 1,
      Err(e) => assert!(matches!(e, Error::FavoriteAlreadyExists { .. })),
    }
  }
  assert_eq!(ok, 1);
  assert_eq!(s.get_favorite_count("user1").await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_see_a_partial_cascade() {
  let s = store_with_users(&["user1", "user2"]).await;
  favorite(&s, "user1", chart("chart1")).await;
  favorite(&s, "user2", chart("chart1")).await;

  let writer = {
    let s = s.clone();
    tokio::spawn(async move {
      for n in 0..200 {
        let mut edited =
          Arc::unwrap_or_clone(s.get_asset("chart1").await.unwrap());
        edited.set_description(format!("v{n}"));
        s.update_asset(edited).await.unwrap();
      }
    })
  };

  // "" before the first edit, then "v0", "v1", ...
  fn version(asset: &Asset) -> i64 {
    asset
      .description()
      .strip_prefix('v')
      .map_or(-1, |n| n.parse().unwrap())
  }

  // Versions only move forward: each read is no newer than any read taken
  // after it, whichever record it came from.
  let mut last = -1;
  for _ in 0..200 {
    let a = s.get_user_favorites("user1", 1, 0).await.unwrap();
    let b = s.get_user_favorites("user2", 1, 0).await.unwrap();
    let table = s.get_asset("chart1").await.unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);

    let (va, vb, vt) =
      (version(&a[0].asset), version(&b[0].asset), version(&table));
    assert!(last <= va, "user1 went back from v{last} to v{va}");
    assert!(va <= vb, "user2 saw v{vb}, older than user1's v{va}");
    assert!(vb <= vt, "table at v{vt}, older than user2's v{vb}");
    last = vt;
    tokio::task::yield_now().await;
  }
  writer.await.unwrap();

  let a = s.get_user_favorites("user1", 1, 0).await.unwrap();
  let b = s.get_user_favorites("user2", 1, 0).await.unwrap();
  let table = s.get_asset("chart1").await.unwrap();
  assert_eq!(a[0].asset.description(), "v199");
  assert_eq!(b[0].asset.description(), "v199");
  assert!(Arc::ptr_eq(&a[0].asset, &table));
  assert!(Arc::ptr_eq(&b[0].asset, &table));
}
