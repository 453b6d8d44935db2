//! Sample users and assets for a fresh in-memory store.

use favs_core::{
  Error,
  asset::{Asset, AssetMeta, Audience, Chart, DataPoint, Insight},
  store::FavoritesStore,
  user::User,
};

pub fn sample_users() -> Vec<User> {
  vec![
    User::with_profile("user1", "john@example.com", "John Doe"),
    User::with_profile("user2", "jane@example.com", "Jane Smith"),
    User::with_profile("user3", "bob@example.com", "Bob Johnson"),
  ]
}

pub fn sample_assets() -> Vec<Asset> {
  let chart = Chart {
    meta:         AssetMeta::new("chart1", "Sales performance chart"),
    title:        "Monthly Sales".into(),
    x_axis_title: "Month".into(),
    y_axis_title: "Sales ($)".into(),
    data_points:  vec![
      DataPoint::new("Jan", 100),
      DataPoint::new("Feb", 150),
      DataPoint::new("Mar", 200),
    ],
  };

  let insight = Insight {
    meta:     AssetMeta::new("insight1", "Social media usage insight"),
    content:  "40% of millennials spend more than 3 hours on social media daily"
      .into(),
    tags:     vec!["social".into(), "millennials".into()],
    category: Some("demographics".into()),
  };

  let audience = Audience {
    meta:                 AssetMeta::new(
      "audience1",
      "Gaming enthusiasts aged 24-35",
    ),
    gender:               vec!["Male".into(), "Female".into()],
    birth_countries:      vec!["US".into(), "UK".into(), "CA".into()],
    age_groups:           vec!["24-35".into()],
    social_media_hours:   Some("3+".into()),
    purchases_last_month: Some(5),
  };

  vec![chart.into(), insight.into(), audience.into()]
}

/// Provision the sample data. Individual failures are logged and skipped.
pub async fn seed<S>(store: &S)
where
  S: FavoritesStore<Error = Error>,
{
  tracing::info!("seeding sample data");

  for user in sample_users() {
    let user_id = user.id.clone();
    if let Err(e) = store.create_user(user).await {
      tracing::error!(error = %e, user_id = %user_id, "failed to create sample user");
    }
  }

  for asset in sample_assets() {
    let asset_id = asset.id().to_owned();
    if let Err(e) = store.create_asset(asset).await {
      tracing::error!(error = %e, asset_id = %asset_id, "failed to create sample asset");
    }
  }

  tracing::info!("sample data seeded");
}
