//! Asset types — the things a user can favorite.
//!
//! The set of asset kinds is closed: a chart, an insight, or an audience.
//! Payloads arriving from outside carry a `type` discriminator and are
//! decoded with [`Asset::from_payload`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The discriminator carried in the `type` field of every asset payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  Chart,
  Insight,
  Audience,
}

impl AssetKind {
  /// Must match the `rename_all = "lowercase"` serde tags.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Chart => "chart",
      Self::Insight => "insight",
      Self::Audience => "audience",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "chart" => Some(Self::Chart),
      "insight" => Some(Self::Insight),
      "audience" => Some(Self::Audience),
      _ => None,
    }
  }
}

impl fmt::Display for AssetKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Shared fields ───────────────────────────────────────────────────────────

/// Fields every asset kind carries.
///
/// Timestamps absent from a payload deserialise to the Unix epoch and are
/// stamped by [`Asset::from_payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMeta {
  /// Caller-supplied; immutable once the asset is stored.
  #[serde(default, deserialize_with = "null_as_default")]
  pub id:          String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub description: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub created_at:  DateTime<Utc>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub updated_at:  DateTime<Utc>,
}

impl AssetMeta {
  pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
    let now = Utc::now();
    Self {
      id:          id.into(),
      description: description.into(),
      created_at:  now,
      updated_at:  now,
    }
  }
}

// ─── Chart ───────────────────────────────────────────────────────────────────

/// A loosely-typed chart coordinate: either a number or a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartValue {
  Number(serde_json::Number),
  Text(String),
}

impl From<i64> for ChartValue {
  fn from(n: i64) -> Self { Self::Number(n.into()) }
}

impl From<&str> for ChartValue {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
  pub x: ChartValue,
  pub y: ChartValue,
}

impl DataPoint {
  pub fn new(x: impl Into<ChartValue>, y: impl Into<ChartValue>) -> Self {
    Self {
      x: x.into(),
      y: y.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
  #[serde(flatten)]
  pub meta:         AssetMeta,
  /// Required; see [`Asset::validate`].
  #[serde(default, deserialize_with = "null_as_default")]
  pub title:        String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub x_axis_title: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub y_axis_title: String,
  /// Points in plotting order.
  #[serde(default, deserialize_with = "null_as_default", rename = "data")]
  pub data_points:  Vec<DataPoint>,
}

impl Chart {
  pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      meta:         AssetMeta::new(id, ""),
      title:        title.into(),
      x_axis_title: String::new(),
      y_axis_title: String::new(),
      data_points:  Vec::new(),
    }
  }
}

// ─── Insight ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
  #[serde(flatten)]
  pub meta:     AssetMeta,
  /// Required; see [`Asset::validate`].
  #[serde(default, deserialize_with = "null_as_default")]
  pub content:  String,
  #[serde(
    default,
    deserialize_with = "null_as_default",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub tags:     Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

impl Insight {
  pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
    Self {
      meta:     AssetMeta::new(id, ""),
      content:  content.into(),
      tags:     Vec::new(),
      category: None,
    }
  }
}

// ─── Audience ────────────────────────────────────────────────────────────────

/// A demographic segment. Every characteristic is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audience {
  #[serde(flatten)]
  pub meta:                 AssetMeta,
  #[serde(
    default,
    deserialize_with = "null_as_default",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub gender:               Vec<String>,
  #[serde(
    default,
    deserialize_with = "null_as_default",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub birth_countries:      Vec<String>,
  #[serde(
    default,
    deserialize_with = "null_as_default",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub age_groups:           Vec<String>,
  /// Bucketed daily hours, e.g. `"3+"`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub social_media_hours:   Option<String>,
  /// Kept signed so any integer a client sends decodes; negatives are stored
  /// as given.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub purchases_last_month: Option<i64>,
}

impl Audience {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      meta:                 AssetMeta::new(id, ""),
      gender:               Vec::new(),
      birth_countries:      Vec::new(),
      age_groups:           Vec::new(),
      social_media_hours:   None,
      purchases_last_month: None,
    }
  }
}

// ─── Asset ───────────────────────────────────────────────────────────────────

/// A favoritable asset. Serialises with a `type` discriminator alongside the
/// variant's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Asset {
  Chart(Chart),
  Insight(Insight),
  Audience(Audience),
}

impl Asset {
  /// Decode an untyped payload, dispatching on its `type` field.
  ///
  /// A missing or unrecognised discriminator is [`Error::InvalidAssetType`];
  /// a recognised type whose fields do not decode is [`Error::Decode`].
  /// Absent timestamps are stamped with the current time. The result is not
  /// validated; call [`Asset::validate`] for that.
  pub fn from_payload(payload: Value) -> Result<Self> {
    let Value::Object(fields) = &payload else {
      return Err(Error::InvalidInput(
        "asset payload must be a JSON object".into(),
      ));
    };

    let kind = match fields.get("type") {
      Some(Value::String(tag)) => AssetKind::parse(tag)
        .ok_or_else(|| Error::InvalidAssetType(Some(tag.clone())))?,
      Some(other) => return Err(Error::InvalidAssetType(Some(other.to_string()))),
      None => return Err(Error::InvalidAssetType(None)),
    };

    let mut asset = match kind {
      AssetKind::Chart => Self::Chart(serde_json::from_value(payload)?),
      AssetKind::Insight => Self::Insight(serde_json::from_value(payload)?),
      AssetKind::Audience => Self::Audience(serde_json::from_value(payload)?),
    };
    asset.stamp_missing_timestamps(Utc::now());
    Ok(asset)
  }

  /// Parse raw JSON bytes and decode with [`Asset::from_payload`].
  pub fn from_json(bytes: &[u8]) -> Result<Self> {
    Self::from_payload(serde_json::from_slice(bytes)?)
  }

  fn stamp_missing_timestamps(&mut self, now: DateTime<Utc>) {
    let meta = self.meta_mut();
    if meta.created_at == DateTime::<Utc>::default() {
      meta.created_at = now;
    }
    if meta.updated_at < meta.created_at {
      meta.updated_at = meta.created_at;
    }
  }

  pub fn meta(&self) -> &AssetMeta {
    match self {
      Self::Chart(c) => &c.meta,
      Self::Insight(i) => &i.meta,
      Self::Audience(a) => &a.meta,
    }
  }

  fn meta_mut(&mut self) -> &mut AssetMeta {
    match self {
      Self::Chart(c) => &mut c.meta,
      Self::Insight(i) => &mut i.meta,
      Self::Audience(a) => &mut a.meta,
    }
  }

  pub fn id(&self) -> &str { &self.meta().id }

  pub fn kind(&self) -> AssetKind {
    match self {
      Self::Chart(_) => AssetKind::Chart,
      Self::Insight(_) => AssetKind::Insight,
      Self::Audience(_) => AssetKind::Audience,
    }
  }

  pub fn description(&self) -> &str { &self.meta().description }

  /// Replace the description and refresh `updated_at` to now.
  pub fn set_description(&mut self, description: impl Into<String>) {
    let meta = self.meta_mut();
    meta.description = description.into();
    meta.updated_at = Utc::now().max(meta.created_at);
  }

  pub fn created_at(&self) -> DateTime<Utc> { self.meta().created_at }

  pub fn updated_at(&self) -> DateTime<Utc> { self.meta().updated_at }

  pub fn set_updated_at(&mut self, at: DateTime<Utc>) {
    self.meta_mut().updated_at = at;
  }

  /// Check the per-kind required fields and timestamp ordering.
  pub fn validate(&self) -> Result<()> {
    if self.id().is_empty() {
      return Err(Error::MissingRequiredField("id"));
    }
    match self {
      Self::Chart(c) if c.title.is_empty() => {
        return Err(Error::MissingRequiredField("title"));
      }
      Self::Insight(i) if i.content.is_empty() => {
        return Err(Error::MissingRequiredField("content"));
      }
      _ => {}
    }
    if self.updated_at() < self.created_at() {
      return Err(Error::InvalidInput(format!(
        "asset {} was updated before it was created",
        self.id()
      )));
    }
    Ok(())
  }
}

impl From<Chart> for Asset {
  fn from(c: Chart) -> Self { Self::Chart(c) }
}

impl From<Insight> for Asset {
  fn from(i: Insight) -> Self { Self::Insight(i) }
}

impl From<Audience> for Asset {
  fn from(a: Audience) -> Self { Self::Audience(a) }
}
