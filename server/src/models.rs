use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// A shortened link record from the `urls` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LinkMapping {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
}

/// Body of `POST /shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Response of `POST /shorten`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

/// Query string of `GET /list`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// Serializes as a JSON object `{ code: url, ... }` that keeps the
/// store's ordering (most recent first) instead of sorting the keys.
#[derive(Debug)]
pub struct RecentLinks(pub Vec<LinkMapping>);

impl Serialize for RecentLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(&link.short_code, &link.original_url)?;
        }
        map.end()
    }
}
