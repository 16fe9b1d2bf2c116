//! Payload builders shaped like the Battle.net game-data responses.

use serde_json::{Map, Value, json};

/// A single realm entry used to build index payloads.
#[derive(Debug, Clone)]
pub struct RealmFixture {
    /// Numeric realm identifier.
    pub id: u32,
    /// URL-safe realm slug.
    pub slug: String,
    /// Localized names as `(locale, name)` pairs.
    pub names: Vec<(String, String)>,
}

impl RealmFixture {
    /// Start a fixture with no localized names.
    #[must_use]
    pub fn new(id: u32, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            names: Vec::new(),
        }
    }

    /// Add a localized name.
    #[must_use]
    pub fn name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.push((locale.into(), name.into()));
        self
    }

    /// Realm carrying the same display name under every locale the aggregator reads.
    #[must_use]
    pub fn uniform(id: u32, slug: impl Into<String>, name: &str) -> Self {
        Self::new(id, slug)
            .name("en_US", name)
            .name("pt_BR", name)
            .name("ko_KR", name)
            .name("zh_TW", name)
    }

    fn to_value(&self) -> Value {
        let names: Map<String, Value> = self
            .names
            .iter()
            .map(|(locale, name)| (locale.clone(), Value::String(name.clone())))
            .collect();
        json!({
            "key": {
                "href": format!("https://us.api.blizzard.com/data/wow/realm/{}?namespace=dynamic-us", self.id)
            },
            "name": names,
            "id": self.id,
            "slug": self.slug,
        })
    }
}

/// Build a realm-index response body with `_links` noise around the realms array.
#[must_use]
pub fn realm_index_payload(realms: &[RealmFixture]) -> Vec<u8> {
    realm_index_value(realms).to_string().into_bytes()
}

/// Same as [`realm_index_payload`] but as a JSON value, for mock servers.
#[must_use]
pub fn realm_index_value(realms: &[RealmFixture]) -> Value {
    json!({
        "_links": {
            "self": { "href": "https://us.api.blizzard.com/data/wow/realm/?namespace=dynamic-us" }
        },
        "realms": realms.iter().map(RealmFixture::to_value).collect::<Vec<_>>(),
    })
}

/// Legacy realm-status body, where `name` is a plain string.
#[must_use]
pub fn realm_status_value() -> Value {
    json!({
        "realms": [
            {
                "type": "pvp",
                "population": "high",
                "queue": false,
                "status": true,
                "name": "Stormrage",
                "slug": "stormrage",
                "battlegroup": "Bloodlust",
                "locale": "en_US",
                "timezone": "America/New_York",
                "connected_realms": ["stormrage"]
            }
        ]
    })
}

/// Successful client-credentials response.
#[must_use]
pub fn token_value(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 86_399,
        "sub": "fixture-client"
    })
}
