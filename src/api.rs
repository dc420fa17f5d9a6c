//! Pokémon collection API client

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::state::{Pokemon, PokemonId, PokemonPayload};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin async wrapper over the `/api/pokemon` collection resource
#[derive(Clone, Debug)]
pub struct PokedexClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl PokedexClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET /api/pokemon`
    pub async fn list(&self) -> Result<Vec<Pokemon>, ApiError> {
        let url = self.config.collection_url();
        debug!(%url, "listing pokemon");
        let body: Value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_list(body)
    }

    /// `POST /api/pokemon`. Returns the created record when the server echoes one.
    pub async fn create(&self, payload: &PokemonPayload) -> Result<Option<Pokemon>, ApiError> {
        let url = self.config.collection_url();
        debug!(%url, name = %payload.name, "creating pokemon");
        let bytes = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(parse_record(&bytes))
    }

    /// `PUT /api/pokemon/{id}` with the full record
    pub async fn update(&self, id: &PokemonId, payload: &PokemonPayload) -> Result<(), ApiError> {
        let url = self.config.item_url(&id.to_string());
        debug!(%url, level = payload.level, "updating pokemon");
        self.client
            .put(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `DELETE /api/pokemon/{id}`
    pub async fn delete(&self, id: &PokemonId) -> Result<(), ApiError> {
        let url = self.config.item_url(&id.to_string());
        debug!(%url, "releasing pokemon");
        self.client.delete(url).send().await?.error_for_status()?;
        Ok(())
    }
}

/// Anything other than a JSON array counts as an empty collection.
pub fn parse_list(body: Value) -> Result<Vec<Pokemon>, ApiError> {
    match body {
        Value::Array(_) => Ok(serde_json::from_value(body)?),
        other => {
            warn!(kind = json_kind(&other), "list response is not an array, treating as empty");
            Ok(Vec::new())
        }
    }
}

fn parse_record(bytes: &[u8]) -> Option<Pokemon> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(pokemon) => Some(pokemon),
        Err(error) => {
            debug!(%error, "create response is not a record");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
