//! Firestore-backed [`DocumentStore`] over the REST API.
//!
//! Firestore documents carry typed field values (`{"stringValue": ...}`,
//! `{"mapValue": ...}`, ...) rather than plain JSON, so this module is
//! two things: a thin reqwest client for the documents endpoints and the
//! codec between `serde_json::Value` and Firestore's value encoding.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::error::StoreError;
use crate::remote::{Document, DocumentStore};

/// Documents fetched per page when listing a collection.
const PAGE_SIZE: usize = 300;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Credentials for the studio's Firestore project.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
}

impl FirestoreConfig {
    /// Read credentials from `FIRESTORE_PROJECT_ID` / `FIRESTORE_API_KEY`.
    ///
    /// Returns `None` when either is unset or blank: running without a
    /// remote store is a supported mode, detected here rather than failed
    /// on.
    pub fn from_env() -> Option<Self> {
        let project_id = std::env::var("FIRESTORE_PROJECT_ID").ok()?;
        let api_key = std::env::var("FIRESTORE_API_KEY").ok()?;
        if project_id.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }
        Some(Self {
            project_id,
            api_key,
        })
    }
}

// ---------------------------------------------------------------------------
// FirestoreStore
// ---------------------------------------------------------------------------

/// REST client for one Firestore database.
pub struct FirestoreStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Self {
        let base_url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
            config.project_id
        );
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: config.api_key,
        }
    }

    /// Check an API response, turning a non-success status into
    /// [`StoreError::Rejected`] with the body as the message.
    async fn into_body(response: reqwest::Response) -> Result<Value, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/{collection}?pageSize={PAGE_SIZE}&key={}",
                self.base_url, self.api_key
            );
            if let Some(token) = &page_token {
                url.push_str(&format!("&pageToken={token}"));
            }

            let body = Self::into_body(self.http.get(&url).send().await?).await?;

            // An empty collection returns `{}` with no `documents` key.
            if let Some(page) = body.get("documents").and_then(Value::as_array) {
                for raw in page {
                    documents.push(decode_document(raw)?);
                }
            }

            match body.get("nextPageToken").and_then(Value::as_str) {
                Some(token) => page_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(documents)
    }

    async fn upsert(
        &self,
        collection: &str,
        id: Option<&str>,
        fields: &Value,
    ) -> Result<String, StoreError> {
        let body = json!({ "fields": encode_fields(fields)? });

        let response = match id {
            Some(id) => {
                let url = format!("{}/{collection}/{id}?key={}", self.base_url, self.api_key);
                self.http.patch(&url).json(&body).send().await?
            }
            None => {
                let url = format!("{}/{collection}?key={}", self.base_url, self.api_key);
                self.http.post(&url).json(&body).send().await?
            }
        };

        let document = Self::into_body(response).await?;
        let name = document
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Malformed("Document response without a name".into()))?;
        Ok(id_from_name(name).to_string())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{collection}/{id}?key={}", self.base_url, self.api_key);
        Self::into_body(self.http.delete(&url).send().await?).await?;
        Ok(())
    }
}

/// The document id is the last segment of the full resource name
/// (`projects/<p>/databases/(default)/documents/<collection>/<id>`).
fn id_from_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn decode_document(raw: &Value) -> Result<Document, StoreError> {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Malformed("Document without a name".into()))?;

    let fields = match raw.get("fields") {
        Some(fields) => decode_fields(fields)?,
        None => Value::Object(Map::new()),
    };

    Ok(Document {
        id: id_from_name(name).to_string(),
        fields,
    })
}

// ---------------------------------------------------------------------------
// Value codec
// ---------------------------------------------------------------------------

/// Encode a JSON object into a Firestore `fields` map.
fn encode_fields(value: &Value) -> Result<Value, StoreError> {
    let obj = value
        .as_object()
        .ok_or_else(|| StoreError::Malformed("Document fields must be a JSON object".into()))?;

    let mut fields = Map::new();
    for (key, value) in obj {
        fields.insert(key.clone(), encode_value(value));
    }
    Ok(Value::Object(fields))
}

/// Encode one JSON value into a Firestore typed value.
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            // Firestore separates integers (serialized as strings) from
            // doubles.
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let mut fields = Map::new();
            for (key, value) in map {
                fields.insert(key.clone(), encode_value(value));
            }
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode a Firestore `fields` map back into a JSON object.
fn decode_fields(fields: &Value) -> Result<Value, StoreError> {
    let obj = fields
        .as_object()
        .ok_or_else(|| StoreError::Malformed("`fields` must be an object".into()))?;

    let mut out = Map::new();
    for (key, value) in obj {
        out.insert(key.clone(), decode_value(value)?);
    }
    Ok(Value::Object(out))
}

/// Decode one Firestore typed value into plain JSON.
fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let obj = value
        .as_object()
        .ok_or_else(|| StoreError::Malformed("Typed value must be an object".into()))?;

    let (kind, inner) = obj
        .iter()
        .next()
        .ok_or_else(|| StoreError::Malformed("Typed value without a kind".into()))?;

    Ok(match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.clone(),
        "integerValue" => {
            let raw = inner
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| inner.to_string());
            let parsed: i64 = raw
                .parse()
                .map_err(|_| StoreError::Malformed(format!("Bad integerValue: {raw}")))?;
            Value::from(parsed)
        }
        "doubleValue" => inner.clone(),
        "stringValue" => inner.clone(),
        // Server-set timestamps come back typed; the document layer treats
        // them as RFC 3339 strings.
        "timestampValue" => inner.clone(),
        "arrayValue" => {
            let items = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect::<Result<_, _>>())
                .transpose()?
                .unwrap_or_default();
            Value::Array(items)
        }
        "mapValue" => match inner.get("fields") {
            Some(fields) => decode_fields(fields)?,
            None => Value::Object(Map::new()),
        },
        other => {
            return Err(StoreError::Malformed(format!(
                "Unsupported Firestore value kind: {other}"
            )))
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
