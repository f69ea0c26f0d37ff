use std::fmt;

use serde_json::{Map, Number, Value};
use shared::types::{Result, StylistError};

/// A validated, non-empty shopping query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trims the input and rejects it when nothing is left.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(StylistError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }
}

/// Product price kept as the text the index sent, so it renders unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price(String);

impl Price {
    /// Accepts numeric text such as `"34.50"`, keeping it as written.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|_| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Number> for Price {
    fn from(number: &Number) -> Self {
        Self(number.to_string())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product returned by the vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: String,
    pub score: f32,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub description: String,
    pub url: String,
}

/// Records in the order the index returned them.
pub type MatchList = Vec<MatchRecord>;

impl MatchRecord {
    /// Builds a record from index metadata.
    ///
    /// `name`, `category`, `price` and `url` are required; `description`
    /// falls back to an empty string when absent or null. `price` may be a
    /// JSON number or a numeric string.
    pub fn from_metadata(id: &str, score: f32, metadata: Option<&Map<String, Value>>) -> Result<Self> {
        let metadata = metadata.ok_or_else(|| malformed(id, "metadata"))?;

        let description = match metadata.get("description") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(malformed(id, "description")),
        };

        Ok(Self {
            id: id.to_string(),
            score,
            name: required_str(metadata, id, "name")?,
            category: required_str(metadata, id, "category")?,
            price: required_price(metadata, id)?,
            description,
            url: required_str(metadata, id, "url")?,
        })
    }
}

fn malformed(id: &str, field: &'static str) -> StylistError {
    StylistError::MalformedRecord {
        id: id.to_string(),
        field,
    }
}

fn required_str(metadata: &Map<String, Value>, id: &str, field: &'static str) -> Result<String> {
    metadata
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| malformed(id, field))
}

fn required_price(metadata: &Map<String, Value>, id: &str) -> Result<Price> {
    match metadata.get("price") {
        Some(Value::Number(n)) => Ok(Price::from(n)),
        Some(Value::String(s)) => Price::parse(s).ok_or_else(|| malformed(id, "price")),
        _ => Err(malformed(id, "price")),
    }
}

/// Prose handed back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylistResponse(String);

impl StylistResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StylistResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
