use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

pub const ORDER_ID_KEY: &str = "orderId";
pub const PROCESSED_AT_KEY: &str = "processedAt";

/// Destination for enriched order records.
#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait DeliveryStream: Debug {
    /// Submits a single record and returns the identifier the stream assigned to it.
    async fn put_record(&self, data: Vec<u8>) -> Result<String, String>;
}

/// The event bus envelope. Only `detail` is interpreted, everything else is kept for logging.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OrderEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(flatten)]
    pub envelope: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Missing,
    Single(Value),
    Many(Vec<Value>),
}

impl From<Option<Value>> for Detail {
    fn from(detail: Option<Value>) -> Self {
        match detail {
            None | Some(Value::Null) => Detail::Missing,
            Some(Value::Array(values)) if values.is_empty() => Detail::Missing,
            Some(Value::Array(values)) => Detail::Many(values),
            Some(value) => Detail::Single(value),
        }
    }
}

impl Detail {
    /// Flattens the detail into the ordered list of records to process.
    /// A missing or empty detail still yields one (null) candidate so that it fails validation.
    pub fn into_candidates(self) -> Vec<Value> {
        match self {
            Detail::Missing => vec![Value::Null],
            Detail::Single(value) => vec![value],
            Detail::Many(values) => values,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("record {index} is missing orderId")]
    InvalidRecord { index: usize },
    #[error("record {index} could not be serialized: {source}")]
    Serialization {
        index: usize,
        source: serde_json::Error,
    },
    #[error("record {index} could not be delivered: {message}")]
    Delivery { index: usize, message: String },
}

impl OrderError {
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::MalformedRecord { .. } => "malformed_record",
            OrderError::InvalidRecord { .. } => "invalid_record",
            OrderError::Serialization { .. } => "serialization",
            OrderError::Delivery { .. } => "delivery",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            OrderError::MalformedRecord { index, .. }
            | OrderError::InvalidRecord { index }
            | OrderError::Serialization { index, .. }
            | OrderError::Delivery { index, .. } => *index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderRecord(Map<String, Value>);

impl OrderRecord {
    /// Resolves a candidate into a JSON object. Strings are decoded as JSON documents.
    pub fn parse(index: usize, candidate: Value) -> Result<Self, OrderError> {
        match candidate {
            Value::Object(fields) => Ok(Self(fields)),
            Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(fields)) => Ok(Self(fields)),
                Ok(other) => Err(OrderError::MalformedRecord {
                    index,
                    reason: format!("expected a JSON object, found {}", json_type(&other)),
                }),
                Err(e) => Err(OrderError::MalformedRecord {
                    index,
                    reason: e.to_string(),
                }),
            },
            Value::Null => Err(OrderError::InvalidRecord { index }),
            other => Err(OrderError::MalformedRecord {
                index,
                reason: format!(
                    "expected an object or a JSON string, found {}",
                    json_type(&other)
                ),
            }),
        }
    }

    pub fn validate(&self, index: usize) -> Result<(), OrderError> {
        match self.order_id() {
            Some(_) => Ok(()),
            None => Err(OrderError::InvalidRecord { index }),
        }
    }

    pub fn order_id(&self) -> Option<&Value> {
        self.0.get(ORDER_ID_KEY).filter(|value| !value.is_null())
    }

    pub fn processed_at(&self) -> Option<&str> {
        self.0.get(PROCESSED_AT_KEY).and_then(Value::as_str)
    }

    pub fn enrich(&mut self, request_id: &str) {
        self.0.insert(
            PROCESSED_AT_KEY.to_string(),
            Value::String(request_id.to_string()),
        );
    }

    /// Newline delimited JSON, the framing the analytics sink expects.
    pub fn to_delivery_record(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut data = serde_json::to_vec(&self.0)?;
        data.push(b'\n');
        Ok(data)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
