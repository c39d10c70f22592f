use serde_json::Map;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// The variables object sent alongside a document.
pub type JsonMap = Map<String, JsonValue>;

/// The network collaborator: sends one GraphQL document to the service and
/// returns the response's `data` payload.
///
/// Implementations own retry, backoff, authentication and headers; nothing
/// in this crate retries a failed call. Any
/// `Fn(&str, &JsonMap) -> Result<JsonValue, TransportError>` closure is a
/// [`Transport`], which is mostly useful for tests.
pub trait Transport {
    fn execute(
        &self,
        document: &str,
        variables: &JsonMap,
    ) -> Result<JsonValue, TransportError>;
}
impl<F> Transport for F
where
    F: Fn(&str, &JsonMap) -> Result<JsonValue, TransportError>,
{
    fn execute(
        &self,
        document: &str,
        variables: &JsonMap,
    ) -> Result<JsonValue, TransportError> {
        self(document, variables)
    }
}

/// A failed transport call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}
impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
