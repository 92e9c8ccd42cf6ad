//! In-memory sink

use super::{Publisher, TransportError};

/// A message captured by [`MemoryPublisher`]
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    /// Destination topic
    pub topic: String,
    /// JSON payload
    pub payload: String,
    /// Whether the message was marked retained
    pub retain: bool,
}

impl PublishedMessage {
    /// Parse the payload as JSON
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.payload)
    }
}

/// Keeps every published message in memory
///
/// A disconnected publisher rejects messages with
/// [`TransportError::Disconnected`].
#[derive(Debug, Clone)]
pub struct MemoryPublisher {
    messages: Vec<PublishedMessage>,
    connected: bool,
    flushes: usize,
}

impl Default for MemoryPublisher {
    fn default() -> Self {
        Self { messages: Vec::new(), connected: true, flushes: 0 }
    }
}

impl MemoryPublisher {
    /// Create a connected, empty publisher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a publisher that rejects every message
    pub fn disconnected() -> Self {
        Self { connected: false, ..Self::default() }
    }

    /// Change the connection state
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// All captured messages in publish order
    pub fn messages(&self) -> &[PublishedMessage] {
        &self.messages
    }

    /// Messages published to exactly `topic`
    pub fn on_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a PublishedMessage> + 'a {
        self.messages.iter().filter(move |message| message.topic == topic)
    }

    /// Messages whose topic starts with `prefix`
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a PublishedMessage> + 'a {
        self.messages.iter().filter(move |message| message.topic.starts_with(prefix))
    }

    /// Latest message on a topic, as a retained subscriber would see it
    pub fn retained(&self, topic: &str) -> Option<&PublishedMessage> {
        self.messages.iter().rev().find(|message| message.retain && message.topic == topic)
    }

    /// Number of times `flush` was called
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Drop all captured messages
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Publisher for MemoryPublisher {
    fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::Disconnected);
        }
        self.messages.push(PublishedMessage { topic: topic.to_string(), payload: payload.to_string(), retain });
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_filter() {
        let mut publisher = MemoryPublisher::new();
        publisher.publish("rtls/location/a", r#"{"n":1}"#, true).unwrap();
        publisher.publish("rtls/location/b", r#"{"n":2}"#, true).unwrap();
        publisher.publish("rtls/location/a", r#"{"n":3}"#, true).unwrap();
        publisher.publish("rtls/alerts", r#"{"n":4}"#, false).unwrap();

        assert_eq!(publisher.messages().len(), 4);
        assert_eq!(publisher.on_topic("rtls/location/a").count(), 2);
        assert_eq!(publisher.with_prefix("rtls/location/").count(), 3);
        assert_eq!(publisher.retained("rtls/location/a").unwrap().json().unwrap()["n"], 3);
        assert!(publisher.retained("rtls/alerts").is_none());
    }

    #[test]
    fn test_disconnected_rejects() {
        let mut publisher = MemoryPublisher::disconnected();
        assert!(!publisher.is_connected());
        assert!(matches!(publisher.publish("t", "{}", false), Err(TransportError::Disconnected)));
        assert!(publisher.messages().is_empty());

        publisher.set_connected(true);
        assert!(publisher.publish("t", "{}", false).is_ok());
    }
}
