use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// How long a toast stays visible when neither it nor the config says otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Stable identity of a toast, independent of its position in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(pub Uuid);

impl ToastId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastKind::Info => write!(f, "info"),
            ToastKind::Success => write!(f, "success"),
            ToastKind::Warning => write!(f, "warning"),
            ToastKind::Error => write!(f, "error"),
        }
    }
}

/// A transient notification banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    #[serde(default)]
    pub id: ToastId,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: ToastKind,
    /// Per-toast override of the auto-dismiss delay.
    #[serde(default, rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            id: ToastId::new(),
            message: message.into(),
            kind,
            duration_ms: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis() as u64);
        self
    }

    /// Delay before auto-dismiss, falling back to `default`.
    pub fn lifetime(&self, default: Duration) -> Duration {
        self.duration_ms.map(Duration::from_millis).unwrap_or(default)
    }
}

/// Visible toasts in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastQueue(Vec<Toast>);

impl ToastQueue {
    /// Queues `toast` and returns its id. An id that is already queued is
    /// replaced with a fresh one so every visible toast stays addressable.
    pub fn push(&mut self, mut toast: Toast) -> ToastId {
        if self.position(toast.id).is_some() {
            toast.id = ToastId::new();
        }
        let id = toast.id;
        self.0.push(toast);
        id
    }

    /// Removes the toast with `id`. Returns it if it was still visible.
    pub fn remove(&mut self, id: ToastId) -> Option<Toast> {
        let index = self.position(id)?;
        Some(self.0.remove(index))
    }

    /// Positional removal, resolved against the queue as it is now.
    pub fn remove_at(&mut self, index: usize) -> Option<Toast> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn position(&self, id: ToastId) -> Option<usize> {
        self.0.iter().position(|toast| toast.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<ToastId> {
        self.0.get(index).map(|toast| toast.id)
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.0.iter().find(|toast| toast.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(queue: &ToastQueue) -> Vec<ToastKind> {
        queue.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut queue = ToastQueue::default();
        queue.push(Toast::success("saved"));
        queue.push(Toast::error("failed"));
        queue.push(Toast::info("fyi"));

        assert_eq!(
            kinds(&queue),
            vec![ToastKind::Success, ToastKind::Error, ToastKind::Info]
        );
    }

    #[test]
    fn test_remove_by_id_is_stable_across_earlier_removals() {
        let mut queue = ToastQueue::default();
        let first = Toast::info("first");
        let second = Toast::info("second");
        let third = Toast::info("third");
        let (first_id, third_id) = (first.id, third.id);
        queue.push(first);
        queue.push(second);
        queue.push(third);

        queue.remove(first_id);
        let removed = queue.remove(third_id).unwrap();

        assert_eq!(removed.message, "third");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().unwrap().message, "second");
    }

    #[test]
    fn test_push_duplicate_id_gets_fresh_id() {
        let mut queue = ToastQueue::default();
        let first = Toast::info("a");
        let mut second = Toast::info("b");
        second.id = first.id;

        let first_id = queue.push(first);
        let second_id = queue.push(second);

        assert_ne!(first_id, second_id);
        assert_eq!(queue.remove(second_id).unwrap().message, "b");
        assert_eq!(queue.remove(first_id).unwrap().message, "a");
    }

    #[test]
    fn test_deserialize_keeps_explicit_id() {
        let id = ToastId::new();
        let json = format!(r#"{{"id":"{}","message":"hi","duration":1500}}"#, id);
        let toast: Toast = serde_json::from_str(&json).unwrap();

        assert_eq!(toast.id, id);
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.duration_ms, Some(1500));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut queue = ToastQueue::default();
        queue.push(Toast::info("hello"));

        assert!(queue.remove(ToastId::new()).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut queue = ToastQueue::default();
        queue.push(Toast::info("only"));

        assert!(queue.remove_at(3).is_none());
        assert_eq!(queue.remove_at(0).unwrap().message, "only");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_lifetime_prefers_own_duration() {
        let toast = Toast::warning("slow").with_duration(Duration::from_secs(10));
        assert_eq!(toast.lifetime(DEFAULT_TOAST_DURATION), Duration::from_secs(10));
        assert_eq!(
            Toast::warning("default").lifetime(DEFAULT_TOAST_DURATION),
            DEFAULT_TOAST_DURATION
        );
    }

    #[test]
    fn test_deserialize_without_id_assigns_one() {
        let a: Toast = serde_json::from_str(r#"{"message":"hi","type":"success"}"#).unwrap();
        let b: Toast = serde_json::from_str(r#"{"message":"hi","type":"success"}"#).unwrap();

        assert_eq!(a.kind, ToastKind::Success);
        assert_ne!(a.id, b.id);
        assert!(a.duration_ms.is_none());
    }
}
