//! Watch-channel backed slot

use crate::SlotError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Create a connected writer/reader pair with an empty slot
pub fn channel<T>() -> (SlotWriter<T>, SlotReader<T>) {
    let (tx, rx) = watch::channel(None);
    let published = Arc::new(AtomicUsize::new(0));
    (
        SlotWriter {
            tx,
            published: Arc::clone(&published),
        },
        SlotReader { rx, published },
    )
}

/// Producer half. Not `Clone`: there is exactly one writer.
pub struct SlotWriter<T> {
    tx: watch::Sender<Option<Arc<T>>>,
    /// Total frames published (for statistics)
    published: Arc<AtomicUsize>,
}

impl<T> SlotWriter<T> {
    /// Replace the slot contents with a new frame
    pub fn publish(&self, frame: T) {
        self.tx.send_replace(Some(Arc::new(frame)));
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    /// Empty the slot (overlay cleared)
    pub fn clear(&self) {
        let previous = self.tx.send_replace(None);
        if previous.is_some() {
            debug!("Frame slot cleared");
        }
    }

    /// Get total frames published
    pub fn total_published(&self) -> usize {
        self.published.load(Ordering::Relaxed)
    }
}

/// Consumer half. Not `Clone`: there is exactly one reader.
pub struct SlotReader<T> {
    rx: watch::Receiver<Option<Arc<T>>>,
    published: Arc<AtomicUsize>,
}

impl<T> SlotReader<T> {
    /// Current frame, without marking it as seen
    pub fn latest(&self) -> Option<Arc<T>> {
        self.rx.borrow().clone()
    }

    /// Current frame, marking it as seen
    pub fn take_latest(&mut self) -> Option<Arc<T>> {
        self.rx.borrow_and_update().clone()
    }

    /// Whether the slot changed since the last `take_latest`/`changed`
    pub fn has_changed(&self) -> Result<bool, SlotError> {
        self.rx.has_changed().map_err(|_| SlotError::Closed)
    }

    /// Wait for the next publish or clear and return the new contents.
    ///
    /// Frames published while the reader was busy are coalesced: only the
    /// newest one is returned.
    pub async fn changed(&mut self) -> Result<Option<Arc<T>>, SlotError> {
        self.rx.changed().await.map_err(|_| SlotError::Closed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Get total frames published by the writer
    pub fn total_published(&self) -> usize {
        self.published.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_read() {
        let (writer, mut reader) = channel::<Vec<u32>>();
        assert!(reader.latest().is_none());
        assert!(!reader.has_changed().unwrap());

        writer.publish(vec![1, 2, 3]);
        assert!(reader.has_changed().unwrap());
        assert_eq!(reader.take_latest().as_deref(), Some(&vec![1, 2, 3]));
        assert!(!reader.has_changed().unwrap());
        assert_eq!(writer.total_published(), 1);
    }

    #[test]
    fn test_newest_frame_wins() {
        let (writer, mut reader) = channel::<u32>();
        for i in 0..10 {
            writer.publish(i);
        }
        assert_eq!(reader.take_latest().as_deref(), Some(&9));
        assert_eq!(reader.total_published(), 10);
    }

    #[test]
    fn test_unchanged_slot_keeps_previous_frame() {
        let (writer, mut reader) = channel::<&'static str>();
        writer.publish("first");
        assert_eq!(reader.take_latest().as_deref(), Some(&"first"));

        // A skipped frame publishes nothing
        assert!(!reader.has_changed().unwrap());
        assert_eq!(reader.latest().as_deref(), Some(&"first"));
    }

    #[test]
    fn test_clear() {
        let (writer, mut reader) = channel::<u32>();
        writer.publish(7);
        reader.take_latest();
        writer.clear();
        assert!(reader.has_changed().unwrap());
        assert!(reader.take_latest().is_none());
    }

    #[test]
    fn test_closed_after_writer_drop() {
        let (writer, reader) = channel::<u32>();
        drop(writer);
        assert_eq!(reader.has_changed(), Err(SlotError::Closed));
    }

    #[test]
    fn test_publish_without_reader() {
        let (writer, reader) = channel::<u32>();
        drop(reader);
        writer.publish(1);
        assert_eq!(writer.total_published(), 1);
    }

    #[tokio::test]
    async fn test_changed_across_tasks() {
        let (writer, mut reader) = channel::<u32>();

        let producer = tokio::spawn(async move {
            writer.publish(42);
            writer
        });

        let frame = reader.changed().await.unwrap();
        assert_eq!(frame.as_deref(), Some(&42));

        let writer = producer.await.unwrap();
        drop(writer);
        assert_eq!(reader.changed().await, Err(SlotError::Closed));
    }
}
