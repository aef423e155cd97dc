//! The hand-off point between render reducers and the GPU backend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::batch::RenderBatch;

/// Accepts batches for the current frame.
///
/// Takes `&self` so reducers can enqueue through a shared environment.
pub trait RendererSink {
    fn enqueue(&self, batches: Vec<RenderBatch>);
}

impl<T: RendererSink + ?Sized> RendererSink for Arc<T> {
    fn enqueue(&self, batches: Vec<RenderBatch>) {
        (**self).enqueue(batches);
    }
}

/// Collects batches until the backend drains them.
#[derive(Debug, Default)]
pub struct RenderQueue {
    batches: Mutex<Vec<RenderBatch>>,
}

impl RenderQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RenderBatch>> {
        self.batches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Take every queued batch in submission order.
    #[must_use]
    pub fn drain(&self) -> Vec<RenderBatch> {
        std::mem::take(&mut *self.lock())
    }

    /// Take every queued batch ordered by z-index. Batches with equal
    /// z-index keep submission order.
    #[must_use]
    pub fn drain_sorted(&self) -> Vec<RenderBatch> {
        let mut batches = self.drain();
        batches.sort_by_key(|batch| batch.z_index);
        batches
    }
}

impl RendererSink for RenderQueue {
    fn enqueue(&self, batches: Vec<RenderBatch>) {
        trace!(count = batches.len(), "batches enqueued");
        self.lock().extend(batches);
    }
}

#[cfg(test)]
mod tests {
    use redecs_math::Mat3;

    use super::*;
    use crate::batch::{Color, FragmentType};

    fn batch(z_index: i32, tag: f32) -> RenderBatch {
        RenderBatch {
            triangles: Vec::new(),
            transform: Mat3::IDENTITY,
            fragment: FragmentType::Color(Color::rgb(tag, 0.0, 0.0)),
            z_index,
        }
    }

    #[test]
    fn test_drain_empties_queue() {
        let queue = RenderQueue::new();
        queue.enqueue(vec![batch(0, 0.1), batch(0, 0.2)]);
        queue.enqueue(vec![batch(0, 0.3)]);
        assert_eq!(queue.len(), 3);

        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(drained[2], batch(0, 0.3));
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_drain_sorted_is_stable() {
        let queue = Arc::new(RenderQueue::new());
        let sink: &dyn RendererSink = &queue;
        sink.enqueue(vec![batch(2, 0.1), batch(1, 0.2), batch(2, 0.3), batch(-1, 0.4)]);

        let order: Vec<(i32, FragmentType)> = queue
            .drain_sorted()
            .into_iter()
            .map(|b| (b.z_index, b.fragment))
            .collect();
        assert_eq!(
            order,
            vec![
                (-1, FragmentType::Color(Color::rgb(0.4, 0.0, 0.0))),
                (1, FragmentType::Color(Color::rgb(0.2, 0.0, 0.0))),
                (2, FragmentType::Color(Color::rgb(0.1, 0.0, 0.0))),
                (2, FragmentType::Color(Color::rgb(0.3, 0.0, 0.0))),
            ]
        );
    }
}
