//! Per-course serialisation of seat mutations.
//!
//! The engine must execute check–reserve–create (and delete–release) as an
//! uninterrupted sequence per course: two concurrent enrolls for the last
//! seat must not both pass the capacity check. Courses are independent, so
//! one async mutex per course suffices; there is no cross-course ordering.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::course::CourseId;

/// Registry handing out one async mutex per course.
///
/// Entries are created on first use and kept for the lifetime of the map;
/// the population is bounded by the course catalogue.
#[derive(Debug, Default)]
pub struct CourseLockMap {
    locks: Mutex<HashMap<CourseId, Arc<AsyncMutex<()>>>>,
}

impl CourseLockMap {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a course, waiting if another seat mutation for
    /// the same course is in flight.
    pub async fn acquire(&self, course_id: CourseId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(course_id).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn same_course_is_mutually_exclusive() {
        let locks = Arc::new(CourseLockMap::new());
        let course = CourseId::random();
        let counter = Arc::new(AtomicI32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(course).await;
                let seen = counter.fetch_add(1, Ordering::SeqCst);
                // Only one task may be inside the critical section.
                assert_eq!(seen, 0);
                tokio::task::yield_now().await;
                counter.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.expect("task completes");
        }
    }

    #[rstest]
    #[tokio::test]
    async fn different_courses_do_not_block_each_other() {
        let locks = CourseLockMap::new();
        let first = locks.acquire(CourseId::random()).await;
        // A second course's lock must be acquirable while the first is held.
        let second = locks.acquire(CourseId::random()).await;
        drop(first);
        drop(second);
    }
}
