use std::future::Future;

use tokio::task::JoinSet;

/// A one-shot parallel task group.
///
/// Each task is registered with the slot its output lands in, and `run`
/// joins every task before returning: the first error observed wins and
/// later errors are discarded, but no task is left running. Callers must
/// pass each slot index in `0..N` exactly once.
pub struct Group<T> {
    tasks: JoinSet<crate::Result<(usize, T)>>,
    len: usize,
}

impl<T: Send + 'static> Group<T> {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            len: 0,
        }
    }

    /// Register a fallible task whose output fills slot `index`.
    pub fn spawn<F>(&mut self, index: usize, task: F)
    where
        F: Future<Output = crate::Result<T>> + Send + 'static,
    {
        self.len += 1;
        self.tasks.spawn(async move { task.await.map(|value| (index, value)) });
    }

    /// Run every task to completion and return their outputs in slot order,
    /// or the first error observed. A panicking task surfaces as an error.
    pub async fn run(mut self) -> crate::Result<Vec<T>> {
        let mut slots: Vec<Option<T>> = Vec::with_capacity(self.len);
        slots.resize_with(self.len, || None);
        let mut first_err = None;

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(Ok((index, value))) => slots[index] = Some(value),
                Ok(Err(err)) => {
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
                Err(join_err) => {
                    if first_err.is_none() {
                        first_err = Some(join_err.into());
                    }
                }
            }
        }
        if let Some(err) = first_err {
            return Err(err);
        }
        Ok(slots
            .into_iter()
            .map(|slot| slot.expect("every slot is filled by a joined task"))
            .collect())
    }
}

impl<T: Send + 'static> Default for Group<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn outputs_are_in_slot_order() {
        let mut group = Group::new();
        for index in 0..4usize {
            group.spawn(index, async move {
                // Later slots finish earlier.
                tokio::time::sleep(Duration::from_millis(40 - 10 * index as u64)).await;
                Ok(index)
            });
        }
        assert_eq!(group.run().await.unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn first_error_wins_and_all_tasks_are_joined() {
        let finished = Arc::new(AtomicUsize::new(0));
        let mut group = Group::new();

        for index in 0..4usize {
            let finished = finished.clone();
            group.spawn(index, async move {
                let result = if index == 1 {
                    Err(Error::NoResponse)
                } else {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(index)
                };
                finished.fetch_add(1, Ordering::SeqCst);
                result
            });
        }

        let err = group.run().await.unwrap_err();
        assert!(matches!(err, Error::NoResponse));
        assert_eq!(finished.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn panicking_task_surfaces_as_error() {
        let mut group: Group<()> = Group::new();
        group.spawn(0, async { panic!("boom") });
        assert!(matches!(group.run().await, Err(Error::TaskJoin(_))));
    }
}
