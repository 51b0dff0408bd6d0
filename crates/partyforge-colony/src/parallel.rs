use std::{num::NonZeroUsize, panic, thread};

/// Maps `f` over `items` on scoped worker threads, preserving order.
///
/// Items are split into one contiguous chunk per available core. Panics in a worker are
/// propagated to the caller.
pub(crate) fn map<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk_size = items.len().div_ceil(workers).max(1);
    let f = &f;

    thread::scope(|s| {
        let handles = items
            .chunks(chunk_size)
            .map(|chunk| s.spawn(move || chunk.iter().map(f).collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect()
    })
}
