use std::io;
use std::ops::Range;
use std::thread;

use tracing::trace;

use crate::error::{KernelError, Result};

/// Run one scoped worker per range, handing worker `i` exclusive ownership of
/// `outputs[i]`.
///
/// Returns only after every started worker has been joined. If a worker
/// cannot be spawned, the ones already running are joined and the operation
/// fails with `WorkerSpawnFailure`; nothing is computed for the missing
/// ranges.
pub(crate) fn scatter<W, F>(ranges: &[Range<usize>], outputs: Vec<W>, work: F) -> Result<()>
where
    W: Send,
    F: Fn(Range<usize>, W) + Sync,
{
    scatter_with(ranges, outputs, work, |worker| {
        Ok(thread::Builder::new().name(format!("pb-worker-{worker}")))
    })
}

/// [`scatter`] with the thread builder for each worker supplied by `builder`.
/// An error from `builder` is treated like a failed spawn.
pub(crate) fn scatter_with<W, F, B>(
    ranges: &[Range<usize>],
    outputs: Vec<W>,
    work: F,
    builder: B,
) -> Result<()>
where
    W: Send,
    F: Fn(Range<usize>, W) + Sync,
    B: Fn(usize) -> io::Result<thread::Builder>,
{
    debug_assert_eq!(ranges.len(), outputs.len());
    let requested = ranges.len();
    let work = &work;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(requested);

        for (worker, (range, out)) in ranges.iter().cloned().zip(outputs).enumerate() {
            let spawned = builder(worker).and_then(|b| {
                b.spawn_scoped(scope, move || {
                    let (start, end) = (range.start, range.end);
                    work(range, out);
                    trace!(worker, start, end, "worker finished");
                })
            });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    let started = handles.len();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(KernelError::WorkerSpawnFailure {
                        started,
                        requested,
                        source,
                    });
                }
            }
        }

        // Join everything before reporting, so no worker outlives the call.
        let mut panicked = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(worker);
            }
        }
        match panicked {
            Some(worker) => Err(KernelError::WorkerPanicked { worker }),
            None => Ok(()),
        }
    })
}

/// Split `data` into consecutive mutable blocks of `range.len() * row_len`
/// elements, one per range.
pub(crate) fn split_rows<'a, T>(
    mut data: &'a mut [T],
    row_len: usize,
    ranges: &[Range<usize>],
) -> Vec<&'a mut [T]> {
    let mut blocks = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (head, tail) = std::mem::take(&mut data).split_at_mut(range.len() * row_len);
        blocks.push(head);
        data = tail;
    }
    blocks
}
