//! Reader -> bounded queue -> worker pool -> shared sink.

use crate::codon::CodonTable;
use crate::error::{TranseqError, TranseqResult};
use crate::io::fasta::fasta_records_from_reader;
use crate::io::OnInvalid;
use crate::seq::{EncodedRecord, RecordPool, SequenceEncoder};
use crate::translate::{FrameSpec, FrameTranslator, OutputWriter};
use crossbeam::channel::{bounded, Receiver, Sender};
use log::{debug, info};
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};


const MAX_WRITER_PREALLOC: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct TranslateOptions {
    pub frame: FrameSpec,
    /// NCBI genetic code id, 0 is the standard code.
    pub table: u32,
    /// Render stop codons as `X`.
    pub clean: bool,
    /// Disable the Staden phase correction of reverse frames.
    pub alternative: bool,
    /// Strip trailing `X` and `*` from each frame.
    pub trim: bool,
    /// Worker threads, 0 lets the pool pick.
    pub workers: usize,
    pub on_invalid: OnInvalid,
    pub queue_capacity: usize,
    /// Per-worker buffered bytes that trigger a write to the sink.
    pub flush_threshold: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            frame: FrameSpec::One,
            table: 0,
            clean: false,
            alternative: false,
            trim: false,
            workers: 0,
            on_invalid: OnInvalid::Warn,
            queue_capacity: 100,
            flush_threshold: 30 * 1024 * 1024,
        }
    }
}

/// Cancellation flag plus a first-error-wins slot shared by every task.
#[derive(Debug, Default)]
pub(crate) struct RunState {
    cancelled: AtomicBool,
    error: OnceLock<TranseqError>,
}

impl RunState {
    pub(crate) fn fail(&self, err: TranseqError) {
        // later errors are dropped
        let _ = self.error.set(err);
        self.cancelled.store(true, Ordering::Release);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn has_failed(&self) -> bool {
        self.error.get().is_some()
    }

    pub(crate) fn into_result(self) -> TranseqResult<()> {
        match self.error.into_inner() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Translates every FASTA record of `input` into `output`.
///
/// The codon table is built before any worker starts, so configuration
/// errors return without output. With more than one worker, blocks from
/// different records may reach the sink in any order; the frames of one
/// record always stay together and in order.
pub fn translate<R, W>(input: R, output: W, options: &TranslateOptions) -> TranseqResult<()>
where
    R: BufRead,
    W: Write + Send,
{
    let table = CodonTable::new(options.table, options.clean)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .thread_name(|i| format!("transeq-worker-{i}"))
        .build()
        .map_err(|err| TranseqError::WorkerPool(err.to_string()))?;
    let workers = pool.current_num_threads();

    debug!(
        "translating frame {} with table {} (clean={}, alternative={}, trim={}) on {} worker(s)",
        options.frame, options.table, options.clean, options.alternative, options.trim, workers
    );

    let queue_capacity = options.queue_capacity.max(1);
    let (tx, rx) = bounded::<EncodedRecord>(queue_capacity);
    let records = RecordPool::new(queue_capacity + workers);
    let encoder = SequenceEncoder::new(options.on_invalid, records.clone());
    let sink = Mutex::new(output);
    let state = RunState::default();

    let sent = pool.in_place_scope(|scope| {
        for _ in 0..workers {
            let rx = rx.clone();
            let records = records.clone();
            let (table, sink, state) = (&table, &sink, &state);
            scope.spawn(move |_| {
                let out =
                    OutputWriter::with_capacity(options.flush_threshold.min(MAX_WRITER_PREALLOC));
                let translator =
                    FrameTranslator::new(table, options.frame, options.alternative, options.trim)
                        .with_writer(out);
                run_worker(rx, translator, records, sink, state, options.flush_threshold);
            });
        }
        drop(rx);

        feed(input, encoder, tx, &state)
    });

    // every worker has returned once the scope ends
    let mut output = sink.into_inner().unwrap_or_else(PoisonError::into_inner);
    if !state.has_failed() {
        if let Err(err) = output.flush() {
            state.fail(TranseqError::Output(err));
        }
    }

    info!("read {sent} record(s)");
    state.into_result()
}

/// In-memory convenience over [`translate`].
pub fn translate_to_vec(input: &[u8], options: &TranslateOptions) -> TranseqResult<Vec<u8>> {
    let mut out = Vec::new();
    translate(input, &mut out, options)?;
    Ok(out)
}

/// Reads records onto the queue until EOF, cancellation, or a read error.
/// Dropping `tx` on return closes the queue.
fn feed<R: BufRead>(
    input: R,
    encoder: SequenceEncoder,
    tx: Sender<EncodedRecord>,
    state: &RunState,
) -> usize {
    let mut records = fasta_records_from_reader(input, encoder);
    let mut sent = 0usize;

    while !state.is_cancelled() {
        match records.next() {
            None => break,
            Some(Ok(record)) => {
                if tx.send(record).is_err() {
                    // every worker is gone
                    break;
                }
                sent += 1;
            }
            Some(Err(err)) => {
                state.fail(err);
                break;
            }
        }
    }
    debug!("reader stopped after line {}", records.line_no());
    sent
}

fn run_worker<W: Write>(
    rx: Receiver<EncodedRecord>,
    mut translator: FrameTranslator<'_>,
    records: RecordPool,
    sink: &Mutex<W>,
    state: &RunState,
    flush_threshold: usize,
) {
    for mut record in rx.iter() {
        if state.is_cancelled() {
            return;
        }

        translator.translate(&mut record);
        records.recycle(record);

        if translator.buffered() > flush_threshold && !translator.output_mut().flush(sink, state) {
            return;
        }
    }

    if !state.is_cancelled() {
        translator.output_mut().flush(sink, state);
    }
}
