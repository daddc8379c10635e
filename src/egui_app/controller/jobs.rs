//! Worker-thread plumbing for the four backend calls.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
    mpsc::{Receiver, Sender, channel},
};
use std::thread;

use crate::backend::{
    self, BackendError, ModelKind, PreprocessMethod, SplitOutcome, TrainOutcome, UploadOutcome,
};

/// Result of a finished worker request.
pub(crate) enum JobMessage {
    Uploaded(Result<UploadOutcome, BackendError>),
    Preprocessed(Result<(), BackendError>),
    SplitDone(Result<SplitOutcome, BackendError>),
    Trained(Result<TrainOutcome, BackendError>),
}

/// Channel pair plus an in-flight counter for the pipeline workers.
///
/// Requests are never deduplicated or cancelled; if the user fires a call
/// while another is pending, both run and their results land in arrival
/// order. The counter only exists so callers can observe quiescence.
pub(crate) struct PipelineJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    in_flight: Arc<AtomicUsize>,
}

impl PipelineJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = channel();
        Self {
            message_tx,
            message_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn try_recv_message(&self) -> Option<JobMessage> {
        self.message_rx.try_recv().ok()
    }

    pub(crate) fn note_finished(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn begin_upload(&self, base_url: String, file_name: String, bytes: Vec<u8>) {
        self.spawn(move || backend::upload(&base_url, &file_name, bytes), JobMessage::Uploaded);
    }

    pub(crate) fn begin_preprocess(
        &self,
        base_url: String,
        target_col: String,
        method: PreprocessMethod,
    ) {
        self.spawn(
            move || backend::preprocess(&base_url, &target_col, method),
            JobMessage::Preprocessed,
        );
    }

    pub(crate) fn begin_split(&self, base_url: String, target_col: String, test_size: f32) {
        self.spawn(
            move || backend::split(&base_url, &target_col, test_size),
            JobMessage::SplitDone,
        );
    }

    pub(crate) fn begin_train(&self, base_url: String, target_col: String, model: ModelKind) {
        self.spawn(
            move || backend::train(&base_url, &target_col, model),
            JobMessage::Trained,
        );
    }

    fn spawn<T, F, W>(&self, work: W, wrap: F)
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        F: FnOnce(T) -> JobMessage + Send + 'static,
    {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let _ = tx.send(wrap(work()));
        });
    }
}
