//! Background generation for event-loop front ends
//!
//! The UI thread never awaits. A request runs on the tokio runtime and hands
//! its result back through a oneshot channel that the event loop polls each
//! tick. Starting a new request aborts the previous task, and the session
//! discards any result carrying an old ticket.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;

use super::generator::{QuestionGenerator, QuizError, Result};
use super::models::Question;
use super::session::{QuizSession, RequestTicket};

/// One in-flight generation request
pub struct GenerationTask {
    ticket: RequestTicket,
    handle: JoinHandle<()>,
    rx: oneshot::Receiver<Result<Vec<Question>>>,
}

impl GenerationTask {
    pub fn spawn(runtime: &Handle, generator: Arc<dyn QuestionGenerator>, ticket: RequestTicket) -> Self {
        let (tx, rx) = oneshot::channel();
        let handle = runtime.spawn(async move {
            let result = generator.generate().await;
            let _ = tx.send(result);
        });
        Self { ticket, handle, rx }
    }

    pub fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    /// Result of the request if it has finished. A task that died without
    /// answering reports `Cancelled`.
    pub fn try_take(&mut self) -> Option<Result<Vec<Question>>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(QuizError::Cancelled)),
        }
    }

    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for GenerationTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Quiz session plus the machinery to run its requests in the background
pub struct QuizRunner {
    session: QuizSession,
    generator: Arc<dyn QuestionGenerator>,
    runtime: Handle,
    in_flight: Option<GenerationTask>,
}

impl QuizRunner {
    pub fn new(generator: Arc<dyn QuestionGenerator>, runtime: Handle) -> Self {
        Self {
            session: QuizSession::new(),
            generator,
            runtime,
            in_flight: None,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    /// Start a request unless one is already outstanding. Returns whether a
    /// request was started.
    pub fn request(&mut self) -> bool {
        if self.session.is_loading() {
            return false;
        }
        self.restart();
        true
    }

    /// Start a request, superseding any outstanding one
    pub fn restart(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            log::debug!("Superseding question request {}", previous.ticket().seq());
            previous.abort();
        }
        let ticket = self.session.begin_request();
        self.in_flight = Some(GenerationTask::spawn(
            &self.runtime,
            Arc::clone(&self.generator),
            ticket,
        ));
    }

    /// Apply the outstanding result if it is ready. Returns true when the
    /// visible batch changed.
    pub fn poll(&mut self) -> bool {
        let Some(task) = self.in_flight.as_mut() else {
            return false;
        };
        let Some(result) = task.try_take() else {
            return false;
        };
        let ticket = task.ticket();
        self.in_flight = None;
        self.session.complete(ticket, result)
    }
}
