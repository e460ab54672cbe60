//! Reading orchestration
//!
//! Coordinates message generation and image resolution for one drawn
//! spread. Text and images run concurrently; an image failure degrades
//! the slot to `None` while a message failure substitutes the cards'
//! stock messages, so the reader always gets a complete reading.
//!
//! Each full generation bumps a session token. Work finishing under a
//! stale token is discarded instead of applied, so a re-draw can never
//! be overwritten by a slow response from the previous spread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::join_all;

use crate::domain::entities::{GenerationResult, ReadingRequest};
use crate::domain::errors::OracleError;
use crate::ports::{ImageSource, MessageSource};
use crate::retry::{retry_with_backoff, RetryPolicy};

/// Whether finished work was applied to the session or discarded
/// because a newer reading superseded it.
#[derive(Debug)]
pub enum ReadingOutcome {
    Applied(GenerationResult),
    Superseded,
}

#[derive(Default)]
struct SessionState {
    request: Option<ReadingRequest>,
    result: Option<GenerationResult>,
}

/// One user-facing reading session.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct ReadingSession {
    messages: Arc<dyn MessageSource>,
    images: Arc<dyn ImageSource>,
    retry: RetryPolicy,
    generation: AtomicU64,
    state: Mutex<SessionState>,
}

impl ReadingSession {
    pub fn new(
        messages: Arc<dyn MessageSource>,
        images: Arc<dyn ImageSource>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            messages,
            images,
            retry,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Generate messages and images for a freshly drawn spread.
    ///
    /// Starts a new generation: any still-running work from a previous
    /// call will see a stale token and be discarded when it finishes.
    pub async fn generate_reading(
        &self,
        request: ReadingRequest,
    ) -> Result<ReadingOutcome, OracleError> {
        request.validate()?;

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().expect("session state poisoned");
            state.request = Some(request.clone());
            state.result = None;
        }

        let message_fut = self.generate_messages(&request);
        let image_fut = self.load_images(&request);
        let ((messages, message_error), (images, image_error)) =
            tokio::join!(message_fut, image_fut);

        if self.generation.load(Ordering::SeqCst) != token {
            return Ok(ReadingOutcome::Superseded);
        }

        let result = GenerationResult {
            partial_failure: message_error.is_some() || image_error.is_some(),
            messages,
            images,
            message_error,
            image_error,
        };
        self.state.lock().expect("session state poisoned").result = Some(result.clone());
        Ok(ReadingOutcome::Applied(result))
    }

    /// Re-run message generation for the current spread.
    ///
    /// Does not start a new generation; if a fresh reading lands while
    /// the retry is in flight, the retry result is discarded.
    pub async fn retry_messages(&self) -> Result<ReadingOutcome, OracleError> {
        let token = self.generation.load(Ordering::SeqCst);
        let request = self.current_request()?;

        let (messages, message_error) = self.generate_messages(&request).await;

        if self.generation.load(Ordering::SeqCst) != token {
            return Ok(ReadingOutcome::Superseded);
        }

        let mut state = self.state.lock().expect("session state poisoned");
        let result = state.result.get_or_insert_with(|| GenerationResult {
            messages: Vec::new(),
            images: vec![None; request.cards.len()],
            partial_failure: false,
            message_error: None,
            image_error: None,
        });
        result.messages = messages;
        result.message_error = message_error;
        result.partial_failure = result.message_error.is_some() || result.image_error.is_some();
        Ok(ReadingOutcome::Applied(result.clone()))
    }

    /// Re-resolve one image slot, or all of them when `slot` is `None`.
    pub async fn retry_images(&self, slot: Option<usize>) -> Result<ReadingOutcome, OracleError> {
        let token = self.generation.load(Ordering::SeqCst);
        let request = self.current_request()?;

        let (images, image_error) = match slot {
            None => self.load_images(&request).await,
            Some(index) => {
                let card = request.cards.get(index).ok_or_else(|| {
                    OracleError::new(
                        crate::domain::errors::ErrorKind::InvalidRequest,
                        format!("image slot {index} is out of range"),
                    )
                })?;
                match retry_with_backoff(&self.retry, || self.images.load(card)).await {
                    Ok(url) => (vec![Some(url)], None),
                    Err(err) => (vec![None], Some(err)),
                }
            }
        };

        if self.generation.load(Ordering::SeqCst) != token {
            return Ok(ReadingOutcome::Superseded);
        }

        let mut state = self.state.lock().expect("session state poisoned");
        let result = state.result.get_or_insert_with(|| GenerationResult {
            messages: Vec::new(),
            images: vec![None; request.cards.len()],
            partial_failure: false,
            message_error: None,
            image_error: None,
        });
        match slot {
            None => result.images = images,
            Some(index) => {
                if let Some(target) = result.images.get_mut(index) {
                    *target = images.into_iter().next().flatten();
                }
            }
        }
        result.image_error = image_error;
        result.partial_failure = result.message_error.is_some()
            || result.image_error.is_some()
            || result.images.iter().any(Option::is_none);
        Ok(ReadingOutcome::Applied(result.clone()))
    }

    /// Last applied result, if any.
    pub fn snapshot(&self) -> Option<GenerationResult> {
        self.state
            .lock()
            .expect("session state poisoned")
            .result
            .clone()
    }

    fn current_request(&self) -> Result<ReadingRequest, OracleError> {
        self.state
            .lock()
            .expect("session state poisoned")
            .request
            .clone()
            .ok_or_else(|| {
                OracleError::new(
                    crate::domain::errors::ErrorKind::InvalidRequest,
                    "no reading in progress",
                )
            })
    }

    /// Generated messages, or the cards' stock messages on failure.
    async fn generate_messages(
        &self,
        request: &ReadingRequest,
    ) -> (Vec<String>, Option<OracleError>) {
        match retry_with_backoff(&self.retry, || self.messages.generate(request)).await {
            Ok(messages) => (messages, None),
            Err(err) => {
                tracing::warn!(kind = %err.kind, "message generation failed, using stock messages");
                let fallback = request
                    .cards
                    .iter()
                    .map(|card| card.message.clone())
                    .collect();
                (fallback, Some(err))
            }
        }
    }

    async fn load_images(
        &self,
        request: &ReadingRequest,
    ) -> (Vec<Option<String>>, Option<OracleError>) {
        let loads = request
            .cards
            .iter()
            .map(|card| retry_with_backoff(&self.retry, || self.images.load(card)));
        let mut image_error = None;
        let images = join_all(loads)
            .await
            .into_iter()
            .map(|outcome| match outcome {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::warn!(kind = %err.kind, "image resolution failed, slot degraded");
                    image_error.get_or_insert(err);
                    None
                }
            })
            .collect();
        (images, image_error)
    }
}
