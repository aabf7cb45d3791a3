use std::time::Duration;

use herbstore_core::{AppConfig, CardDetails, CardForm, PaymentPhase};
use rust_decimal::Decimal;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::error::PaymentError;

/// How a payment task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Both delays elapsed; the caller should complete the order.
    Completed,
    /// Cancelled or aborted before completion. The order must not complete.
    Cancelled,
}

/// Starts simulated payments with fixed phase delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSimulator {
    processing_delay: Duration,
    success_delay: Duration,
}

impl PaymentSimulator {
    #[must_use]
    pub fn new(processing_delay: Duration, success_delay: Duration) -> Self {
        Self {
            processing_delay,
            success_delay,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.payment_processing_delay(),
            config.payment_success_delay(),
        )
    }

    /// Validates `form` and, if it passes, starts the processing sequence.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidCard`] if a field fails its pattern (the
    /// phase stays at `Form`), or [`PaymentError::NoRuntime`] outside tokio.
    pub fn submit(&self, form: &CardForm, amount: Decimal) -> Result<PaymentTask, PaymentError> {
        let card = form.validate()?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| PaymentError::NoRuntime)?;

        let (phase_tx, phase_rx) = watch::channel(PaymentPhase::Processing);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        tracing::info!(
            %amount,
            card_last4 = card.last4(),
            "payment submitted, processing"
        );

        let handle = runtime.spawn(run_sequence(
            phase_tx,
            cancel_rx,
            self.processing_delay,
            self.success_delay,
        ));

        Ok(PaymentTask {
            amount,
            card,
            phase: phase_rx,
            cancel: Some(cancel_tx),
            handle: Some(handle),
        })
    }
}

impl Default for PaymentSimulator {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

fn advance(phase: &mut PaymentPhase) {
    if let Some(next) = phase.next() {
        *phase = next;
    }
}

async fn run_sequence(
    phase_tx: watch::Sender<PaymentPhase>,
    cancel_rx: oneshot::Receiver<()>,
    processing_delay: Duration,
    success_delay: Duration,
) -> PaymentOutcome {
    let steps = async {
        tokio::time::sleep(processing_delay).await;
        phase_tx.send_modify(advance);
        tracing::info!(phase = %*phase_tx.borrow(), "payment successful");
        tokio::time::sleep(success_delay).await;
    };

    tokio::select! {
        biased;
        // A dropped sender counts as cancellation too.
        _ = cancel_rx => {
            tracing::info!(phase = %*phase_tx.borrow(), "payment cancelled");
            PaymentOutcome::Cancelled
        }
        () = steps => PaymentOutcome::Completed,
    }
}

/// A running payment simulation.
///
/// Dropping the task aborts it.
#[derive(Debug)]
pub struct PaymentTask {
    amount: Decimal,
    card: CardDetails,
    phase: watch::Receiver<PaymentPhase>,
    cancel: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<PaymentOutcome>>,
}

impl PaymentTask {
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    /// The phase right now: `Processing` or `Success`.
    #[must_use]
    pub fn phase(&self) -> PaymentPhase {
        *self.phase.borrow()
    }

    /// A receiver notified on every phase change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PaymentPhase> {
        self.phase.clone()
    }

    /// Requests cancellation. Idempotent; a no-op once the task has finished.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The receiver is gone only if the sequence already finished.
            let _ = cancel.send(());
        }
    }

    /// Waits for the sequence to finish or be cancelled.
    ///
    /// Cancel-safe: dropping the returned future leaves the task running, so
    /// this can sit in a `tokio::select!` next to user input.
    pub async fn wait(&mut self) -> PaymentOutcome {
        let Some(handle) = self.handle.as_mut() else {
            return PaymentOutcome::Cancelled;
        };
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "payment task did not finish");
                PaymentOutcome::Cancelled
            }
        };
        self.handle = None;
        self.cancel = None;
        outcome
    }
}

impl Drop for PaymentTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
