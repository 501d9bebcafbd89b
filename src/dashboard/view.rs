use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::debug;

use crate::api::TransactionApi;
use crate::cache::{QueryCache, QuerySnapshot};
use crate::dashboard::events::{Key, SubscriptionId, Subscriptions, UiEvent};
use crate::dashboard::reconcile;
use crate::models::Transaction;
use crate::upload::UploadDialog;

/// Composes the two read views and the upload dialog.
///
/// Purely a projection: every decision lives in the dialog state machine,
/// the cache, or the reconciliation flow. Mounting the dashboard primes
/// both queries; afterwards it only reacts to events.
pub struct Dashboard<A: TransactionApi> {
    api: Arc<A>,
    cache: Arc<QueryCache<A>>,
    dialog: UploadDialog,
    balance: watch::Receiver<QuerySnapshot<Decimal>>,
    unsuccessful_transactions: watch::Receiver<QuerySnapshot<Vec<Transaction>>>,
    subscriptions: Subscriptions,
    escape_listener: Option<SubscriptionId>
}

impl<A: TransactionApi> Dashboard<A> {
    pub fn new(api: Arc<A>, cache: Arc<QueryCache<A>>) -> Self {
        let balance = cache.subscribe_balance();
        let unsuccessful_transactions = cache.subscribe_unsuccessful_transactions();
        cache.prime();

        Self {
            api,
            cache,
            dialog: UploadDialog::new(),
            balance,
            unsuccessful_transactions,
            subscriptions: Subscriptions::new(),
            escape_listener: None
        }
    }

    pub fn dialog(&self) -> &UploadDialog {
        &self.dialog
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub async fn handle(&mut self, event: UiEvent) {
        debug!("Handling event: {event:?}");

        match event {
            UiEvent::OpenDialog => self.open_dialog(),
            UiEvent::FileChosen(file) => self.dialog.choose(file),
            UiEvent::FileDropped(file) => self.dialog.drop_file(file),
            UiEvent::DragOver => self.dialog.drag_over(),
            UiEvent::DragLeave => self.dialog.drag_leave(),
            UiEvent::RemoveFile => self.dialog.remove_file(),
            UiEvent::Submit => {
                reconcile::submit_and_reconcile(self.api.as_ref(), self.cache.as_ref(), &mut self.dialog).await;

                if !self.dialog.is_open() {
                    self.release_escape_listener();
                }
            }
            UiEvent::CancelDialog => self.close_dialog(),
            UiEvent::KeyPressed(Key::Escape) => {
                if self.subscriptions.is_subscribed(Key::Escape) {
                    self.close_dialog();
                }
            }
        }
    }

    fn open_dialog(&mut self) {
        self.dialog.open();

        if self.escape_listener.is_none() {
            self.escape_listener = Some(self.subscriptions.subscribe(Key::Escape));
        }
    }

    fn close_dialog(&mut self) {
        if self.dialog.close() {
            self.release_escape_listener();
        }
    }

    fn release_escape_listener(&mut self) {
        if let Some(subscription) = self.escape_listener.take() {
            self.subscriptions.unsubscribe(subscription);
        }
    }

    /// Renders the current projection of cache and dialog state.
    ///
    /// An absent or failed balance renders as 0 and an absent transaction
    /// list as an empty table; read failures never take the view down.
    pub fn render(&mut self) -> String {
        let balance = self.balance.borrow_and_update().clone();
        let transactions = self.unsuccessful_transactions.borrow_and_update().clone();

        let mut lines = Vec::new();

        lines.push(format!("Balance: {}", balance.value.unwrap_or(Decimal::ZERO)));

        let rows = transactions.value.unwrap_or_default();
        if rows.is_empty() {
            lines.push("Failed transactions: none".to_string());
        } else {
            lines.push(format!("Failed transactions ({}):", rows.len()));
            for row in &rows {
                lines.push(format!(
                    "  {}  {}  {}  {}  {}  {}",
                    row.id,
                    row.name,
                    row.transaction_type,
                    row.amount,
                    row.status,
                    row.transaction_date.format("%Y-%m-%d")
                ));
            }
        }

        if self.dialog.is_open() {
            lines.push(String::new());
            lines.push("-- Upload Transaction --".to_string());

            if self.dialog.is_drag_over() {
                lines.push("Drop your CSV file here".to_string());
            } else {
                lines.push("Drag and drop your CSV file here".to_string());
            }

            if let Some(error) = self.dialog.validation_error() {
                lines.push(format!("! {error}"));
            }

            if let Some(failure) = self.dialog.upload_failure() {
                lines.push(format!("! Upload failed: {failure}"));
            }

            if let Some(file) = self.dialog.selection() {
                lines.push(format!("File: {} ({})", file.name(), file.formatted_size()));
            }

            let submit_label = if self.dialog.is_submitting() {
                "Uploading..."
            } else if self.dialog.can_submit() {
                "Upload Transaction"
            } else {
                "Upload Transaction (disabled)"
            };
            lines.push(format!("[Cancel] [{submit_label}]"));
        }

        lines.join("\n")
    }
}
