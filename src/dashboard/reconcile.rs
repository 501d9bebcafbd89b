use tracing::{info, warn};

use crate::api::TransactionApi;
use crate::cache::QueryCache;
use crate::types::QueryKey;
use crate::upload::UploadDialog;

/// Submits the held file and reconciles the dependent read views.
///
/// A SUCCESS envelope triggers exactly two invalidations — balance and
/// unsuccessful transactions — issued together without awaiting either
/// refetch, then closes the dialog. Any other outcome performs zero
/// invalidations and leaves the dialog open with the failure surfaced
/// inline.
pub async fn submit_and_reconcile<A: TransactionApi>(
    api: &A,
    cache: &QueryCache<A>,
    dialog: &mut UploadDialog
) {
    let Some(file) = dialog.begin_submit() else {
        return;
    };

    let (name, bytes) = file.into_parts();

    match api.upload_csv(name, bytes).await.into_ack() {
        Ok(()) => {
            info!("Upload accepted, refreshing dependent queries");
            cache.invalidate(QueryKey::Balance);
            cache.invalidate(QueryKey::UnsuccessfulTransactions);
            dialog.submit_succeeded();
        }
        Err(error) => {
            warn!("Upload rejected: {error}");
            dialog.submit_failed(error.to_string());
        }
    }
}
