//! Order progression for the tracking page.
//!
//! [`deliver`] spawns [`advance_order`] to move the order one status at a time
//! and polls it with [`track_order`] until it is terminal. If the progression
//! task fails first, its error is returned instead of polling forever.

use crate::error::StoreError;
use crate::model::{OrderId, OrderStatus};
use crate::storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{info, warn};

/// Moves the order one step forward every `step` until it is delivered.
pub async fn advance_order(
    store: Arc<dyn Storage>,
    id: OrderId,
    step: Duration,
) -> Result<OrderStatus, StoreError> {
    let mut status = OrderStatus::default();
    while let Some(next) = status.next() {
        tokio::time::sleep(step).await;
        match store.update_order_status(id, next).await? {
            Some(order) => status = order.status,
            None => return Err(StoreError::OrderNotFound(id)),
        }
    }
    Ok(status)
}

/// Polls the order every `interval` until it reaches a terminal status.
pub async fn track_order(
    store: &dyn Storage,
    id: OrderId,
    interval: Duration,
) -> Result<OrderStatus, StoreError> {
    let mut last_seen = None;
    loop {
        let Some(order) = store.get_order(id).await? else {
            warn!(order_id = %id, "Order not found");
            return Err(StoreError::OrderNotFound(id));
        };
        if last_seen != Some(order.status) {
            info!(
                order_id = %id,
                status = %order.status,
                progress = order.status.progress_percent(),
                "Tracking"
            );
            last_seen = Some(order.status);
        }
        if order.status.is_terminal() {
            return Ok(order.status);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Advances the order in the background and tracks it to a terminal status.
pub async fn deliver(
    store: Arc<dyn Storage>,
    id: OrderId,
    step: Duration,
) -> Result<OrderStatus, StoreError> {
    let mut progression = tokio::spawn(advance_order(Arc::clone(&store), id, step));
    let tracking = track_order(store.as_ref(), id, step / 2);
    tokio::pin!(tracking);

    tokio::select! {
        tracked = &mut tracking => {
            let status = match tracked {
                Ok(status) => status,
                Err(e) => {
                    progression.abort();
                    return Err(e);
                }
            };
            joined(progression.await)?;
            Ok(status)
        }
        advanced = &mut progression => {
            joined(advanced)?;
            tracking.await
        }
    }
}

fn joined(
    result: Result<Result<OrderStatus, StoreError>, JoinError>,
) -> Result<OrderStatus, StoreError> {
    match result {
        Ok(advanced) => advanced,
        Err(e) => Err(StoreError::Unavailable(format!("order progression task failed: {e}"))),
    }
}
