use crypto_store_engine::{db_types::PaymentIntent, OrderFlowApi, SqliteDatabase};
use log::*;
use tokio::task::JoinHandle;

const SWEEP_INTERVAL_SECS: u64 = 60;

/// Starts the intent expiry worker. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// Once a minute, every pending payment intent whose `expires_at` has passed is flipped to `expired`, so
/// that abandoned checkouts do not linger as confirmable intents.
pub fn start_expiry_worker(db: SqliteDatabase) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS));
        let api = OrderFlowApi::new(db);
        info!("🕰️ Payment intent expiry worker started");
        loop {
            timer.tick().await;
            match api.expire_old_intents().await {
                Ok(expired) if expired.is_empty() => trace!("🕰️ No intents to expire"),
                Ok(expired) => {
                    info!("🕰️ {} intents expired", expired.len());
                    debug!("🕰️ Expired intents: {}", intent_list(&expired));
                },
                Err(e) => {
                    error!("🕰️ Error running intent expiry job: {e}");
                },
            }
        }
    })
}

fn intent_list(intents: &[PaymentIntent]) -> String {
    intents
        .iter()
        .map(|i| format!("[{}] product: {} amount: {} {}", i.id, i.product_title, i.amount_crypto, i.currency))
        .collect::<Vec<String>>()
        .join(", ")
}
