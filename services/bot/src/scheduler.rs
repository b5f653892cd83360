//! Scheduled expiry check
//!
//! On each trigger the checker scans the full inventory once, groups items
//! by exact day-offset for each configured offset in order (30, 7, 0), and
//! pushes one notification per (user, offset) pair. A failed delivery is
//! logged and never aborts the rest of the run; nothing deduplicates
//! against prior runs, so re-running on the same day re-notifies.

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use common::dates;
use common::item_store::ItemStore;

use crate::line::Notifier;
use crate::messages;
use crate::notifications::{NOTIFICATION_OFFSETS, group_by_offset};

/// Periodic scan-and-notify runner
#[derive(Clone)]
pub struct ExpiryChecker {
    items: Arc<dyn ItemStore>,
    notifier: Arc<dyn Notifier>,
}

impl ExpiryChecker {
    pub fn new(items: Arc<dyn ItemStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { items, notifier }
    }

    /// One full scan-and-notify pass
    pub async fn run(&self) -> Result<()> {
        let all_items = self.items.scan_all().await?;
        info!("Expiry check started: {} items scanned", all_items.len());

        let today = dates::today();

        for target_days in NOTIFICATION_OFFSETS {
            let grouped = group_by_offset(&all_items, target_days, today);
            info!(
                "Offset {} days: {} users to notify",
                target_days,
                grouped.len()
            );

            for (user_id, items) in grouped {
                let message = messages::notification_flex(&items, target_days);
                match self.notifier.push(&user_id, vec![message]).await {
                    Ok(()) => info!(
                        "Notified {}: {} days, {} items",
                        user_id,
                        target_days,
                        items.len()
                    ),
                    // One bad delivery never aborts the run.
                    Err(e) => error!("Failed to notify {}: {}", user_id, e),
                }
            }
        }

        info!("Expiry check completed");
        Ok(())
    }

    /// Register the expiry check with a cron scheduler and start it
    pub async fn start(self, schedule: &str) -> Result<()> {
        let scheduler = JobScheduler::new().await?;

        let checker = self.clone();
        let job = Job::new_async(schedule, move |_, _| {
            let checker = checker.clone();
            Box::pin(async move {
                if let Err(e) = checker.run().await {
                    error!("Expiry check failed: {}", e);
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!("Started expiry check scheduler with schedule: {}", schedule);
        Ok(())
    }
}
