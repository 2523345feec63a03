//! Per-center polling loop: detail lookup, availability evaluation, alerting.

use chrono::Local;

use crate::availability::{self, AvailabilitiesResponse, BookingResponse, Evaluation};
use crate::catalog::Center;
use crate::client::DoctolibClient;
use crate::error::WatchError;
use crate::ledger::NotificationLedger;
use crate::notifier::NotificationSink;

pub struct Watcher<S: NotificationSink> {
    client: DoctolibClient,
    ledger: NotificationLedger,
    sink: S,
    alert_threshold: u32,
}

impl<S: NotificationSink> Watcher<S> {
    pub fn new(
        client: DoctolibClient,
        ledger: NotificationLedger,
        sink: S,
        alert_threshold: u32,
    ) -> Self {
        Self {
            client,
            ledger,
            sink,
            alert_threshold,
        }
    }

    /// One full pass over the catalog, in listed order. Skip reasons are
    /// absorbed per center; request, ledger and delivery failures abort the
    /// pass.
    pub async fn run(&mut self, centers: &[Center]) -> Result<(), WatchError> {
        for center in centers {
            self.poll_center(center).await?;
        }
        Ok(())
    }

    async fn poll_center(&mut self, center: &Center) -> Result<(), WatchError> {
        let detail: BookingResponse = self
            .client
            .get_json(&format!("/booking/{}.json", center.name), &[])
            .await?;

        let query = match availability::evaluate(&detail.data) {
            Evaluation::Query(query) => query,
            Evaluation::Skip(reason) => {
                tracing::warn!(center = %center.name, "{reason}");
                return Ok(());
            }
        };

        let start_date = Local::now().date_naive().to_string();
        let visit_motive_ids = query.visit_motive_id.to_string();
        let response: AvailabilitiesResponse = self
            .client
            .get_json(
                "/availabilities.json",
                &[
                    ("start_date", start_date.as_str()),
                    ("visit_motive_ids", visit_motive_ids.as_str()),
                    ("agenda_ids", query.agenda_ids.as_str()),
                ],
            )
            .await?;
        let total = response.total;

        tracing::info!(center = %center.name, total, "availabilities found");

        if total >= self.alert_threshold {
            let message = format!(
                "*{total}* appointments available at center <{}|{}>",
                center.detail_url(),
                center.name
            );
            let sent = self
                .ledger
                .notify_if_due(&query.profile_id, &message, &self.sink)
                .await?;
            if sent {
                tracing::info!(center = %center.name, total, "notification sent");
            } else {
                tracing::debug!(center = %center.name, "notification debounced");
            }
        }

        Ok(())
    }
}
