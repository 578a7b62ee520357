// ── Occupancy engine ──
//
// Classify a frame, apply the observation to the room store and raise an
// alert on the transition into `waste`.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::classify::{ClassificationAdapter, OccupantDetector};
use crate::error::CoreError;
use crate::model::{Alert, Observation, OccupancySource};
use crate::store::{AlertLog, RoomStore};

pub struct OccupancyEngine<D> {
    rooms: Arc<RoomStore>,
    alerts: Arc<AlertLog>,
    classifier: ClassificationAdapter<D>,
    /// Serializes read-old → write → alert so two concurrent observations
    /// of one room cannot both see the pre-waste status.
    gate: Mutex<()>,
}

impl<D: OccupantDetector> OccupancyEngine<D> {
    pub fn new(rooms: Arc<RoomStore>, alerts: Arc<AlertLog>, detector: D) -> Self {
        Self {
            rooms,
            alerts,
            classifier: ClassificationAdapter::new(detector),
            gate: Mutex::new(()),
        }
    }

    pub fn classifier(&self) -> &ClassificationAdapter<D> {
        &self.classifier
    }

    /// Analyze one frame for `room_id`.
    ///
    /// The room is validated before the provider is called. A provider
    /// failure leaves room state and the alert log untouched.
    #[instrument(skip(self, image_base64), fields(image_len = image_base64.len()))]
    pub async fn analyze(
        &self,
        room_id: &str,
        image_base64: &str,
    ) -> Result<Observation, CoreError> {
        if !self.rooms.contains(room_id).await {
            return Err(CoreError::room_not_found(room_id));
        }

        let classification = self.classifier.classify(image_base64).await?;

        let _gate = self.gate.lock().await;
        let update = self
            .rooms
            .update(
                room_id,
                classification.count,
                classification.confidence,
                OccupancySource::BrowserWebcam,
            )
            .await?;

        if update.change.entered_waste() {
            info!(room_id, "energy waste detected");
            self.alerts.push(Alert::energy_waste(&update.room)).await;
        }

        info!(
            room_id,
            count = classification.count,
            confidence = classification.confidence,
            status = %update.change.current,
            "observation applied"
        );

        Ok(Observation::new(
            room_id,
            classification,
            update.change.current,
        ))
    }
}
