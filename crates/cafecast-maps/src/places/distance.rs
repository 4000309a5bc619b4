use async_trait::async_trait;
use cafecast_core::Coordinates;
use serde_json::Value;

use super::{GoogleMapsClient, DISTANCE_MATRIX_PATH};
use crate::error::MapsError;
use crate::json_path::{try_path, PathStep};
use crate::provider::TravelTimeProvider;

/// `rows[0].elements[0].duration.text` of a distance-matrix response.
const DURATION_TEXT_PATH: [PathStep<'static>; 6] = [
    PathStep::Key("rows"),
    PathStep::Index(0),
    PathStep::Key("elements"),
    PathStep::Index(0),
    PathStep::Key("duration"),
    PathStep::Key("text"),
];

/// Duration text of the first origin/destination pair, if present.
///
/// Element-level failures (`"status": "ZERO_RESULTS"`, `"NOT_FOUND"`) carry
/// no `duration` and therefore come back as `None`.
pub(crate) fn duration_text(matrix: &Value) -> Option<String> {
    try_path(matrix, &DURATION_TEXT_PATH)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[async_trait]
impl TravelTimeProvider for GoogleMapsClient {
    async fn travel_time(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<String>, MapsError> {
        let origins = origin.to_query_value();
        let destinations = destination.to_query_value();
        let url = self.endpoint(
            DISTANCE_MATRIX_PATH,
            &[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("units", "imperial"),
            ],
        )?;

        let body = self.get_text(url, self.lookup_timeout).await?;
        let matrix: Value = serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
            context: format!("distance matrix {origins} -> {destinations}"),
            source: e,
        })?;

        Ok(duration_text(&matrix))
    }
}
