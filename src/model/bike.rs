use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use utoipa::ToSchema;

/// Wire value standing in for "no renter" in `user_id`.
pub const UNASSIGNED: i64 = -1;

/// A bike. `user_id` is `None` while the bike is available and is written as `-1` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Bike {
    pub id: i64,
    pub longitude: i64,
    pub latitude: i64,
    pub available: bool,
    #[serde(with = "renter")]
    #[schema(value_type = i64)]
    pub user_id: Option<i64>,
}

/// Body for `POST /bike/`. New bikes always start available with no renter.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewBike {
    pub longitude: i64,
    pub latitude: i64,
}

/// Body for `PUT /bike/:id`. Both keys are required; `user_id` may be `-1` or `null` for a return.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct BikeStatusUpdate {
    pub available: bool,
    #[serde(with = "renter")]
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<i64>,
}

/// Whether a bike is free or out with a rider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BikeState {
    Available,
    Rented { user_id: i64 },
}

impl BikeState {
    /// Pair `available` with the renter; `available` must be true exactly when there is no renter.
    pub fn from_parts(available: bool, user_id: Option<i64>) -> Result<Self, AppError> {
        match (available, user_id) {
            (true, None) => Ok(BikeState::Available),
            (false, Some(user_id)) => Ok(BikeState::Rented { user_id }),
            (true, Some(user_id)) => Err(AppError::Validation(format!(
                "an available bike cannot have a renter (user_id {})",
                user_id
            ))),
            (false, None) => Err(AppError::Validation(
                "a bike that is not available needs a renter user_id".into(),
            )),
        }
    }

    /// Check that moving from `self` to `next` is allowed. Re-applying the same state is a no-op.
    pub fn transition(self, next: BikeState) -> Result<BikeState, AppError> {
        match (self, next) {
            (BikeState::Rented { user_id: current }, BikeState::Rented { user_id: requested })
                if current != requested =>
            {
                Err(AppError::Conflict(format!(
                    "bike is rented by user {}; it must be returned before user {} can rent it",
                    current, requested
                )))
            }
            _ => Ok(next),
        }
    }

    pub fn available(self) -> bool {
        matches!(self, BikeState::Available)
    }

    pub fn user_id(self) -> Option<i64> {
        match self {
            BikeState::Available => None,
            BikeState::Rented { user_id } => Some(user_id),
        }
    }
}

impl Bike {
    pub const COLUMNS: &'static str = "id, longitude, latitude, available, user_id";

    pub fn state(&self) -> Result<BikeState, AppError> {
        BikeState::from_parts(self.available, self.user_id)
    }

    pub(crate) fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            longitude: row.try_get("longitude")?,
            latitude: row.try_get("latitude")?,
            available: row.try_get("available")?,
            user_id: row.try_get("user_id")?,
        })
    }
}

impl BikeStatusUpdate {
    pub fn state(&self) -> Result<BikeState, AppError> {
        BikeState::from_parts(self.available, self.user_id)
    }
}

/// Parse the `/bike/avail/:available` segment. Accepts `true`/`false` in any case and `1`/`0`.
pub fn parse_availability(raw: &str) -> Result<bool, AppError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Ok(false)
    } else {
        Err(AppError::Validation(format!(
            "availability must be one of true, false, 1, 0 (got '{}')",
            raw
        )))
    }
}

/// `Option<i64>` renter on the wire: `None` is written as `-1`; `-1` and `null` both read back as `None`.
mod renter {
    use super::UNASSIGNED;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.unwrap_or(UNASSIGNED))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?.filter(|id| *id != UNASSIGNED))
    }
}
