//! Bike persistence and check-out / check-in.

use crate::error::AppError;
use crate::model::{Bike, BikeStatusUpdate, NewBike};
use crate::service::UserService;
use sqlx::SqlitePool;

pub struct BikeService;

impl BikeService {
    /// Insert a bike at the given position. It starts available with no renter.
    pub async fn create(pool: &SqlitePool, input: &NewBike) -> Result<Bike, AppError> {
        let sql = format!(
            "INSERT INTO bikes (longitude, latitude, available, user_id) VALUES (?, ?, 1, NULL) RETURNING {}",
            Bike::COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(&sql)
            .bind(input.longitude)
            .bind(input.latitude)
            .fetch_one(pool)
            .await?;
        let bike = Bike::from_row(&row)?;
        tracing::info!(bike_id = bike.id, "created bike");
        Ok(bike)
    }

    /// All bikes in id order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Bike>, AppError> {
        let sql = format!("SELECT {} FROM bikes ORDER BY id", Bike::COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter()
            .map(|r| Bike::from_row(r).map_err(AppError::from))
            .collect()
    }

    /// Bikes whose `available` flag equals the given value, in id order.
    pub async fn list_by_availability(pool: &SqlitePool, available: bool) -> Result<Vec<Bike>, AppError> {
        let sql = format!("SELECT {} FROM bikes WHERE available = ? ORDER BY id", Bike::COLUMNS);
        tracing::debug!(sql = %sql, available, "query");
        let rows = sqlx::query(&sql).bind(available).fetch_all(pool).await?;
        rows.iter()
            .map(|r| Bike::from_row(r).map_err(AppError::from))
            .collect()
    }

    /// Bikes currently rented by one user. `None` if the user does not exist.
    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Option<Vec<Bike>>, AppError> {
        let mut conn = pool.acquire().await?;
        if !UserService::exists(&mut *conn, user_id).await? {
            return Ok(None);
        }
        let sql = format!("SELECT {} FROM bikes WHERE user_id = ? ORDER BY id", Bike::COLUMNS);
        tracing::debug!(sql = %sql, user_id, "query");
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(&mut *conn).await?;
        let bikes = rows
            .iter()
            .map(Bike::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(bikes))
    }

    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<Bike>, AppError> {
        let sql = format!("SELECT {} FROM bikes WHERE id = ?", Bike::COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|r| Bike::from_row(&r)).transpose()?)
    }

    /// Rent or return a bike. Validates the requested state, that the renter exists,
    /// and that the move is allowed from the stored state, all in one transaction.
    /// Returns `None` if the bike does not exist.
    pub async fn update_status(
        pool: &SqlitePool,
        id: i64,
        update: &BikeStatusUpdate,
    ) -> Result<Option<Bike>, AppError> {
        let requested = update.state()?;
        // Take the write lock before reading the current state.
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

        let sql = format!("SELECT {} FROM bikes WHERE id = ?", Bike::COLUMNS);
        tracing::debug!(sql = %sql, id, "query (tx)");
        let Some(row) = sqlx::query(&sql).bind(id).fetch_optional(&mut *tx).await? else {
            return Ok(None);
        };
        let current = Bike::from_row(&row)?.state()?;

        if let Some(user_id) = requested.user_id() {
            if !UserService::exists(&mut *tx, user_id).await? {
                return Err(AppError::Validation(format!(
                    "user_id {} does not reference an existing user",
                    user_id
                )));
            }
        }
        let next = current.transition(requested)?;

        let sql = format!(
            "UPDATE bikes SET available = ?, user_id = ? WHERE id = ? RETURNING {}",
            Bike::COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query (tx)");
        let row = sqlx::query(&sql)
            .bind(next.available())
            .bind(next.user_id())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let bike = Bike::from_row(&row)?;
        tx.commit().await?;
        tracing::info!(bike_id = id, available = bike.available, user_id = ?bike.user_id, "updated bike status");
        Ok(Some(bike))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BikeState, UserInput};
    use crate::store::testing::test_db;

    async fn rider(pool: &SqlitePool, n: i64) -> i64 {
        let input = UserInput {
            first_name: "Rider".into(),
            last_name: format!("No{}", n),
            phone_num: 7000 + n,
            email: format!("r{}@bikes.test", n),
        };
        UserService::create(pool, &input).await.unwrap().id
    }

    fn rent(user_id: i64) -> BikeStatusUpdate {
        BikeStatusUpdate { available: false, user_id: Some(user_id) }
    }

    fn give_back() -> BikeStatusUpdate {
        BikeStatusUpdate { available: true, user_id: None }
    }

    #[tokio::test]
    async fn new_bikes_start_available_and_unassigned() {
        let db = test_db().await;
        let bike = BikeService::create(&db.pool, &NewBike { longitude: 10, latitude: 20 }).await.unwrap();
        assert_eq!(bike.longitude, 10);
        assert_eq!(bike.latitude, 20);
        assert!(bike.available);
        assert_eq!(bike.user_id, None);
        assert_eq!(BikeService::read(&db.pool, bike.id).await.unwrap(), Some(bike));
    }

    #[tokio::test]
    async fn rent_and_return_round_trip() {
        let db = test_db().await;
        let user = rider(&db.pool, 1).await;
        let bike = BikeService::create(&db.pool, &NewBike { longitude: 1, latitude: 1 }).await.unwrap();

        let rented = BikeService::update_status(&db.pool, bike.id, &rent(user)).await.unwrap().unwrap();
        assert_eq!(rented.state().unwrap(), BikeState::Rented { user_id: user });
        let again = BikeService::update_status(&db.pool, bike.id, &rent(user)).await.unwrap().unwrap();
        assert_eq!(again, rented);

        let returned = BikeService::update_status(&db.pool, bike.id, &give_back()).await.unwrap().unwrap();
        assert!(returned.available);
        assert_eq!(returned.user_id, None);
    }

    #[tokio::test]
    async fn rejects_unknown_renter_and_double_rental() {
        let db = test_db().await;
        let first = rider(&db.pool, 1).await;
        let second = rider(&db.pool, 2).await;
        let bike = BikeService::create(&db.pool, &NewBike { longitude: 0, latitude: 0 }).await.unwrap();

        let err = BikeService::update_status(&db.pool, bike.id, &rent(999)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

        BikeService::update_status(&db.pool, bike.id, &rent(first)).await.unwrap();
        let err = BikeService::update_status(&db.pool, bike.id, &rent(second)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
        let stored = BikeService::read(&db.pool, bike.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, Some(first));
    }

    #[tokio::test]
    async fn inconsistent_pairing_is_rejected_before_touching_storage() {
        let db = test_db().await;
        let bad = BikeStatusUpdate { available: true, user_id: Some(1) };
        let err = BikeService::update_status(&db.pool, 1, &bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(BikeService::update_status(&db.pool, 1, &give_back()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn filters_by_availability_and_by_user() {
        let db = test_db().await;
        let user = rider(&db.pool, 1).await;
        let a = BikeService::create(&db.pool, &NewBike { longitude: 1, latitude: 1 }).await.unwrap();
        let b = BikeService::create(&db.pool, &NewBike { longitude: 2, latitude: 2 }).await.unwrap();
        let c = BikeService::create(&db.pool, &NewBike { longitude: 3, latitude: 3 }).await.unwrap();
        let b = BikeService::update_status(&db.pool, b.id, &rent(user)).await.unwrap().unwrap();

        let available = BikeService::list_by_availability(&db.pool, true).await.unwrap();
        assert_eq!(available, vec![a.clone(), c.clone()]);
        let rented = BikeService::list_by_availability(&db.pool, false).await.unwrap();
        assert_eq!(rented, vec![b.clone()]);

        assert_eq!(BikeService::list_by_user(&db.pool, user).await.unwrap(), Some(vec![b.clone()]));
        assert_eq!(BikeService::list_by_user(&db.pool, 404).await.unwrap(), None);
        assert_eq!(BikeService::list(&db.pool).await.unwrap(), vec![a, b, c]);
    }

    #[tokio::test]
    async fn renter_cannot_be_deleted_until_bike_is_returned() {
        let db = test_db().await;
        let user = rider(&db.pool, 1).await;
        let bike = BikeService::create(&db.pool, &NewBike { longitude: 5, latitude: 5 }).await.unwrap();
        BikeService::update_status(&db.pool, bike.id, &rent(user)).await.unwrap();

        let err = UserService::delete(&db.pool, user).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        BikeService::update_status(&db.pool, bike.id, &give_back()).await.unwrap();
        assert!(UserService::delete(&db.pool, user).await.unwrap().is_some());
    }
}
