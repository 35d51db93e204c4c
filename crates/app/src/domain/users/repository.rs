//! Guest Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::users::records::{GuestUserRecord, NewGuestUser};

const UPSERT_GUEST_USER_SQL: &str = include_str!("sql/upsert_guest_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGuestUsersRepository;

impl PgGuestUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Create the guest, or refresh name and phone when the email is known.
    pub(crate) async fn upsert_guest_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        guest: NewGuestUser,
    ) -> Result<GuestUserRecord, sqlx::Error> {
        query_as::<Postgres, GuestUserRecord>(UPSERT_GUEST_USER_SQL)
            .bind(guest.email)
            .bind(guest.name)
            .bind(guest.phone)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for GuestUserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
