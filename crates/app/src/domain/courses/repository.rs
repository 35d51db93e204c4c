//! Courses Repository

use enroll::{
    categories::CourseCategory,
    offers::{BogoOffer, CourseOffers, DiscountOffer, OfferWindow},
};
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    courses::records::{CourseRecord, CourseUuid},
    users::UserId,
};

const GET_COURSE_SQL: &str = include_str!("sql/get_course.sql");
const LIST_COURSES_IN_CATEGORY_SQL: &str = include_str!("sql/list_courses_in_category.sql");
const GET_COURSE_ROSTER_SQL: &str = include_str!("sql/get_course_roster.sql");
const APPEND_COURSE_USER_SQL: &str = include_str!("sql/append_course_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCoursesRepository;

impl PgCoursesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_course(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
    ) -> Result<Option<CourseRecord>, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(GET_COURSE_SQL)
            .bind(course.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_courses_in_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &CourseCategory,
    ) -> Result<Vec<CourseRecord>, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(LIST_COURSES_IN_CATEGORY_SQL)
            .bind(category.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_course_roster(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
    ) -> Result<Vec<UserId>, sqlx::Error> {
        let roster: Vec<String> = query_scalar(GET_COURSE_ROSTER_SQL)
            .bind(course.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(roster.into_iter().map(UserId::from).collect())
    }

    /// Append `user` to the roster unless already present or the course is full.
    pub(crate) async fn append_course_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
        user: &UserId,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(APPEND_COURSE_USER_SQL)
            .bind(course.into_uuid())
            .bind(user.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for CourseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category: String = row.try_get("category")?;
        let enrolled_users: Vec<String> = row.try_get("enrolled_users")?;

        let discount = match try_get_opt_u8(row, "discount_percent")? {
            Some(percent) => Some(DiscountOffer {
                percent,
                window: try_get_window(row, "discount_start_at", "discount_end_at")?,
            }),
            None => None,
        };

        let bogo = BogoOffer {
            enabled: row.try_get("bogo_enabled")?,
            window: try_get_window(row, "bogo_start_at", "bogo_end_at")?,
            label: row.try_get("bogo_label")?,
        };

        Ok(Self {
            uuid: CourseUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: CourseCategory::from(category.as_str()),
            short_code: row.try_get("short_code")?,
            offers: CourseOffers {
                base_price: try_get_amount(row, "price")?,
                discount,
                bogo: Some(bogo),
            },
            capacity: try_get_u32(row, "capacity")?.unwrap_or_default(),
            enrolled_users: enrolled_users.into_iter().map(UserId::from).collect(),
            duration: row.try_get("duration")?,
            session_count: try_get_u32(row, "session_count")?,
            start_date: try_get_date(row, "start_date")?,
            end_date: try_get_date(row, "end_date")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_window(row: &PgRow, start: &str, end: &str) -> Result<OfferWindow, sqlx::Error> {
    Ok(OfferWindow {
        start_at: try_get_timestamp(row, start)?,
        end_at: try_get_timestamp(row, end)?,
    })
}

fn try_get_timestamp(row: &PgRow, col: &str) -> Result<Option<jiff::Timestamp>, sqlx::Error> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(col)?
        .map(SqlxTimestamp::to_jiff))
}

pub(crate) fn try_get_date(
    row: &PgRow,
    col: &str,
) -> Result<Option<jiff::civil::Date>, sqlx::Error> {
    Ok(row
        .try_get::<Option<SqlxDate>, _>(col)?
        .map(SqlxDate::to_jiff))
}

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_u32(row: &PgRow, col: &str) -> Result<Option<u32>, sqlx::Error> {
    row.try_get::<Option<i32>, _>(col)?
        .map(u32::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

fn try_get_opt_u8(row: &PgRow, col: &str) -> Result<Option<u8>, sqlx::Error> {
    row.try_get::<Option<i16>, _>(col)?
        .map(u8::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}
