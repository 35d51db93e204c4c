//! Enrollments Repository

use enroll::{categories::CourseCategory, plans::Plan, sessions::SessionTier};
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    courses::{
        CourseUuid,
        repository::{try_get_amount, try_get_date, try_get_u32},
    },
    enrollments::records::{BogoBonus, EnrollmentRecord, EnrollmentUuid, NewEnrollment},
    users::UserId,
};

const CREATE_ENROLLMENT_SQL: &str = include_str!("sql/create_enrollment.sql");
const FIND_BOGO_ENROLLMENT_SQL: &str = include_str!("sql/find_bogo_enrollment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEnrollmentsRepository;

impl PgEnrollmentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_enrollment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enrollment: NewEnrollment,
    ) -> Result<EnrollmentRecord, sqlx::Error> {
        let amount_paid = to_i64(enrollment.amount_paid, "amount_paid")?;
        let original_price = to_i64(enrollment.original_price, "original_price")?;
        let session_count = enrollment
            .session_count
            .map(i32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "session_count".to_string(),
                source: Box::new(e),
            })?;

        let bogo = enrollment.bogo.as_ref();

        let created_at: SqlxTimestamp = query_scalar(CREATE_ENROLLMENT_SQL)
            .bind(enrollment.uuid.into_uuid())
            .bind(enrollment.user_id.as_str())
            .bind(&enrollment.user_name)
            .bind(&enrollment.user_email)
            .bind(enrollment.user_phone.as_deref())
            .bind(enrollment.course_uuid.into_uuid())
            .bind(&enrollment.course_name)
            .bind(enrollment.course_category.as_str())
            .bind(enrollment.enrollment_number.as_str())
            .bind(enrollment.plan.map(Plan::as_str))
            .bind(session_count)
            .bind(enrollment.session_tier.map(SessionTier::as_str))
            .bind(enrollment.start_date.map(SqlxDate::from))
            .bind(enrollment.end_date.map(SqlxDate::from))
            .bind(amount_paid)
            .bind(original_price)
            .bind(enrollment.is_guest)
            .bind(bogo.is_some())
            .bind(bogo.map(|bonus| bonus.source_course_uuid.into_uuid()))
            .bind(bogo.map(|bonus| bonus.source_course_name.as_str()))
            .bind(bogo.map(|bonus| bonus.offer_name.as_str()))
            .fetch_one(&mut **tx)
            .await?;

        Ok(enrollment.into_record(created_at.to_jiff()))
    }

    pub(crate) async fn find_bogo_enrollment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &UserId,
        course: CourseUuid,
    ) -> Result<Option<EnrollmentRecord>, sqlx::Error> {
        query_as::<Postgres, EnrollmentRecord>(FIND_BOGO_ENROLLMENT_SQL)
            .bind(user.as_str())
            .bind(course.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for EnrollmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user_id: String = row.try_get("user_id")?;
        let category: String = row.try_get("course_category")?;
        let enrollment_number: String = row.try_get("enrollment_number")?;
        let plan: Option<String> = row.try_get("plan")?;
        let session_tier: Option<String> = row.try_get("session_tier")?;
        let is_bogo_free: bool = row.try_get("is_bogo_free")?;

        let bogo = if is_bogo_free {
            let source_course_uuid: Uuid = row.try_get("bogo_source_course_uuid")?;

            Some(BogoBonus {
                source_course_uuid: CourseUuid::from_uuid(source_course_uuid),
                source_course_name: row
                    .try_get::<Option<String>, _>("bogo_source_course_name")?
                    .unwrap_or_default(),
                offer_name: row
                    .try_get::<Option<String>, _>("bogo_offer_name")?
                    .unwrap_or_default(),
            })
        } else {
            None
        };

        Ok(Self {
            uuid: EnrollmentUuid::from_uuid(row.try_get("uuid")?),
            user_id: UserId::from(user_id),
            user_name: row.try_get("user_name")?,
            user_email: row.try_get("user_email")?,
            user_phone: row.try_get("user_phone")?,
            course_uuid: CourseUuid::from_uuid(row.try_get("course_uuid")?),
            course_name: row.try_get("course_name")?,
            course_category: CourseCategory::from(category.as_str()),
            enrollment_number: enrollment_number.into(),
            plan: plan.as_deref().and_then(Plan::from_tag),
            session_count: try_get_u32(row, "session_count")?,
            session_tier: session_tier.as_deref().and_then(SessionTier::from_tag),
            start_date: try_get_date(row, "start_date")?,
            end_date: try_get_date(row, "end_date")?,
            amount_paid: try_get_amount(row, "amount_paid")?,
            original_price: try_get_amount(row, "original_price")?,
            is_guest: row.try_get("is_guest")?,
            bogo,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

fn to_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
