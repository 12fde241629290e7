//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{DateOfBirth, Demographics, Gender, HouseholdSize, Occupation, User};
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> Result<(), DomainError> {
        let demographics = user.demographics();
        sqlx::query(
            r#"
            INSERT INTO users (
                id, display_name, icon_url, registered,
                city, prefecture, gender, household_size, occupation, date_of_birth,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                icon_url = EXCLUDED.icon_url,
                registered = EXCLUDED.registered,
                city = EXCLUDED.city,
                prefecture = EXCLUDED.prefecture,
                gender = EXCLUDED.gender,
                household_size = EXCLUDED.household_size,
                occupation = EXCLUDED.occupation,
                date_of_birth = EXCLUDED.date_of_birth
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.display_name())
        .bind(user.icon_url())
        .bind(user.is_registered())
        .bind(demographics.city())
        .bind(demographics.prefecture())
        .bind(demographics.gender().map(gender_to_str))
        .bind(demographics.household_size().map(|h| i32::from(h.value())))
        .bind(demographics.occupation().map(occupation_to_str))
        .bind(demographics.date_of_birth().map(|d| d.value()))
        .bind(user.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to store user", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, display_name, icon_url, registered,
                   city, prefecture, gender, household_size, occupation, date_of_birth,
                   created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user", e))?;

        match row {
            Some(row) => Ok(Some(row_to_user(row)?)),
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn gender_to_str(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
        Gender::Other => "other",
        Gender::PreferNotToSay => "prefer_not_to_say",
    }
}

fn str_to_gender(s: &str) -> Result<Gender, DomainError> {
    match s {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        "prefer_not_to_say" => Ok(Gender::PreferNotToSay),
        _ => Err(db_error("Invalid stored gender", s)),
    }
}

fn occupation_to_str(occupation: Occupation) -> &'static str {
    match occupation {
        Occupation::FullTimeEmployee => "full_time_employee",
        Occupation::ContractEmployee => "contract_employee",
        Occupation::PublicServant => "public_servant",
        Occupation::SelfEmployed => "self_employed",
        Occupation::Executive => "executive",
        Occupation::PartTime => "part_time",
        Occupation::HomeMaker => "home_maker",
        Occupation::Student => "student",
        Occupation::Unemployed => "unemployed",
        Occupation::Other => "other",
    }
}

fn str_to_occupation(s: &str) -> Result<Occupation, DomainError> {
    match s {
        "full_time_employee" => Ok(Occupation::FullTimeEmployee),
        "contract_employee" => Ok(Occupation::ContractEmployee),
        "public_servant" => Ok(Occupation::PublicServant),
        "self_employed" => Ok(Occupation::SelfEmployed),
        "executive" => Ok(Occupation::Executive),
        "part_time" => Ok(Occupation::PartTime),
        "home_maker" => Ok(Occupation::HomeMaker),
        "student" => Ok(Occupation::Student),
        "unemployed" => Ok(Occupation::Unemployed),
        "other" => Ok(Occupation::Other),
        _ => Err(db_error("Invalid stored occupation", s)),
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let display_name: String = row
        .try_get("display_name")
        .map_err(|e| db_error("Failed to get display_name", e))?;
    let icon_url: Option<String> = row
        .try_get("icon_url")
        .map_err(|e| db_error("Failed to get icon_url", e))?;
    let registered: bool = row
        .try_get("registered")
        .map_err(|e| db_error("Failed to get registered", e))?;
    let city: Option<String> = row
        .try_get("city")
        .map_err(|e| db_error("Failed to get city", e))?;
    let prefecture: Option<String> = row
        .try_get("prefecture")
        .map_err(|e| db_error("Failed to get prefecture", e))?;
    let gender_str: Option<String> = row
        .try_get("gender")
        .map_err(|e| db_error("Failed to get gender", e))?;
    let household_size: Option<i32> = row
        .try_get("household_size")
        .map_err(|e| db_error("Failed to get household_size", e))?;
    let occupation_str: Option<String> = row
        .try_get("occupation")
        .map_err(|e| db_error("Failed to get occupation", e))?;
    let date_of_birth: Option<i32> = row
        .try_get("date_of_birth")
        .map_err(|e| db_error("Failed to get date_of_birth", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    let gender = gender_str.as_deref().map(str_to_gender).transpose()?;
    let occupation = occupation_str.as_deref().map(str_to_occupation).transpose()?;
    let date_of_birth = date_of_birth
        .map(DateOfBirth::new)
        .transpose()
        .map_err(|e| db_error("Invalid stored date_of_birth", e))?;

    let demographics = Demographics::new(
        city,
        prefecture,
        gender,
        household_size.map(|h| HouseholdSize::new(h as u8)),
        occupation,
        date_of_birth,
    );

    Ok(User::reconstitute(
        UserId::from_uuid(id),
        display_name,
        icon_url,
        registered,
        demographics,
        Timestamp::from_datetime(created_at),
    ))
}
