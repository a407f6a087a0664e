//! License repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::license::{self, ActiveModel, Entity as LicenseEntity};
use common::{write_error, AppError, AppResult, OptionExt};
use domain::{
    License, LicenseChanges, NewLicense, ENTITY_LICENSE, FIELD_EMAIL, FIELD_LICENSE_NUMBER,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// License repository trait for dependency injection.
///
/// License number and email are both unique; `create` and `update` report a
/// violation as a conflict on the offending field.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LicenseRepository: Send + Sync {
    /// Find license by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<License>>;

    /// Find license by exact license number
    async fn find_by_license_number(&self, license_number: &str) -> AppResult<Option<License>>;

    /// Find license by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<License>>;

    /// Insert a new license with a store-generated ID
    async fn create(&self, license: NewLicense) -> AppResult<License>;

    /// Apply the supplied changes to an existing license
    async fn update(&self, id: Uuid, changes: LicenseChanges) -> AppResult<License>;

    /// Permanently delete license by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List all licenses, oldest first
    async fn list(&self) -> AppResult<Vec<License>>;
}

/// Name the unique field a constraint violation refers to.
fn violated_field(detail: &str) -> &'static str {
    if detail.contains("license_number") {
        FIELD_LICENSE_NUMBER
    } else {
        FIELD_EMAIL
    }
}

/// SeaORM-backed implementation of LicenseRepository
pub struct LicenseStore {
    db: DatabaseConnection,
}

impl LicenseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_by(&self, column: license::Column, value: &str) -> AppResult<Option<License>> {
        let found = LicenseEntity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await?;
        Ok(found.map(License::from))
    }
}

#[async_trait]
impl LicenseRepository for LicenseStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<License>> {
        let found = LicenseEntity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(License::from))
    }

    async fn find_by_license_number(&self, license_number: &str) -> AppResult<Option<License>> {
        self.find_by(license::Column::LicenseNumber, license_number)
            .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<License>> {
        self.find_by(license::Column::Email, email).await
    }

    async fn create(&self, license: NewLicense) -> AppResult<License> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(license.full_name),
            license_number: Set(license.license_number),
            email: Set(license.email),
            password_hash: Set(license.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, violated_field))?;
        Ok(License::from(model))
    }

    async fn update(&self, id: Uuid, changes: LicenseChanges) -> AppResult<License> {
        let mut active: ActiveModel = LicenseEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(ENTITY_LICENSE)?
            .into();

        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(license_number) = changes.license_number {
            active.license_number = Set(license_number);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, violated_field))?;
        Ok(License::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = LicenseEntity::delete_by_id(id).exec(&self.db).await?;
        match result.rows_affected {
            0 => Err(AppError::not_found(ENTITY_LICENSE)),
            _ => Ok(()),
        }
    }

    async fn list(&self) -> AppResult<Vec<License>> {
        let rows = LicenseEntity::find()
            .order_by_asc(license::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(License::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violated_field_from_constraint_name() {
        assert_eq!(
            violated_field(
                "duplicate key value violates unique constraint \"idx_licenses_license_number\""
            ),
            FIELD_LICENSE_NUMBER
        );
        assert_eq!(
            violated_field("duplicate key value violates unique constraint \"idx_licenses_email\""),
            FIELD_EMAIL
        );
    }
}
