//! License service - CRUD for driver licenses.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    ensure_confirmed, CreateLicense, License, LicenseChanges, NewLicense, Password, UpdateLicense,
    ENTITY_LICENSE, FIELD_EMAIL, FIELD_LICENSE_NUMBER,
};

use crate::repository::LicenseRepository;

/// License service trait for dependency injection.
#[async_trait]
pub trait LicenseService: Send + Sync {
    /// Validate, hash and store a new license
    async fn create_license(&self, input: CreateLicense) -> AppResult<License>;

    /// List every license
    async fn list_licenses(&self) -> AppResult<Vec<License>>;

    /// Get license by ID
    async fn get_license(&self, id: Uuid) -> AppResult<License>;

    /// Change the supplied fields of a license
    async fn update_license(&self, id: Uuid, input: UpdateLicense) -> AppResult<License>;

    /// Permanently delete a license
    async fn delete_license(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of LicenseService using a repository.
pub struct LicenseManager {
    repo: Arc<dyn LicenseRepository>,
}

impl LicenseManager {
    pub fn new(repo: Arc<dyn LicenseRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_license_number_free(&self, license_number: &str) -> AppResult<()> {
        if self
            .repo
            .find_by_license_number(license_number)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(FIELD_LICENSE_NUMBER));
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(FIELD_EMAIL));
        }
        Ok(())
    }
}

async fn hash_password(plain_text: String) -> AppResult<String> {
    let password = tokio::task::spawn_blocking(move || Password::new_unchecked(&plain_text))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))??;
    Ok(password.into_string())
}

#[async_trait]
impl LicenseService for LicenseManager {
    async fn create_license(&self, input: CreateLicense) -> AppResult<License> {
        let valid = input.validate()?;

        self.ensure_license_number_free(&valid.license_number)
            .await?;
        self.ensure_email_free(&valid.email).await?;

        let password_hash = hash_password(valid.password).await?;
        let license = self
            .repo
            .create(NewLicense {
                full_name: valid.full_name,
                license_number: valid.license_number,
                email: valid.email,
                password_hash,
            })
            .await?;

        info!(license_id = %license.id, "License created");
        Ok(license)
    }

    async fn list_licenses(&self) -> AppResult<Vec<License>> {
        self.repo.list().await
    }

    async fn get_license(&self, id: Uuid) -> AppResult<License> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found(ENTITY_LICENSE)
    }

    async fn update_license(&self, id: Uuid, input: UpdateLicense) -> AppResult<License> {
        let input = input.normalized();
        let current = self.get_license(id).await?;

        if let Some(license_number) = input.license_number.as_deref() {
            if license_number != current.license_number {
                self.ensure_license_number_free(license_number).await?;
            }
        }
        if let Some(email) = input.email.as_deref() {
            if email != current.email {
                self.ensure_email_free(email).await?;
            }
        }

        // A password without its confirmation is ignored.
        let password_hash = match (input.password, input.confirm_password) {
            (Some(password), Some(confirm_password)) => {
                ensure_confirmed(&password, &confirm_password)?;
                Some(hash_password(password).await?)
            }
            _ => None,
        };

        let changes = LicenseChanges {
            full_name: input.full_name,
            license_number: input.license_number,
            email: input.email,
            password_hash,
        };
        let license = self.repo.update(id, changes).await?;

        info!(license_id = %license.id, "License updated");
        Ok(license)
    }

    async fn delete_license(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(license_id = %id, "License deleted");
        Ok(())
    }
}
