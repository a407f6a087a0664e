//! In-memory license repository for tests.
//!
//! Mirrors the SeaORM store's semantics, including both unique indexes.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    License, LicenseChanges, NewLicense, ENTITY_LICENSE, FIELD_EMAIL, FIELD_LICENSE_NUMBER,
};

use super::LicenseRepository;

/// Vec-backed license store preserving insertion order
#[derive(Default)]
pub struct InMemoryLicenseStore {
    licenses: RwLock<Vec<License>>,
}

impl InMemoryLicenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored licenses
    pub async fn len(&self) -> usize {
        self.licenses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.licenses.read().await.is_empty()
    }
}

/// Unique-index check against every record other than `except`
fn check_unique(
    licenses: &[License],
    except: Option<Uuid>,
    license_number: Option<&str>,
    email: Option<&str>,
) -> AppResult<()> {
    let others = || licenses.iter().filter(move |l| Some(l.id) != except);

    if let Some(number) = license_number {
        if others().any(|l| l.license_number == number) {
            return Err(AppError::conflict(FIELD_LICENSE_NUMBER));
        }
    }
    if let Some(email) = email {
        if others().any(|l| l.email == email) {
            return Err(AppError::conflict(FIELD_EMAIL));
        }
    }
    Ok(())
}

#[async_trait]
impl LicenseRepository for InMemoryLicenseStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<License>> {
        Ok(self
            .licenses
            .read()
            .await
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn find_by_license_number(&self, license_number: &str) -> AppResult<Option<License>> {
        Ok(self
            .licenses
            .read()
            .await
            .iter()
            .find(|l| l.license_number == license_number)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<License>> {
        Ok(self
            .licenses
            .read()
            .await
            .iter()
            .find(|l| l.email == email)
            .cloned())
    }

    async fn create(&self, license: NewLicense) -> AppResult<License> {
        let mut licenses = self.licenses.write().await;
        check_unique(
            &licenses,
            None,
            Some(&license.license_number),
            Some(&license.email),
        )?;

        let now = Utc::now();
        let license = License {
            id: Uuid::new_v4(),
            full_name: license.full_name,
            license_number: license.license_number,
            email: license.email,
            password_hash: license.password_hash,
            created_at: now,
            updated_at: now,
        };
        licenses.push(license.clone());
        Ok(license)
    }

    async fn update(&self, id: Uuid, changes: LicenseChanges) -> AppResult<License> {
        let mut licenses = self.licenses.write().await;
        check_unique(
            &licenses,
            Some(id),
            changes.license_number.as_deref(),
            changes.email.as_deref(),
        )?;

        let license = licenses
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_not_found(ENTITY_LICENSE)?;

        if let Some(full_name) = changes.full_name {
            license.full_name = full_name;
        }
        if let Some(license_number) = changes.license_number {
            license.license_number = license_number;
        }
        if let Some(email) = changes.email {
            license.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            license.password_hash = password_hash;
        }
        license.updated_at = Utc::now();

        Ok(license.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut licenses = self.licenses.write().await;
        let before = licenses.len();
        licenses.retain(|l| l.id != id);

        if licenses.len() == before {
            return Err(AppError::not_found(ENTITY_LICENSE));
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<License>> {
        Ok(self.licenses.read().await.clone())
    }
}
