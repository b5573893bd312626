use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::accounts::model::{Account, UpdateProfileDto};
use crate::modules::accounts::repo::AccountStore;
use crate::utils::errors::AppError;

pub struct AccountService;

impl AccountService {
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, account_id: i64) -> Result<Account, AppError> {
        AccountStore::get_profile(db, account_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("account not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        account_id: i64,
        dto: UpdateProfileDto,
    ) -> Result<(), AppError> {
        let updated = AccountStore::update_profile(db, account_id, &dto).await?;

        if !updated {
            return Err(AppError::not_found(anyhow!("account not found")));
        }

        Ok(())
    }
}
