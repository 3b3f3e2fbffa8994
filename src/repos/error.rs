/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

use crate::repos::partial_update::PartialUpdateError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    PartialUpdate(#[from] PartialUpdateError),
}

pub type RepoResult<T> = Result<T, RepoError>;
