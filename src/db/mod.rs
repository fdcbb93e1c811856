use anyhow::{Context as _, Result};
use poise::serenity_prelude::UserId;
use rusqlite::Connection;
use tokio::sync::{mpsc, oneshot};

pub mod db_thread;
pub mod read;
pub mod write;

pub fn initialise_tables(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        -- One row per user granted access to the gated commands
        CREATE TABLE IF NOT EXISTS access_grants (
            user_id INTEGER PRIMARY KEY
        );
        ",
    )
}

/// Async handle to the access-grant store. All queries run on the dedicated
/// database thread; a dropped channel means the store is gone and every request
/// fails, which the access gate treats as deny.
pub struct StoreHandle {
    tx: mpsc::Sender<StoreRequest>,
}

impl StoreHandle {
    pub fn new(tx: mpsc::Sender<StoreRequest>) -> Self {
        Self { tx }
    }

    pub async fn find_grant(&self, user: UserId) -> Result<bool> {
        self.dispatch(|response_tx| StoreRequest::FindGrant { user, response_tx })
            .await?
            .context("Failed to look up access grant")
    }

    /// Returns `true` if a new grant was inserted, `false` if the user was
    /// already granted. Never creates a duplicate row.
    pub async fn insert_grant(&self, user: UserId) -> Result<bool> {
        self.dispatch(|response_tx| StoreRequest::InsertGrant { user, response_tx })
            .await?
            .context("Failed to insert access grant")
    }

    /// Returns whether a grant existed for the user.
    pub async fn delete_grant(&self, user: UserId) -> Result<bool> {
        self.dispatch(|response_tx| StoreRequest::DeleteGrant { user, response_tx })
            .await?
            .context("Failed to delete access grant")
    }

    pub async fn list_grants(&self) -> Result<Vec<UserId>> {
        self.dispatch(|response_tx| StoreRequest::ListGrants { response_tx })
            .await?
            .context("Failed to list access grants")
    }

    async fn dispatch<T>(
        &self,
        request: impl FnOnce(oneshot::Sender<T>) -> StoreRequest,
    ) -> Result<T> {
        let (response_tx, response_rx) = oneshot::channel();
        self.tx
            .send(request(response_tx))
            .await
            .context("Access store is unavailable")?;
        response_rx
            .await
            .context("Access store dropped the request")
    }
}

pub enum StoreRequest {
    FindGrant {
        user: UserId,
        response_tx: oneshot::Sender<rusqlite::Result<bool>>,
    },
    InsertGrant {
        user: UserId,
        response_tx: oneshot::Sender<rusqlite::Result<bool>>,
    },
    DeleteGrant {
        user: UserId,
        response_tx: oneshot::Sender<rusqlite::Result<bool>>,
    },
    ListGrants {
        response_tx: oneshot::Sender<rusqlite::Result<Vec<UserId>>>,
    },
}

impl StoreRequest {
    fn execute(self, conn: &mut Connection) {
        match self {
            StoreRequest::FindGrant { user, response_tx } => {
                let _ = response_tx.send(read::find_grant(conn, user));
            }
            StoreRequest::InsertGrant { user, response_tx } => {
                let _ = response_tx.send(write::insert_grant(conn, user));
            }
            StoreRequest::DeleteGrant { user, response_tx } => {
                let _ = response_tx.send(write::delete_grant(conn, user));
            }
            StoreRequest::ListGrants { response_tx } => {
                let _ = response_tx.send(read::list_grants(conn));
            }
        }
    }
}
