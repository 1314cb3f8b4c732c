use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use super::admin_console::{AdminConsole, ConsoleError, ConsoleFactory};
use crate::modules::admin::application::domain::session::{AdminView, Session};
use crate::modules::content::application::domain::entities::Collection;

pub type SharedConsole = Arc<Mutex<AdminConsole>>;

struct Workspace {
    expires_at: DateTime<Utc>,
    console: SharedConsole,
}

#[derive(Clone)]
pub struct SignedIn {
    pub session: Session,
    pub console: SharedConsole,
    /// Collections whose initial load failed.
    pub failed: Vec<Collection>,
}

/// Live admin consoles keyed by access token. Each console sits behind its
/// own mutex so one admin's mutations run one at a time.
pub struct AdminWorkspaces {
    factory: ConsoleFactory,
    workspaces: RwLock<HashMap<String, Workspace>>,
}

impl AdminWorkspaces {
    pub fn new(factory: ConsoleFactory) -> Self {
        Self {
            factory,
            workspaces: RwLock::new(HashMap::new()),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, ConsoleError> {
        let mut console = self.factory.build();
        let failed = console.sign_in(email, password).await?;
        let session = console
            .session()
            .cloned()
            .ok_or(ConsoleError::NotAuthenticated)?;

        if !failed.is_empty() {
            warn!("Initial load failed for {:?}", failed);
        }

        let console = Arc::new(Mutex::new(console));
        let mut map = self.workspaces.write().await;
        let now = Utc::now();
        map.retain(|_, w| w.expires_at > now);
        map.insert(
            session.access_token.clone(),
            Workspace {
                expires_at: session.expires_at,
                console: Arc::clone(&console),
            },
        );

        Ok(SignedIn {
            session,
            console,
            failed,
        })
    }

    /// The console for `access_token`, built and loaded on first use. Fails
    /// with `NotAuthenticated` once the provider no longer knows the session.
    pub async fn resolve(&self, access_token: &str) -> Result<SharedConsole, ConsoleError> {
        let existing = self
            .workspaces
            .read()
            .await
            .get(access_token)
            .map(|w| Arc::clone(&w.console));

        let console = match existing {
            Some(console) => console,
            None => {
                debug!("Building admin workspace for a new token");
                Arc::new(Mutex::new(self.factory.build()))
            }
        };

        let view = console.lock().await.check_session(access_token).await?;
        if view == AdminView::Login {
            self.workspaces.write().await.remove(access_token);
            return Err(ConsoleError::NotAuthenticated);
        }

        let expires_at = console
            .lock()
            .await
            .session()
            .map(|s| s.expires_at)
            .unwrap_or_else(Utc::now);

        // A concurrent request may have registered this token meanwhile;
        // every caller gets whichever console the map holds.
        let mut map = self.workspaces.write().await;
        let registered = map
            .entry(access_token.to_string())
            .or_insert_with(|| Workspace {
                expires_at,
                console: Arc::clone(&console),
            });

        if !Arc::ptr_eq(&registered.console, &console) {
            debug!("Discarding duplicate admin workspace for a token");
        }

        Ok(Arc::clone(&registered.console))
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), ConsoleError> {
        let console = self.resolve(access_token).await?;
        console.lock().await.sign_out().await?;
        self.workspaces.write().await.remove(access_token);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.workspaces.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
