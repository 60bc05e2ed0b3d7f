use crate::domain::model::Session;
use crate::domain::ports::SessionStore;
use crate::utils::error::{Result, TrackerError, ValidationError};

/// 應用程式範圍的登入狀態，明確傳給需要的指令
pub struct SessionManager<S: SessionStore> {
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// 啟動時嘗試還原上一次的身分；檔案損毀時視為未登入
    pub async fn restore(&mut self) -> Option<&Session> {
        match self.store.load().await {
            Ok(session) => {
                if let Some(s) = &session {
                    tracing::debug!("Restored session for {}", s.email);
                }
                self.current = session;
            }
            Err(e) => {
                tracing::warn!("Could not restore session: {}", e);
                self.current = None;
            }
        }
        self.current.as_ref()
    }

    pub async fn sign_in(&mut self, email: &str) -> Result<&Session> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingUser.into());
        }

        let session = Session {
            email: email.to_string(),
        };
        self.store.save(&session).await?;
        tracing::info!("Signed in as {}", session.email);
        Ok(self.current.insert(session))
    }

    pub async fn sign_out(&mut self) -> Result<()> {
        self.current = None;
        self.store.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn require(&self) -> Result<&Session> {
        self.current.as_ref().ok_or(TrackerError::NotAuthenticated)
    }
}
