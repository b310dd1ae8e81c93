//! Composition root: builds the credential store, session context, API client
//! and navigator from one [`AppConfig`] and hands out shared handles.

use crate::{
    api::ApiClient,
    config::AppConfig,
    errors::AppError,
    features::auth::{
        state::SessionContext,
        store::{CredentialStore, FileStore},
    },
    routes::{RouteTable, navigator::Navigator},
};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct App {
    config: AppConfig,
    session: SessionContext,
    api: ApiClient,
}

impl App {
    /// Wires everything on top of the file-backed store from `config`.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let store = Arc::new(FileStore::new(
            config.storage_path.clone(),
            config.token_key.clone(),
        ));
        debug!(path = %store.path().display(), "using credential file");
        Self::with_store(config, store)
    }

    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let session = SessionContext::new(store.clone())?;
        let api = ApiClient::new(&config, store)?;
        Ok(Self {
            config,
            session,
            api,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// A navigator over the application routes sharing this session.
    pub fn navigator(&self) -> Result<Navigator, AppError> {
        Ok(Navigator::new(
            RouteTable::app_routes()?,
            self.session.clone(),
            &self.config.app_title,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::App;
    use crate::{
        config::AppConfig,
        features::auth::store::{CredentialStore, FileStore, MemoryStore},
        routes::paths,
    };
    use std::sync::Arc;

    #[test]
    fn startup_picks_up_persisted_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"access_token":"abc123"}"#).unwrap();

        let config = AppConfig {
            storage_path: path,
            ..AppConfig::default()
        };
        let app = App::new(config).unwrap();
        assert!(app.session().is_authenticated());

        let nav = app.navigator().unwrap().navigate(paths::LOGIN).unwrap();
        assert_eq!(nav.path, paths::CHAT);
    }

    #[test]
    fn empty_persisted_token_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"access_token":""}"#).unwrap();

        let config = AppConfig {
            storage_path: path,
            ..AppConfig::default()
        };
        let app = App::new(config).unwrap();
        assert!(!app.session().is_authenticated());

        let nav = app.navigator().unwrap().navigate(paths::CHAT).unwrap();
        assert_eq!(nav.path, paths::LOGIN);
    }

    #[test]
    fn handles_share_one_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("s.json"), "access_token"));
        let app = App::with_store(AppConfig::default(), store.clone()).unwrap();
        assert!(!app.session().is_authenticated());

        store
            .set(&secrecy::SecretString::from("t".to_string()))
            .unwrap();
        assert!(app.session().credential_changed().unwrap());
        assert!(app.clone().session().is_authenticated());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AppConfig {
            api_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(App::with_store(config, Arc::new(MemoryStore::new())).is_err());
    }
}
