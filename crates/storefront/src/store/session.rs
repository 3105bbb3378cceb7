//! [`LocalStore`] backed by the shopper's session.

use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use super::{LocalStore, StoreError, StoreKey};

impl From<SessionError> for StoreError {
    fn from(err: SessionError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl LocalStore for Session {
    async fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        match self.get::<String>(key.as_str()).await {
            Ok(value) => Ok(value),
            // Something that isn't text was stored under the key
            Err(SessionError::SerdeJson(e)) => {
                tracing::warn!(key = %key, error = %e, "Session value is not text");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        self.insert(key.as_str(), value).await?;
        Ok(())
    }

    async fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.remove_value(key.as_str()).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_roundtrip() {
        let session = session();
        session
            .write(StoreKey::Cart, "[]".to_string())
            .await
            .unwrap();
        assert_eq!(
            session.read(StoreKey::Cart).await.unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(session.read(StoreKey::Wishlist).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove() {
        let session = session();
        session
            .write(StoreKey::Cart, "[]".to_string())
            .await
            .unwrap();
        LocalStore::remove(&session, StoreKey::Cart).await.unwrap();
        assert_eq!(session.read(StoreKey::Cart).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_text_value_reads_as_absent() {
        let session = session();
        session.insert("cart", 42).await.unwrap();
        assert_eq!(session.read(StoreKey::Cart).await.unwrap(), None);
    }
}
