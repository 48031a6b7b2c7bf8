use color_eyre::Result;
use keyring::Entry;

/// Persistent home of the access token.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str) -> Result<()>;
    fn load(&self) -> Result<Option<String>>;
    fn clear(&self) -> Result<()>;
}

impl TokenStore for Entry {
    fn save(&self, token: &str) -> Result<()> {
        self.set_password(token)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        match self.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<()> {
        match self.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
