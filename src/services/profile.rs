use tracing::{error, info};

use crate::db::KeyValueStore;
use crate::error::Result;
use crate::models::Profile;

const PROFILE_KEY: &str = "profile";

/// The single business profile record. Like the bill repository, failures
/// never escape: they are logged and read as "no profile" / `false`.
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        ProfileStore { store }
    }

    /// Overwrites any existing profile wholesale.
    pub fn save_profile(&self, profile: &Profile) -> bool {
        match self.try_save(profile) {
            Ok(()) => {
                info!("Saved profile for {}", profile.company_name);
                true
            }
            Err(err) => {
                error!("Error saving profile: {}", err);
                false
            }
        }
    }

    fn try_save(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.store.set(PROFILE_KEY, &json)
    }

    pub fn get_profile(&self) -> Option<Profile> {
        match self.try_get() {
            Ok(profile) => profile,
            Err(err) => {
                error!("Error getting profile: {}", err);
                None
            }
        }
    }

    fn try_get(&self) -> Result<Option<Profile>> {
        match self.store.get(PROFILE_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn has_profile(&self) -> bool {
        self.get_profile().is_some()
    }
}
