use crate::error::PersistenceError;
use crate::persistence::PersistenceGateway;

/// The dark-mode display preference.
pub struct PreferenceStore {
    dark_mode: bool,
    gateway: PersistenceGateway,
}

impl PreferenceStore {
    pub fn new(dark_mode: bool, gateway: PersistenceGateway) -> Self {
        Self { dark_mode, gateway }
    }

    pub fn load(gateway: PersistenceGateway) -> Self {
        let dark_mode = gateway.load_preference();
        Self::new(dark_mode, gateway)
    }

    pub fn get(&self) -> bool {
        self.dark_mode
    }

    /// Writes through on every call, even when the value is unchanged.
    /// On failure the previous value is kept.
    pub fn set(&mut self, dark_mode: bool) -> Result<(), PersistenceError> {
        self.gateway.save_preference(dark_mode)?;
        self.dark_mode = dark_mode;
        log::debug!("dark mode set value={dark_mode}");
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<bool, PersistenceError> {
        let next = !self.dark_mode;
        self.set(next)?;
        Ok(next)
    }
}
