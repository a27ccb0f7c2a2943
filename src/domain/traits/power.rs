use async_trait::async_trait;
use crate::domain::entities::PowerAction;
use crate::application::errors::ActionError;

/// Power control trait - abstraction over the host's power-management utilities
///
/// One implementation exists per OS family; the listener picks one at startup
/// and never re-branches on the platform afterwards.
#[async_trait]
pub trait PowerControl: Send + Sync {
    /// Power off the host
    async fn shutdown(&self) -> Result<(), ActionError>;

    /// Restart the host
    async fn reboot(&self) -> Result<(), ActionError>;

    /// Suspend the host to RAM
    async fn sleep(&self) -> Result<(), ActionError>;

    /// Suspend the host to disk
    async fn hibernate(&self) -> Result<(), ActionError>;

    /// Label of the OS family this implementation targets
    fn name(&self) -> &'static str;

    /// Route an action to its handler
    async fn perform(&self, action: PowerAction) -> Result<(), ActionError> {
        match action {
            PowerAction::Shutdown => self.shutdown().await,
            PowerAction::Reboot => self.reboot().await,
            PowerAction::Sleep => self.sleep().await,
            PowerAction::Hibernate => self.hibernate().await,
        }
    }
}
