//! Analytics sink port (driven/secondary port)
//!
//! The interface an analytics SDK exposes for named events and user-level
//! properties. All calls are fire-and-forget.

use crate::domain::Parameters;

/// Port trait for an analytics SDK
pub trait IAnalyticsSink: Send + Sync {
    /// Logs a named event with optional parameters
    fn log_event(&self, name: &str, parameters: Option<&Parameters>);

    /// Sets (or clears, with `None`) a user property
    fn set_user_property(&self, value: Option<&str>, name: &str);

    /// Sets (or clears, with `None`) the user identifier
    fn set_user_id(&self, user_id: Option<&str>);

    /// Records the current screen
    ///
    /// # Arguments
    /// * `screen_name` - Name of the screen, `None` to clear it
    /// * `screen_class` - Overrides the class name reported for the screen
    fn set_screen_name(&self, screen_name: Option<&str>, screen_class: Option<&str>);

    /// Identifier of this app installation, as assigned by the SDK
    fn app_instance_id(&self) -> String;

    /// Clears all analytics data for this installation
    fn reset_analytics_data(&self);
}
