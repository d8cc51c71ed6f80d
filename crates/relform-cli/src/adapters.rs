//! Terminal implementations of the messaging and navigation ports
//!
//! - [`TerminalMessenger`] prints user-visible messages as warnings.
//! - [`TerminalNavigator`] has no screens to switch; it records the last
//!   route so commands can report where the user would have been sent.

use std::sync::Mutex;

use async_trait::async_trait;
use relform_core::{
    domain::Route,
    ports::{IMessenger, INavigator, Message},
};
use tracing::info;

use crate::output::{get_formatter, OutputFormat};

pub struct TerminalMessenger {
    format: OutputFormat,
}

impl TerminalMessenger {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

#[async_trait]
impl IMessenger for TerminalMessenger {
    async fn report(&self, message: &Message) -> anyhow::Result<()> {
        get_formatter(self.format).warn(&message.text);
        Ok(())
    }
}

#[derive(Default)]
pub struct TerminalNavigator {
    last_route: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route of the most recent navigation, if any
    pub fn last_route(&self) -> Option<Route> {
        self.last_route.lock().ok().and_then(|route| route.clone())
    }
}

#[async_trait]
impl INavigator for TerminalNavigator {
    async fn navigate(&self, route: &Route) -> anyhow::Result<()> {
        info!(route = %route, "Navigating");
        let mut last = self
            .last_route
            .lock()
            .map_err(|_| anyhow::anyhow!("Navigator lock poisoned"))?;
        *last = Some(route.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigator_records_last_route() {
        let navigator = TerminalNavigator::new();
        assert!(navigator.last_route().is_none());

        navigator.navigate(&Route::entry()).await.unwrap();
        navigator
            .navigate(&Route::new("main/related-user".to_string()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            navigator.last_route().map(|r| r.as_str().to_string()),
            Some("main/related-user".to_string())
        );
    }

    #[tokio::test]
    async fn test_messenger_report_succeeds() {
        let messenger = TerminalMessenger::new(OutputFormat::Json);
        assert!(messenger.report(&Message::new("Saved")).await.is_ok());
    }
}
