//! Alert, confirm, and prompt dialog helpers.

use crate::browser::Browser;
use crate::errors::Result;

impl Browser {
    /// Message of the currently open dialog.
    pub async fn get_alert_text(&self) -> Result<String> {
        Ok(self.driver.alert_text().await?)
    }

    /// Type into the currently open prompt dialog.
    pub async fn type_into_alert(&self, text: &str) -> Result<()> {
        self.driver.type_into_alert(text).await?;
        Ok(())
    }

    pub async fn accept_alert(&self) -> Result<()> {
        self.driver.accept_alert().await?;
        Ok(())
    }

    pub async fn dismiss_alert(&self) -> Result<()> {
        self.driver.dismiss_alert().await?;
        Ok(())
    }
}
