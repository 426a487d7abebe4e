//! Form-field helpers.

use crate::browser::Browser;
use crate::errors::Result;

impl Browser {
    /// Clear the value of the field matching `selector`.
    pub async fn clear(&self, selector: &str) -> Result<()> {
        self.get_element(selector).await?.clear().await?;
        Ok(())
    }

    /// Type `text` into the field matching `selector`, keeping its value.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        self.get_element(selector).await?.type_text(text).await?;
        Ok(())
    }

    /// Clear the field matching `selector`, then type `text`.
    pub async fn clear_and_type(&self, selector: &str, text: &str) -> Result<()> {
        let element = self.get_element(selector).await?;
        element.clear().await?;
        element.type_text(text).await?;
        Ok(())
    }
}
