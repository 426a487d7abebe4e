//! Window, frame, and page-metadata helpers.

use crate::browser::Browser;
use crate::errors::Result;
use driver_adapter::WindowSize;

impl Browser {
    pub async fn get_page_title(&self) -> Result<String> {
        Ok(self.driver.title().await?)
    }

    pub async fn get_page_source(&self) -> Result<String> {
        Ok(self.driver.source().await?)
    }

    /// PNG bytes of the current viewport.
    pub async fn get_screenshot(&self) -> Result<Vec<u8>> {
        Ok(self.driver.screenshot().await?)
    }

    pub async fn get_page_size(&self) -> Result<WindowSize> {
        Ok(self.driver.window_size().await?)
    }

    pub async fn set_page_size(&self, size: WindowSize) -> Result<()> {
        self.driver.set_window_size(size).await?;
        Ok(())
    }

    /// Switch into the frame with the given id.
    pub async fn switch_to_frame(&self, id: &str) -> Result<()> {
        self.driver.switch_to_frame(Some(id)).await?;
        Ok(())
    }

    /// Switch back to the top-level document.
    pub async fn switch_to_default_frame(&self) -> Result<()> {
        self.driver.switch_to_frame(None).await?;
        Ok(())
    }

    pub async fn switch_to_window(&self, id: &str) -> Result<()> {
        self.driver.switch_to_window(id).await?;
        Ok(())
    }

    /// Close the current window; the session stays alive.
    pub async fn close_window(&self) -> Result<()> {
        self.driver.close_window().await?;
        Ok(())
    }
}
