//! Cookie access and page-metadata retrieval.

use crate::browser::Browser;
use crate::errors::Result;
use driver_adapter::Cookie;

impl Browser {
    /// All cookies visible to the current page.
    pub async fn get_cookies(&self) -> Result<Vec<Cookie>> {
        Ok(self.driver.cookies().await?)
    }

    /// Cookie by name, or `None`.
    pub async fn get_cookie(&self, name: &str) -> Result<Option<Cookie>> {
        let cookies = self.driver.cookies().await?;
        Ok(cookies.into_iter().find(|cookie| cookie.name == name))
    }

    pub async fn set_cookie(&self, cookie: Cookie) -> Result<()> {
        self.driver.set_cookie(cookie).await?;
        Ok(())
    }

    pub async fn set_cookies(&self, cookies: Vec<Cookie>) -> Result<()> {
        for cookie in cookies {
            self.driver.set_cookie(cookie).await?;
        }
        Ok(())
    }

    pub async fn clear_cookie(&self, name: &str) -> Result<()> {
        self.driver.delete_cookie(name).await?;
        Ok(())
    }

    pub async fn clear_cookies(&self) -> Result<()> {
        self.driver.delete_all_cookies().await?;
        Ok(())
    }

    /// Status code of the most recent top-level navigation.
    pub async fn get_status_code(&self) -> Result<u16> {
        Ok(self.driver.status_code().await?)
    }

    /// Response headers of the most recent top-level navigation.
    pub async fn get_headers(&self) -> Result<Vec<(String, String)>> {
        Ok(self.driver.headers().await?)
    }

    /// Response header by name, case-insensitively.
    pub async fn get_header(&self, name: &str) -> Result<Option<String>> {
        let headers = self.driver.headers().await?;
        Ok(headers
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value))
    }
}
