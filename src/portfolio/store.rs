use super::{Portfolio, PortfolioContent, PortfolioError, PortfolioUpdate};
use chrono::Utc;
use std::sync::{PoisonError, RwLock};

/// Holds the current portfolio document in memory
#[derive(Debug, Default)]
pub struct PortfolioStore {
    current: RwLock<Option<Portfolio>>,
}

impl PortfolioStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seeded(content: PortfolioContent) -> Self {
        Self { current: RwLock::new(Some(Portfolio::new(content))) }
    }

    pub fn current(&self) -> Result<Portfolio, PortfolioError> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone().ok_or(PortfolioError::NotFound)
    }

    /// Replace the current document with a brand new one.
    pub fn create(&self, content: PortfolioContent) -> Result<Portfolio, PortfolioError> {
        content.validate()?;
        let portfolio = Portfolio::new(content);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(portfolio.clone());
        tracing::info!(id = %portfolio.id, "portfolio created");
        Ok(portfolio)
    }

    /// Apply a partial update to the current document. Nothing changes if the result is invalid.
    pub fn update(&self, update: PortfolioUpdate) -> Result<Portfolio, PortfolioError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let portfolio = current.as_mut().ok_or(PortfolioError::NotFound)?;

        let mut content = portfolio.content.clone();
        update.apply_to(&mut content);
        content.validate()?;

        portfolio.content = content;
        portfolio.updated_at = Utc::now();
        tracing::info!(id = %portfolio.id, "portfolio updated");
        Ok(portfolio.clone())
    }
}
