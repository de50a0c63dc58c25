//! Driving port for personalised evacuation advice.

use async_trait::async_trait;

use crate::domain::{Advice, Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdviceQuery: Send + Sync {
    /// Advice for the stored profile of `identity`.
    async fn advice_for(&self, identity: &Identity) -> Result<Advice, Error>;
}
