use thiserror::Error;

use crate::Discovery;

/// A parsed document violates a semantic rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The document claims no account name.
    #[error("account name is empty")]
    EmptyAccountName,

    /// The document names no organization.
    #[error("organization name is empty")]
    EmptyOrganizationName,

    /// The claimed account name is not a legal chain account name.
    #[error("account name {0:?} contains characters outside [a-z0-9.-]")]
    InvalidAccountName(String),

    /// A document may target the test network or the main network, not both.
    #[error("document claims both testnet and mainnet")]
    AmbiguousNetwork,
}

impl Discovery {
    /// Check the document against the semantic rules every traversed
    /// document must satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.account_name.is_empty() {
            return Err(ValidationError::EmptyAccountName);
        }
        if !self
            .account_name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-'))
        {
            return Err(ValidationError::InvalidAccountName(
                self.account_name.clone(),
            ));
        }
        if self.organization_name.is_empty() {
            return Err(ValidationError::EmptyOrganizationName);
        }
        if self.testnet && self.mainnet {
            return Err(ValidationError::AmbiguousNetwork);
        }
        Ok(())
    }
}
