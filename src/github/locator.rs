//! Identity wrappers for repositories and discussions.

use super::error::DiscussionError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, DiscussionError> {
        if value.trim().is_empty() {
            return Err(DiscussionError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, DiscussionError> {
        if value.trim().is_empty() {
            return Err(DiscussionError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Discussion number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscussionNumber(u64);

impl DiscussionNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::InvalidDiscussionNumber` for zero.
    pub const fn new(value: u64) -> Result<Self, DiscussionError> {
        if value == 0 {
            return Err(DiscussionError::InvalidDiscussionNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, DiscussionError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DiscussionError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Repository coordinates.
///
/// # Example
///
/// ```
/// use palaver::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_owner_repo("octo", "repo")
///     .expect("should build locator");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator from owner and repository names.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::MissingPathSegments` when owner or repo is
    /// empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, DiscussionError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the REST path for listing discussions.
    pub(crate) fn discussions_path(&self) -> String {
        format!(
            "/repos/{}/{}/discussions",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
