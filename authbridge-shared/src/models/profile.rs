/// Profile model and document store operations
///
/// This module provides the Profile document and its operations against the
/// Redis-backed document store. Each user has at most one profile document,
/// stored as JSON under `profile:<user_id>` and joined to the credential row
/// by the numeric user id (carried in the document as a string).
///
/// # Document shape
///
/// ```json
/// {
///     "userId": "42",
///     "age": 30,
///     "dateOfBirth": "1995-01-01",
///     "contactInformation": "a@b.com",
///     "createdAt": "2025-06-10T12:00:00Z",
///     "updatedAt": "2025-06-11T08:30:00Z"
/// }
/// ```
///
/// An empty profile (all optional fields null) is created at registration
/// time. Updates replace the provided fields wholesale and refresh
/// `updatedAt`; `createdAt` never changes after creation.
///
/// # Example
///
/// ```no_run
/// use authbridge_shared::models::profile::Profile;
/// use authbridge_shared::docstore::client::{DocStore, DocStoreConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let store = DocStore::new(DocStoreConfig::from_env()?).await?;
///
/// // Create the empty profile for a fresh registration
/// let profile = Profile::create_empty(&store, 42).await?;
/// assert!(profile.age.is_none());
///
/// // Read it back
/// let found = Profile::find_by_user_id(&store, 42).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, NaiveDate, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::docstore::client::{DocStore, DocStoreError};

/// Profile document holding optional demographic fields
///
/// Field names serialize in camelCase to match the wire and storage format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Owning user id, stored as an opaque string
    ///
    /// String form of the credential row's BIGSERIAL id
    pub user_id: String,

    /// Age in years, 0 to 150 inclusive (None until set)
    pub age: Option<i64>,

    /// Date of birth as a calendar date (None until set)
    pub date_of_birth: Option<NaiveDate>,

    /// Free-form contact information (None until set)
    pub contact_information: Option<String>,

    /// When the profile document was created
    pub created_at: DateTime<Utc>,

    /// When the profile document was last updated
    pub updated_at: DateTime<Utc>,
}

/// Fields for a profile update
///
/// Outer `None` leaves the stored field untouched; `Some(None)` clears it;
/// `Some(Some(value))` replaces it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileFields {
    /// New age (use Some(None) to clear)
    pub age: Option<Option<i64>>,

    /// New date of birth (use Some(None) to clear)
    pub date_of_birth: Option<Option<NaiveDate>>,

    /// New contact information (use Some(None) to clear)
    pub contact_information: Option<Option<String>>,
}

impl Profile {
    /// Document store key for a user's profile
    pub fn key(user_id: i64) -> String {
        format!("profile:{}", user_id)
    }

    /// Creates the empty profile document for a newly registered user
    ///
    /// All optional fields start as null; `createdAt` and `updatedAt` are set
    /// to the current time. Called during registration right after the
    /// credential row is inserted.
    ///
    /// # Arguments
    ///
    /// * `store` - Document store client
    /// * `user_id` - Id of the freshly created credential row
    ///
    /// # Returns
    ///
    /// The stored empty profile
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written
    pub async fn create_empty(store: &DocStore, user_id: i64) -> Result<Self, DocStoreError> {
        let now = Utc::now();
        let profile = Self {
            user_id: user_id.to_string(),
            age: None,
            date_of_birth: None,
            contact_information: None,
            created_at: now,
            updated_at: now,
        };

        profile.save(store).await?;
        Ok(profile)
    }

    /// Finds a profile document by user id
    ///
    /// # Arguments
    ///
    /// * `store` - Document store client
    /// * `user_id` - Numeric user id
    ///
    /// # Returns
    ///
    /// The profile if a document exists for this user, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored document does not
    /// parse
    pub async fn find_by_user_id(
        store: &DocStore,
        user_id: i64,
    ) -> Result<Option<Self>, DocStoreError> {
        let mut conn = store.get_connection();

        let raw: Option<String> = conn.get(Self::key(user_id)).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Updates a profile document, replacing the provided fields
    ///
    /// Reads the current document, applies `fields` (outer `None` keeps the
    /// stored value, `Some(None)` clears it), refreshes `updatedAt`, and
    /// writes the whole document back. `createdAt` is preserved. Concurrent
    /// updates resolve last-write-wins at the document level.
    ///
    /// # Arguments
    ///
    /// * `store` - Document store client
    /// * `user_id` - Numeric user id
    /// * `fields` - Fields to replace
    ///
    /// # Returns
    ///
    /// The updated profile if a document exists for this user, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authbridge_shared::models::profile::{Profile, UpdateProfileFields};
    /// # use authbridge_shared::docstore::client::DocStore;
    /// # async fn example(store: &DocStore) -> anyhow::Result<()> {
    /// let fields = UpdateProfileFields {
    ///     age: Some(Some(30)),
    ///     contact_information: Some(None), // clear
    ///     ..Default::default()
    /// };
    ///
    /// if let Some(profile) = Profile::update(store, 42, fields).await? {
    ///     println!("updated at {}", profile.updated_at);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update(
        store: &DocStore,
        user_id: i64,
        fields: UpdateProfileFields,
    ) -> Result<Option<Self>, DocStoreError> {
        let Some(mut profile) = Self::find_by_user_id(store, user_id).await? else {
            return Ok(None);
        };

        profile.apply_update(fields, Utc::now());
        profile.save(store).await?;

        Ok(Some(profile))
    }

    /// Writes the document to the store under its key
    async fn save(&self, store: &DocStore) -> Result<(), DocStoreError> {
        let mut conn = store.get_connection();

        let json = serde_json::to_string(self)?;
        let _: () = conn.set(format!("profile:{}", self.user_id), json).await?;

        Ok(())
    }

    /// Applies update fields in place and refreshes `updatedAt`
    fn apply_update(&mut self, fields: UpdateProfileFields, now: DateTime<Utc>) {
        if let Some(age) = fields.age {
            self.age = age;
        }
        if let Some(date_of_birth) = fields.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(contact_information) = fields.contact_information {
            self.contact_information = contact_information;
        }
        self.updated_at = now;
    }
}
