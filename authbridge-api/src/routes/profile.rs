/// Profile endpoints
///
/// This module provides the authenticated profile view and update. The view
/// joins the credential store (username) with the profile document store;
/// the update validates fields in a fixed order and rewrites the stored
/// document wholesale.
///
/// # Endpoints
///
/// - `GET /api/profile` - Fetch the merged profile view
/// - `PUT /api/profile` - Update profile fields
///
/// Both sit behind the session verifier; the authenticated user id arrives
/// through request extensions.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, Json},
};
use authbridge_shared::{
    auth::middleware::AuthUser,
    models::{
        profile::{Profile, UpdateProfileFields},
        user::User,
    },
};
use axum::{extract::State, Extension};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The merged profile view
///
/// Username comes from the credential store, the rest from the profile
/// document. Internal timestamps and the password hash never appear here.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileView {
    /// Login username, or "Unknown User" if the credential row is gone
    pub username: String,

    /// Age in years
    pub age: Option<i64>,

    /// Date of birth
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<NaiveDate>,

    /// Free-form contact information
    #[serde(rename = "contactInformation")]
    pub contact_information: Option<String>,
}

/// Profile update request
///
/// Fields are captured as raw JSON values: each one's 400 message depends on
/// the JSON-level type, which a typed field could not report after the fact.
/// A missing field and an explicit null mean different things (leave alone
/// vs. clear), so presence is preserved through [`some_value`].
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    /// Age in years; null clears
    #[serde(default, deserialize_with = "some_value")]
    pub age: Option<Value>,

    /// Date of birth; null clears
    #[serde(default, rename = "dateOfBirth", deserialize_with = "some_value")]
    pub date_of_birth: Option<Value>,

    /// Contact information; null clears
    #[serde(default, rename = "contactInformation", deserialize_with = "some_value")]
    pub contact_information: Option<Value>,
}

/// Profile update response
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    /// Confirmation message
    pub message: String,

    /// The full stored document after the update, timestamps included
    pub profile: Profile,
}

/// Keeps an explicitly provided JSON value, null included
///
/// Plain `Option` folds `"field": null` into a missing field, which would
/// make "clear this value" indistinguishable from "leave it alone".
fn some_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Fetch the authenticated user's profile
///
/// # Endpoint
///
/// ```text
/// GET /api/profile
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "username": "alice",
///   "age": 30,
///   "dateOfBirth": "1995-01-01",
///   "contactInformation": "a@b.com"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing/invalid session token (from the verifier)
/// - `404 Not Found`: No profile document for this user
/// - `500 Internal Server Error`: Either store failed
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<ProfileView>> {
    let profile = Profile::find_by_user_id(&state.docs, auth.id)
        .await
        .map_err(|e| ApiError::internal("Server error fetching profile.", e))?
        .ok_or_else(|| ApiError::NotFound("Profile not found for this user.".to_string()))?;

    // The credential row should always exist for a valid token; if it does
    // not, the view still renders with a placeholder name
    let username = User::find_by_id(&state.db, auth.id)
        .await
        .map_err(|e| ApiError::internal("Server error fetching profile.", e))?
        .map(|user| user.username)
        .unwrap_or_else(|| "Unknown User".to_string());

    Ok(Json(ProfileView {
        username,
        age: profile.age,
        date_of_birth: profile.date_of_birth,
        contact_information: profile.contact_information,
    }))
}

/// Update the authenticated user's profile
///
/// Validation runs in a fixed order (age, then date of birth, then contact
/// information) and the first failure wins. Provided fields overwrite the
/// stored values wholesale; fields absent from the body are left as stored;
/// explicit null clears. `updatedAt` is refreshed on every successful call.
///
/// # Endpoint
///
/// ```text
/// PUT /api/profile
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "age": 30,
///   "dateOfBirth": "1995-01-01",
///   "contactInformation": "a@b.com"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Profile updated successfully!",
///   "profile": {
///     "userId": "42",
///     "age": 30,
///     "dateOfBirth": "1995-01-01",
///     "contactInformation": "a@b.com",
///     "createdAt": "2026-01-01T00:00:00Z",
///     "updatedAt": "2026-02-01T12:00:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: A field failed validation
/// - `401 Unauthorized`: Missing/invalid session token (from the verifier)
/// - `404 Not Found`: No profile document for this user
/// - `500 Internal Server Error`: Document store failed
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UpdateProfileResponse>> {
    let fields = validate_update(&req)?;

    let profile = Profile::update(&state.docs, auth.id, fields)
        .await
        .map_err(|e| ApiError::internal("Server error updating profile.", e))?
        .ok_or_else(|| {
            ApiError::NotFound("Profile not found or could not be updated.".to_string())
        })?;

    tracing::debug!(user_id = auth.id, "Profile updated");

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully!".to_string(),
        profile,
    }))
}

/// Validates the update request field by field, first failure wins
fn validate_update(req: &UpdateProfileRequest) -> Result<UpdateProfileFields, ApiError> {
    let mut fields = UpdateProfileFields::default();

    if let Some(value) = &req.age {
        fields.age = Some(validate_age(value)?);
    }
    if let Some(value) = &req.date_of_birth {
        fields.date_of_birth = Some(validate_date_of_birth(value)?);
    }
    if let Some(value) = &req.contact_information {
        fields.contact_information = Some(validate_contact_information(value)?);
    }

    Ok(fields)
}

/// Age must be an integral JSON number within [0, 150], or null
fn validate_age(value: &Value) -> Result<Option<i64>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(age) if (0..=150).contains(&age) => Ok(Some(age)),
            _ => Err(age_error()),
        },
        _ => Err(age_error()),
    }
}

fn age_error() -> ApiError {
    ApiError::BadRequest("Age must be a number between 0 and 150.".to_string())
}

/// Date of birth must be a `YYYY-MM-DD` string, an RFC3339 timestamp string
/// (date part taken), or null
fn validate_date_of_birth(value: &Value) -> Result<Option<NaiveDate>, ApiError> {
    let date = match value {
        Value::Null => return Ok(None),
        Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())),
        _ => None,
    };

    date.map(Some)
        .ok_or_else(|| ApiError::BadRequest("Invalid Date of Birth format.".to_string()))
}

/// Contact information must be a JSON string (trimmed before storage) or null
fn validate_contact_information(value: &Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        _ => Err(ApiError::BadRequest(
            "Contact Information must be a string.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> UpdateProfileRequest {
        serde_json::from_str(body).unwrap()
    }

    fn message(err: ApiError) -> String {
        match err {
            ApiError::BadRequest(msg) => msg,
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let req = parse("{}");
        assert!(req.age.is_none());
        assert!(req.date_of_birth.is_none());
        assert!(req.contact_information.is_none());

        let fields = validate_update(&req).unwrap();
        assert!(fields.age.is_none());
        assert!(fields.date_of_birth.is_none());
        assert!(fields.contact_information.is_none());
    }

    #[test]
    fn test_null_is_distinct_from_absent() {
        let req = parse(r#"{"age": null}"#);
        assert_eq!(req.age, Some(Value::Null));
        assert!(req.date_of_birth.is_none());

        let fields = validate_update(&req).unwrap();
        // age was provided as null: clear it
        assert_eq!(fields.age, Some(None));
        // dateOfBirth was not provided: leave it alone
        assert!(fields.date_of_birth.is_none());
    }

    #[test]
    fn test_valid_update_converts_all_fields() {
        let req = parse(
            r#"{"age": 30, "dateOfBirth": "1995-01-01", "contactInformation": "a@b.com"}"#,
        );

        let fields = validate_update(&req).unwrap();
        assert_eq!(fields.age, Some(Some(30)));
        assert_eq!(
            fields.date_of_birth,
            Some(NaiveDate::from_ymd_opt(1995, 1, 1))
        );
        assert_eq!(fields.contact_information, Some(Some("a@b.com".to_string())));
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(validate_age(&serde_json::json!(0)).unwrap(), Some(0));
        assert_eq!(validate_age(&serde_json::json!(150)).unwrap(), Some(150));

        for bad in [serde_json::json!(-1), serde_json::json!(151), serde_json::json!(200)] {
            let err = validate_age(&bad).unwrap_err();
            assert_eq!(message(err), "Age must be a number between 0 and 150.");
        }
    }

    #[test]
    fn test_age_must_be_an_integral_number() {
        for bad in [
            serde_json::json!("30"),
            serde_json::json!(30.5),
            serde_json::json!(true),
            serde_json::json!([30]),
        ] {
            let err = validate_age(&bad).unwrap_err();
            assert_eq!(message(err), "Age must be a number between 0 and 150.");
        }
    }

    #[test]
    fn test_date_of_birth_formats() {
        let date = validate_date_of_birth(&serde_json::json!("1995-01-01")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1995, 1, 1));

        // RFC3339 timestamps are accepted, date part taken
        let date = validate_date_of_birth(&serde_json::json!("1995-01-01T10:30:00Z")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1995, 1, 1));

        assert_eq!(validate_date_of_birth(&Value::Null).unwrap(), None);

        for bad in [
            serde_json::json!("01/01/1995"),
            serde_json::json!("not a date"),
            serde_json::json!(""),
            serde_json::json!("1995-13-01"),
            serde_json::json!(19950101),
        ] {
            let err = validate_date_of_birth(&bad).unwrap_err();
            assert_eq!(message(err), "Invalid Date of Birth format.");
        }
    }

    #[test]
    fn test_contact_information_trimmed() {
        let contact =
            validate_contact_information(&serde_json::json!("  a@b.com  ")).unwrap();
        assert_eq!(contact, Some("a@b.com".to_string()));

        assert_eq!(validate_contact_information(&Value::Null).unwrap(), None);

        for bad in [serde_json::json!(42), serde_json::json!({"email": "a@b.com"})] {
            let err = validate_contact_information(&bad).unwrap_err();
            assert_eq!(message(err), "Contact Information must be a string.");
        }
    }

    #[test]
    fn test_first_failure_wins_in_field_order() {
        // Both age and dateOfBirth are invalid; age is reported
        let req = parse(r#"{"age": 200, "dateOfBirth": "nope"}"#);
        let err = validate_update(&req).unwrap_err();
        assert_eq!(message(err), "Age must be a number between 0 and 150.");

        // Age fine, dateOfBirth and contactInformation invalid; dateOfBirth is reported
        let req = parse(r#"{"age": 30, "dateOfBirth": "nope", "contactInformation": 5}"#);
        let err = validate_update(&req).unwrap_err();
        assert_eq!(message(err), "Invalid Date of Birth format.");
    }

    #[test]
    fn test_profile_view_wire_shape() {
        let view = ProfileView {
            username: "alice".to_string(),
            age: None,
            date_of_birth: None,
            contact_information: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "alice",
                "age": null,
                "dateOfBirth": null,
                "contactInformation": null
            })
        );
    }
}
