//! Translation of driven-port persistence failures into domain errors.

use crate::domain::Error;
use crate::domain::ports::{ShelterPersistenceError, UserPersistenceError};

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            duplicate_username(username.as_str())
        }
    }
}

pub(crate) fn map_shelter_persistence_error(error: ShelterPersistenceError) -> Error {
    match error {
        ShelterPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("shelter repository unavailable: {message}"))
        }
        ShelterPersistenceError::Query { message } => {
            Error::internal(format!("shelter repository error: {message}"))
        }
    }
}

pub(crate) fn duplicate_username(username: &str) -> Error {
    Error::conflict(format!("username already taken: {username}")).with_details(
        serde_json::json!({
            "field": "username",
            "code": "duplicate_username",
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("bad sql"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_username("alice"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
        assert_eq!(map_user_persistence_error(error).code(), code);
    }

    #[rstest]
    #[case(ShelterPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(ShelterPersistenceError::query("bad sql"), ErrorCode::InternalError)]
    fn shelter_errors_map_to_codes(
        #[case] error: ShelterPersistenceError,
        #[case] code: ErrorCode,
    ) {
        assert_eq!(map_shelter_persistence_error(error).code(), code);
    }
}
