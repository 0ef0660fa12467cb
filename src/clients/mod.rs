pub mod account;
pub mod fund;

use reqwest::StatusCode;

use crate::error::AppError;

/// Map a non-2xx remote status onto the local error kinds.
pub(crate) fn map_status(status: StatusCode) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(format!("remote returned {status}")),
        StatusCode::FORBIDDEN => AppError::Forbidden(format!("remote returned {status}")),
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
            AppError::NotFound(format!("remote returned {status}"))
        }
        _ => AppError::Server(format!("unexpected status {status} from remote service")),
    }
}
