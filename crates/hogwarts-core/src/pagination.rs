//! Page-based pagination for list endpoints.
//!
//! - `page`: Page number (1-indexed, default: 1)
//! - `limit`: Items per page (1-100, default: 10)
//!
//! # Example
//!
//! ```ignore
//! // GET /avatars?page=2&limit=5
//! async fn list_avatars(
//!     Query(params): Query<PaginationParams>,
//! ) -> Result<Json<PaginatedAvatarsResponse>, AppError> {
//!     let avatars = fetch_avatars(params.limit(), params.offset()).await?;
//!     let total = count_avatars().await?;
//!
//!     let meta = PaginationMeta::new(params.page(), params.limit(), total);
//!     Ok(Json(PaginatedAvatarsResponse { data: avatars, meta }))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings (`?page=`), which are
/// treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata about a paginated response.
///
/// ```json
/// { "page": 2, "limit": 10, "total": 35, "total_pages": 4, "has_more": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let total_pages = (total.max(0) + limit - 1) / limit;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_more: page < total_pages,
        }
    }
}

/// Query parameters for page-based pagination.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Returns the page number, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Number of rows to skip for the requested page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}
