pub mod api;
pub mod pagination;

pub use api::{ApiResponse, ApiErrorResponse, ApiErrorDetail, HealthResponse, HealthStatus, HealthCheck};
pub use pagination::{PaginationParams, Paginated};
