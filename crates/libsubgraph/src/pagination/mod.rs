mod cancellation_token;
mod page_state;
mod paginated_response;
mod pagination_config;
mod pagination_error;
mod paginator;
mod transport;

pub use cancellation_token::CancellationToken;
pub use page_state::PageState;
pub use paginated_response::PaginatedResponse;
pub use pagination_config::DEFAULT_MAX_PAGE_SIZE;
pub use pagination_config::PaginationConfig;
pub use pagination_config::PaginationStrategy;
pub use pagination_error::PaginationError;
pub use paginator::Paginator;
pub use transport::JsonMap;
pub use transport::Transport;
pub use transport::TransportError;

#[cfg(test)]
mod tests;
