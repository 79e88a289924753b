pub mod activity_queries;
pub mod summary_queries;
