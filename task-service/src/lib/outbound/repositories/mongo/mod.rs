//! MongoDB adapters for the repository ports.
//!
//! Documents use the UUID string of the aggregate as `_id`; references
//! between aggregates are stored as arrays of those strings.

mod client;
mod documents;
mod project;
mod task;
mod team;
mod user;

pub use client::IntoIndexes;
pub use client::MongoClient;
pub use client::MongoCollection;
pub use project::MongoProjectRepository;
pub use task::MongoTaskRepository;
pub use team::MongoTeamRepository;
pub use user::MongoUserRepository;
