pub mod memory;
pub mod mongo;

pub use memory::InMemoryStore;
pub use mongo::MongoClient;
pub use mongo::MongoProjectRepository;
pub use mongo::MongoTaskRepository;
pub use mongo::MongoTeamRepository;
pub use mongo::MongoUserRepository;
