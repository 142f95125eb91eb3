pub mod handle;
pub mod ingest;
pub mod model;
pub mod repository;
pub mod repository_memory;
pub mod route;
pub mod schema;
pub mod service;

pub use repository_memory::FileMemoryRepository;
pub use service::FileUploadService;
