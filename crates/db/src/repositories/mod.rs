//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! any SQLite executor as the first argument: `&DbPool` for standalone
//! calls, `&mut *tx` inside a transaction.

pub mod asset_repo;
pub mod course_repo;
pub mod group_configuration_repo;
pub mod video_component_repo;

pub use asset_repo::AssetRepo;
pub use course_repo::CourseRepo;
pub use group_configuration_repo::GroupConfigurationRepo;
pub use video_component_repo::VideoComponentRepo;
