pub mod clients_repo;
pub use clients_repo::ClientRepository;
pub mod structure_repo;
pub use structure_repo::StructureRepository;
pub mod licences_repo;
pub use licences_repo::LicenceRepository;
pub mod stats_repo;
pub use stats_repo::StatsRepository;
pub mod notifications_repo;
pub use notifications_repo::NotificationRepository;
