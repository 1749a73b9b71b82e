pub mod status_rules;
pub mod licence_service;
pub use licence_service::LicenceService;
pub mod client_service;
pub use client_service::ClientService;
pub mod structure_service;
pub use structure_service::StructureService;
pub mod stats_service;
pub use stats_service::StatsService;
pub mod notification_service;
pub use notification_service::NotificationService;
