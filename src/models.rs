pub mod clients;
pub use clients::{Client, ClientDetail, ClientEdit, CompanySummary, Note, Status};
pub mod structure;
pub use structure::{ClientObject, ObjectDetail, Service, ServiceDetail};
pub mod licences;
pub use licences::{ExpirationPayload, History, Licence, Notification, NotificationStatus};
pub mod stats;
pub use stats::{GeneralStatistics, LastActivities, Period};
