pub mod clients;
pub mod objects;
pub mod services;
pub mod licences;
pub mod stats;
pub mod notifications;
