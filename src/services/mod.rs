pub mod admin_service;
pub mod application_service;
pub mod email_service;
pub mod notification_service;
