pub mod crypto;
pub mod email_templates;
pub mod time;
