pub mod error;
pub mod ids;
pub mod inventory;
pub mod report;
pub mod severity;
pub mod window;
