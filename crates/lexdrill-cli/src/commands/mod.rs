pub mod init;
pub mod quiz;
pub mod reset;
pub mod stats;
pub mod validate;
