pub mod guide;
pub mod init;
pub mod status;
pub mod write;
