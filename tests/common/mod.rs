pub mod init;
pub mod test_utils;
