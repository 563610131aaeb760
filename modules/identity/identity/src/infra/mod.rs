pub mod password;
pub mod storage;
pub mod token;
