pub mod cipher;
pub mod digest;
pub mod kdf;
pub mod sensitive;
