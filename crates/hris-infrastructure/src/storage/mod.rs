//! Object storage adapters

pub mod s3;

pub use s3::S3PhotoStorage;
