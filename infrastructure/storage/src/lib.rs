pub mod downloader;
pub mod workspace;
