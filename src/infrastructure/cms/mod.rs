mod http_image_downloader;
mod sanity_client;

pub use http_image_downloader::HttpImageDownloader;
pub use sanity_client::SanityClient;
