mod unsplash_client;

pub use unsplash_client::UnsplashClient;
