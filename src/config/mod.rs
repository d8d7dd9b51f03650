//! Configuration module

mod site;

pub use site::FeedConfig;
pub use site::PrerenderConfig;
pub use site::SiteConfig;
pub use site::StaticRoute;
pub use site::SITE_URL_ENV;
