//! Configuration module

mod site;

pub use site::CommentsConfig;
pub use site::MetaConfig;
pub use site::NavigationConfig;
pub use site::OgConfig;
pub use site::PageMeta;
pub use site::PageMetaConfig;
pub use site::SiteConfig;
pub use site::SocialLink;
pub use site::TwikooConfig;
pub use site::TWIKOO_ENV_VAR;
