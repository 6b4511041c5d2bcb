//! Application pages module
//!
//! - Landing page (home)
//! - Not found page (fallback)

mod landing;
mod not_found;

pub use landing::LandingPage;
pub use not_found::NotFoundPage;
