pub mod pages;

#[cfg(not(feature = "ssr"))]
pub mod dom;
#[cfg(not(feature = "ssr"))]
pub mod experience;
#[cfg(not(feature = "ssr"))]
pub mod theme;

pub use pages::{LandingPage, NotFoundPage};
