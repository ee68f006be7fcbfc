pub mod browser;
pub mod extract;
pub mod http;
pub mod indeed;
pub mod jobs_cz;
pub mod linkedin;
pub mod traits;
pub mod types;

pub use browser::ChromeLoader;
pub use http::{HttpLoader, StaticPage};
pub use indeed::IndeedHandler;
pub use jobs_cz::JobsCzHandler;
pub use linkedin::LinkedInHandler;
pub use traits::{Page, PageLoader};
