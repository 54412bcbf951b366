mod page;
mod session;

pub use page::LivePage;
pub use session::{BrowserConfig, BrowserKind, new_session};
