pub mod confidence;
pub mod data_fetcher;
pub mod matchup;
pub mod momentum;
pub mod recent_form;

pub use confidence::*;
pub use data_fetcher::*;
pub use matchup::*;
pub use momentum::*;
pub use recent_form::*;
