pub mod config;
pub mod context;
pub mod load;
pub mod record;
pub mod report;
pub mod select;
pub mod view;

pub use config::Config;
pub use context::AppContext;
pub use record::{work_rate, SurveyRecord};
pub use view::{Lookup, Selection};
