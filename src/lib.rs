pub mod cache;
pub mod checker;
pub mod config;
pub mod detect;
pub mod exclude;
pub mod model;
pub mod output;
pub mod parser;
pub mod purl;

pub use cache::ReportCache;
pub use config::Config;
pub use exclude::Exclusions;
pub use model::{Coordinate, Package, PackageManager, Severity, Vulnerability};
pub use parser::PackageParser;
