mod api_url;
mod enums;
mod ids;
/// Primitive Power BI data types and NewType-patterns.
mod strings;

pub use api_url::*;
pub use enums::*;
pub use ids::*;
pub use strings::*;
