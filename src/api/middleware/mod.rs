pub mod api_path;
pub mod validated_json;

pub use api_path::ApiPath;
pub use validated_json::{FieldErrorsBuilder, Validate, ValidatedJson};
