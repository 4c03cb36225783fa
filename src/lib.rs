pub mod color;
pub mod contrast;
pub mod extract;
pub mod generate;
pub mod logging;
pub mod ops;
pub mod schema;
pub mod units;

pub use contrast::{check_contrast, ComplianceLevel, ContrastReport};
pub use extract::{
    extract_css, extract_dtcg, extract_tailwind, extract_variables, ExtractionError,
};
pub use generate::{
    generate_compose_theme, generate_css_variables, generate_swiftui_theme,
    generate_tailwind_config, Dialect, SwiftUiOptions, TailwindOptions,
};
pub use schema::{sanitize, validate, TokenSet, ValidationError};
