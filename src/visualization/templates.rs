/// Embedded HTML template
pub const HTML_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Embedded CSS
pub const STYLES_CSS: &str = include_str!("../../templates/styles.css");

/// Embedded chart setup script
pub const VIZ_JS: &str = include_str!("../../templates/viz.js");
