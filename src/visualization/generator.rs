use std::path::Path;
use crate::error::Result;
use crate::visualization::data::VizData;
use crate::visualization::runtime::RuntimeAsset;
use crate::visualization::templates::{HTML_TEMPLATE, STYLES_CSS, VIZ_JS};

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize data for embedding in a script element
fn script_json(viz_data: &VizData) -> Result<String> {
    Ok(serde_json::to_string(viz_data)?.replace("</", "<\\/"))
}

/// Build the complete HTML document
pub fn render_html(viz_data: &VizData, runtime: &RuntimeAsset) -> Result<String> {
    let json_data = script_json(viz_data)?;

    // Inline CSS and JS into HTML; data goes in last
    let html = HTML_TEMPLATE
        .replace("__TITLE__", &escape_html(&viz_data.title))
        .replace("<!-- __RUNTIME_PLACEHOLDER__ -->", &runtime.script_tag())
        .replace("/* __STYLES_PLACEHOLDER__ */", STYLES_CSS)
        .replace("/* __VIZ_JS_PLACEHOLDER__ */", VIZ_JS)
        .replace("\"__DATA_PLACEHOLDER__\"", &json_data);

    Ok(html)
}

/// Generate the HTML report file
pub fn generate_html(viz_data: &VizData, runtime: &RuntimeAsset, output_path: &Path) -> Result<()> {
    let html = render_html(viz_data, runtime)?;
    std::fs::write(output_path, html)?;
    Ok(())
}
