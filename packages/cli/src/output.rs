use std::path::Path;
use std::str::FromStr as _;

use case_map_interaction::page::render_page;
use case_map_interaction::{InteractionController, Legend};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Map and legend in a single SVG document
    Svg,
    /// HTML page with the map, legend, and detail panel
    Html,
}

impl OutputFormat {
    /// Picks the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns a message if the extension is missing or not a known format.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| format!("Output path has no extension: {}", path.display()))?;
        Self::from_str(extension).map_err(|_| format!("Unsupported output format: {extension}"))
    }

    pub fn render(self, controller: &InteractionController, legend: &Legend) -> String {
        let view = &controller.state.view;
        match self {
            Self::Svg => view.to_svg_with(&[legend.to_svg_group(view.scene.width())]),
            Self::Html => render_page(controller, legend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/map.svg")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("map.HTML")).unwrap(),
            OutputFormat::Html
        );
        assert!(OutputFormat::from_path(Path::new("map.png")).is_err());
        assert!(OutputFormat::from_path(Path::new("map")).is_err());
    }
}
