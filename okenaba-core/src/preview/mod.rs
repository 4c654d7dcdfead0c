//! Live preview: snapshot -> [`Preview`] model -> escaped HTML fragment.

mod model;
mod render;

pub use model::{build_preview, Preview, PreviewBlock, SocialKind, SocialLink};
pub use render::{escape_html, render_fragment, PLACEHOLDER_TEXT};

use crate::schema::WizardSchema;
use crate::snapshot::FormSnapshot;

/// Build and serialize in one go.
pub fn render_snapshot(schema: &WizardSchema, snapshot: &FormSnapshot) -> String {
    render_fragment(&build_preview(&schema.preview, snapshot))
}
