//! HTML serialization of the preview model.
//!
//! This is the only place preview markup is produced. Every user-supplied
//! string goes through [`escape_html`] here and nowhere else.

use super::model::{Preview, PreviewBlock, SocialLink};

pub const PLACEHOLDER_TEXT: &str = "Your site preview will appear here";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

fn is_embeddable_image(url: &str) -> bool {
    url.starts_with("data:image/png;base64,") || url.starts_with("data:image/jpeg;base64,")
}

fn is_web_link(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

fn push_div(out: &mut String, class: &str, text: &str) {
    out.push_str("<div class=\"");
    out.push_str(class);
    out.push_str("\">");
    out.push_str(&escape_html(text));
    out.push_str("</div>");
}

fn push_social(out: &mut String, link: &SocialLink) {
    if is_web_link(&link.url) {
        out.push_str("<a href=\"");
        out.push_str(&escape_html(&link.url));
        out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        out.push_str(link.kind.label());
        out.push_str("</a>");
    } else {
        // Not a web URL: show it as text, never as a live link.
        out.push_str("<span>");
        out.push_str(link.kind.label());
        out.push_str(": ");
        out.push_str(&escape_html(&link.url));
        out.push_str("</span>");
    }
}

fn push_block(out: &mut String, block: &PreviewBlock) {
    match block {
        PreviewBlock::HeaderImage { data_url, alt } => match data_url {
            Some(url) if is_embeddable_image(url) => {
                out.push_str("<img src=\"");
                out.push_str(&escape_html(url));
                out.push_str("\" alt=\"");
                out.push_str(&escape_html(alt));
                out.push_str("\" class=\"preview-image\" />");
            }
            _ => out.push_str("<div class=\"preview-image\">👤</div>"),
        },
        PreviewBlock::Name(name) => push_div(out, "preview-name", name),
        PreviewBlock::Tagline(tagline) => push_div(out, "preview-tagline", tagline),
        PreviewBlock::Body(body) => push_div(out, "preview-bio", body),
        PreviewBlock::CallToAction(cta) => push_div(out, "preview-cta", cta),
        PreviewBlock::Contact { email, socials } => {
            out.push_str("<div class=\"preview-contact\">");
            if let Some(email) = email {
                push_div(out, "preview-email", email);
            }
            if !socials.is_empty() {
                out.push_str("<div class=\"preview-social\">");
                for link in socials {
                    push_social(out, link);
                }
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
    }
}

pub fn render_fragment(preview: &Preview) -> String {
    match preview {
        Preview::Placeholder => format!(
            "<div class=\"preview-placeholder\"><p>{}</p></div>",
            PLACEHOLDER_TEXT
        ),
        Preview::Site(blocks) => {
            let mut out = String::from("<div class=\"preview-site\">");
            for block in blocks {
                push_block(&mut out, block);
            }
            out.push_str("</div>");
            out
        }
    }
}
