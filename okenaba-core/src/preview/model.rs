//! Typed preview model built from the committed snapshot.

use crate::schema::{FieldKey, PreviewRoles};
use crate::snapshot::FormSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialKind {
    Instagram,
    Linkedin,
}

impl SocialKind {
    pub fn label(&self) -> &'static str {
        match self {
            SocialKind::Instagram => "Instagram",
            SocialKind::Linkedin => "LinkedIn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBlock {
    /// Uploaded image as a data URL, or `None` for the avatar placeholder.
    HeaderImage { data_url: Option<String>, alt: String },
    Name(String),
    Tagline(String),
    Body(String),
    CallToAction(String),
    Contact {
        email: Option<String>,
        socials: Vec<SocialLink>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder,
    Site(Vec<PreviewBlock>),
}

impl Preview {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Preview::Placeholder)
    }
}

fn role_value(snapshot: &FormSnapshot, key: Option<FieldKey>) -> Option<String> {
    let value = key.map(|key| snapshot.get(key).trim()).unwrap_or("");
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn build_preview(roles: &PreviewRoles, snapshot: &FormSnapshot) -> Preview {
    let name = role_value(snapshot, roles.name);
    let tagline = role_value(snapshot, roles.tagline);
    let body = role_value(snapshot, roles.body);

    if name.is_none() && tagline.is_none() && body.is_none() {
        return Preview::Placeholder;
    }

    let mut blocks = Vec::new();
    if roles.show_image {
        blocks.push(PreviewBlock::HeaderImage {
            data_url: snapshot.image().map(|image| image.data_url.clone()),
            alt: name.clone().unwrap_or_default(),
        });
    }
    if let Some(name) = name {
        blocks.push(PreviewBlock::Name(name));
    }
    if let Some(tagline) = tagline {
        blocks.push(PreviewBlock::Tagline(tagline));
    }
    if let Some(body) = body {
        blocks.push(PreviewBlock::Body(body));
    }
    if let Some(cta) = role_value(snapshot, roles.cta) {
        blocks.push(PreviewBlock::CallToAction(cta));
    }

    let email = role_value(snapshot, roles.email);
    let socials: Vec<SocialLink> = [
        (SocialKind::Instagram, roles.instagram),
        (SocialKind::Linkedin, roles.linkedin),
    ]
    .into_iter()
    .filter_map(|(kind, key)| role_value(snapshot, key).map(|url| SocialLink { kind, url }))
    .collect();
    if email.is_some() || !socials.is_empty() {
        blocks.push(PreviewBlock::Contact { email, socials });
    }

    Preview::Site(blocks)
}
