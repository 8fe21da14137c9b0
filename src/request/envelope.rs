//! O-MI request envelope rendering

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;

use super::odf::{objects_xml, OdfPath};

const ENVELOPE_TEMPLATE_NAME: &str = "omi_read";

const ENVELOPE_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<omiEnvelope xmlns="http://www.opengroup.org/xsd/omi/1.0/" version="1.0" ttl="{{ttl}}">
  <read msgformat="odf"{{#if interval}} interval="{{interval}}"{{/if}}>
    <msg>
      <Objects xmlns="http://www.opengroup.org/xsd/odf/1.0/">
{{{objects}}}      </Objects>
    </msg>
  </read>
</omiEnvelope>
"#;

/// Depth of the first `<Object>` inside the template's `<Objects>`
const OBJECTS_DEPTH: usize = 4;

/// Everything a read request is made of
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRequest {
    pub ttl: String,
    /// Present for subscriptions
    pub interval: Option<String>,
    pub paths: Vec<OdfPath>,
}

/// Renders read requests into O-MI envelopes
pub struct EnvelopeRenderer {
    handlebars: Handlebars<'static>,
}

impl EnvelopeRenderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars
            .register_template_string(ENVELOPE_TEMPLATE_NAME, ENVELOPE_TEMPLATE)
            .context("Failed to register O-MI envelope template")?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, request: &ReadRequest) -> Result<String> {
        let context = json!({
            "ttl": request.ttl.trim(),
            "interval": request.interval.as_deref().map(str::trim),
            // Pre-escaped by objects_xml
            "objects": objects_xml(&request.paths, OBJECTS_DEPTH),
        });
        self.handlebars
            .render(ENVELOPE_TEMPLATE_NAME, &context)
            .context("Failed to render O-MI envelope")
    }
}
