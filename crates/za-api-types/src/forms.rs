//! Create forms for the generation and upload resources.
//!
//! Defaults match what the admin screens pre-fill; validation matches the
//! constraints the backend enforces, so a bad form fails before any request
//! is sent.

use serde::{Deserialize, Serialize};

/// Maximum number of highlight lines on a feed product form.
pub const MAX_HIGHLIGHTS: usize = 3;

pub const MIN_VIDEO_SECONDS: u32 = 5;
pub const MAX_VIDEO_SECONDS: u32 = 180;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("failed to encode form: {0}")]
    Encode(String),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> FormError {
    FormError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

/// A create form that can be validated and turned into a request body.
pub trait CreateForm: Serialize {
    /// Resource the form creates.
    const RESOURCE: &'static str;

    fn validate(&self) -> Result<(), FormError>;

    /// Validate and encode as the JSON body sent to the backend.
    fn to_payload(&self) -> Result<serde_json::Value, FormError> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| FormError::Encode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Feed product form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedProductForm {
    pub product_id: String,
    pub title: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

fn default_currency() -> String {
    "USD".into()
}

impl FeedProductForm {
    pub fn new(product_id: impl Into<String>, title: impl Into<String>, price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            title: title.into(),
            price,
            currency: default_currency(),
            highlights: Vec::new(),
        }
    }

    /// Add highlight lines, skipping blank ones.
    pub fn with_highlights<I, S>(mut self, highlights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlights.extend(
            highlights
                .into_iter()
                .map(Into::into)
                .filter(|h: &String| !h.trim().is_empty()),
        );
        self
    }
}

impl CreateForm for FeedProductForm {
    const RESOURCE: &'static str = "tiktok_feed_forms";

    fn validate(&self) -> Result<(), FormError> {
        require("product_id", &self.product_id)?;
        require("title", &self.title)?;
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(invalid("price", "must be greater than 0"));
        }
        let len = self.currency.chars().count();
        if !(3..=16).contains(&len) {
            return Err(invalid("currency", "must be 3 to 16 characters"));
        }
        if self.highlights.len() > MAX_HIGHLIGHTS {
            return Err(invalid(
                "highlights",
                format!("at most {MAX_HIGHLIGHTS} allowed"),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Product video form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVideoForm {
    pub product_id: String,
    #[serde(default = "default_script_style")]
    pub script_style: String,
    #[serde(default = "default_duration")]
    pub duration_seconds: u32,
}

fn default_script_style() -> String {
    "conversion".into()
}
fn default_duration() -> u32 {
    20
}

impl ProductVideoForm {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            script_style: default_script_style(),
            duration_seconds: default_duration(),
        }
    }
}

impl CreateForm for ProductVideoForm {
    const RESOURCE: &'static str = "tiktok_videos";

    fn validate(&self) -> Result<(), FormError> {
        require("product_id", &self.product_id)?;
        require("script_style", &self.script_style)?;
        if !(MIN_VIDEO_SECONDS..=MAX_VIDEO_SECONDS).contains(&self.duration_seconds) {
            return Err(invalid(
                "duration_seconds",
                format!("must be between {MIN_VIDEO_SECONDS} and {MAX_VIDEO_SECONDS}"),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shop affiliate upload form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopAffiliateUploadForm {
    pub job_reference: String,
    pub shop_id: String,
    pub creator_handle: String,
}

impl CreateForm for ShopAffiliateUploadForm {
    const RESOURCE: &'static str = "tiktok_uploads";

    fn validate(&self) -> Result<(), FormError> {
        require("job_reference", &self.job_reference)?;
        require("shop_id", &self.shop_id)?;
        require("creator_handle", &self.creator_handle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
