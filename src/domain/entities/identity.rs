//! Chat identity helpers

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Default domain suffix appended to bare phone numbers
pub const DEFAULT_IDENTITY_SUFFIX: &str = "@s.whatsapp.net";

static DEVICE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:@]+):\d+@(.+)$").expect("device part regex is valid"));

/// Drop the device part of an identity: `628123:4@s.whatsapp.net` -> `628123@s.whatsapp.net`
pub fn decode_identity(id: &str) -> String {
    match DEVICE_PART.captures(id) {
        Some(caps) => format!("{}@{}", &caps[1], &caps[2]),
        None => id.to_string(),
    }
}

/// Keep the digits of `raw` and append `suffix`
pub fn normalize_number(raw: &str, suffix: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}{}", digits, suffix)
}

/// Normalized owner identities, including the bot's own account
#[derive(Debug, Clone, Default)]
pub struct OwnerSet {
    ids: Vec<String>,
}

impl OwnerSet {
    pub fn new<'a>(own_id: &'a str, owners: impl IntoIterator<Item = &'a String>, suffix: &str) -> Self {
        let ids = std::iter::once(own_id)
            .chain(owners.into_iter().map(String::as_str))
            .map(|raw| normalize_number(raw, suffix))
            .collect();
        Self { ids }
    }

    /// Compares the sender's raw identity against the normalized set
    pub fn contains(&self, sender: &str) -> bool {
        self.ids.iter().any(|id| id == sender)
    }
}
