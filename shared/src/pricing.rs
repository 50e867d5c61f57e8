use url::Url;

/// Where access requests are sent unless configured otherwise.
pub const DEFAULT_CONTACT_URL: &str = "https://t.me/AkashExploits1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingTier {
    pub days: u32,
    /// Price in Indian rupees.
    pub price: u32,
}

impl PricingTier {
    #[must_use]
    pub fn label(&self) -> String {
        if self.days == 1 {
            "1 Day Access".to_string()
        } else {
            format!("{} Days Access", self.days)
        }
    }
}

pub const TIERS: [PricingTier; 3] = [
    PricingTier { days: 1, price: 10 },
    PricingTier { days: 7, price: 50 },
    PricingTier { days: 30, price: 200 },
];

#[must_use]
pub fn tier(days: u32) -> Option<PricingTier> {
    TIERS.iter().copied().find(|t| t.days == days)
}

/// Builds a link to `contact` with a prefilled request for `tier`.
///
/// # Errors
///
/// Returns an error if `contact` is not an absolute URL.
pub fn contact_link(contact: &str, tier: &PricingTier) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(contact)?;
    let text = format!(
        "Hi I want Vehicle RC API Key for {} days. Price: ₹{}",
        tier.days, tier.price
    );
    url.query_pairs_mut().clear().append_pair("text", &text);
    Ok(url)
}
