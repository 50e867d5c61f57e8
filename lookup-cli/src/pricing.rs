use shared::pricing::{contact_link, tier, PricingTier, TIERS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("There is no {0} day plan. Available plans: 1, 7 and 30 days.")]
    UnknownPlan(u32),
    #[error("The contact address is not a valid URL: {0}")]
    InvalidContact(#[from] url::ParseError),
}

/// One line per plan: label, price and where to ask for a key.
///
/// # Errors
///
/// Fails if `days` does not name a plan or `contact` is not an absolute URL.
pub fn pricing_lines(contact: &str, days: Option<u32>) -> Result<Vec<String>, PricingError> {
    let tiers: Vec<PricingTier> = match days {
        Some(days) => vec![tier(days).ok_or(PricingError::UnknownPlan(days))?],
        None => TIERS.to_vec(),
    };

    tiers
        .iter()
        .map(|tier| {
            let link = contact_link(contact, tier)?;
            Ok(format!("{:<16} ₹{:<5} {link}", tier.label(), tier.price))
        })
        .collect()
}
