use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use shared::data::{VehicleRecord, FIELDS, NOT_AVAILABLE};

lazy_static! {
    static ref LABEL: Selector = Selector::parse("span").expect("label selector is valid");
    static ref VALUE: Selector = Selector::parse("p").expect("value selector is valid");
}

/// Other labels the source page has used for a field. The field name itself is always tried first.
fn aliases(field: &str) -> &'static [&'static str] {
    match field {
        "Model Name" => &["Modal Name"],
        _ => &[],
    }
}

/// The result of running every field lookup over one document.
#[derive(Debug)]
pub struct Extraction {
    pub record: VehicleRecord,
    /// How many fields had a label on the page, whether or not a value was found next to it.
    pub labels_found: usize,
}

pub fn extract_record(html: &str) -> Extraction {
    let document = Html::parse_document(html);
    let mut record = VehicleRecord::new();
    let mut labels_found = 0;

    for field in FIELDS {
        let label = std::iter::once(field)
            .chain(aliases(field).iter().copied())
            .find_map(|name| find_label(&document, name));

        if let Some(label) = label {
            labels_found += 1;
            record.set(field, value_for(label).as_deref().unwrap_or(NOT_AVAILABLE));
        }
    }

    Extraction {
        record,
        labels_found,
    }
}

/// Finds the label for `name`. A label whose whole text is `name` wins over one that merely
/// contains it. Ties go to the first in document order.
fn find_label<'a>(document: &'a Html, name: &str) -> Option<ElementRef<'a>> {
    let mut partial = None;
    for label in document.select(&LABEL) {
        let text = label.text().collect::<String>();
        if text.trim() == name {
            return Some(label);
        }
        if partial.is_none() && text.contains(name) {
            partial = Some(label);
        }
    }
    partial
}

fn value_for(label: ElementRef<'_>) -> Option<String> {
    let container = label.parent().and_then(ElementRef::wrap)?;
    let value = container.select(&VALUE).next()?;
    let text = value.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(label: &str, value: &str) -> String {
        format!(r#"<div class="card"><span>{label}</span><p>{value}</p></div>"#)
    }

    fn page(body: &str) -> String {
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn reads_paragraph_next_to_label() {
        let html = page(&card("Owner Name", "JOHN DOE"));
        let extraction = extract_record(&html);
        assert_eq!(extraction.record.get("Owner Name"), Some("JOHN DOE"));
        assert_eq!(extraction.labels_found, 1);
    }

    #[test]
    fn label_without_paragraph_is_not_available() {
        let html = page(r#"<div><span>Owner Name</span><b>JOHN DOE</b></div>"#);
        let extraction = extract_record(&html);
        assert_eq!(extraction.record.get("Owner Name"), Some(NOT_AVAILABLE));
        assert_eq!(extraction.labels_found, 1);
    }

    #[test]
    fn empty_paragraph_is_not_available() {
        let html = page(&card("Fuel Type", "   "));
        assert_eq!(
            extract_record(&html).record.get("Fuel Type"),
            Some(NOT_AVAILABLE)
        );
    }

    #[test]
    fn every_field_is_present_even_on_unrelated_pages() {
        let extraction = extract_record("<html><body><h1>Not found</h1></body></html>");
        assert_eq!(extraction.labels_found, 0);
        assert_eq!(extraction.record.iter().count(), FIELDS.len());
        assert!(extraction.record.iter().all(|(_, v)| v == NOT_AVAILABLE));
    }

    #[test]
    fn label_text_only_needs_to_contain_the_field_name() {
        let html = page(&card("Registered RTO:", "LUCKNOW"));
        assert_eq!(
            extract_record(&html).record.get("Registered RTO"),
            Some("LUCKNOW")
        );
    }

    #[test]
    fn exact_label_preferred_over_containing_label() {
        let html = page(&format!(
            "{}{}",
            card("Previous Insurance Company", "OLD CO"),
            card("Insurance Company", "NEW CO")
        ));
        assert_eq!(
            extract_record(&html).record.get("Insurance Company"),
            Some("NEW CO")
        );
    }

    #[test]
    fn takes_first_paragraph_in_container_and_trims_it() {
        let html = page(
            r#"<div><span>Address</span><div><p>
                 12 MG ROAD, LUCKNOW
               </p><p>ignored</p></div></div>"#,
        );
        assert_eq!(
            extract_record(&html).record.get("Address"),
            Some("12 MG ROAD, LUCKNOW")
        );
    }

    #[test]
    fn alias_label_fills_canonical_field() {
        let html = page(&card("Modal Name", "SWIFT DZIRE"));
        let extraction = extract_record(&html);
        assert_eq!(extraction.record.get("Model Name"), Some("SWIFT DZIRE"));
        assert_eq!(extraction.labels_found, 1);
    }

    #[test]
    fn fields_resolve_independently() {
        let html = page(&format!(
            "{}{}{}",
            card("Owner Name", "JOHN DOE"),
            card("Insurance Upto", "01-Jan-2027"),
            r#"<div><span>Phone</span></div>"#
        ));
        let extraction = extract_record(&html);
        assert_eq!(extraction.labels_found, 3);
        assert_eq!(extraction.record.available_count(), 2);
        assert_eq!(extraction.record.get("Insurance Upto"), Some("01-Jan-2027"));
        assert_eq!(extraction.record.get("Phone"), Some(NOT_AVAILABLE));
        assert_eq!(extraction.record.get("Tax Upto"), Some(NOT_AVAILABLE));
    }

    #[test]
    fn malformed_markup_does_not_panic() {
        let extraction = extract_record("<div><span>Owner Name<p>JOHN</div></span>><<");
        assert_eq!(extraction.record.iter().count(), FIELDS.len());
    }
}
