use crate::models::ListingRecord;
use crate::snapshot::SnapshotBudget;
use std::fmt::Write;

pub const SNAPSHOT_HEADER: &str = "=== DATABÁZE NEMOVITOSTÍ ===\n\n";
pub const PRICE_ON_REQUEST: &str = "Cena na dotaz";
pub const CURRENCY_SUFFIX: &str = "Kč";

/// Format listings into the text block embedded in the prompt.
///
/// Output is a pure function of the records: same records in the same
/// order always give the same bytes.
pub fn format_for_prompt(listings: &[ListingRecord]) -> String {
    format_for_prompt_bounded(listings, SnapshotBudget::Unbounded)
}

/// Like [`format_for_prompt`], but stops adding whole records once the block
/// would exceed `budget` characters. Omitted records are counted in a closing
/// line whose length is reserved inside the budget. The first record is
/// always kept, so budgets below header, one record and the closing line
/// are exceeded.
pub fn format_for_prompt_bounded(listings: &[ListingRecord], budget: SnapshotBudget) -> String {
    let mut block = String::from(SNAPSHOT_HEADER);
    let mut used = SNAPSHOT_HEADER.chars().count();

    for (included, listing) in listings.iter().enumerate() {
        let entry = format_listing(listing);
        let entry_len = entry.chars().count();

        if let SnapshotBudget::MaxChars(max) = budget {
            let left_after = listings.len() - included - 1;
            let reserve = if left_after > 0 {
                omission_note(left_after).chars().count()
            } else {
                0
            };
            if included > 0 && used + entry_len + reserve > max {
                block.push_str(&omission_note(listings.len() - included));
                return block;
            }
        }

        block.push_str(&entry);
        used += entry_len;
    }

    block
}

fn omission_note(omitted: usize) -> String {
    format!("(… a dalších {} nemovitostí nebylo zahrnuto)\n", omitted)
}

/// One listing, terminated by its blank separator line
fn format_listing(listing: &ListingRecord) -> String {
    let mut out = String::new();

    let bedrooms = listing.text("bedrooms");
    let bathrooms = listing.text("bathrooms");
    let square_footage = listing.text("square_footage");
    let description = listing.text("description");

    // Writing to a String cannot fail
    let _ = writeln!(out, "NEMOVITOST #{}:", listing.text("id"));
    let _ = writeln!(out, "- Název: {}", listing.text("title"));
    let _ = writeln!(
        out,
        "- Typ: {}",
        translate_property_type(&listing.text("property_type"))
    );
    let _ = writeln!(out, "- Cena: {}", format_price(&listing.text("price")));
    let _ = writeln!(out, "- Lokalita: {}", listing.text("city"));
    let _ = writeln!(out, "- Adresa: {}", listing.text("address"));

    if is_present(&bedrooms) {
        let _ = writeln!(out, "- Pokoje: {}", bedrooms);
    }
    if is_present(&bathrooms) {
        let _ = writeln!(out, "- Koupelny: {}", bathrooms);
    }
    if is_present(&square_footage) {
        let _ = writeln!(out, "- Plocha: {} m²", square_footage);
    }

    if !description.is_empty() {
        let _ = writeln!(out, "- Popis: {}", description);
    }

    let features = clean_features(&listing.text("features"));
    if !features.is_empty() {
        let _ = writeln!(out, "- Vlastnosti: {}", features);
    }

    out.push('\n');
    out
}

/// Counts that are blank or the literal zero are left out
fn is_present(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

/// Translate a property type code, passing unknown codes through
pub fn translate_property_type(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "house" => "dům".to_string(),
        "apartment" => "byt".to_string(),
        "commercial" => "komerční prostor".to_string(),
        "plot" => "pozemek".to_string(),
        "office" => "kancelář".to_string(),
        _ => code.to_string(),
    }
}

pub fn format_price(price: &str) -> String {
    if price.is_empty() || price == "0" {
        PRICE_ON_REQUEST.to_string()
    } else {
        format!("{} {}", price, CURRENCY_SUFFIX)
    }
}

/// Strip the JSON list decoration from a stored features string:
/// `["Balkon","Sklep"]` becomes `Balkon,Sklep` and `[]` becomes empty.
pub fn clean_features(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '[' | ']' | '"')).collect()
}
