use survey_core::model::{CardIndex, Deck, Item, ItemId};

const SUMMARY_MAX_CHARS: usize = 72;

/// UI-ready product card. `index` is the card's deck position and is carried
/// into the rendered element so visibility signals map straight back to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardVm {
    pub index: CardIndex,
    pub dom_id: String,
    pub name: String,
    pub aria_label: String,
    pub usp: String,
    pub details: Option<(String, String)>,
    pub image_label: String,
    pub image_url: Option<String>,
    pub nav_label: &'static str,
    pub nav_aria_label: &'static str,
}

/// Comparison-view entry for one product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonOptionVm {
    pub id: ItemId,
    pub name: String,
    pub summary: String,
    pub choose_label: String,
}

#[must_use]
pub fn card_dom_id(index: CardIndex) -> String {
    format!("card-{index}")
}

/// Map the shuffled deck into cards, labelling the last forward control "Continue".
#[must_use]
pub fn map_cards(deck: &Deck) -> Vec<CardVm> {
    deck.indexed()
        .map(|(index, item)| build_card(index, item, deck.is_last(index)))
        .collect()
}

fn build_card(index: CardIndex, item: &Item, is_last: bool) -> CardVm {
    let (nav_label, nav_aria_label) = if is_last {
        ("Continue", "Continue to survey")
    } else {
        ("Next", "Next card")
    };
    CardVm {
        index,
        dom_id: card_dom_id(index),
        name: item.name().to_owned(),
        aria_label: format!("{} information card", item.name()),
        usp: item.usp().to_owned(),
        details: item
            .details()
            .map(|details| (details.label.clone(), details.text.clone())),
        image_label: item.image_label().to_owned(),
        image_url: item.image_url().map(|url| url.as_str().to_owned()),
        nav_label,
        nav_aria_label,
    }
}

#[must_use]
pub fn map_comparison_options(deck: &Deck) -> Vec<ComparisonOptionVm> {
    deck.items()
        .iter()
        .map(|item| ComparisonOptionVm {
            id: item.id().clone(),
            name: item.name().to_owned(),
            summary: truncate_preview(item.usp(), SUMMARY_MAX_CHARS),
            choose_label: format!("Choose {}", item.name()),
        })
        .collect()
}

fn truncate_preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut lines = trimmed.lines();
    let first_line = lines.next().unwrap_or("");
    let has_more_lines = lines.next().is_some();

    let mut out = String::with_capacity(max_chars + 3);
    let mut count = 0usize;
    let mut cut = false;
    for ch in first_line.chars() {
        if count >= max_chars {
            cut = true;
            break;
        }
        out.push(ch);
        count = count.saturating_add(1);
    }

    if has_more_lines || cut {
        out.push_str("...");
    }

    out
}
