use rand::Rng;

use survey_core::model::Deck;

/// Produce a uniformly random working order of `source`.
///
/// Each of the n! orderings is equally likely: positions are visited from the
/// last down and swapped with a uniform pick from `0..=i`.
pub fn build_deck<R: Rng + ?Sized>(source: &Deck, rng: &mut R) -> Deck {
    source.permuted(|i| rng.random_range(0..=i))
}

/// Shuffle with the thread-local generator; one call per survey session.
#[must_use]
pub fn build_deck_from_entropy(source: &Deck) -> Deck {
    build_deck(source, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use survey_core::model::{Item, ItemDraft};

    use super::*;

    fn item(id: &str) -> Item {
        ItemDraft {
            id: id.to_string(),
            name: id.to_string(),
            usp: "usp".to_string(),
            details: None,
            image_label: None,
            image_url: None,
            destination: None,
        }
        .validate()
        .unwrap()
    }

    fn source(n: usize) -> Deck {
        Deck::new((0..n).map(|i| item(&format!("item-{i}"))).collect()).unwrap()
    }

    fn order(deck: &Deck) -> Vec<String> {
        deck.items().iter().map(|i| i.id().to_string()).collect()
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 0..12 {
            let src = source(n);
            let shuffled = build_deck(&src, &mut rng);
            assert_eq!(shuffled.len(), n);
            let mut expected = order(&src);
            let mut actual = order(&shuffled);
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn empty_input_yields_empty_deck() {
        let shuffled = build_deck_from_entropy(&Deck::default());
        assert!(shuffled.is_empty());
    }

    #[test]
    fn same_seed_same_order() {
        let src = source(6);
        let a = build_deck(&src, &mut StdRng::seed_from_u64(42));
        let b = build_deck(&src, &mut StdRng::seed_from_u64(42));
        assert_eq!(order(&a), order(&b));
    }

    #[test]
    fn orderings_are_roughly_uniform() {
        const TRIALS: usize = 60_000;
        let src = source(3);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        for _ in 0..TRIALS {
            *counts.entry(order(&build_deck(&src, &mut rng))).or_default() += 1;
        }

        assert_eq!(counts.len(), 6, "every ordering of 3 items should appear");
        let expected = TRIALS / 6;
        // Standard deviation is ~91 per bucket; 500 is a very loose band.
        for (ordering, count) in counts {
            assert!(
                count.abs_diff(expected) < 500,
                "ordering {ordering:?} appeared {count} times, expected ~{expected}"
            );
        }
    }
}
