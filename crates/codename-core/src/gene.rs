//! Gene extraction and single-point crossover between words.
//!
//! A gene is a run of `gene_len` characters. A word is split into genes from
//! offset 0 in steps of `gene_len`; a trailing remainder shorter than a gene is
//! dropped.
//!
//! Crossover ([`breed`]) starts from the first parent's text and splices in one gene
//! of the second parent at a position where that gene "fits": the gene's leading
//! `gene_len - 1` characters must already occur in the first parent.

use rand::{Rng, seq::IndexedRandom as _};

/// Splits `text` into non-overlapping genes of `gene_len` characters.
///
/// Length is measured in characters, not bytes.
///
/// # Panics
///
/// Panics if `gene_len` is zero.
///
/// # Examples
///
/// ```
/// use codename_core::gene;
///
/// assert_eq!(gene::genes("apple", 2), vec!["ap", "pl"]);
/// assert_eq!(gene::genes("cherry", 3), vec!["che", "rry"]);
/// assert!(gene::genes("ab", 3).is_empty());
/// ```
#[must_use]
pub fn genes(text: &str, gene_len: usize) -> Vec<&str> {
    assert!(gene_len > 0, "gene length must be positive");
    let bounds = text
        .char_indices()
        .map(|(i, _)| i)
        .chain([text.len()])
        .collect::<Vec<_>>();
    let count = (bounds.len() - 1) / gene_len;
    (0..count)
        .map(|k| &text[bounds[k * gene_len]..bounds[(k + 1) * gene_len]])
        .collect()
}

/// Breeds `parent` with `other`, returning the offspring text.
///
/// - An empty `parent` always produces an empty string.
/// - If `other` has no genes, `parent` is returned unchanged.
/// - Otherwise the distinct genes of `other` are drawn uniformly at random without
///   replacement until one is accepted by [`splice`]. At most one substitution
///   happens; if no gene is accepted, `parent` is returned unchanged.
///
/// # Panics
///
/// Panics if `gene_len` is zero.
pub fn breed<R>(parent: &str, other: &str, gene_len: usize, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    if parent.is_empty() {
        return String::new();
    }

    let mut pool = Vec::<&str>::new();
    for g in genes(other, gene_len) {
        if !pool.contains(&g) {
            pool.push(g);
        }
    }

    while !pool.is_empty() {
        let candidate = pool.swap_remove(rng.random_range(0..pool.len()));
        if let Some(baby) = splice(parent, candidate, rng) {
            return baby;
        }
    }

    parent.to_owned()
}

/// Overwrites a window of `text` with `gene`, if the gene fits.
///
/// The gene fits when all but its last character occur somewhere in `text`. The
/// window starts at a position chosen uniformly among those holding the gene's
/// first character. A window running past the end of `text` is cut at the end,
/// so the result is always exactly as long as `text`.
///
/// Returns `None` when the gene does not fit.
pub fn splice<R>(text: &str, gene: &str, rng: &mut R) -> Option<String>
where
    R: Rng + ?Sized,
{
    let gene = gene.chars().collect::<Vec<_>>();
    let (&first, _) = gene.split_first()?;

    let prefix = gene[..gene.len() - 1].iter().collect::<String>();
    if !text.contains(&prefix) {
        return None;
    }

    let mut chars = text.chars().collect::<Vec<_>>();
    let points = chars
        .iter()
        .enumerate()
        .filter_map(|(i, c)| (*c == first).then_some(i))
        .collect::<Vec<_>>();
    // only reachable for single-character genes, whose prefix is empty
    let &start = points.choose(rng)?;

    let end = usize::min(start + gene.len(), chars.len());
    chars[start..end].copy_from_slice(&gene[..end - start]);
    Some(chars.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_gene_count_is_floor_of_length() {
        for gene_len in 1..=5 {
            for word in ["", "a", "ab", "abc", "apple", "banana", "chalkboard"] {
                assert_eq!(
                    genes(word, gene_len).len(),
                    word.chars().count() / gene_len,
                    "{word} / {gene_len}"
                );
            }
        }
    }

    #[test]
    fn test_genes_have_exact_length() {
        for g in genes("évolution", 2) {
            assert_eq!(g.chars().count(), 2);
        }
        assert_eq!(genes("évolution", 2), vec!["év", "ol", "ut", "io"]);
    }

    #[test]
    fn test_breed_empty_parent_is_empty() {
        assert_eq!(breed("", "apple", 2, &mut rng()), "");
        assert_eq!(breed("", "", 2, &mut rng()), "");
    }

    #[test]
    fn test_breed_without_genes_is_identity() {
        assert_eq!(breed("apple", "", 2, &mut rng()), "apple");
        assert_eq!(breed("apple", "ab", 3, &mut rng()), "apple");
    }

    #[test]
    fn test_breed_without_fitting_gene_is_identity() {
        // no prefix of "xy"/"zw" occurs in "apple"
        assert_eq!(breed("apple", "xyzw", 2, &mut rng()), "apple");
    }

    #[test]
    fn test_breed_splices_fitting_gene() {
        // the only gene of "lo" is "lo", whose prefix "l" is at index 3 of "apple"
        assert_eq!(breed("apple", "lo", 2, &mut rng()), "applo");
    }

    #[test]
    fn test_breed_never_changes_length() {
        let mut rng = rng();
        for (a, b) in [("cherry", "cheese"), ("chalk", "banana"), ("zoo", "ozone")] {
            for gene_len in 1..=4 {
                let baby = breed(a, b, gene_len, &mut rng);
                assert_eq!(baby.chars().count(), a.chars().count());
            }
        }
    }

    #[test]
    fn test_splice_truncates_at_tail() {
        // "k" occurs only at the last position, so the window is cut to one char
        assert_eq!(splice("chak", "ka", &mut rng()).as_deref(), Some("chak"));
        assert_eq!(splice("abc", "cd", &mut rng()).as_deref(), Some("abc"));
    }

    #[test]
    fn test_splice_overwrites_window() {
        assert_eq!(splice("chalk", "alm", &mut rng()).as_deref(), Some("chalm"));
    }

    #[test]
    fn test_single_char_gene_without_match_does_not_fit() {
        assert_eq!(splice("apple", "z", &mut rng()), None);
        assert_eq!(splice("apple", "a", &mut rng()).as_deref(), Some("apple"));
    }
}
