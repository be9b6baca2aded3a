use regex::Regex;

use crate::error::ConvertErr;

/// Turns post titles into URL and file system safe identifiers.
pub struct Slugger {
    not_allowed: Regex,
    spaces: Regex,
    article: Regex,
}

impl Slugger {
    pub fn new() -> Result<Self, ConvertErr> {
        Ok(Self {
            not_allowed: Regex::new(r"[^\p{L}\p{N}.\s]")?,
            spaces: Regex::new(r"\s+")?,
            article: Regex::new(r"^(a-|the-)")?,
        })
    }

    pub fn slug(&self, title: &str) -> String {
        let result = title.replace('%', " percent").replace('#', " sharp");
        let result = self.not_allowed.replace_all(&result, "");
        let result = self.spaces.replace_all(&result, "-").to_lowercase();
        self.article.replace(&result, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(input: &str) -> String {
        Slugger::new().unwrap().slug(input)
    }

    #[test]
    fn punctuation_and_leading_article() {
        assert_eq!(
            slug("The A/B Tests: Developer's Manual"),
            "ab-tests-developers-manual"
        );
        assert_eq!(slug("A quick look"), "quick-look");
    }

    #[test]
    fn percent_and_sharp_are_spelled_out() {
        assert_eq!(slug("100% C#"), "100-percent-c-sharp");
        assert_eq!(slug("A B#C% D"), "b-sharpc-percent-d");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(slug("  tabs\tand\n\nnewlines  "), "-tabs-and-newlines-");
    }

    #[test]
    fn unicode_letters_and_periods_survive() {
        assert_eq!(slug("Über Café v1.2"), "über-café-v1.2");
    }

    #[test]
    fn article_is_only_stripped_at_the_start() {
        assert_eq!(slug("Theory of a-team"), "theory-of-ateam");
        assert_eq!(slug("Another one"), "another-one");
    }

    /// Hyphens are not in the allowed set, so only hyphen free slugs are fixed points.
    #[test]
    fn idempotent_on_clean_input() {
        for input in ["rust", "v1.2", "Über", "2018"] {
            let once = slug(input);
            assert_eq!(slug(&once), once);
        }
    }

    #[test]
    fn multi_word_slugs_lose_hyphens_when_slugged_again() {
        let once = slug("a a a");
        assert_eq!(once, "a-a");
        assert_eq!(slug(&once), "aa");
        assert_eq!(slug("Rust in production"), "rust-in-production");
        assert_eq!(slug("rust-in-production"), "rustinproduction");
    }

    #[test]
    fn deterministic() {
        let slugger = Slugger::new().unwrap();
        let title = "Why 90% of #hashtags fail";
        assert_eq!(slugger.slug(title), slugger.slug(title));
        assert_eq!(slugger.slug(title), "why-90-percent-of-sharphashtags-fail");
    }
}
