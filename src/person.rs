//! Person (Candidate) Classification
//!
//! Same algorithm shape as [`crate::party`], but against a small fixed
//! watch-list of named candidates and with no advertiser-override step.
//! Keyword lists include Devanagari spellings seen in real bylines.

/// The sentinel label for ads not attributable to a watched candidate.
pub const OTHERS: &str = "Others";

/// Static details for a watched candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonDetails {
    pub name: &'static str,
    pub constituency: &'static str,
    pub party: &'static str,
    pub role: &'static str,
}

/// Per-person keyword lists, in priority order (first match wins).
pub static PERSON_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Binod Mishra",
        &[
            "binod mishra",
            "binod",
            "mishra ji",
            "binod kumar mishra",
            "advocate binod",
            "binod advocate",
            "shri binod mishra",
            "श्री बिनोद मिश्रा",
            "बिनोद मिश्रा",
            "बिनोद",
        ],
    ),
    (
        "Maithili Thakur",
        &[
            "maithili thakur",
            "maithili",
            "thakur maithili",
            "singer maithili",
            "maithili singer",
            "thakur ji",
            "मैथिली ठाकुर",
            "मैथिली",
            "ठाकुर मैथिली",
        ],
    ),
    (
        "Vijay Kumar Sinha",
        &[
            "vijay kumar sinha",
            "vijay sinha",
            "vijay kumar",
            "sinha vijay",
            "lakhisarai",
            "vijay lakhisarai",
            "vk sinha",
            "विजय कुमार सिन्हा",
            "विजय सिन्हा",
            "विजय कुमार",
        ],
    ),
];

static PERSON_DETAILS: &[PersonDetails] = &[
    PersonDetails {
        name: "Binod Mishra",
        constituency: "Alinagar",
        party: "RJD",
        role: "Candidate",
    },
    PersonDetails {
        name: "Maithili Thakur",
        constituency: "Alinagar",
        party: "Independent",
        role: "Candidate",
    },
    PersonDetails {
        name: "Vijay Kumar Sinha",
        constituency: "Lakhisarai",
        party: "BJP",
        role: "Candidate",
    },
];

/// Classify an ad to a watched candidate, or [`OTHERS`].
///
/// Matches each person's keywords as substrings of the lowercase
/// `"{advertiser_id} {text}"` corpus, in watch-list order.
pub fn classify_person(advertiser_id: Option<&str>, text: Option<&str>) -> &'static str {
    let corpus = format!("{} {}", advertiser_id.unwrap_or(""), text.unwrap_or("")).to_lowercase();

    for (person, keywords) in PERSON_KEYWORDS {
        if keywords.iter().any(|keyword| corpus.contains(keyword)) {
            return person;
        }
    }

    OTHERS
}

/// Look up details for a watched candidate; `None` for unwatched names.
pub fn person_details(name: &str) -> Option<&'static PersonDetails> {
    PERSON_DETAILS.iter().find(|details| details.name == name)
}

/// All watched candidate names, in watch-list order.
pub fn watch_list() -> impl Iterator<Item = &'static str> {
    PERSON_KEYWORDS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_is_others() {
        assert_eq!(classify_person(Some("p1"), Some("Gram Panchayat News")), OTHERS);
        assert_eq!(classify_person(None, None), OTHERS);
    }

    #[test]
    fn test_keyword_match() {
        assert_eq!(
            classify_person(Some("p1"), Some("Vote for Maithili Thakur")),
            "Maithili Thakur"
        );
        assert_eq!(
            classify_person(None, Some("Lakhisarai Vikas Manch")),
            "Vijay Kumar Sinha"
        );
    }

    #[test]
    fn test_devanagari_keywords() {
        assert_eq!(classify_person(None, Some("श्री बिनोद मिश्रा जी")), "Binod Mishra");
    }

    #[test]
    fn test_watch_list_order_is_priority_order() {
        let names: Vec<&str> = watch_list().collect();
        assert_eq!(
            names,
            vec!["Binod Mishra", "Maithili Thakur", "Vijay Kumar Sinha"]
        );
    }

    #[test]
    fn test_details_lookup() {
        let details = person_details("Vijay Kumar Sinha").unwrap();
        assert_eq!(details.constituency, "Lakhisarai");
        assert_eq!(details.party, "BJP");
        assert!(person_details("Nobody").is_none());
    }
}
