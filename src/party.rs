//! Party Classification
//!
//! Maps an advertiser identity (opaque id plus free-text display name) to a
//! political party using ordered substring matching. Two tables drive the
//! classification:
//!
//! 1. **Advertiser overrides** - known third-party advertising firms that buy
//!    ads on behalf of a party. Agency name in the display name is a stronger
//!    signal than keyword overlap, so these are checked first.
//! 2. **Party keywords** - per-party keyword lists checked in a fixed priority
//!    order. Regional parties whose keywords collide with the large national
//!    parties are checked before them; the ordering is a deliberate
//!    disambiguation policy and is load-bearing. A name matching several
//!    parties' keywords resolves to the first party in table order.
//!
//! Classification is a pure function of its inputs: identical `(advertiser_id,
//! display_name)` pairs always produce the same label.

use serde::{Serialize, Serializer};
use std::fmt;

/// A political party label, or the `Others` sentinel for anything the keyword
/// tables do not recognize.
///
/// Variant order follows the classification priority order, so `Ord` on this
/// enum matches the keyword table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Party {
    Dmk,
    Aitc,
    Ncp,
    Tdp,
    Aiadmk,
    Sp,
    Bsp,
    ShivSena,
    Bjd,
    Ysrcp,
    Brs,
    CpiM,
    Jds,
    Jdu,
    Rjd,
    JanSuraaj,
    Ljp,
    Ham,
    Vip,
    Aimim,
    Bjp,
    Inc,
    Aap,
    Others,
}

impl Party {
    /// Every label, in priority order, `Others` last.
    pub const ALL: &'static [Party] = &[
        Party::Dmk,
        Party::Aitc,
        Party::Ncp,
        Party::Tdp,
        Party::Aiadmk,
        Party::Sp,
        Party::Bsp,
        Party::ShivSena,
        Party::Bjd,
        Party::Ysrcp,
        Party::Brs,
        Party::CpiM,
        Party::Jds,
        Party::Jdu,
        Party::Rjd,
        Party::JanSuraaj,
        Party::Ljp,
        Party::Ham,
        Party::Vip,
        Party::Aimim,
        Party::Bjp,
        Party::Inc,
        Party::Aap,
        Party::Others,
    ];

    /// Short display code, e.g. `"BJP"` or `"Janata Dal (United)"`.
    pub fn code(&self) -> &'static str {
        match self {
            Party::Dmk => "DMK",
            Party::Aitc => "AITC",
            Party::Ncp => "NCP",
            Party::Tdp => "TDP",
            Party::Aiadmk => "AIADMK",
            Party::Sp => "SP",
            Party::Bsp => "BSP",
            Party::ShivSena => "Shiv Sena",
            Party::Bjd => "BJD",
            Party::Ysrcp => "YSRCP",
            Party::Brs => "BRS",
            Party::CpiM => "CPI(M)",
            Party::Jds => "JD(S)",
            Party::Jdu => "Janata Dal (United)",
            Party::Rjd => "RJD",
            Party::JanSuraaj => "Jan Suraaj",
            Party::Ljp => "LJP",
            Party::Ham => "HAM",
            Party::Vip => "VIP",
            Party::Aimim => "AIMIM",
            Party::Bjp => "BJP",
            Party::Inc => "INC",
            Party::Aap => "AAP",
            Party::Others => "Others",
        }
    }

    /// Full party name for display.
    pub fn full_name(&self) -> &'static str {
        match self {
            Party::Dmk => "Dravida Munnetra Kazhagam",
            Party::Aitc => "All India Trinamool Congress",
            Party::Ncp => "Nationalist Congress Party",
            Party::Tdp => "Telugu Desam Party",
            Party::Aiadmk => "All India Anna Dravida Munnetra Kazhagam",
            Party::Sp => "Samajwadi Party",
            Party::Bsp => "Bahujan Samaj Party",
            Party::ShivSena => "Shiv Sena",
            Party::Bjd => "Biju Janata Dal",
            Party::Ysrcp => "YSR Congress Party",
            Party::Brs => "Bharat Rashtra Samithi",
            Party::CpiM => "Communist Party of India (Marxist)",
            Party::Jds => "Janata Dal (Secular)",
            Party::Jdu => "Janata Dal (United)",
            Party::Rjd => "Rashtriya Janata Dal",
            Party::JanSuraaj => "Jan Suraaj Party",
            Party::Ljp => "Lok Janshakti Party",
            Party::Ham => "Hindustani Awam Morcha",
            Party::Vip => "Vikassheel Insaan Party",
            Party::Aimim => "All India Majlis-e-Ittehadul Muslimeen",
            Party::Bjp => "Bharatiya Janata Party",
            Party::Inc => "Indian National Congress",
            Party::Aap => "Aam Aadmi Party",
            Party::Others => "Others",
        }
    }

    /// Parse a party code as given on the command line. Case-insensitive.
    pub fn from_code(code: &str) -> Option<Party> {
        let code = code.trim();
        Party::ALL
            .iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
            .copied()
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Party {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Known advertising firms contracted by a party. Matched as lowercase
/// substrings of the display name, before any keyword check.
pub static ADVERTISER_OVERRIDES: &[(&str, Party)] = &[
    ("populus empowerment network private limited", Party::Dmk),
    ("indian pac consulting private limited", Party::Aitc),
    ("gibbous films private limited", Party::Inc),
    ("designboxed innovations private limited", Party::Ncp),
    ("simplesense analytics private limited", Party::JanSuraaj),
    ("pramanya strategy consulting private limited", Party::Tdp),
    ("crayons.advertising private limited", Party::Aiadmk),
];

/// Per-party keyword lists, in priority order. Order matters: the most
/// specific regional parties come first, the large national parties last.
/// All keywords are lowercase; matching is substring-based.
pub static PARTY_KEYWORDS: &[(Party, &[&str])] = &[
    (
        Party::Dmk,
        &[
            "dravida munnetra kazhagam",
            "dmk",
            "stalin",
            "mk stalin",
            "karunanidhi",
            "dravida munnetra",
        ],
    ),
    (
        Party::Aitc,
        &[
            "all india trinamool congress",
            "trinamool",
            "tmc",
            "aitc",
            "mamata banerjee",
            "mamata",
            "didi",
        ],
    ),
    (
        Party::Ncp,
        &["nationalist congress party", "ncp", "sharad pawar", "ajit pawar"],
    ),
    (
        Party::Tdp,
        &[
            "telugu desam party",
            "tdp",
            "chandrababu naidu",
            "ntr",
            "n chandrababu",
        ],
    ),
    (
        Party::Aiadmk,
        &[
            "all india anna dravida munnetra kazhagam",
            "aiadmk",
            "amma",
            "jayalalithaa",
            "edappadi",
        ],
    ),
    (
        Party::Sp,
        &[
            "samajwadi party",
            "samajwadi",
            "akhilesh yadav",
            "akhilesh",
            "mulayam singh",
            "cycle party",
            "sp up",
        ],
    ),
    (
        Party::Bsp,
        &[
            "bahujan samaj party",
            "bsp",
            "mayawati",
            "behenji",
            "kanshi ram",
            "blue party",
            "dalit movement",
        ],
    ),
    (
        Party::ShivSena,
        &[
            "shiv sena",
            "shivsena",
            "uddhav thackeray",
            "eknath shinde",
            "bal thackeray",
            "sena",
            "thackeray",
        ],
    ),
    (
        Party::Bjd,
        &[
            "biju janata dal",
            "bjd",
            "naveen patnaik",
            "naveen",
            "biju babu",
            "odisha bjd",
        ],
    ),
    (
        Party::Ysrcp,
        &[
            "ysr congress",
            "ysrcp",
            "jagan mohan reddy",
            "jagan",
            "ysr",
            "jagananna",
        ],
    ),
    (
        Party::Brs,
        &[
            "bharat rashtra samithi",
            "brs",
            "trs",
            "telangana rashtra samithi",
            "kcr",
            "k chandrasekhar rao",
        ],
    ),
    (
        Party::CpiM,
        &[
            "communist party",
            "cpim",
            "cpi(m)",
            "cpm",
            "left front",
            "marxist",
            "pinarayi vijayan",
            "sitaram yechury",
        ],
    ),
    (
        Party::Jds,
        &[
            "janata dal secular",
            "jds",
            "jd(s)",
            "deve gowda",
            "kumaraswamy",
            "hd kumaraswamy",
        ],
    ),
    (
        Party::Jdu,
        &[
            "janata dal united",
            "janata dal (united)",
            "jd(u)",
            "jdu",
            "jd (u)",
            "nitish kumar",
            "nitish",
            "janata dal",
            "jd united",
            "jdu bihar",
            "janata dal u",
            "nitishkumar",
            "cm nitish",
            "sushasan",
            "sushashan",
            "vikas yatra",
            "nda bihar",
            "samata party",
            "upendra kushwaha",
            "jdu president",
            "bihar cm",
            "chief minister bihar",
            "sarkar aapki",
            "seven nischay",
            "saat nischay",
            "har ghar nal ka jal",
            "bijli har ghar",
            "lalbahadur shastri",
            "george fernandes",
            "sharad yadav",
            "rkjdu",
        ],
    ),
    (
        Party::Rjd,
        &[
            "rashtriya janata dal",
            "rjd",
            "lalu prasad",
            "lalu yadav",
            "tejashwi yadav",
            "tejashwi",
            "rashtriya janata",
            "rjd bihar",
            "lalu",
            "tejaswi",
            "rabri devi",
            "social justice",
            "mandal commission",
            "backward classes",
            "yadav",
            "mahagathbandhan",
            "maha gathbandhan",
            "grand alliance",
            "laluji",
            "laluji ka aashirwad",
            "jungle raj",
            "badlav",
            "parivartan",
            "badlaav yatra",
            "opposition unity",
            "india alliance",
            "samajwadi",
            "tej pratap",
            "tej pratap yadav",
            "misa bharti",
            "rohini acharya",
            "mahagatbandhan",
            "rjd supremo",
            "lalu parivar",
        ],
    ),
    (
        Party::JanSuraaj,
        &[
            "jan suraaj",
            "jan suraj",
            "jansuraaj",
            "jansuraj",
            "prashant kishor",
            "prashant",
            "kishor",
            "jan suraaj party",
            "jan suraj party",
            "pk",
            "baat bihar ki",
            "political strategist",
            "jan andolan",
            "jantantra",
            "bihar first",
            "jan suraaj abhiyan",
            "new political movement",
            "people movement",
            "grassroots campaign",
            "pk team",
        ],
    ),
    (
        Party::Ljp,
        &[
            "lok janshakti party",
            "ljp",
            "ram vilas paswan",
            "paswan",
            "chirag paswan",
            "chirag",
            "pashupati kumar paras",
            "paras",
            "ljp ram vilas",
            "dalit",
            "scheduled caste",
            "chirag ljp",
            "paswan parivar",
            "lok janshakti",
            "ljp bihar",
            "chirag paswan ljp",
            "bihar first bihari first",
            "berojgar chirag",
            "yuva bihari",
            "dalit icon",
            "dalit leader",
            "sc community",
            "ram vilas legacy",
            "ljp national president",
            "pashupati paras",
            "ljp faction",
            "uncle chirag",
            "jitan ram",
            "paswan ji",
            "chirag ki sena",
            "jamui",
            "hajipur",
        ],
    ),
    (
        Party::Ham,
        &[
            "hindustani awam morcha",
            "ham",
            "jitan ram manjhi",
            "manjhi",
            "ham secular",
            "ham(s)",
            "mahadalit",
            "extremely backward",
            "jitan manjhi",
            "manjhi cm",
            "hindustani awam",
            "jitan ram",
            "chief minister manjhi",
            "ex cm manjhi",
            "former cm manjhi",
            "mahadalit community",
            "extremely backward class",
            "ebc",
            "mahadalit vikas",
            "inclusive development",
            "gaya",
            "imamganj",
            "manjhi ji",
            "ham party",
            "ham bihar",
            "mahadalit empowerment",
            "mahadalit rights",
            "ebc welfare",
            "manjhi sarkar",
            "ham secular party",
        ],
    ),
    (
        Party::Vip,
        &[
            "vikassheel insaan party",
            "vip",
            "mukesh sahni",
            "sahni",
            "nishad",
            "mallah",
            "vip bihar",
            "mukesh sahni vip",
            "son of mallah",
            "vikassheel",
            "mukesh sahani",
            "sahni ji",
            "nishad community",
            "nishad raj",
            "fishermen",
            "boatmen",
            "vikas for all",
            "nishad empowerment",
            "khagaria",
            "bhagalpur",
            "vip party",
            "mallah community",
            "nishad representation",
            "fishermen rights",
            "nishad vikas",
            "nishad welfare",
            "sahni sahab",
            "vip leader",
            "bollywood sahni",
            "vikassheel bihar",
        ],
    ),
    (
        Party::Aimim,
        &[
            "all india majlis",
            "aimim",
            "asaduddin owaisi",
            "owaisi",
            "aimim bihar",
            "majlis",
            "seemanchal",
            "muslim representation",
            "owaisi brothers",
            "akbaruddin owaisi",
            "owaisi sahab",
            "akbar owaisi",
            "kishanganj",
            "katihar",
            "araria",
            "purnia",
            "muslim rights",
            "minority representation",
            "jai bheem jai meem",
            "mim bihar",
            "majlis party",
            "asad owaisi",
            "aimim president",
            "hyderabad mp",
            "minority welfare",
            "muslim empowerment",
            "aimim leader",
            "majlis ittehadul",
            "owaisi party",
            "seemanchal region",
        ],
    ),
    (
        Party::Bjp,
        &[
            "bharatiya janata party",
            "bjp",
            "narendra modi",
            "modi",
            "amit shah",
            "yogi adityanath",
            "namo",
            "lotus",
            "saffron",
            "hindutva",
            "modigovt",
            "modi govt",
            "pmmodiyojana",
            "pm modi",
            "bjp4india",
            "bjp4bihar",
            "nda",
            "national democratic alliance",
            "abki baar",
            "modi sarkar",
            "double engine",
            "sabka saath",
            "sabka vikas",
            "sabka vishwas",
            "viksit bharat",
            "atmanirbhar bharat",
            "new india",
            "jp nadda",
            "rajnath singh",
            "nitin gadkari",
            "sushil modi",
            "ravi shankar prasad",
            "giriraj singh",
            "hindu rashtra",
            "ram mandir",
            "ayodhya",
            "kamal",
            "bjym",
            "yuva morcha",
        ],
    ),
    (
        Party::Inc,
        &[
            "indian national congress",
            "congress",
            "inc",
            "rahul gandhi",
            "sonia gandhi",
            "priyanka gandhi",
            "hand",
            "aicc",
            "congress party",
            "cpcc",
            "indira gandhi",
            "rajiv gandhi",
            "manmohan singh",
            "mallikarjun kharge",
            "kharge",
            "bharat jodo",
            "nyay",
            "garibi hatao",
            "jai jawan",
            "secular",
            "secularism",
            "gandhi parivar",
            "gandhi family",
            "youth congress",
            "nsui",
            "sevadal",
            "pcc",
            "dpcc",
        ],
    ),
    (
        Party::Aap,
        &[
            "aam aadmi party",
            "aap",
            "arvind kejriwal",
            "kejriwal",
            "broom",
            "aam aadmi",
            "common man",
            "aap delhi",
            "aap punjab",
            "delhi model",
            "mohalla clinic",
            "free electricity",
            "education revolution",
            "manish sisodia",
            "sisodia",
            "atishi",
            "sanjay singh",
            "raghav chadha",
            "jhadu",
            "anti corruption",
            "lokpal",
        ],
    ),
];

/// Classify an advertiser to a political party.
///
/// Checks the advertiser-override table against the display name first, then
/// walks the party keyword table in priority order against the combined
/// lowercase `"{advertiser_id} {display_name}"` corpus. Returns
/// [`Party::Others`] when nothing matches or both inputs are missing.
pub fn classify_party(advertiser_id: Option<&str>, display_name: Option<&str>) -> Party {
    if advertiser_id.map_or(true, str::is_empty) && display_name.map_or(true, str::is_empty) {
        return Party::Others;
    }

    if let Some(name) = display_name {
        let name_lower = name.to_lowercase();
        for (agency, party) in ADVERTISER_OVERRIDES {
            if name_lower.contains(agency) {
                return *party;
            }
        }
    }

    let corpus = format!(
        "{} {}",
        advertiser_id.unwrap_or(""),
        display_name.unwrap_or("")
    )
    .to_lowercase();

    for (party, keywords) in PARTY_KEYWORDS {
        if keywords.iter().any(|keyword| corpus.contains(keyword)) {
            return *party;
        }
    }

    Party::Others
}

/// True iff the display name matches a known third-party advertising firm.
pub fn is_third_party_advertiser(display_name: Option<&str>) -> bool {
    match display_name {
        Some(name) => {
            let name_lower = name.to_lowercase();
            ADVERTISER_OVERRIDES
                .iter()
                .any(|(agency, _)| name_lower.contains(agency))
        }
        None => false,
    }
}
