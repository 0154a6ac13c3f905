use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Generic vocabulary. Tokens needing contextual disambiguation live in
/// AMBIGUOUS below, not here.
const VOCAB: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "ruby",
    "kotlin",
    // Web technologies
    "html", "css", "angular", "vue", "node.js", "django", "flask", "spring",
    "laravel", "graphql", "html5", "css3",
    // Databases & data technologies
    "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch",
    "sqlite", "oracle", "sql server", "nosql", "hadoop", "spark", "etl",
    "databricks",
    // Cloud & devops
    "azure", "gcp", "google cloud", "docker", "kubernetes", "jenkins",
    "terraform", "ansible", "devops",
    // Data & analytics
    "pandas", "numpy", "tensorflow", "pytorch", "scikit-learn", "tableau",
    "power bi", "stata",
    // Mobile
    "android", "react native", "flutter", "xamarin",
    // Marketing tools
    "google analytics", "facebook ads", "google ads", "hubspot", "salesforce",
    "mailchimp", "hootsuite",
    // Business tools
    "jira", "confluence", "slack", "trello", "asana", "notion", "linux",
    // Office tooling
    "vba", "power query", "ms office", "microsoft office", "macros",
    "excel macros",
];

/// Tokens that always emit as all-caps acronyms.
const UPPER_LABELS: &[&str] = &[
    "sql", "html", "css", "api", "rest", "json", "xml", "etl", "html5",
    "css3", "vba",
];

/// Brand/product tokens with fixed canonical casing.
const FIXED_LABELS: &[(&str, &str)] = &[
    ("node.js", "Node.js"),
    ("mongodb", "MongoDB"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("graphql", "GraphQL"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("power bi", "Power BI"),
    ("power query", "Power Query"),
];

struct Ambiguous {
    label: &'static str,
    contexts: &'static [&'static str],
    veto: Option<&'static str>,
}

/// Context patterns run against lowercased text. A token is emitted only if
/// some context matches and the veto (if any) does not.
const AMBIGUOUS: &[Ambiguous] = &[
    Ambiguous {
        label: "R",
        contexts: &[
            r"\br\s+programming\b", r"\br\s+language\b", r"\br\s+studio\b",
            r"\brstudio\b", r"\br\s+statistical\b", r"\bstatistical\s+r\b",
            r"\busing\s+r\b", r"\bwith\s+r\b", r"\bin\s+r\b",
            r"\br\s+software\b", r"\br\s+package\b", r"\br\s+script\b",
            r"\br\s+code\b", r"\br\s+analysis\b", r"\bknowledge\s+of\s+r\b",
            r"\bexperience\s+with\s+r\b", r"\bproficient\s+in\s+r\b",
            r"\br\s+and\s+python\b", r"\bpython\s+and\s+r\b",
            r"\br\s+or\s+python\b", r"\bpython\s+or\s+r\b",
            r"\br\s*[,/]\s*python\b", r"\bpython\s*[,/]\s*r\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "Go",
        contexts: &[
            r"\bgo\s+programming\b", r"\bgo\s+language\b", r"\bgo\s+developer\b",
            r"\bgo\s+engineer\b", r"\bgolang\b", r"\busing\s+go\b",
            r"\bwith\s+go\b", r"\bin\s+go\b", r"\bgo\s+code\b",
            r"\bgo\s+application\b", r"\bgo\s+service\b",
            r"\bknowledge\s+of\s+go\b", r"\bexperience\s+with\s+go\b",
            r"\bproficient\s+in\s+go\b", r"\bgo\s+and\s+python\b",
            r"\bpython\s+and\s+go\b", r"\bgo\s+or\s+python\b",
            r"\bpython\s+or\s+go\b", r"\bgo\s*[,/]\s*python\b",
            r"\bpython\s*[,/]\s*go\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "Excel",
        contexts: &[
            r"\bmicrosoft\s+excel\b", r"\bms\s+excel\b",
            r"\bexcel\s+spreadsheets?\b", r"\bexcel\s+workbooks?\b",
            r"\bexcel\s+formulas?\b", r"\bexcel\s+macros?\b",
            r"\bexcel\s+pivot\b", r"\bexcel\s+charts?\b", r"\bexcel\s+data\b",
            r"\bexcel\s+analysis\b", r"\bexcel\s+modeling\b",
            r"\bexcel\s+reporting\b", r"\busing\s+excel\b", r"\bwith\s+excel\b",
            r"\bin\s+excel\b", r"\bknowledge\s+of\s+excel\b",
            r"\bexperience\s+with\s+excel\b", r"\bproficient\s+in\s+excel\b",
            r"\badvanced\s+excel\b", r"\bbasic\s+excel\b",
            r"\bintermediate\s+excel\b", r"\bexcel\s+skills\b",
            r"\bexcel\s+expert\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "PHP",
        contexts: &[
            r"\bphp\s+developer\b", r"\bphp\s+development\b",
            r"\bphp\s+programming\b", r"\bphp\s+engineer\b",
            r"\bphp\s+framework\b", r"\bphp\s+backend\b",
            r"\bphp\s+scripts?\b", r"\busing\s+php\b", r"\bwith\s+php\b",
            r"\bin\s+php\b", r"\bknowledge\s+of\s+php\b",
            r"\bexperience\s+with\s+php\b", r"\bproficient\s+in\s+php\b",
            r"\bphp\s+and\b", r"\band\s+php\b", r"\bphp\s*[,/]", r"[,/]\s*php\b",
            r"\bphp\b[^.]{0,60}\blaravel\b", r"\blaravel\b[^.]{0,60}\bphp\b",
        ],
        // Currency use: PHP directly before an amount, or near compensation
        // wording. A currency hit kills the token even when a language
        // pattern also matched.
        veto: Some(
            r"\bphp\s*₱?\s*\d|\bphp\b[^.]{0,40}\b(?:salary|budget|cost)\b|\b(?:salary|budget|cost)\b[^.]{0,40}\bphp\b",
        ),
    },
    Ambiguous {
        label: "SAP",
        contexts: &[
            r"\bsap\s+consultant\b", r"\bsap\s+fico\b", r"\bsap\s+abap\b",
            r"\bsap\s+hana\b", r"\bsap\s+basis\b", r"\bsap\s+erp\b",
            r"\bsap\s+modules?\b", r"\bsap\s+implementation\b",
            r"\bsap\s+administrator\b", r"\bsap\s+system\b",
            r"\bsap\s+software\b", r"\busing\s+sap\b", r"\bwith\s+sap\b",
            r"\bexperience\s+(?:with|in)\s+sap\b", r"\bknowledge\s+of\s+sap\b",
        ],
        veto: Some(r"\basap\b"),
    },
    Ambiguous {
        label: "AWS",
        contexts: &[
            r"\bamazon\s+web\s+services\b", r"\baws\s+cloud\b",
            r"\baws\s+services?\b", r"\baws\s+lambda\b", r"\baws\s+ec2\b",
            r"\baws\s+s3\b", r"\baws\s+infrastructure\b",
            r"\baws\s+certified\b", r"\baws\s+experience\b",
            r"\bexperience\s+(?:with|in|on)\s+aws\b", r"\busing\s+aws\b",
            r"\bdeployed?\s+(?:on|to)\s+aws\b", r"\bon\s+aws\b",
            r"\baws\s+and\b", r"\band\s+aws\b", r"\baws\s*[,/]", r"[,/]\s*aws\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "iOS",
        contexts: &[
            r"\bios\s+developer\b", r"\bios\s+development\b",
            r"\bios\s+apps?\b", r"\bios\s+applications?\b",
            r"\bios\s+engineer\b", r"\bios\s+sdk\b", r"\bnative\s+ios\b",
            r"\bios\s+and\s+android\b", r"\bandroid\s+and\s+ios\b",
            r"\bios\s*[,/]\s*android\b", r"\bandroid\s*[,/]\s*ios\b",
            r"\bswift\s+ios\b", r"\bios\s+swift\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "Swift",
        contexts: &[
            r"\bswift\s+developer\b", r"\bswift\s+programming\b",
            r"\bswift\s+language\b", r"\bswiftui\b", r"\bios\s+swift\b",
            r"\bswift\s+ios\b", r"\busing\s+swift\b", r"\bin\s+swift\b",
            r"\bswift\s+and\s+objective-?c\b", r"\bobjective-?c\s+and\s+swift\b",
            r"\bswift\s*[,/]\s*(?:objective-?c|kotlin|ios)\b",
            r"\bexperience\s+(?:with|in)\s+swift\b",
            r"\bknowledge\s+of\s+swift\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "Scala",
        contexts: &[
            r"\bscala\s+developer\b", r"\bscala\s+programming\b",
            r"\bscala\s+engineer\b", r"\busing\s+scala\b", r"\bin\s+scala\b",
            r"\bwith\s+scala\b", r"\bspark\s+(?:and\s+)?scala\b",
            r"\bscala\s+(?:and\s+)?spark\b", r"\bscala\s*[,/]", r"[,/]\s*scala\b",
            r"\bexperience\s+(?:with|in)\s+scala\b",
            r"\bknowledge\s+of\s+scala\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "Rust",
        contexts: &[
            r"\brust\s+developer\b", r"\brust\s+programming\b",
            r"\brust\s+language\b", r"\brust\s+engineer\b",
            r"\busing\s+rust\b", r"\bin\s+rust\b", r"\bwith\s+rust\b",
            r"\brust\s+and\s+(?:go|c\+\+|python)\b",
            r"\b(?:go|c\+\+|python)\s+and\s+rust\b",
            r"\bexperience\s+(?:with|in)\s+rust\b",
            r"\bknowledge\s+of\s+rust\b", r"\brust\s*[,/]", r"[,/]\s*rust\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "React",
        contexts: &[
            r"\breact\s+developer\b", r"\breact\.?js\b", r"\breactjs\b",
            r"\breact\s+js\b", r"\breact\s+native\b",
            r"\breact\s+front-?end\b", r"\busing\s+react\b",
            r"\bwith\s+react\b", r"\bin\s+react\b", r"\breact\s+and\b",
            r"\band\s+react\b", r"\breact\s*[,/]", r"[,/]\s*react\b",
            r"\breact\s+components?\b", r"\breact\s+hooks\b",
            r"\bexperience\s+(?:with|in)\s+react\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "Express",
        contexts: &[
            r"\bexpress\.?js\b", r"\bexpressjs\b", r"\bexpress\s+js\b",
            r"\bnode\.?js\s+(?:and\s+)?express\b",
            r"\bexpress\s+(?:and\s+)?node\.?js\b", r"\bnode\s+and\s+express\b",
            r"\bexpress\s+framework\b", r"\bexpress\s+server\b",
            r"\bexpress\s+middleware\b",
            r"\b(?:mongodb|react|angular)\s*,\s*express\b",
            r"\bexpress\s*,\s*(?:node|react)\b",
        ],
        veto: None,
    },
    Ambiguous {
        label: "SSIS",
        contexts: &[
            r"\bssis\s+packages?\b", r"\bssis\s+development\b",
            r"\bsql\s+server\s+integration\s+services\b",
            r"\bssis\s+(?:and\s+)?ssrs\b", r"\bssrs\s+(?:and\s+)?ssis\b",
            r"\busing\s+ssis\b", r"\bssis\s+etl\b",
            r"\betl\b[^.]{0,40}\bssis\b", r"\bssis\b[^.]{0,40}\betl\b",
            r"\bexperience\s+(?:with|in)\s+ssis\b", r"\bssis\s*[,/]",
            r"[,/]\s*ssis\b",
        ],
        veto: None,
    },
];

static GENERIC_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    VOCAB
        .iter()
        .map(|token| (*token, Regex::new(&boundary_pattern(token)).unwrap()))
        .collect()
});

struct CompiledAmbiguous {
    label: &'static str,
    contexts: Vec<Regex>,
    veto: Option<Regex>,
}

static AMBIGUOUS_RES: LazyLock<Vec<CompiledAmbiguous>> = LazyLock::new(|| {
    AMBIGUOUS
        .iter()
        .map(|a| CompiledAmbiguous {
            label: a.label,
            contexts: a.contexts.iter().map(|p| Regex::new(p).unwrap()).collect(),
            veto: a.veto.map(|p| Regex::new(p).unwrap()),
        })
        .collect()
});

/// Escape a vocabulary token and pin word boundaries where the token edge is
/// a word character. "c++" gets no trailing \b — there is no word boundary
/// after '+' to anchor against.
fn boundary_pattern(token: &str) -> String {
    let escaped = regex::escape(token);
    let lead = if token.starts_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    let trail = if token.ends_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    format!("{}{}{}", lead, escaped, trail)
}

fn emit_label(token: &str) -> String {
    if UPPER_LABELS.contains(&token) {
        return token.to_uppercase();
    }
    if let Some((_, fixed)) = FIXED_LABELS.iter().find(|(t, _)| *t == token) {
        return (*fixed).to_string();
    }
    title_case(token)
}

/// Python-str.title() casing: every letter that follows a non-letter is
/// capitalized ("google cloud" → "Google Cloud", "scikit-learn" →
/// "Scikit-Learn").
fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut prev_alpha = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Extract the sorted, deduplicated technology list from free text, or None
/// when nothing is recognized.
///
/// Generic vocabulary tokens match with word boundaries. Ambiguous tokens —
/// single letters, currency collisions, common English words — never match
/// bare: each needs one of its context phrases, and a veto suppresses the
/// token outright ("PHP 50,000" is a salary, "asap" is not SAP).
pub fn extract(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let mut found: BTreeSet<String> = BTreeSet::new();

    for (token, re) in GENERIC_RES.iter() {
        if re.is_match(&lower) {
            found.insert(emit_label(token));
        }
    }

    for amb in AMBIGUOUS_RES.iter() {
        if let Some(veto) = &amb.veto {
            if veto.is_match(&lower) {
                continue;
            }
        }
        if amb.contexts.iter().any(|re| re.is_match(&lower)) {
            found.insert(amb.label.to_string());
        }
    }

    if found.is_empty() {
        None
    } else {
        Some(found.into_iter().collect::<Vec<_>>().join(", "))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_vocabulary() {
        let t = extract("Experience with Python, Django and PostgreSQL required").unwrap();
        assert_eq!(t, "Django, PostgreSQL, Python");
    }

    #[test]
    fn casing_overrides() {
        let t = extract("sql, html and css plus node.js and power bi").unwrap();
        assert!(t.contains("SQL"));
        assert!(t.contains("HTML"));
        assert!(t.contains("CSS"));
        assert!(t.contains("Node.js"));
        assert!(t.contains("Power BI"));
    }

    #[test]
    fn word_boundaries_respected() {
        // "vue" must not fire inside "revenue", "java" not inside "javascript".
        assert_eq!(extract("revenue analyst role"), None);
        let t = extract("JavaScript developer").unwrap();
        assert_eq!(t, "JavaScript");
    }

    #[test]
    fn cpp_and_csharp() {
        let t = extract("C++ or C# background").unwrap();
        assert!(t.contains("C++"));
        assert!(t.contains("C#"));
    }

    #[test]
    fn php_currency_is_suppressed() {
        assert_eq!(
            extract("We need someone skilled in PHP 50,000 salary range"),
            None
        );
        assert_eq!(extract("Offering PHP 30,000 monthly budget"), None);
    }

    #[test]
    fn php_language_is_kept() {
        let t = extract("PHP developer with Laravel experience").unwrap();
        assert!(t.contains("PHP"));
        assert!(t.contains("Laravel"));
    }

    #[test]
    fn r_needs_context() {
        assert_eq!(extract("r position open"), None);
        let t = extract("statistical analysis using R and Python").unwrap();
        assert!(t.contains("R"));
        assert!(t.contains("Python"));
    }

    #[test]
    fn go_needs_context() {
        assert_eq!(extract("go getter attitude"), None);
        assert!(extract("Golang microservices").unwrap().contains("Go"));
    }

    #[test]
    fn sap_vs_asap() {
        assert!(extract("SAP FICO consultant").unwrap().contains("SAP"));
        assert_eq!(extract("apply asap to the sap consultant line"), None);
    }

    #[test]
    fn express_needs_context() {
        assert_eq!(extract("express delivery coordinator"), None);
        let t = extract("Node.js and Express REST backend").unwrap();
        assert!(t.contains("Express"));
        assert!(t.contains("Node.js"));
    }

    #[test]
    fn react_needs_context() {
        assert_eq!(extract("able to react quickly under pressure"), None);
        assert!(extract("React.js frontend work").unwrap().contains("React"));
        // "react native" feeds both the generic multi-word token and the
        // React context registry.
        let t = extract("react native mobile apps").unwrap();
        assert!(t.contains("React Native"));
        assert!(t.contains("React"));
    }

    #[test]
    fn sorted_and_deduplicated() {
        let t = extract("docker docker kubernetes azure AZURE").unwrap();
        assert_eq!(t, "Azure, Docker, Kubernetes");
    }

    #[test]
    fn idempotent() {
        let text = "Senior PHP developer, Laravel, MySQL, AWS cloud, hybrid";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn nothing_recognized() {
        assert_eq!(extract("Customer service representative"), None);
    }
}
