pub const OTHER_IT: &str = "Other IT";

/// (label, keywords) in match-priority order, first keyword hit wins. The
/// order is load-bearing: several lists overlap ("analyst" appears under
/// both Data Science and Business Analysis; "engineer" would swallow
/// everything if Software came first). Do not reorder.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "DevOps and Platform Engineering",
        &[
            "devops", "platform engineer", "site reliability", "sre",
            "infrastructure engineer", "terraform", "kubernetes", "docker",
            "ci/cd", "pipeline", "release engineer",
            "infrastructure automation", "deployment engineer", "platform architect",
        ],
    ),
    (
        "Quality Assurance and Testing",
        &[
            "qa engineer", "quality assurance", "test", "tester",
            "qa analyst", "testing", "automation tester", "test planning",
            "functional test", "quality",
            "test automation", "qa specialist", "qa automation", "qa",
        ],
    ),
    (
        "Database Administration",
        &[
            "database administrator", "dba", "database",
            "sql administrator", "metadata", "db administrator", "sql server",
            "migration", "extract transform", "data architect", "data administrator",
        ],
    ),
    (
        "Business and Systems Analysis",
        &[
            "business analyst", "systems analyst", "functional analyst",
            "process analyst", "business systems analyst",
            "requirements analyst", "system analyst", "functional",
            "business systems", "process improvement", "presales", "payroll",
            "sap", "enterprise", "sap consultant", "sap fico", "sap associate",
            "sap administrator", "technical consultant",
        ],
    ),
    (
        "Cloud Computing",
        &["cloud", "cloud specialist", "aws", "azure", "gcp", "solutions architect"],
    ),
    (
        "Cybersecurity",
        &[
            "security", "security officer", "cybersecurity", "penetration",
            "application security", "infosec", "cyber security", "cyber", "it security",
        ],
    ),
    (
        "IT Support and Helpdesk",
        &[
            "it support", "technical support", "help desk", "desktop support",
            "support", "support analyst", "it technician",
            "computer technician", "user productivity", "end user",
            "contact center", "field support",
            "helpdesk", "technical", "support lead", "deskside support",
            "it staff", "it service", "it desk", "service desk",
            "computer operator", "assistant",
            "information technology", "information staff", "technology staff",
            "it intern", "it specialist",
        ],
    ),
    (
        "Data Science and Analysis",
        &[
            "data scientist", "data analyst", "data eng", "business intelligence",
            "machine learning", "analytics", "bi analyst", "reporting analyst",
            "data conversion", "ml", "web analyst", "sql", "data visualization",
            "analyst", "data annotator", "data specialist", "powerbi",
            "data workflow analyst", "data strategy", "sql analyst", "bi reporting",
        ],
    ),
    (
        "Software, Web, and Mobile Development",
        &[
            "web developer", "frontend developer", "backend developer",
            "full stack", "fullstack", "angular developer", "react developer",
            "vue", "nodejs", "web engineer", "wordpress", "ui developer",
            "web designer", "frontend engineer", "ui/ux developer",
            "javascript developer", "html", "css developer", "java enterprise",
            "java", "ui/ux", "ui", "ux", "next.js",
            "mobile developer", "android developer",
            "app developer", "android", "mobile app", "cobol",
            "software developer", "software engineer", "programmer",
            "application developer",
            "java developer", "python developer", "golang developer",
            "developer", "engineer", ".net developer", "php developer",
            "c++ developer", "technical developer", "kong developer",
            "backend engineer", "application engineer", "systems developer",
            "solutions engineer", "solutions", "product designer",
            "building tool", "website", "website administrator",
            "software development", "software architect", "ai & automation",
            "ai architect",
        ],
    ),
    (
        "Network and Systems Administration",
        &[
            "system administrator", "systems administrator", "sysadmin",
            "network administrator", "it administrator", "server administrator",
            "system analyst", "it officer", "system i", "infrastructure specialist",
            "systems engineer", "network engineer", "server engineer",
            "ip telephony", "telephony", "system", "technology architecture",
        ],
    ),
    (
        "IT Management and Operations",
        &[
            "it project manager", "project manager", "owner",
            "it strategic business partner", "business partner manager",
            "billing consultant", "technical project manager",
            "business development",
            "manager", "project management", "itsm", "director", "governance",
            "compliance", "management", "it operations", "it project coordinator",
            "chief technology officer",
            "it supervisor", "chief transformation officer", "it project lead",
            "it project", "it lead", "project administrator", "it specialist",
            "scrum", "enterprise solutions",
        ],
    ),
];

/// Map a job title to its category label, falling back to "Other IT" when no
/// keyword list matches. Pipes and hyphens are treated as word separators so
/// titles like "QA-Engineer | Manila" tokenize the same as plain ones.
pub fn categorize(title: &str) -> &'static str {
    let cleaned = title.trim().to_lowercase().replace(['|', '-'], " ");
    for (label, keywords) in CATEGORIES {
        if keywords.iter().any(|k| cleaned.contains(k)) {
            return label;
        }
    }
    OTHER_IT
}

// ── Tests ──
