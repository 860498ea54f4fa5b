//! Knowledge base: the static skill, section and job-category tables every analyzer reads.
//!
//! Built once at startup and shared read-only through `AppState` as `Arc<KnowledgeBase>`.
//! Every table is a `Vec` in declaration order: confidence ties and section order in the
//! report depend on it, so nothing here may be hash-ordered.

use regex::Regex;

// ────────────────────────────────────────────────────────────────────────────
// Static tables
// ────────────────────────────────────────────────────────────────────────────

type SkillTable = &'static [(&'static str, &'static [(&'static str, &'static [&'static str])])];
type SynonymTable = &'static [(&'static str, &'static [&'static str])];

const SKILLS: SkillTable = &[
    (
        "Programming Languages",
        &[
            ("python", &["python", "py", "django", "flask", "fastapi", "pandas", "numpy"]),
            ("java", &["java", "spring", "hibernate", "maven", "gradle"]),
            ("javascript", &["javascript", "js", "node", "nodejs", "express"]),
            ("c++", &["c++", "cpp", "cplusplus"]),
            ("c#", &["c#", "csharp", ".net", "dotnet"]),
            ("go", &["go", "golang"]),
            ("rust", &["rust", "rustlang"]),
            ("php", &["php", "laravel", "symfony"]),
            ("ruby", &["ruby", "rails", "ror"]),
        ],
    ),
    (
        "Frameworks & Libraries",
        &[
            ("react", &["react", "reactjs", "jsx", "redux", "nextjs"]),
            ("angular", &["angular", "angularjs", "ng"]),
            ("vue", &["vue", "vuejs", "nuxt"]),
            ("django", &["django", "djangorest"]),
            ("flask", &["flask", "fastapi"]),
            ("spring", &["spring", "springboot"]),
            ("express", &["express", "expressjs"]),
        ],
    ),
    (
        "Cloud & DevOps",
        &[
            ("aws", &["aws", "amazon web services", "ec2", "s3", "lambda"]),
            ("azure", &["azure", "microsoft azure"]),
            ("gcp", &["gcp", "google cloud", "gce"]),
            ("docker", &["docker", "containerization"]),
            ("kubernetes", &["kubernetes", "k8s", "kubectl"]),
            ("terraform", &["terraform", "iac"]),
            ("jenkins", &["jenkins", "ci/cd"]),
        ],
    ),
    (
        "Data & AI",
        &[
            ("machine learning", &["machine learning", "ml", "ai", "artificial intelligence"]),
            ("data science", &["data science", "data analysis", "analytics"]),
            ("sql", &["sql", "mysql", "postgresql", "mongodb", "database"]),
            ("tensorflow", &["tensorflow", "tf"]),
            ("pytorch", &["pytorch", "torch"]),
            ("pandas", &["pandas", "dataframe"]),
            ("numpy", &["numpy", "numerical computing"]),
        ],
    ),
    (
        "Soft Skills",
        &[
            ("leadership", &["leadership", "team lead", "management"]),
            ("communication", &["communication", "presentation", "writing"]),
            ("project management", &["project management", "agile", "scrum", "kanban"]),
            ("problem solving", &["problem solving", "analytical", "critical thinking"]),
        ],
    ),
];

const SECTIONS: SynonymTable = &[
    ("contact", &["contact", "personal", "info", "details"]),
    ("summary", &["summary", "profile", "objective", "about"]),
    ("experience", &["experience", "work", "employment", "career", "professional"]),
    ("education", &["education", "academic", "degree", "university", "college"]),
    ("skills", &["skills", "technical", "technologies", "tools", "competencies"]),
    ("projects", &["projects", "portfolio", "work samples", "achievements"]),
    ("certifications", &["certifications", "certificates", "credentials", "licenses"]),
];

const JOB_CATEGORIES: SynonymTable = &[
    ("software engineer", &["software", "development", "programming", "coding", "engineering"]),
    ("data scientist", &["data", "analysis", "machine learning", "statistics", "python", "r"]),
    ("product manager", &["product", "management", "strategy", "roadmap", "stakeholder"]),
    ("marketing", &["marketing", "campaign", "digital", "social media", "seo", "analytics"]),
    ("sales", &["sales", "revenue", "client", "customer", "business development"]),
    ("finance", &["finance", "financial", "accounting", "budget", "analysis", "excel"]),
];

// ────────────────────────────────────────────────────────────────────────────
// Typed knowledge base
// ────────────────────────────────────────────────────────────────────────────

/// A spelling or alias of a term, with its whole-word pattern compiled up front.
#[derive(Debug, Clone)]
pub struct Variant {
    pub text: String,
    pub word_pattern: Regex,
}

impl Variant {
    pub fn new(text: &str) -> Self {
        let word_pattern = Regex::new(&format!(r"\b{}\b", regex::escape(text)))
            .expect("escaped variant is a valid pattern");
        Self {
            text: text.to_string(),
            word_pattern,
        }
    }

    /// True when the variant appears bounded by non-word characters.
    pub fn matches_word(&self, text_lower: &str) -> bool {
        self.word_pattern.is_match(text_lower)
    }

    /// Number of non-overlapping whole-word occurrences.
    pub fn count_words(&self, text_lower: &str) -> usize {
        self.word_pattern.find_iter(text_lower).count()
    }
}

#[derive(Debug, Clone)]
pub struct Skill {
    pub name: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// A named keyword set, e.g. a job category and the phrases ATS filters look for.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pub name: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub skill_categories: Vec<SkillCategory>,
    pub sections: Vec<Section>,
    pub job_categories: Vec<KeywordSet>,
}

impl KnowledgeBase {
    /// Builds the knowledge base from the built-in tables. Panics only if a table
    /// entry cannot be compiled, which is a defect in the tables themselves.
    pub fn builtin() -> Self {
        let skill_categories = SKILLS
            .iter()
            .map(|(category, skills)| SkillCategory {
                name: category.to_string(),
                skills: skills
                    .iter()
                    .map(|(skill, variants)| Skill {
                        name: skill.to_string(),
                        variants: variants.iter().map(|v| Variant::new(v)).collect(),
                    })
                    .collect(),
            })
            .collect();

        let sections = SECTIONS
            .iter()
            .map(|(name, synonyms)| Section {
                name: name.to_string(),
                synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        Self {
            skill_categories,
            sections,
            job_categories: keyword_sets(JOB_CATEGORIES),
        }
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn skill_count(&self) -> usize {
        self.skill_categories.iter().map(|c| c.skills.len()).sum()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compiles a `(name, variants)` table into keyword sets, preserving order.
pub fn keyword_sets(table: &[(&str, &[&str])]) -> Vec<KeywordSet> {
    table
        .iter()
        .map(|(name, variants)| KeywordSet {
            name: name.to_string(),
            variants: variants.iter().map(|v| Variant::new(v)).collect(),
        })
        .collect()
}
