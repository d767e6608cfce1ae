//! Static lookup tables behind the generator: departments, their positions,
//! per-position skill pools, per-department review strengths and name pools.

use rand::{Rng, seq::SliceRandom};

pub const DEPARTMENTS: &[(&str, &[&str])] = &[
    (
        "Engineering",
        &[
            "Software Engineer",
            "Senior Software Engineer",
            "Lead Developer",
            "DevOps Engineer",
            "Test Analyst",
            "Test Automation Engineer",
        ],
    ),
    ("Product", &["Product Manager", "Product Owner", "Product Designer"]),
    (
        "Analytics",
        &[
            "Data Analyst",
            "Data Scientist",
            "Machine Learning Engineer",
            "Data Engineer",
        ],
    ),
    ("HR", &["HR Specialist", "HR Manager", "HR Assistant"]),
    ("Finance", &["Finance Manager", "Accountant", "Financial Analyst"]),
    ("Sales", &["Sales Executive", "Sales Manager", "Sales Assistant"]),
    (
        "IT Support",
        &[
            "IT Support Engineer",
            "IT Support Manager",
            "IT Support Specialist",
        ],
    ),
    (
        "Operations",
        &[
            "Operations Coordinator",
            "Operations Manager",
            "Operations Analyst",
        ],
    ),
];

const PRODUCT_SKILLS: &[&str] = &[
    "Agile",
    "Scrum",
    "Leadership",
    "Communication",
    "Roadmapping",
    "User Stories",
];

const HR_LEAD_SKILLS: &[&str] = &[
    "HR Strategy",
    "Leadership",
    "Employee Engagement",
    "Conflict Management",
];

const OPERATIONS_SKILLS: &[&str] = &[
    "Logistics",
    "Scheduling",
    "Process Management",
    "Communication",
];

pub const SKILLS_BY_POSITION: &[(&str, &[&str])] = &[
    (
        "Software Engineer",
        &[
            "Java",
            "Spring Boot",
            "PostgreSQL",
            "Python",
            "Docker",
            "REST APIs",
            "Javascript",
        ],
    ),
    (
        "Senior Software Engineer",
        &[
            "Java",
            "Spring Boot",
            "Microservices",
            "Kubernetes",
            "System Design",
            "CI/CD",
            "Code Reviews",
            "Code Quality",
            "Code Optimization",
            "Software Architecture",
        ],
    ),
    (
        "Lead Developer",
        &[
            "Java",
            "System Architecture",
            "Project Management",
            "Agile",
            "Team Leadership",
        ],
    ),
    (
        "DevOps Engineer",
        &["Docker", "Kubernetes", "CI/CD", "AWS", "Linux", "Automation"],
    ),
    (
        "Test Analyst",
        &[
            "Java",
            "Selenium",
            "Python",
            "SQL",
            "TestNG",
            "REST APIs",
            "JMeter",
            "Maven",
            "CI/CD",
            "Manual Testing",
            "Test Cases Creation",
            "Test Planning",
        ],
    ),
    (
        "Test Automation Engineer",
        &[
            "Java",
            "Selenium",
            "Python",
            "SQL",
            "TestNG",
            "REST APIs",
            "JMeter",
            "Maven",
            "CI/CD",
            "Scripting",
        ],
    ),
    ("Product Manager", PRODUCT_SKILLS),
    ("Product Owner", PRODUCT_SKILLS),
    (
        "Product Designer",
        &[
            "Agile",
            "Scrum",
            "Leadership",
            "Communication",
            "Roadmapping",
            "User Stories",
            "UX/UI Design",
            "Wireframes",
            "Prototypes",
        ],
    ),
    (
        "Data Analyst",
        &[
            "SQL",
            "Python",
            "Pandas",
            "Excel",
            "Data Visualization",
            "Power BI",
            "Tableau",
        ],
    ),
    (
        "Data Scientist",
        &[
            "Python",
            "Machine Learning",
            "TensorFlow",
            "Pandas",
            "Statistics",
            "R",
        ],
    ),
    (
        "Machine Learning Engineer",
        &[
            "Python",
            "Machine Learning",
            "TensorFlow",
            "Pandas",
            "Statistics",
            "R",
            "Data Visualization",
            "Power BI",
            "Tableau",
        ],
    ),
    (
        "Data Engineer",
        &[
            "Python",
            "ETL",
            "SQL",
            "Pandas",
            "Data Visualization",
            "Power BI",
            "Tableau",
            "Airflow",
            "Docker",
            "CI/CD",
        ],
    ),
    (
        "HR Specialist",
        &[
            "Recruitment",
            "Onboarding",
            "Conflict Resolution",
            "Communication",
            "HR Policies",
        ],
    ),
    ("HR Manager", HR_LEAD_SKILLS),
    ("HR Assistant", HR_LEAD_SKILLS),
    (
        "Finance Manager",
        &[
            "Accounting",
            "Budgeting",
            "Excel",
            "Risk Management",
            "Financial Analysis",
            "Forecasting",
        ],
    ),
    (
        "Accountant",
        &[
            "Accounting",
            "Excel",
            "Taxation",
            "Auditing",
            "Financial Reporting",
        ],
    ),
    (
        "Financial Analyst",
        &[
            "Accounting",
            "Excel",
            "Taxation",
            "Auditing",
            "Financial Reporting",
            "Risk Management",
            "Forecasting",
            "Financial Analysis",
        ],
    ),
    (
        "Sales Executive",
        &[
            "Negotiation",
            "CRM",
            "Lead Generation",
            "Networking",
            "Closing Deals",
            "Customer Relations",
        ],
    ),
    (
        "Sales Manager",
        &[
            "Sales Strategy",
            "Team Leadership",
            "Target Planning",
            "CRM",
            "Negotiation",
            "Customer Relations",
            "Networking",
            "Closing Deals",
            "Lead Generation",
        ],
    ),
    (
        "Sales Assistant",
        &[
            "Sales Strategy",
            "Agile",
            "Target Planning",
            "CRM",
            "Negotiation",
            "Customer Relations",
            "Networking",
        ],
    ),
    (
        "IT Support Engineer",
        &[
            "Troubleshooting",
            "Networking",
            "Windows",
            "Linux",
            "Customer Support",
        ],
    ),
    (
        "IT Support Manager",
        &[
            "Troubleshooting",
            "Networking",
            "Windows",
            "Linux",
            "Customer Support",
            "Team Leadership",
            "Project Management",
            "Agile",
            "Communication",
        ],
    ),
    (
        "IT Support Specialist",
        &[
            "Troubleshooting",
            "Networking",
            "Windows",
            "Linux",
            "Customer Support",
            "Agile",
            "Problem Solving",
        ],
    ),
    ("Operations Coordinator", OPERATIONS_SKILLS),
    ("Operations Analyst", OPERATIONS_SKILLS),
    (
        "Operations Manager",
        &[
            "Leadership",
            "Process Optimization",
            "Project Management",
            "Budgeting",
        ],
    ),
];

pub const STRENGTHS_BY_DEPARTMENT: &[(&str, &[&str])] = &[
    (
        "Engineering",
        &[
            "excellent coding skills",
            "strong problem-solving abilities",
            "good understanding of system architecture",
            "proactive in code reviews",
            "quickly adapts to new technologies",
        ],
    ),
    (
        "Product",
        &[
            "strong product vision",
            "excellent communication with stakeholders",
            "good prioritization skills",
            "creates clear roadmaps",
            "leads cross-functional teams effectively",
        ],
    ),
    (
        "Analytics",
        &[
            "strong data analysis skills",
            "excellent in statistical modeling",
            "able to derive actionable insights",
            "proficient with data visualization tools",
            "good at predictive modeling",
        ],
    ),
    (
        "HR",
        &[
            "excellent employee engagement skills",
            "strong recruitment capabilities",
            "great conflict resolution",
            "effective communication",
            "leads training sessions successfully",
        ],
    ),
    (
        "Finance",
        &[
            "accurate financial analysis",
            "strong budgeting skills",
            "attention to detail",
            "effective risk management",
            "good forecasting abilities",
        ],
    ),
    (
        "Sales",
        &[
            "excellent client relationship management",
            "strong negotiation skills",
            "consistently meets sales targets",
            "great at lead generation",
            "persuasive communication",
        ],
    ),
    (
        "IT Support",
        &[
            "quick troubleshooting abilities",
            "strong customer support skills",
            "good knowledge of networks and systems",
            "responsive to tickets",
            "resolves issues efficiently",
        ],
    ),
    (
        "Operations",
        &[
            "excellent process management",
            "strong organizational skills",
            "effective resource allocation",
            "leads teams efficiently",
            "optimizes workflows successfully",
        ],
    ),
];

pub const DEFAULT_STRENGTHS: &[&str] = &["dedicated team member"];

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas",
    "Sarah", "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty",
    "Mark", "Sandra", "Steven", "Ashley", "Andrew", "Emily", "Kenneth", "Donna", "Joshua",
    "Michelle", "Kevin", "Carol", "Brian", "Amanda", "Chidi", "Ngozi", "Emeka", "Amara",
    "Oluwaseun", "Aisha", "Mateo", "Sofia", "Liam", "Chloe", "Hiroshi", "Yuki", "Priya",
    "Arjun", "Fatima", "Omar", "Ingrid", "Lars", "Siobhan", "Declan",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
    "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen",
    "King", "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores", "Okafor", "Onwumere",
    "Adeyemi", "Mensah", "Tanaka", "Sato", "Patel", "Sharma", "Haddad", "Larsen",
    "O'Brien", "O'Connor", "D'Angelo", "Kowalski", "Novak", "Schmidt", "Rossi", "Dubois",
    "Silva", "Costa",
];

pub const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco",
    "laboris", "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute",
    "irure", "in", "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat",
    "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non", "proident",
    "sunt", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// Uniform pick from a non-empty table.
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn lookup<'a>(table: &[(&str, &'a [&'a str])], key: &str) -> Option<&'a [&'a str]> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, values)| *values)
}

pub fn positions(department: &str) -> &'static [&'static str] {
    lookup(DEPARTMENTS, department).unwrap_or(&[])
}

pub fn skills_for(position: &str) -> &'static [&'static str] {
    lookup(SKILLS_BY_POSITION, position).unwrap_or(&[])
}

pub fn strengths_for(department: &str) -> &'static [&'static str] {
    lookup(STRENGTHS_BY_DEPARTMENT, department).unwrap_or(DEFAULT_STRENGTHS)
}

pub fn random_department<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())].0
}

/// Falls back to the department name when it has no positions.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, department: &'static str) -> &'static str {
    match positions(department) {
        [] => department,
        list => pick(rng, list),
    }
}

/// Shuffled subset of `pool` with `2..=pool.len()` entries. Pools smaller than
/// two are returned whole.
pub fn random_skills<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> Vec<&'static str> {
    if pool.len() < 2 {
        return pool.to_vec();
    }
    let amount = rng.gen_range(2..=pool.len());
    let mut picked: Vec<&'static str> = pool.choose_multiple(rng, amount).copied().collect();
    picked.shuffle(rng);
    picked
}

/// Half-open `[min, max)` salary band for a position.
pub fn salary_band(position: &str) -> (i64, i64) {
    match position {
        "Senior Software Engineer" | "Lead Developer" | "Manager" => (100_000, 150_000),
        "Software Engineer" | "Data Scientist" | "Data Engineer" | "DevOps Engineer" => {
            (90_000, 120_000)
        }
        "Junior Developer" | "Data Analyst" => (70_000, 90_000),
        _ => (50_000, 80_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn every_position_has_a_skill_pool_and_every_department_strengths() {
        for (department, positions) in DEPARTMENTS {
            assert!(!positions.is_empty());
            assert_ne!(strengths_for(department), DEFAULT_STRENGTHS);
            for position in *positions {
                assert!(skills_for(position).len() >= 2, "{position}");
            }
        }
    }

    #[test]
    fn skill_pools_have_no_duplicates() {
        for (position, pool) in SKILLS_BY_POSITION {
            let unique: HashSet<_> = pool.iter().collect();
            assert_eq!(unique.len(), pool.len(), "{position}");
        }
    }

    #[test]
    fn random_skills_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = skills_for("Data Engineer");
        for _ in 0..200 {
            let picked = random_skills(&mut rng, pool);
            assert!((2..=pool.len()).contains(&picked.len()));
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
            assert!(picked.iter().all(|skill| pool.contains(skill)));
        }
    }

    #[test]
    fn bands_match_position_seniority() {
        assert_eq!(salary_band("Lead Developer"), (100_000, 150_000));
        assert_eq!(salary_band("DevOps Engineer"), (90_000, 120_000));
        assert_eq!(salary_band("Data Analyst"), (70_000, 90_000));
        assert_eq!(salary_band("HR Assistant"), (50_000, 80_000));
    }

    #[test]
    fn unknown_keys_fall_back() {
        assert!(positions("Legal").is_empty());
        assert!(skills_for("Astronaut").is_empty());
        assert_eq!(strengths_for("Legal"), DEFAULT_STRENGTHS);
    }
}
